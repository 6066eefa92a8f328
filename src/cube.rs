//! Static Rubik's cube construction.
//!
//! Builds the geometry plan for the backdrop prop: a 3x3x3 grid of dark
//! cubelets, each exterior face carrying a two-layer sticker (black border
//! quad with a colored quad lifted slightly along the face normal so the two
//! never z-fight). The plan is pure data; GPU upload happens once at startup
//! in the app. Identical constants always produce an identical plan, and the
//! cube is never rebuilt at runtime.

use glam::{EulerRot, Quat, Vec3};

use crate::draw2d::Color;

/// Edge length of one cubelet.
pub const CUBELET_SIZE: f32 = 0.95;
/// Gap between adjacent cubelets.
pub const CUBELET_GAP: f32 = 0.07;
/// Side length of the black border quad under each sticker.
pub const STICKER_BORDER_SIZE: f32 = 0.78;
/// Side length of the colored sticker quad.
pub const STICKER_FACE_SIZE: f32 = 0.70;
/// Lift of the colored quad above its border along the face normal.
pub const STICKER_LIFT: f32 = 0.004;
/// Distance from a cubelet's center to its sticker plane.
pub const STICKER_OFFSET: f32 = CUBELET_SIZE / 2.0 + 0.02;

/// Near-black body of every cubelet.
pub const BODY_COLOR: Color = Color::hex(0x070707);

/// Vertical offset of the whole cube group above the origin.
pub const GROUP_Y_OFFSET: f32 = 0.3;

/// Fixed presentation tilt, degrees.
pub const TILT_X_DEG: f32 = 18.0;
pub const TILT_Y_DEG: f32 = 35.0;

/// Spin advance per rendered frame, radians. Frame-based, not time-based.
pub const SPIN_STEP: f32 = 0.002;

/// One of the six outward cube directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Right,
    Left,
    Up,
    Down,
    Front,
    Back,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Right,
        Face::Left,
        Face::Up,
        Face::Down,
        Face::Front,
        Face::Back,
    ];

    /// Outward unit normal in cube-local space.
    pub fn normal(self) -> Vec3 {
        match self {
            Face::Right => Vec3::X,
            Face::Left => Vec3::NEG_X,
            Face::Up => Vec3::Y,
            Face::Down => Vec3::NEG_Y,
            Face::Front => Vec3::Z,
            Face::Back => Vec3::NEG_Z,
        }
    }

    /// Rotation taking a +Z-facing quad onto this face.
    pub fn rotation(self) -> Quat {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self {
            Face::Right => Quat::from_rotation_y(FRAC_PI_2),
            Face::Left => Quat::from_rotation_y(-FRAC_PI_2),
            Face::Up => Quat::from_rotation_x(-FRAC_PI_2),
            Face::Down => Quat::from_rotation_x(FRAC_PI_2),
            Face::Front => Quat::IDENTITY,
            Face::Back => Quat::from_rotation_y(PI),
        }
    }

    /// Fixed face palette. Never reassigned at runtime.
    pub fn color(self) -> Color {
        match self {
            Face::Right => Color::hex(0xd32f2f),
            Face::Left => Color::hex(0xff9800),
            Face::Up => Color::hex(0xffffff),
            Face::Down => Color::hex(0xffeb3b),
            Face::Front => Color::hex(0x2e7d32),
            Face::Back => Color::hex(0x1565c0),
        }
    }

    /// Whether a cubelet at the given grid coordinate shows this face.
    fn is_exterior(self, grid: [i32; 3]) -> bool {
        match self {
            Face::Right => grid[0] == 1,
            Face::Left => grid[0] == -1,
            Face::Up => grid[1] == 1,
            Face::Down => grid[1] == -1,
            Face::Front => grid[2] == 1,
            Face::Back => grid[2] == -1,
        }
    }
}

/// A two-layer sticker on one cubelet face. Positions are cubelet-local.
#[derive(Clone, Debug)]
pub struct Sticker {
    pub face: Face,
    pub border_center: Vec3,
    pub face_center: Vec3,
    pub rotation: Quat,
}

/// One of the 27 unit cubes composing the prop.
#[derive(Clone, Debug)]
pub struct Cubelet {
    pub grid: [i32; 3],
    /// Center in cube-group space.
    pub position: Vec3,
    pub stickers: Vec<Sticker>,
}

/// The full geometry plan for the cube group.
#[derive(Clone, Debug)]
pub struct CubePlan {
    pub cubelets: Vec<Cubelet>,
}

impl CubePlan {
    /// Build the 27-cubelet plan from the fixed constants. Cannot fail.
    pub fn build() -> Self {
        let step = CUBELET_SIZE + CUBELET_GAP;
        let mut cubelets = Vec::with_capacity(27);

        for x in -1..=1 {
            for y in -1..=1 {
                for z in -1..=1 {
                    let grid = [x, y, z];
                    let position = Vec3::new(x as f32, y as f32, z as f32) * step;

                    let stickers = Face::ALL
                        .iter()
                        .filter(|face| face.is_exterior(grid))
                        .map(|&face| {
                            let border_center = face.normal() * STICKER_OFFSET;
                            Sticker {
                                face,
                                border_center,
                                face_center: border_center + face.normal() * STICKER_LIFT,
                                rotation: face.rotation(),
                            }
                        })
                        .collect();

                    cubelets.push(Cubelet {
                        grid,
                        position,
                        stickers,
                    });
                }
            }
        }

        Self { cubelets }
    }

    pub fn sticker_count(&self) -> usize {
        self.cubelets.iter().map(|c| c.stickers.len()).sum()
    }
}

/// Group rotation for a given spin accumulator: the fixed tilt plus the
/// continuously advancing yaw, matching an XYZ euler with a growing Y term.
pub fn spin_rotation(spin: f32) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        TILT_X_DEG.to_radians(),
        TILT_Y_DEG.to_radians() + spin,
        0.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_has_27_cubelets_and_54_stickers() {
        let plan = CubePlan::build();
        assert_eq!(plan.cubelets.len(), 27);
        assert_eq!(plan.sticker_count(), 54);
    }

    #[test]
    fn center_cubelet_is_bare() {
        let plan = CubePlan::build();
        let center = plan
            .cubelets
            .iter()
            .find(|c| c.grid == [0, 0, 0])
            .unwrap();
        assert!(center.stickers.is_empty());
    }

    #[test]
    fn corners_carry_three_stickers() {
        let plan = CubePlan::build();
        let corners: Vec<_> = plan
            .cubelets
            .iter()
            .filter(|c| c.grid.iter().all(|&v| v != 0))
            .collect();
        assert_eq!(corners.len(), 8);
        assert!(corners.iter().all(|c| c.stickers.len() == 3));
    }

    #[test]
    fn face_centers_carry_one_sticker() {
        let plan = CubePlan::build();
        let face_centers = plan
            .cubelets
            .iter()
            .filter(|c| c.grid.iter().filter(|&&v| v != 0).count() == 1);
        assert_eq!(face_centers.clone().count(), 6);
        for c in face_centers {
            assert_eq!(c.stickers.len(), 1);
        }
    }

    #[test]
    fn sticker_face_is_lifted_along_normal() {
        let plan = CubePlan::build();
        for cubelet in &plan.cubelets {
            for sticker in &cubelet.stickers {
                let lift = sticker.face_center - sticker.border_center;
                assert!((lift - sticker.face.normal() * STICKER_LIFT).length() < 1e-6);
            }
        }
    }

    #[test]
    fn face_rotation_maps_quad_normal_onto_face_normal() {
        for face in Face::ALL {
            let rotated = face.rotation() * Vec3::Z;
            assert!(
                (rotated - face.normal()).length() < 1e-6,
                "{face:?}: {rotated:?}"
            );
        }
    }

    #[test]
    fn grid_spacing_uses_size_plus_gap() {
        let plan = CubePlan::build();
        let right_center = plan
            .cubelets
            .iter()
            .find(|c| c.grid == [1, 0, 0])
            .unwrap();
        assert!((right_center.position.x - (CUBELET_SIZE + CUBELET_GAP)).abs() < 1e-6);
    }

    #[test]
    fn build_is_deterministic() {
        let a = CubePlan::build();
        let b = CubePlan::build();
        for (ca, cb) in a.cubelets.iter().zip(&b.cubelets) {
            assert_eq!(ca.grid, cb.grid);
            assert_eq!(ca.position, cb.position);
            assert_eq!(ca.stickers.len(), cb.stickers.len());
        }
    }

    #[test]
    fn zero_spin_is_the_base_tilt() {
        let base = spin_rotation(0.0);
        let expected = Quat::from_euler(
            EulerRot::XYZ,
            TILT_X_DEG.to_radians(),
            TILT_Y_DEG.to_radians(),
            0.0,
        );
        assert!(base.abs_diff_eq(expected, 1e-6));
    }
}
