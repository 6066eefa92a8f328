//! Perspective look-at camera for the backdrop scene.
//!
//! Pose (position + look-at target) is driven by the responsive layout;
//! aspect ratio is driven by resize handling. Everything else is fixed.

use glam::{Mat4, Vec3};

use crate::layout::CameraPose;

/// Vertical field of view, degrees.
pub const FOV_DEG: f32 = 55.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 100.0;

#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub look_at: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            fov: FOV_DEG.to_radians(),
            aspect: 1.0,
            near: NEAR,
            far: FAR,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a layout-derived pose, leaving projection parameters untouched.
    pub fn set_pose(&mut self, pose: &CameraPose) {
        self.position = pose.position;
        self.look_at = pose.look_at;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined projection * view, what the vertex shader consumes.
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Viewport, layout};

    #[test]
    fn set_pose_only_touches_position_and_target() {
        let mut camera = Camera::new();
        camera.aspect = 1.6;
        let l = layout(Viewport::new(1280.0, 800.0));
        camera.set_pose(&l.camera);
        assert_eq!(camera.position, l.camera.position);
        assert_eq!(camera.look_at, l.camera.look_at);
        assert_eq!(camera.aspect, 1.6);
        assert_eq!(camera.fov, FOV_DEG.to_radians());
    }

    #[test]
    fn view_matrix_places_target_on_negative_z() {
        let mut camera = Camera::new();
        camera.position = Vec3::new(0.0, 0.0, 9.2);
        camera.look_at = Vec3::ZERO;
        let view_target = camera.view_matrix().transform_point3(camera.look_at);
        assert!(view_target.z < 0.0);
        assert!(view_target.x.abs() < 1e-6);
    }
}
