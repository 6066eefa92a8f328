//! Responsive viewport-to-scene mapping.
//!
//! [`layout`] is a pure function from viewport size to a complete scene
//! configuration: camera pose, cube position/scale, and overlay placement.
//! It is evaluated on startup and on every resize, and calling it twice with
//! the same viewport yields identical output.
//!
//! The width tiers and the portrait override encode hand-tuned framing, not a
//! formula. The table lives here and nowhere else; the tests below pin it.

use glam::Vec3;

/// Viewport size in device-independent pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Portrait orientation: taller than wide.
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Camera placement: where it sits and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Which corner of the viewport the text overlay hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayAnchor {
    /// Centered horizontally, near the top (portrait).
    TopCenter,
    /// Vertically centered on the left edge (landscape).
    CenterLeft,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Overlay placement style. Units follow CSS conventions: `rem` is 16 px,
/// `em` scales with the sub label's font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayPlacement {
    pub anchor: OverlayAnchor,
    pub text_align: TextAlign,
    pub sub_padding_left_em: f32,
    pub sub_margin_top_rem: f32,
    pub sub_letter_spacing_em: f32,
}

/// Complete layout result for one viewport size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLayout {
    pub camera: CameraPose,
    /// Horizontal offset of the cube group. Only x varies across tiers.
    pub object_x: f32,
    /// Uniform scale applied to the cube group.
    pub object_scale: f32,
    pub overlay: OverlayPlacement,
}

struct Tier {
    min_width: f32,
    camera: CameraPose,
    object_x: f32,
}

const fn pose(px: f32, py: f32, pz: f32, lx: f32, ly: f32, lz: f32) -> CameraPose {
    CameraPose {
        position: Vec3::new(px, py, pz),
        look_at: Vec3::new(lx, ly, lz),
    }
}

/// Width tiers, widest first. Evaluated top to bottom, first match wins.
const TIERS: [Tier; 5] = [
    Tier { min_width: 1100.0, camera: pose(5.9, 3.4, 6.6, 3.0, 0.0, 0.0), object_x: 6.0 },
    Tier { min_width: 800.0, camera: pose(4.6, 3.1, 7.2, 2.3, 0.0, 0.0), object_x: 4.6 },
    Tier { min_width: 600.0, camera: pose(3.2, 2.8, 7.8, 1.6, 0.0, 0.0), object_x: 3.2 },
    Tier { min_width: 420.0, camera: pose(2.1, 2.6, 8.6, 1.1, 0.0, 0.0), object_x: 2.2 },
    Tier { min_width: 0.0, camera: pose(0.0, 2.4, 9.2, 0.0, 0.0, 0.0), object_x: 0.0 },
];

/// Portrait beats every width tier: near-centered camera, pulled back.
const PORTRAIT_CAMERA: CameraPose = pose(0.0, 2.7, 9.2, 0.0, 0.0, 0.0);

/// Compute the scene layout for a viewport. Pure and idempotent.
pub fn layout(viewport: Viewport) -> SceneLayout {
    let w = viewport.width;
    let portrait = viewport.is_portrait();

    let tier = TIERS
        .iter()
        .find(|t| w >= t.min_width)
        .unwrap_or(&TIERS[4]);

    let (camera, object_x) = if portrait {
        (PORTRAIT_CAMERA, 0.0)
    } else {
        (tier.camera, tier.object_x)
    };

    // Narrowest screens get the biggest reduction.
    let object_scale = if w < 420.0 || (portrait && w < 520.0) {
        0.85
    } else if w < 600.0 {
        0.92
    } else {
        1.0
    };

    let overlay = if portrait {
        OverlayPlacement {
            anchor: OverlayAnchor::TopCenter,
            text_align: TextAlign::Center,
            sub_padding_left_em: 0.0,
            sub_margin_top_rem: if w < 420.0 { 1.0 } else { 1.2 },
            sub_letter_spacing_em: if w < 420.0 { 0.12 } else { 0.16 },
        }
    } else {
        OverlayPlacement {
            anchor: OverlayAnchor::CenterLeft,
            text_align: TextAlign::Left,
            sub_padding_left_em: 0.6,
            sub_margin_top_rem: 1.6,
            sub_letter_spacing_em: 0.18,
        }
    };

    SceneLayout {
        camera,
        object_x,
        object_scale,
        overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widest_tier_landscape() {
        for w in [1100.0, 1440.0, 2560.0] {
            let l = layout(Viewport::new(w, 900.0));
            assert_eq!(l.camera.position, Vec3::new(5.9, 3.4, 6.6));
            assert_eq!(l.camera.look_at, Vec3::new(3.0, 0.0, 0.0));
            assert_eq!(l.object_x, 6.0);
        }
    }

    #[test]
    fn tier_thresholds_are_inclusive() {
        let at_800 = layout(Viewport::new(800.0, 600.0));
        assert_eq!(at_800.object_x, 4.6);
        let below_800 = layout(Viewport::new(799.0, 599.0));
        assert_eq!(below_800.object_x, 3.2);
    }

    #[test]
    fn portrait_overrides_every_tier() {
        for w in [300.0, 500.0, 700.0, 900.0, 1200.0] {
            let l = layout(Viewport::new(w, w + 1.0));
            assert_eq!(l.camera.position, Vec3::new(0.0, 2.7, 9.2));
            assert_eq!(l.camera.look_at, Vec3::ZERO);
            assert_eq!(l.object_x, 0.0);
        }
    }

    #[test]
    fn scale_tiers() {
        assert_eq!(layout(Viewport::new(400.0, 300.0)).object_scale, 0.85);
        // Portrait below 520 wide also shrinks to 0.85.
        assert_eq!(layout(Viewport::new(500.0, 900.0)).object_scale, 0.85);
        assert_eq!(layout(Viewport::new(599.0, 400.0)).object_scale, 0.92);
        assert_eq!(layout(Viewport::new(1200.0, 800.0)).object_scale, 1.0);
    }

    #[test]
    fn portrait_wide_enough_keeps_full_scale() {
        // Portrait but >= 600 wide: neither shrink branch applies.
        assert_eq!(layout(Viewport::new(700.0, 1000.0)).object_scale, 1.0);
    }

    #[test]
    fn overlay_placement_branches() {
        let portrait = layout(Viewport::new(390.0, 844.0)).overlay;
        assert_eq!(portrait.anchor, OverlayAnchor::TopCenter);
        assert_eq!(portrait.text_align, TextAlign::Center);
        assert_eq!(portrait.sub_margin_top_rem, 1.0);
        assert_eq!(portrait.sub_letter_spacing_em, 0.12);

        let portrait_wider = layout(Viewport::new(500.0, 900.0)).overlay;
        assert_eq!(portrait_wider.sub_margin_top_rem, 1.2);
        assert_eq!(portrait_wider.sub_letter_spacing_em, 0.16);

        let landscape = layout(Viewport::new(1280.0, 720.0)).overlay;
        assert_eq!(landscape.anchor, OverlayAnchor::CenterLeft);
        assert_eq!(landscape.text_align, TextAlign::Left);
        assert_eq!(landscape.sub_padding_left_em, 0.6);
        assert_eq!(landscape.sub_margin_top_rem, 1.6);
        assert_eq!(landscape.sub_letter_spacing_em, 0.18);
    }

    #[test]
    fn layout_is_idempotent() {
        let v = Viewport::new(1024.0, 768.0);
        assert_eq!(layout(v), layout(v));
    }

    #[test]
    fn square_viewport_is_landscape() {
        // height > width defines portrait, so a square falls through to tiers.
        let l = layout(Viewport::new(600.0, 600.0));
        assert_eq!(l.object_x, 3.2);
    }
}
