//! Viewport controller: owns the live camera and cube placement, and applies
//! the responsive layout on startup and on every resize.
//!
//! Resize handling runs synchronously inside the winit event: the render
//! surface is resized with the pixel density cap, the camera aspect is
//! updated, and the layout result is applied to camera, cube transform, and
//! overlay placement before the handler returns. Repeated identical-input
//! calls leave all of that state unchanged.

use glam::Vec3;
use winit::dpi::PhysicalSize;

use crate::camera::Camera;
use crate::cube::GROUP_Y_OFFSET;
use crate::gpu::GpuContext;
use crate::layout::{OverlayPlacement, SceneLayout, Viewport, layout};
use crate::mesh::Transform;

/// Pixel density is capped at 2x regardless of the monitor's scale factor.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Render target size in physical pixels for a window size and scale factor,
/// with the density cap applied. Never returns a zero dimension.
pub fn render_size(physical: PhysicalSize<u32>, scale_factor: f64) -> (u32, u32) {
    let ratio = if scale_factor > MAX_PIXEL_RATIO {
        MAX_PIXEL_RATIO / scale_factor
    } else {
        1.0
    };
    let w = (physical.width as f64 * ratio).round() as u32;
    let h = (physical.height as f64 * ratio).round() as u32;
    (w.max(1), h.max(1))
}

/// Window size in device-independent pixels, the unit the layout table and
/// the scroll logic work in.
pub fn logical_size(physical: PhysicalSize<u32>, scale_factor: f64) -> Viewport {
    let sf = if scale_factor > 0.0 { scale_factor } else { 1.0 };
    Viewport::new(
        (physical.width as f64 / sf) as f32,
        (physical.height as f64 / sf) as f32,
    )
}

pub struct ViewportController {
    pub camera: Camera,
    /// Cube group placement. Position and scale belong to the layout; the
    /// rotation field is advanced by the render loop each frame.
    pub cube_transform: Transform,
    viewport: Viewport,
    overlay_placement: OverlayPlacement,
}

impl ViewportController {
    /// Build the controller for an initial window size, running the layout
    /// once so camera and cube start consistent.
    pub fn new(physical: PhysicalSize<u32>, scale_factor: f64) -> Self {
        let viewport = logical_size(physical, scale_factor);
        let initial = layout(viewport);
        let mut controller = Self {
            camera: Camera::new(),
            cube_transform: Transform::new(),
            viewport,
            overlay_placement: initial.overlay,
        };
        controller.camera.aspect = viewport.aspect();
        controller.apply(&initial);
        controller
    }

    /// Current viewport in device-independent pixels.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Overlay placement from the most recent layout evaluation.
    pub fn overlay_placement(&self) -> OverlayPlacement {
        self.overlay_placement
    }

    /// Handle a window resize: surface, camera aspect, and layout in one
    /// synchronous step so no frame observes a partial update.
    pub fn handle_resize(
        &mut self,
        gpu: &mut GpuContext,
        physical: PhysicalSize<u32>,
        scale_factor: f64,
    ) {
        let (rw, rh) = render_size(physical, scale_factor);
        gpu.resize(rw, rh);

        self.viewport = logical_size(physical, scale_factor);
        self.camera.aspect = self.viewport.aspect();
        let next = layout(self.viewport);
        self.apply(&next);
    }

    fn apply(&mut self, scene: &SceneLayout) {
        self.camera.set_pose(&scene.camera);
        self.cube_transform.position = Vec3::new(scene.object_x, GROUP_Y_OFFSET, 0.0);
        self.cube_transform.scale = Vec3::splat(scene.object_scale);
        self.overlay_placement = scene.overlay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::OverlayAnchor;

    #[test]
    fn density_cap_only_bites_above_two() {
        let size = PhysicalSize::new(2000, 1000);
        assert_eq!(render_size(size, 1.0), (2000, 1000));
        assert_eq!(render_size(size, 2.0), (2000, 1000));
        // 3x display renders at 2/3 of physical resolution.
        assert_eq!(render_size(size, 3.0), (1333, 667));
    }

    #[test]
    fn render_size_never_zero() {
        assert_eq!(render_size(PhysicalSize::new(0, 0), 1.0), (1, 1));
    }

    #[test]
    fn logical_size_divides_by_scale_factor() {
        let v = logical_size(PhysicalSize::new(2560, 1600), 2.0);
        assert_eq!(v.width, 1280.0);
        assert_eq!(v.height, 800.0);
    }

    #[test]
    fn new_controller_starts_laid_out() {
        let c = ViewportController::new(PhysicalSize::new(1280, 720), 1.0);
        // 1280-wide landscape hits the >=1100 tier.
        assert_eq!(c.camera.position, Vec3::new(5.9, 3.4, 6.6));
        assert_eq!(c.cube_transform.position, Vec3::new(6.0, GROUP_Y_OFFSET, 0.0));
        assert_eq!(c.cube_transform.scale, Vec3::splat(1.0));
        assert_eq!(c.overlay_placement().anchor, OverlayAnchor::CenterLeft);
        assert!((c.camera.aspect - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn repeated_layout_application_is_idempotent() {
        let size = PhysicalSize::new(500, 900);
        let mut a = ViewportController::new(size, 1.0);
        let before = (a.camera.position, a.cube_transform.scale, a.overlay_placement());
        // Re-apply the same viewport without touching the GPU path.
        let scene = layout(a.viewport());
        a.apply(&scene);
        assert_eq!(before.0, a.camera.position);
        assert_eq!(before.1, a.cube_transform.scale);
        assert_eq!(before.2, a.overlay_placement());
    }

    #[test]
    fn portrait_window_centers_the_cube() {
        let c = ViewportController::new(PhysicalSize::new(820, 1180), 2.0);
        // Logical 410x590, portrait: centered cube at reduced scale.
        assert_eq!(c.cube_transform.position.x, 0.0);
        assert_eq!(c.cube_transform.scale, Vec3::splat(0.85));
    }
}
