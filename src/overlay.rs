//! Scroll-driven fade for the name overlay.
//!
//! The overlay sits over the 3D backdrop and fades out as the page scrolls
//! past the first section. Fading is a pure function of scroll offset and
//! viewport height; the overlay itself is optional and every update path is
//! a no-op when it is absent.

/// Scroll offset (in viewport heights) where the fade begins.
pub const FADE_START: f32 = 0.15;
/// Scroll offset (in viewport heights) where the overlay is fully hidden.
pub const FADE_END: f32 = 0.55;

/// Opacity for a given scroll offset: 1.0 below `0.15 * h`, 0.0 above
/// `0.55 * h`, linear in between.
pub fn overlay_opacity(scroll_y: f32, viewport_height: f32) -> f32 {
    let h = viewport_height.max(1.0);
    let start = h * FADE_START;
    let end = h * FADE_END;
    let t = ((scroll_y - start) / (end - start)).clamp(0.0, 1.0);
    1.0 - t
}

/// The name overlay: two name lines and a spaced-out sub label.
///
/// Placement (anchor, alignment, sub label spacing) is owned by the
/// [`ViewportController`](crate::ViewportController); this struct owns only
/// the text content and the scroll-driven opacity.
pub struct Overlay {
    pub first: String,
    pub last: String,
    pub sub: String,
    pub opacity: f32,
}

impl Overlay {
    pub fn new(
        first: impl Into<String>,
        last: impl Into<String>,
        sub: impl Into<String>,
    ) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
            sub: sub.into(),
            opacity: 1.0,
        }
    }

    /// Recompute opacity from the current scroll offset. Called on every
    /// scroll notification, unthrottled.
    pub fn update_opacity(&mut self, scroll_y: f32, viewport_height: f32) {
        self.opacity = overlay_opacity(scroll_y, viewport_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_visible_at_top() {
        assert_eq!(overlay_opacity(0.0, 1000.0), 1.0);
        // Still fully visible anywhere below the fade start.
        assert_eq!(overlay_opacity(150.0, 1000.0), 1.0);
    }

    #[test]
    fn fully_hidden_past_fade_end() {
        assert_eq!(overlay_opacity(550.0, 1000.0), 0.0);
        assert_eq!(overlay_opacity(5000.0, 1000.0), 0.0);
    }

    #[test]
    fn linear_between_endpoints() {
        // 300 is 3/8 of the way through [150, 550].
        let o = overlay_opacity(300.0, 1000.0);
        assert!((o - 0.625).abs() < 1e-6);
        let mid = overlay_opacity(350.0, 1000.0);
        assert!((mid - 0.5).abs() < 1e-6);
    }

    #[test]
    fn zero_height_viewport_does_not_divide_by_zero() {
        let o = overlay_opacity(10.0, 0.0);
        assert!((0.0..=1.0).contains(&o));
    }

    #[test]
    fn update_writes_opacity() {
        let mut overlay = Overlay::new("Alex", "Carter", "DEVELOPER");
        assert_eq!(overlay.opacity, 1.0);
        overlay.update_opacity(800.0, 1000.0);
        assert_eq!(overlay.opacity, 0.0);
    }
}
