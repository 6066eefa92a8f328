//! # Backdrop
//!
//! **A rotating Rubik's cube scene that sits behind a scrolling page.**
//!
//! The cube spins forever at a fixed step per frame while a responsive
//! layout keeps it framed next to (or behind) the page content at every
//! window width. A name overlay fades out over the first half screen of
//! scrolling, and a top nav highlights whichever section currently crosses
//! the reference line at 45% of the viewport height.
//!
//! ## Quick Start
//!
//! ```no_run
//! use backdrop::*;
//!
//! fn main() {
//!     let sections = vec![
//!         Section::new("home", 0.0, 800.0),
//!         Section::new("projects", 800.0, 800.0),
//!         Section::new("contact", 1600.0, 800.0),
//!     ];
//!     let overlay = Overlay::new("Ada", "Quinn", "CREATIVE DEVELOPER");
//!     run(AppConfig::new().title("Ada Quinn"), Some(overlay), sections);
//! }
//! ```
//!
//! The scene logic is plain data all the way down: [`layout`] maps a
//! viewport to a camera pose and cube placement, [`overlay`] maps a scroll
//! offset to an opacity, and [`spy`] maps one to an active section. None of
//! it touches the GPU, so all of it is unit-testable.

mod app;
mod assets;
mod camera;
mod cube;
mod cube_pass;
mod draw2d;
mod gpu;
pub mod layout;
mod mesh;
pub mod overlay;
pub mod spy;
mod viewport;

pub use app::{AppConfig, run};
pub use assets::{Assets, FontAtlas, FontError, FontId};
pub use camera::Camera;
pub use cube::{CubePlan, Cubelet, Face, Sticker, spin_rotation};
pub use cube_pass::{CubePass, DrawCall};
pub use draw2d::{Color, Draw2d};
pub use gpu::GpuContext;
pub use layout::{CameraPose, SceneLayout, Viewport, layout};
pub use mesh::{Mesh, Transform, Vertex3d};
pub use overlay::{Overlay, overlay_opacity};
pub use spy::{Section, SectionSpy, active_section};
pub use viewport::ViewportController;

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
