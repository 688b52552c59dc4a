//! Render pass
//!
//! Draws the street from read-only game state through a small 2D `Surface`
//! abstraction; the browser backend is a Canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::draw_frame;
pub use surface::{Color, ImageId, Surface, TextAlign, TextStyle};
