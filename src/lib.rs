//! Lamp Run - a side-scrolling street-light dash
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, lamps, van pursuit, outcomes)
//! - `game`: Session wrapper that owns the state, input and fixed-step clock
//! - `renderer`: Read-only render pass drawn through a 2D surface
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::{FrameClock, Game, Hud};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the clock will accept (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Fallback viewport when the canvas has no layout size yet
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 960.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 540.0;
}

/// Viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: consts::DEFAULT_VIEWPORT_WIDTH,
            height: consts::DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    /// Build a viewport, falling back to the default size for degenerate inputs
    pub fn new(width: f32, height: f32) -> Self {
        let fallback = Self::default();
        Self {
            width: if width > 0.0 { width } else { fallback.width },
            height: if height > 0.0 { height } else { fallback.height },
        }
    }
}
