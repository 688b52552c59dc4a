//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One logical step per tick, no wall-clock time
//! - Stable iteration order (street order for lamps)
//! - No rendering, DOM or scheduling dependencies

pub mod camera;
pub mod collision;
pub mod input;
pub mod outcome;
pub mod state;
pub mod tick;
pub mod world;

pub use camera::camera_x;
pub use collision::Aabb;
pub use input::{Binding, InputSnapshot, Intent, InteractTrigger, KeyCommand, TickInput, map_key};
pub use outcome::{Outcome, Overlay, OverlayAction};
pub use state::{Facing, GameState, LightPost, Player, Van};
pub use tick::{GameEvent, tick};
pub use world::World;
