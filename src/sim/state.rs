//! Game state and core simulation types
//!
//! Everything a round needs lives in one owned `GameState`; reset rebuilds it
//! from the tuning it was created with.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::outcome::Outcome;
use super::world::World;
use crate::tuning::Tuning;

/// Which way the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right (sprite mirroring)
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// The player walking down the street
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// x is the body centre, y the top edge
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub facing: Facing,
    pub money: u32,
    pub lights_on: u32,
}

impl Player {
    fn new(tuning: &Tuning, world: &World) -> Self {
        Self {
            pos: Vec2::new(
                tuning.player_start_x,
                world.ground_y - tuning.player_ground_offset,
            ),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            speed: tuning.player_speed,
            facing: Facing::Right,
            money: 0,
            lights_on: 0,
        }
    }

    /// Collision box, centred horizontally on `pos.x`
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.pos.x - self.size.x / 2.0,
            self.pos.y,
            self.size.x,
            self.size.y,
        )
    }
}

/// A street lamp waiting to be plugged in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightPost {
    pub x: f32,
    pub on: bool,
    /// Extension cord animation (ticks remaining, cosmetic)
    pub cord_ticks: u32,
}

impl LightPost {
    pub fn new(x: f32) -> Self {
        Self {
            x,
            on: false,
            cord_ticks: 0,
        }
    }

    /// True when `x` is close enough to plug this lamp in
    #[inline]
    pub fn in_range(&self, x: f32, range: f32) -> bool {
        (x - self.x).abs() < range
    }
}

/// The van chasing the player once the first lamp is lit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Van {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub active: bool,
    /// Set on first dispatch; the van never comes back in the same round
    pub dispatched: bool,
    /// Speech bubble (ticks remaining, cosmetic)
    pub bubble_ticks: u32,
}

impl Van {
    fn new(tuning: &Tuning, world: &World) -> Self {
        Self {
            pos: Vec2::new(world.van_start_x, world.ground_y - tuning.van_height),
            size: Vec2::new(tuning.van_width, tuning.van_height),
            speed: tuning.van_speed,
            active: false,
            dispatched: false,
            bubble_ticks: 0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// Complete round state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub world: World,
    pub player: Player,
    /// Lamps in street order
    pub lights: Vec<LightPost>,
    pub van: Van,
    pub outcome: Outcome,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Build a fresh round for a viewport of the given height
    pub fn new(tuning: Tuning, viewport_height: f32) -> Self {
        let world = World::new(&tuning, viewport_height);
        let player = Player::new(&tuning, &world);
        let lights = world.light_xs.iter().copied().map(LightPost::new).collect();
        let van = Van::new(&tuning, &world);

        Self {
            tuning,
            world,
            player,
            lights,
            van,
            outcome: Outcome::Playing,
            time_ticks: 0,
        }
    }

    /// Return every entity to its construction-time values
    pub fn reset(&mut self) {
        let ground_y = self.world.ground_y;
        let tuning = self.tuning.clone();
        *self = Self::new(tuning, ground_y + self.tuning.ground_inset);
    }

    /// Move the street to a new viewport height, keeping everyone on the ground
    pub fn set_ground(&mut self, viewport_height: f32) {
        self.world.set_ground(viewport_height);
        self.player.pos.y = self.world.ground_y - self.tuning.player_ground_offset;
        self.van.pos.y = self.world.ground_y - self.van.size.y;
    }

    /// Close a dismissible message; terminal outcomes stay put
    pub fn dismiss(&mut self) {
        if self.outcome == Outcome::StoreShort {
            self.outcome = Outcome::Playing;
        }
    }

    /// Index of the first unlit lamp within plugging range, in street order
    pub fn pluggable_light(&self) -> Option<usize> {
        let range = self.tuning.plug_range;
        self.lights
            .iter()
            .position(|l| !l.on && l.in_range(self.player.pos.x, range))
    }

    pub fn at_store(&self) -> bool {
        self.player.pos.x > self.world.store_trigger_x
    }

    /// Money needed at the store
    pub fn goal(&self) -> u32 {
        self.tuning.goal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = GameState::new(Tuning::default(), 540.0);
        assert_eq!(state.player.pos, Vec2::new(80.0, 382.0));
        assert_eq!(state.player.money, 0);
        assert_eq!(state.player.lights_on, 0);
        assert_eq!(state.player.facing, Facing::Right);
        assert_eq!(state.lights.len(), 11);
        assert!(state.lights.iter().all(|l| !l.on));
        assert!(!state.van.active);
        assert_eq!(state.van.pos, Vec2::new(-40.0, 384.0));
        assert_eq!(state.outcome, Outcome::Playing);
    }

    #[test]
    fn test_reset_restores_construction_values() {
        let fresh = GameState::new(Tuning::default(), 540.0);
        let mut state = fresh.clone();

        state.player.pos.x = 1234.0;
        state.player.money = 700;
        state.player.lights_on = 7;
        state.player.facing = Facing::Left;
        state.lights[3].on = true;
        state.lights[3].cord_ticks = 9;
        state.van.active = true;
        state.van.dispatched = true;
        state.van.pos.x = 900.0;
        state.outcome = Outcome::Caught { taken: 700 };
        state.time_ticks = 42;

        state.reset();
        assert_eq!(state, fresh);
    }

    #[test]
    fn test_reset_keeps_resized_ground() {
        let mut state = GameState::new(Tuning::default(), 540.0);
        state.set_ground(700.0);
        state.player.money = 300;
        state.reset();
        assert_eq!(state.world.ground_y, 600.0);
        assert_eq!(state.player.pos.y, 542.0);
    }

    #[test]
    fn test_set_ground_moves_entities() {
        let mut state = GameState::new(Tuning::default(), 540.0);
        state.set_ground(640.0);
        assert_eq!(state.world.ground_y, 540.0);
        assert_eq!(state.player.pos.y, 482.0);
        assert_eq!(state.van.pos.y, 484.0);
    }

    #[test]
    fn test_player_and_van_share_the_street() {
        // Boxes overlap vertically, so only x decides a catch
        let state = GameState::new(Tuning::default(), 540.0);
        let p = state.player.bounds();
        let v = state.van.bounds();
        assert!(p.max().y >= v.min.y && v.max().y >= p.min.y);
    }

    #[test]
    fn test_pluggable_light_uses_street_order() {
        let mut tuning = Tuning::default();
        // Range wide enough to cover two lamps
        tuning.plug_range = 250.0;
        let mut state = GameState::new(tuning, 540.0);
        state.player.pos.x = 500.0;
        assert_eq!(state.pluggable_light(), Some(0));
        state.lights[0].on = true;
        assert_eq!(state.pluggable_light(), Some(1));
    }

    #[test]
    fn test_dismiss_only_clears_store_message() {
        let mut state = GameState::new(Tuning::default(), 540.0);
        state.outcome = Outcome::StoreShort;
        state.dismiss();
        assert_eq!(state.outcome, Outcome::Playing);

        state.outcome = Outcome::ReachedGoal;
        state.dismiss();
        assert_eq!(state.outcome, Outcome::ReachedGoal);
    }
}
