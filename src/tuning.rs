//! Data-driven game balance
//!
//! Every street layout and pacing constant lives here so a page can override
//! them with a `GAME_CONFIG` object. Nothing is persisted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected tuning overrides
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("street needs at least one lamp")]
    NoLights,
    #[error("{needed} lamps needed but only {count} on the street")]
    TooManyNeeded { needed: u32, count: u32 },
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("camera lead must be within [0, 1], got {0}")]
    CameraLead(f32),
}

/// Balance constants for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Street layout ===
    /// Distance between neighbouring lamps
    pub light_spacing: f32,
    /// Lamps the HUD asks for
    pub lights_needed: u32,
    /// Lamps placed before the store
    pub light_count: u32,
    /// Street space left of the first lamp
    pub left_margin: f32,
    /// First lamp sits this far past the left margin
    pub first_light_offset: f32,
    /// Gap between the last lamp slot and the store front
    pub store_lead: f32,
    /// Distance from the canvas bottom to the street surface
    pub ground_inset: f32,

    // === Player ===
    pub player_start_x: f32,
    pub player_speed: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Player top edge sits this far above the street
    pub player_ground_offset: f32,
    /// How far past the store front the player may walk
    pub store_overrun: f32,

    // === Van ===
    pub van_width: f32,
    pub van_height: f32,
    pub van_speed: f32,
    /// Van spawn x, relative to the left margin
    pub van_start_offset: f32,

    // === Economy ===
    /// Money paid per lamp switched on
    pub reward: u32,
    /// Money needed at the store
    pub goal: u32,

    // === Interaction ===
    /// Max horizontal distance for plugging in a lamp
    pub plug_range: f32,
    /// Store counts as reached this far before its front
    pub store_trigger: f32,

    // === Camera ===
    /// Fraction of the viewport kept left of the player
    pub camera_lead: f32,
    /// Camera may scroll this far past the store front
    pub camera_overrun: f32,

    // === Cosmetic timers (ticks) ===
    pub cord_ticks: u32,
    pub bubble_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            light_spacing: 200.0,
            lights_needed: 10,
            light_count: 11,
            left_margin: 260.0,
            first_light_offset: 140.0,
            store_lead: 520.0,
            ground_inset: 100.0,

            player_start_x: 80.0,
            player_speed: 3.3,
            player_width: 36.0,
            player_height: 50.0,
            player_ground_offset: 58.0,
            store_overrun: 200.0,

            van_width: 124.0,
            van_height: 56.0,
            van_speed: 2.8,
            van_start_offset: -300.0,

            reward: 100,
            goal: 1000,

            plug_range: 48.0,
            store_trigger: 20.0,

            camera_lead: 0.45,
            camera_overrun: 300.0,

            cord_ticks: 22,
            bubble_ticks: 240,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON (missing fields keep their defaults) and validate them
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.light_count == 0 {
            return Err(TuningError::NoLights);
        }
        if self.lights_needed > self.light_count {
            return Err(TuningError::TooManyNeeded {
                needed: self.lights_needed,
                count: self.light_count,
            });
        }

        let positive = [
            ("light_spacing", self.light_spacing),
            ("player_speed", self.player_speed),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("van_width", self.van_width),
            ("van_height", self.van_height),
            ("van_speed", self.van_speed),
            ("plug_range", self.plug_range),
            ("reward", self.reward as f32),
            ("goal", self.goal as f32),
        ];
        for (field, value) in positive {
            // `!(v > 0)` also rejects NaN
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        if !(0.0..=1.0).contains(&self.camera_lead) {
            return Err(TuningError::CameraLead(self.camera_lead));
        }
        Ok(())
    }

    /// Lamps worth of money needed to afford the goal
    pub fn goal_lights(&self) -> u32 {
        self.goal.div_ceil(self.reward.max(1))
    }
}
