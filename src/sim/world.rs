//! Street layout derived from tuning
//!
//! Pure data: lamp positions, the store front and the bounds everything is
//! clamped against. Only the ground line depends on the viewport.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Fixed geometry of the street
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Street surface y (screen space, grows downward)
    pub ground_y: f32,
    /// Lamp x positions, left to right
    pub light_xs: Vec<f32>,
    /// Left edge of the store
    pub store_x: f32,
    /// Player x is clamped into [0, player_max_x]
    pub player_max_x: f32,
    /// Player x beyond this counts as "at the store"
    pub store_trigger_x: f32,
    /// Right edge the camera may reveal
    pub camera_max_x: f32,
    /// Van spawn x
    pub van_start_x: f32,
    /// Billboard left edges (cosmetic)
    pub billboard_xs: Vec<f32>,
    /// Distance from viewport bottom to the street
    ground_inset: f32,
}

impl World {
    pub fn new(tuning: &Tuning, viewport_height: f32) -> Self {
        let spacing = tuning.light_spacing;
        let margin = tuning.left_margin;

        let light_xs = (0..tuning.light_count)
            .map(|i| margin + tuning.first_light_offset + i as f32 * spacing)
            .collect();
        let store_x = margin + tuning.light_count as f32 * spacing + tuning.store_lead;

        let billboard_xs = vec![
            margin + spacing * 1.5 - 100.0,
            margin + spacing * 4.0 - 120.0,
            margin + spacing * 7.5 - 100.0,
            store_x - 440.0,
        ];

        Self {
            ground_y: viewport_height - tuning.ground_inset,
            light_xs,
            store_x,
            player_max_x: store_x + tuning.store_overrun,
            store_trigger_x: store_x - tuning.store_trigger,
            camera_max_x: store_x + tuning.camera_overrun,
            van_start_x: margin + tuning.van_start_offset,
            billboard_xs,
            ground_inset: tuning.ground_inset,
        }
    }

    /// Re-derive the ground line after a viewport resize
    pub fn set_ground(&mut self, viewport_height: f32) {
        self.ground_y = viewport_height - self.ground_inset;
    }

    /// Clamp a player x into the walkable range
    #[inline]
    pub fn clamp_player_x(&self, x: f32) -> f32 {
        x.max(0.0).min(self.player_max_x)
    }
}
