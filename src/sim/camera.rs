//! Horizontal camera follow
//!
//! A straight linear follow with no smoothing, recomputed from the player
//! every tick.

use super::world::World;

/// Left edge of the visible world for a player at `player_x`
///
/// Keeps `lead` of the viewport to the player's left, never shows anything
/// left of zero, and stops at `world.camera_max_x` on the right. When the
/// viewport is wider than the street the left bound wins.
pub fn camera_x(player_x: f32, viewport_width: f32, lead: f32, world: &World) -> f32 {
    let desired = player_x - viewport_width * lead;
    let right_bound = world.camera_max_x - viewport_width;
    desired.min(right_bound).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn world() -> World {
        World::new(&Tuning::default(), 540.0)
    }

    #[test]
    fn test_pinned_left_at_start() {
        assert_eq!(camera_x(80.0, 960.0, 0.45, &world()), 0.0);
    }

    #[test]
    fn test_follows_player() {
        // 1000 - 960 * 0.45
        assert_eq!(camera_x(1000.0, 960.0, 0.45, &world()), 568.0);
    }

    #[test]
    fn test_stops_at_right_bound() {
        let w = world();
        assert_eq!(camera_x(w.player_max_x, 960.0, 0.45, &w), 3280.0 - 960.0);
    }

    #[test]
    fn test_wide_viewport_stays_at_zero() {
        assert_eq!(camera_x(3000.0, 5000.0, 0.45, &world()), 0.0);
    }

    proptest! {
        #[test]
        fn camera_within_bounds(x in 0.0f32..3180.0, vw in 320.0f32..2400.0) {
            let w = world();
            let cam = camera_x(x, vw, 0.45, &w);
            prop_assert!(cam >= 0.0);
            prop_assert!(cam <= (w.camera_max_x - vw).max(0.0));
        }
    }
}
