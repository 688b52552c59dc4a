//! Game session: state, input and the fixed-step clock
//!
//! The host feeds key/button events and frame deltas in; the session runs
//! whole ticks and keeps the camera in sync. Nothing here schedules itself,
//! so tests drive it exactly like the browser loop does.

use crate::Viewport;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{
    Binding, GameEvent, GameState, InputSnapshot, InteractTrigger, KeyCommand, Overlay,
    OverlayAction, TickInput, camera_x, map_key, tick,
};
use crate::tuning::Tuning;

/// Converts variable frame time into fixed ticks
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame delta (seconds) and return how many ticks to run
    pub fn advance(&mut self, dt: f32) -> u32 {
        // NaN and negative deltas count as no time
        let dt = dt.max(0.0).min(MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    pub fn clear(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Read-only numbers for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub money: u32,
    pub lights_on: u32,
    pub lights_needed: u32,
    pub goal: u32,
}

impl Hud {
    pub fn money_text(&self) -> String {
        format!("${}", self.money)
    }

    pub fn lights_text(&self) -> String {
        format!("Lights: {}/{}", self.lights_on, self.lights_needed)
    }

    /// Progress toward the goal in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.goal == 0 {
            return 1.0;
        }
        (self.money as f32 / self.goal as f32).min(1.0)
    }
}

/// Game instance holding all session state
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    input: InputSnapshot,
    interact: InteractTrigger,
    clock: FrameClock,
    viewport: Viewport,
    camera_x: f32,
}

impl Game {
    pub fn new(tuning: Tuning, viewport: Viewport) -> Self {
        let mut game = Self {
            state: GameState::new(tuning, viewport.height),
            input: InputSnapshot::default(),
            interact: InteractTrigger::default(),
            clock: FrameClock::new(),
            viewport,
            camera_x: 0.0,
        };
        game.update_camera();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera_x(&self) -> f32 {
        self.camera_x
    }

    pub fn press(&mut self, binding: Binding) {
        self.input.press(binding);
    }

    pub fn release(&mut self, binding: Binding) {
        self.input.release(binding);
    }

    /// Drop all held inputs (window blur, tab hidden)
    pub fn release_all(&mut self) {
        self.input.release_all();
    }

    /// Apply a keyboard event; returns true if the key belongs to the game
    pub fn handle_key(&mut self, key: &str, down: bool) -> bool {
        match map_key(key) {
            Some(KeyCommand::Hold(binding)) => {
                if down {
                    self.press(binding);
                } else {
                    self.release(binding);
                }
                true
            }
            Some(KeyCommand::Reset) => {
                if down {
                    self.reset();
                }
                true
            }
            None => false,
        }
    }

    /// Run exactly one simulation tick
    pub fn step(&mut self) -> Vec<GameEvent> {
        let input = TickInput::sample(&self.input, &mut self.interact);
        let events = tick(&mut self.state, &input);
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::LightOn { .. }))
        {
            self.interact.consume();
        }
        self.update_camera();
        events
    }

    /// Run however many ticks a frame of `dt` seconds is worth
    pub fn advance(&mut self, dt: f32) -> Vec<GameEvent> {
        let substeps = self.clock.advance(dt);
        let mut events = Vec::new();
        for _ in 0..substeps {
            events.extend(self.step());
        }
        events
    }

    /// Start the round over
    pub fn reset(&mut self) {
        self.state.reset();
        self.input.release_all();
        self.interact.clear();
        self.clock.clear();
        self.update_camera();
        log::info!("Round reset");
    }

    /// Hide a dismissible message without touching progress
    pub fn dismiss_overlay(&mut self) {
        self.state.dismiss();
    }

    /// The message the page should currently show
    pub fn overlay(&self) -> Option<Overlay> {
        self.state.outcome.overlay(&self.state)
    }

    /// Run the overlay button's action
    pub fn activate_overlay(&mut self, action: OverlayAction) {
        match action {
            OverlayAction::Restart => self.reset(),
            OverlayAction::Dismiss => self.dismiss_overlay(),
        }
    }

    /// Track a new canvas size
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.state.set_ground(viewport.height);
        self.update_camera();
    }

    pub fn hud(&self) -> Hud {
        Hud {
            money: self.state.player.money,
            lights_on: self.state.player.lights_on,
            lights_needed: self.state.tuning.lights_needed,
            goal: self.state.tuning.goal,
        }
    }

    fn update_camera(&mut self) {
        self.camera_x = camera_x(
            self.state.player.pos.x,
            self.viewport.width,
            self.state.tuning.camera_lead,
            &self.state.world,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Outcome;

    fn new_game() -> Game {
        Game::new(Tuning::default(), Viewport::default())
    }

    fn step_until(game: &mut Game, mut done: impl FnMut(&Game) -> bool) {
        for _ in 0..5_000 {
            if done(game) {
                return;
            }
            game.step();
        }
        panic!("condition never reached");
    }

    #[test]
    fn test_clock_runs_whole_ticks() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(SIM_DT * 0.5), 0);
        assert_eq!(clock.advance(SIM_DT * 0.6), 1);
        assert_eq!(clock.advance(SIM_DT * 3.0), 3);
    }

    #[test]
    fn test_clock_caps_long_frames() {
        // A 5 s hitch counts as MAX_FRAME_DT
        let capped = FrameClock::new().advance(MAX_FRAME_DT);
        assert!((5..=6).contains(&capped));
        assert_eq!(FrameClock::new().advance(5.0), capped);

        assert_eq!(FrameClock::new().advance(-1.0), 0);
        assert_eq!(FrameClock::new().advance(f32::NAN), 0);
    }

    #[test]
    fn test_keyboard_walk_plug_and_dispatch() {
        let mut game = new_game();
        assert!(game.handle_key("d", true));
        step_until(&mut game, |g| g.state().pluggable_light().is_some());
        assert!(game.handle_key("d", false));

        game.handle_key("e", true);
        let events = game.step();
        assert_eq!(
            events,
            vec![GameEvent::LightOn { index: 0 }, GameEvent::VanDispatched]
        );
        assert_eq!(game.hud().money, 100);
        assert_eq!(game.hud().lights_on, 1);
        assert!(game.state().van.active);
    }

    #[test]
    fn test_held_plug_lights_one_lamp_per_press() {
        let mut tuning = Tuning::default();
        tuning.plug_range = 250.0;
        let mut game = Game::new(tuning, Viewport::default());
        game.state.player.pos.x = 500.0;

        game.press(Binding::KeyE);
        game.step();
        game.step();
        game.step();
        assert_eq!(game.hud().lights_on, 1);

        game.release(Binding::KeyE);
        game.step();
        game.press(Binding::TouchPlug);
        game.step();
        assert_eq!(game.hud().lights_on, 2);
    }

    #[test]
    fn test_plug_held_while_walking_catches_next_lamp() {
        let mut game = new_game();
        game.press(Binding::KeyE);
        game.press(Binding::ArrowRight);
        step_until(&mut game, |g| g.hud().lights_on == 1);
        assert!(game.state().lights[0].on);

        // Still holding both: the next lamp is passed by
        step_until(&mut game, |g| g.state().player.pos.x > 700.0);
        assert_eq!(game.hud().lights_on, 1);
    }

    #[test]
    fn test_touch_and_key_are_ored() {
        let mut game = new_game();
        game.press(Binding::TouchRight);
        game.press(Binding::KeyD);
        game.release(Binding::TouchRight);
        game.step();
        assert!(game.state().player.pos.x > 80.0);
    }

    #[test]
    fn test_advance_ticks_at_sim_rate() {
        let mut game = new_game();
        game.press(Binding::ArrowRight);
        game.advance(SIM_DT * 2.5);
        assert_eq!(game.state().time_ticks, 2);
        assert!((game.state().player.pos.x - 86.6).abs() < 1e-3);
    }

    #[test]
    fn test_camera_follows_after_each_tick() {
        let mut game = new_game();
        assert_eq!(game.camera_x(), 0.0);
        game.state.player.pos.x = 1500.0;
        game.step();
        assert_eq!(game.camera_x(), 1500.0 - 960.0 * 0.45);
    }

    #[test]
    fn test_caught_then_restart() {
        let mut game = new_game();
        game.state.player.pos.x = 400.0;
        game.press(Binding::KeyE);
        game.step();
        game.release(Binding::KeyE);
        step_until(&mut game, |g| g.state().outcome != Outcome::Playing);

        assert_eq!(game.state().outcome, Outcome::Caught { taken: 100 });
        let overlay = game.overlay().unwrap();
        assert_eq!(overlay.action, OverlayAction::Restart);

        game.activate_overlay(overlay.action);
        assert_eq!(game.state(), &GameState::new(Tuning::default(), 540.0));
        assert!(game.overlay().is_none());
        assert_eq!(game.camera_x(), 0.0);
    }

    #[test]
    fn test_store_message_dismiss_keeps_progress() {
        let mut game = new_game();
        game.state.player.money = 300;
        game.state.player.pos.x = game.state.world.store_trigger_x + 5.0;
        game.step();

        let overlay = game.overlay().unwrap();
        assert_eq!(overlay.action, OverlayAction::Dismiss);
        game.activate_overlay(overlay.action);
        assert!(game.overlay().is_none());
        assert_eq!(game.hud().money, 300);
    }

    #[test]
    fn test_reset_key() {
        let mut game = new_game();
        game.press(Binding::ArrowRight);
        game.step();
        assert!(game.handle_key("R", true));
        assert_eq!(game.state().player.pos.x, 80.0);
        assert!(!game.input().is_pressed(Binding::ArrowRight));
        assert!(!game.handle_key("q", true));
    }

    #[test]
    fn test_resize_moves_ground_and_camera() {
        let mut game = new_game();
        game.state.player.pos.x = 2000.0;
        game.resize(Viewport::new(1280.0, 720.0));
        assert_eq!(game.state().world.ground_y, 620.0);
        assert_eq!(game.state().player.pos.y, 562.0);
        assert_eq!(game.camera_x(), 2000.0 - 1280.0 * 0.45);
    }

    #[test]
    fn test_hud_text() {
        let mut game = new_game();
        game.state.player.money = 600;
        game.state.player.lights_on = 6;
        let hud = game.hud();
        assert_eq!(hud.money_text(), "$600");
        assert_eq!(hud.lights_text(), "Lights: 6/10");
        assert!((hud.progress() - 0.6).abs() < 1e-6);

        game.state.player.money = 1500;
        assert_eq!(game.hud().progress(), 1.0);
    }
}
