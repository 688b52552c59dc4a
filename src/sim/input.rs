//! Player intents and the physical inputs that assert them
//!
//! Each key or on-screen button is its own `Binding`. An intent is held
//! while any of its bindings is held, so letting go of the touch button does
//! not cancel a keyboard key that is still down.

use serde::{Deserialize, Serialize};

/// What the player wants to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    /// Plug in a nearby lamp
    Interact,
}

/// A physical input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Binding {
    ArrowLeft,
    KeyA,
    ArrowRight,
    KeyD,
    KeyE,
    TouchLeft,
    TouchRight,
    TouchPlug,
}

impl Binding {
    pub const ALL: [Binding; 8] = [
        Binding::ArrowLeft,
        Binding::KeyA,
        Binding::ArrowRight,
        Binding::KeyD,
        Binding::KeyE,
        Binding::TouchLeft,
        Binding::TouchRight,
        Binding::TouchPlug,
    ];

    pub fn intent(self) -> Intent {
        match self {
            Binding::ArrowLeft | Binding::KeyA | Binding::TouchLeft => Intent::MoveLeft,
            Binding::ArrowRight | Binding::KeyD | Binding::TouchRight => Intent::MoveRight,
            Binding::KeyE | Binding::TouchPlug => Intent::Interact,
        }
    }

    #[inline]
    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// A decoded keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Press/release a held binding
    Hold(Binding),
    /// Restart the round (fires on key down only)
    Reset,
}

/// Map a `KeyboardEvent.key` value to a command
pub fn map_key(key: &str) -> Option<KeyCommand> {
    let binding = match key {
        "ArrowLeft" => Binding::ArrowLeft,
        "a" | "A" => Binding::KeyA,
        "ArrowRight" => Binding::ArrowRight,
        "d" | "D" => Binding::KeyD,
        "e" | "E" => Binding::KeyE,
        "r" | "R" => return Some(KeyCommand::Reset),
        _ => return None,
    };
    Some(KeyCommand::Hold(binding))
}

/// The bindings currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: u16,
}

impl InputSnapshot {
    pub fn press(&mut self, binding: Binding) {
        self.held |= binding.bit();
    }

    pub fn release(&mut self, binding: Binding) {
        self.held &= !binding.bit();
    }

    /// Drop every held binding (reset, focus loss)
    pub fn release_all(&mut self) {
        self.held = 0;
    }

    pub fn is_pressed(&self, binding: Binding) -> bool {
        self.held & binding.bit() != 0
    }

    /// True while any binding for `intent` is held
    pub fn holds(&self, intent: Intent) -> bool {
        Binding::ALL
            .iter()
            .any(|b| b.intent() == intent && self.is_pressed(*b))
    }
}

/// Turns a held interact intent into a single "plug" action
///
/// A fresh press arms the trigger, releasing disarms it and a successful
/// plug consumes it. Holding the key while walking therefore still plugs
/// the next lamp reached, but only that one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractTrigger {
    was_held: bool,
    armed: bool,
}

impl InteractTrigger {
    /// Feed this tick's held state; returns whether a plug may fire
    pub fn update(&mut self, held: bool) -> bool {
        if held && !self.was_held {
            self.armed = true;
        } else if !held {
            self.armed = false;
        }
        self.was_held = held;
        self.armed
    }

    /// A lamp was plugged in; wait for the next press
    pub fn consume(&mut self) {
        self.armed = false;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Plug in the first lamp in range (already edge-filtered)
    pub interact: bool,
}

impl TickInput {
    /// Sample the snapshot, passing interact through the trigger
    pub fn sample(snapshot: &InputSnapshot, trigger: &mut InteractTrigger) -> Self {
        Self {
            left: snapshot.holds(Intent::MoveLeft),
            right: snapshot.holds(Intent::MoveRight),
            interact: trigger.update(snapshot.holds(Intent::Interact)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_table() {
        assert_eq!(map_key("ArrowLeft"), Some(KeyCommand::Hold(Binding::ArrowLeft)));
        assert_eq!(map_key("A"), Some(KeyCommand::Hold(Binding::KeyA)));
        assert_eq!(map_key("d"), Some(KeyCommand::Hold(Binding::KeyD)));
        assert_eq!(map_key("E"), Some(KeyCommand::Hold(Binding::KeyE)));
        assert_eq!(map_key("r"), Some(KeyCommand::Reset));
        assert_eq!(map_key("R"), Some(KeyCommand::Reset));
        assert_eq!(map_key("x"), None);
        assert_eq!(map_key(" "), None);
    }

    #[test]
    fn test_intent_is_or_of_sources() {
        let mut input = InputSnapshot::default();
        input.press(Binding::KeyA);
        input.press(Binding::TouchLeft);
        assert!(input.holds(Intent::MoveLeft));

        // Releasing one source leaves the other asserting
        input.release(Binding::TouchLeft);
        assert!(input.holds(Intent::MoveLeft));

        input.release(Binding::KeyA);
        assert!(!input.holds(Intent::MoveLeft));
    }

    #[test]
    fn test_intents_are_independent() {
        let mut input = InputSnapshot::default();
        input.press(Binding::ArrowRight);
        input.press(Binding::KeyE);
        assert!(input.holds(Intent::MoveRight));
        assert!(input.holds(Intent::Interact));
        assert!(!input.holds(Intent::MoveLeft));

        input.release_all();
        assert_eq!(input, InputSnapshot::default());
    }

    #[test]
    fn test_trigger_fires_once_per_press() {
        let mut trigger = InteractTrigger::default();
        assert!(trigger.update(true));
        trigger.consume();
        assert!(!trigger.update(true));
        assert!(!trigger.update(true));

        // Release and press again
        assert!(!trigger.update(false));
        assert!(trigger.update(true));
    }

    #[test]
    fn test_trigger_stays_armed_until_consumed() {
        let mut trigger = InteractTrigger::default();
        assert!(trigger.update(true));
        // Nothing in range yet: still armed while held
        assert!(trigger.update(true));
        assert!(trigger.update(true));
        trigger.consume();
        assert!(!trigger.update(true));
    }

    #[test]
    fn test_release_disarms() {
        let mut trigger = InteractTrigger::default();
        assert!(trigger.update(true));
        assert!(!trigger.update(false));
        assert!(!trigger.update(false));
    }

    #[test]
    fn test_sample() {
        let mut input = InputSnapshot::default();
        let mut trigger = InteractTrigger::default();
        input.press(Binding::ArrowLeft);
        input.press(Binding::TouchRight);
        input.press(Binding::TouchPlug);

        let tick = TickInput::sample(&input, &mut trigger);
        assert_eq!(
            tick,
            TickInput {
                left: true,
                right: true,
                interact: true
            }
        );
    }
}
