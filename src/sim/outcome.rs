//! Round outcomes and the overlay they ask the page to show

use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Where the round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// Normal play
    #[default]
    Playing,
    /// The van caught the player and took everything they carried
    Caught { taken: u32 },
    /// Reached the store with enough money
    ReachedGoal,
    /// Reached the store short of money; play continues behind the message
    StoreShort,
}

impl Outcome {
    /// Caught and ReachedGoal end the round until reset
    pub fn is_terminal(&self) -> bool {
        matches!(self, Outcome::Caught { .. } | Outcome::ReachedGoal)
    }

    /// The message this outcome puts on screen, if any
    pub fn overlay(&self, state: &GameState) -> Option<Overlay> {
        let money = state.player.money;
        match *self {
            Outcome::Playing => None,
            Outcome::Caught { taken } => Some(Overlay {
                title: "ATO got you!".to_string(),
                lines: vec![format!(
                    "You had ${taken}. The ATO took it all. Start again and beat the van."
                )],
                button: "Try again",
                action: OverlayAction::Restart,
            }),
            Outcome::ReachedGoal => Some(Overlay {
                title: "Nice work!".to_string(),
                lines: vec![
                    format!("You made it to JB Hi-Fi with ${money} and bought the laptop."),
                    format!("Lights switched on: {}.", state.player.lights_on),
                ],
                button: "Play again",
                action: OverlayAction::Restart,
            }),
            Outcome::StoreShort => Some(Overlay {
                title: "Almost there…".to_string(),
                lines: vec![
                    format!(
                        "You reached JB Hi-Fi with ${money}. You need ${} first!",
                        state.goal()
                    ),
                    "Turn on more street lights and come back.".to_string(),
                ],
                button: "Keep going",
                action: OverlayAction::Dismiss,
            }),
        }
    }
}

/// What the overlay button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    /// Start a fresh round
    Restart,
    /// Hide the message and keep playing
    Dismiss,
}

/// A "title, body, one button" message for the page overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: String,
    /// Body paragraphs
    pub lines: Vec<String>,
    pub button: &'static str,
    pub action: OverlayAction,
}
