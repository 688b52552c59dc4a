//! Fixed timestep simulation tick
//!
//! One call advances the round by one display frame. The order of the
//! phases below is part of the game rules.

use serde::{Deserialize, Serialize};

use super::input::TickInput;
use super::outcome::Outcome;
use super::state::{Facing, GameState};

/// Things that happened during a tick, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A lamp was plugged in
    LightOn { index: usize },
    /// The van started its chase
    VanDispatched,
    /// The van caught the player
    Caught { taken: u32 },
    /// Reached the store with enough money
    ReachedGoal { money: u32 },
    /// Reached the store without enough money
    ReachedStoreShort { money: u32 },
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Finished rounds wait for reset
    if state.outcome.is_terminal() {
        return events;
    }

    state.time_ticks += 1;
    decay_timers(state);

    // === Movement ===
    // Both directions may apply in one tick; right is applied last
    let player = &mut state.player;
    if input.left {
        player.pos.x -= player.speed;
        player.facing = Facing::Left;
    }
    if input.right {
        player.pos.x += player.speed;
        player.facing = Facing::Right;
    }
    player.pos.x = state.world.clamp_player_x(player.pos.x);

    // === Plugging in lamps ===
    if input.interact {
        plug_light(state, &mut events);
    }

    // === Van pursuit ===
    if state.van.active {
        state.van.pos.x += state.van.speed;

        if state.player.bounds().overlaps(&state.van.bounds()) {
            let taken = std::mem::take(&mut state.player.money);
            state.van.active = false;
            state.outcome = Outcome::Caught { taken };
            log::debug!("Van caught player at x={:.1}, took ${}", state.player.pos.x, taken);
            events.push(GameEvent::Caught { taken });
            return events;
        }
    }

    // === Store ===
    if state.at_store() {
        let money = state.player.money;
        if money >= state.goal() {
            state.outcome = Outcome::ReachedGoal;
            events.push(GameEvent::ReachedGoal { money });
        } else if state.outcome != Outcome::StoreShort {
            state.outcome = Outcome::StoreShort;
            events.push(GameEvent::ReachedStoreShort { money });
        }
    }

    events
}

/// Light the first unlit lamp in range and pay for it
fn plug_light(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let Some(index) = state.pluggable_light() else {
        return;
    };

    let light = &mut state.lights[index];
    light.on = true;
    light.cord_ticks = state.tuning.cord_ticks;

    let player = &mut state.player;
    player.money = player.money.saturating_add(state.tuning.reward);
    player.lights_on = player.lights_on.saturating_add(1);
    events.push(GameEvent::LightOn { index });
    log::debug!(
        "Lamp {} on, money ${}, lights {}",
        index,
        player.money,
        player.lights_on
    );

    // The first lamp of the round sends the van
    let van = &mut state.van;
    if player.lights_on == 1 && !van.active && !van.dispatched {
        van.active = true;
        van.dispatched = true;
        van.bubble_ticks = state.tuning.bubble_ticks;
        log::debug!("Van dispatched from x={:.1}", van.pos.x);
        events.push(GameEvent::VanDispatched);
    }
}

/// Count down cosmetic animation timers
fn decay_timers(state: &mut GameState) {
    for light in &mut state.lights {
        light.cord_ticks = light.cord_ticks.saturating_sub(1);
    }
    state.van.bubble_ticks = state.van.bubble_ticks.saturating_sub(1);
}
