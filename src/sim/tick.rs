//! Simulation tick
//!
//! One call advances the session by `dt` seconds:
//! input -> velocity -> tentative move -> clamp + collisions -> gravity -> animation.

use serde::{Deserialize, Serialize};

use super::handler::CollisionFlags;
use super::state::{GameState, Player};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    /// Jump (only honoured while grounded)
    pub jump: bool,
}

impl KeyState {
    /// Horizontal direction: -1, 0 or 1. Opposed keys cancel.
    pub fn horizontal(&self) -> f64 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &KeyState, dt: f64) -> CollisionFlags {
    state.time_ticks += 1;

    apply_input(&mut state.player, input, state.tuning.move_speed, dt);
    if input.jump && state.grounded {
        state.player.velocity.y = -state.tuning.jump_speed;
    }

    let velocity = state.player.velocity;
    state.player.position += velocity;

    let flags = state.handler.handle(&mut state.player, &state.map);

    state.gravity.apply(&mut state.player, dt);
    if flags.any() {
        state.player.velocity.y = 0.0;
    }

    state.grounded = state.handler.is_grounded(&state.player, &state.map);
    state.player.update(state.grounded);
    state.last_flags = flags;
    flags
}

/// Replace horizontal velocity with the input-driven displacement for this tick
pub fn apply_input(player: &mut Player, input: &KeyState, move_speed: f64, dt: f64) {
    player.velocity.x = input.horizontal() * move_speed * dt;
}
