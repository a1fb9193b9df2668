//! Constant downward acceleration

use super::state::Player;
use crate::tuning::Tuning;

/// Gravity acting on the player's per-tick vertical velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    /// Added to vertical velocity per second of simulated time
    pub acceleration: f64,
    /// Falling speed cap, if any
    pub terminal_velocity: Option<f64>,
}

impl Gravity {
    pub fn new(acceleration: f64) -> Self {
        Self {
            acceleration,
            terminal_velocity: None,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            acceleration: tuning.gravity,
            terminal_velocity: tuning.terminal_velocity,
        }
    }

    /// Accelerate the player downward by `dt` seconds worth of gravity
    ///
    /// Only velocity changes; position picks it up on the next tick.
    pub fn apply(&self, player: &mut Player, dt: f64) {
        player.velocity.y += self.acceleration * dt;
        if let Some(cap) = self.terminal_velocity {
            player.velocity.y = player.velocity.y.min(cap);
        }
    }
}
