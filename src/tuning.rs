//! Physics tuning
//!
//! Data-driven constants for the simulation. Missing fields in a JSON
//! document fall back to the defaults in `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

/// Tunable physics constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Motion ===
    /// Horizontal speed (pixels/s)
    pub move_speed: f64,
    /// Downward acceleration added to vertical velocity each second
    pub gravity: f64,
    /// Upward velocity given by a jump (pixels/tick)
    pub jump_speed: f64,
    /// Optional cap on falling velocity (pixels/tick); `None` = uncapped
    pub terminal_velocity: Option<f64>,

    // === World ===
    pub world_width: f64,
    pub world_height: f64,
    /// Seed for per-piece obstacle colours
    pub map_seed: u64,

    // === Player ===
    pub player_size: f64,
    pub spawn_x: f64,
    pub spawn_y: f64,

    // === Collision ===
    /// Vertical correction below this is float noise, not a landing
    pub collision_epsilon: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            terminal_velocity: None,

            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            map_seed: 0,

            player_size: PLAYER_SIZE,
            spawn_x: SPAWN_X,
            spawn_y: SPAWN_Y,

            collision_epsilon: COLLISION_EPSILON,
        }
    }
}

impl Tuning {
    /// Parse from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        log::info!(
            "Loaded tuning: gravity={}, move_speed={}, world={}x{}",
            tuning.gravity,
            tuning.move_speed,
            tuning.world_width,
            tuning.world_height
        );
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
