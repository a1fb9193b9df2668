//! Simulation state
//!
//! The player and the per-session state the tick loop mutates.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::CollisionVector;
use super::gravity::Gravity;
use super::handler::{CollisionFlags, CollisionHandler};
use super::map::{Map, demo_outlines};
use crate::error::Result;
use crate::geometry::Rect;
use crate::tuning::Tuning;

/// Ticks each run-cycle frame is held
pub const RUN_FRAME_TICKS: u32 = 6;
/// Frames in the run cycle
pub const RUN_FRAMES: u32 = 8;

/// Which way the player faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

/// Animation state derived from motion and ground contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovementState {
    #[default]
    Idle,
    Running,
    /// Airborne and rising
    Jumping,
    /// Airborne and falling
    Falling,
}

/// The player actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub position: DVec2,
    /// Displacement per tick
    pub velocity: DVec2,
    pub size: DVec2,
    pub direction: Direction,
    pub movement_state: MovementState,
    pub animation_frame: u32,
    /// Ticks spent on the current animation frame
    #[serde(skip)]
    animation_ticks: u32,
}

impl Player {
    /// Square player at rest with its top-left corner at `(x, y)`
    pub fn new(x: f64, y: f64, size: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            velocity: DVec2::ZERO,
            size: DVec2::splat(size),
            direction: Direction::default(),
            movement_state: MovementState::default(),
            animation_frame: 0,
            animation_ticks: 0,
        }
    }

    /// Collision rectangle
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        self.position + self.size * 0.5
    }

    /// Refresh facing, movement state and animation after a tick
    pub fn update(&mut self, grounded: bool) {
        if self.velocity.x < 0.0 {
            self.direction = Direction::Left;
        } else if self.velocity.x > 0.0 {
            self.direction = Direction::Right;
        }

        let next = if !grounded {
            if self.velocity.y < 0.0 {
                MovementState::Jumping
            } else {
                MovementState::Falling
            }
        } else if self.velocity.x != 0.0 {
            MovementState::Running
        } else {
            MovementState::Idle
        };

        if next != self.movement_state {
            self.movement_state = next;
            self.animation_frame = 0;
            self.animation_ticks = 0;
        } else if next == MovementState::Running {
            self.animation_ticks += 1;
            if self.animation_ticks >= RUN_FRAME_TICKS {
                self.animation_ticks = 0;
                self.animation_frame = (self.animation_frame + 1) % RUN_FRAMES;
            }
        }
    }
}

/// Everything the tick loop owns for one play session
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Static obstacles (read-only during play)
    pub map: Map,
    pub player: Player,
    /// Standing on something after the last tick
    pub grounded: bool,
    /// Collision flags from the last tick
    pub last_flags: CollisionFlags,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) gravity: Gravity,
    pub(crate) handler: CollisionHandler,
}

impl GameState {
    /// Start a session on `map` with the player at the tuned spawn point
    pub fn new(tuning: Tuning, map: Map) -> Self {
        let player = Player::new(tuning.spawn_x, tuning.spawn_y, tuning.player_size);
        Self {
            gravity: Gravity::from_tuning(&tuning),
            handler: CollisionHandler::new(tuning.collision_epsilon),
            tuning,
            map,
            player,
            grounded: false,
            last_flags: CollisionFlags::default(),
            time_ticks: 0,
        }
    }

    /// Session on the built-in demo map
    pub fn with_demo_map(tuning: Tuning) -> Result<Self> {
        let map = Map::build(
            tuning.world_width,
            tuning.world_height,
            &demo_outlines(),
            tuning.map_seed,
        )?;
        Ok(Self::new(tuning, map))
    }

    /// Corrections found during the last tick
    pub fn collision_vectors(&self) -> &[CollisionVector] {
        self.handler.vectors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_bounds() {
        let player = Player::new(325.0, 25.0, 20.0);
        assert_eq!(player.bounds(), Rect::new(325.0, 25.0, 20.0, 20.0));
        assert_eq!(player.center(), DVec2::new(335.0, 35.0));
    }

    #[test]
    fn test_facing_follows_velocity() {
        let mut player = Player::new(0.0, 0.0, 20.0);
        player.velocity.x = -4.8;
        player.update(true);
        assert_eq!(player.direction, Direction::Left);

        // Stopping keeps the last facing
        player.velocity.x = 0.0;
        player.update(true);
        assert_eq!(player.direction, Direction::Left);
        assert_eq!(player.movement_state, MovementState::Idle);
    }

    #[test]
    fn test_airborne_states() {
        let mut player = Player::new(0.0, 0.0, 20.0);
        player.velocity.y = -3.0;
        player.update(false);
        assert_eq!(player.movement_state, MovementState::Jumping);
        player.velocity.y = 2.0;
        player.update(false);
        assert_eq!(player.movement_state, MovementState::Falling);
    }

    #[test]
    fn test_run_cycle_advances_and_wraps() {
        let mut player = Player::new(0.0, 0.0, 20.0);
        player.velocity.x = 4.8;
        player.update(true);
        assert_eq!(player.movement_state, MovementState::Running);
        assert_eq!(player.animation_frame, 0);

        for _ in 0..RUN_FRAME_TICKS {
            player.update(true);
        }
        assert_eq!(player.animation_frame, 1);

        for _ in 0..RUN_FRAME_TICKS * (RUN_FRAMES - 1) {
            player.update(true);
        }
        assert_eq!(player.animation_frame, 0);
    }

    #[test]
    fn test_new_state_spawns_at_tuned_point() {
        let state = GameState::with_demo_map(Tuning::default()).unwrap();
        assert_eq!(state.player.position, DVec2::new(325.0, 25.0));
        assert_eq!(state.player.size, DVec2::splat(20.0));
        assert!(state.collision_vectors().is_empty());
    }
}
