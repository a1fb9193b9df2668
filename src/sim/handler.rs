//! Per-tick collision handling
//!
//! Clamps the player to the world, applies the summed obstacle corrections
//! once (pieces of one obstacle merged first), and reports whether the player landed or hit its head.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionDetector, CollisionVector, object_displacement};
use super::map::Map;
use super::state::Player;

/// How far below the feet the ground probe looks (pixels)
pub const GROUND_PROBE: f64 = 0.5;

/// Vertical contacts found in one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollisionFlags {
    /// Landed on the floor boundary or on top of an obstacle
    pub bottom: bool,
    /// Hit the ceiling boundary or the underside of an obstacle
    pub top: bool,
}

impl CollisionFlags {
    /// Either flag set: vertical velocity must be zeroed
    #[inline]
    pub fn any(&self) -> bool {
        self.bottom || self.top
    }
}

/// Drives the detector and folds its output into the player's position
#[derive(Debug, Clone)]
pub struct CollisionHandler {
    detector: CollisionDetector,
    /// Vertical correction below this is float noise
    epsilon: f64,
    /// Reused every tick
    vectors: Vec<CollisionVector>,
    /// Per-obstacle scratch buffer
    scratch: Vec<CollisionVector>,
}

impl CollisionHandler {
    pub fn new(epsilon: f64) -> Self {
        Self {
            detector: CollisionDetector::new(),
            epsilon,
            vectors: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Corrections found by the last `handle` call
    pub fn vectors(&self) -> &[CollisionVector] {
        &self.vectors
    }

    /// Resolve the player's tentative position for this tick
    ///
    /// Expects velocity to be applied already. Horizontal clamps zero
    /// horizontal velocity; vertical clamps zero vertical velocity and flag.
    pub fn handle(&mut self, player: &mut Player, map: &Map) -> CollisionFlags {
        let mut flags = CollisionFlags::default();
        let world = map.bounds();

        if player.position.y > world.bottom() - player.size.y {
            player.position.y = world.bottom() - player.size.y;
            player.velocity.y = 0.0;
            flags.bottom = true;
        } else if player.position.y < world.y {
            player.position.y = world.y;
            player.velocity.y = 0.0;
            flags.top = true;
        }

        if player.position.x > world.right() - player.size.x {
            player.position.x = world.right() - player.size.x;
            player.velocity.x = 0.0;
        } else if player.position.x < world.x {
            player.position.x = world.x;
            player.velocity.x = 0.0;
        }

        let bounds = player.bounds();
        let mut correction = DVec2::ZERO;
        self.vectors.clear();
        for object in &map.objects {
            self.detector
                .detect_into(&bounds, std::slice::from_ref(object), &mut self.scratch);
            correction += object_displacement(&self.scratch);
            self.vectors.extend_from_slice(&self.scratch);
        }
        player.position += correction;

        // Only a correction opposing the motion counts as a contact
        if correction.y < -self.epsilon && player.velocity.y > 0.0 {
            flags.bottom = true;
        } else if correction.y > self.epsilon && player.velocity.y < 0.0 {
            flags.top = true;
        }

        if !self.vectors.is_empty() {
            log::trace!(
                "{} corrections, net ({:.3}, {:.3}), flags {:?}",
                self.vectors.len(),
                correction.x,
                correction.y,
                flags
            );
        }

        flags
    }

    /// Whether the player is standing on the floor or an obstacle
    ///
    /// Probes a sliver below the feet, so resting contact (zero overlap)
    /// still counts as grounded.
    pub fn is_grounded(&self, player: &Player, map: &Map) -> bool {
        if player.position.y + player.size.y >= map.bounds().bottom() {
            return true;
        }
        let mut probe = player.bounds();
        probe.y += GROUND_PROBE;
        self.detector
            .detect(&probe, &map.objects)
            .iter()
            .any(|v| v.direction.dot(DVec2::NEG_Y) > 0.5)
    }
}
