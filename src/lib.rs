//! Polyrun - 2D platformer physics core
//!
//! Core modules:
//! - `geometry`: Points, polygons, rectangles and the convex-shape abstraction
//! - `sim`: Deterministic simulation (decomposition, collisions, gravity, tick)
//! - `tuning`: Data-driven physics constants

pub mod error;
pub mod geometry;
pub mod sim;
pub mod tuning;

pub use error::{Degeneracy, Error, Result};
pub use tuning::Tuning;

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the native host
    pub const SIM_DT: f64 = 0.016;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World boundary (pixels)
    pub const WORLD_WIDTH: f64 = 1024.0;
    pub const WORLD_HEIGHT: f64 = 640.0;

    /// Horizontal speed (pixels/s), folded into per-tick displacement
    pub const MOVE_SPEED: f64 = 300.0;
    /// Downward acceleration added to the per-tick vertical displacement each second
    pub const GRAVITY: f64 = 20.0;
    /// Initial upward displacement of a jump (pixels/tick)
    pub const JUMP_SPEED: f64 = 9.0;

    /// Player defaults
    pub const PLAYER_SIZE: f64 = 20.0;
    pub const SPAWN_X: f64 = 325.0;
    pub const SPAWN_Y: f64 = 25.0;

    /// Aggregate vertical correction below this is treated as float noise
    pub const COLLISION_EPSILON: f64 = 1e-8;
    /// SAT overlap at or below this counts as touching, not penetrating
    pub const SEPARATION_TOLERANCE: f64 = 1e-9;
    /// Cross products within this band are treated as collinear
    pub const GEOMETRY_TOLERANCE: f64 = 1e-9;
}

/// 2D cross product (z component of the 3D cross product)
#[inline]
pub fn cross(a: DVec2, b: DVec2) -> f64 {
    a.perp_dot(b)
}

/// Orientation of `c` relative to the directed line `a -> b`
#[inline]
pub fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    cross(b - a, c - a)
}
