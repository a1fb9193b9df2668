//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Map geometry is decomposed once and never mutated
//! - Stable iteration order (obstacle order, then piece order)
//! - No rendering, input-device or network dependencies

pub mod collision;
pub mod decompose;
pub mod gravity;
pub mod handler;
pub mod map;
pub mod state;
pub mod tick;

pub use collision::{CollisionDetector, CollisionVector, minimum_translation, object_displacement};
pub use decompose::PolygonDecomposer;
pub use gravity::Gravity;
pub use handler::{CollisionFlags, CollisionHandler};
pub use map::{Map, MapObject, demo_outlines};
pub use state::{Direction, GameState, MovementState, Player};
pub use tick::{KeyState, apply_input, tick};
