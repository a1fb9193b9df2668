//! Error types
//!
//! Geometry errors surface at map-load time. The per-tick path has no error type.

use thiserror::Error;

/// Why a polygon was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Degeneracy {
    #[error("polygon has {count} distinct vertices, need at least 3")]
    TooFewVertices { count: usize },

    #[error("polygon has zero area")]
    ZeroArea,

    #[error("edges {first} and {second} intersect")]
    SelfIntersecting { first: usize, second: usize },
}

/// Crate errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] Degeneracy),

    #[error("invalid tuning: {0}")]
    InvalidTuning(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
