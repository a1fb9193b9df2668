//! Collision detection against decomposed map geometry
//!
//! The player's rectangle is tested against every convex obstacle piece with
//! the separating-axis test. Each overlapping piece yields one correction:
//! the axis of least penetration, pointing from the piece toward the player.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::map::MapObject;
use crate::consts::SEPARATION_TOLERANCE;
use crate::geometry::{Convex, Rect};

/// One minimum-translation correction against one obstacle piece
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionVector {
    /// Unit axis of resolution, pointing away from the obstacle
    pub direction: DVec2,
    /// Penetration depth along `direction` (always positive)
    pub magnitude: f64,
}

impl CollisionVector {
    /// Displacement that resolves this overlap on its own
    #[inline]
    pub fn displacement(&self) -> DVec2 {
        self.direction * self.magnitude
    }
}

/// Net correction for the pieces of a single obstacle
///
/// Pieces sharing a seam report the same push along the same axis. Parallel
/// vectors collapse to the deepest one (earliest on ties); the rest are summed.
pub fn object_displacement(vectors: &[CollisionVector]) -> DVec2 {
    vectors
        .iter()
        .enumerate()
        .filter(|&(i, v)| {
            !vectors.iter().enumerate().any(|(j, other)| {
                j != i
                    && other.direction.dot(v.direction) > 1.0 - SEPARATION_TOLERANCE
                    && (other.magnitude > v.magnitude || (other.magnitude == v.magnitude && j < i))
            })
        })
        .map(|(_, v)| v.displacement())
        .sum()
}

/// Finds where the player overlaps map obstacles
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionDetector;

impl CollisionDetector {
    pub fn new() -> Self {
        Self
    }

    /// Corrections for `actor` against every obstacle piece, in obstacle order
    pub fn detect(&self, actor: &Rect, objects: &[MapObject]) -> Vec<CollisionVector> {
        let mut vectors = Vec::new();
        self.detect_into(actor, objects, &mut vectors);
        vectors
    }

    /// Same as `detect`, reusing the caller's buffer
    pub fn detect_into(&self, actor: &Rect, objects: &[MapObject], out: &mut Vec<CollisionVector>) {
        out.clear();
        for object in objects {
            for piece in object.pieces() {
                if !actor.intersects(piece.bounds()) {
                    continue;
                }
                if let Some(vector) = minimum_translation(actor, piece) {
                    out.push(vector);
                }
            }
        }
    }
}

/// Separating-axis test between two convex shapes
///
/// Returns `None` as soon as an axis separates them. Shapes that only touch
/// are treated as separated. On ties between axes the earliest wins, so the
/// first shape's axes take precedence.
pub fn minimum_translation<A: Convex, B: Convex>(mover: &A, obstacle: &B) -> Option<CollisionVector> {
    let mut best: Option<(f64, DVec2)> = None;

    for &axis in mover.axes().iter().chain(obstacle.axes()) {
        let (a_min, a_max) = mover.project(axis);
        let (b_min, b_max) = obstacle.project(axis);

        let overlap = a_max.min(b_max) - a_min.max(b_min);
        if overlap <= SEPARATION_TOLERANCE {
            return None;
        }

        let depth = overlap + containment_depth(a_min, a_max, b_min, b_max);
        if best.is_none_or(|(least, _)| depth < least) {
            // Orient by interval midpoints so the push exits through the nearer side
            let direction = if (a_min + a_max) < (b_min + b_max) { -axis } else { axis };
            best = Some((depth, direction));
        }
    }

    best.map(|(magnitude, direction)| CollisionVector {
        direction,
        magnitude,
    })
}

/// Extra distance needed when one projection contains the other
fn containment_depth(a_min: f64, a_max: f64, b_min: f64, b_max: f64) -> f64 {
    let a_in_b = a_min >= b_min && a_max <= b_max;
    let b_in_a = b_min >= a_min && b_max <= a_max;
    if a_in_b || b_in_a {
        (a_min - b_min).abs().min((a_max - b_max).abs())
    } else {
        0.0
    }
}
