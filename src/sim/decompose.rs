//! Convex decomposition of map obstacles
//!
//! Runs once per obstacle when a map is built. Repeatedly cuts a polygon along
//! a diagonal from its first reflex vertex until every piece is convex.

use std::cmp::Ordering;

use glam::DVec2;

use crate::consts::GEOMETRY_TOLERANCE;
use crate::error::Result;
use crate::geometry::{Polygon, point_on_segment, segments_intersect};
use crate::orient;

/// Splits simple polygons into convex pieces
#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonDecomposer;

impl PolygonDecomposer {
    pub fn new() -> Self {
        Self
    }

    /// Decompose `polygon` into convex pieces covering exactly its area
    ///
    /// Convex input comes back as a single piece. Degenerate or
    /// self-intersecting input is rejected with `Error::InvalidGeometry`.
    pub fn decompose(&self, polygon: &Polygon) -> Result<Vec<Polygon>> {
        let cleaned = polygon.validated()?;
        let winding = cleaned.signed_area().signum();

        if cleaned.is_convex() {
            return Ok(vec![cleaned]);
        }

        let mut pending = vec![cleaned.clone()];
        let mut pieces = Vec::new();

        while let Some(piece) = pending.pop() {
            let Some(reflex) = first_reflex(&piece, winding) else {
                pieces.push(piece);
                continue;
            };

            match best_diagonal(&piece, reflex, winding) {
                Some(target) => {
                    let (first, second) = split(&piece, reflex, target);
                    // Depth-first, first half processed next
                    pending.push(second);
                    pending.push(first);
                }
                None => {
                    log::warn!(
                        "No diagonal from reflex vertex {} of a {}-gon, keeping obstacle whole",
                        reflex,
                        piece.len()
                    );
                    return Ok(vec![cleaned]);
                }
            }
        }

        log::debug!(
            "Decomposed {}-gon into {} convex pieces",
            cleaned.len(),
            pieces.len()
        );
        Ok(pieces)
    }
}

/// Lowest-index vertex whose interior angle exceeds 180 degrees
fn first_reflex(piece: &Polygon, winding: f64) -> Option<usize> {
    (0..piece.len()).find(|&i| piece.turn(i, winding) < -GEOMETRY_TOLERANCE)
}

/// Pick the diagonal from `from` to cut along
///
/// Among valid diagonals: most balanced vertex split, then shortest, then
/// lowest target index.
fn best_diagonal(piece: &Polygon, from: usize, winding: f64) -> Option<usize> {
    let n = piece.len();
    let origin = piece.vertex(from);

    (2..n - 1)
        .map(|offset| (offset, (from + offset) % n))
        .filter(|&(_, to)| is_diagonal(piece, from, to, winding))
        .map(|(offset, to)| {
            // Each half keeps both diagonal endpoints
            let first_len = offset + 1;
            let second_len = n - offset + 1;
            let imbalance = first_len.abs_diff(second_len);
            (imbalance, origin.distance(piece.vertex(to)), to)
        })
        .min_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
                .then_with(|| a.2.cmp(&b.2))
        })
        .map(|(_, _, to)| to)
}

/// Whether segment `from-to` lies strictly inside the polygon
fn is_diagonal(piece: &Polygon, from: usize, to: usize, winding: f64) -> bool {
    if !in_cone(piece, from, to, winding) || !in_cone(piece, to, from, winding) {
        return false;
    }

    let a = piece.vertex(from);
    let b = piece.vertex(to);
    let n = piece.len();

    for k in 0..n {
        let next = (k + 1) % n;
        if k != from && k != to && point_on_segment(a, b, piece.vertex(k)) {
            return false;
        }
        if k == from || k == to || next == from || next == to {
            continue;
        }
        if segments_intersect(a, b, piece.vertex(k), piece.vertex(next)) {
            return false;
        }
    }
    true
}

/// Whether the direction from vertex `i` toward vertex `j` starts inside the polygon
fn in_cone(piece: &Polygon, i: usize, j: usize, winding: f64) -> bool {
    let n = piece.len();
    let v = piece.vertex(i);
    let prev = piece.vertex(i + n - 1);
    let next = piece.vertex(i + 1);
    let target = piece.vertex(j);

    let left = |a: DVec2, b: DVec2, c: DVec2| orient(a, b, c) * winding > GEOMETRY_TOLERANCE;
    let left_on = |a: DVec2, b: DVec2, c: DVec2| orient(a, b, c) * winding >= -GEOMETRY_TOLERANCE;

    if left_on(v, next, prev) {
        left(v, target, prev) && left(target, v, next)
    } else {
        !(left_on(v, target, next) && left_on(target, v, prev))
    }
}

/// Cut along `from-to`; both halves keep the original winding
fn split(piece: &Polygon, from: usize, to: usize) -> (Polygon, Polygon) {
    let n = piece.len();
    let walk = |start: usize, end: usize| {
        let mut ring = Vec::new();
        let mut i = start;
        loop {
            ring.push(piece.vertex(i));
            if i == end {
                break;
            }
            i = (i + 1) % n;
        }
        Polygon::new(ring)
    };
    (walk(from, to), walk(to, from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Degeneracy, Error};

    fn total_area(pieces: &[Polygon]) -> f64 {
        pieces.iter().map(Polygon::area).sum()
    }

    fn assert_covers(source: &Polygon, pieces: &[Polygon]) {
        assert!(
            (total_area(pieces) - source.area()).abs() < 1e-6 * source.area().max(1.0),
            "pieces cover {} but source has {}",
            total_area(pieces),
            source.area()
        );
        for piece in pieces {
            assert!(piece.is_convex(), "piece {:?} is not convex", piece);
        }
    }

    #[test]
    fn test_convex_input_is_identity() {
        let quad = Polygon::from_points(&[(0.0, 0.0), (40.0, 5.0), (35.0, 30.0), (-5.0, 20.0)]);
        let pieces = PolygonDecomposer.decompose(&quad).unwrap();
        assert_eq!(pieces, vec![quad]);
    }

    #[test]
    fn test_l_shape_balanced_split() {
        let l = Polygon::from_points(&[
            (0.0, 0.0),
            (20.0, 0.0),
            (20.0, 10.0),
            (10.0, 10.0),
            (10.0, 20.0),
            (0.0, 20.0),
        ]);
        let pieces = PolygonDecomposer.decompose(&l).unwrap();
        assert_eq!(pieces.len(), 2);
        // Diagonal (10,10)-(0,0) splits six vertices four and four
        assert!(pieces.iter().all(|p| p.len() == 4));
        assert_covers(&l, &pieces);
    }

    #[test]
    fn test_reversed_winding() {
        let mut points = vec![
            (0.0, 0.0),
            (20.0, 0.0),
            (20.0, 10.0),
            (10.0, 10.0),
            (10.0, 20.0),
            (0.0, 20.0),
        ];
        points.reverse();
        let l = Polygon::from_points(&points);
        let pieces = PolygonDecomposer.decompose(&l).unwrap();
        assert_covers(&l, &pieces);
        for piece in &pieces {
            assert_eq!(piece.signed_area().signum(), l.signed_area().signum());
        }
    }

    #[test]
    fn test_u_shape() {
        // Platform with a pit in the middle
        let u = Polygon::from_points(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 30.0),
            (30.0, 30.0),
            (30.0, 0.0),
            (40.0, 0.0),
            (40.0, 40.0),
            (0.0, 40.0),
        ]);
        let pieces = PolygonDecomposer.decompose(&u).unwrap();
        assert!(pieces.len() >= 3);
        assert_covers(&u, &pieces);
    }

    #[test]
    fn test_comb() {
        let comb = Polygon::from_points(&[
            (0.0, 0.0),
            (5.0, 0.0),
            (5.0, 20.0),
            (10.0, 20.0),
            (10.0, 0.0),
            (15.0, 0.0),
            (15.0, 20.0),
            (20.0, 20.0),
            (20.0, 0.0),
            (25.0, 0.0),
            (25.0, 30.0),
            (0.0, 30.0),
        ]);
        let pieces = PolygonDecomposer.decompose(&comb).unwrap();
        assert_covers(&comb, &pieces);
    }

    #[test]
    fn test_sloped_concave_obstacle() {
        let ramp = Polygon::from_points(&[
            (100.0, 500.0),
            (300.0, 420.0),
            (420.0, 470.0),
            (560.0, 380.0),
            (600.0, 560.0),
            (90.0, 560.0),
        ]);
        let pieces = PolygonDecomposer.decompose(&ramp).unwrap();
        assert!(pieces.len() >= 2);
        assert_covers(&ramp, &pieces);
    }

    #[test]
    fn test_deterministic() {
        let u = Polygon::from_points(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 30.0),
            (30.0, 30.0),
            (30.0, 0.0),
            (40.0, 0.0),
            (40.0, 40.0),
            (0.0, 40.0),
        ]);
        let first = PolygonDecomposer.decompose(&u).unwrap();
        let second = PolygonDecomposer.decompose(&u).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_degenerate_input_rejected() {
        let line = Polygon::from_points(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        assert!(matches!(
            PolygonDecomposer.decompose(&line),
            Err(Error::InvalidGeometry(Degeneracy::ZeroArea))
        ));

        let pair = Polygon::from_points(&[(0.0, 0.0), (10.0, 0.0)]);
        assert!(matches!(
            PolygonDecomposer.decompose(&pair),
            Err(Error::InvalidGeometry(Degeneracy::TooFewVertices { count: 2 }))
        ));

        let bowtie = Polygon::from_points(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 20.0)]);
        assert!(matches!(
            PolygonDecomposer.decompose(&bowtie),
            Err(Error::InvalidGeometry(Degeneracy::SelfIntersecting { .. }))
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use std::f64::consts::TAU;

        /// Star-shaped rings around the origin are always simple
        fn star_polygon(spokes: &[(f64, f64)]) -> Polygon {
            let n = spokes.len() as f64;
            Polygon::new(
                spokes
                    .iter()
                    .enumerate()
                    .map(|(k, &(jitter, radius))| {
                        let angle = (k as f64 + jitter * 0.6) * TAU / n;
                        DVec2::new(angle.cos(), angle.sin()) * radius
                    })
                    .collect(),
            )
        }

        proptest! {
            #[test]
            fn pieces_cover_source_and_are_convex(
                spokes in proptest::collection::vec((0.0f64..1.0, 20.0f64..100.0), 3..12)
            ) {
                let polygon = star_polygon(&spokes);
                let pieces = PolygonDecomposer.decompose(&polygon).unwrap();

                let covered: f64 = pieces.iter().map(Polygon::area).sum();
                prop_assert!((covered - polygon.area()).abs() < 1e-6 * polygon.area());
                for piece in &pieces {
                    prop_assert!(piece.is_convex());
                }
            }

            #[test]
            fn convex_input_passes_through(
                radii in proptest::collection::vec(30.0f64..30.5, 3..10)
            ) {
                // Near-circular rings with spread-out spokes stay convex
                let spokes: Vec<_> = radii.iter().map(|&r| (0.0, r)).collect();
                let polygon = star_polygon(&spokes);
                prop_assume!(polygon.is_convex());
                let pieces = PolygonDecomposer.decompose(&polygon).unwrap();
                prop_assert_eq!(pieces, vec![polygon]);
            }
        }
    }
}
