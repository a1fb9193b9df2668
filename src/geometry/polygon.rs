//! Polygons
//!
//! `Polygon` is map data: any simple polygon, convex or concave, edges in
//! insertion order. `ConvexPolygon` is a decomposed piece with its SAT data
//! precomputed so the per-frame test never allocates.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::{Convex, Rect, segments_intersect};
use crate::consts::GEOMETRY_TOLERANCE;
use crate::error::Degeneracy;
use crate::orient;

/// An ordered ring of vertices; edge `i` joins vertex `i` to `i + 1 mod n`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<DVec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<DVec2>) -> Self {
        Self { vertices }
    }

    /// Build from `(x, y)` pairs
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        Self::new(points.iter().map(|&(x, y)| DVec2::new(x, y)).collect())
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex at `i`, wrapping around the ring
    #[inline]
    pub fn vertex(&self, i: usize) -> DVec2 {
        self.vertices[i % self.vertices.len()]
    }

    /// Edges as `(start, end)` pairs, closing edge included
    pub fn edges(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Shoelace area; the sign gives the winding
    pub fn signed_area(&self) -> f64 {
        self.edges().map(|(a, b)| a.perp_dot(b)).sum::<f64>() * 0.5
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn bounds(&self) -> Rect {
        Rect::enclosing(&self.vertices)
    }

    /// Turn direction at vertex `i`, scaled so positive means convex for this winding
    pub(crate) fn turn(&self, i: usize, winding: f64) -> f64 {
        let n = self.vertices.len();
        let prev = self.vertices[(i + n - 1) % n];
        let next = self.vertices[(i + 1) % n];
        orient(prev, self.vertices[i], next) * winding
    }

    /// True when no interior angle exceeds 180 degrees
    pub fn is_convex(&self) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }
        let winding = self.signed_area().signum();
        if winding == 0.0 {
            return false;
        }
        (0..self.vertices.len()).all(|i| self.turn(i, winding) >= -GEOMETRY_TOLERANCE)
    }

    /// Copy with consecutive duplicate vertices removed, including a closing repeat
    pub fn without_duplicates(&self) -> Self {
        let mut vertices: Vec<DVec2> = Vec::with_capacity(self.vertices.len());
        for &v in &self.vertices {
            if vertices.last().is_none_or(|last| last.distance(v) > GEOMETRY_TOLERANCE) {
                vertices.push(v);
            }
        }
        while vertices.len() > 1
            && vertices[0].distance(vertices[vertices.len() - 1]) <= GEOMETRY_TOLERANCE
        {
            vertices.pop();
        }
        Self { vertices }
    }

    /// First pair of non-adjacent edges that touch or cross
    pub fn self_intersection(&self) -> Option<(usize, usize)> {
        let n = self.vertices.len();
        for i in 0..n {
            let (a, b) = (self.vertices[i], self.vertices[(i + 1) % n]);
            for j in (i + 2)..n {
                // Edge n-1 and edge 0 share vertex 0
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (c, d) = (self.vertices[j], self.vertices[(j + 1) % n]);
                if segments_intersect(a, b, c, d) {
                    return Some((i, j));
                }
            }
        }
        None
    }

    /// Normalize duplicates and reject rings that cannot bound an area
    pub fn validated(&self) -> Result<Self, Degeneracy> {
        let cleaned = self.without_duplicates();
        if cleaned.len() < 3 {
            return Err(Degeneracy::TooFewVertices { count: cleaned.len() });
        }
        if cleaned.area() <= GEOMETRY_TOLERANCE {
            return Err(Degeneracy::ZeroArea);
        }
        if let Some((first, second)) = cleaned.self_intersection() {
            return Err(Degeneracy::SelfIntersecting { first, second });
        }
        Ok(cleaned)
    }
}

/// A convex obstacle piece ready for the separating-axis test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvexPolygon {
    polygon: Polygon,
    /// One unit normal per distinct edge direction
    normals: Vec<DVec2>,
    bounds: Rect,
}

impl ConvexPolygon {
    /// Precompute SAT data for a piece
    ///
    /// The piece is trusted to be convex; the decomposer is the only producer.
    pub fn new(polygon: Polygon) -> Self {
        let mut normals: Vec<DVec2> = Vec::with_capacity(polygon.len());
        for (a, b) in polygon.edges() {
            let Some(edge) = (b - a).try_normalize() else {
                continue;
            };
            let normal = edge.perp();
            // Parallel edges give the same axis
            if normals.iter().all(|n| n.perp_dot(normal).abs() > GEOMETRY_TOLERANCE) {
                normals.push(normal);
            }
        }

        Self {
            bounds: polygon.bounds(),
            normals,
            polygon,
        }
    }

    #[inline]
    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }
}

impl Convex for ConvexPolygon {
    fn axes(&self) -> &[DVec2] {
        &self.normals
    }

    fn project(&self, axis: DVec2) -> (f64, f64) {
        self.polygon
            .vertices()
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
                let p = axis.dot(*v);
                (min.min(p), max.max(p))
            })
    }
}
