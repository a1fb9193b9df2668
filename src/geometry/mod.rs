//! Geometry primitives
//!
//! Coordinates are `glam::DVec2` in screen space: x grows right, y grows down.

pub mod polygon;
pub mod rect;

pub use polygon::{ConvexPolygon, Polygon};
pub use rect::Rect;

use glam::DVec2;

use crate::consts::GEOMETRY_TOLERANCE;
use crate::orient;

/// A shape the separating-axis test can work with
///
/// Implementors must be convex. `axes` returns unit normals, one per distinct
/// edge direction the shape contributes.
pub trait Convex {
    /// Candidate separating axes (unit length)
    fn axes(&self) -> &[DVec2];

    /// Projection of the shape onto `axis` as `(min, max)`
    fn project(&self, axis: DVec2) -> (f64, f64);
}

/// Whether segments `a-b` and `c-d` share at least one point
///
/// Touching endpoints and collinear overlap both count as intersecting.
pub fn segments_intersect(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> bool {
    let d1 = orient(c, d, a);
    let d2 = orient(c, d, b);
    let d3 = orient(a, b, c);
    let d4 = orient(a, b, d);

    let straddles = |p: f64, q: f64| {
        (p > GEOMETRY_TOLERANCE && q < -GEOMETRY_TOLERANCE)
            || (p < -GEOMETRY_TOLERANCE && q > GEOMETRY_TOLERANCE)
    };
    if straddles(d1, d2) && straddles(d3, d4) {
        return true;
    }

    (d1.abs() <= GEOMETRY_TOLERANCE && on_segment(c, d, a))
        || (d2.abs() <= GEOMETRY_TOLERANCE && on_segment(c, d, b))
        || (d3.abs() <= GEOMETRY_TOLERANCE && on_segment(a, b, c))
        || (d4.abs() <= GEOMETRY_TOLERANCE && on_segment(a, b, d))
}

/// Whether `p` lies on segment `a-b`
pub fn point_on_segment(a: DVec2, b: DVec2, p: DVec2) -> bool {
    orient(a, b, p).abs() <= GEOMETRY_TOLERANCE && on_segment(a, b, p)
}

/// For a point known to be collinear with `a-b`, whether it lies within the segment
fn on_segment(a: DVec2, b: DVec2, p: DVec2) -> bool {
    p.x >= a.x.min(b.x) - GEOMETRY_TOLERANCE
        && p.x <= a.x.max(b.x) + GEOMETRY_TOLERANCE
        && p.y >= a.y.min(b.y) - GEOMETRY_TOLERANCE
        && p.y <= a.y.max(b.y) + GEOMETRY_TOLERANCE
}
