//! Axis-aligned rectangles
//!
//! The player's collision shape and the bounding box of every obstacle piece.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::Convex;

const AXIS_ALIGNED: [DVec2; 2] = [DVec2::X, DVec2::Y];

/// Rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest rectangle containing every point (zero rect if empty)
    pub fn enclosing(points: &[DVec2]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let (min, max) = points
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Strict overlap test (shared edges do not count)
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

impl Convex for Rect {
    fn axes(&self) -> &[DVec2] {
        &AXIS_ALIGNED
    }

    fn project(&self, axis: DVec2) -> (f64, f64) {
        // Project the centre, then extend by the half-extent along the axis
        let half = DVec2::new(self.width, self.height) * 0.5;
        let center = axis.dot(self.center());
        let reach = half.x * axis.x.abs() + half.y * axis.y.abs();
        (center - reach, center + reach)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_excludes_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(9.0, 9.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_enclosing() {
        let r = Rect::enclosing(&[
            DVec2::new(3.0, 4.0),
            DVec2::new(-1.0, 8.0),
            DVec2::new(5.0, 2.0),
        ]);
        assert_eq!(r, Rect::new(-1.0, 2.0, 6.0, 6.0));
    }

    #[test]
    fn test_project_axis_aligned() {
        let r = Rect::new(10.0, 20.0, 4.0, 6.0);
        assert_eq!(r.project(DVec2::X), (10.0, 14.0));
        assert_eq!(r.project(DVec2::Y), (20.0, 26.0));
        assert_eq!(r.project(-DVec2::Y), (-26.0, -20.0));
    }

    #[test]
    fn test_project_diagonal() {
        let r = Rect::new(0.0, 0.0, 2.0, 2.0);
        let axis = DVec2::new(1.0, 1.0).normalize();
        let (min, max) = r.project(axis);
        assert!(min.abs() < 1e-12);
        assert!((max - 4.0 / 2f64.sqrt()).abs() < 1e-12);
    }
}
