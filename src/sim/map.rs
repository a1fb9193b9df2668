//! Map obstacles
//!
//! Obstacles are decomposed into convex pieces when the map is built and
//! never change afterwards.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::decompose::PolygonDecomposer;
use crate::error::Result;
use crate::geometry::{ConvexPolygon, Polygon, Rect};

/// One obstacle: the source outline plus its convex pieces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapObject {
    outline: Polygon,
    pieces: Vec<ConvexPolygon>,
    /// Debug colour per piece (0xRRGGBB), not used by the physics
    colors: Vec<u32>,
}

impl MapObject {
    /// Decompose `outline`; fails on degenerate geometry
    pub fn new(outline: &Polygon, decomposer: &PolygonDecomposer, seed: u64) -> Result<Self> {
        let pieces: Vec<ConvexPolygon> = decomposer
            .decompose(outline)?
            .into_iter()
            .map(ConvexPolygon::new)
            .collect();

        let mut rng = Pcg32::seed_from_u64(seed);
        let colors = pieces
            .iter()
            .map(|_| rng.random::<u32>() & 0x00FF_FFFF)
            .collect();

        Ok(Self {
            outline: outline.clone(),
            pieces,
            colors,
        })
    }

    /// The polygon as authored (what a renderer draws)
    #[inline]
    pub fn outline(&self) -> &Polygon {
        &self.outline
    }

    #[inline]
    pub fn pieces(&self) -> &[ConvexPolygon] {
        &self.pieces
    }

    #[inline]
    pub fn colors(&self) -> &[u32] {
        &self.colors
    }
}

/// A playable map: world boundary plus static obstacles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Map {
    pub width: f64,
    pub height: f64,
    pub objects: Vec<MapObject>,
}

impl Map {
    /// Build a map, decomposing every obstacle
    ///
    /// Any invalid outline fails the whole map.
    pub fn build(width: f64, height: f64, outlines: &[Polygon], seed: u64) -> Result<Self> {
        let decomposer = PolygonDecomposer::new();
        let objects = outlines
            .iter()
            .enumerate()
            .map(|(i, outline)| MapObject::new(outline, &decomposer, seed.wrapping_add(i as u64)))
            .collect::<Result<Vec<_>>>()?;

        let piece_count: usize = objects.iter().map(|o| o.pieces().len()).sum();
        log::info!(
            "Map {}x{}: {} obstacles, {} convex pieces",
            width,
            height,
            objects.len(),
            piece_count
        );

        Ok(Self {
            width,
            height,
            objects,
        })
    }

    /// An obstacle-free map
    pub fn empty(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            objects: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Built-in demo layout for a 1024x640 world
///
/// The column above the default spawn point is kept clear down to the floor.
pub fn demo_outlines() -> Vec<Polygon> {
    vec![
        // Floor
        Polygon::from_points(&[(0.0, 600.0), (1024.0, 600.0), (1024.0, 640.0), (0.0, 640.0)]),
        // Stepped ledge on the left
        Polygon::from_points(&[
            (40.0, 420.0),
            (140.0, 420.0),
            (140.0, 470.0),
            (240.0, 470.0),
            (240.0, 510.0),
            (40.0, 510.0),
        ]),
        // Rolling hill with a dip
        Polygon::from_points(&[
            (560.0, 600.0),
            (660.0, 520.0),
            (760.0, 560.0),
            (860.0, 470.0),
            (980.0, 600.0),
        ]),
        // Floating cup
        Polygon::from_points(&[
            (420.0, 300.0),
            (440.0, 300.0),
            (440.0, 340.0),
            (520.0, 340.0),
            (520.0, 300.0),
            (540.0, 300.0),
            (540.0, 360.0),
            (420.0, 360.0),
        ]),
    ]
}
