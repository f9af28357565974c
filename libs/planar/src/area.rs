//! Regions bounded by an outline with holes.

use serde::{Deserialize, Serialize};

use crate::bbox::Bounded;
use crate::contains::{Containment, Contains};
use crate::error::DecomposeError;
use crate::int_box::IntBox;
use crate::octagon::IntOctagon;
use crate::point::Point;
use crate::polygon::{Polygon, DEFAULT_SEED};
use crate::tile::TileShape;
use crate::transform::{Rotation, Transform};
use crate::vector::Vector;

/// A region consisting of a border polygon minus hole polygons.
///
/// A point belongs to the region when it is inside the border and
/// outside every hole.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolygonArea {
    border: Polygon,
    holes: Vec<Polygon>,
}

impl PolygonArea {
    /// Creates a region from its border and holes.
    pub fn new(border: Polygon, holes: Vec<Polygon>) -> Self {
        Self { border, holes }
    }

    /// The border outline.
    pub fn border(&self) -> &Polygon {
        &self.border
    }

    /// The hole outlines.
    pub fn holes(&self) -> &[Polygon] {
        &self.holes
    }

    /// The enclosed area.
    pub fn area(&self) -> f64 {
        self.border.area() - self.holes.iter().map(Polygon::area).sum::<f64>()
    }

    /// Partitions the region into convex tile shapes with the default
    /// generator seed.
    pub fn split_to_convex(&self) -> Result<Vec<TileShape>, DecomposeError> {
        self.split_to_convex_seeded(DEFAULT_SEED)
    }

    /// Partitions the region into convex tile shapes.
    ///
    /// The border is convex-decomposed first; then every convex piece
    /// of every hole is cut out of every surviving piece, keeping only
    /// the two-dimensional survivors. The order of hole processing does
    /// not affect the covered region, only the intermediate piece
    /// count.
    pub fn split_to_convex_seeded(&self, seed: u64) -> Result<Vec<TileShape>, DecomposeError> {
        let mut pieces: Vec<TileShape> = self
            .border
            .split_to_convex_seeded(seed)?
            .iter()
            .map(Polygon::to_tile_shape)
            .collect();
        for hole in &self.holes {
            for hole_piece in hole.split_to_convex_seeded(seed)? {
                let hole_shape = hole_piece.to_tile_shape();
                pieces = pieces
                    .iter()
                    .flat_map(|piece| piece.cutout(&hole_shape))
                    .filter(|piece| piece.dimension().is_area())
                    .collect();
            }
        }
        Ok(pieces)
    }
}

impl Bounded for PolygonArea {
    fn bounding_box(&self) -> IntBox {
        self.border.bounding_box()
    }

    fn bounding_octagon(&self) -> IntOctagon {
        self.border.bounding_octagon()
    }
}

impl Contains<Point> for PolygonArea {
    fn containment(&self, p: &Point) -> Containment {
        match self.border.containment(p) {
            Containment::Outside => Containment::Outside,
            border => {
                for hole in &self.holes {
                    match hole.containment(p) {
                        Containment::Inside => return Containment::Outside,
                        Containment::Border => return Containment::Border,
                        Containment::Outside => {}
                    }
                }
                border
            }
        }
    }
}

impl Transform for PolygonArea {
    fn translate(self, v: Vector) -> Self {
        Self {
            border: self.border.translate(v),
            holes: self.holes.into_iter().map(|h| h.translate(v)).collect(),
        }
    }

    fn turn_90(self, rotation: Rotation, pole: Point) -> Self {
        Self {
            border: self.border.turn_90(rotation, pole),
            holes: self
                .holes
                .into_iter()
                .map(|h| h.turn_90(rotation, pole))
                .collect(),
        }
    }

    fn mirror_vertical(self, pole: Point) -> Self {
        Self {
            border: self.border.mirror_vertical(pole),
            holes: self
                .holes
                .into_iter()
                .map(|h| h.mirror_vertical(pole))
                .collect(),
        }
    }

    fn mirror_horizontal(self, pole: Point) -> Self {
        Self {
            border: self.border.mirror_horizontal(pole),
            holes: self
                .holes
                .into_iter()
                .map(|h| h.mirror_horizontal(pole))
                .collect(),
        }
    }
}
