//! Open line chains for traces with width.
//!
//! A [`Polyline`] is an ordered array of lines, not points: each corner
//! is the exact intersection of two consecutive lines, computed at
//! construction. Keeping the lines primary lets a polyline describe an
//! offset region per segment (each line a boundary, not a point)
//! without ever re-deriving corners from rounded coordinates.
//!
//! The first and last lines are end caps: they carry no segment
//! themselves and bound the first and last segment of the chain.

use serde::{Deserialize, Serialize};

use crate::bbox::Bounded;
use crate::float_point::FloatPoint;
use crate::int_box::IntBox;
use crate::line::Line;
use crate::octagon::IntOctagon;
use crate::point::Point;
use crate::rational::ExactPoint;
use crate::side::Side;
use crate::simplex::Simplex;
use crate::tile::TileShape;
use crate::transform::{Rotation, Transform};
use crate::vector::Vector;

/// An ordered chain of lines with no two consecutive lines parallel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Polyline {
    lines: Vec<Line>,
    corners: Vec<ExactPoint>,
}

impl Polyline {
    /// Creates a polyline from its line array.
    ///
    /// Consecutive entries describing the same infinite line are merged
    /// into one.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two lines remain, or if two consecutive
    /// lines are parallel but distinct (their corner would not exist).
    pub fn new(lines: Vec<Line>) -> Self {
        let mut merged: Vec<Line> = Vec::with_capacity(lines.len());
        for line in lines {
            match merged.last() {
                Some(last) if last.is_collinear(&line) => {}
                _ => merged.push(line),
            }
        }
        assert!(merged.len() >= 2, "a polyline requires at least two lines");
        let corners = merged
            .windows(2)
            .map(|w| {
                w[0].intersection(&w[1])
                    .expect("consecutive polyline lines must not be parallel")
            })
            .collect();
        Self {
            lines: merged,
            corners,
        }
    }

    /// Creates a polyline through the given corner points, with
    /// perpendicular end-cap lines at both ends.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two distinct consecutive points are given.
    pub fn from_points(points: Vec<Point>) -> Self {
        let mut segments: Vec<Line> = Vec::with_capacity(points.len() + 1);
        for w in points.windows(2) {
            if w[0] != w[1] {
                segments.push(Line::new(w[0], w[1]));
            }
        }
        assert!(
            !segments.is_empty(),
            "a polyline requires at least two distinct points"
        );
        let first = segments[0];
        let last = *segments.last().expect("segments is nonempty");
        let mut lines = Vec::with_capacity(segments.len() + 2);
        lines.push(first.perpendicular_through(first.a()));
        lines.extend(segments);
        lines.push(last.perpendicular_through(last.b()));
        Self::new(lines)
    }

    /// The lines of the chain.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The number of corners (one less than the number of lines).
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    /// The exact corner between lines `index` and `index + 1`.
    pub fn corner(&self, index: usize) -> &ExactPoint {
        &self.corners[index]
    }

    /// All corners, in chain order.
    pub fn corners(&self) -> &[ExactPoint] {
        &self.corners
    }

    /// The corners as approximate points.
    pub fn corner_approx_arr(&self) -> Vec<FloatPoint> {
        self.corners.iter().map(|c| c.to_float()).collect()
    }

    /// The convex region covered by the segment on line `index`,
    /// widened by `half_width` on both sides and capped by the
    /// neighboring lines.
    ///
    /// # Panics
    ///
    /// Panics unless `index` addresses a middle line
    /// (`1 <= index < lines.len() - 1`).
    pub fn offset_shape(&self, half_width: i64, index: usize) -> TileShape {
        assert!(
            index >= 1 && index + 1 < self.lines.len(),
            "only middle polyline lines carry a segment"
        );
        let line = self.lines[index];
        let width = half_width as f64;
        let side_a = line.translate_perpendicular(width);
        let side_b = line.opposite().translate_perpendicular(width);
        // The cap derived from each neighbor is oriented so the far end
        // of the segment stays inside.
        let far_next = &self.corners[index];
        let cap_prev = oriented_towards(self.lines[index - 1], far_next);
        let far_prev = &self.corners[index - 1];
        let cap_next = oriented_towards(self.lines[index + 1], far_prev);
        TileShape::Simplex(Simplex::new(vec![side_a, side_b, cap_prev, cap_next])).simplify()
    }

    /// The offset shapes of every segment, in chain order.
    pub fn offset_shapes(&self, half_width: i64) -> Vec<TileShape> {
        (1..self.lines.len() - 1)
            .map(|i| self.offset_shape(half_width, i))
            .collect()
    }
}

fn oriented_towards(line: Line, keep: &ExactPoint) -> Line {
    if keep.side_of(&line) == Side::Right {
        line.opposite()
    } else {
        line
    }
}

impl Bounded for Polyline {
    fn bounding_box(&self) -> IntBox {
        let mut result = IntBox::EMPTY;
        for c in &self.corners {
            result = result.union(IntBox::from_sides(
                c.floor_x(),
                c.floor_y(),
                c.ceil_x(),
                c.ceil_y(),
            ));
        }
        result
    }

    fn bounding_octagon(&self) -> IntOctagon {
        let mut result = IntOctagon::EMPTY;
        for c in &self.corners {
            result = result.union(IntOctagon::new(
                c.floor_x(),
                c.floor_y(),
                c.ceil_x(),
                c.ceil_y(),
                c.floor_diff(),
                c.ceil_diff(),
                c.floor_sum(),
                c.ceil_sum(),
            ));
        }
        result
    }
}

impl Transform for Polyline {
    fn translate(self, v: Vector) -> Self {
        Polyline::new(self.lines.into_iter().map(|l| l.translate(v)).collect())
    }

    fn turn_90(self, rotation: Rotation, pole: Point) -> Self {
        Polyline::new(
            self.lines
                .into_iter()
                .map(|l| l.turn_90(rotation, pole))
                .collect(),
        )
    }

    fn mirror_vertical(self, pole: Point) -> Self {
        Polyline::new(
            self.lines
                .into_iter()
                .map(|l| l.mirror_vertical(pole))
                .collect(),
        )
    }

    fn mirror_horizontal(self, pole: Point) -> Self {
        Polyline::new(
            self.lines
                .into_iter()
                .map(|l| l.mirror_horizontal(pole))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contains::Contains;

    #[test]
    fn corners_are_the_given_points() {
        let p = Polyline::from_points(vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
        ]);
        // Two segments plus two end caps.
        assert_eq!(p.lines().len(), 4);
        assert_eq!(p.corner_count(), 3);
        assert_eq!(p.corner(0), &ExactPoint::Int(Point::new(0, 0)));
        assert_eq!(p.corner(1), &ExactPoint::Int(Point::new(10, 0)));
        assert_eq!(p.corner(2), &ExactPoint::Int(Point::new(10, 10)));
    }

    #[test]
    fn duplicate_collinear_lines_are_merged() {
        let p = Polyline::new(vec![
            Line::vertical(0),
            Line::horizontal(0),
            Line::new(Point::new(5, 0), Point::new(9, 0)),
            Line::vertical(10).opposite(),
        ]);
        assert_eq!(p.lines().len(), 3);
    }

    #[test]
    #[should_panic(expected = "parallel")]
    fn distinct_parallel_neighbors_are_rejected() {
        Polyline::new(vec![Line::horizontal(0), Line::horizontal(5)]);
    }

    #[test]
    fn offset_shape_covers_the_widened_segment() {
        let p = Polyline::from_points(vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
        ]);
        let shape = p.offset_shape(2, 1);
        assert_eq!(shape.area(), 10.0 * 4.0);
        assert!(shape.contains(&Point::new(5, 0)));
        assert!(shape.contains(&Point::new(5, 2)));
        assert!(shape.contains(&Point::new(5, -2)));
        assert!(shape.is_outside(&Point::new(5, 3)));
        assert!(shape.is_outside(&Point::new(-1, 0)));

        let shapes = p.offset_shapes(2);
        assert_eq!(shapes.len(), 2);
    }

    #[test]
    fn bounding_box_encloses_corners() {
        let p = Polyline::from_points(vec![
            Point::new(-3, 2),
            Point::new(7, 2),
            Point::new(7, -5),
        ]);
        assert_eq!(p.bounding_box(), IntBox::from_sides(-3, -5, 7, 2));
    }

    #[test]
    fn transforms_preserve_corner_count() {
        let p = Polyline::from_points(vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
        ]);
        let moved = p.clone().translate(Vector::new(3, 4));
        assert_eq!(moved.corner(0), &ExactPoint::Int(Point::new(3, 4)));
        let turned = p.clone().turn_90(Rotation::R90, Point::zero());
        assert_eq!(turned.corner_count(), 3);
        let mirrored = p.mirror_horizontal(Point::zero());
        assert_eq!(mirrored.corner(2), &ExactPoint::Int(Point::new(10, -10)));
    }
}
