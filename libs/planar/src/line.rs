//! Directed infinite lines with exact intersection.
//!
//! A [`Line`] is defined by two distinct lattice points and carries its
//! [`Direction`], computed at construction. The left side of a line is
//! the inside by convention everywhere in this crate: a convex shape is
//! the intersection of the left half-planes of its boundary lines.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::ParallelLines;
use crate::float_point::FloatPoint;
use crate::point::Point;
use crate::rational::{ExactPoint, RationalPoint};
use crate::side::Side;
use crate::transform::{Rotation, Transform};
use crate::vector::Vector;

/// The distance below which the tolerant float side test reports
/// collinear and exact arithmetic takes over.
pub(crate) const SIDE_TOLERANCE: f64 = 0.5;

/// A directed infinite line through two lattice points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq)]
pub struct Line {
    a: Point,
    b: Point,
    direction: Direction,
}

impl Line {
    /// Creates the directed line from `a` towards `b`.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`.
    pub fn new(a: Point, b: Point) -> Self {
        assert!(a != b, "a line requires two distinct points");
        a.check_range();
        b.check_range();
        Self {
            a,
            b,
            direction: Direction::new(b - a),
        }
    }

    /// Creates the directed line through `a` with the given direction.
    pub fn with_direction(a: Point, direction: Direction) -> Self {
        Self {
            a,
            b: a + direction.to_vector(),
            direction,
        }
    }

    /// The horizontal line at height `y`, directed rightward.
    ///
    /// Its left side is the half-plane above it.
    pub fn horizontal(y: i64) -> Self {
        Self::with_direction(Point::new(0, y), Direction::RIGHT)
    }

    /// The vertical line at `x`, directed upward.
    ///
    /// Its left side is the half-plane to the west of it.
    pub fn vertical(x: i64) -> Self {
        Self::with_direction(Point::new(x, 0), Direction::UP)
    }

    /// The first defining point.
    #[inline]
    pub fn a(&self) -> Point {
        self.a
    }

    /// The second defining point.
    #[inline]
    pub fn b(&self) -> Point {
        self.b
    }

    /// The direction from the first towards the second defining point.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The same infinite line with reversed direction.
    ///
    /// Its left half-plane is the complement of this line's.
    pub fn opposite(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
            direction: self.direction.opposite(),
        }
    }

    /// The exact side of this line on which `p` lies.
    pub fn side_of(&self, p: Point) -> Side {
        let d = self.direction;
        let det = d.x() as i128 * (p.y - self.a.y) as i128
            - d.y() as i128 * (p.x - self.a.x) as i128;
        Side::of_sign(det)
    }

    /// The exact side for lattice or rational points.
    pub fn side_of_exact(&self, p: &ExactPoint) -> Side {
        p.side_of(self)
    }

    /// The tolerance-gated side for approximate points.
    pub fn side_of_float(&self, p: FloatPoint, tolerance: f64) -> Side {
        p.side_of(self.a.to_float(), self.b.to_float(), tolerance)
    }

    /// Returns true if `p` lies on the line.
    pub fn contains_point(&self, p: Point) -> bool {
        self.side_of(p) == Side::Collinear
    }

    /// Returns true if the lines have the same or opposite direction.
    pub fn is_parallel(&self, other: &Line) -> bool {
        self.direction.cross(other.direction) == 0
    }

    /// Returns true if both lines describe the same infinite point set,
    /// regardless of direction.
    pub fn is_collinear(&self, other: &Line) -> bool {
        self.is_parallel(other) && self.side_of(other.a) == Side::Collinear
    }

    /// Returns true if the line is axis-parallel.
    #[inline]
    pub fn is_orthogonal(&self) -> bool {
        self.direction.is_orthogonal()
    }

    /// Returns true if the line is a 45-degree diagonal.
    #[inline]
    pub fn is_diagonal(&self) -> bool {
        self.direction.is_diagonal()
    }

    /// The exact intersection point of two lines.
    ///
    /// The result is a lattice point whenever the intersection determinant
    /// divides evenly (always the case for 45-degree line pairs meeting on
    /// the lattice), a rational point otherwise, and
    /// [`ParallelLines`] when no intersection exists.
    pub fn intersection(&self, other: &Line) -> Result<ExactPoint, ParallelLines> {
        if self.is_parallel(other) {
            return Err(ParallelLines);
        }
        if self.direction.is_45_degree() && other.direction.is_45_degree() {
            return Ok(self.intersection_small(other));
        }
        Ok(self.intersection_big(other))
    }

    /// Closed-form path for the 45-degree line family; the determinant is
    /// at most 2 in magnitude, so 128-bit arithmetic is exact.
    fn intersection_small(&self, other: &Line) -> ExactPoint {
        let (d1, d2) = (self.direction, other.direction);
        let c1 = d1.y() as i128 * self.a.x as i128 - d1.x() as i128 * self.a.y as i128;
        let c2 = d2.y() as i128 * other.a.x as i128 - d2.x() as i128 * other.a.y as i128;
        let det = d1.cross(d2);
        let xn = d1.x() as i128 * c2 - d2.x() as i128 * c1;
        let yn = d1.y() as i128 * c2 - d2.y() as i128 * c1;
        if xn % det == 0 && yn % det == 0 {
            let (x, y) = (xn / det, yn / det);
            if let (Some(x), Some(y)) = (x.to_i64(), y.to_i64()) {
                return ExactPoint::Int(Point::new(x, y));
            }
        }
        ExactPoint::Rational(RationalPoint::new(
            BigInt::from(xn),
            BigInt::from(yn),
            BigInt::from(det),
        ))
    }

    /// General determinant path with arbitrary-precision integers.
    fn intersection_big(&self, other: &Line) -> ExactPoint {
        let (d1, d2) = (self.direction, other.direction);
        let (d1x, d1y) = (BigInt::from(d1.x()), BigInt::from(d1.y()));
        let (d2x, d2y) = (BigInt::from(d2.x()), BigInt::from(d2.y()));
        let c1 = &d1y * BigInt::from(self.a.x) - &d1x * BigInt::from(self.a.y);
        let c2 = &d2y * BigInt::from(other.a.x) - &d2x * BigInt::from(other.a.y);
        let det = &d1x * &d2y - &d1y * &d2x;
        let xn = &d1x * &c2 - &d2x * &c1;
        let yn = &d1y * &c2 - &d2y * &c1;
        let (qx, rx) = xn.div_mod_floor(&det);
        let (qy, ry) = yn.div_mod_floor(&det);
        if rx.is_zero() && ry.is_zero() {
            if let (Some(x), Some(y)) = (qx.to_i64(), qy.to_i64()) {
                return ExactPoint::Int(Point::new(x, y));
            }
        }
        ExactPoint::Rational(RationalPoint::new(xn, yn, det))
    }

    /// The approximate intersection point, or [`FloatPoint::NAN`] for
    /// parallel lines.
    pub fn intersection_approx(&self, other: &Line) -> FloatPoint {
        if self.is_parallel(other) {
            return FloatPoint::NAN;
        }
        let (d1, d2) = (self.direction, other.direction);
        let (d1x, d1y) = (d1.x() as f64, d1.y() as f64);
        let (d2x, d2y) = (d2.x() as f64, d2.y() as f64);
        let c1 = d1y * self.a.x as f64 - d1x * self.a.y as f64;
        let c2 = d2y * other.a.x as f64 - d2x * other.a.y as f64;
        let det = d1x * d2y - d1y * d2x;
        FloatPoint::new((d1x * c2 - d2x * c1) / det, (d1y * c2 - d2y * c1) / det)
    }

    /// The side of this line on which the intersection of `l1` and `l2`
    /// lies.
    ///
    /// Two-tier precision: a tolerant float test answers when it is
    /// unambiguous; only a collinear verdict falls back to exact rational
    /// arithmetic. Parallel `l1`/`l2` yield [`Side::Collinear`] with a
    /// logged warning.
    pub fn side_of_intersection(&self, l1: &Line, l2: &Line) -> Side {
        let approx = l1.intersection_approx(l2);
        if !approx.is_nan() {
            let side = self.side_of_float(approx, SIDE_TOLERANCE);
            if side.is_strict() {
                return side;
            }
        }
        match l1.intersection(l2) {
            Ok(p) => p.side_of(self),
            Err(ParallelLines) => {
                tracing::warn!("side_of_intersection called with parallel lines");
                Side::Collinear
            }
        }
    }

    /// The line moved `distance` units towards its right side, which
    /// enlarges its left half-plane.
    ///
    /// Exact for axis-parallel lines and integral distances; rounded to
    /// the nearest lattice line otherwise.
    pub fn translate_perpendicular(&self, distance: f64) -> Line {
        let d = self.direction;
        let (nx, ny) = (d.y() as f64, -d.x() as f64);
        let len = (nx * nx + ny * ny).sqrt();
        let shift = Vector::new(
            (distance * nx / len).round() as i64,
            (distance * ny / len).round() as i64,
        );
        Line::with_direction(self.a + shift, self.direction)
    }

    /// The line through `p` perpendicular to this line.
    pub fn perpendicular_through(&self, p: Point) -> Line {
        Line::with_direction(p, self.direction.turn_45(2))
    }
}

impl PartialEq for Line {
    /// Lines are equal when they describe the same infinite directed
    /// line, not the same defining points.
    fn eq(&self, other: &Self) -> bool {
        self.direction == other.direction && self.side_of(other.a) == Side::Collinear
    }
}

impl Transform for Line {
    fn translate(self, v: Vector) -> Self {
        Self {
            a: self.a + v,
            b: self.b + v,
            direction: self.direction,
        }
    }

    fn turn_90(self, rotation: Rotation, pole: Point) -> Self {
        Line::new(
            self.a.turn_90(rotation, pole),
            self.b.turn_90(rotation, pole),
        )
    }

    /// Mirroring reverses orientation, so the defining points are swapped
    /// to keep the left-side-is-inside convention.
    fn mirror_vertical(self, pole: Point) -> Self {
        Line::new(self.b.mirror_vertical(pole), self.a.mirror_vertical(pole))
    }

    fn mirror_horizontal(self, pole: Point) -> Self {
        Line::new(
            self.b.mirror_horizontal(pole),
            self.a.mirror_horizontal(pole),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_side_conventions() {
        assert_eq!(Line::horizontal(0).side_of(Point::new(5, 3)), Side::Left);
        assert_eq!(Line::horizontal(0).side_of(Point::new(5, -3)), Side::Right);
        assert_eq!(Line::vertical(2).side_of(Point::new(0, 9)), Side::Left);
        assert_eq!(
            Line::vertical(2).side_of(Point::new(2, -40)),
            Side::Collinear
        );
    }

    #[test]
    fn side_antisymmetry() {
        let a = Point::new(-3, 1);
        let b = Point::new(7, 5);
        let probes = [
            Point::new(0, 0),
            Point::new(2, 3),
            Point::new(-8, -1),
            Point::new(17, 9),
        ];
        for p in probes {
            assert_eq!(
                Line::new(a, b).side_of(p),
                Line::new(b, a).side_of(p).negate()
            );
        }
    }

    #[test]
    fn infinite_line_equality() {
        let l1 = Line::new(Point::new(0, 0), Point::new(2, 1));
        let l2 = Line::new(Point::new(4, 2), Point::new(8, 4));
        assert_eq!(l1, l2);
        assert_ne!(l1, l1.opposite());
        assert!(l1.is_collinear(&l1.opposite()));
        assert_ne!(l1, Line::new(Point::new(0, 1), Point::new(2, 2)));
    }

    #[test]
    fn axis_intersection_is_lattice() {
        let h = Line::horizontal(4);
        let v = Line::vertical(-7);
        assert_eq!(
            h.intersection(&v).unwrap(),
            ExactPoint::Int(Point::new(-7, 4))
        );
    }

    #[test]
    fn diagonal_intersection_at_half_lattice() {
        // x - y = 0 crossed with x + y = 1 meets at (1/2, 1/2).
        let d1 = Line::with_direction(Point::new(0, 0), Direction::RIGHT_UP);
        let d2 = Line::with_direction(Point::new(1, 0), Direction::LEFT_UP);
        let p = d1.intersection(&d2).unwrap();
        assert!(!p.is_int());
        let f = p.to_float();
        assert_eq!((f.x, f.y), (0.5, 0.5));
    }

    #[test]
    fn general_intersection_is_rational() {
        let l1 = Line::new(Point::new(0, 0), Point::new(3, 1));
        let l2 = Line::new(Point::new(0, 2), Point::new(1, 0));
        let p = l1.intersection(&l2).unwrap();
        let expected = RationalPoint::new(BigInt::from(6), BigInt::from(2), BigInt::from(7));
        assert_eq!(p, ExactPoint::Rational(expected));
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        let l1 = Line::horizontal(0);
        let l2 = Line::horizontal(5);
        assert_eq!(l1.intersection(&l2), Err(ParallelLines));
        assert!(l1.intersection_approx(&l2).is_nan());
        assert_eq!(l1.intersection(&l1.opposite()), Err(ParallelLines));
    }

    #[test]
    fn side_of_intersection_falls_back_to_exact() {
        let base = Line::horizontal(0);
        // (3,1)-direction line from the origin crosses x = 1 at (1, 1/3):
        // within the float tolerance of the base line, so only the exact
        // fallback can classify it.
        let l1 = Line::new(Point::new(0, 0), Point::new(3, 1));
        let l2 = Line::vertical(1);
        assert_eq!(base.side_of_intersection(&l1, &l2), Side::Left);
        // Mirrored below the axis.
        let l3 = Line::new(Point::new(0, 0), Point::new(3, -1));
        assert_eq!(base.side_of_intersection(&l3, &l2), Side::Right);
        // Exactly on the line.
        let l4 = Line::horizontal(0);
        assert_eq!(base.side_of_intersection(&l4, &l2), Side::Collinear);
    }

    #[test]
    fn perpendicular_translation_grows_the_left_half_plane() {
        let l = Line::horizontal(0).translate_perpendicular(3.0);
        assert_eq!(l, Line::horizontal(-3));
        let v = Line::vertical(0).translate_perpendicular(2.0);
        assert_eq!(v, Line::vertical(2));
    }

    #[test]
    fn mirroring_preserves_the_interior_side() {
        let l = Line::horizontal(2);
        let m = l.mirror_horizontal(Point::new(0, 0));
        // Interior (left side) was above y = 2; after mirroring it must be
        // below y = -2.
        assert_eq!(m.side_of(Point::new(0, -5)), Side::Left);
        assert_eq!(m.side_of(Point::new(0, 0)), Side::Right);
    }
}
