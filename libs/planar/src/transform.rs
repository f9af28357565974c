//! Exact congruence transformations: translations, quarter turns, and
//! mirrorings.
//!
//! Every transformation here maps the integer lattice onto itself, so
//! shapes stay exact under them. There is deliberately no general
//! rotation or scaling.

use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::vector::Vector;

/// A rotation by a multiple of 90 degrees counter-clockwise.
#[derive(Debug, Clone, Copy, Default, Eq, Ord, PartialOrd, PartialEq, Serialize, Deserialize)]
pub enum Rotation {
    /// 0 degrees; no rotation.
    #[default]
    R0,
    /// 90 degrees counter-clockwise.
    R90,
    /// 180 degrees counter-clockwise.
    R180,
    /// 270 degrees counter-clockwise.
    R270,
}

impl Rotation {
    /// The number of quarter turns, in `0..4`.
    pub const fn quarters(&self) -> i32 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 1,
            Rotation::R180 => 2,
            Rotation::R270 => 3,
        }
    }

    /// The rotation for the given number of quarter turns (any integer).
    pub const fn from_quarters(quarters: i32) -> Self {
        match quarters.rem_euclid(4) {
            0 => Rotation::R0,
            1 => Rotation::R90,
            2 => Rotation::R180,
            _ => Rotation::R270,
        }
    }

    /// Rotates a vector about the origin.
    pub const fn rotate_vector(&self, v: Vector) -> Vector {
        match self {
            Rotation::R0 => v,
            Rotation::R90 => Vector::new(-v.y, v.x),
            Rotation::R180 => Vector::new(-v.x, -v.y),
            Rotation::R270 => Vector::new(v.y, -v.x),
        }
    }
}

impl std::ops::Add<Rotation> for Rotation {
    type Output = Rotation;
    fn add(self, rhs: Rotation) -> Self::Output {
        Rotation::from_quarters(self.quarters() + rhs.quarters())
    }
}

impl std::ops::Neg for Rotation {
    type Output = Rotation;
    fn neg(self) -> Self::Output {
        Rotation::from_quarters(-self.quarters())
    }
}

/// Exact congruence transformations of a shape.
///
/// All four operations are lattice-preserving; `turn_90` and the mirrors
/// take a lattice `pole` to transform about.
pub trait Transform: Sized {
    /// Translates by `v`.
    fn translate(self, v: Vector) -> Self;

    /// Rotates counter-clockwise about `pole`.
    fn turn_90(self, rotation: Rotation, pole: Point) -> Self;

    /// Mirrors across the vertical line through `pole`.
    fn mirror_vertical(self, pole: Point) -> Self;

    /// Mirrors across the horizontal line through `pole`.
    fn mirror_horizontal(self, pole: Point) -> Self;
}

impl Transform for Point {
    fn translate(self, v: Vector) -> Self {
        self + v
    }

    fn turn_90(self, rotation: Rotation, pole: Point) -> Self {
        pole + rotation.rotate_vector(self - pole)
    }

    fn mirror_vertical(self, pole: Point) -> Self {
        Point::new(2 * pole.x - self.x, self.y)
    }

    fn mirror_horizontal(self, pole: Point) -> Self {
        Point::new(self.x, 2 * pole.y - self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turns_compose() {
        assert_eq!(Rotation::R90 + Rotation::R270, Rotation::R0);
        assert_eq!(Rotation::R180 + Rotation::R180, Rotation::R0);
        assert_eq!(-Rotation::R90, Rotation::R270);
        assert_eq!(Rotation::from_quarters(-3), Rotation::R90);
    }

    #[test]
    fn point_transformations_about_a_pole() {
        let pole = Point::new(10, 10);
        let p = Point::new(12, 11);
        assert_eq!(p.turn_90(Rotation::R90, pole), Point::new(9, 12));
        assert_eq!(p.turn_90(Rotation::R180, pole), Point::new(8, 9));
        assert_eq!(p.mirror_vertical(pole), Point::new(8, 11));
        assert_eq!(p.mirror_horizontal(pole), Point::new(12, 9));
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        let pole = Point::new(-3, 7);
        let p = Point::new(20, -4);
        let mut q = p;
        for _ in 0..4 {
            q = q.turn_90(Rotation::R90, pole);
        }
        assert_eq!(q, p);
    }
}
