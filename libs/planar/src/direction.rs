//! Exact angle classes represented as reduced vectors.
//!
//! A [`Direction`] is the equivalence class of all vectors that are
//! collinear and same-sense: the representative is the vector divided by
//! the GCD of its components. Directions are totally ordered by angle
//! without any trigonometry (half-plane test, then cross-product sign),
//! which is what lets shape boundaries be kept sorted and angle
//! comparisons stay exact on the integer grid.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use crate::point::CRITICAL_MAGNITUDE;
use crate::side::Side;
use crate::vector::Vector;

/// Whether a computed value is exact or has lost precision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Exactness {
    /// The result is exact.
    Exact,
    /// The result was rounded to stay within the safe coordinate range.
    Rounded,
}

/// An exact direction in the plane.
///
/// Invariant: the components are coprime (the zero vector has no
/// direction).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub struct Direction {
    x: i64,
    y: i64,
}

impl Direction {
    /// Pointing in the positive x direction.
    pub const RIGHT: Direction = Direction { x: 1, y: 0 };
    /// Pointing up and to the right.
    pub const RIGHT_UP: Direction = Direction { x: 1, y: 1 };
    /// Pointing in the positive y direction.
    pub const UP: Direction = Direction { x: 0, y: 1 };
    /// Pointing up and to the left.
    pub const LEFT_UP: Direction = Direction { x: -1, y: 1 };
    /// Pointing in the negative x direction.
    pub const LEFT: Direction = Direction { x: -1, y: 0 };
    /// Pointing down and to the left.
    pub const LEFT_DOWN: Direction = Direction { x: -1, y: -1 };
    /// Pointing in the negative y direction.
    pub const DOWN: Direction = Direction { x: 0, y: -1 };
    /// Pointing down and to the right.
    pub const RIGHT_DOWN: Direction = Direction { x: 1, y: -1 };

    /// The normalized direction of `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v` is the zero vector.
    ///
    /// # Example
    ///
    /// ```
    /// # use planar::prelude::*;
    /// assert_eq!(Direction::new(Vector::new(4, -6)), Direction::new(Vector::new(2, -3)));
    /// assert_eq!(Direction::new(Vector::new(0, 17)), Direction::UP);
    /// ```
    pub fn new(v: Vector) -> Self {
        assert!(!v.is_zero(), "the zero vector has no direction");
        let g = v.x.gcd(&v.y);
        Self {
            x: v.x / g,
            y: v.y / g,
        }
    }

    /// The normalized direction of the big-integer vector `(x, y)`.
    ///
    /// Reduces by the GCD; if the reduced components still exceed the
    /// critical magnitude, both are halved until they fit. The halving
    /// loses precision, which the returned [`Exactness`] reports
    /// explicitly (and a warning is logged).
    ///
    /// # Panics
    ///
    /// Panics if both components are zero.
    pub fn from_big_components(x: &BigInt, y: &BigInt) -> (Self, Exactness) {
        assert!(
            !(x.is_zero() && y.is_zero()),
            "the zero vector has no direction"
        );
        let g = x.gcd(y);
        let mut x = x / &g;
        let mut y = y / &g;
        let limit = BigInt::from(CRITICAL_MAGNITUDE);
        let mut exactness = Exactness::Exact;
        while x.abs() > limit || y.abs() > limit {
            x >>= 1;
            y >>= 1;
            exactness = Exactness::Rounded;
        }
        if exactness == Exactness::Rounded {
            tracing::warn!("direction components exceeded the critical magnitude; rounded");
            if x.is_zero() && y.is_zero() {
                // The smaller component can vanish entirely; fall back to
                // the dominant axis so a direction always exists.
                return (Direction::RIGHT, Exactness::Rounded);
            }
        }
        let v = Vector::new(
            x.to_i64().expect("component fits after reduction"),
            y.to_i64().expect("component fits after reduction"),
        );
        (Direction::new(v), exactness)
    }

    /// The x-component of the reduced representative vector.
    #[inline]
    pub const fn x(&self) -> i64 {
        self.x
    }

    /// The y-component of the reduced representative vector.
    #[inline]
    pub const fn y(&self) -> i64 {
        self.y
    }

    /// The reduced representative vector.
    #[inline]
    pub const fn to_vector(&self) -> Vector {
        Vector::new(self.x, self.y)
    }

    /// The direction rotated by 180 degrees.
    pub const fn opposite(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }

    /// Returns true if the direction is axis-parallel.
    #[inline]
    pub const fn is_orthogonal(&self) -> bool {
        self.x == 0 || self.y == 0
    }

    /// Returns true if the direction is a 45-degree diagonal.
    #[inline]
    pub const fn is_diagonal(&self) -> bool {
        self.x.abs() == self.y.abs() && self.x != 0
    }

    /// Returns true if the direction is a multiple of 45 degrees.
    #[inline]
    pub const fn is_45_degree(&self) -> bool {
        self.is_orthogonal() || self.is_diagonal()
    }

    /// The direction rotated counter-clockwise by `factor` times 45
    /// degrees.
    ///
    /// The rotation is exact: a 45-degree step maps `(x, y)` to
    /// `(x - y, x + y)`, which is the rotated vector scaled by sqrt(2),
    /// so it stays in the same equivalence class.
    ///
    /// # Example
    ///
    /// ```
    /// # use planar::prelude::*;
    /// assert_eq!(Direction::RIGHT.turn_45(1), Direction::RIGHT_UP);
    /// assert_eq!(Direction::RIGHT.turn_45(2), Direction::UP);
    /// assert_eq!(Direction::RIGHT_UP.turn_45(-2), Direction::RIGHT_DOWN);
    /// assert_eq!(Direction::new(Vector::new(2, 1)).turn_45(8), Direction::new(Vector::new(2, 1)));
    /// ```
    pub fn turn_45(&self, factor: i32) -> Self {
        let steps = factor.rem_euclid(8);
        let (mut x, mut y) = (self.x as i128, self.y as i128);
        for _ in 0..steps {
            let (nx, ny) = (x - y, x + y);
            x = nx;
            y = ny;
            // Every second step doubles both components; reduce eagerly so
            // the intermediate values stay small.
            if x % 2 == 0 && y % 2 == 0 {
                x /= 2;
                y /= 2;
            }
        }
        Direction::new(Vector::new(x as i64, y as i64))
    }

    /// The exact cross product with `other`.
    #[inline]
    pub fn cross(&self, other: Direction) -> i128 {
        self.to_vector().cross(other.to_vector())
    }

    /// The exact dot product with `other`.
    #[inline]
    pub fn dot(&self, other: Direction) -> i128 {
        self.to_vector().dot(other.to_vector())
    }

    /// The side of this direction on which `other` points.
    pub fn side_of(&self, other: Direction) -> Side {
        Side::of_sign(self.cross(other))
    }

    /// The angle of the direction in radians, in `[0, 2*pi)`.
    ///
    /// Approximate; for display and heuristics only.
    pub fn angle_approx(&self) -> f64 {
        let a = (self.y as f64).atan2(self.x as f64);
        if a < 0.0 {
            a + 2.0 * std::f64::consts::PI
        } else {
            a
        }
    }

    /// True if the direction points into the open upper half-plane or
    /// along the positive x-axis, the first half of the angular order.
    fn is_in_first_half(&self) -> bool {
        self.y > 0 || (self.y == 0 && self.x > 0)
    }
}

impl PartialOrd for Direction {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Direction {
    /// Orders directions by angle in `[0, 2*pi)`, starting at the
    /// positive x-axis and turning counter-clockwise.
    ///
    /// No trigonometry: directions are first bucketed by half-plane, and
    /// compared by cross-product sign within a half-plane.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        match (self.is_in_first_half(), other.is_in_first_half()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => match self.cross(*other) {
                c if c > 0 => Ordering::Less,
                c if c < 0 => Ordering::Greater,
                // Same half-plane and collinear: reduced representatives
                // are identical.
                _ => Ordering::Equal,
            },
        }
    }
}

impl std::ops::Neg for Direction {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.opposite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_reduces_to_coprime() {
        let d = Direction::new(Vector::new(-6, 9));
        assert_eq!((d.x(), d.y()), (-2, 3));
    }

    #[test]
    fn angular_order_without_trigonometry() {
        let dirs = [
            Direction::RIGHT,
            Direction::new(Vector::new(3, 1)),
            Direction::RIGHT_UP,
            Direction::UP,
            Direction::LEFT_UP,
            Direction::LEFT,
            Direction::LEFT_DOWN,
            Direction::DOWN,
            Direction::new(Vector::new(5, -1)),
        ];
        for w in dirs.windows(2) {
            assert!(w[0] < w[1], "{:?} should sort before {:?}", w[0], w[1]);
        }
        let mut sorted = dirs.to_vec();
        sorted.sort();
        assert_eq!(sorted, dirs.to_vec());
    }

    #[test]
    fn eight_fold_rotation_cycles() {
        let mut d = Direction::new(Vector::new(3, 2));
        let start = d;
        for _ in 0..8 {
            d = d.turn_45(1);
        }
        assert_eq!(d, start);
        assert_eq!(start.turn_45(4), start.opposite());
    }

    #[test]
    fn diagonal_predicates() {
        assert!(Direction::RIGHT_UP.is_diagonal());
        assert!(Direction::DOWN.is_orthogonal());
        assert!(Direction::LEFT_DOWN.is_45_degree());
        assert!(!Direction::new(Vector::new(2, 1)).is_45_degree());
    }

    #[test]
    fn big_component_reduction_signals_precision_loss() {
        let exact = Direction::from_big_components(&BigInt::from(4), &BigInt::from(-2));
        assert_eq!(exact, (Direction::new(Vector::new(2, -1)), Exactness::Exact));

        let huge = BigInt::from(CRITICAL_MAGNITUDE) * BigInt::from(8) + 1;
        let (_, exactness) = Direction::from_big_components(&huge, &BigInt::from(3));
        assert_eq!(exactness, Exactness::Rounded);
    }
}
