//! Approximate floating-point points.
//!
//! Exact computations that have no defined result (intersecting parallel
//! lines, projecting onto a degenerate segment) report the [`FloatPoint::NAN`]
//! sentinel at this layer. The sentinel is an explicit flag on the value,
//! not an IEEE NaN, and it propagates through arithmetic instead of
//! poisoning comparisons.

use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::side::Side;

/// A point with floating-point coordinates.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FloatPoint {
    /// The x-coordinate.
    pub x: f64,
    /// The y-coordinate.
    pub y: f64,
    nan: bool,
}

impl FloatPoint {
    /// The sentinel for an undefined point.
    pub const NAN: FloatPoint = FloatPoint {
        x: 0.0,
        y: 0.0,
        nan: true,
    };

    /// Creates a new defined [`FloatPoint`].
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, nan: false }
    }

    /// Returns true if this is the undefined-point sentinel.
    #[inline]
    pub const fn is_nan(&self) -> bool {
        self.nan
    }

    /// Rounds both coordinates to the nearest lattice point.
    ///
    /// # Panics
    ///
    /// Panics if called on the [`FloatPoint::NAN`] sentinel.
    pub fn round(self) -> Point {
        assert!(!self.nan, "cannot round an undefined point");
        Point::new(self.x.round() as i64, self.y.round() as i64)
    }

    /// The squared Euclidean distance to `other`.
    ///
    /// Propagates to `f64::INFINITY` if either point is undefined.
    pub fn sq_distance(&self, other: FloatPoint) -> f64 {
        if self.nan || other.nan {
            return f64::INFINITY;
        }
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// The Euclidean distance to `other`.
    pub fn distance(&self, other: FloatPoint) -> f64 {
        self.sq_distance(other).sqrt()
    }

    /// The midpoint between this point and `other`.
    pub fn midpoint(&self, other: FloatPoint) -> FloatPoint {
        if self.nan || other.nan {
            return FloatPoint::NAN;
        }
        FloatPoint::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }

    /// The side of the directed line from `a` to `b` on which this point
    /// lies, with collinearity gated by `tolerance` (a distance).
    ///
    /// Unlike the exact predicates this can misclassify near-collinear
    /// inputs; callers that cannot afford that fall back to the exact layer.
    pub fn side_of(&self, a: FloatPoint, b: FloatPoint, tolerance: f64) -> Side {
        if self.nan || a.nan || b.nan {
            return Side::Collinear;
        }
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let det = dx * (self.y - a.y) - dy * (self.x - a.x);
        let norm = (dx * dx + dy * dy).sqrt();
        if det > tolerance * norm {
            Side::Left
        } else if det < -tolerance * norm {
            Side::Right
        } else {
            Side::Collinear
        }
    }
}

impl std::ops::Add for FloatPoint {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        if self.nan || rhs.nan {
            return Self::NAN;
        }
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for FloatPoint {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        if self.nan || rhs.nan {
            return Self::NAN;
        }
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for FloatPoint {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        if self.nan {
            return Self::NAN;
        }
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for FloatPoint {
    fn from(value: (f64, f64)) -> Self {
        Self::new(value.0, value.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_sentinel_propagates() {
        let p = FloatPoint::new(1.0, 2.0);
        assert!((FloatPoint::NAN + p).is_nan());
        assert!((p - FloatPoint::NAN).is_nan());
        assert!((FloatPoint::NAN * 3.0).is_nan());
        assert!(p.midpoint(FloatPoint::NAN).is_nan());
        assert_eq!(p.sq_distance(FloatPoint::NAN), f64::INFINITY);
    }

    #[test]
    fn sentinel_is_not_ieee_nan() {
        assert_eq!(FloatPoint::NAN.x, 0.0);
        assert!(FloatPoint::NAN.is_nan());
        assert!(!FloatPoint::new(0.0, 0.0).is_nan());
    }

    #[test]
    fn tolerant_side_classification() {
        let a = FloatPoint::new(0.0, 0.0);
        let b = FloatPoint::new(100.0, 0.0);
        assert_eq!(FloatPoint::new(50.0, 1.0).side_of(a, b, 0.01), Side::Left);
        assert_eq!(FloatPoint::new(50.0, -1.0).side_of(a, b, 0.01), Side::Right);
        assert_eq!(
            FloatPoint::new(50.0, 0.005).side_of(a, b, 0.01),
            Side::Collinear
        );
    }
}
