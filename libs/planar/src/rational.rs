//! Rational points for exact line intersections.
//!
//! A line intersection on the integer lattice is not always a lattice
//! point. Rather than rounding, the kernel keeps such results as projective
//! rational points: a pair of arbitrary-precision numerators over one
//! positive denominator. Every predicate on them reduces to big-integer
//! sign computations, so the exactness guarantee of the lattice layer is
//! preserved.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use crate::float_point::FloatPoint;
use crate::line::Line;
use crate::point::Point;
use crate::side::Side;
use crate::transform::{Rotation, Transform};
use crate::vector::Vector;

/// An exact point with rational coordinates `(x/z, y/z)`.
///
/// The denominator `z` is always positive. The representation is not
/// reduced; equality compares cross products instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RationalPoint {
    x: BigInt,
    y: BigInt,
    z: BigInt,
}

impl RationalPoint {
    /// Creates a new rational point `(x/z, y/z)`.
    ///
    /// A negative denominator is normalized away by flipping all three
    /// signs.
    ///
    /// # Panics
    ///
    /// Panics if `z` is zero.
    pub fn new(x: BigInt, y: BigInt, z: BigInt) -> Self {
        assert!(!z.is_zero(), "rational point denominator must be nonzero");
        if z.is_negative() {
            Self {
                x: -x,
                y: -y,
                z: -z,
            }
        } else {
            Self { x, y, z }
        }
    }

    /// The x-numerator.
    pub fn x(&self) -> &BigInt {
        &self.x
    }

    /// The y-numerator.
    pub fn y(&self) -> &BigInt {
        &self.y
    }

    /// The positive denominator.
    pub fn z(&self) -> &BigInt {
        &self.z
    }

    /// Converts to the approximate floating representation.
    pub fn to_float(&self) -> FloatPoint {
        let z = self.z.to_f64().unwrap_or(f64::INFINITY);
        FloatPoint::new(
            self.x.to_f64().unwrap_or(f64::INFINITY) / z,
            self.y.to_f64().unwrap_or(f64::INFINITY) / z,
        )
    }

    /// Returns the lattice point equal to this point, if there is one.
    pub fn to_int(&self) -> Option<Point> {
        let (qx, rx) = self.x.div_mod_floor(&self.z);
        if !rx.is_zero() {
            return None;
        }
        let (qy, ry) = self.y.div_mod_floor(&self.z);
        if !ry.is_zero() {
            return None;
        }
        Some(Point::new(qx.to_i64()?, qy.to_i64()?))
    }

    /// Rounds to the nearest lattice point, exactly.
    pub fn round(&self) -> Point {
        fn round_coord(n: &BigInt, z: &BigInt) -> i64 {
            let (q, r) = n.div_mod_floor(z);
            // `r` is in `[0, z)`; round half up.
            let q = if &(r * 2) >= z { q + 1 } else { q };
            q.to_i64().unwrap_or(i64::MAX)
        }
        Point::new(round_coord(&self.x, &self.z), round_coord(&self.y, &self.z))
    }

    /// The exact side of `line` on which this point lies.
    pub fn side_of(&self, line: &Line) -> Side {
        let a = line.a();
        let d = line.direction();
        let dx = BigInt::from(d.x());
        let dy = BigInt::from(d.y());
        let det = dx * (&self.y - BigInt::from(a.y) * &self.z)
            - dy * (&self.x - BigInt::from(a.x) * &self.z);
        // The denominator is positive, so the determinant sign is the side.
        Side::of_sign(match det.sign() {
            num_bigint::Sign::Plus => 1,
            num_bigint::Sign::Minus => -1,
            num_bigint::Sign::NoSign => 0,
        })
    }

    /// The coordinates as arbitrary-precision rationals.
    pub fn to_ratio(&self) -> (BigRational, BigRational) {
        (
            BigRational::new(self.x.clone(), self.z.clone()),
            BigRational::new(self.y.clone(), self.z.clone()),
        )
    }

    /// Compares the x-coordinate with the x-coordinate of `other`, exactly.
    pub fn cmp_x(&self, other: &RationalPoint) -> std::cmp::Ordering {
        (&self.x * &other.z).cmp(&(&other.x * &self.z))
    }

    /// Compares the y-coordinate with the y-coordinate of `other`, exactly.
    pub fn cmp_y(&self, other: &RationalPoint) -> std::cmp::Ordering {
        (&self.y * &other.z).cmp(&(&other.y * &self.z))
    }
}

impl PartialEq for RationalPoint {
    /// Two rational points are equal iff their cross products against the
    /// shared denominators vanish.
    fn eq(&self, other: &Self) -> bool {
        &self.x * &other.z == &other.x * &self.z && &self.y * &other.z == &other.y * &self.z
    }
}

impl Eq for RationalPoint {}

impl From<Point> for RationalPoint {
    fn from(p: Point) -> Self {
        Self {
            x: BigInt::from(p.x),
            y: BigInt::from(p.y),
            z: BigInt::from(1),
        }
    }
}

/// An exact point: on the lattice, or rational.
///
/// Dispatch is by pattern matching on the tag; there is no virtual point
/// hierarchy. Equality is numeric, regardless of representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExactPoint {
    /// A lattice point.
    Int(Point),
    /// A rational point.
    Rational(RationalPoint),
}

impl ExactPoint {
    /// Converts to the approximate floating representation.
    pub fn to_float(&self) -> FloatPoint {
        match self {
            Self::Int(p) => p.to_float(),
            Self::Rational(r) => r.to_float(),
        }
    }

    /// The coordinates as arbitrary-precision rationals.
    pub fn to_ratio(&self) -> (BigRational, BigRational) {
        match self {
            Self::Int(p) => (
                BigRational::from_integer(BigInt::from(p.x)),
                BigRational::from_integer(BigInt::from(p.y)),
            ),
            Self::Rational(r) => r.to_ratio(),
        }
    }

    /// Returns true if the point lies on the lattice.
    ///
    /// A [`ExactPoint::Rational`] whose denominator divides both
    /// numerators counts as a lattice point.
    pub fn is_int(&self) -> bool {
        match self {
            Self::Int(_) => true,
            Self::Rational(r) => r.to_int().is_some(),
        }
    }

    /// Rounds to the nearest lattice point, exactly.
    pub fn round(&self) -> Point {
        match self {
            Self::Int(p) => *p,
            Self::Rational(r) => r.round(),
        }
    }

    /// The exact side of `line` on which this point lies.
    pub fn side_of(&self, line: &Line) -> Side {
        match self {
            Self::Int(p) => line.side_of(*p),
            Self::Rational(r) => r.side_of(line),
        }
    }

    /// Compares x-coordinates, exactly.
    pub fn cmp_x(&self, other: &ExactPoint) -> std::cmp::Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.x.cmp(&b.x),
            _ => self.to_rational().cmp_x(&other.to_rational()),
        }
    }

    /// Compares y-coordinates, exactly.
    pub fn cmp_y(&self, other: &ExactPoint) -> std::cmp::Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.y.cmp(&b.y),
            _ => self.to_rational().cmp_y(&other.to_rational()),
        }
    }

    /// Compares by y-coordinate first, then x-coordinate.
    pub fn cmp_y_x(&self, other: &ExactPoint) -> std::cmp::Ordering {
        self.cmp_y(other).then_with(|| self.cmp_x(other))
    }

    /// The orientation of the turn `a -> b -> c`, exactly.
    ///
    /// Returns [`Side::Left`] for a counter-clockwise turn at `b`.
    pub fn turn(a: &ExactPoint, b: &ExactPoint, c: &ExactPoint) -> Side {
        if let (Self::Int(a), Self::Int(b), Self::Int(c)) = (a, b, c) {
            return (*b - *a).side_of(*c - *b);
        }
        let (ax, ay, az) = a.to_rational().into_parts();
        let (bx, by, bz) = b.to_rational().into_parts();
        let (cx, cy, cz) = c.to_rational().into_parts();
        // Sign of the 3x3 homogeneous determinant; all denominators are
        // positive, so no sign correction is needed.
        let det = (&bx * &cy - &by * &cx) * &az - (&ax * &cy - &ay * &cx) * &bz
            + (&ax * &by - &ay * &bx) * &cz;
        Side::of_sign(match det.sign() {
            num_bigint::Sign::Plus => 1,
            num_bigint::Sign::Minus => -1,
            num_bigint::Sign::NoSign => 0,
        })
    }

    fn to_rational(&self) -> RationalPoint {
        match self {
            Self::Int(p) => RationalPoint::from(*p),
            Self::Rational(r) => r.clone(),
        }
    }

    /// `floor(x)`, exactly.
    pub fn floor_x(&self) -> i64 {
        match self {
            Self::Int(p) => p.x,
            Self::Rational(r) => floor_div(&r.x, &r.z),
        }
    }

    /// `ceil(x)`, exactly.
    pub fn ceil_x(&self) -> i64 {
        match self {
            Self::Int(p) => p.x,
            Self::Rational(r) => ceil_div(&r.x, &r.z),
        }
    }

    /// `floor(y)`, exactly.
    pub fn floor_y(&self) -> i64 {
        match self {
            Self::Int(p) => p.y,
            Self::Rational(r) => floor_div(&r.y, &r.z),
        }
    }

    /// `ceil(y)`, exactly.
    pub fn ceil_y(&self) -> i64 {
        match self {
            Self::Int(p) => p.y,
            Self::Rational(r) => ceil_div(&r.y, &r.z),
        }
    }

    /// `floor(x - y)`, exactly.
    pub fn floor_diff(&self) -> i64 {
        match self {
            Self::Int(p) => p.x - p.y,
            Self::Rational(r) => floor_div(&(&r.x - &r.y), &r.z),
        }
    }

    /// `ceil(x - y)`, exactly.
    pub fn ceil_diff(&self) -> i64 {
        match self {
            Self::Int(p) => p.x - p.y,
            Self::Rational(r) => ceil_div(&(&r.x - &r.y), &r.z),
        }
    }

    /// `floor(x + y)`, exactly.
    pub fn floor_sum(&self) -> i64 {
        match self {
            Self::Int(p) => p.x + p.y,
            Self::Rational(r) => floor_div(&(&r.x + &r.y), &r.z),
        }
    }

    /// `ceil(x + y)`, exactly.
    pub fn ceil_sum(&self) -> i64 {
        match self {
            Self::Int(p) => p.x + p.y,
            Self::Rational(r) => ceil_div(&(&r.x + &r.y), &r.z),
        }
    }
}

impl Transform for RationalPoint {
    fn translate(self, v: Vector) -> Self {
        let x = self.x + BigInt::from(v.x) * &self.z;
        let y = self.y + BigInt::from(v.y) * &self.z;
        RationalPoint { x, y, z: self.z }
    }

    fn turn_90(self, rotation: Rotation, pole: Point) -> Self {
        let px = BigInt::from(pole.x) * &self.z;
        let py = BigInt::from(pole.y) * &self.z;
        let dx = self.x - &px;
        let dy = self.y - &py;
        let (rx, ry) = match rotation {
            Rotation::R0 => (dx, dy),
            Rotation::R90 => (-dy, dx),
            Rotation::R180 => (-dx, -dy),
            Rotation::R270 => (dy, -dx),
        };
        RationalPoint {
            x: px + rx,
            y: py + ry,
            z: self.z,
        }
    }

    fn mirror_vertical(self, pole: Point) -> Self {
        let x = BigInt::from(2 * pole.x) * &self.z - self.x;
        RationalPoint {
            x,
            y: self.y,
            z: self.z,
        }
    }

    fn mirror_horizontal(self, pole: Point) -> Self {
        let y = BigInt::from(2 * pole.y) * &self.z - self.y;
        RationalPoint {
            x: self.x,
            y,
            z: self.z,
        }
    }
}

impl Transform for ExactPoint {
    fn translate(self, v: Vector) -> Self {
        match self {
            Self::Int(p) => Self::Int(p.translate(v)),
            Self::Rational(r) => Self::Rational(r.translate(v)),
        }
    }

    fn turn_90(self, rotation: Rotation, pole: Point) -> Self {
        match self {
            Self::Int(p) => Self::Int(p.turn_90(rotation, pole)),
            Self::Rational(r) => Self::Rational(r.turn_90(rotation, pole)),
        }
    }

    fn mirror_vertical(self, pole: Point) -> Self {
        match self {
            Self::Int(p) => Self::Int(p.mirror_vertical(pole)),
            Self::Rational(r) => Self::Rational(r.mirror_vertical(pole)),
        }
    }

    fn mirror_horizontal(self, pole: Point) -> Self {
        match self {
            Self::Int(p) => Self::Int(p.mirror_horizontal(pole)),
            Self::Rational(r) => Self::Rational(r.mirror_horizontal(pole)),
        }
    }
}

fn floor_div(n: &BigInt, z: &BigInt) -> i64 {
    n.div_floor(z).to_i64().unwrap_or(i64::MAX)
}

fn ceil_div(n: &BigInt, z: &BigInt) -> i64 {
    (-(-n).div_floor(z)).to_i64().unwrap_or(i64::MIN)
}

impl RationalPoint {
    fn into_parts(self) -> (BigInt, BigInt, BigInt) {
        (self.x, self.y, self.z)
    }
}

impl PartialEq for ExactPoint {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Rational(a), Self::Rational(b)) => a == b,
            (Self::Int(a), Self::Rational(b)) | (Self::Rational(b), Self::Int(a)) => {
                b == &RationalPoint::from(*a)
            }
        }
    }
}

impl Eq for ExactPoint {}

impl From<Point> for ExactPoint {
    fn from(p: Point) -> Self {
        Self::Int(p)
    }
}

impl From<RationalPoint> for ExactPoint {
    fn from(r: RationalPoint) -> Self {
        Self::Rational(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rational(x: i64, y: i64, z: i64) -> RationalPoint {
        RationalPoint::new(BigInt::from(x), BigInt::from(y), BigInt::from(z))
    }

    #[test]
    fn equality_is_cross_multiplied() {
        assert_eq!(rational(1, 2, 2), rational(2, 4, 4));
        assert_ne!(rational(1, 2, 2), rational(1, 2, 3));
    }

    #[test]
    fn negative_denominator_is_normalized() {
        let p = RationalPoint::new(BigInt::from(3), BigInt::from(-4), BigInt::from(-2));
        assert_eq!(p, rational(-3, 4, 2));
    }

    #[test]
    fn integer_detection_and_rounding() {
        assert_eq!(rational(6, -4, 2).to_int(), Some(Point::new(3, -2)));
        assert_eq!(rational(1, 0, 2).to_int(), None);
        assert_eq!(rational(1, 3, 2).round(), Point::new(1, 2));
        assert_eq!(rational(-1, -3, 2).round(), Point::new(0, -1));
    }

    #[test]
    fn exact_turn_orientation() {
        let a = ExactPoint::from(Point::new(0, 0));
        let b = ExactPoint::from(rational(5, 0, 1));
        let c = ExactPoint::from(rational(10, 1, 2));
        assert_eq!(ExactPoint::turn(&a, &b, &c), Side::Left);
        assert_eq!(ExactPoint::turn(&c, &b, &a), Side::Right);
        assert_eq!(ExactPoint::turn(&a, &c, &b), Side::Right);
        let d = ExactPoint::from(Point::new(10, 0));
        assert_eq!(ExactPoint::turn(&a, &b, &d), Side::Collinear);
    }

    #[test]
    fn ratio_coordinates() {
        let (x, y) = ExactPoint::from(rational(1, 3, 2)).to_ratio();
        assert_eq!(x, BigRational::new(BigInt::from(1), BigInt::from(2)));
        assert_eq!(x + y, BigRational::from_integer(BigInt::from(2)));
    }

    #[test]
    fn coordinate_comparisons_cross_representation() {
        let half = ExactPoint::from(rational(1, 1, 2));
        let one = ExactPoint::from(Point::new(1, 1));
        assert!(half.cmp_x(&one).is_lt());
        assert!(one.cmp_y(&half).is_gt());
        assert!(half.cmp_y_x(&one).is_lt());
    }
}
