//! The side of a directed line on which a point lies.

use serde::{Deserialize, Serialize};

/// Orientation of a point relative to a directed line.
///
/// Derived from the sign of a 2x2 determinant, so it is exact for lattice
/// and rational inputs. The float layer derives it through an explicit
/// tolerance instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub enum Side {
    /// The point is on the left of the directed line.
    Left,
    /// The point is on the right of the directed line.
    Right,
    /// The point is on the line.
    Collinear,
}

impl Side {
    /// Classifies the sign of a cross-product determinant.
    ///
    /// Positive determinants put the point on the left, negative on the
    /// right, zero on the line.
    ///
    /// # Example
    ///
    /// ```
    /// # use planar::prelude::*;
    /// assert_eq!(Side::of_sign(3), Side::Left);
    /// assert_eq!(Side::of_sign(-1), Side::Right);
    /// assert_eq!(Side::of_sign(0), Side::Collinear);
    /// ```
    pub fn of_sign(det: i128) -> Self {
        match det {
            d if d > 0 => Self::Left,
            d if d < 0 => Self::Right,
            _ => Self::Collinear,
        }
    }

    /// Returns the mirrored side.
    ///
    /// [`Side::Collinear`] is its own mirror image.
    pub const fn negate(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Collinear => Self::Collinear,
        }
    }

    /// Returns true if the point is strictly off the line.
    #[inline]
    pub const fn is_strict(&self) -> bool {
        !matches!(self, Self::Collinear)
    }
}

impl std::ops::Not for Side {
    type Output = Self;
    /// Returns the mirrored side.
    fn not(self) -> Self::Output {
        self.negate()
    }
}
