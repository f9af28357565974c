//! Topological size classes of shapes.

use serde::{Deserialize, Serialize};

/// The topological extent of a shape.
///
/// The derived ordering is total: `Empty < Point < Line < Area`.
///
/// # Example
///
/// ```
/// # use planar::prelude::*;
/// assert!(Dimension::Empty < Dimension::Point);
/// assert!(Dimension::Line < Dimension::Area);
/// ```
#[derive(
    Debug, Default, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord,
)]
pub enum Dimension {
    /// The shape contains no point.
    #[default]
    Empty,
    /// The shape degenerates to a single point.
    Point,
    /// The shape degenerates to a line or line segment.
    Line,
    /// The shape has a two-dimensional interior.
    Area,
}

impl Dimension {
    /// Returns true if the shape has a two-dimensional interior.
    #[inline]
    pub fn is_area(&self) -> bool {
        matches!(self, Self::Area)
    }

    /// Returns true if the shape contains at least one point.
    #[inline]
    pub fn is_nonempty(&self) -> bool {
        !matches!(self, Self::Empty)
    }
}
