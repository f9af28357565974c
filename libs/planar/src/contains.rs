//! Point containment with boundary classification.

use serde::{Deserialize, Serialize};

/// Where a point lies relative to a closed region.
#[derive(
    Debug, Default, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq, Ord, PartialOrd,
)]
pub enum Containment {
    /// Strictly outside the region.
    #[default]
    Outside,
    /// On the region's boundary.
    Border,
    /// Strictly inside the region.
    Inside,
}

/// Point-in-region queries.
///
/// Regions are closed: the boundary belongs to the region, and
/// [`Contains::contains`] reflects that. Callers that need the open
/// interior use [`Contains::contains_inside`].
pub trait Contains<T> {
    /// Classifies where `other` lies relative to this region.
    fn containment(&self, other: &T) -> Containment;

    /// Returns true if `other` is inside or on the boundary.
    #[inline]
    fn contains(&self, other: &T) -> bool {
        !matches!(self.containment(other), Containment::Outside)
    }

    /// Returns true if `other` is strictly inside.
    #[inline]
    fn contains_inside(&self, other: &T) -> bool {
        matches!(self.containment(other), Containment::Inside)
    }

    /// Returns true if `other` is strictly outside.
    #[inline]
    fn is_outside(&self, other: &T) -> bool {
        matches!(self.containment(other), Containment::Outside)
    }
}
