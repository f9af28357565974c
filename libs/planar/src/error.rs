//! Error types for degenerate or unsolvable geometric computations.
//!
//! The kernel never panics on malformed *geometry*, only on malformed
//! construction arguments (documented per constructor). Degenerate exact
//! computations and failed decompositions surface as the typed errors in
//! this module so that callers can decide whether to retry, skip, or abort.

use thiserror::Error;

/// Two lines have the same or opposite direction, so their intersection
/// point does not exist.
///
/// Returned by [`Line::intersection`](crate::line::Line::intersection).
/// The approximate layer reports the same condition with the
/// [`FloatPoint::NAN`](crate::float_point::FloatPoint::NAN) sentinel instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("parallel lines do not intersect")]
pub struct ParallelLines;

/// Convex decomposition failed on an assumption violation.
///
/// These conditions are recoverable by the caller (skip the offending
/// outline, abort the larger operation, ...); they are never panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecomposeError {
    /// The outline crosses itself, so no convex partition exists.
    #[error("outline is self-intersecting")]
    SelfIntersecting,
    /// No axis-aligned division segment satisfying the convexity
    /// constraints was found at the given concave corner.
    #[error("no valid division segment at concave corner {corner}")]
    NoValidDivision {
        /// Index of the concave corner in the canonical corner order.
        corner: usize,
    },
}
