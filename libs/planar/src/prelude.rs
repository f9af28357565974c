//! The public surface of the crate in one import.

pub use crate::area::PolygonArea;
pub use crate::bbox::Bounded;
pub use crate::contains::{Containment, Contains};
pub use crate::dimension::Dimension;
pub use crate::direction::{Direction, Exactness};
pub use crate::error::{DecomposeError, ParallelLines};
pub use crate::float_point::FloatPoint;
pub use crate::int_box::IntBox;
pub use crate::line::Line;
pub use crate::octagon::{IntOctagon, OctagonBuilder};
pub use crate::point::{Point, CRITICAL_MAGNITUDE};
pub use crate::polygon::{Polygon, DEFAULT_SEED};
pub use crate::polyline::Polyline;
pub use crate::rational::{ExactPoint, RationalPoint};
pub use crate::side::Side;
pub use crate::simplex::Simplex;
pub use crate::tile::TileShape;
pub use crate::transform::{Rotation, Transform};
pub use crate::vector::Vector;
