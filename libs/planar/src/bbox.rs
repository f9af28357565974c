//! Axis-aligned and octagonal bounding regions.

use crate::int_box::IntBox;
use crate::octagon::IntOctagon;

/// A shape with computable bounding regions.
///
/// # Examples
///
/// ```
/// # use planar::prelude::*;
/// let b = IntBox::from_sides(0, 0, 100, 200);
/// assert_eq!(b.bounding_box(), b);
/// ```
pub trait Bounded {
    /// Computes the axis-aligned bounding box.
    ///
    /// Empty shapes return [`IntBox::EMPTY`].
    fn bounding_box(&self) -> IntBox;

    /// Computes the bounding octagon (axis and 45-degree bounds).
    ///
    /// The default implementation derives it from the bounding box;
    /// shapes that know their diagonal extents override it with a
    /// tighter result.
    fn bounding_octagon(&self) -> IntOctagon {
        self.bounding_box().to_octagon()
    }
}

impl<T> Bounded for &T
where
    T: Bounded + ?Sized,
{
    fn bounding_box(&self) -> IntBox {
        T::bounding_box(*self)
    }

    fn bounding_octagon(&self) -> IntOctagon {
        T::bounding_octagon(*self)
    }
}

impl<T: Bounded> Bounded for [T] {
    fn bounding_box(&self) -> IntBox {
        self.iter()
            .fold(IntBox::EMPTY, |acc, item| acc.union(item.bounding_box()))
    }

    fn bounding_octagon(&self) -> IntOctagon {
        self.iter().fold(IntOctagon::EMPTY, |acc, item| {
            acc.union(item.bounding_octagon())
        })
    }
}

impl<T: Bounded> Bounded for Vec<T> {
    fn bounding_box(&self) -> IntBox {
        self.as_slice().bounding_box()
    }

    fn bounding_octagon(&self) -> IntOctagon {
        self.as_slice().bounding_octagon()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_of_collections() {
        let boxes = vec![
            IntBox::from_sides(0, 0, 100, 200),
            IntBox::from_sides(-50, 20, 90, 250),
        ];
        assert_eq!(boxes.bounding_box(), IntBox::from_sides(-50, 0, 100, 250));
        assert_eq!(Vec::<IntBox>::new().bounding_box(), IntBox::EMPTY);
    }
}
