//! Axis-aligned boxes with lattice corners.

use serde::{Deserialize, Serialize};

use crate::bbox::Bounded;
use crate::contains::{Containment, Contains};
use crate::dimension::Dimension;
use crate::line::Line;
use crate::octagon::IntOctagon;
use crate::point::{Point, CRITICAL_MAGNITUDE};
use crate::simplex::Simplex;
use crate::transform::{Rotation, Transform};
use crate::vector::Vector;

/// An axis-aligned rectangle between a lower-left and an upper-right
/// lattice corner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub struct IntBox {
    /// The lower-left corner.
    pub ll: Point,
    /// The upper-right corner.
    pub ur: Point,
}

impl IntBox {
    /// The canonical empty box.
    ///
    /// Any box whose corners cross counts as empty; operations that can
    /// produce an empty result normalize to this value.
    pub const EMPTY: IntBox = IntBox {
        ll: Point::new(CRITICAL_MAGNITUDE, CRITICAL_MAGNITUDE),
        ur: Point::new(-CRITICAL_MAGNITUDE, -CRITICAL_MAGNITUDE),
    };

    /// Creates a box from its corner points.
    pub const fn new(ll: Point, ur: Point) -> Self {
        Self { ll, ur }
    }

    /// Creates a box from its left, bottom, right, and top edge
    /// coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// # use planar::prelude::*;
    /// let b = IntBox::from_sides(0, -2, 10, 8);
    /// assert_eq!(b.width(), 10);
    /// assert_eq!(b.height(), 10);
    /// ```
    pub const fn from_sides(left: i64, bottom: i64, right: i64, top: i64) -> Self {
        Self {
            ll: Point::new(left, bottom),
            ur: Point::new(right, top),
        }
    }

    /// Creates a zero-area box containing exactly `p`.
    pub const fn from_point(p: Point) -> Self {
        Self { ll: p, ur: p }
    }

    /// Returns true if the box contains no point.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.ll.x > self.ur.x || self.ll.y > self.ur.y
    }

    /// The horizontal extent.
    #[inline]
    pub const fn width(&self) -> i64 {
        self.ur.x - self.ll.x
    }

    /// The vertical extent.
    #[inline]
    pub const fn height(&self) -> i64 {
        self.ur.y - self.ll.y
    }

    /// The topological extent of the box.
    pub fn dimension(&self) -> Dimension {
        if self.is_empty() {
            Dimension::Empty
        } else if self.ll == self.ur {
            Dimension::Point
        } else if self.ll.x == self.ur.x || self.ll.y == self.ur.y {
            Dimension::Line
        } else {
            Dimension::Area
        }
    }

    /// The enclosed area.
    pub fn area(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.width() as f64 * self.height() as f64
    }

    /// Half the circumference; the greedy cutout optimization minimizes
    /// this over candidate partitions.
    pub fn half_perimeter(&self) -> i64 {
        if self.is_empty() {
            return 0;
        }
        self.width() + self.height()
    }

    /// The center, rounded down to the lattice.
    pub fn center(&self) -> Point {
        Point::new(
            (self.ll.x + self.ur.x).div_euclid(2),
            (self.ll.y + self.ur.y).div_euclid(2),
        )
    }

    /// The corner with the given index: 0 is the lower-left corner, then
    /// counter-clockwise.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`.
    pub fn corner(&self, index: usize) -> Point {
        match index {
            0 => self.ll,
            1 => Point::new(self.ur.x, self.ll.y),
            2 => self.ur,
            3 => Point::new(self.ll.x, self.ur.y),
            _ => panic!("box corner index out of range: {index}"),
        }
    }

    /// All four corners, counter-clockwise from the lower-left.
    pub fn corners(&self) -> [Point; 4] {
        [self.corner(0), self.corner(1), self.corner(2), self.corner(3)]
    }

    /// The smallest box containing both `self` and `other`.
    pub fn union(&self, other: IntBox) -> IntBox {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return *self;
        }
        IntBox::new(
            Point::new(self.ll.x.min(other.ll.x), self.ll.y.min(other.ll.y)),
            Point::new(self.ur.x.max(other.ur.x), self.ur.y.max(other.ur.y)),
        )
    }

    /// The intersection of two boxes.
    pub fn intersect(&self, other: IntBox) -> IntBox {
        let result = IntBox::new(
            Point::new(self.ll.x.max(other.ll.x), self.ll.y.max(other.ll.y)),
            Point::new(self.ur.x.min(other.ur.x), self.ur.y.min(other.ur.y)),
        );
        if result.is_empty() {
            IntBox::EMPTY
        } else {
            result
        }
    }

    /// Returns true if the boxes share at least one point.
    pub fn intersects(&self, other: IntBox) -> bool {
        !self.intersect(other).is_empty()
    }

    /// The box grown by `amount` on every side (shrunk for negative
    /// amounts; collapses to [`IntBox::EMPTY`] when the sides cross).
    pub fn expand(&self, amount: i64) -> IntBox {
        if self.is_empty() {
            return IntBox::EMPTY;
        }
        let result = IntBox::from_sides(
            self.ll.x - amount,
            self.ll.y - amount,
            self.ur.x + amount,
            self.ur.y + amount,
        );
        if result.is_empty() {
            IntBox::EMPTY
        } else {
            result
        }
    }

    /// The equivalent octagon, with tight diagonal bounds.
    pub fn to_octagon(&self) -> IntOctagon {
        if self.is_empty() {
            return IntOctagon::EMPTY;
        }
        IntOctagon::new(
            self.ll.x,
            self.ll.y,
            self.ur.x,
            self.ur.y,
            self.ll.x - self.ur.y,
            self.ur.x - self.ll.y,
            self.ll.x + self.ll.y,
            self.ur.x + self.ur.y,
        )
    }

    /// The equivalent simplex.
    pub fn to_simplex(&self) -> Simplex {
        if self.is_empty() {
            return Simplex::empty();
        }
        Simplex::new(self.border_lines().to_vec())
    }

    /// The four boundary lines, sorted by ascending direction, each with
    /// the interior on its left.
    pub fn border_lines(&self) -> [Line; 4] {
        [
            Line::horizontal(self.ll.y),
            Line::vertical(self.ur.x),
            Line::horizontal(self.ur.y).opposite(),
            Line::vertical(self.ll.x).opposite(),
        ]
    }

    /// Subtracts `hole` from this box, partitioning the difference into
    /// up to four disjoint boxes.
    ///
    /// Each corner block of the surrounding ring is attached to the
    /// neighboring strip that yields the smaller combined circumference,
    /// a greedy pairwise optimization decided per corner.
    pub fn cutout(&self, hole: &IntBox) -> Vec<IntBox> {
        if self.is_empty() {
            return Vec::new();
        }
        let c = self.intersect(*hole);
        if !c.dimension().is_area() {
            return vec![*self];
        }
        let (alx, aly, arx, auy) = (self.ll.x, self.ll.y, self.ur.x, self.ur.y);
        let (clx, cly, crx, cuy) = (c.ll.x, c.ll.y, c.ur.x, c.ur.y);

        // Corner blocks join the thicker of their two adjacent strips.
        let nw_vertical = (auy - cuy) < (clx - alx);
        let sw_vertical = (cly - aly) < (clx - alx);
        let ne_vertical = (auy - cuy) < (arx - crx);
        let se_vertical = (cly - aly) < (arx - crx);

        let left = IntBox::from_sides(
            alx,
            if sw_vertical { aly } else { cly },
            clx,
            if nw_vertical { auy } else { cuy },
        );
        let right = IntBox::from_sides(
            crx,
            if se_vertical { aly } else { cly },
            arx,
            if ne_vertical { auy } else { cuy },
        );
        let bottom = IntBox::from_sides(
            if sw_vertical { clx } else { alx },
            aly,
            if se_vertical { crx } else { arx },
            cly,
        );
        let top = IntBox::from_sides(
            if nw_vertical { clx } else { alx },
            cuy,
            if ne_vertical { crx } else { arx },
            auy,
        );

        [left, right, bottom, top]
            .into_iter()
            .filter(|piece| piece.dimension().is_area())
            .collect()
    }
}

impl Bounded for IntBox {
    fn bounding_box(&self) -> IntBox {
        *self
    }

    fn bounding_octagon(&self) -> IntOctagon {
        self.to_octagon()
    }
}

impl Contains<Point> for IntBox {
    fn containment(&self, p: &Point) -> Containment {
        if p.x < self.ll.x || p.x > self.ur.x || p.y < self.ll.y || p.y > self.ur.y {
            Containment::Outside
        } else if p.x == self.ll.x || p.x == self.ur.x || p.y == self.ll.y || p.y == self.ur.y {
            Containment::Border
        } else {
            Containment::Inside
        }
    }
}

impl Transform for IntBox {
    fn translate(self, v: Vector) -> Self {
        if self.is_empty() {
            return IntBox::EMPTY;
        }
        IntBox::new(self.ll + v, self.ur + v)
    }

    fn turn_90(self, rotation: Rotation, pole: Point) -> Self {
        if self.is_empty() {
            return IntBox::EMPTY;
        }
        let a = self.ll.turn_90(rotation, pole);
        let b = self.ur.turn_90(rotation, pole);
        IntBox::new(
            Point::new(a.x.min(b.x), a.y.min(b.y)),
            Point::new(a.x.max(b.x), a.y.max(b.y)),
        )
    }

    fn mirror_vertical(self, pole: Point) -> Self {
        if self.is_empty() {
            return IntBox::EMPTY;
        }
        IntBox::from_sides(
            2 * pole.x - self.ur.x,
            self.ll.y,
            2 * pole.x - self.ll.x,
            self.ur.y,
        )
    }

    fn mirror_horizontal(self, pole: Point) -> Self {
        if self.is_empty() {
            return IntBox::EMPTY;
        }
        IntBox::from_sides(
            self.ll.x,
            2 * pole.y - self.ur.y,
            self.ur.x,
            2 * pole.y - self.ll.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_and_degeneracies() {
        assert_eq!(IntBox::EMPTY.dimension(), Dimension::Empty);
        assert_eq!(
            IntBox::from_point(Point::new(3, 3)).dimension(),
            Dimension::Point
        );
        assert_eq!(IntBox::from_sides(0, 0, 0, 5).dimension(), Dimension::Line);
        assert_eq!(IntBox::from_sides(0, 0, 4, 5).dimension(), Dimension::Area);
    }

    #[test]
    fn intersection_and_union() {
        let a = IntBox::from_sides(0, 0, 10, 10);
        let b = IntBox::from_sides(5, 5, 15, 15);
        assert_eq!(a.intersect(b), IntBox::from_sides(5, 5, 10, 10));
        assert_eq!(a.union(b), IntBox::from_sides(0, 0, 15, 15));
        let far = IntBox::from_sides(20, 20, 30, 30);
        assert_eq!(a.intersect(far), IntBox::EMPTY);
        assert!(!a.intersects(far));
    }

    #[test]
    fn containment_classification() {
        let b = IntBox::from_sides(0, 0, 10, 10);
        assert_eq!(b.containment(&Point::new(5, 5)), Containment::Inside);
        assert_eq!(b.containment(&Point::new(0, 5)), Containment::Border);
        assert_eq!(b.containment(&Point::new(10, 10)), Containment::Border);
        assert_eq!(b.containment(&Point::new(11, 5)), Containment::Outside);
        assert!(b.contains(&Point::new(0, 0)));
        assert!(!b.contains_inside(&Point::new(0, 0)));
    }

    #[test]
    fn cutout_center_hole_yields_four_boxes() {
        let a = IntBox::from_sides(0, 0, 10, 10);
        let hole = IntBox::from_sides(3, 3, 6, 6);
        let pieces = a.cutout(&hole);
        assert_eq!(pieces.len(), 4);
        let total: f64 = pieces.iter().map(|p| p.area()).sum();
        assert_eq!(total, 91.0);
        for (i, p) in pieces.iter().enumerate() {
            for q in &pieces[i + 1..] {
                assert!(!p.intersect(*q).dimension().is_area(), "{p:?} overlaps {q:?}");
            }
            assert_eq!(a.intersect(*p), *p, "piece {p:?} leaks outside");
            assert!(!p.intersect(hole).dimension().is_area());
        }
    }

    #[test]
    fn cutout_of_disjoint_hole_is_identity() {
        let a = IntBox::from_sides(0, 0, 10, 10);
        let hole = IntBox::from_sides(20, 20, 30, 30);
        assert_eq!(a.cutout(&hole), vec![a]);
        // A hole that only touches the border removes nothing.
        let touching = IntBox::from_sides(10, 0, 20, 10);
        assert_eq!(a.cutout(&touching), vec![a]);
    }

    #[test]
    fn cutout_of_overlapping_edge_hole() {
        let a = IntBox::from_sides(0, 0, 10, 10);
        // Hole overlapping the right edge: no right strip survives.
        let hole = IntBox::from_sides(7, 2, 15, 8);
        let pieces = a.cutout(&hole);
        let total: f64 = pieces.iter().map(|p| p.area()).sum();
        assert_eq!(total, 100.0 - 3.0 * 6.0);
        assert!(pieces.len() <= 3);
    }

    #[test]
    fn expand_and_collapse() {
        let b = IntBox::from_sides(0, 0, 10, 4);
        assert_eq!(b.expand(2), IntBox::from_sides(-2, -2, 12, 6));
        assert_eq!(b.expand(-3), IntBox::EMPTY);
    }

    #[test]
    fn turn_and_mirror() {
        let b = IntBox::from_sides(0, 0, 4, 2);
        let pole = Point::zero();
        assert_eq!(
            b.turn_90(Rotation::R90, pole),
            IntBox::from_sides(-2, 0, 0, 4)
        );
        assert_eq!(
            b.mirror_vertical(pole),
            IntBox::from_sides(-4, 0, 0, 2)
        );
        assert_eq!(
            b.mirror_horizontal(pole),
            IntBox::from_sides(0, -2, 4, 0)
        );
    }
}
