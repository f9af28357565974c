//! Octagons with axis-parallel and 45-degree boundaries.
//!
//! An [`IntOctagon`] stores eight scalar bounds: the axis bounds
//! `lx <= x <= rx` and `ly <= y <= uy`, and the diagonal bounds
//! `ulx <= x - y <= lrx` and `llx <= x + y <= urx`. Each diagonal bound
//! is the intercept of its boundary line with the x-axis. The eight
//! constraints are mutually dependent, so canonicalization is a
//! fixed-point relaxation, not a single-pass formula.

use serde::{Deserialize, Serialize};

use crate::bbox::Bounded;
use crate::contains::{Containment, Contains};
use crate::dimension::Dimension;
use crate::direction::Direction;
use crate::int_box::IntBox;
use crate::line::Line;
use crate::point::{Point, CRITICAL_MAGNITUDE};
use crate::simplex::Simplex;
use crate::transform::{Rotation, Transform};
use crate::vector::Vector;

const SQRT2: f64 = std::f64::consts::SQRT_2;

fn div2_floor(a: i64) -> i64 {
    a.div_euclid(2)
}

fn div2_ceil(a: i64) -> i64 {
    (a + 1).div_euclid(2)
}

/// A convex region bounded by axis-parallel and 45-degree lines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub struct IntOctagon {
    /// Lower bound on x.
    pub lx: i64,
    /// Lower bound on y.
    pub ly: i64,
    /// Upper bound on x.
    pub rx: i64,
    /// Upper bound on y.
    pub uy: i64,
    /// Lower bound on x - y (the north-west boundary's x-intercept).
    pub ulx: i64,
    /// Upper bound on x - y (the south-east boundary's x-intercept).
    pub lrx: i64,
    /// Lower bound on x + y (the south-west boundary's x-intercept).
    pub llx: i64,
    /// Upper bound on x + y (the north-east boundary's x-intercept).
    pub urx: i64,
}

impl IntOctagon {
    /// The canonical empty octagon.
    pub const EMPTY: IntOctagon = IntOctagon {
        lx: CRITICAL_MAGNITUDE,
        ly: CRITICAL_MAGNITUDE,
        rx: -CRITICAL_MAGNITUDE,
        uy: -CRITICAL_MAGNITUDE,
        ulx: CRITICAL_MAGNITUDE,
        lrx: -CRITICAL_MAGNITUDE,
        llx: CRITICAL_MAGNITUDE,
        urx: -CRITICAL_MAGNITUDE,
    };

    /// Creates an octagon from its eight bounds.
    ///
    /// The bounds are taken as-is; call [`IntOctagon::normalize`] to
    /// tighten them against each other.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        lx: i64,
        ly: i64,
        rx: i64,
        uy: i64,
        ulx: i64,
        lrx: i64,
        llx: i64,
        urx: i64,
    ) -> Self {
        Self {
            lx,
            ly,
            rx,
            uy,
            ulx,
            lrx,
            llx,
            urx,
        }
    }

    /// Returns true if the octagon contains no point.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.lx > self.rx || self.ly > self.uy || self.ulx > self.lrx || self.llx > self.urx
    }

    /// Tightens every bound against the other seven until they are
    /// mutually consistent, or collapses to [`IntOctagon::EMPTY`] when
    /// two bounds cross.
    ///
    /// Normalization is idempotent: normalizing a normalized octagon is a
    /// no-op.
    pub fn normalize(&self) -> IntOctagon {
        let mut o = *self;
        loop {
            if o.is_empty() {
                return IntOctagon::EMPTY;
            }
            let prev = o;
            o.rx = o
                .rx
                .min(div2_floor(o.urx + o.lrx))
                .min(o.lrx + o.uy)
                .min(o.urx - o.ly);
            o.lx = o
                .lx
                .max(div2_ceil(o.llx + o.ulx))
                .max(o.ulx + o.ly)
                .max(o.llx - o.uy);
            o.uy = o
                .uy
                .min(div2_floor(o.urx - o.ulx))
                .min(o.rx - o.ulx)
                .min(o.urx - o.lx);
            o.ly = o
                .ly
                .max(div2_ceil(o.llx - o.lrx))
                .max(o.lx - o.lrx)
                .max(o.llx - o.rx);
            o.lrx = o.lrx.min(o.rx - o.ly).min(2 * o.rx - o.llx).min(o.urx - 2 * o.ly);
            o.ulx = o.ulx.max(o.lx - o.uy).max(2 * o.lx - o.urx).max(o.llx - 2 * o.uy);
            o.urx = o.urx.min(o.rx + o.uy).min(2 * o.rx - o.ulx).min(o.lrx + 2 * o.uy);
            o.llx = o.llx.max(o.lx + o.ly).max(2 * o.lx - o.lrx).max(o.ulx + 2 * o.ly);
            if o == prev {
                return o;
            }
        }
    }

    /// Returns true if the diagonal bounds do not cut the axis-aligned
    /// bounding box, i.e. the octagon degenerates to a plain box.
    pub fn is_int_box(&self) -> bool {
        !self.is_empty()
            && self.ulx <= self.lx - self.uy
            && self.lrx >= self.rx - self.ly
            && self.llx <= self.lx + self.ly
            && self.urx >= self.rx + self.uy
    }

    /// The axis-aligned bounding box.
    pub fn to_box(&self) -> IntBox {
        if self.is_empty() {
            return IntBox::EMPTY;
        }
        IntBox::from_sides(self.lx, self.ly, self.rx, self.uy)
    }

    /// The equivalent simplex.
    pub fn to_simplex(&self) -> Simplex {
        if self.is_empty() {
            return Simplex::empty();
        }
        Simplex::new(self.border_lines().to_vec())
    }

    /// The eight boundary lines sorted by ascending direction, each with
    /// the interior on its left.
    ///
    /// Degenerate (redundant) boundary lines of a normalized octagon are
    /// dropped by [`Simplex::new`]'s canonicalization, not here.
    pub fn border_lines(&self) -> [Line; 8] {
        [
            Line::horizontal(self.ly),
            Line::with_direction(Point::new(self.lrx, 0), Direction::RIGHT_UP),
            Line::vertical(self.rx),
            Line::with_direction(Point::new(self.urx, 0), Direction::LEFT_UP),
            Line::horizontal(self.uy).opposite(),
            Line::with_direction(Point::new(self.ulx, 0), Direction::LEFT_DOWN),
            Line::vertical(self.lx).opposite(),
            Line::with_direction(Point::new(self.llx, 0), Direction::RIGHT_DOWN),
        ]
    }

    /// The corner with the given index, counter-clockwise; corner `i`
    /// joins boundary lines `i - 1` and `i` of [`IntOctagon::border_lines`].
    ///
    /// Octagon corners are always lattice points: every corner is the
    /// meet of an axis-parallel and a diagonal boundary.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 8`.
    pub fn corner(&self, index: usize) -> Point {
        match index {
            0 => Point::new(self.llx - self.ly, self.ly),
            1 => Point::new(self.lrx + self.ly, self.ly),
            2 => Point::new(self.rx, self.rx - self.lrx),
            3 => Point::new(self.rx, self.urx - self.rx),
            4 => Point::new(self.urx - self.uy, self.uy),
            5 => Point::new(self.ulx + self.uy, self.uy),
            6 => Point::new(self.lx, self.lx - self.ulx),
            7 => Point::new(self.lx, self.llx - self.lx),
            _ => panic!("octagon corner index out of range: {index}"),
        }
    }

    /// All eight corners, counter-clockwise. Adjacent corners coincide
    /// where a boundary is degenerate.
    pub fn corners(&self) -> [Point; 8] {
        std::array::from_fn(|i| self.corner(i))
    }

    /// The topological extent of the octagon.
    pub fn dimension(&self) -> Dimension {
        if self.is_empty() {
            Dimension::Empty
        } else if self.lx == self.rx && self.ly == self.uy {
            Dimension::Point
        } else if self.lx == self.rx
            || self.ly == self.uy
            || self.ulx == self.lrx
            || self.llx == self.urx
        {
            Dimension::Line
        } else {
            Dimension::Area
        }
    }

    /// The enclosed area, computed from the corner polygon.
    pub fn area(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let corners = self.corners();
        let mut sum = 0i128;
        for i in 0..corners.len() {
            let p = corners[i];
            let q = corners[(i + 1) % corners.len()];
            sum += p.x as i128 * q.y as i128 - q.x as i128 * p.y as i128;
        }
        sum as f64 * 0.5
    }

    /// The intersection, computed bound-wise.
    pub fn intersect(&self, other: IntOctagon) -> IntOctagon {
        IntOctagon::new(
            self.lx.max(other.lx),
            self.ly.max(other.ly),
            self.rx.min(other.rx),
            self.uy.min(other.uy),
            self.ulx.max(other.ulx),
            self.lrx.min(other.lrx),
            self.llx.max(other.llx),
            self.urx.min(other.urx),
        )
        .normalize()
    }

    /// The smallest octagon containing both operands, bound-wise.
    pub fn union(&self, other: IntOctagon) -> IntOctagon {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return *self;
        }
        IntOctagon::new(
            self.lx.min(other.lx),
            self.ly.min(other.ly),
            self.rx.max(other.rx),
            self.uy.max(other.uy),
            self.ulx.min(other.ulx),
            self.lrx.max(other.lrx),
            self.llx.min(other.llx),
            self.urx.max(other.urx),
        )
    }

    /// The octagon grown outward by `distance` on every boundary
    /// (shrunk for negative distances; may collapse to empty).
    ///
    /// Diagonal bounds move by `distance * sqrt(2)`, rounded to the
    /// lattice.
    pub fn offset(&self, distance: f64) -> IntOctagon {
        if self.is_empty() {
            return IntOctagon::EMPTY;
        }
        let axis = distance.round() as i64;
        let diag = (distance * SQRT2).round() as i64;
        IntOctagon::new(
            self.lx - axis,
            self.ly - axis,
            self.rx + axis,
            self.uy + axis,
            self.ulx - diag,
            self.lrx + diag,
            self.llx - diag,
            self.urx + diag,
        )
        .normalize()
    }
}

impl Bounded for IntOctagon {
    fn bounding_box(&self) -> IntBox {
        self.to_box()
    }

    fn bounding_octagon(&self) -> IntOctagon {
        *self
    }
}

impl Contains<Point> for IntOctagon {
    fn containment(&self, p: &Point) -> Containment {
        let d = p.x - p.y;
        let s = p.x + p.y;
        if p.x < self.lx
            || p.x > self.rx
            || p.y < self.ly
            || p.y > self.uy
            || d < self.ulx
            || d > self.lrx
            || s < self.llx
            || s > self.urx
        {
            Containment::Outside
        } else if p.x == self.lx
            || p.x == self.rx
            || p.y == self.ly
            || p.y == self.uy
            || d == self.ulx
            || d == self.lrx
            || s == self.llx
            || s == self.urx
        {
            Containment::Border
        } else {
            Containment::Inside
        }
    }
}

impl Transform for IntOctagon {
    fn translate(self, v: Vector) -> Self {
        if self.is_empty() {
            return IntOctagon::EMPTY;
        }
        IntOctagon::new(
            self.lx + v.x,
            self.ly + v.y,
            self.rx + v.x,
            self.uy + v.y,
            self.ulx + v.x - v.y,
            self.lrx + v.x - v.y,
            self.llx + v.x + v.y,
            self.urx + v.x + v.y,
        )
    }

    fn turn_90(self, rotation: Rotation, pole: Point) -> Self {
        if self.is_empty() {
            return IntOctagon::EMPTY;
        }
        let centered = self.translate(Vector::new(-pole.x, -pole.y));
        let turned = match rotation {
            Rotation::R0 => centered,
            // x' = -y, y' = x: the bound families permute.
            Rotation::R90 => IntOctagon::new(
                -centered.uy,
                centered.lx,
                -centered.ly,
                centered.rx,
                -centered.urx,
                -centered.llx,
                centered.ulx,
                centered.lrx,
            ),
            Rotation::R180 => IntOctagon::new(
                -centered.rx,
                -centered.uy,
                -centered.lx,
                -centered.ly,
                -centered.lrx,
                -centered.ulx,
                -centered.urx,
                -centered.llx,
            ),
            Rotation::R270 => IntOctagon::new(
                centered.ly,
                -centered.rx,
                centered.uy,
                -centered.lx,
                centered.llx,
                centered.urx,
                -centered.lrx,
                -centered.ulx,
            ),
        };
        turned.translate(Vector::new(pole.x, pole.y))
    }

    fn mirror_vertical(self, pole: Point) -> Self {
        if self.is_empty() {
            return IntOctagon::EMPTY;
        }
        let px2 = 2 * pole.x;
        IntOctagon::new(
            px2 - self.rx,
            self.ly,
            px2 - self.lx,
            self.uy,
            px2 - self.urx,
            px2 - self.llx,
            px2 - self.lrx,
            px2 - self.ulx,
        )
    }

    fn mirror_horizontal(self, pole: Point) -> Self {
        if self.is_empty() {
            return IntOctagon::EMPTY;
        }
        let py2 = 2 * pole.y;
        IntOctagon::new(
            self.lx,
            py2 - self.uy,
            self.rx,
            py2 - self.ly,
            self.llx - py2,
            self.urx - py2,
            self.ulx + py2,
            self.lrx + py2,
        )
    }
}

/// Folds a stream of lattice points into their bounding octagon.
///
/// This is the kernel's single mutable type; it is owned by one caller
/// and never shared.
#[derive(Debug, Clone)]
pub struct OctagonBuilder {
    bounds: IntOctagon,
}

impl OctagonBuilder {
    /// Creates a builder with empty bounds.
    pub fn new() -> Self {
        Self {
            bounds: IntOctagon::EMPTY,
        }
    }

    /// Widens the bounds to include `p`.
    pub fn add(&mut self, p: Point) {
        let d = p.x - p.y;
        let s = p.x + p.y;
        let b = &mut self.bounds;
        b.lx = b.lx.min(p.x);
        b.ly = b.ly.min(p.y);
        b.rx = b.rx.max(p.x);
        b.uy = b.uy.max(p.y);
        b.ulx = b.ulx.min(d);
        b.lrx = b.lrx.max(d);
        b.llx = b.llx.min(s);
        b.urx = b.urx.max(s);
    }

    /// The accumulated bounding octagon.
    ///
    /// Bounds derived from actual points are mutually tight, so the
    /// result is already normalized.
    pub fn build(self) -> IntOctagon {
        if self.bounds.is_empty() {
            IntOctagon::EMPTY
        } else {
            self.bounds
        }
    }
}

impl Default for OctagonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Point> for OctagonBuilder {
    fn extend<T: IntoIterator<Item = Point>>(&mut self, iter: T) {
        for p in iter {
            self.add(p);
        }
    }
}

impl FromIterator<Point> for OctagonBuilder {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        let mut builder = Self::new();
        builder.extend(iter);
        builder
    }
}
