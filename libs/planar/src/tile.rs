//! The closed family of convex tile shapes.
//!
//! [`TileShape`] is a sum over the three concrete representations
//! (axis-aligned [`IntBox`], 45-degree [`IntOctagon`], and general
//! [`Simplex`]) with same-type fast paths and a single generic
//! algorithm for everything else, obtained by promoting to the most
//! general representation. [`TileShape::simplify`] converts a result
//! back to the cheapest representation that is exactly equal.

use serde::{Deserialize, Serialize};

use crate::bbox::Bounded;
use crate::contains::{Containment, Contains};
use crate::dimension::Dimension;
use crate::float_point::FloatPoint;
use crate::int_box::IntBox;
use crate::line::Line;
use crate::octagon::IntOctagon;
use crate::point::Point;
use crate::side::Side;
use crate::simplex::Simplex;
use crate::transform::{Rotation, Transform};
use crate::vector::Vector;

/// A convex region expressible as an intersection of half-planes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TileShape {
    /// An axis-aligned box.
    Box(IntBox),
    /// An octagon with axis and 45-degree bounds.
    Octagon(IntOctagon),
    /// A general direction-sorted half-plane intersection.
    Simplex(Simplex),
}

impl TileShape {
    /// The empty shape, in its cheapest representation.
    pub fn empty() -> TileShape {
        TileShape::Box(IntBox::EMPTY)
    }

    /// Returns true if the shape contains no point.
    pub fn is_empty(&self) -> bool {
        match self {
            TileShape::Box(b) => b.is_empty(),
            TileShape::Octagon(o) => o.is_empty(),
            TileShape::Simplex(s) => s.is_empty(),
        }
    }

    /// The topological extent of the shape.
    pub fn dimension(&self) -> Dimension {
        match self {
            TileShape::Box(b) => b.dimension(),
            TileShape::Octagon(o) => o.dimension(),
            TileShape::Simplex(s) => s.dimension(),
        }
    }

    /// The enclosed area.
    pub fn area(&self) -> f64 {
        match self {
            TileShape::Box(b) => b.area(),
            TileShape::Octagon(o) => o.area(),
            TileShape::Simplex(s) => s.area(),
        }
    }

    /// The most general representation of this shape.
    pub fn to_simplex(&self) -> Simplex {
        match self {
            TileShape::Box(b) => b.to_simplex(),
            TileShape::Octagon(o) => o.to_simplex(),
            TileShape::Simplex(s) => s.clone(),
        }
    }

    /// The cheapest representation that is exactly this shape: a box if
    /// possible, then an octagon, then the simplex itself.
    pub fn simplify(&self) -> TileShape {
        if self.is_empty() {
            return TileShape::empty();
        }
        match self {
            TileShape::Box(_) => self.clone(),
            TileShape::Octagon(o) => {
                if o.is_int_box() {
                    TileShape::Box(o.to_box())
                } else {
                    self.clone()
                }
            }
            TileShape::Simplex(s) => {
                if let Some(b) = s.to_box() {
                    TileShape::Box(b)
                } else if let Some(o) = s.to_octagon() {
                    TileShape::Octagon(o).simplify()
                } else {
                    self.clone()
                }
            }
        }
    }

    /// The intersection of two tile shapes.
    ///
    /// Box and octagon pairs intersect bound-wise; any pair involving a
    /// simplex promotes and merges half-plane lists.
    pub fn intersection(&self, other: &TileShape) -> TileShape {
        use TileShape::*;
        let result = match (self, other) {
            (Box(a), Box(b)) => Box(a.intersect(*b)),
            (Box(a), Octagon(b)) => Octagon(a.to_octagon().intersect(*b)),
            (Octagon(a), Box(b)) => Octagon(a.intersect(b.to_octagon())),
            (Octagon(a), Octagon(b)) => Octagon(a.intersect(*b)),
            _ => Simplex(self.to_simplex().intersect(&other.to_simplex())),
        };
        result.simplify()
    }

    /// Returns true if the shapes share at least one point.
    pub fn intersects(&self, other: &TileShape) -> bool {
        self.intersection(other).dimension().is_nonempty()
    }

    /// Subtracts `hole` from this shape, partitioning the difference
    /// into convex, pairwise-disjoint pieces (overlapping only on shared
    /// borders) whose union is exactly `self` minus `hole`.
    ///
    /// One piece is built per boundary line of the overlap region; the
    /// dividing edge at each overlap corner is routed through whichever
    /// of the two adjacent closing lines yields the smaller combined
    /// bounding circumference (a greedy pairwise optimization), and a
    /// guard rewires dividers whose wedges would make adjacent pieces
    /// overlap. Every piece is simplified to its cheapest representation.
    pub fn cutout(&self, hole: &TileShape) -> Vec<TileShape> {
        if self.is_empty() {
            return Vec::new();
        }
        if let (TileShape::Box(a), TileShape::Box(b)) = (self, hole) {
            return a.cutout(b).into_iter().map(TileShape::Box).collect();
        }
        cutout_simplices(&self.to_simplex(), &hole.to_simplex())
            .into_iter()
            .map(|s| TileShape::Simplex(s).simplify())
            .collect()
    }

    /// The boundary lines, sorted by ascending direction, interior on
    /// the left of each.
    pub fn border_lines(&self) -> Vec<Line> {
        match self {
            TileShape::Box(b) => b.border_lines().to_vec(),
            TileShape::Octagon(o) => self_octagon_lines(o),
            TileShape::Simplex(s) => s.lines().to_vec(),
        }
    }

    /// The corners of the shape as approximate points, counter-clockwise
    /// with consecutive duplicates removed.
    pub fn corner_approx_arr(&self) -> Vec<FloatPoint> {
        let corners: Vec<FloatPoint> = match self {
            TileShape::Box(b) => b.corners().iter().map(|c| c.to_float()).collect(),
            TileShape::Octagon(o) => o.corners().iter().map(|c| c.to_float()).collect(),
            TileShape::Simplex(s) => s.corners().iter().map(|c| c.to_float()).collect(),
        };
        let mut result: Vec<FloatPoint> = Vec::with_capacity(corners.len());
        for c in corners {
            if result.last() != Some(&c) {
                result.push(c);
            }
        }
        if result.len() > 1 && result.first() == result.last() {
            result.pop();
        }
        result
    }

    /// The point of the shape closest to `from`, approximately.
    ///
    /// Returns `from` itself if it lies inside the shape, the projection
    /// onto the nearest boundary segment otherwise, and
    /// [`FloatPoint::NAN`] for empty shapes.
    pub fn nearest_point_approx(&self, from: FloatPoint) -> FloatPoint {
        if self.is_empty() || from.is_nan() {
            return FloatPoint::NAN;
        }
        let inside = self
            .border_lines()
            .iter()
            .all(|l| l.side_of_float(from, 0.0) != Side::Right);
        if inside {
            return from;
        }
        let corners = self.corner_approx_arr();
        if corners.is_empty() {
            return FloatPoint::NAN;
        }
        let mut best = corners[0];
        let mut best_dist = f64::INFINITY;
        for i in 0..corners.len() {
            let p = corners[i];
            let q = corners[(i + 1) % corners.len()];
            let candidate = project_to_segment(from, p, q);
            let dist = from.sq_distance(candidate);
            if dist < best_dist {
                best_dist = dist;
                best = candidate;
            }
        }
        best
    }

    /// The shape grown outward by `distance` on every boundary (shrunk
    /// for negative distances; may collapse to empty). Distances round
    /// to the lattice per boundary family.
    pub fn offset(&self, distance: f64) -> TileShape {
        let result = match self {
            TileShape::Box(b) => TileShape::Box(b.expand(distance.round() as i64)),
            TileShape::Octagon(o) => TileShape::Octagon(o.offset(distance)),
            TileShape::Simplex(s) => TileShape::Simplex(s.offset(distance)),
        };
        result.simplify()
    }

    /// Grows the shape by `amount` on every boundary.
    pub fn enlarge(&self, amount: f64) -> TileShape {
        self.offset(amount.abs())
    }

    /// Shrinks the shape by `amount` on every boundary; may collapse to
    /// empty.
    pub fn shrink(&self, amount: f64) -> TileShape {
        self.offset(-amount.abs())
    }
}

fn self_octagon_lines(o: &IntOctagon) -> Vec<Line> {
    // Canonicalization drops the degenerate boundaries of a normalized
    // octagon.
    o.to_simplex().lines().to_vec()
}

fn project_to_segment(from: FloatPoint, p: FloatPoint, q: FloatPoint) -> FloatPoint {
    let dx = q.x - p.x;
    let dy = q.y - p.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p;
    }
    let t = (((from.x - p.x) * dx + (from.y - p.y) * dy) / len_sq).clamp(0.0, 1.0);
    FloatPoint::new(p.x + t * dx, p.y + t * dy)
}

/// Which closing line routes the dividing edge at an overlap corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Divider {
    /// The wedge outside the corner joins the piece of the earlier
    /// boundary line.
    Earlier,
    /// The wedge joins the piece of the corner's own boundary line.
    Own,
}

/// Subtracts `hole` from `a`, both as simplices.
///
/// Builds one strip piece per boundary line of the (bounded) overlap
/// region, closing each piece with the dividing lines chosen at the two
/// overlap corners it touches.
fn cutout_simplices(a: &Simplex, hole: &Simplex) -> Vec<Simplex> {
    let overlap = a.intersect(hole);
    if !overlap.dimension().is_area() {
        return vec![a.clone()];
    }
    if !overlap.is_bounded() {
        return cutout_sequential(a, &overlap);
    }
    let cut = overlap.lines();
    let m = cut.len();

    let piece = |i: usize, clip_prev: bool, clip_next: bool| -> Simplex {
        let mut lines = a.lines().to_vec();
        lines.push(cut[i].opposite());
        if clip_prev {
            lines.push(cut[(i + m - 1) % m]);
        }
        if clip_next {
            lines.push(cut[(i + 1) % m]);
        }
        Simplex::new(lines)
    };
    let cost = |s: &Simplex| s.bounding_box().half_perimeter();

    // Greedy: at each overlap corner, compare the two ways of routing
    // the dividing edge and keep the cheaper pair of pieces.
    let mut dividers = vec![Divider::Earlier; m];
    for k in 0..m {
        let prev = (k + m - 1) % m;
        let cost_earlier = cost(&piece(prev, false, false)) + cost(&piece(k, true, false));
        let cost_own = cost(&piece(prev, false, true)) + cost(&piece(k, false, false));
        dividers[k] = if cost_earlier <= cost_own {
            Divider::Earlier
        } else {
            Divider::Own
        };
    }

    // Guard: an Earlier/Own pair at consecutive corners claims the same
    // wedge for both neighbors whenever the region outside all three
    // involved lines is non-degenerate; rewire until no such pair
    // remains.
    loop {
        let mut changed = false;
        for k in 0..m {
            let next = (k + 1) % m;
            if dividers[k] == Divider::Earlier && dividers[next] == Divider::Own {
                let mut lines = a.lines().to_vec();
                lines.push(cut[(k + m - 1) % m].opposite());
                lines.push(cut[k].opposite());
                lines.push(cut[next].opposite());
                if Simplex::new(lines).dimension().is_area() {
                    dividers[k] = Divider::Own;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    (0..m)
        .map(|i| {
            piece(
                i,
                dividers[i] == Divider::Earlier,
                dividers[(i + 1) % m] == Divider::Own,
            )
        })
        .filter(|p| p.dimension().is_area())
        .collect()
}

/// Fallback for unbounded overlap regions: peel one half-plane at a
/// time, which is exact but makes no attempt at small circumferences.
fn cutout_sequential(a: &Simplex, overlap: &Simplex) -> Vec<Simplex> {
    let mut pieces = Vec::new();
    let mut base = a.lines().to_vec();
    for l in overlap.lines() {
        let mut lines = base.clone();
        lines.push(l.opposite());
        let piece = Simplex::new(lines);
        if piece.dimension().is_area() {
            pieces.push(piece);
        }
        base.push(*l);
    }
    pieces
}

impl From<IntBox> for TileShape {
    #[inline]
    fn from(value: IntBox) -> Self {
        Self::Box(value)
    }
}

impl From<IntOctagon> for TileShape {
    #[inline]
    fn from(value: IntOctagon) -> Self {
        Self::Octagon(value)
    }
}

impl From<Simplex> for TileShape {
    #[inline]
    fn from(value: Simplex) -> Self {
        Self::Simplex(value)
    }
}

impl Bounded for TileShape {
    fn bounding_box(&self) -> IntBox {
        match self {
            TileShape::Box(b) => b.bounding_box(),
            TileShape::Octagon(o) => o.bounding_box(),
            TileShape::Simplex(s) => s.bounding_box(),
        }
    }

    fn bounding_octagon(&self) -> IntOctagon {
        match self {
            TileShape::Box(b) => b.bounding_octagon(),
            TileShape::Octagon(o) => o.bounding_octagon(),
            TileShape::Simplex(s) => s.bounding_octagon(),
        }
    }
}

impl Contains<Point> for TileShape {
    fn containment(&self, p: &Point) -> Containment {
        match self {
            TileShape::Box(b) => b.containment(p),
            TileShape::Octagon(o) => o.containment(p),
            TileShape::Simplex(s) => s.containment(p),
        }
    }
}

impl Transform for TileShape {
    fn translate(self, v: Vector) -> Self {
        match self {
            TileShape::Box(b) => TileShape::Box(b.translate(v)),
            TileShape::Octagon(o) => TileShape::Octagon(o.translate(v)),
            TileShape::Simplex(s) => TileShape::Simplex(s.translate(v)),
        }
    }

    fn turn_90(self, rotation: Rotation, pole: Point) -> Self {
        match self {
            TileShape::Box(b) => TileShape::Box(b.turn_90(rotation, pole)),
            TileShape::Octagon(o) => TileShape::Octagon(o.turn_90(rotation, pole)),
            TileShape::Simplex(s) => TileShape::Simplex(s.turn_90(rotation, pole)),
        }
    }

    fn mirror_vertical(self, pole: Point) -> Self {
        match self {
            TileShape::Box(b) => TileShape::Box(b.mirror_vertical(pole)),
            TileShape::Octagon(o) => TileShape::Octagon(o.mirror_vertical(pole)),
            TileShape::Simplex(s) => TileShape::Simplex(s.mirror_vertical(pole)),
        }
    }

    fn mirror_horizontal(self, pole: Point) -> Self {
        match self {
            TileShape::Box(b) => TileShape::Box(b.mirror_horizontal(pole)),
            TileShape::Octagon(o) => TileShape::Octagon(o.mirror_horizontal(pole)),
            TileShape::Simplex(s) => TileShape::Simplex(s.mirror_horizontal(pole)),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::direction::Direction;

    fn shape_box(left: i64, bottom: i64, right: i64, top: i64) -> TileShape {
        TileShape::Box(IntBox::from_sides(left, bottom, right, top))
    }

    /// Checks the cutout contract: convex disjoint pieces inside `a`,
    /// outside `hole`, with total area `area(a) - area(a o hole)`.
    fn check_cutout(a: &TileShape, hole: &TileShape) -> Vec<TileShape> {
        let pieces = a.cutout(hole);
        let overlap_area = match a.intersection(hole) {
            i if i.dimension().is_area() => i.area(),
            _ => 0.0,
        };
        let total: f64 = pieces.iter().map(|p| p.area()).sum();
        let expected = a.area() - overlap_area;
        assert_abs_diff_eq!(total, expected, epsilon = 1e-6);
        for (i, p) in pieces.iter().enumerate() {
            assert!(p.dimension().is_area());
            assert!(
                !p.intersection(hole).dimension().is_area(),
                "piece {p:?} overlaps the hole"
            );
            assert!(
                (a.intersection(p).area() - p.area()).abs() < 1e-6,
                "piece {p:?} leaks outside"
            );
            for q in &pieces[i + 1..] {
                assert!(
                    !p.intersection(q).dimension().is_area(),
                    "pieces {p:?} and {q:?} overlap"
                );
            }
        }
        pieces
    }

    #[test]
    fn simplify_prefers_the_cheapest_representation() {
        let b = IntBox::from_sides(0, 0, 10, 10);
        let as_octagon = TileShape::Octagon(b.to_octagon());
        assert_eq!(as_octagon.simplify(), TileShape::Box(b));
        let as_simplex = TileShape::Simplex(b.to_simplex());
        assert_eq!(as_simplex.simplify(), TileShape::Box(b));

        let oct = IntOctagon::new(0, 0, 10, 10, -6, 6, 4, 16).normalize();
        let oct_simplex = TileShape::Simplex(oct.to_simplex());
        assert_eq!(oct_simplex.simplify(), TileShape::Octagon(oct));
    }

    #[test]
    fn mixed_representation_intersection() {
        let b = shape_box(0, 0, 10, 10);
        let oct = TileShape::Octagon(IntOctagon::new(5, 5, 20, 20, -20, 20, 10, 40).normalize());
        let i = b.intersection(&oct);
        assert_eq!(i, shape_box(5, 5, 10, 10));
        assert!(b.intersects(&oct));
        assert!(!b.intersects(&shape_box(11, 11, 12, 12).translate(Vector::new(5, 5))));
    }

    #[test]
    fn box_cutout_fast_path() {
        let pieces = check_cutout(&shape_box(0, 0, 10, 10), &shape_box(3, 3, 6, 6));
        assert_eq!(pieces.len(), 4);
        assert!(pieces.iter().all(|p| matches!(p, TileShape::Box(_))));
    }

    #[test]
    fn octagon_cutout_produces_boxes_via_general_path() {
        let a = TileShape::Octagon(IntBox::from_sides(0, 0, 10, 10).to_octagon());
        let hole = TileShape::Octagon(IntBox::from_sides(3, 3, 6, 6).to_octagon());
        let pieces = check_cutout(&a, &hole);
        assert_eq!(pieces.len(), 4);
        // Pieces of an axis-aligned cut simplify back to boxes.
        assert!(pieces.iter().all(|p| matches!(p, TileShape::Box(_))));
    }

    #[test]
    fn cutout_of_diamond_hole() {
        let a = shape_box(0, 0, 20, 20);
        let diamond = TileShape::Simplex(Simplex::new(vec![
            Line::with_direction(Point::new(5, 0), Direction::RIGHT_UP),
            Line::with_direction(Point::new(25, 0), Direction::LEFT_UP),
            Line::with_direction(Point::new(-5, 0), Direction::LEFT_DOWN),
            Line::with_direction(Point::new(15, 0), Direction::RIGHT_DOWN),
        ]));
        assert_eq!(diamond.area(), 50.0);
        let pieces = check_cutout(&a, &diamond);
        assert_eq!(pieces.len(), 4);
    }

    #[test]
    fn cutout_of_protruding_hole() {
        // Hole sticking out over the right edge.
        let a = shape_box(0, 0, 10, 10);
        let hole = shape_box(7, 2, 15, 8);
        check_cutout(&a, &hole);
        // And the same through the general path.
        let a_oct = TileShape::Octagon(IntBox::from_sides(0, 0, 10, 10).to_octagon());
        check_cutout(&a_oct, &hole);
    }

    #[test]
    fn cutout_with_covering_hole_removes_everything() {
        let a = shape_box(2, 2, 8, 8);
        let hole = shape_box(0, 0, 10, 10);
        assert!(a.cutout(&hole).is_empty());
    }

    #[test]
    fn cutout_of_disjoint_hole_returns_the_minuend() {
        let a = shape_box(0, 0, 10, 10);
        let hole = shape_box(40, 40, 50, 50);
        assert_eq!(a.cutout(&hole), vec![a.clone()]);
        let a_oct = TileShape::Octagon(IntBox::from_sides(0, 0, 10, 10).to_octagon());
        let pieces = a_oct.cutout(&hole);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].area(), 100.0);
    }

    #[test]
    fn nearest_point_projection() {
        let b = shape_box(0, 0, 10, 10);
        let inside = FloatPoint::new(4.0, 5.0);
        assert_eq!(b.nearest_point_approx(inside), inside);
        assert_eq!(
            b.nearest_point_approx(FloatPoint::new(15.0, 5.0)),
            FloatPoint::new(10.0, 5.0)
        );
        assert_eq!(
            b.nearest_point_approx(FloatPoint::new(13.0, 14.0)),
            FloatPoint::new(10.0, 10.0)
        );
        assert!(TileShape::empty()
            .nearest_point_approx(inside)
            .is_nan());
    }

    #[test]
    fn offset_enlarge_shrink() {
        let b = shape_box(0, 0, 10, 10);
        assert_eq!(b.enlarge(2.0), shape_box(-2, -2, 12, 12));
        assert_eq!(b.shrink(2.0), shape_box(2, 2, 8, 8));
        assert!(b.shrink(6.0).is_empty());
        let oct = TileShape::Octagon(IntOctagon::new(0, 0, 10, 10, -6, 6, 4, 16).normalize());
        let grown = oct.enlarge(1.0);
        assert!(grown.area() > oct.area());
    }

    #[test]
    fn corner_approx_round_trip() {
        let b = shape_box(0, 0, 10, 10);
        let corners = b.corner_approx_arr();
        assert_eq!(corners.len(), 4);
        let rounded: Vec<Point> = corners.iter().map(|c| c.round()).collect();
        assert_eq!(
            rounded,
            vec![
                Point::new(0, 0),
                Point::new(10, 0),
                Point::new(10, 10),
                Point::new(0, 10)
            ]
        );
    }

    #[test]
    fn transforms_dispatch_through_the_family() {
        let shapes = [
            shape_box(0, 0, 10, 4),
            TileShape::Octagon(IntOctagon::new(0, 0, 10, 10, -6, 6, 4, 16).normalize()),
            TileShape::Simplex(Simplex::new(vec![
                Line::horizontal(0),
                Line::new(Point::new(10, 0), Point::new(0, 10)),
                Line::vertical(0).opposite(),
            ])),
        ];
        let pole = Point::new(3, -1);
        for s in shapes {
            let area = s.area();
            assert_eq!(s.clone().turn_90(Rotation::R180, pole).area(), area);
            assert_eq!(s.clone().mirror_vertical(pole).area(), area);
            assert_eq!(
                s.clone().translate(Vector::new(7, 9)).area(),
                area
            );
        }
    }
}
