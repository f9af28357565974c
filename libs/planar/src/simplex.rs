//! Convex shapes as intersections of half-planes.
//!
//! A [`Simplex`] is a list of boundary lines sorted by ascending
//! [`Direction`](crate::direction::Direction), each with the interior on
//! its left. Construction canonicalizes: duplicate directions keep only
//! the most restrictive line, redundant lines are removed by the
//! neighbor-intersection rule, and inconsistent half-planes collapse the
//! shape to empty. Two simplices compare equal iff their canonical line
//! lists describe the same infinite lines.
//!
//! A simplex with no lines is the empty shape by convention (the whole
//! plane is never needed and has no representation).

use serde::{Deserialize, Serialize};

use crate::bbox::Bounded;
use crate::contains::{Containment, Contains};
use crate::dimension::Dimension;
use crate::direction::Direction;
use crate::int_box::IntBox;
use crate::line::Line;
use crate::octagon::{IntOctagon, OctagonBuilder};
use crate::point::{Point, CRITICAL_MAGNITUDE};
use crate::rational::ExactPoint;
use crate::side::Side;
use crate::transform::{Rotation, Transform};
use crate::vector::Vector;

/// A convex region described by direction-sorted boundary half-planes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Simplex {
    lines: Vec<Line>,
}

impl Simplex {
    /// The empty simplex.
    pub fn empty() -> Self {
        Self { lines: Vec::new() }
    }

    /// Creates the intersection of the left half-planes of `lines`, in
    /// canonical form.
    ///
    /// Sorts by direction, keeps the most restrictive of same-direction
    /// lines, removes redundant lines, and collapses to
    /// [`Simplex::empty`] when the half-planes are inconsistent.
    pub fn new(lines: Vec<Line>) -> Self {
        Self {
            lines: canonicalize(lines),
        }
    }

    /// The boundary lines, sorted by ascending direction, interior on the
    /// left of each.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The boundary line with the given index.
    pub fn line(&self, index: usize) -> Line {
        self.lines[index]
    }

    /// The number of boundary lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the simplex contains no point.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns true if the region is bounded.
    pub fn is_bounded(&self) -> bool {
        let n = self.lines.len();
        if self.is_empty() {
            return true;
        }
        if n < 3 {
            return false;
        }
        (0..n).all(|i| {
            self.lines[i]
                .direction()
                .cross(self.lines[(i + 1) % n].direction())
                > 0
        })
    }

    /// The corner where boundary lines `index - 1` and `index` meet, or
    /// [`None`] if those neighbors are parallel (the shape is unbounded
    /// in that sector).
    pub fn corner(&self, index: usize) -> Option<ExactPoint> {
        let n = self.lines.len();
        if n == 0 {
            return None;
        }
        let prev = &self.lines[(index + n - 1) % n];
        prev.intersection(&self.lines[index]).ok()
    }

    /// All defined corners, counter-clockwise.
    ///
    /// For bounded shapes this is one corner per boundary line.
    pub fn corners(&self) -> Vec<ExactPoint> {
        if self.lines.len() < 2 {
            return Vec::new();
        }
        (0..self.lines.len())
            .filter_map(|i| self.corner(i))
            .collect()
    }

    /// The topological extent of the region.
    pub fn dimension(&self) -> Dimension {
        if self.is_empty() {
            return Dimension::Empty;
        }
        if let Some(flat) = self.flat_base_line() {
            return self.flat_dimension(&flat);
        }
        let n = self.lines.len();
        if n < 3 || !self.is_bounded() {
            return Dimension::Area;
        }
        let corners = self.corners();
        if corners.iter().all(|c| c == &corners[0]) {
            Dimension::Point
        } else {
            Dimension::Area
        }
    }

    /// A boundary line that coincides with an opposite-direction partner,
    /// confining the whole region to that infinite line.
    fn flat_base_line(&self) -> Option<Line> {
        for (i, p) in self.lines.iter().enumerate() {
            for q in &self.lines[i + 1..] {
                if p.direction() == q.direction().opposite() && p.is_collinear(q) {
                    return Some(*p);
                }
            }
        }
        None
    }

    /// Dimension of a region confined to `base`: a segment, ray, or line
    /// unless the remaining constraints pinch it to a single point.
    fn flat_dimension(&self, base: &Line) -> Dimension {
        let d = base.direction();
        let mut lower: Option<ExactPoint> = None;
        let mut upper: Option<ExactPoint> = None;
        for l in &self.lines {
            if l.is_parallel(base) {
                continue;
            }
            let p = base
                .intersection(l)
                .expect("non-parallel lines intersect");
            let coefficient = l.direction().cross(d);
            if coefficient < 0 {
                // Walking along `d` eventually leaves the half-plane.
                upper = Some(match upper {
                    Some(u) if cmp_along(d, &p, &u).is_lt() => p,
                    Some(u) => u,
                    None => p,
                });
            } else {
                lower = Some(match lower {
                    Some(lo) if cmp_along(d, &p, &lo).is_gt() => p,
                    Some(lo) => lo,
                    None => p,
                });
            }
        }
        match (lower, upper) {
            (Some(lo), Some(up)) if lo == up => Dimension::Point,
            _ => Dimension::Line,
        }
    }

    /// The intersection with another simplex: the union of the boundary
    /// line lists, re-canonicalized.
    pub fn intersect(&self, other: &Simplex) -> Simplex {
        if self.is_empty() || other.is_empty() {
            return Simplex::empty();
        }
        let mut lines = self.lines.clone();
        lines.extend_from_slice(&other.lines);
        Simplex::new(lines)
    }

    /// The enclosed area; infinite for unbounded regions.
    pub fn area(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        if !self.is_bounded() {
            return f64::INFINITY;
        }
        let corners: Vec<_> = self.corners().iter().map(|c| c.to_float()).collect();
        let mut sum = 0.0;
        for i in 0..corners.len() {
            let p = corners[i];
            let q = corners[(i + 1) % corners.len()];
            sum += p.x * q.y - q.x * p.y;
        }
        0.5 * sum
    }

    /// The region with every boundary moved outward by `distance`
    /// (inward for negative distances; may collapse to empty).
    pub fn offset(&self, distance: f64) -> Simplex {
        Simplex::new(
            self.lines
                .iter()
                .map(|l| l.translate_perpendicular(distance))
                .collect(),
        )
    }

    /// The equal box, if the region is exactly an axis-aligned box.
    pub fn to_box(&self) -> Option<IntBox> {
        if self.is_empty() {
            return Some(IntBox::EMPTY);
        }
        if !self.lines.iter().all(|l| l.is_orthogonal()) || !self.is_bounded() {
            return None;
        }
        let candidate = self.bounding_box();
        (Simplex::new(candidate.border_lines().to_vec()) == *self).then_some(candidate)
    }

    /// The equal octagon, if the region is exactly represented by
    /// axis-parallel and 45-degree bounds with lattice intercepts.
    pub fn to_octagon(&self) -> Option<IntOctagon> {
        if self.is_empty() {
            return Some(IntOctagon::EMPTY);
        }
        if !self.lines.iter().all(|l| l.direction().is_45_degree()) || !self.is_bounded() {
            return None;
        }
        let candidate = self.bounding_octagon().normalize();
        (candidate.to_simplex() == *self).then_some(candidate)
    }
}

/// Exact ordering of two points along direction `d`.
fn cmp_along(d: Direction, p: &ExactPoint, q: &ExactPoint) -> std::cmp::Ordering {
    if d.x() != 0 {
        let ord = p.cmp_x(q);
        if d.x() > 0 {
            ord
        } else {
            ord.reverse()
        }
    } else if d.y() > 0 {
        p.cmp_y(q)
    } else {
        p.cmp_y(q).reverse()
    }
}

fn canonicalize(mut lines: Vec<Line>) -> Vec<Line> {
    lines.sort_by(|a, b| a.direction().cmp(&b.direction()));

    // Among same-direction lines, keep the most restrictive half-plane.
    let mut result: Vec<Line> = Vec::with_capacity(lines.len());
    for line in lines {
        match result.last_mut() {
            Some(last) if last.direction() == line.direction() => {
                if last.side_of(line.a()) != Side::Right {
                    *last = line;
                }
            }
            _ => result.push(line),
        }
    }

    // Two opposite half-planes facing away from each other are
    // inconsistent.
    for i in 0..result.len() {
        for j in i + 1..result.len() {
            if result[i].direction() == result[j].direction().opposite()
                && result[i].side_of(result[j].a()) == Side::Right
            {
                return Vec::new();
            }
        }
    }

    // Repeatedly drop any line whose neighbors meet on or inside it.
    // The test is only meaningful when the neighbor directions span less
    // than 180 degrees; a wider gap leaves the middle line essential no
    // matter where the neighbors meet.
    loop {
        let mut removed = false;
        let mut i = 0;
        while result.len() >= 3 && i < result.len() {
            let n = result.len();
            let prev = result[(i + n - 1) % n];
            let next = result[(i + 1) % n];
            if prev.direction().cross(next.direction()) > 0 {
                let corner = prev
                    .intersection(&next)
                    .expect("non-parallel lines intersect");
                if corner.side_of(&result[i]) != Side::Right {
                    result.remove(i);
                    removed = true;
                    continue;
                }
            }
            i += 1;
        }
        if !removed {
            break;
        }
    }

    // A remaining corner strictly outside any half-plane means the
    // system is inconsistent (possible without any opposite pair, e.g.
    // three half-planes facing pairwise away).
    let n = result.len();
    if n >= 3 {
        for i in 0..n {
            let prev = &result[(i + n - 1) % n];
            if prev.is_parallel(&result[i]) {
                continue;
            }
            let corner = prev
                .intersection(&result[i])
                .expect("non-parallel lines intersect");
            for l in &result {
                if corner.side_of(l) == Side::Right {
                    return Vec::new();
                }
            }
        }
    }

    result
}

impl Bounded for Simplex {
    fn bounding_box(&self) -> IntBox {
        if self.is_empty() {
            return IntBox::EMPTY;
        }
        if !self.is_bounded() {
            // No finite bound exists; clamp to the exactly-safe range.
            return IntBox::from_sides(
                -CRITICAL_MAGNITUDE,
                -CRITICAL_MAGNITUDE,
                CRITICAL_MAGNITUDE,
                CRITICAL_MAGNITUDE,
            );
        }
        let corners = self.corners();
        let mut result = IntBox::EMPTY;
        for c in &corners {
            result = result.union(IntBox::from_sides(
                c.floor_x(),
                c.floor_y(),
                c.ceil_x(),
                c.ceil_y(),
            ));
        }
        result
    }

    fn bounding_octagon(&self) -> IntOctagon {
        if self.is_empty() {
            return IntOctagon::EMPTY;
        }
        if !self.is_bounded() {
            return self.bounding_box().to_octagon();
        }
        let mut builder = OctagonBuilder::new();
        let mut widened = IntOctagon::EMPTY;
        for c in &self.corners() {
            // Round every functional outward so rational corners stay
            // enclosed.
            builder.add(Point::new(c.floor_x(), c.floor_y()));
            widened.ulx = widened.ulx.min(c.floor_diff());
            widened.lrx = widened.lrx.max(c.ceil_diff());
            widened.llx = widened.llx.min(c.floor_sum());
            widened.urx = widened.urx.max(c.ceil_sum());
            builder.add(Point::new(c.ceil_x(), c.ceil_y()));
        }
        let mut result = builder.build();
        if result.is_empty() {
            return IntOctagon::EMPTY;
        }
        result.ulx = result.ulx.min(widened.ulx);
        result.lrx = result.lrx.max(widened.lrx);
        result.llx = result.llx.min(widened.llx);
        result.urx = result.urx.max(widened.urx);
        result
    }
}

impl Contains<Point> for Simplex {
    fn containment(&self, p: &Point) -> Containment {
        if self.is_empty() {
            return Containment::Outside;
        }
        let mut on_border = false;
        for l in &self.lines {
            match l.side_of(*p) {
                Side::Right => return Containment::Outside,
                Side::Collinear => on_border = true,
                Side::Left => {}
            }
        }
        if on_border {
            Containment::Border
        } else {
            Containment::Inside
        }
    }
}

impl Transform for Simplex {
    fn translate(self, v: Vector) -> Self {
        // Translation preserves directions and relative positions, so the
        // canonical form is preserved.
        Self {
            lines: self.lines.into_iter().map(|l| l.translate(v)).collect(),
        }
    }

    fn turn_90(self, rotation: Rotation, pole: Point) -> Self {
        Simplex::new(
            self.lines
                .into_iter()
                .map(|l| l.turn_90(rotation, pole))
                .collect(),
        )
    }

    fn mirror_vertical(self, pole: Point) -> Self {
        Simplex::new(
            self.lines
                .into_iter()
                .map(|l| l.mirror_vertical(pole))
                .collect(),
        )
    }

    fn mirror_horizontal(self, pole: Point) -> Self {
        Simplex::new(
            self.lines
                .into_iter()
                .map(|l| l.mirror_horizontal(pole))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Simplex {
        // (0,0) - (10,0) - (0,10), counter-clockwise.
        Simplex::new(vec![
            Line::horizontal(0),
            Line::new(Point::new(10, 0), Point::new(0, 10)),
            Line::vertical(0).opposite(),
        ])
    }

    #[test]
    fn triangle_area_and_dimension() {
        let t = triangle();
        assert_eq!(t.line_count(), 3);
        assert_eq!(t.dimension(), Dimension::Area);
        assert_eq!(t.area(), 50.0);
        assert!(t.is_bounded());
    }

    #[test]
    fn triangle_corners_are_exact() {
        let t = triangle();
        let corners = t.corners();
        assert_eq!(corners.len(), 3);
        for expected in [Point::new(0, 0), Point::new(10, 0), Point::new(0, 10)] {
            assert!(
                corners.contains(&ExactPoint::Int(expected)),
                "missing corner {expected:?}"
            );
        }
    }

    #[test]
    fn redundant_lines_are_removed() {
        let mut lines = triangle().lines().to_vec();
        // A looser parallel bottom bound and a slack vertical bound.
        lines.push(Line::horizontal(-5));
        lines.push(Line::vertical(20));
        let s = Simplex::new(lines);
        assert_eq!(s, triangle());
    }

    #[test]
    fn opposite_half_planes_collapse_to_empty() {
        let s = Simplex::new(vec![
            Line::horizontal(5),
            Line::horizontal(3).opposite(),
        ]);
        assert!(s.is_empty());
        assert_eq!(s.dimension(), Dimension::Empty);
    }

    #[test]
    fn pairwise_consistent_but_empty_system_is_detected() {
        // x <= -1, y <= -1, x + y >= 3: any two intersect, all three do
        // not, and no pair is opposite.
        let s = Simplex::new(vec![
            Line::vertical(-1),
            Line::horizontal(-1).opposite(),
            Line::with_direction(Point::new(3, 0), Direction::RIGHT_DOWN),
        ]);
        assert!(s.is_empty());
    }

    #[test]
    fn half_plane_and_wedge_are_unbounded_area() {
        let half = Simplex::new(vec![Line::horizontal(0)]);
        assert!(!half.is_bounded());
        assert_eq!(half.dimension(), Dimension::Area);
        assert_eq!(half.area(), f64::INFINITY);

        let wedge = Simplex::new(vec![Line::horizontal(0), Line::vertical(10)]);
        assert!(!wedge.is_bounded());
        assert_eq!(wedge.dimension(), Dimension::Area);
    }

    #[test]
    fn flat_shapes_classify_as_line_or_point() {
        let strip = Simplex::new(vec![Line::horizontal(0), Line::horizontal(0).opposite()]);
        assert_eq!(strip.dimension(), Dimension::Line);

        let segment = Simplex::new(vec![
            Line::horizontal(0),
            Line::horizontal(0).opposite(),
            Line::vertical(5),
            Line::vertical(0).opposite(),
        ]);
        assert_eq!(segment.dimension(), Dimension::Line);

        let point = Simplex::new(vec![
            Line::horizontal(0),
            Line::horizontal(0).opposite(),
            Line::vertical(3),
            Line::vertical(3).opposite(),
        ]);
        assert_eq!(point.dimension(), Dimension::Point);
    }

    #[test]
    fn containment_classification() {
        let t = triangle();
        assert_eq!(t.containment(&Point::new(2, 2)), Containment::Inside);
        assert_eq!(t.containment(&Point::new(5, 5)), Containment::Border);
        assert_eq!(t.containment(&Point::new(0, 0)), Containment::Border);
        assert_eq!(t.containment(&Point::new(6, 6)), Containment::Outside);
        assert_eq!(t.containment(&Point::new(-1, 3)), Containment::Outside);
    }

    #[test]
    fn intersection_merges_half_planes() {
        let t = triangle();
        let b = IntBox::from_sides(0, 0, 4, 4).to_simplex();
        let i = t.intersect(&b);
        assert_eq!(i.dimension(), Dimension::Area);
        // The box corner (4,4) is inside the triangle, so the
        // intersection is the box itself.
        assert_eq!(i, b);

        let far = IntBox::from_sides(20, 20, 30, 30).to_simplex();
        assert!(t.intersect(&far).is_empty());
    }

    #[test]
    fn box_and_octagon_round_trips() {
        let b = IntBox::from_sides(-3, 1, 7, 9);
        assert_eq!(b.to_simplex().to_box(), Some(b));

        let o = IntOctagon::new(0, 0, 10, 10, -6, 6, 4, 16).normalize();
        assert_eq!(o.to_simplex().to_octagon(), Some(o));
        // The triangle has a non-45-degree edge and converts to neither.
        assert_eq!(triangle().to_box(), None);
        assert_eq!(triangle().to_octagon(), None);

        // A 45-degree simplex that is an octagon.
        let diamond = Simplex::new(vec![
            Line::with_direction(Point::new(10, 0), Direction::RIGHT_UP),
            Line::with_direction(Point::new(10, 0), Direction::LEFT_UP),
            Line::with_direction(Point::new(-10, 0), Direction::LEFT_DOWN),
            Line::with_direction(Point::new(-10, 0), Direction::RIGHT_DOWN),
        ]);
        let oct = diamond.to_octagon().expect("diamond is an octagon");
        assert_eq!(oct.area(), diamond.area());
    }

    #[test]
    fn bounding_regions_enclose_rational_corners() {
        // Lines meeting at (6/7, 2/7).
        let s = Simplex::new(vec![
            Line::new(Point::new(0, 0), Point::new(3, 1)),
            Line::new(Point::new(1, 0), Point::new(0, 2)),
            Line::vertical(0).opposite(),
        ]);
        assert_eq!(s.dimension(), Dimension::Area);
        let bb = s.bounding_box();
        for c in s.corners() {
            let f = c.to_float();
            assert!(bb.ll.x as f64 <= f.x && f.x <= bb.ur.x as f64);
            assert!(bb.ll.y as f64 <= f.y && f.y <= bb.ur.y as f64);
        }
    }

    #[test]
    fn offset_grows_and_shrinks_boxes() {
        let b = IntBox::from_sides(0, 0, 10, 10).to_simplex();
        let grown = b.offset(2.0);
        assert_eq!(grown.to_box(), Some(IntBox::from_sides(-2, -2, 12, 12)));
        let shrunk = b.offset(-4.0);
        assert_eq!(shrunk.to_box(), Some(IntBox::from_sides(4, 4, 6, 6)));
        assert!(b.offset(-6.0).is_empty());
    }

    #[test]
    fn transformations_preserve_area() {
        let t = triangle();
        let pole = Point::new(4, -2);
        assert_eq!(t.clone().turn_90(Rotation::R90, pole).area(), 50.0);
        assert_eq!(t.clone().mirror_vertical(pole).area(), 50.0);
        assert_eq!(t.clone().mirror_horizontal(pole).area(), 50.0);
        assert_eq!(
            t.clone().translate(Vector::new(100, -50)).area(),
            50.0
        );
        let back = t
            .clone()
            .turn_90(Rotation::R90, pole)
            .turn_90(Rotation::R270, pole);
        assert_eq!(back, t);
    }
}
