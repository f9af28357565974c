//! Simple polygons and their convex decomposition.
//!
//! A [`Polygon`] keeps both its corner array and the lattice-defined
//! line of every edge. Corners created by splitting (axis-aligned
//! division points on an edge) are generally rational, but every edge of
//! every piece still lies on a lattice line, so decomposition results
//! convert to [`TileShape`]s without any rounding: the partition is
//! exact.
//!
//! Invariants: at least three corners, no duplicate consecutive corners,
//! no three consecutive collinear corners, counter-clockwise winding,
//! and the canonical start corner (lowest y, ties broken by lowest x) at
//! index zero.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::bbox::Bounded;
use crate::contains::{Containment, Contains};
use crate::direction::Direction;
use crate::error::DecomposeError;
use crate::float_point::FloatPoint;
use crate::int_box::IntBox;
use crate::line::Line;
use crate::octagon::IntOctagon;
use crate::point::Point;
use crate::rational::ExactPoint;
use crate::side::Side;
use crate::simplex::Simplex;
use crate::tile::TileShape;
use crate::transform::{Rotation, Transform};
use crate::vector::Vector;

/// The default seed for the decomposition's pseudo-random generator.
///
/// The generator is derived per call, so repeated decompositions are
/// independent and reproducible.
pub const DEFAULT_SEED: u64 = 99;

/// A simple polygon in canonical form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Polygon {
    corners: Vec<ExactPoint>,
    lines: Vec<Line>,
}

impl Polygon {
    /// Creates a polygon from lattice corner points.
    ///
    /// Duplicate and collinear-redundant corners are removed on
    /// insertion: a point collinear with the two preceding corners
    /// either is dropped or replaces the nearer neighbor (by squared
    /// distance), never both kept. The winding is normalized to
    /// counter-clockwise and the corner list is rotated to the canonical
    /// start corner.
    ///
    /// # Panics
    ///
    /// Panics if fewer than three corners remain or the corners enclose
    /// no area.
    pub fn new(points: Vec<Point>) -> Self {
        let mut points = cleanup_corners(points);
        assert!(
            points.len() >= 3,
            "a polygon requires at least three distinct corners"
        );
        for p in &points {
            p.check_range();
        }
        let area2 = signed_area_2x(&points);
        assert!(area2 != 0, "polygon corners enclose no area");
        if area2 < 0 {
            points.reverse();
        }
        let corners: Vec<ExactPoint> = points.iter().copied().map(ExactPoint::Int).collect();
        let lines = (0..points.len())
            .map(|i| Line::new(points[i], points[(i + 1) % points.len()]))
            .collect();
        Self::from_parts(corners, lines)
    }

    /// Builds a polygon from matching corner and edge-line arrays that
    /// already wind counter-clockwise, merging degenerate corners and
    /// rotating to the canonical start.
    fn from_parts(corners: Vec<ExactPoint>, lines: Vec<Line>) -> Self {
        debug_assert_eq!(corners.len(), lines.len());
        // Entry k pairs corner k with its outgoing edge line.
        let mut entries: Vec<(ExactPoint, Line)> = corners.into_iter().zip(lines).collect();
        // Merge zero-length edges and consecutive collinear edges.
        let mut i = 0;
        let mut since_change = 0;
        while entries.len() >= 3 && since_change <= entries.len() {
            let next = (i + 1) % entries.len();
            if entries[i].0 == entries[next].0 {
                // Edge i is degenerate; the next corner's edge takes
                // over.
                entries[i].1 = entries[next].1;
                entries.remove(next);
                since_change = 0;
            } else if entries[i].1 == entries[next].1 {
                // The corner between two collinear edges is redundant.
                entries.remove(next);
                since_change = 0;
            } else {
                i = next;
                since_change += 1;
            }
            if i >= entries.len() {
                i = 0;
            }
        }
        // Rotate the canonical start corner to the front.
        let start = (0..entries.len())
            .min_by(|&i, &j| entries[i].0.cmp_y_x(&entries[j].0))
            .unwrap_or(0);
        entries.rotate_left(start);
        let (corners, lines) = entries.into_iter().unzip();
        Self { corners, lines }
    }

    /// The corners, counter-clockwise from the canonical start corner.
    pub fn corners(&self) -> &[ExactPoint] {
        &self.corners
    }

    /// The corner with the given index.
    pub fn corner(&self, index: usize) -> &ExactPoint {
        &self.corners[index]
    }

    /// The number of corners.
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    /// The lattice-defined line of the edge from corner `index` to the
    /// next corner.
    pub fn edge_line(&self, index: usize) -> Line {
        self.lines[index]
    }

    /// The edge lines, in traversal order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The corners as approximate points.
    pub fn corner_approx_arr(&self) -> Vec<FloatPoint> {
        self.corners.iter().map(|c| c.to_float()).collect()
    }

    /// The enclosed area, exactly.
    ///
    /// Rational division corners contribute exactly, so the pieces of a
    /// decomposition sum to precisely the area of the whole.
    pub fn area_exact(&self) -> BigRational {
        let n = self.corners.len();
        let mut sum = BigRational::zero();
        for i in 0..n {
            let (px, py) = self.corners[i].to_ratio();
            let (qx, qy) = self.corners[(i + 1) % n].to_ratio();
            sum += &px * &qy - &qx * &py;
        }
        sum / BigRational::from_integer(BigInt::from(2))
    }

    /// The enclosed area.
    pub fn area(&self) -> f64 {
        self.area_exact().to_f64().unwrap_or(f64::INFINITY)
    }

    /// Returns true if every corner turns left (no reflex corner).
    pub fn is_convex(&self) -> bool {
        (0..self.corners.len()).all(|i| !self.is_reflex(i))
    }

    /// Returns true if the corner with the given index is reflex
    /// (interior angle above 180 degrees).
    pub fn is_reflex(&self, index: usize) -> bool {
        let n = self.corners.len();
        let prev = &self.corners[(index + n - 1) % n];
        let next = &self.corners[(index + 1) % n];
        ExactPoint::turn(prev, &self.corners[index], next) == Side::Right
    }

    /// The convex tile shape with this polygon's boundary.
    ///
    /// Meaningful only for convex polygons; a reflex corner would be
    /// cut off by its neighboring half-planes.
    pub fn to_tile_shape(&self) -> TileShape {
        TileShape::Simplex(Simplex::new(self.lines.clone())).simplify()
    }

    /// Decomposes the polygon into convex pieces with the default
    /// generator seed.
    pub fn split_to_convex(&self) -> Result<Vec<Polygon>, DecomposeError> {
        self.split_to_convex_seeded(DEFAULT_SEED)
    }

    /// Decomposes the polygon into convex pieces that tile it exactly.
    ///
    /// A pseudo-random generator seeded with `seed` picks the corner
    /// where the scan for reflex corners starts, so results are
    /// reproducible per seed. At the first reflex corner found, the
    /// shortest axis-aligned division segment to another edge that keeps
    /// both new corners convex splits the polygon in two; both halves
    /// are decomposed recursively.
    ///
    /// Fails with [`DecomposeError::SelfIntersecting`] if two
    /// non-adjacent edges cross, and with
    /// [`DecomposeError::NoValidDivision`] if a reflex corner admits no
    /// valid division segment.
    pub fn split_to_convex_seeded(&self, seed: u64) -> Result<Vec<Polygon>, DecomposeError> {
        if self.has_crossing_edges() {
            return Err(DecomposeError::SelfIntersecting);
        }
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut result = Vec::new();
        self.split_recursive(&mut rng, &mut result)?;
        Ok(result)
    }

    /// Decomposes into convex tile shapes (the default seed).
    pub fn split_to_tile_shapes(&self) -> Result<Vec<TileShape>, DecomposeError> {
        Ok(self
            .split_to_convex()?
            .iter()
            .map(Polygon::to_tile_shape)
            .collect())
    }

    fn split_recursive(
        &self,
        rng: &mut SmallRng,
        result: &mut Vec<Polygon>,
    ) -> Result<(), DecomposeError> {
        let n = self.corners.len();
        let start = rng.gen_range(0..n);
        let mut reflex = None;
        for step in 0..n {
            let i = (start + step) % n;
            if self.is_reflex(i) {
                reflex = Some(i);
                break;
            }
        }
        let Some(first_reflex) = reflex else {
            result.push(self.clone());
            return Ok(());
        };
        // Try every reflex corner from the first one found before giving
        // up.
        for step in 0..n {
            let i = (first_reflex + step) % n;
            if !self.is_reflex(i) {
                continue;
            }
            if let Some((edge, division, direction)) = self.find_division(i) {
                let (a, b) = self.split_at(i, edge, division, direction);
                a.split_recursive(rng, result)?;
                b.split_recursive(rng, result)?;
                return Ok(());
            }
        }
        Err(DecomposeError::NoValidDivision {
            corner: first_reflex,
        })
    }

    /// Finds the shortest valid axis-aligned division from the reflex
    /// corner `index` to another edge: the target edge index and the
    /// division point on it.
    fn find_division(&self, index: usize) -> Option<(usize, ExactPoint, Direction)> {
        let n = self.corners.len();
        let ExactPoint::Int(reflex) = &self.corners[index] else {
            // Division lines must be lattice lines; reflex corners
            // produced by this module are always lattice points.
            return None;
        };
        let reflex = *reflex;
        let reflex_exact = &self.corners[index];
        let prev = &self.corners[(index + n - 1) % n];
        let next = &self.corners[(index + 1) % n];

        let mut best: Option<(usize, ExactPoint, Direction, f64)> = None;
        for direction in [
            Direction::RIGHT,
            Direction::UP,
            Direction::LEFT,
            Direction::DOWN,
        ] {
            // Both new corners at the reflex corner must turn left (or
            // merge into a straight edge): the ray direction has to stay
            // within the reflex wedge.
            let probe = ExactPoint::Int(reflex + direction.to_vector());
            if ExactPoint::turn(prev, reflex_exact, &probe) == Side::Right {
                continue;
            }
            if ExactPoint::turn(&probe, reflex_exact, next) == Side::Right {
                continue;
            }
            let ray = Line::with_direction(reflex, direction);
            for edge in 0..n {
                let line = self.lines[edge];
                if line.is_parallel(&ray) {
                    continue;
                }
                let q = ray
                    .intersection(&line)
                    .expect("non-parallel lines intersect");
                if q == *reflex_exact {
                    continue;
                }
                // Forward along the ray, and within the edge segment.
                if cmp_along(direction, &q, reflex_exact).is_le() {
                    continue;
                }
                if !point_within_edge(&q, &self.corners[edge], &self.corners[(edge + 1) % n]) {
                    continue;
                }
                let distance = q.to_float().sq_distance(reflex_exact.to_float());
                match &best {
                    Some((_, _, _, d)) if *d <= distance => {}
                    _ => best = Some((edge, q, direction, distance)),
                }
            }
        }
        best.map(|(edge, q, direction, _)| (edge, q, direction))
    }

    /// Splits at the division segment from the reflex corner `index` to
    /// point `division` on edge `edge`, returning the two halves.
    fn split_at(
        &self,
        index: usize,
        edge: usize,
        division: ExactPoint,
        direction: Direction,
    ) -> (Polygon, Polygon) {
        let n = self.corners.len();
        let ExactPoint::Int(reflex) = &self.corners[index] else {
            unreachable!("division starts at a lattice reflex corner");
        };
        let reflex = *reflex;
        // The division line through the reflex corner, pointing at the
        // division point; the backward half lies on its left.
        let division_line = Line::with_direction(reflex, direction);

        // Half A: reflex corner forward to the target edge, closed by
        // the reversed division line.
        let mut corners_a = Vec::new();
        let mut lines_a = Vec::new();
        let mut i = index;
        loop {
            corners_a.push(self.corners[i].clone());
            lines_a.push(self.lines[i]);
            if i == edge {
                break;
            }
            i = (i + 1) % n;
        }
        corners_a.push(division.clone());
        lines_a.push(division_line.opposite());

        // Half B: the division point forward to the reflex corner.
        let mut corners_b = vec![division];
        let mut lines_b = vec![self.lines[edge]];
        let mut i = (edge + 1) % n;
        while i != index {
            corners_b.push(self.corners[i].clone());
            lines_b.push(self.lines[i]);
            i = (i + 1) % n;
        }
        corners_b.push(self.corners[index].clone());
        lines_b.push(division_line);

        (
            Polygon::from_parts(corners_a, lines_a),
            Polygon::from_parts(corners_b, lines_b),
        )
    }

    fn has_crossing_edges(&self) -> bool {
        let n = self.corners.len();
        for i in 0..n {
            for j in i + 1..n {
                // Adjacent edges share a corner; skip them.
                if j == i || (j + 1) % n == i || (i + 1) % n == j {
                    continue;
                }
                let (a, b) = (&self.corners[i], &self.corners[(i + 1) % n]);
                let (c, d) = (&self.corners[j], &self.corners[(j + 1) % n]);
                let s1 = ExactPoint::turn(a, b, c);
                let s2 = ExactPoint::turn(a, b, d);
                let s3 = ExactPoint::turn(c, d, a);
                let s4 = ExactPoint::turn(c, d, b);
                if s1 != s2
                    && s3 != s4
                    && s1.is_strict()
                    && s2.is_strict()
                    && s3.is_strict()
                    && s4.is_strict()
                {
                    return true;
                }
            }
        }
        false
    }
}

/// True if `q` lies within the closed segment from `a` to `b`; `q` is
/// assumed collinear with them.
fn point_within_edge(q: &ExactPoint, a: &ExactPoint, b: &ExactPoint) -> bool {
    let x_ok = match a.cmp_x(b) {
        std::cmp::Ordering::Less => q.cmp_x(a).is_ge() && q.cmp_x(b).is_le(),
        std::cmp::Ordering::Greater => q.cmp_x(b).is_ge() && q.cmp_x(a).is_le(),
        std::cmp::Ordering::Equal => q.cmp_x(a).is_eq(),
    };
    let y_ok = match a.cmp_y(b) {
        std::cmp::Ordering::Less => q.cmp_y(a).is_ge() && q.cmp_y(b).is_le(),
        std::cmp::Ordering::Greater => q.cmp_y(b).is_ge() && q.cmp_y(a).is_le(),
        std::cmp::Ordering::Equal => q.cmp_y(a).is_eq(),
    };
    x_ok && y_ok
}

/// Exact ordering of two points along an axis direction.
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

/// Removes duplicate and collinear-redundant corners.
fn cleanup_corners(points: Vec<Point>) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        insert_corner(&mut out, p);
    }
    // The wrap-around triples need the same treatment.
    loop {
        let n = out.len();
        if n < 3 {
            break;
        }
        if out.first() == out.last() {
            out.pop();
            continue;
        }
        if collinear(out[n - 2], out[n - 1], out[0]) {
            drop_collinear_middle(&mut out, n - 1);
            continue;
        }
        let n = out.len();
        if n >= 3 && collinear(out[n - 1], out[0], out[1]) {
            drop_collinear_middle(&mut out, 0);
            continue;
        }
        break;
    }
    out
}

fn insert_corner(out: &mut Vec<Point>, p: Point) {
    if out.last() == Some(&p) {
        return;
    }
    while out.len() >= 2 {
        let b = out[out.len() - 1];
        let a = out[out.len() - 2];
        if !collinear(a, b, p) {
            break;
        }
        if a.sq_distance(p) >= a.sq_distance(b) {
            // The new point extends the edge; the middle corner goes.
            out.pop();
        } else {
            // The new point falls inside the edge and is dropped.
            return;
        }
    }
    out.push(p);
}

fn drop_collinear_middle(out: &mut Vec<Point>, middle: usize) {
    out.remove(middle);
}

fn collinear(a: Point, b: Point, c: Point) -> bool {
    (b - a).cross(c - a) == 0
}

fn signed_area_2x(points: &[Point]) -> i128 {
    let mut sum = 0i128;
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        sum += p.x as i128 * q.y as i128 - q.x as i128 * p.y as i128;
    }
    sum
}

impl Bounded for Polygon {
    fn bounding_box(&self) -> IntBox {
        let mut result = IntBox::EMPTY;
        for c in &self.corners {
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
        let mut result = IntOctagon::EMPTY;
        for c in &self.corners {
            let b = IntOctagon::new(
                c.floor_x(),
                c.floor_y(),
                c.ceil_x(),
                c.ceil_y(),
                c.floor_diff(),
                c.ceil_diff(),
                c.floor_sum(),
                c.ceil_sum(),
            );
            result = result.union(b);
        }
        result
    }
}

impl Contains<Point> for Polygon {
    /// Exact point containment by ray-crossing parity.
    fn containment(&self, p: &Point) -> Containment {
        let probe = ExactPoint::Int(*p);
        let n = self.corners.len();
        let mut crossings = 0;
        for i in 0..n {
            let a = &self.corners[i];
            let b = &self.corners[(i + 1) % n];
            if ExactPoint::turn(a, b, &probe) == Side::Collinear
                && point_within_edge(&probe, a, b)
            {
                return Containment::Border;
            }
            // Count edges crossing the horizontal ray to the right of
            // `p`; half-open spans keep shared corners from double
            // counting.
            let a_below = a.cmp_y(&probe).is_le();
            let b_below = b.cmp_y(&probe).is_le();
            if a_below == b_below {
                continue;
            }
            let side = ExactPoint::turn(a, b, &probe);
            let crosses_right = if a_below {
                // Upward edge: the point must be strictly left of it.
                side == Side::Left
            } else {
                side == Side::Right
            };
            if crosses_right {
                crossings += 1;
            }
        }
        if crossings % 2 == 1 {
            Containment::Inside
        } else {
            Containment::Outside
        }
    }
}

impl Transform for Polygon {
    fn translate(self, v: Vector) -> Self {
        Polygon::from_parts(
            self.corners.into_iter().map(|c| c.translate(v)).collect(),
            self.lines.into_iter().map(|l| l.translate(v)).collect(),
        )
    }

    fn turn_90(self, rotation: Rotation, pole: Point) -> Self {
        Polygon::from_parts(
            self.corners
                .into_iter()
                .map(|c| c.turn_90(rotation, pole))
                .collect(),
            self.lines
                .into_iter()
                .map(|l| l.turn_90(rotation, pole))
                .collect(),
        )
    }

    fn mirror_vertical(self, pole: Point) -> Self {
        let (corners, lines) = mirror_parts(self.corners, self.lines, |c| {
            c.mirror_vertical(pole)
        });
        Polygon::from_parts(
            corners,
            lines.into_iter().map(|l| l.mirror_vertical(pole)).collect(),
        )
    }

    fn mirror_horizontal(self, pole: Point) -> Self {
        let (corners, lines) = mirror_parts(self.corners, self.lines, |c| {
            c.mirror_horizontal(pole)
        });
        Polygon::from_parts(
            corners,
            lines
                .into_iter()
                .map(|l| l.mirror_horizontal(pole))
                .collect(),
        )
    }
}

/// Mirroring reverses the winding; reverse the traversal so it stays
/// counter-clockwise. The new edge `i` is the mirrored original edge
/// `n - 1 - i`.
fn mirror_parts(
    corners: Vec<ExactPoint>,
    lines: Vec<Line>,
    map: impl Fn(ExactPoint) -> ExactPoint,
) -> (Vec<ExactPoint>, Vec<Line>) {
    let mut new_corners: Vec<ExactPoint> = corners.into_iter().map(map).collect();
    new_corners[1..].reverse();
    let mut new_lines = lines;
    new_lines.reverse();
    (new_corners, new_lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape() -> Polygon {
        Polygon::new(vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 5),
            Point::new(5, 5),
            Point::new(5, 10),
            Point::new(0, 10),
        ])
    }

    #[test]
    fn construction_removes_degenerate_corners() {
        let p = Polygon::new(vec![
            Point::new(0, 0),
            Point::new(5, 0),
            Point::new(5, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ]);
        // (5,0) is dropped as a duplicate and as collinear on the bottom
        // edge.
        assert_eq!(p.corner_count(), 4);
        assert_eq!(p.area(), 100.0);
    }

    #[test]
    fn winding_is_normalized_counter_clockwise() {
        let cw = Polygon::new(vec![
            Point::new(0, 10),
            Point::new(10, 10),
            Point::new(10, 0),
            Point::new(0, 0),
        ]);
        assert!(cw.area() > 0.0);
        assert_eq!(cw.corner(0), &ExactPoint::Int(Point::new(0, 0)));
    }

    #[test]
    fn canonical_start_corner_is_lowest() {
        let p = Polygon::new(vec![
            Point::new(4, 7),
            Point::new(-2, 3),
            Point::new(1, -5),
            Point::new(6, 0),
        ]);
        assert_eq!(p.corner(0), &ExactPoint::Int(Point::new(1, -5)));
    }

    #[test]
    fn reflex_detection() {
        let l = l_shape();
        let reflex: Vec<usize> = (0..l.corner_count()).filter(|&i| l.is_reflex(i)).collect();
        assert_eq!(reflex.len(), 1);
        assert_eq!(l.corner(reflex[0]), &ExactPoint::Int(Point::new(5, 5)));
        assert!(!l.is_convex());
    }

    #[test]
    fn containment_by_parity() {
        let l = l_shape();
        assert_eq!(l.containment(&Point::new(2, 2)), Containment::Inside);
        assert_eq!(l.containment(&Point::new(8, 2)), Containment::Inside);
        assert_eq!(l.containment(&Point::new(2, 8)), Containment::Inside);
        assert_eq!(l.containment(&Point::new(8, 8)), Containment::Outside);
        assert_eq!(l.containment(&Point::new(5, 5)), Containment::Border);
        assert_eq!(l.containment(&Point::new(5, 7)), Containment::Border);
        assert_eq!(l.containment(&Point::new(0, 0)), Containment::Border);
        assert_eq!(l.containment(&Point::new(-1, 5)), Containment::Outside);
    }

    #[test]
    fn convex_polygon_decomposes_to_itself() {
        let convex = Polygon::new(vec![
            Point::new(0, 0),
            Point::new(8, 0),
            Point::new(10, 6),
            Point::new(4, 9),
        ]);
        let pieces = convex.split_to_convex().expect("decomposable");
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0], convex);
    }

    #[test]
    fn l_shape_decomposes_into_two_pieces() {
        let l = l_shape();
        let pieces = l.split_to_convex().expect("decomposable");
        assert_eq!(pieces.len(), 2);
        for piece in &pieces {
            assert!(piece.is_convex());
        }
        let total: f64 = pieces.iter().map(Polygon::area).sum();
        assert_eq!(total, l.area());
        assert_eq!(total, 75.0);
    }

    #[test]
    fn decomposition_is_reproducible_per_seed() {
        let l = l_shape();
        let a = l.split_to_convex_seeded(7).expect("decomposable");
        let b = l.split_to_convex_seeded(7).expect("decomposable");
        assert_eq!(a, b);
    }

    #[test]
    fn staircase_decomposition_preserves_area() {
        let stairs = Polygon::new(vec![
            Point::new(0, 0),
            Point::new(12, 0),
            Point::new(12, 4),
            Point::new(8, 4),
            Point::new(8, 8),
            Point::new(4, 8),
            Point::new(4, 12),
            Point::new(0, 12),
        ]);
        let pieces = stairs.split_to_convex().expect("decomposable");
        assert!(pieces.len() >= 3);
        for piece in &pieces {
            assert!(piece.is_convex());
        }
        // The partition is exact, so the piece areas sum with no
        // tolerance at all.
        let total = pieces
            .iter()
            .fold(BigRational::zero(), |acc, p| acc + p.area_exact());
        assert_eq!(total, stairs.area_exact());
        // Pieces convert to tile shapes without losing area.
        let shapes: f64 = pieces
            .iter()
            .map(|p| p.to_tile_shape().area())
            .sum();
        assert_eq!(shapes, stairs.area());
    }

    #[test]
    fn self_intersecting_outline_is_rejected() {
        // The edges (10,0)-(2,5) and (8,5)-(0,0) cross near (5, 3).
        let crossed = Polygon::new(vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(2, 5),
            Point::new(8, 5),
        ]);
        assert_eq!(
            crossed.split_to_convex(),
            Err(DecomposeError::SelfIntersecting)
        );
    }

    #[test]
    fn transforms_preserve_area_and_canonical_form() {
        let l = l_shape();
        let pole = Point::new(3, 4);
        assert_eq!(l.clone().translate(Vector::new(5, -2)).area(), 75.0);
        assert_eq!(l.clone().turn_90(Rotation::R90, pole).area(), 75.0);
        let mirrored = l.clone().mirror_vertical(pole);
        assert_eq!(mirrored.area(), 75.0);
        let back = mirrored.mirror_vertical(pole);
        assert_eq!(back, l);
    }

    #[test]
    fn bounding_regions() {
        let l = l_shape();
        assert_eq!(l.bounding_box(), IntBox::from_sides(0, 0, 10, 10));
        let oct = l.bounding_octagon();
        assert_eq!(oct.to_box(), IntBox::from_sides(0, 0, 10, 10));
        assert_eq!(oct.llx, 0);
    }
}
