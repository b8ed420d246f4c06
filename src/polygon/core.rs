//! Polygon, contour and winding-rule types.
//!
//! Coordinates are y-down. A contour that winds counter-clockwise on screen
//! (negative shoelace sum) bounds area: with an `Ascending` flag it adds +1
//! to the winding number of every point it encloses, with `Descending` -1.

use crate::primitives::Point2;
use num_traits::Float;
use std::fmt;

/// Per-contour winding direction flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Edges count in the order they are stored.
    Ascending,
    /// Edges count as if traversed in reverse.
    Descending,
}

impl Direction {
    /// The opposite flag.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    /// +1 for `Ascending`, -1 for `Descending`.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Ascending => 1,
            Direction::Descending => -1,
        }
    }
}

/// Rule deciding which winding numbers are inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillRule {
    /// Odd winding numbers are inside.
    EvenOdd,
    /// Any non-zero winding number is inside.
    NonZero,
    /// Strictly positive winding numbers are inside.
    Positive,
}

impl FillRule {
    /// Whether a point with winding number `winding` is filled.
    #[inline]
    pub fn contains(self, winding: i32) -> bool {
        match self {
            FillRule::EvenOdd => winding.rem_euclid(2) == 1,
            FillRule::NonZero => winding != 0,
            FillRule::Positive => winding > 0,
        }
    }
}

/// One closed ring of a polygon plus its direction flag.
///
/// The last point repeats the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    points: Vec<Point2<f64>>,
    direction: Direction,
}

impl Contour {
    /// Creates a contour, closing it if the last point differs from the first.
    pub fn new(mut points: Vec<Point2<f64>>, direction: Direction) -> Self {
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            if first != last {
                points.push(first);
            }
        }
        Self { points, direction }
    }

    #[inline]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Swaps `Ascending` and `Descending`.
    #[inline]
    pub fn flip_direction(&mut self) {
        self.direction = self.direction.flipped();
    }

    /// Number of stored points, including the closing point.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs of the ring.
    pub fn edges(&self) -> impl Iterator<Item = (Point2<f64>, Point2<f64>)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Shoelace sum over the stored order, halved. Negative for rings that
    /// wind counter-clockwise on a y-down screen.
    pub fn signed_area(&self) -> f64 {
        polygon_signed_area(&self.points)
    }

    /// Area this contour contributes under its direction flag: positive when
    /// it bounds area, negative when it excludes area.
    pub fn bounded_area(&self) -> f64 {
        -self.signed_area() * f64::from(self.direction.sign())
    }

    /// This contour's contribution to the winding number at `p`.
    pub fn winding_at(&self, p: Point2<f64>) -> i32 {
        let crossings: i32 = self.edges().map(|(a, b)| edge_crossing(a, b, p)).sum();
        -crossings * self.direction.sign()
    }

    /// (min, max) corners, or `None` for an empty contour.
    pub fn bounding_box(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        bounding_box(&self.points)
    }
}

/// A set of contours with direction flags.
///
/// Values are plain owned data: moving a polygon transfers it, dropping it
/// frees it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    contours: Vec<Contour>,
}

impl Polygon {
    /// The polygon with no contours.
    #[inline]
    pub fn empty() -> Self {
        Self {
            contours: Vec::new(),
        }
    }

    #[inline]
    pub fn from_contours(contours: Vec<Contour>) -> Self {
        Self { contours }
    }

    #[inline]
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    #[inline]
    pub fn contours_mut(&mut self) -> &mut [Contour] {
        &mut self.contours
    }

    #[inline]
    pub fn into_contours(self) -> Vec<Contour> {
        self.contours
    }

    #[inline]
    pub fn contour_count(&self) -> usize {
        self.contours.len()
    }

    /// True when there are no contours.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Total stored points over all contours.
    pub fn vertex_count(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    /// Flips every contour's direction flag.
    pub fn flip_directions(&mut self) {
        for contour in &mut self.contours {
            contour.flip_direction();
        }
    }

    /// Winding number at `p` summed over all contours.
    pub fn winding_at(&self, p: Point2<f64>) -> i32 {
        self.contours.iter().map(|c| c.winding_at(p)).sum()
    }

    /// Whether `p` is filled under `rule`. Points on an edge may go either way.
    pub fn contains(&self, p: Point2<f64>, rule: FillRule) -> bool {
        rule.contains(self.winding_at(p))
    }

    /// Sum of [`Contour::bounded_area`]. Equals the filled area for polygons
    /// whose contours do not overlap, such as resolved kernel output.
    pub fn net_area(&self) -> f64 {
        self.contours.iter().map(Contour::bounded_area).sum()
    }

    /// (min, max) corners over all contours.
    pub fn bounding_box(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        self.contours
            .iter()
            .filter_map(Contour::bounding_box)
            .reduce(|(min_a, max_a), (min_b, max_b)| {
                (
                    Point2::new(min_a.x.min(min_b.x), min_a.y.min(min_b.y)),
                    Point2::new(max_a.x.max(max_b.x), max_a.y.max(max_b.y)),
                )
            })
    }
}

/// Multi-line debugging dump: contour count, then per contour its point
/// count, direction, bounding box and points.
impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Contours: {}", self.contours.len())?;
        for (i, contour) in self.contours.iter().enumerate() {
            let dir = match contour.direction {
                Direction::Ascending => "ASC ",
                Direction::Descending => "DESC",
            };
            let (min, max) = contour
                .bounding_box()
                .unwrap_or((Point2::origin(), Point2::origin()));
            writeln!(
                f,
                "Contour {}: {} points, {}, BBox: ({},{},{},{})",
                i,
                contour.len(),
                dir,
                min.x,
                min.y,
                max.x,
                max.y
            )?;
            for p in contour.points() {
                writeln!(f, "        ({},{})", p.x, p.y)?;
            }
        }
        Ok(())
    }
}

/// Computes the signed area of a ring using the shoelace formula.
///
/// The ring may or may not repeat its first point at the end.
pub fn polygon_signed_area<F: Float>(vertices: &[Point2<F>]) -> F {
    if vertices.len() < 3 {
        return F::zero();
    }

    let mut area = F::zero();
    let n = vertices.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area = area + vertices[i].x * vertices[j].y;
        area = area - vertices[j].x * vertices[i].y;
    }

    area / (F::one() + F::one())
}

/// Crossing contribution of the edge `a -> b` to the winding number of `p`.
///
/// Casts a ray from `p` toward +x. Edges rising in y that pass to the right of
/// `p` count +1, falling ones -1. The half-open rule on y keeps a ray through
/// a shared vertex from counting it twice.
#[inline]
pub(crate) fn edge_crossing<F: Float>(a: Point2<F>, b: Point2<F>, p: Point2<F>) -> i32 {
    let side = (b - a).cross(p - a);
    if a.y <= p.y {
        if b.y > p.y && side > F::zero() {
            return 1;
        }
    } else if b.y <= p.y && side < F::zero() {
        return -1;
    }
    0
}

/// (min, max) corners of a point set.
pub(crate) fn bounding_box<F: Float>(points: &[Point2<F>]) -> Option<(Point2<F>, Point2<F>)> {
    let first = *points.first()?;
    Some(points[1..].iter().fold((first, first), |(min, max), p| {
        (
            Point2::new(min.x.min(p.x), min.y.min(p.y)),
            Point2::new(max.x.max(p.x), max.y.max(p.y)),
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Counter-clockwise on a y-down screen: down the left side first.
    fn screen_ccw_square() -> Contour {
        Contour::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(0.0, 10.0),
                Point2::new(10.0, 10.0),
                Point2::new(10.0, 0.0),
            ],
            Direction::Ascending,
        )
    }

    fn screen_cw_square() -> Contour {
        Contour::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 10.0),
                Point2::new(0.0, 10.0),
            ],
            Direction::Ascending,
        )
    }

    #[test]
    fn test_contour_closes() {
        let contour = screen_ccw_square();
        assert_eq!(contour.len(), 5);
        assert_eq!(contour.points()[0], contour.points()[4]);

        let already_closed = Contour::new(contour.points().to_vec(), Direction::Ascending);
        assert_eq!(already_closed.len(), 5);
    }

    #[test]
    fn test_signed_area_orientation() {
        assert_relative_eq!(screen_ccw_square().signed_area(), -100.0);
        assert_relative_eq!(screen_cw_square().signed_area(), 100.0);
        assert_relative_eq!(screen_ccw_square().bounded_area(), 100.0);
    }

    #[test]
    fn test_winding_convention() {
        let inside = Point2::new(5.0, 5.0);
        let outside = Point2::new(15.0, 5.0);

        let mut ccw = screen_ccw_square();
        assert_eq!(ccw.winding_at(inside), 1);
        assert_eq!(ccw.winding_at(outside), 0);

        ccw.flip_direction();
        assert_eq!(ccw.direction(), Direction::Descending);
        assert_eq!(ccw.winding_at(inside), -1);

        assert_eq!(screen_cw_square().winding_at(inside), -1);
    }

    #[test]
    fn test_fill_rules() {
        assert!(FillRule::EvenOdd.contains(1));
        assert!(FillRule::EvenOdd.contains(-1));
        assert!(!FillRule::EvenOdd.contains(2));
        assert!(FillRule::NonZero.contains(-2));
        assert!(!FillRule::NonZero.contains(0));
        assert!(FillRule::Positive.contains(2));
        assert!(!FillRule::Positive.contains(-1));
    }

    #[test]
    fn test_polygon_winding_sums() {
        let mut polygon =
            Polygon::from_contours(vec![screen_ccw_square(), screen_ccw_square()]);
        let p = Point2::new(5.0, 5.0);
        assert_eq!(polygon.winding_at(p), 2);
        assert!(polygon.contains(p, FillRule::NonZero));
        assert!(!polygon.contains(p, FillRule::EvenOdd));

        polygon.flip_directions();
        assert_eq!(polygon.winding_at(p), -2);
        assert!(!polygon.contains(p, FillRule::Positive));
    }

    #[test]
    fn test_edge_crossing_shared_vertex() {
        // ray passes exactly through the vertex (10, 5) of a diamond
        let diamond = Contour::new(
            vec![
                Point2::new(5.0, 0.0),
                Point2::new(0.0, 5.0),
                Point2::new(5.0, 10.0),
                Point2::new(10.0, 5.0),
            ],
            Direction::Ascending,
        );
        assert_eq!(diamond.winding_at(Point2::new(5.0, 5.0)).abs(), 1);
        assert_eq!(diamond.winding_at(Point2::new(-1.0, 5.0)), 0);
    }

    #[test]
    fn test_bounding_box_and_counts() {
        let polygon = Polygon::from_contours(vec![
            screen_ccw_square(),
            Contour::new(
                vec![
                    Point2::new(20.0, -5.0),
                    Point2::new(25.0, 0.0),
                    Point2::new(30.0, -5.0),
                ],
                Direction::Ascending,
            ),
        ]);
        assert_eq!(polygon.vertex_count(), 9);
        assert_eq!(
            polygon.bounding_box(),
            Some((Point2::new(0.0, -5.0), Point2::new(30.0, 10.0)))
        );
        assert_eq!(Polygon::empty().bounding_box(), None);
    }

    #[test]
    fn test_display_dump() {
        let polygon = Polygon::from_contours(vec![screen_ccw_square()]);
        let dump = polygon.to_string();
        assert!(dump.starts_with("Contours: 1\n"));
        assert!(dump.contains("Contour 0: 5 points, ASC , BBox: (0,0,10,10)"));
        assert_eq!(dump.lines().count(), 2 + 5);
    }
}
