//! Path flattening into contour-marked vertex lists.
//!
//! Flattening runs in two passes over the path. The sizing pass computes the
//! exact number of vertices so the emission pass can write into a buffer
//! that never grows; emitting more than was sized is an internal bug and
//! panics.

use super::{Path, PathSegment};
use crate::curves::QuadraticBezier2;
use crate::primitives::Point2;

/// What the flattened vertices will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlattenMode {
    /// Area fill. Zero-length segments are left alone.
    Fill,
    /// Stroking. Single-point subpaths are stretched so they stay visible.
    Stroke,
}

/// A flattened path vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    /// True for the first vertex of a contour (the `MoveTo` equivalent).
    pub starts_contour: bool,
}

impl Vertex {
    /// A vertex that opens a new contour.
    #[inline]
    pub fn move_to(p: Point2<f64>) -> Self {
        Self {
            x: p.x,
            y: p.y,
            starts_contour: true,
        }
    }

    /// A vertex that continues the current contour.
    #[inline]
    pub fn line_to(p: Point2<f64>) -> Self {
        Self {
            x: p.x,
            y: p.y,
            starts_contour: false,
        }
    }

    #[inline]
    pub fn point(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    /// Exact coordinate equality, ignoring the contour marker.
    #[inline]
    pub fn same_position(&self, other: &Vertex) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// A flat list of vertices describing one or more contours.
///
/// A new contour begins at every vertex with `starts_contour` set, and at
/// the first vertex regardless of its marker. The end of the list is the
/// terminator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexList {
    vertices: Vec<Vertex>,
}

impl VertexList {
    /// Wraps a vertex vector.
    #[inline]
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    #[inline]
    pub fn as_slice(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn as_mut_vec(&mut self) -> &mut Vec<Vertex> {
        &mut self.vertices
    }

    #[inline]
    pub fn into_vec(self) -> Vec<Vertex> {
        self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Vertex> {
        self.vertices.iter()
    }

    /// Index ranges of each contour within the list.
    pub fn contour_ranges(&self) -> Vec<std::ops::Range<usize>> {
        let mut ranges = Vec::new();
        let mut start = 0;

        for (i, v) in self.vertices.iter().enumerate().skip(1) {
            if v.starts_contour {
                ranges.push(start..i);
                start = i;
            }
        }
        if start < self.vertices.len() {
            ranges.push(start..self.vertices.len());
        }

        ranges
    }

    /// The vertices of each contour as slices.
    pub fn contours(&self) -> impl Iterator<Item = &[Vertex]> + '_ {
        self.contour_ranges()
            .into_iter()
            .map(move |range| &self.vertices[range])
    }

    /// The points of each contour, ready to hand to a geometry kernel.
    pub fn contour_points(&self) -> Vec<Vec<Point2<f64>>> {
        self.contours()
            .map(|contour| contour.iter().map(Vertex::point).collect())
            .collect()
    }

    /// Number of contours.
    pub fn contour_count(&self) -> usize {
        self.contour_ranges().len()
    }

    /// True if any two neighbouring vertices share coordinates.
    pub fn has_adjacent_duplicates(&self) -> bool {
        self.vertices
            .windows(2)
            .any(|pair| pair[0].same_position(&pair[1]))
    }
}

/// Exact number of vertices [`flatten_path`] emits for `path`.
///
/// Every `MoveTo` and `LineTo` contributes one vertex and every `CurveTo`
/// contributes `parts + 1`.
pub fn flattened_len(path: &Path, subdivision_factor: f64) -> usize {
    let mut len = 0usize;
    let mut current = Point2::origin();

    for segment in path {
        match *segment {
            PathSegment::MoveTo(_) | PathSegment::LineTo(_) => len += 1,
            PathSegment::CurveTo { to, control } => {
                let curve = QuadraticBezier2::new(current, control, to);
                len += curve.subdivision_parts(subdivision_factor) + 1;
            }
        }
        current = segment.end_point();
    }

    len
}

/// Flattens `path` into a vertex list.
///
/// Curves are sampled uniformly; the first sample of a curve sits on its
/// start point and so duplicates the preceding vertex, which the degeneracy
/// cleaner later removes.
///
/// # Example
///
/// ```
/// use pathpoly::path::{flatten_path, FlattenMode, Path};
///
/// let path = Path::new().move_to(0.0, 0.0).line_to(10.0, 0.0);
/// let vertices = flatten_path(&path, FlattenMode::Fill, 2.4, 0.01);
/// assert_eq!(vertices.len(), 2);
/// assert!(vertices.as_slice()[0].starts_contour);
/// ```
pub fn flatten_path(
    path: &Path,
    mode: FlattenMode,
    subdivision_factor: f64,
    dot_nudge: f64,
) -> VertexList {
    let bound = flattened_len(path, subdivision_factor);
    let mut vertices = Vec::with_capacity(bound);
    let mut current = Point2::origin();

    for segment in path {
        match *segment {
            PathSegment::MoveTo(p) => emit(&mut vertices, bound, Vertex::move_to(p)),
            PathSegment::LineTo(p) => emit(&mut vertices, bound, Vertex::line_to(p)),
            PathSegment::CurveTo { to, control } => {
                // The start is always the previous segment's endpoint, never
                // the previously emitted vertex.
                let curve = QuadraticBezier2::new(current, control, to);
                let parts = curve.subdivision_parts(subdivision_factor);
                for p in curve.uniform_points(parts) {
                    emit(&mut vertices, bound, Vertex::line_to(p));
                }
            }
        }
        current = segment.end_point();
    }

    assert_eq!(
        vertices.len(),
        bound,
        "flattening emitted a different vertex count than was sized"
    );

    if mode == FlattenMode::Stroke {
        nudge_single_point_subpaths(&mut vertices, dot_nudge);
    }

    VertexList::new(vertices)
}

#[inline]
fn emit(vertices: &mut Vec<Vertex>, bound: usize, vertex: Vertex) {
    assert!(
        vertices.len() < bound,
        "flattening overran its sized buffer of {} vertices",
        bound
    );
    vertices.push(vertex);
}

/// Stretches `MoveTo p, LineTo p` subpaths into a short horizontal segment.
///
/// A stroker drops zero-length segments, which would make a deliberate dot
/// disappear. Only applies when the `LineTo` is the last vertex of its
/// contour.
fn nudge_single_point_subpaths(vertices: &mut [Vertex], nudge: f64) {
    for t in 1..vertices.len() {
        let next_continues = vertices
            .get(t + 1)
            .map_or(false, |next| !next.starts_contour);

        if vertices[t - 1].starts_contour
            && !vertices[t].starts_contour
            && !next_continues
            && vertices[t - 1].same_position(&vertices[t])
        {
            vertices[t].x += nudge;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flatten(path: &Path, mode: FlattenMode) -> VertexList {
        flatten_path(path, mode, 2.4, 0.01)
    }

    #[test]
    fn test_single_line_is_two_vertices() {
        for &(x0, y0, x1, y1) in &[(0.0, 0.0, 1.0, 0.0), (-50.0, 3.5, 1e6, -2e6), (7.0, 7.0, 7.0, 8.0)] {
            let path = Path::new().move_to(x0, y0).line_to(x1, y1);
            let vertices = flatten(&path, FlattenMode::Fill);
            assert_eq!(vertices.len(), 2);
            assert!(vertices.as_slice()[0].starts_contour);
            assert!(!vertices.as_slice()[1].starts_contour);
        }
    }

    #[test]
    fn test_bare_line_opens_contour() {
        let path = Path::new().line_to(3.0, 4.0);
        let vertices = flatten(&path, FlattenMode::Fill);
        assert_eq!(vertices.len(), 1);
        assert_eq!(vertices.contour_count(), 1);
    }

    #[test]
    fn test_straight_curve_collapses() {
        // end == 2 * ctrl - start
        let path = Path::new().move_to(2.0, 2.0).curve_to(10.0, 6.0, 6.0, 4.0);
        let vertices = flatten(&path, FlattenMode::Fill);
        // MoveTo plus parts + 1 = 2 curve samples
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices.as_slice()[1].point(), Point2::new(2.0, 2.0));
        assert_eq!(vertices.as_slice()[2].point(), Point2::new(10.0, 6.0));
    }

    #[test]
    fn test_curve_uses_previous_endpoint() {
        let path = Path::new()
            .move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .curve_to(10.0, 10.0, 20.0, 5.0);
        let vertices = flatten(&path, FlattenMode::Fill);

        // second difference (-20, 0): sqrt(20) * 2.4 = 10.7 -> 10 parts
        assert_eq!(vertices.len(), 2 + 11);
        assert_eq!(vertices.len(), flattened_len(&path, 2.4));

        let samples = &vertices.as_slice()[2..];
        assert_eq!(samples[0].point(), Point2::new(10.0, 0.0));
        let last = samples[samples.len() - 1];
        assert_relative_eq!(last.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(last.y, 10.0, epsilon = 1e-9);
        let mid = samples[5];
        assert_relative_eq!(mid.x, 15.0, epsilon = 1e-9);
        assert_relative_eq!(mid.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sizing_matches_emission() {
        let path = Path::new()
            .move_to(0.0, 0.0)
            .curve_to(100.0, 0.0, 50.0, 80.0)
            .curve_to(0.0, 0.0, 50.0, -80.0)
            .move_to(500.0, 500.0)
            .line_to(600.0, 500.0)
            .curve_to(600.0, 500.0, 600.0, 500.0);

        for mode in [FlattenMode::Fill, FlattenMode::Stroke] {
            let vertices = flatten(&path, mode);
            assert_eq!(vertices.len(), flattened_len(&path, 2.4));
        }
    }

    #[test]
    fn test_stroke_nudges_dot() {
        let path = Path::new()
            .move_to(5.0, 5.0)
            .line_to(5.0, 5.0)
            .move_to(20.0, 20.0)
            .line_to(30.0, 20.0);

        let stroke = flatten(&path, FlattenMode::Stroke);
        assert_relative_eq!(stroke.as_slice()[1].x, 5.01, epsilon = 1e-12);
        assert_eq!(stroke.as_slice()[1].y, 5.0);
        assert_eq!(stroke.as_slice()[3].x, 30.0);

        let fill = flatten(&path, FlattenMode::Fill);
        assert_eq!(fill.as_slice()[1].x, 5.0);
    }

    #[test]
    fn test_dot_at_end_of_list_is_nudged() {
        let path = Path::new().move_to(1.0, 1.0).line_to(1.0, 1.0);
        let stroke = flatten(&path, FlattenMode::Stroke);
        assert_relative_eq!(stroke.as_slice()[1].x, 1.01, epsilon = 1e-12);
    }

    #[test]
    fn test_no_nudge_when_contour_continues() {
        let path = Path::new()
            .move_to(5.0, 5.0)
            .line_to(5.0, 5.0)
            .line_to(9.0, 5.0);
        let stroke = flatten(&path, FlattenMode::Stroke);
        assert_eq!(stroke.as_slice()[1].x, 5.0);
    }

    #[test]
    fn test_contour_ranges() {
        let path = Path::rectangle(0.0, 0.0, 1.0, 1.0).move_to(4.0, 4.0).line_to(5.0, 4.0);
        let vertices = flatten(&path, FlattenMode::Fill);
        assert_eq!(vertices.contour_ranges(), vec![0..5, 5..7]);
        let contours: Vec<_> = vertices.contours().map(|c| c.len()).collect();
        assert_eq!(contours, vec![5, 2]);
        assert_eq!(vertices.contour_points()[1][1], Point2::new(5.0, 4.0));
    }

    #[test]
    fn test_empty_path() {
        let vertices = flatten(&Path::new(), FlattenMode::Stroke);
        assert!(vertices.is_empty());
        assert_eq!(vertices.contour_count(), 0);
    }
}
