//! Caller-facing path representation.
//!
//! A [`Path`] is an owned, ordered sequence of [`PathSegment`]s. Each
//! segment starts where the previous one ended; the first segment starts at
//! the origin. `MoveTo` opens a new subpath without drawing.

mod clean;
mod flatten;
mod perturb;

pub use clean::{remove_adjacent_duplicates, separate_coincident_points};
pub use flatten::{flatten_path, flattened_len, FlattenMode, Vertex, VertexList};
pub use perturb::{perturb_vertices, PERTURB_SEED};

use crate::error::PolyError;
use crate::io::format_path_data;
use crate::primitives::Point2;
use std::fmt;

/// One element of a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Start a new subpath at the given point.
    MoveTo(Point2<f64>),
    /// Straight line from the current point.
    LineTo(Point2<f64>),
    /// Quadratic curve from the current point to `to`, bent toward `control`.
    CurveTo {
        to: Point2<f64>,
        control: Point2<f64>,
    },
}

impl PathSegment {
    /// The point this segment ends at, which is where the next one starts.
    #[inline]
    pub fn end_point(&self) -> Point2<f64> {
        match *self {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => p,
            PathSegment::CurveTo { to, .. } => to,
        }
    }

    /// True for `MoveTo`.
    #[inline]
    pub fn is_move(&self) -> bool {
        matches!(self, PathSegment::MoveTo(_))
    }

    /// True for segments that draw (`LineTo` and `CurveTo`).
    #[inline]
    pub fn is_drawing(&self) -> bool {
        !self.is_move()
    }

    fn is_finite(&self) -> bool {
        match *self {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => p.is_finite(),
            PathSegment::CurveTo { to, control } => to.is_finite() && control.is_finite(),
        }
    }
}

/// An owned sequence of path segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Creates an empty path.
    #[inline]
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Creates an empty path with room for `capacity` segments.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: Vec::with_capacity(capacity),
        }
    }

    /// Wraps an existing segment list.
    #[inline]
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Closed axis-aligned rectangle: `(x1,y1) (x1,y2) (x2,y2) (x2,y1) (x1,y1)`.
    pub fn rectangle(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new()
            .move_to(x1, y1)
            .line_to(x1, y2)
            .line_to(x2, y2)
            .line_to(x2, y1)
            .line_to(x1, y1)
    }

    /// Appends a `MoveTo`.
    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::MoveTo(Point2::new(x, y)));
        self
    }

    /// Appends a `LineTo`.
    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::LineTo(Point2::new(x, y)));
        self
    }

    /// Appends a quadratic `CurveTo` ending at `(x, y)` with control point `(cx, cy)`.
    pub fn curve_to(mut self, x: f64, y: f64, cx: f64, cy: f64) -> Self {
        self.segments.push(PathSegment::CurveTo {
            to: Point2::new(x, y),
            control: Point2::new(cx, cy),
        });
        self
    }

    /// Appends a segment in place.
    #[inline]
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// The segments in order.
    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Iterates over the segments.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, PathSegment> {
        self.segments.iter()
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when the path has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of `MoveTo` segments.
    pub fn subpath_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_move()).count()
    }

    /// Number of segments that draw (everything but `MoveTo`).
    pub fn drawing_segment_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_drawing()).count()
    }

    /// Fails on the first segment carrying a NaN or infinite coordinate.
    pub fn validate(&self) -> Result<(), PolyError> {
        match self.segments.iter().position(|s| !s.is_finite()) {
            Some(index) => Err(PolyError::NonFiniteCoordinate { index }),
            None => Ok(()),
        }
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl Extend<PathSegment> for Path {
    fn extend<I: IntoIterator<Item = PathSegment>>(&mut self, iter: I) {
        self.segments.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl IntoIterator for Path {
    type Item = PathSegment;
    type IntoIter = std::vec::IntoIter<PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

/// Formats the path as SVG path data, e.g. `M0 0 L10 0 Q15 5 10 10`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_path_data(self))
    }
}
