//! Geometry kernels: polygon construction, stroking, winding resolution and
//! boolean operations behind one trait.
//!
//! The flattening pipeline only relies on the contour and direction-flag
//! semantics of [`Polygon`]; anything implementing [`GeometryKernel`] can
//! stand in for the bundled [`SweepKernel`].

mod overlay;
mod sweep;

pub use sweep::SweepKernel;

use crate::path::VertexList;
use crate::polygon::{FillRule, Polygon, StrokeStyle};

/// Operations a polygon back end provides.
pub trait GeometryKernel {
    /// One contour per vertex-list contour, all flagged `Ascending`. No
    /// resolution happens here.
    fn fill_convert(&self, vertices: &VertexList) -> Polygon;

    /// Outline of every contour stroked with `style`, resolved. Curves in the
    /// outline (round caps and joins) deviate at most `flatness` from the
    /// true arc.
    fn stroke_convert(&self, vertices: &VertexList, style: &StrokeStyle, flatness: f64)
        -> Polygon;

    /// Non-overlapping contours covering exactly the points `rule` fills.
    fn resolve_winding(&self, polygon: Polygon, rule: FillRule) -> Polygon;

    /// Points filled (non-zero) by either operand.
    fn union(&self, a: &Polygon, b: &Polygon) -> Polygon;

    /// Points filled (non-zero) by both operands.
    fn intersect(&self, a: &Polygon, b: &Polygon) -> Polygon;
}
