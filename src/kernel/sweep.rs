use super::overlay::Overlay;
use super::GeometryKernel;
use crate::path::VertexList;
use crate::polygon::{
    contours_from_vertices, stroke_outline, Contour, Direction, FillRule, Polygon, StrokeStyle,
};

/// Default kernel built on a planar overlay.
///
/// Points closer than `epsilon` are welded, and near-parallel edge pairs
/// within that tolerance are treated as collinear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepKernel {
    epsilon: f64,
}

impl Default for SweepKernel {
    fn default() -> Self {
        Self { epsilon: 1e-9 }
    }
}

impl SweepKernel {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl GeometryKernel for SweepKernel {
    fn fill_convert(&self, vertices: &VertexList) -> Polygon {
        Polygon::from_contours(contours_from_vertices(vertices, Direction::Ascending))
    }

    fn stroke_convert(
        &self,
        vertices: &VertexList,
        style: &StrokeStyle,
        flatness: f64,
    ) -> Polygon {
        let mut rings = Vec::new();
        for points in vertices.contour_points() {
            rings.extend(
                stroke_outline(
                    &points,
                    style.width,
                    style.cap,
                    style.join,
                    style.miter_limit,
                    flatness,
                )
                .into_iter()
                .filter(|ring| ring.len() >= 3)
                .map(|ring| Contour::new(ring, Direction::Ascending)),
            );
        }

        if rings.is_empty() {
            return Polygon::empty();
        }
        self.resolve_winding(Polygon::from_contours(rings), FillRule::NonZero)
    }

    fn resolve_winding(&self, polygon: Polygon, rule: FillRule) -> Polygon {
        if polygon.is_empty() {
            return polygon;
        }
        Overlay::new(&[&polygon], self.epsilon).extract(|w| rule.contains(w[0]))
    }

    fn union(&self, a: &Polygon, b: &Polygon) -> Polygon {
        Overlay::new(&[a, b], self.epsilon).extract(|w| w[0] != 0 || w[1] != 0)
    }

    fn intersect(&self, a: &Polygon, b: &Polygon) -> Polygon {
        if a.is_empty() || b.is_empty() {
            return Polygon::empty();
        }
        Overlay::new(&[a, b], self.epsilon).extract(|w| w[0] != 0 && w[1] != 0)
    }
}
