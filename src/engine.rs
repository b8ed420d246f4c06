//! The conversion pipeline: path to polygon, polygon operations, polygon
//! back to path.
//!
//! [`PolyEngine`] bundles a [`PolyConfig`] with a [`GeometryKernel`]. The
//! free functions at the bottom of this module run on
//! `PolyEngine::default()`.

use crate::config::PolyConfig;
use crate::error::PolyError;
use crate::kernel::{GeometryKernel, SweepKernel};
use crate::path::{
    flatten_path, perturb_vertices, remove_adjacent_duplicates, separate_coincident_points,
    FlattenMode, Path, Vertex, VertexList, PERTURB_SEED,
};
use crate::polygon::{polygon_to_path, FillRule, Polygon, StrokeStyle};
use crate::primitives::Point2;
use crate::winding::correct_winding;

/// Path and polygon operations over a geometry kernel.
#[derive(Debug, Clone)]
pub struct PolyEngine<K = SweepKernel> {
    config: PolyConfig,
    kernel: K,
}

impl Default for PolyEngine<SweepKernel> {
    fn default() -> Self {
        let config = PolyConfig::default();
        Self {
            kernel: SweepKernel::new(config.kernel_epsilon),
            config,
        }
    }
}

impl PolyEngine<SweepKernel> {
    /// Engine on the bundled kernel, using the config's epsilon.
    ///
    /// Fails with [`PolyError::InvalidConfig`] when `config` does not
    /// validate.
    pub fn new(config: PolyConfig) -> Result<Self, PolyError> {
        Self::with_kernel(config, SweepKernel::new(config.kernel_epsilon))
    }
}

impl<K: GeometryKernel> PolyEngine<K> {
    /// Engine on a caller-supplied kernel. The config is validated first.
    pub fn with_kernel(config: PolyConfig, kernel: K) -> Result<Self, PolyError> {
        config.validate()?;
        Ok(Self { config, kernel })
    }

    #[inline]
    pub fn config(&self) -> &PolyConfig {
        &self.config
    }

    #[inline]
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Fills `path` under the even-odd rule.
    ///
    /// Shapes with more contours than `max_contours` are abandoned: one
    /// warning is logged under the `pathpoly::guard` target and the empty
    /// polygon comes back.
    ///
    /// # Example
    ///
    /// ```
    /// use pathpoly::{Path, PolyEngine};
    ///
    /// let engine = PolyEngine::default();
    /// let square = Path::rectangle(0.0, 0.0, 10.0, 10.0);
    /// let polygon = engine.fill_to_polygon(&square);
    ///
    /// assert_eq!(polygon.contour_count(), 1);
    /// assert_eq!(polygon.net_area(), 100.0);
    /// ```
    pub fn fill_to_polygon(&self, path: &Path) -> Polygon {
        match self.guarded_fill(path) {
            Some(polygon) => {
                let resolved = self.kernel.resolve_winding(polygon, FillRule::EvenOdd);
                log::debug!(
                    target: "pathpoly::engine",
                    "fill: {} segments -> {} contours",
                    path.len(),
                    resolved.contour_count()
                );
                resolved
            }
            None => self.empty_polygon(),
        }
    }

    /// Outlines `path` with `style`. Subpaths consisting of a single point
    /// are stretched by `dot_nudge` first so they still leave a mark.
    ///
    /// Cleaning merges a curve's first sample into the `MoveTo` before it,
    /// and the merged vertex no longer opens a contour. A subpath that
    /// starts with a curve directly after its `MoveTo` is therefore
    /// stroked as a continuation of the previous subpath, with a band
    /// joining the two. Subpaths whose first drawing segment is a line to a
    /// distinct point stay separate.
    pub fn stroke_to_polygon(&self, path: &Path, style: &StrokeStyle) -> Polygon {
        let vertices = self.flatten_clean(path, FlattenMode::Stroke);
        let polygon = self
            .kernel
            .stroke_convert(&vertices, style, self.config.stroke_flatness);
        log::debug!(
            target: "pathpoly::engine",
            "stroke: {} vertices, width {} -> {} contours",
            vertices.len(),
            style.width,
            polygon.contour_count()
        );
        polygon
    }

    /// Region covered by both polygons.
    pub fn intersect(&self, a: &Polygon, b: &Polygon) -> Polygon {
        self.kernel.intersect(a, b)
    }

    /// Region covered by either polygon.
    pub fn union(&self, a: &Polygon, b: &Polygon) -> Polygon {
        self.kernel.union(a, b)
    }

    /// Axis-aligned box as one unresolved five-point contour:
    /// `(x1,y1) (x1,y2) (x2,y2) (x2,y1) (x1,y1)`.
    ///
    /// A box with no width and no height has no contour at all.
    pub fn create_box(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Polygon {
        let corners = [(x1, y1), (x1, y2), (x2, y2), (x2, y1), (x1, y1)];
        let vertices: Vec<Vertex> = corners
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                let p = Point2::new(x, y);
                if i == 0 {
                    Vertex::move_to(p)
                } else {
                    Vertex::line_to(p)
                }
            })
            .collect();
        self.kernel.fill_convert(&VertexList::new(vertices))
    }

    /// Rewrites a path filled under the non-zero-style convention of
    /// circular (positive) winding into an equivalent path for even-odd
    /// filling. `None` when nothing is filled.
    pub fn circular_to_even_odd(&self, path: &Path) -> Option<Path> {
        let polygon = self.guarded_fill(path)?;
        let resolved = self.kernel.resolve_winding(polygon, FillRule::Positive);
        polygon_to_path(&resolved)
    }

    /// Flattened, cleaned, converted and winding-corrected fill, before any
    /// resolution. `None` when the shape trips the contour ceiling.
    fn guarded_fill(&self, path: &Path) -> Option<Polygon> {
        let mut vertices = self.flatten_clean(path, FlattenMode::Fill);
        if self.config.perturbation > 0.0 {
            perturb_vertices(vertices.as_mut_vec(), self.config.perturbation, PERTURB_SEED);
        }
        let mut polygon = self.kernel.fill_convert(&vertices);
        correct_winding(path, &mut polygon);

        let contours = polygon.contour_count();
        if contours > self.config.max_contours {
            log::warn!(
                target: "pathpoly::guard",
                "abandoning fill of {} contours over the limit of {} ({} drawing segments)",
                contours,
                self.config.max_contours,
                path.drawing_segment_count()
            );
            return None;
        }

        Some(polygon)
    }

    fn flatten_clean(&self, path: &Path, mode: FlattenMode) -> VertexList {
        let mut vertices = flatten_path(
            path,
            mode,
            self.config.subdivision_factor,
            self.config.dot_nudge,
        );
        let flattened = vertices.len();

        remove_adjacent_duplicates(vertices.as_mut_vec());
        if self.config.separate_coincident {
            separate_coincident_points(vertices.as_mut_vec());
        }

        debug_assert!(!vertices.has_adjacent_duplicates() || self.config.separate_coincident);
        log::trace!(
            target: "pathpoly::engine",
            "flattened {} segments to {} vertices, {} after cleaning",
            path.len(),
            flattened,
            vertices.len()
        );
        vertices
    }

    /// The canonical empty polygon: a zero-width stroke of an empty path.
    fn empty_polygon(&self) -> Polygon {
        let nothing = VertexList::new(Vec::new());
        self.kernel.stroke_convert(
            &nothing,
            &StrokeStyle::with_width(0.0),
            self.config.stroke_flatness,
        )
    }
}

/// [`PolyEngine::fill_to_polygon`] with default settings.
pub fn fill_to_polygon(path: &Path) -> Polygon {
    PolyEngine::default().fill_to_polygon(path)
}

/// [`PolyEngine::stroke_to_polygon`] with default settings.
pub fn stroke_to_polygon(path: &Path, style: &StrokeStyle) -> Polygon {
    PolyEngine::default().stroke_to_polygon(path, style)
}

/// [`PolyEngine::intersect`] with default settings.
pub fn intersect(a: &Polygon, b: &Polygon) -> Polygon {
    PolyEngine::default().intersect(a, b)
}

/// [`PolyEngine::union`] with default settings.
pub fn union(a: &Polygon, b: &Polygon) -> Polygon {
    PolyEngine::default().union(a, b)
}

/// [`PolyEngine::create_box`] with default settings.
pub fn create_box(x1: f64, y1: f64, x2: f64, y2: f64) -> Polygon {
    PolyEngine::default().create_box(x1, y1, x2, y2)
}

/// [`PolyEngine::circular_to_even_odd`] with default settings.
pub fn circular_to_even_odd(path: &Path) -> Option<Path> {
    PolyEngine::default().circular_to_even_odd(path)
}

/// Releases a polygon. Equivalent to dropping it.
pub fn free_polygon(polygon: Polygon) {
    drop(polygon);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathSegment;
    use crate::polygon::{Direction, LineCap};
    use crate::primitives::Point2;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::sync::Once;

    thread_local! {
        static CAPTURED: RefCell<Vec<(String, String)>> = RefCell::new(Vec::new());
    }

    /// Records log lines per test thread.
    struct CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            CAPTURED.with(|lines| {
                lines
                    .borrow_mut()
                    .push((record.target().to_string(), record.args().to_string()))
            });
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;
    static INIT: Once = Once::new();

    fn init_logger() {
        INIT.call_once(|| {
            let _ = log::set_logger(&LOGGER);
            log::set_max_level(log::LevelFilter::Trace);
        });
        CAPTURED.with(|lines| lines.borrow_mut().clear());
    }

    fn guard_lines() -> Vec<String> {
        CAPTURED.with(|lines| {
            lines
                .borrow()
                .iter()
                .filter(|(target, _)| target == "pathpoly::guard")
                .map(|(_, message)| message.clone())
                .collect()
        })
    }

    fn screen_clockwise_square() -> Path {
        Path::new()
            .move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .line_to(10.0, 10.0)
            .line_to(0.0, 10.0)
            .line_to(0.0, 0.0)
    }

    fn screen_counter_clockwise_square() -> Path {
        Path::new()
            .move_to(0.0, 0.0)
            .line_to(0.0, 10.0)
            .line_to(10.0, 10.0)
            .line_to(10.0, 0.0)
            .line_to(0.0, 0.0)
    }

    /// Four quadratic arcs around (10, 10).
    fn rounded_blob() -> Path {
        Path::new()
            .move_to(10.0, 0.0)
            .curve_to(0.0, 10.0, 0.0, 0.0)
            .curve_to(10.0, 20.0, 0.0, 20.0)
            .curve_to(20.0, 10.0, 20.0, 20.0)
            .curve_to(10.0, 0.0, 20.0, 0.0)
    }

    fn triangles(count: usize) -> Path {
        let mut path = Path::new();
        for i in 0..count {
            let x = i as f64 * 3.0;
            path = path
                .move_to(x, 0.0)
                .line_to(x, 2.0)
                .line_to(x + 2.0, 2.0)
                .line_to(x, 0.0);
        }
        path
    }

    #[test]
    fn test_create_box() {
        let polygon = create_box(0.0, 0.0, 10.0, 10.0);
        assert_eq!(polygon.contour_count(), 1);
        assert_eq!(polygon.vertex_count(), 5);
        assert_eq!(
            polygon.contours()[0].points(),
            &[
                Point2::new(0.0, 0.0),
                Point2::new(0.0, 10.0),
                Point2::new(10.0, 10.0),
                Point2::new(10.0, 0.0),
                Point2::new(0.0, 0.0),
            ]
        );

        let path = polygon_to_path(&polygon).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.iter().filter(|s| s.is_move()).count(), 1);
    }

    #[test]
    fn test_create_box_keeps_corner_order() {
        let polygon = create_box(10.0, 5.0, 0.0, 0.0);
        let contour = &polygon.contours()[0];
        assert_eq!(contour.direction(), Direction::Ascending);
        assert_eq!(
            contour.points(),
            &[
                Point2::new(10.0, 5.0),
                Point2::new(10.0, 0.0),
                Point2::new(0.0, 0.0),
                Point2::new(0.0, 5.0),
                Point2::new(10.0, 5.0),
            ]
        );
    }

    #[test]
    fn test_intersect_with_degenerate_box_is_empty() {
        let square = fill_to_polygon(&screen_counter_clockwise_square());
        let point_box = create_box(4.0, 4.0, 4.0, 4.0);

        assert!(point_box.is_empty());
        assert!(intersect(&square, &point_box).is_empty());
        assert!(intersect(&point_box, &square).is_empty());
    }

    #[test]
    fn test_too_many_contours_abandons_fill() {
        init_logger();
        let path = triangles(501);
        let polygon = fill_to_polygon(&path);

        assert!(polygon.is_empty());
        assert_eq!(polygon, Polygon::empty());

        let lines = guard_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("501 contours"));
        assert!(lines[0].contains("1503 drawing segments"));
    }

    #[test]
    fn test_contour_ceiling_is_inclusive() {
        init_logger();
        let engine = PolyEngine::new(PolyConfig::default().max_contours(3)).unwrap();

        assert_eq!(engine.fill_to_polygon(&triangles(3)).contour_count(), 3);
        assert!(guard_lines().is_empty());

        assert!(engine.fill_to_polygon(&triangles(4)).is_empty());
        assert!(engine.circular_to_even_odd(&triangles(4)).is_none());
        assert_eq!(guard_lines().len(), 2);
    }

    #[test]
    fn test_orientation_does_not_change_fill() {
        let engine = PolyEngine::default();
        let clockwise = engine.fill_to_polygon(&screen_clockwise_square());
        let counter = engine.fill_to_polygon(&screen_counter_clockwise_square());

        assert_eq!(clockwise, counter);
        assert_relative_eq!(clockwise.net_area(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_corrected_flags_agree_before_resolution() {
        let engine = PolyEngine::default();
        let inside = Point2::new(5.0, 5.0);

        let clockwise = engine.guarded_fill(&screen_clockwise_square()).unwrap();
        let counter = engine
            .guarded_fill(&screen_counter_clockwise_square())
            .unwrap();

        assert_eq!(clockwise.contours()[0].direction(), Direction::Descending);
        assert_eq!(counter.contours()[0].direction(), Direction::Ascending);
        assert_eq!(clockwise.winding_at(inside), 1);
        assert_eq!(counter.winding_at(inside), 1);
    }

    #[test]
    fn test_fill_round_trip_is_stable() {
        let engine = PolyEngine::default();
        let first = engine.fill_to_polygon(&rounded_blob());
        assert_eq!(first.contour_count(), 1);
        assert_eq!(first.vertex_count(), 41);

        let path = polygon_to_path(&first).unwrap();
        let second = engine.fill_to_polygon(&path);

        assert_eq!(second.vertex_count(), first.vertex_count());
        assert_eq!(
            second.contours()[0].direction(),
            first.contours()[0].direction()
        );
        assert_eq!(second, first);
    }

    #[test]
    fn test_empty_inputs() {
        let empty = Path::new();
        assert!(fill_to_polygon(&empty).is_empty());
        assert!(stroke_to_polygon(&empty, &StrokeStyle::default()).is_empty());
        assert!(circular_to_even_odd(&empty).is_none());
        assert!(union(&Polygon::empty(), &Polygon::empty()).is_empty());
    }

    #[test]
    fn test_circular_to_even_odd_nested() {
        // same direction: the inner square has winding 2 and stays filled
        let mut nested = screen_counter_clockwise_square();
        nested.extend(
            Path::new()
                .move_to(4.0, 4.0)
                .line_to(4.0, 6.0)
                .line_to(6.0, 6.0)
                .line_to(6.0, 4.0)
                .line_to(4.0, 4.0),
        );
        let even_odd = circular_to_even_odd(&nested).unwrap();
        assert_eq!(even_odd.subpath_count(), 1);
        assert_relative_eq!(fill_to_polygon(&even_odd).net_area(), 100.0, epsilon = 1e-9);

        // opposite direction: a real hole
        let mut holed = screen_counter_clockwise_square();
        holed.extend(
            Path::new()
                .move_to(4.0, 4.0)
                .line_to(6.0, 4.0)
                .line_to(6.0, 6.0)
                .line_to(4.0, 6.0)
                .line_to(4.0, 4.0),
        );
        let even_odd = circular_to_even_odd(&holed).unwrap();
        assert_eq!(even_odd.subpath_count(), 2);
        assert_relative_eq!(fill_to_polygon(&even_odd).net_area(), 96.0, epsilon = 1e-9);
    }

    #[test]
    fn test_stroke_line_and_zero_width() {
        let path = Path::new().move_to(0.0, 0.0).line_to(10.0, 0.0);

        let polygon = stroke_to_polygon(&path, &StrokeStyle::with_width(2.0));
        assert_relative_eq!(polygon.net_area(), 20.0, epsilon = 1e-9);

        let none = stroke_to_polygon(&path, &StrokeStyle::with_width(0.0));
        assert!(none.is_empty());
    }

    #[test]
    fn test_stroke_single_point_leaves_a_dot() {
        let dot = Path::new().move_to(5.0, 5.0).line_to(5.0, 5.0);
        let style = StrokeStyle::with_width(2.0).cap(LineCap::Round);
        let polygon = stroke_to_polygon(&dot, &style);

        assert_eq!(polygon.contour_count(), 1);
        // caps are polygonal, so the extremes fall just inside the circle
        let (min, max) = polygon.bounding_box().unwrap();
        assert!(min.x >= 4.0 - 1e-9 && min.x < 4.1);
        assert!(max.x <= 6.01 + 1e-9 && max.x > 5.9);
        let area = polygon.net_area();
        assert!(area > 2.9 && area < std::f64::consts::PI + 0.02);
    }

    #[test]
    fn test_union_and_intersect() {
        let a = fill_to_polygon(&Path::rectangle(0.0, 0.0, 2.0, 2.0));
        let b = fill_to_polygon(&Path::rectangle(1.0, 1.0, 3.0, 3.0));

        assert_relative_eq!(union(&a, &b).net_area(), 7.0, epsilon = 1e-9);
        assert_relative_eq!(intersect(&a, &b).net_area(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_separate_coincident_keeps_shape() {
        // two triangles joined at (5, 5) within one subpath
        let bow = Path::new()
            .move_to(0.0, 0.0)
            .line_to(0.0, 10.0)
            .line_to(5.0, 5.0)
            .line_to(10.0, 10.0)
            .line_to(10.0, 0.0)
            .line_to(5.0, 5.0)
            .line_to(0.0, 0.0);
        let plain = PolyEngine::default().fill_to_polygon(&bow);
        let separated = PolyEngine::new(PolyConfig::default().separate_coincident(true))
            .unwrap()
            .fill_to_polygon(&bow);

        assert_relative_eq!(plain.net_area(), 50.0, epsilon = 1e-9);
        assert_relative_eq!(separated.net_area(), plain.net_area(), epsilon = 1.0);
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let infinite = PolyConfig::default().subdivision_factor(f64::INFINITY);
        assert!(matches!(
            PolyEngine::new(infinite),
            Err(PolyError::InvalidConfig(_))
        ));

        let no_nudge = PolyConfig::default().dot_nudge(0.0);
        assert!(PolyEngine::with_kernel(no_nudge, SweepKernel::default()).is_err());

        assert!(PolyEngine::new(PolyConfig::default()).is_ok());
    }

    #[test]
    fn test_perturbed_fill_stays_close() {
        let engine = PolyEngine::new(PolyConfig::default().perturbation(2e-3)).unwrap();
        let square = Path::rectangle(0.0, 0.0, 10.0, 10.0);
        let polygon = engine.fill_to_polygon(&square);

        assert_eq!(polygon.contour_count(), 1);
        assert_ne!(polygon, fill_to_polygon(&square));
        assert_relative_eq!(polygon.net_area(), 100.0, epsilon = 0.05);
        let (min, max) = polygon.bounding_box().unwrap();
        assert!(min.x.abs() <= 1e-3 && min.y.abs() <= 1e-3);
        assert!((max.x - 10.0).abs() <= 1e-3 && (max.y - 10.0).abs() <= 1e-3);

        assert_eq!(engine.fill_to_polygon(&square), polygon);
    }

    #[test]
    fn test_stroke_joins_curve_subpath_to_previous() {
        let path = Path::new()
            .move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .move_to(0.0, 50.0)
            .curve_to(10.0, 50.0, 5.0, 60.0);
        let polygon = stroke_to_polygon(&path, &StrokeStyle::with_width(2.0));

        assert_eq!(polygon.contour_count(), 1);
        assert!(polygon.contains(Point2::new(5.0, 25.0), FillRule::NonZero));

        let separate = Path::new()
            .move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .move_to(0.0, 50.0)
            .line_to(5.0, 60.0)
            .line_to(10.0, 50.0);
        let polygon = stroke_to_polygon(&separate, &StrokeStyle::with_width(2.0));
        assert_eq!(polygon.contour_count(), 2);
        assert!(!polygon.contains(Point2::new(5.0, 25.0), FillRule::NonZero));
    }

    #[test]
    fn test_free_polygon() {
        let polygon = create_box(0.0, 0.0, 1.0, 1.0);
        free_polygon(polygon);
    }

    #[test]
    fn test_output_path_segments() {
        let path = polygon_to_path(&fill_to_polygon(&screen_clockwise_square())).unwrap();
        assert_eq!(path.segments()[0], PathSegment::MoveTo(Point2::new(0.0, 0.0)));
        assert_eq!(path.len(), 5);
    }
}
