//! Conversions between flattened vertex lists, polygons and paths.

use super::core::{Contour, Direction, Polygon};
use crate::path::{Path, PathSegment, VertexList};

/// Splits a vertex list at its contour-start markers and closes each run
/// into a contour carrying `direction`.
///
/// Runs with fewer than two distinct points bound nothing and are dropped.
pub fn contours_from_vertices(vertices: &VertexList, direction: Direction) -> Vec<Contour> {
    vertices
        .contour_points()
        .into_iter()
        .filter(|points| points.iter().any(|p| *p != points[0]))
        .map(|points| Contour::new(points, direction))
        .collect()
}

/// Converts a polygon back into a path: one move per contour followed by a
/// line to each further point.
///
/// Returns `None` for a polygon without contours.
pub fn polygon_to_path(polygon: &Polygon) -> Option<Path> {
    if polygon.is_empty() {
        return None;
    }

    let mut path = Path::with_capacity(polygon.vertex_count());
    for contour in polygon.contours() {
        let mut points = contour.points().iter();
        if let Some(&first) = points.next() {
            path.push(PathSegment::MoveTo(first));
            path.extend(points.map(|&p| PathSegment::LineTo(p)));
        }
    }

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{flatten_path, FlattenMode};
    use crate::primitives::Point2;

    fn flatten_fill(path: &Path) -> VertexList {
        flatten_path(path, FlattenMode::Fill, 2.4, 0.01)
    }

    #[test]
    fn test_contours_split_at_moves() {
        let path = Path::new()
            .move_to(0.0, 0.0)
            .line_to(4.0, 0.0)
            .line_to(4.0, 4.0)
            .move_to(10.0, 10.0)
            .line_to(12.0, 10.0)
            .line_to(12.0, 12.0)
            .line_to(10.0, 10.0);
        let contours = contours_from_vertices(&flatten_fill(&path), Direction::Ascending);

        assert_eq!(contours.len(), 2);
        // first run is closed explicitly, second already was
        assert_eq!(contours[0].len(), 4);
        assert_eq!(contours[1].len(), 4);
        assert_eq!(contours[0].points()[3], Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_lone_points_are_dropped() {
        let path = Path::new()
            .move_to(1.0, 1.0)
            .move_to(0.0, 0.0)
            .line_to(5.0, 0.0);
        let contours = contours_from_vertices(&flatten_fill(&path), Direction::Descending);

        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].direction(), Direction::Descending);
    }

    #[test]
    fn test_polygon_to_path_empty() {
        assert!(polygon_to_path(&Polygon::empty()).is_none());
    }

    #[test]
    fn test_polygon_to_path_one_move_per_contour() {
        let square = Contour::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(0.0, 1.0),
                Point2::new(1.0, 1.0),
                Point2::new(1.0, 0.0),
            ],
            Direction::Ascending,
        );
        let polygon = Polygon::from_contours(vec![square.clone(), square]);
        let path = polygon_to_path(&polygon).unwrap();

        assert_eq!(path.len(), 10);
        assert_eq!(path.subpath_count(), 2);
        assert_eq!(path.segments()[4], PathSegment::LineTo(Point2::new(0.0, 0.0)));
        assert!(path.segments()[5].is_move());
    }
}
