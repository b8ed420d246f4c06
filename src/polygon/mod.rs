//! Polygons with direction-flagged contours, stroke outlines and the
//! conversions to and from paths.
//!
//! # Example
//!
//! ```
//! use pathpoly::polygon::{Contour, Direction, FillRule, Polygon};
//! use pathpoly::Point2;
//!
//! // counter-clockwise on a y-down screen
//! let square = Contour::new(
//!     vec![
//!         Point2::new(0.0, 0.0),
//!         Point2::new(0.0, 2.0),
//!         Point2::new(2.0, 2.0),
//!         Point2::new(2.0, 0.0),
//!     ],
//!     Direction::Ascending,
//! );
//! let polygon = Polygon::from_contours(vec![square]);
//!
//! assert_eq!(polygon.winding_at(Point2::new(1.0, 1.0)), 1);
//! assert!(polygon.contains(Point2::new(1.0, 1.0), FillRule::EvenOdd));
//! assert_eq!(polygon.net_area(), 4.0);
//! ```

mod bridge;
pub(crate) mod core;
mod stroke;

pub use bridge::{contours_from_vertices, polygon_to_path};
pub use self::core::{polygon_signed_area, Contour, Direction, FillRule, Polygon};
pub use stroke::{stroke_outline, LineCap, LineJoin, StrokeStyle};
