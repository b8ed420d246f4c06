//! pathpoly - Path flattening and polygon conversion
//!
//! Turns move / line / quadratic-curve paths into polygons for filling,
//! stroking and boolean operations, and turns the results back into paths.
//! Curves are flattened with a fixed subdivision rule, degenerate points are
//! cleaned away before they reach the geometry kernel, and fill direction is
//! corrected from the path's overall orientation.
//!
//! ```
//! use pathpoly::{fill_to_polygon, intersect, polygon_to_path, Path};
//!
//! let circle_ish = Path::new()
//!     .move_to(10.0, 0.0)
//!     .curve_to(0.0, 10.0, 0.0, 0.0)
//!     .curve_to(10.0, 20.0, 0.0, 20.0)
//!     .curve_to(20.0, 10.0, 20.0, 20.0)
//!     .curve_to(10.0, 0.0, 20.0, 0.0);
//!
//! let shape = fill_to_polygon(&circle_ish);
//! let clipped = intersect(&shape, &fill_to_polygon(&Path::rectangle(0.0, 0.0, 10.0, 10.0)));
//! let outline = polygon_to_path(&clipped).unwrap();
//! assert_eq!(outline.subpath_count(), 1);
//! ```

pub mod config;
pub mod curves;
pub mod engine;
pub mod error;
pub mod io;
pub mod kernel;
pub mod path;
pub mod polygon;
pub mod primitives;
pub mod tolerance;
pub mod winding;

pub use config::PolyConfig;
pub use engine::{
    circular_to_even_odd, create_box, fill_to_polygon, free_polygon, intersect,
    stroke_to_polygon, union, PolyEngine,
};
pub use error::PolyError;
pub use kernel::{GeometryKernel, SweepKernel};
pub use path::{Path, PathSegment, Vertex, VertexList};
pub use polygon::{
    polygon_to_path, Contour, Direction, FillRule, LineCap, LineJoin, Polygon, StrokeStyle,
};
pub use primitives::{Point2, Segment2, Vec2};
