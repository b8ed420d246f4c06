//! Text formats for paths.
//!
//! SVG path data (`d` attribute syntax) restricted to what a [`Path`] can
//! hold: moves, lines and quadratic curves.
//!
//! [`Path`]: crate::path::Path

mod svg;

pub use svg::{format_path_data, parse_path_data};
