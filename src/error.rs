//! Error types for pathpoly operations.
//!
//! Geometry itself never fails: self-intersecting, zero-area and empty
//! inputs are all valid. Errors only arise from checked constructors,
//! configuration validation and path-data parsing.

use thiserror::Error;

/// Errors reported by checked constructors, validation and parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolyError {
    /// Stroke width is negative or not finite.
    #[error("invalid stroke width {0}")]
    InvalidStrokeWidth(f64),

    /// Miter limit is negative or not finite.
    #[error("invalid miter limit {0}")]
    InvalidMiterLimit(f64),

    /// A path segment carries a NaN or infinite coordinate.
    #[error("non-finite coordinate in path segment {index}")]
    NonFiniteCoordinate {
        /// Index of the offending segment.
        index: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// Unexpected character in path data.
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),

    /// A number was required but not found.
    #[error("expected number at position {0}")]
    ExpectedNumber(usize),

    /// A numeric token could not be parsed.
    #[error("invalid number '{0}' at position {1}")]
    InvalidNumber(String, usize),

    /// Unknown path-data command letter.
    #[error("unknown command '{0}' at position {1}")]
    UnknownCommand(char, usize),

    /// A valid path-data command with no quadratic path equivalent.
    #[error("unsupported command '{0}' at position {1}")]
    UnsupportedCommand(char, usize),
}
