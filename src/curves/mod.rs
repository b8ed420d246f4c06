//! Curve types used by path flattening.

mod bezier;

pub use bezier::{QuadraticBezier2, MAX_CURVE_PARTS};
