//! Epsilon-aware predicates and vertex welding used by the geometry kernel.
//!
//! Every function takes its tolerance explicitly.

mod pool;
mod predicates;

pub use pool::VertexPool;
pub use predicates::{
    orient2d, point_on_segment, segments_intersect, Orientation, SegmentIntersection,
};
