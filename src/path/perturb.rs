//! Random jitter for flattened fill outlines.
//!
//! Every vertex moves by a tiny random offset, which breaks up exactly
//! coincident and collinear configurations before edge construction. A
//! closing vertex that repeats its contour's start moves together with the
//! start, so closed outlines stay closed.

use super::flatten::Vertex;
use crate::primitives::Point2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed the engine uses, so one input always jitters the same way.
pub const PERTURB_SEED: u64 = 0x7061_7468_706f_6c79;

/// Offsets every vertex by up to `amount / 2` on each axis.
///
/// A non-positive or NaN `amount` leaves the vertices untouched.
pub fn perturb_vertices(vertices: &mut [Vertex], amount: f64, seed: u64) {
    if !(amount > 0.0) {
        return;
    }

    let half = amount * 0.5;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut start = Point2::origin();
    let mut moved_start = Point2::origin();

    for i in 0..vertices.len() {
        let original = vertices[i];
        if original.starts_contour {
            start = original.point();
        }

        let ends_contour = vertices
            .get(i + 1)
            .map_or(true, |next| next.starts_contour);
        if !original.starts_contour && ends_contour && original.point() == start {
            vertices[i].x = moved_start.x;
            vertices[i].y = moved_start.y;
        } else {
            vertices[i].x += rng.gen_range(-half..half);
            vertices[i].y += rng.gen_range(-half..half);
        }

        if original.starts_contour {
            moved_start = vertices[i].point();
        }
    }
}
