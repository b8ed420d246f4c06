//! Degeneracy cleanup for flattened vertex lists.
//!
//! A sorted-edge boolean engine sees two identical neighbouring vertices as
//! a zero-length edge, which turns into an isolated point or a spurious
//! contour. These passes remove that input before it reaches the kernel.

use super::flatten::Vertex;
use std::ops::Range;

/// Collapses runs of neighbouring vertices with identical coordinates.
///
/// The surviving vertex starts a contour only if every vertex in the run
/// did: `MoveTo p, MoveTo p` stays a `MoveTo`, any run that includes a
/// `LineTo` becomes a `LineTo`.
///
/// # Example
///
/// ```
/// use pathpoly::path::{remove_adjacent_duplicates, Vertex};
/// use pathpoly::Point2;
///
/// let mut vertices = vec![
///     Vertex::move_to(Point2::new(0.0, 0.0)),
///     Vertex::line_to(Point2::new(0.0, 0.0)),
///     Vertex::line_to(Point2::new(5.0, 0.0)),
/// ];
/// remove_adjacent_duplicates(&mut vertices);
/// assert_eq!(vertices.len(), 2);
/// assert!(!vertices[0].starts_contour);
/// ```
pub fn remove_adjacent_duplicates(vertices: &mut Vec<Vertex>) {
    let mut write = 0;

    for read in 0..vertices.len() {
        let vertex = vertices[read];
        if write > 0 && vertices[write - 1].same_position(&vertex) {
            // removal can only create a new duplicate with the survivor, which
            // is exactly what the next comparison checks
            vertices[write - 1].starts_contour &= vertex.starts_contour;
        } else {
            vertices[write] = vertex;
            write += 1;
        }
    }

    vertices.truncate(write);
}

/// Moves apart non-adjacent vertices of a contour that share coordinates.
///
/// Every vertex with a neighbour on both sides that exactly matches an
/// earlier vertex of the same contour is displaced by 1% of
/// `prev + next - 2 * vertex` (2% of the way toward the midpoint of its
/// neighbours), at most 0.1 units. There is no minimum: a
/// duplicate whose neighbours are collinear and evenly spaced stays put.
///
/// Off by default in [`PolyConfig`](crate::PolyConfig); the quadratic scan
/// has not been proven safe for every topology.
pub fn separate_coincident_points(vertices: &mut [Vertex]) {
    for range in contour_ranges(vertices) {
        separate_in_contour(&mut vertices[range]);
    }
}

fn separate_in_contour(contour: &mut [Vertex]) {
    let n = contour.len();
    if n < 3 {
        return;
    }

    for i in 1..n - 1 {
        let duplicated = (0..i).any(|j| contour[j].same_position(&contour[i]));
        if !duplicated {
            continue;
        }

        let prev = contour[i - 1];
        let next = contour[i + 1];
        let mut dx = (prev.x + next.x - contour[i].x * 2.0) / 100.0;
        let mut dy = (prev.y + next.y - contour[i].y * 2.0) / 100.0;

        let length_squared = dx * dx + dy * dy;
        if length_squared > 0.01 {
            let scale = length_squared.sqrt() * 10.0;
            dx /= scale;
            dy /= scale;
        }

        contour[i].x += dx;
        contour[i].y += dy;
    }
}

fn contour_ranges(vertices: &[Vertex]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for (i, v) in vertices.iter().enumerate().skip(1) {
        if v.starts_contour {
            ranges.push(start..i);
            start = i;
        }
    }
    if start < vertices.len() {
        ranges.push(start..vertices.len());
    }
    ranges
}
