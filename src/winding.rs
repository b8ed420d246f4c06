//! Global orientation heuristic for fill conversion.
//!
//! Sums the cross product of every pair of consecutive drawing segments over
//! the original path, ignoring curve control points. A negative total means
//! the path runs clockwise on a y-down screen overall, and every contour's
//! direction flag is flipped. Mixed-orientation paths are only approximated:
//! the sign of the sum decides for all contours at once.

use crate::path::Path;
use crate::polygon::Polygon;
use crate::primitives::Point2;

/// Signed turn total over consecutive drawing segment pairs.
///
/// A pair contributes only when both segments are line or curve segments;
/// the edge vectors run between segment endpoints.
pub fn orientation_total(path: &Path) -> f64 {
    let segments = path.segments();
    let Some(first) = segments.first() else {
        return 0.0;
    };

    let mut total = 0.0;
    let mut last: Point2<f64> = first.end_point();

    for pair in segments[1..].windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        if current.is_drawing() && next.is_drawing() {
            let at = current.end_point();
            let e0 = at - last;
            let e1 = next.end_point() - at;
            total += e1.x * e0.y - e0.x * e1.y;
        }
        last = current.end_point();
    }

    total
}

/// Flips every direction flag of `polygon` when `path` winds clockwise
/// overall. Returns whether a flip happened.
pub fn correct_winding(path: &Path, polygon: &mut Polygon) -> bool {
    let total = orientation_total(path);
    if total < 0.0 {
        polygon.flip_directions();
        log::debug!(
            target: "pathpoly::winding",
            "orientation total {} < 0, flipped {} contours",
            total,
            polygon.contour_count()
        );
        true
    } else {
        false
    }
}
