//! Orientation and segment intersection tests with tolerance.

use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// Turn direction of three points, in math orientation (y up).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Orientation of `c` relative to the directed line `a -> b`.
///
/// `eps` is compared against the raw cross product (twice the signed
/// triangle area).
#[inline]
pub fn orient2d<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, eps: F) -> Orientation {
    let cross = (b - a).cross(c - a);
    if cross > eps {
        Orientation::CounterClockwise
    } else if cross < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Whether `p` lies within `eps` of `segment`.
#[inline]
pub fn point_on_segment<F: Float>(p: Point2<F>, segment: Segment2<F>, eps: F) -> bool {
    segment.distance_squared_to_point(p) <= eps * eps
}

/// Outcome of [`segments_intersect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection<F> {
    None,
    /// A single shared point with its parameter on each segment.
    Point { point: Point2<F>, t1: F, t2: F },
    /// Collinear segments sharing a stretch of positive length.
    Overlapping { start: Point2<F>, end: Point2<F> },
}

/// Intersects two segments.
///
/// Near-parallel pairs (sine of the angle between them at most `eps`) are
/// treated as parallel and either miss, touch at one point or overlap.
/// Parameters within `eps` outside `[0, 1]` still count as hits and are
/// clamped.
pub fn segments_intersect<F: Float>(
    s1: Segment2<F>,
    s2: Segment2<F>,
    eps: F,
) -> SegmentIntersection<F> {
    let d1 = s1.direction();
    let d2 = s2.direction();
    let denom = d1.cross(d2);

    if denom * denom <= eps * eps * d1.magnitude_squared() * d2.magnitude_squared() {
        return collinear_intersection(s1, s2, eps);
    }

    let offset = s2.start - s1.start;
    let t1 = offset.cross(d2) / denom;
    let t2 = offset.cross(d1) / denom;

    let lo = -eps;
    let hi = F::one() + eps;
    if t1 < lo || t1 > hi || t2 < lo || t2 > hi {
        return SegmentIntersection::None;
    }

    let t1 = clamp_unit(t1);
    SegmentIntersection::Point {
        point: s1.point_at(t1),
        t1,
        t2: clamp_unit(t2),
    }
}

fn collinear_intersection<F: Float>(
    s1: Segment2<F>,
    s2: Segment2<F>,
    eps: F,
) -> SegmentIntersection<F> {
    let eps_sq = eps * eps;
    let d1 = s1.direction();
    let len_sq = d1.magnitude_squared();
    if len_sq <= eps_sq {
        if point_on_segment(s1.start, s2, eps) {
            let (_, t2) = s2.closest_point(s1.start);
            return SegmentIntersection::Point {
                point: s1.start,
                t1: F::zero(),
                t2,
            };
        }
        return SegmentIntersection::None;
    }

    // distance of s2 from the line through s1
    let off_line = d1.cross(s2.start - s1.start);
    if off_line * off_line > eps_sq * len_sq {
        return SegmentIntersection::None;
    }

    // s2's endpoints as parameters along s1
    let a = (s2.start - s1.start).dot(d1) / len_sq;
    let b = (s2.end - s1.start).dot(d1) / len_sq;
    let lo = a.min(b).max(F::zero());
    let hi = a.max(b).min(F::one());

    if lo > hi + eps {
        return SegmentIntersection::None;
    }
    if hi - lo <= eps {
        let point = s1.point_at(lo);
        let (_, t2) = s2.closest_point(point);
        return SegmentIntersection::Point { point, t1: lo, t2 };
    }

    SegmentIntersection::Overlapping {
        start: s1.point_at(lo),
        end: s1.point_at(hi),
    }
}

#[inline]
fn clamp_unit<F: Float>(t: F) -> F {
    t.max(F::zero()).min(F::one())
}
