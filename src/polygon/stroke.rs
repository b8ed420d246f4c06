//! Stroke outline generation.
//!
//! Converts polylines into closed outline rings for a given width, cap,
//! join and miter limit. Rings may overlap themselves and each other; the
//! kernel resolves them under the non-zero rule afterwards.

use crate::error::PolyError;
use crate::primitives::{Point2, Vec2};
use num_traits::Float;

/// Line cap style for open subpath endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineCap {
    /// Flat cap at the exact endpoint.
    Butt,
    /// Semicircular cap extending beyond the endpoint.
    Round,
    /// Square cap extending beyond the endpoint by half the stroke width.
    Square,
}

/// Line join style for corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineJoin {
    /// Sharp corner, falling back to bevel past the miter limit.
    Miter,
    /// Rounded corner.
    Round,
    /// Beveled (flat) corner.
    Bevel,
}

/// Stroke parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Total stroke width.
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
    /// Longest allowed miter, as a multiple of half the width.
    pub miter_limit: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 4.0,
        }
    }
}

impl StrokeStyle {
    /// Checked constructor.
    pub fn new(
        width: f64,
        cap: LineCap,
        join: LineJoin,
        miter_limit: f64,
    ) -> Result<Self, PolyError> {
        if !width.is_finite() || width < 0.0 {
            return Err(PolyError::InvalidStrokeWidth(width));
        }
        if !miter_limit.is_finite() || miter_limit < 0.0 {
            return Err(PolyError::InvalidMiterLimit(miter_limit));
        }
        Ok(Self {
            width,
            cap,
            join,
            miter_limit,
        })
    }

    /// Default style with the given width.
    pub fn with_width(width: f64) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Sets the cap style.
    pub fn cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Sets the join style.
    pub fn join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    /// Sets the miter limit.
    pub fn miter_limit(mut self, limit: f64) -> Self {
        self.miter_limit = limit;
        self
    }
}

/// Outline rings for one polyline.
///
/// A polyline whose last point equals its first (with at least three
/// distinct points) is stroked as a loop: two rings, the inner one reversed
/// so it cuts a hole under the non-zero rule. Anything else gets a single
/// ring made of both sides and the two caps. Fewer than two points, or a
/// non-positive width, produce nothing.
pub fn stroke_outline<F: Float>(
    points: &[Point2<F>],
    width: F,
    cap: LineCap,
    join: LineJoin,
    miter_limit: F,
    tolerance: F,
) -> Vec<Vec<Point2<F>>> {
    let n = points.len();
    let half_width = width / (F::one() + F::one());
    if n < 2 || !(half_width > F::zero()) {
        return Vec::new();
    }

    let joint = JoinParams {
        join,
        miter_limit,
        tolerance,
    };

    if n >= 4 && points[0] == points[n - 1] {
        let ring = &points[..n - 1];
        let outer = closed_offset(ring, half_width, &joint);
        let mut inner = closed_offset(ring, -half_width, &joint);
        inner.reverse();
        return vec![outer, inner];
    }

    let mut outline = Vec::new();
    add_start_cap(&mut outline, points, half_width, cap, tolerance);
    outline.extend(open_offset(points, half_width, &joint));
    add_end_cap(&mut outline, points, half_width, cap, tolerance);
    let mut right = open_offset(points, -half_width, &joint);
    right.reverse();
    outline.extend(right);

    vec![outline]
}

struct JoinParams<F> {
    join: LineJoin,
    miter_limit: F,
    tolerance: F,
}

/// Unit normals `(-dy, dx)` of each segment. Zero-length segments inherit
/// the previous normal.
fn segment_normals<F: Float>(points: &[Point2<F>], closed: bool) -> Vec<Vec2<F>> {
    let n = points.len();
    let count = if closed { n } else { n - 1 };
    let mut normals: Vec<Vec2<F>> = Vec::with_capacity(count);

    for i in 0..count {
        let d = points[(i + 1) % n] - points[i];
        let normal = match d.normalize() {
            Some(unit) => unit.perpendicular(),
            None => normals
                .last()
                .copied()
                .unwrap_or_else(|| Vec2::new(F::zero(), F::one())),
        };
        normals.push(normal);
    }

    normals
}

/// One side of an open polyline, offset by `offset` along the normals.
fn open_offset<F: Float>(
    points: &[Point2<F>],
    offset: F,
    joint: &JoinParams<F>,
) -> Vec<Point2<F>> {
    let n = points.len();
    let normals = segment_normals(points, false);

    let mut result = vec![points[0] + normals[0] * offset];
    for i in 1..n - 1 {
        result.extend(compute_join(
            points[i],
            normals[i - 1],
            normals[i],
            offset,
            joint,
        ));
    }
    result.push(points[n - 1] + normals[n - 2] * offset);

    result
}

/// One side of a closed ring (first point not repeated).
fn closed_offset<F: Float>(
    points: &[Point2<F>],
    offset: F,
    joint: &JoinParams<F>,
) -> Vec<Point2<F>> {
    let n = points.len();
    let normals = segment_normals(points, true);

    let mut result = Vec::new();
    for i in 0..n {
        let prev = if i == 0 { n - 1 } else { i - 1 };
        result.extend(compute_join(
            points[i],
            normals[prev],
            normals[i],
            offset,
            joint,
        ));
    }

    result
}

/// Offset points at a corner between two segments.
fn compute_join<F: Float>(
    point: Point2<F>,
    prev_normal: Vec2<F>,
    next_normal: Vec2<F>,
    offset: F,
    joint: &JoinParams<F>,
) -> Vec<Point2<F>> {
    let cross = prev_normal.cross(next_normal);

    if cross.abs() < F::from(1e-6).unwrap_or_else(F::epsilon) {
        if prev_normal.dot(next_normal) > F::zero() {
            // straight through
            return vec![point + prev_normal * offset];
        }
        // full reversal: go around the end like a cap
        return vec![point + prev_normal * offset, point + next_normal * offset];
    }

    // normals turn with the path, so the inner side shares the sign of cross
    let is_outer = cross * offset < F::zero();
    if !is_outer {
        if let Some(miter) = miter_point(point, prev_normal, next_normal, offset) {
            return vec![miter];
        }
    }

    let bevel = vec![point + prev_normal * offset, point + next_normal * offset];

    match joint.join {
        LineJoin::Bevel => bevel,
        LineJoin::Miter => match miter_point(point, prev_normal, next_normal, offset) {
            Some(miter) if miter.distance(point) <= joint.miter_limit * offset.abs() => {
                vec![miter]
            }
            _ => bevel,
        },
        LineJoin::Round => {
            let from = prev_normal * offset;
            let to = next_normal * offset;
            let sweep = from.cross(to).atan2(from.dot(to));
            arc_points(point, offset.abs(), from.angle(), sweep, joint.tolerance)
        }
    }
}

/// Intersection of the two offset lines at a corner.
fn miter_point<F: Float>(
    point: Point2<F>,
    prev_normal: Vec2<F>,
    next_normal: Vec2<F>,
    offset: F,
) -> Option<Point2<F>> {
    let prev_tangent = Vec2::new(prev_normal.y, -prev_normal.x);
    let next_tangent = Vec2::new(next_normal.y, -next_normal.x);

    let cross = prev_tangent.cross(next_tangent);
    if cross.abs() < F::epsilon() {
        return None;
    }

    let p1 = point + prev_normal * offset;
    let p2 = point + next_normal * offset;
    let t = (p2 - p1).cross(next_tangent) / cross;

    Some(p1 + prev_tangent * t)
}

/// Points on a circular arc from `start_angle` sweeping by `sweep` radians
/// (positive toward +y), both ends included.
fn arc_points<F: Float>(
    center: Point2<F>,
    radius: F,
    start_angle: F,
    sweep: F,
    tolerance: F,
) -> Vec<Point2<F>> {
    let max_segments = F::from(1024.0).unwrap_or_else(F::one);
    let segments = if tolerance > F::zero() && radius > tolerance {
        let step = (F::one() + F::one()) * (F::one() - tolerance / radius).acos();
        (sweep.abs() / step).ceil().max(F::one()).min(max_segments)
    } else {
        F::one()
    };

    let n = segments.to_usize().unwrap_or(1).max(1);
    let step = sweep / F::from(n).unwrap_or_else(F::one);

    (0..=n)
        .map(|i| {
            let angle = start_angle + F::from(i).unwrap_or_else(F::zero) * step;
            Point2::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

fn add_start_cap<F: Float>(
    outline: &mut Vec<Point2<F>>,
    points: &[Point2<F>],
    half_width: F,
    cap: LineCap,
    tolerance: F,
) {
    let p0 = points[0];
    let dir = match (points[1] - p0).normalize() {
        Some(dir) => dir,
        None => return,
    };
    let normal = dir.perpendicular();

    match cap {
        LineCap::Butt => {}
        LineCap::Square => {
            let back = p0 - dir * half_width;
            outline.push(back - normal * half_width);
            outline.push(back + normal * half_width);
        }
        LineCap::Round => {
            // from the right side, around the back, to the left side
            let pi = F::from(std::f64::consts::PI).unwrap_or_else(F::zero);
            outline.extend(arc_points(
                p0,
                half_width,
                (-normal).angle(),
                -pi,
                tolerance,
            ));
        }
    }
}

fn add_end_cap<F: Float>(
    outline: &mut Vec<Point2<F>>,
    points: &[Point2<F>],
    half_width: F,
    cap: LineCap,
    tolerance: F,
) {
    let n = points.len();
    let p1 = points[n - 1];
    let dir = match (p1 - points[n - 2]).normalize() {
        Some(dir) => dir,
        None => return,
    };
    let normal = dir.perpendicular();

    match cap {
        LineCap::Butt => {}
        LineCap::Square => {
            let forward = p1 + dir * half_width;
            outline.push(forward + normal * half_width);
            outline.push(forward - normal * half_width);
        }
        LineCap::Round => {
            let pi = F::from(std::f64::consts::PI).unwrap_or_else(F::zero);
            outline.extend(arc_points(p1, half_width, normal.angle(), -pi, tolerance));
        }
    }
}
