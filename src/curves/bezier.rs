//! Quadratic Bézier curves and their uniform discretization.
//!
//! The number of line segments used for a curve is tied to the magnitude of
//! its second difference `p0 - 2*p1 + p2`, which is a cheap stand-in for
//! curvature times chord length. Nearly straight curves collapse to a single
//! segment while large, strongly bent ones get proportionally more.

use crate::primitives::{Point2, Vec2};
use num_traits::Float;

/// Upper bound on the number of line segments a single curve may produce.
pub const MAX_CURVE_PARTS: usize = 1 << 20;

/// A quadratic Bézier curve defined by 3 control points.
///
/// The curve starts at `p0`, is influenced by `p1`, and ends at `p2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier2<F> {
    /// Start point
    pub p0: Point2<F>,
    /// Control point
    pub p1: Point2<F>,
    /// End point
    pub p2: Point2<F>,
}

impl<F: Float> QuadraticBezier2<F> {
    /// Creates a new quadratic Bézier curve.
    #[inline]
    pub fn new(p0: Point2<F>, p1: Point2<F>, p2: Point2<F>) -> Self {
        Self { p0, p1, p2 }
    }

    /// Evaluates `p2*t² + 2*p1*t*(1-t) + p0*(1-t)²`.
    #[inline]
    pub fn eval(&self, t: F) -> Point2<F> {
        let one = F::one();
        let two = one + one;
        let mt = one - t;

        Point2::new(
            self.p2.x * t * t + two * self.p1.x * t * mt + self.p0.x * mt * mt,
            self.p2.y * t * t + two * self.p1.y * t * mt + self.p0.y * mt * mt,
        )
    }

    /// The second difference `p2 - 2*p1 + p0`.
    ///
    /// Zero exactly when the control point sits on the chord midpoint, in
    /// which case the curve is a straight line traversed at constant speed.
    #[inline]
    pub fn second_difference(&self) -> Vec2<F> {
        let two = F::one() + F::one();
        Vec2::new(
            self.p2.x - two * self.p1.x + self.p0.x,
            self.p2.y - two * self.p1.y + self.p0.y,
        )
    }

    /// Number of line segments used to approximate the curve.
    ///
    /// `max(1, floor(sqrt(|ddx| + |ddy|) * subdivision_factor))`, clamped to
    /// [`MAX_CURVE_PARTS`]. Both the sizing and the emission pass of the path
    /// flattener call this, so the two always agree.
    pub fn subdivision_parts(&self, subdivision_factor: F) -> usize {
        let dd = self.second_difference();
        let parts = ((dd.x.abs() + dd.y.abs()).sqrt() * subdivision_factor).floor();

        // NaN and negative values fail this comparison and fall back to one part
        if parts >= F::one() {
            parts
                .to_usize()
                .unwrap_or(MAX_CURVE_PARTS)
                .min(MAX_CURVE_PARTS)
        } else {
            1
        }
    }

    /// Evaluates the curve at `parts + 1` evenly spaced parameters, including
    /// both endpoints.
    pub fn uniform_points(&self, parts: usize) -> impl Iterator<Item = Point2<F>> + '_ {
        let parts = parts.max(1);
        let step = F::one() / F::from(parts).unwrap_or_else(F::one);

        (0..=parts).map(move |i| {
            let t = F::from(i).unwrap_or_else(F::zero) * step;
            self.eval(t)
        })
    }
}
