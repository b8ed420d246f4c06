//! Tunable constants for flattening, cleaning and kernel tolerances.

use crate::error::PolyError;

/// Settings shared by every [`PolyEngine`](crate::PolyEngine) operation.
///
/// The defaults reproduce the classic behaviour: 2.4 curve subdivisions
/// per unit of square-rooted second difference, a 0.01 unit nudge for
/// single-point stroke subpaths, a 500 contour ceiling on fills and a 0.05
/// unit flatness for round caps and joins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolyConfig {
    /// Density factor applied to the curve subdivision formula.
    pub subdivision_factor: f64,
    /// Offset added to the x coordinate of a zero-length stroke segment.
    pub dot_nudge: f64,
    /// Fills with more contours than this are abandoned.
    pub max_contours: usize,
    /// Maximum deviation of round caps and joins from the true arc.
    pub stroke_flatness: f64,
    /// Move non-adjacent coincident points within a contour apart.
    pub separate_coincident: bool,
    /// Distance under which the kernel treats points as coincident.
    pub kernel_epsilon: f64,
    /// Full width of the random jitter applied to fill vertices before
    /// edge construction. Zero disables it.
    pub perturbation: f64,
}

impl Default for PolyConfig {
    fn default() -> Self {
        Self {
            subdivision_factor: 2.4,
            dot_nudge: 0.01,
            max_contours: 500,
            stroke_flatness: 0.05,
            separate_coincident: false,
            kernel_epsilon: 1e-9,
            perturbation: 0.0,
        }
    }
}

impl PolyConfig {
    /// Sets the curve subdivision factor.
    pub fn subdivision_factor(mut self, factor: f64) -> Self {
        self.subdivision_factor = factor;
        self
    }

    /// Sets the single-point stroke nudge.
    pub fn dot_nudge(mut self, nudge: f64) -> Self {
        self.dot_nudge = nudge;
        self
    }

    /// Sets the contour ceiling for fills.
    pub fn max_contours(mut self, max: usize) -> Self {
        self.max_contours = max;
        self
    }

    /// Sets the flatness used for round caps and joins.
    pub fn stroke_flatness(mut self, flatness: f64) -> Self {
        self.stroke_flatness = flatness;
        self
    }

    /// Enables or disables coincident point separation.
    pub fn separate_coincident(mut self, enabled: bool) -> Self {
        self.separate_coincident = enabled;
        self
    }

    /// Sets the kernel's coincidence tolerance.
    pub fn kernel_epsilon(mut self, eps: f64) -> Self {
        self.kernel_epsilon = eps;
        self
    }

    /// Sets the fill vertex jitter. `2e-3` matches the classic rasterizer
    /// setting.
    pub fn perturbation(mut self, amount: f64) -> Self {
        self.perturbation = amount;
        self
    }

    /// Checks that every value is finite and in range.
    pub fn validate(&self) -> Result<(), PolyError> {
        if !(self.subdivision_factor.is_finite() && self.subdivision_factor > 0.0) {
            return Err(PolyError::InvalidConfig(
                "subdivision_factor must be positive",
            ));
        }
        if !(self.dot_nudge.is_finite() && self.dot_nudge > 0.0) {
            return Err(PolyError::InvalidConfig("dot_nudge must be positive"));
        }
        if !(self.stroke_flatness.is_finite() && self.stroke_flatness > 0.0) {
            return Err(PolyError::InvalidConfig("stroke_flatness must be positive"));
        }
        if !(self.kernel_epsilon.is_finite() && self.kernel_epsilon >= 0.0) {
            return Err(PolyError::InvalidConfig(
                "kernel_epsilon must be non-negative",
            ));
        }
        if !(self.perturbation.is_finite() && self.perturbation >= 0.0) {
            return Err(PolyError::InvalidConfig("perturbation must be non-negative"));
        }
        Ok(())
    }
}
