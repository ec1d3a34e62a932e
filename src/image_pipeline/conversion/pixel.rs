use crate::image_pipeline::conversion::types::PolynomialCoefficients;

/// Maps `value` onto `[0, 1]` relative to the calibration bounds.
///
/// Values outside the bounds are clamped. `lower` and `upper` must differ;
/// [`CalibrationBounds`](super::CalibrationBounds) enforces this.
#[inline]
pub fn normalize(value: f64, lower: f64, upper: f64) -> f64 {
    let norm = (value - lower) / (upper - lower);
    norm.clamp(0.0, 1.0)
}

/// Evaluates the cubic pH model at a normalized value.
#[inline]
pub fn convert_to_ph(normalized: f64, coeffs: &PolynomialCoefficients) -> f64 {
    ((coeffs.b3 * normalized + coeffs.b2) * normalized + coeffs.b1) * normalized + coeffs.b0
}
