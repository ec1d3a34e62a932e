use rayon::prelude::*;
use tracing::debug;

use crate::image_pipeline::conversion::pixel::{convert_to_ph, normalize};
use crate::image_pipeline::conversion::types::{
    CalibrationBounds, PhImage, PolynomialCoefficients,
};
use crate::image_pipeline::tiff::types::RatioImage;

/// Marker written for pixels without a pH value.
pub const NO_DATA: f32 = f32::NAN;

/// Converts one ratio sample to pH.
///
/// NaN and exact `0.0` are floor readings from the ratio step and yield
/// [`NO_DATA`].
#[inline]
pub fn convert_sample(
    sample: f32,
    bounds: &CalibrationBounds,
    coeffs: &PolynomialCoefficients,
) -> f32 {
    if sample.is_nan() || sample == 0.0 {
        return NO_DATA;
    }
    let norm = normalize(sample as f64, bounds.lower(), bounds.upper());
    convert_to_ph(norm, coeffs) as f32
}

/// Produces the pH map of a single-channel ratio image.
///
/// Rows are converted in parallel; every output sample depends only on the
/// input sample at the same position, so the result matches a sequential pass.
pub fn transform(
    image: &RatioImage,
    bounds: &CalibrationBounds,
    coeffs: &PolynomialCoefficients,
) -> PhImage {
    debug!(
        width = image.width,
        height = image.height,
        lower = bounds.lower(),
        upper = bounds.upper(),
        "Converting ratio image to pH"
    );

    let row_len = image.width.max(1);
    let mut data = vec![NO_DATA; image.data.len()];
    data.par_chunks_mut(row_len)
        .zip(image.data.par_chunks(row_len))
        .for_each(|(out_row, in_row)| {
            for (out, &sample) in out_row.iter_mut().zip(in_row) {
                *out = convert_sample(sample, bounds, coeffs);
            }
        });

    PhImage {
        title: format!("pH_{}", image.title),
        width: image.width,
        height: image.height,
        data,
    }
}
