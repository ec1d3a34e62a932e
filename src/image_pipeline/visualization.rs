//! Visualization module
//!
//! Named colour lookup tables, the calibration bar overlay and the
//! assembly of the image handed to the TIFF writer. Nothing here alters
//! the numeric pH values.

mod font;
pub mod calibration_bar;
pub mod lut;
pub mod types;


pub use calibration_bar::{BarColor, BarLocation, CalibrationBarOptions, bar_labels, render_calibration_bar};
pub use lut::{BuiltinLuts, FIRST_FALLBACK_LUT, Lut, LutCatalog, SECOND_FALLBACK_LUT, resolve_lut};
pub use types::{RenderedImage, RgbImage, VisualizationSpec};

use crate::image_pipeline::conversion::PhImage;

/// Applies `lut` over the display range, draws the calibration bar and
/// bundles everything the writer needs.
pub fn render(
    ph: PhImage,
    lut: &Lut,
    spec: &VisualizationSpec,
    bar: &CalibrationBarOptions,
    embed_preview: bool,
) -> RenderedImage {
    let bar_labels = bar_labels(spec.display_min, spec.display_max, bar);

    let preview = embed_preview.then(|| {
        let mut rgb = lut.apply(&ph, spec.display_min, spec.display_max);
        render_calibration_bar(&mut rgb, lut, &bar_labels, bar);
        rgb
    });

    RenderedImage {
        ph,
        lut_name: lut.name.clone(),
        display_min: spec.display_min,
        display_max: spec.display_max,
        bar_labels,
        preview,
    }
}
