//! Calibration bar overlay.
//!
//! Draws a boxed vertical colour ramp of the active LUT with labelled tick
//! marks into a corner of the RGB preview.

use serde::{Deserialize, Serialize};

use crate::image_pipeline::visualization::font::{self, GLYPH_HEIGHT};
use crate::image_pipeline::visualization::lut::Lut;
use crate::image_pipeline::visualization::types::RgbImage;

/// Base bar height in pixels at zoom 1.
const BAR_HEIGHT: f64 = 128.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarLocation {
    #[default]
    UpperRight,
    UpperLeft,
    LowerRight,
    LowerLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarColor {
    White,
    Black,
    LightGray,
    DarkGray,
    Gray,
    /// Nothing is drawn
    None,
}

impl BarColor {
    pub fn rgb(self) -> Option<[u8; 3]> {
        match self {
            BarColor::White => Some([255, 255, 255]),
            BarColor::Black => Some([0, 0, 0]),
            BarColor::LightGray => Some([192, 192, 192]),
            BarColor::DarkGray => Some([64, 64, 64]),
            BarColor::Gray => Some([128, 128, 128]),
            BarColor::None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationBarOptions {
    pub location: BarLocation,
    /// Background of the box
    pub fill: BarColor,
    /// Colour of ticks, labels and the bar outline
    pub label: BarColor,
    /// Number of labels
    pub number: usize,
    /// Decimal places per label
    pub decimals: usize,
    pub font_size: u32,
    pub zoom: f64,
}

impl Default for CalibrationBarOptions {
    fn default() -> Self {
        Self {
            location: BarLocation::UpperRight,
            fill: BarColor::White,
            label: BarColor::Black,
            number: 5,
            decimals: 3,
            font_size: 12,
            zoom: 1.0,
        }
    }
}

/// Label texts from `max` down to `min`, evenly spaced.
pub fn bar_labels(min: f64, max: f64, options: &CalibrationBarOptions) -> Vec<String> {
    let n = options.number;
    (0..n)
        .map(|i| {
            let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
            let value = max - t * (max - min);
            format!("{:.*}", options.decimals, value)
        })
        .collect()
}

struct Layout {
    scale: usize,
    margin: usize,
    bar_w: usize,
    bar_h: usize,
    tick_len: usize,
    box_w: usize,
    box_h: usize,
}

impl Layout {
    fn new(labels: &[String], options: &CalibrationBarOptions) -> Self {
        let zoom = options.zoom.max(0.1);
        let scale = ((options.font_size as f64 / 6.0) * zoom).round().max(1.0) as usize;
        let margin = (5.0 * zoom).round().max(1.0) as usize;
        let bar_w = (options.font_size as f64 * zoom).round().max(2.0) as usize;
        let bar_h = (BAR_HEIGHT * zoom).round().max(2.0) as usize;
        let tick_len = 2 * scale;
        let label_w = labels
            .iter()
            .map(|l| font::text_width(l, scale))
            .max()
            .unwrap_or(0);
        let glyph_h = GLYPH_HEIGHT * scale;

        let box_w = margin + bar_w + tick_len + margin + label_w + margin;
        let box_h = margin + glyph_h / 2 + bar_h + glyph_h / 2 + margin;
        Self {
            scale,
            margin,
            bar_w,
            bar_h,
            tick_len,
            box_w,
            box_h,
        }
    }
}

/// Draws the bar into `image`, clipping whatever does not fit.
pub fn render_calibration_bar(
    image: &mut RgbImage,
    lut: &Lut,
    labels: &[String],
    options: &CalibrationBarOptions,
) {
    let layout = Layout::new(labels, options);
    let right = image.width.saturating_sub(layout.box_w + layout.margin);
    let bottom = image.height.saturating_sub(layout.box_h + layout.margin);
    let (x0, y0) = match options.location {
        BarLocation::UpperRight => (right, layout.margin),
        BarLocation::UpperLeft => (layout.margin, layout.margin),
        BarLocation::LowerRight => (right, bottom),
        BarLocation::LowerLeft => (layout.margin, bottom),
    };

    if let Some(fill) = options.fill.rgb() {
        image.fill_rect(x0, y0, layout.box_w, layout.box_h, fill);
    }

    let glyph_h = GLYPH_HEIGHT * layout.scale;
    let bar_x = x0 + layout.margin;
    let bar_y = y0 + layout.margin + glyph_h / 2;

    // top row is the highest table entry
    for row in 0..layout.bar_h {
        let t = 1.0 - row as f64 / (layout.bar_h - 1) as f64;
        let color = lut.color((t * 255.0).round() as u8);
        image.fill_rect(bar_x, bar_y + row, layout.bar_w, 1, color);
    }

    let Some(ink) = options.label.rgb() else {
        return;
    };

    outline(image, bar_x, bar_y, layout.bar_w, layout.bar_h, ink);

    let n = labels.len();
    for (i, label) in labels.iter().enumerate() {
        let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
        let tick_y = bar_y + (t * (layout.bar_h - 1) as f64).round() as usize;
        image.fill_rect(bar_x + layout.bar_w, tick_y, layout.tick_len, 1, ink);

        let text_x = bar_x + layout.bar_w + layout.tick_len + layout.margin;
        let text_y = tick_y.saturating_sub(glyph_h / 2);
        font::draw_text(label, text_x, text_y, layout.scale, |x, y| {
            image.put_pixel(x, y, ink)
        });
    }
}

fn outline(image: &mut RgbImage, x: usize, y: usize, w: usize, h: usize, ink: [u8; 3]) {
    image.fill_rect(x, y, w, 1, ink);
    image.fill_rect(x, y + h - 1, w, 1, ink);
    image.fill_rect(x, y, 1, h, ink);
    image.fill_rect(x + w - 1, y, 1, h, ink);
}
