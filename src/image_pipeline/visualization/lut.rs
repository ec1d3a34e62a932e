//! Named colour lookup tables.
//!
//! A [`Lut`] is a 256-entry RGB table. Catalogs expose tables by name;
//! [`BuiltinLuts`] carries a fixed set computed in code and can be extended
//! with ImageJ `.lut` files from a directory.

use std::path::Path;

use tracing::{debug, warn};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::conversion::PhImage;
use crate::image_pipeline::visualization::types::RgbImage;

/// Substituted when the requested table is missing.
pub const FIRST_FALLBACK_LUT: &str = "Green Fire Blue";
/// Always available; used when the first fallback is missing too.
pub const SECOND_FALLBACK_LUT: &str = "Fire";

const LUT_SIZE: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub struct Lut {
    pub name: String,
    table: Vec<[u8; 3]>,
}

impl Lut {
    /// Builds a table from full 256-entry channel arrays.
    pub fn from_channels(name: impl Into<String>, reds: &[u8], greens: &[u8], blues: &[u8]) -> Result<Self> {
        if reds.len() != LUT_SIZE || greens.len() != LUT_SIZE || blues.len() != LUT_SIZE {
            return Err(ConversionError::ConfigError(format!(
                "LUT channels must hold {} entries (got {}, {}, {})",
                LUT_SIZE,
                reds.len(),
                greens.len(),
                blues.len()
            )));
        }
        let table = (0..LUT_SIZE).map(|i| [reds[i], greens[i], blues[i]]).collect();
        Ok(Self {
            name: name.into(),
            table,
        })
    }

    /// Stretches short channel tables to 256 entries by linear interpolation.
    fn interpolated(name: &str, reds: &[u8], greens: &[u8], blues: &[u8]) -> Self {
        let n = reds.len();
        let scale = n as f64 / LUT_SIZE as f64;
        let table = (0..LUT_SIZE)
            .map(|i| {
                let pos = i as f64 * scale;
                let i1 = pos as usize;
                let i2 = (i1 + 1).min(n - 1);
                let frac = pos - i1 as f64;
                let lerp = |c: &[u8]| ((1.0 - frac) * c[i1] as f64 + frac * c[i2] as f64) as u8;
                [lerp(reds), lerp(greens), lerp(blues)]
            })
            .collect();
        Self {
            name: name.to_string(),
            table,
        }
    }

    /// Piecewise-linear table through `(position, colour)` stops on `[0, 1]`.
    fn from_stops(name: &str, stops: &[(f64, [u8; 3])]) -> Self {
        let table = (0..LUT_SIZE)
            .map(|i| {
                let t = i as f64 / (LUT_SIZE - 1) as f64;
                let upper = stops.iter().position(|(p, _)| *p >= t).unwrap_or(stops.len() - 1);
                if upper == 0 {
                    return stops[0].1;
                }
                let (p0, c0) = stops[upper - 1];
                let (p1, c1) = stops[upper];
                let frac = if p1 > p0 { (t - p0) / (p1 - p0) } else { 1.0 };
                let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
                [mix(c0[0], c1[0]), mix(c0[1], c1[1]), mix(c0[2], c1[2])]
            })
            .collect();
        Self {
            name: name.to_string(),
            table,
        }
    }

    fn ramp(name: &str, rgb: [bool; 3]) -> Self {
        let table = (0..LUT_SIZE)
            .map(|i| {
                let v = i as u8;
                [
                    if rgb[0] { v } else { 0 },
                    if rgb[1] { v } else { 0 },
                    if rgb[2] { v } else { 0 },
                ]
            })
            .collect();
        Self {
            name: name.to_string(),
            table,
        }
    }

    pub fn grays() -> Self {
        Self::ramp("Grays", [true, true, true])
    }

    pub fn fire() -> Self {
        const R: [u8; 32] = [
            0, 0, 1, 25, 49, 73, 98, 122, 146, 162, 173, 184, 195, 207, 217, 229, 240, 252, 255,
            255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
        ];
        const G: [u8; 32] = [
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 14, 35, 57, 79, 101, 117, 133, 147, 161, 175,
            190, 205, 219, 234, 248, 255, 255, 255, 255,
        ];
        const B: [u8; 32] = [
            0, 61, 96, 130, 165, 192, 220, 227, 210, 181, 151, 122, 93, 64, 35, 5, 0, 0, 0, 0, 0,
            0, 0, 0, 0, 0, 0, 35, 98, 160, 223, 255,
        ];
        Self::interpolated(SECOND_FALLBACK_LUT, &R, &G, &B)
    }

    pub fn ice() -> Self {
        const R: [u8; 32] = [
            0, 0, 0, 0, 0, 0, 19, 29, 50, 48, 79, 112, 134, 158, 186, 201, 217, 229, 242, 250,
            250, 250, 250, 251, 250, 250, 250, 250, 251, 251, 243, 230,
        ];
        const G: [u8; 32] = [
            156, 165, 176, 184, 190, 196, 193, 184, 171, 162, 146, 125, 107, 93, 81, 87, 92, 97,
            95, 93, 93, 90, 85, 69, 64, 54, 47, 35, 19, 0, 4, 0,
        ];
        const B: [u8; 32] = [
            140, 147, 158, 166, 170, 176, 209, 220, 234, 225, 236, 246, 250, 251, 250, 250, 245,
            230, 230, 222, 202, 180, 163, 142, 123, 114, 106, 94, 84, 64, 26, 27,
        ];
        Self::interpolated("Ice", &R, &G, &B)
    }

    pub fn spectrum() -> Self {
        let table = (0..LUT_SIZE)
            .map(|i| hue_to_rgb(i as f64 / LUT_SIZE as f64))
            .collect();
        Self {
            name: "Spectrum".to_string(),
            table,
        }
    }

    pub fn red_green() -> Self {
        let table = (0..LUT_SIZE)
            .map(|i| {
                if i < LUT_SIZE / 2 {
                    [(255 - i * 2) as u8, 0, 0]
                } else {
                    [0, ((i - LUT_SIZE / 2) * 2) as u8, 0]
                }
            })
            .collect();
        Self {
            name: "Red/Green".to_string(),
            table,
        }
    }

    pub fn green_fire_blue() -> Self {
        Self::from_stops(
            FIRST_FALLBACK_LUT,
            &[
                (0.0, [0, 0, 0]),
                (0.2, [0, 40, 160]),
                (0.45, [0, 170, 120]),
                (0.65, [80, 220, 40]),
                (0.85, [250, 200, 0]),
                (1.0, [255, 255, 255]),
            ],
        )
    }

    /// Parses an ImageJ LUT file: 768 raw bytes, a 32-byte NIH header
    /// followed by 768 bytes, or a 256-row text table with 3 or 4 columns.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let name = name.into();
        const RAW: usize = LUT_SIZE * 3;
        const NIH_HEADER: usize = 32;

        let body = match bytes.len() {
            RAW => Some(bytes),
            len if len == RAW + NIH_HEADER && bytes.starts_with(b"ICOL") => Some(&bytes[NIH_HEADER..]),
            _ => None,
        };
        if let Some(body) = body {
            return Self::from_channels(
                name,
                &body[..LUT_SIZE],
                &body[LUT_SIZE..2 * LUT_SIZE],
                &body[2 * LUT_SIZE..],
            );
        }

        let text = std::str::from_utf8(bytes)
            .map_err(|_| ConversionError::ConfigError(format!("LUT '{}': unrecognised binary layout", name)))?;
        Self::from_text(name, text)
    }

    fn from_text(name: String, text: &str) -> Result<Self> {
        let mut rows: Vec<[u8; 3]> = Vec::with_capacity(LUT_SIZE);
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let parsed: std::result::Result<Vec<f64>, _> =
                line.split_whitespace().map(str::parse::<f64>).collect();
            let values = match parsed {
                Ok(values) => values,
                // header row
                Err(_) if rows.is_empty() => continue,
                Err(_) => {
                    return Err(ConversionError::ConfigError(format!(
                        "LUT '{}': non-numeric row '{}'",
                        name, line
                    )));
                }
            };
            let rgb = match values.as_slice() {
                [r, g, b] | [_, r, g, b] => [*r as u8, *g as u8, *b as u8],
                _ => {
                    return Err(ConversionError::ConfigError(format!(
                        "LUT '{}': expected 3 or 4 columns, got {}",
                        name,
                        values.len()
                    )));
                }
            };
            rows.push(rgb);
        }
        if rows.len() != LUT_SIZE {
            return Err(ConversionError::ConfigError(format!(
                "LUT '{}': expected {} rows, got {}",
                name,
                LUT_SIZE,
                rows.len()
            )));
        }
        Ok(Self { name, table: rows })
    }

    pub fn color(&self, index: u8) -> [u8; 3] {
        self.table[index as usize]
    }

    /// Table index of `value` when `[min, max]` spans the whole table.
    pub fn index_for(value: f64, min: f64, max: f64) -> u8 {
        if max <= min {
            return if value <= min { 0 } else { 255 };
        }
        let scaled = (value - min) * LUT_SIZE as f64 / (max - min);
        scaled.clamp(0.0, 255.0) as u8
    }

    /// Colours a pH map through this table; no-data pixels render black.
    pub fn apply(&self, image: &PhImage, min: f64, max: f64) -> RgbImage {
        let mut rgb = RgbImage::new(image.width, image.height);
        for (px, &value) in rgb.data.chunks_exact_mut(3).zip(&image.data) {
            if value.is_nan() {
                continue;
            }
            px.copy_from_slice(&self.color(Self::index_for(value as f64, min, max)));
        }
        rgb
    }
}

fn hue_to_rgb(hue: f64) -> [u8; 3] {
    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let q = ((1.0 - f) * 255.0 + 0.5) as u8;
    let t = (f * 255.0 + 0.5) as u8;
    match h as u32 {
        0 => [255, t, 0],
        1 => [q, 255, 0],
        2 => [0, 255, t],
        3 => [0, q, 255],
        4 => [t, 0, 255],
        _ => [255, 0, q],
    }
}

/// Name-keyed source of lookup tables.
pub trait LutCatalog {
    fn list_names(&self) -> Vec<String>;

    fn lut(&self, name: &str) -> Option<&Lut>;

    fn exists(&self, name: &str) -> bool {
        self.lut(name).is_some()
    }

    /// Colours `image` through the table called `name`.
    fn apply(&self, name: &str, image: &PhImage, min: f64, max: f64) -> Result<RgbImage> {
        self.lut(name)
            .map(|lut| lut.apply(image, min, max))
            .ok_or_else(|| ConversionError::ConfigError(format!("LUT '{}' does not exist", name)))
    }
}

/// Picks the table to render with: `requested`, else
/// [`FIRST_FALLBACK_LUT`], else the built-in [`SECOND_FALLBACK_LUT`].
pub fn resolve_lut<C: LutCatalog + ?Sized>(catalog: &C, requested: &str) -> Lut {
    if let Some(lut) = catalog.lut(requested) {
        return lut.clone();
    }
    if let Some(lut) = catalog.lut(FIRST_FALLBACK_LUT) {
        warn!(
            "LUT '{}' does not exist. Using default: '{}'",
            requested, FIRST_FALLBACK_LUT
        );
        return lut.clone();
    }
    warn!(
        "LUT '{}' does not exist. Using default: '{}'",
        requested, SECOND_FALLBACK_LUT
    );
    catalog
        .lut(SECOND_FALLBACK_LUT)
        .cloned()
        .unwrap_or_else(Lut::fire)
}

/// Tables computed in code, plus any loaded from disk.
#[derive(Debug, Clone)]
pub struct BuiltinLuts {
    luts: Vec<Lut>,
}

impl Default for BuiltinLuts {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinLuts {
    pub fn new() -> Self {
        Self {
            luts: vec![
                Lut::green_fire_blue(),
                Lut::fire(),
                Lut::grays(),
                Lut::ice(),
                Lut::spectrum(),
                Lut::ramp("Red", [true, false, false]),
                Lut::ramp("Green", [false, true, false]),
                Lut::ramp("Blue", [false, false, true]),
                Lut::ramp("Cyan", [false, true, true]),
                Lut::ramp("Magenta", [true, false, true]),
                Lut::ramp("Yellow", [true, true, false]),
                Lut::red_green(),
            ],
        }
    }

    /// A catalog holding exactly `luts`.
    pub fn from_luts(luts: Vec<Lut>) -> Self {
        Self { luts }
    }

    /// Adds or replaces a table by name.
    pub fn insert(&mut self, lut: Lut) {
        match self.luts.iter_mut().find(|l| l.name == lut.name) {
            Some(existing) => *existing = lut,
            None => self.luts.push(lut),
        }
    }

    /// Loads every `*.lut` file in `dir`, named by file stem.
    pub fn load_directory(&mut self, dir: &Path) -> Result<usize> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            ConversionError::ConfigError(format!("cannot read LUT directory {}: {}", dir.display(), e))
        })?;

        let mut loaded = 0;
        for entry in entries {
            let path = entry?.path();
            let is_lut = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("lut"));
            if !is_lut || !path.is_file() {
                continue;
            }
            let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            match std::fs::read(&path).map_err(ConversionError::from).and_then(|b| Lut::from_bytes(stem, &b)) {
                Ok(lut) => {
                    debug!("Loaded LUT '{}' from {}", lut.name, path.display());
                    self.insert(lut);
                    loaded += 1;
                }
                Err(e) => warn!("Skipping LUT file {}: {}", path.display(), e),
            }
        }
        Ok(loaded)
    }
}

impl LutCatalog for BuiltinLuts {
    fn list_names(&self) -> Vec<String> {
        self.luts.iter().map(|l| l.name.clone()).collect()
    }

    fn lut(&self, name: &str) -> Option<&Lut> {
        self.luts.iter().find(|l| l.name == name)
    }
}
