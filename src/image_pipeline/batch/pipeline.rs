use std::path::Path;

use tracing::{error, info, instrument, warn};

use crate::image_pipeline::{
    batch::discovery::discover_files,
    batch::progress::{LogProgress, ProgressSink},
    batch::types::{BatchSummary, FileOutcome},
    calibration::CalibrationResolver,
    common::error::{ConversionError, Result},
    config::{PersistPolicy, RunConfig},
    conversion::{CalibrationBounds, transform},
    tiff::{ImageReader, ImageWriter, RatioImage, StandardTiffWriter, TiffImageReader},
    visualization::{self, BuiltinLuts, Lut, LutCatalog, resolve_lut},
};

/// Output file name for an image title: `pH_` + title, with a `.tif`
/// extension added unless the title already ends in `.tif` or `.tiff`.
pub fn output_file_name(ph_title: &str) -> String {
    let lower = ph_title.to_lowercase();
    if lower.ends_with(".tif") || lower.ends_with(".tiff") {
        ph_title.to_string()
    } else {
        format!("{}.tif", ph_title)
    }
}

pub struct PhPipeline<R: ImageReader, W: ImageWriter, C: LutCatalog> {
    reader: R,
    writer: W,
    catalog: C,
    config: RunConfig,
    progress: Box<dyn ProgressSink>,
}

impl PhPipeline<TiffImageReader, StandardTiffWriter, BuiltinLuts> {
    /// Pipeline with the TIFF reader and writer and the built-in LUTs,
    /// extended by `config.lut_dir` when set.
    pub fn new(config: RunConfig) -> Result<Self> {
        let mut catalog = BuiltinLuts::new();
        if let Some(dir) = &config.lut_dir {
            let loaded = catalog.load_directory(dir)?;
            info!("Loaded {} LUT file(s) from {}", loaded, dir.display());
        }
        Ok(Self::with_custom(
            TiffImageReader,
            StandardTiffWriter,
            catalog,
            config,
        ))
    }
}

impl<R: ImageReader, W: ImageWriter, C: LutCatalog> PhPipeline<R, W, C> {
    pub fn with_custom(reader: R, writer: W, catalog: C, config: RunConfig) -> Self {
        Self {
            reader,
            writer,
            catalog,
            config,
            progress: Box::new(LogProgress),
        }
    }

    pub fn with_progress(mut self, progress: impl ProgressSink + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Resolves the calibration, then processes the whole batch.
    pub fn execute(&self) -> Result<BatchSummary> {
        let bounds = self.resolve_calibration()?;
        self.run(&bounds)
    }

    pub fn resolve_calibration(&self) -> Result<CalibrationBounds> {
        CalibrationResolver::new(&self.reader).resolve(&self.config.calibration)
    }

    /// Converts every discovered file in order.
    ///
    /// Open and bit-depth failures skip the file. Write failures follow
    /// [`PersistPolicy`]: counted under `errors`, or returned immediately.
    #[instrument(skip(self, bounds), fields(
        input = %self.config.input_dir.display(),
        output = %self.config.output_dir.display()
    ))]
    pub fn run(&self, bounds: &CalibrationBounds) -> Result<BatchSummary> {
        let files = discover_files(&self.config.input_dir, &self.config.extensions)?;
        std::fs::create_dir_all(&self.config.output_dir).map_err(|e| {
            ConversionError::OutputWriteError(format!(
                "{}: {}",
                self.config.output_dir.display(),
                e
            ))
        })?;

        let mut summary = BatchSummary {
            total: files.len(),
            ..BatchSummary::default()
        };
        info!(
            "Found {} file(s) matching {:?}",
            summary.total, self.config.extensions
        );

        let mut lut = None;
        for (i, path) in files.iter().enumerate() {
            let outcome = self.process_file(path, bounds, &mut lut);
            summary.record(&outcome);

            match outcome {
                FileOutcome::Failed(e) if self.config.persist_policy == PersistPolicy::Abort => {
                    error!("Aborting batch: {}", e);
                    return Err(e);
                }
                FileOutcome::Failed(e) => error!("Could not save {}: {}", path.display(), e),
                FileOutcome::Skipped(_) | FileOutcome::Processed(_) => {}
            }

            self.progress.update(i + 1, summary.total);
        }

        info!(
            total = summary.total,
            processed = summary.processed,
            skipped = summary.skipped,
            errors = summary.errors,
            "Batch finished"
        );
        Ok(summary)
    }

    /// Requires a non-empty raster with one sample per pixel.
    fn validate_dimensions(&self, image: &RatioImage) -> Result<()> {
        let (width, height) = (image.width, image.height);
        if width == 0 || height == 0 || image.data.len() != width * height {
            return Err(ConversionError::InvalidDimensions(width, height));
        }
        Ok(())
    }

    /// Runs one file through open, validate, transform, render and save.
    /// `lut` is resolved on first use and reused for later files.
    fn process_file(
        &self,
        path: &Path,
        bounds: &CalibrationBounds,
        lut: &mut Option<Lut>,
    ) -> FileOutcome {
        let basename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let _span = tracing::info_span!("file", name = %basename).entered();

        let image = {
            let _span = tracing::info_span!("open_image").entered();
            match self.reader.open_image(path) {
                Ok(image) => image,
                Err(e) => {
                    info!("Could not open image: {} ({})", basename, e);
                    return FileOutcome::Skipped(e);
                }
            }
        };

        if let Err(e) = image.ensure_ratio_format(path) {
            info!(
                "Image is not 32-bit: {} ({}-bit, {} channel(s))",
                basename,
                image.bit_depth(),
                image.channels
            );
            return FileOutcome::Skipped(e);
        }
        if let Err(e) = self.validate_dimensions(&image) {
            warn!("Skipping {}: {}", basename, e);
            return FileOutcome::Skipped(e);
        }

        let ph = {
            let _span = tracing::info_span!("transform",
                width = image.width,
                height = image.height
            ).entered();
            transform(&image, bounds, &self.config.coefficients)
        };
        drop(image);

        let viz = &self.config.visualization;
        let lut = lut.get_or_insert_with(|| resolve_lut(&self.catalog, &viz.lut_name));
        let rendered = {
            let _span = tracing::info_span!("render", lut = %lut.name).entered();
            visualization::render(
                ph,
                lut,
                viz,
                &self.config.calibration_bar,
                self.config.embed_preview,
            )
        };

        let out_path = self.config.output_dir.join(output_file_name(&rendered.ph.title));
        match self.save(&rendered, &out_path) {
            Ok(()) => {
                info!(output = %out_path.display(), "Saved");
                FileOutcome::Processed(out_path)
            }
            Err(e) => FileOutcome::Failed(e),
        }
    }

    /// Encodes in memory first so a failed encode leaves no partial file.
    fn save(&self, image: &visualization::RenderedImage, out_path: &Path) -> Result<()> {
        let _span = tracing::info_span!("encode_tiff").entered();
        let mut buffer = Vec::new();
        self.writer
            .write_tiff(image, &mut buffer, self.config.compression)?;
        std::fs::write(out_path, &buffer).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", out_path.display(), e))
        })
    }
}
