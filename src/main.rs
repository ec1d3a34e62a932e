use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use ratio_ph_rs::cli::Cli;
use ratio_ph_rs::image_pipeline::{
    BuiltinLuts, ConfigFile, LogProgress, LutCatalog, PhPipeline, RedrawProgress,
};
use ratio_ph_rs::logger;

use tracing::{error, info};

fn main() -> ExitCode {
    logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.list_luts {
        let mut catalog = BuiltinLuts::new();
        if let Some(dir) = &cli.lut_dir {
            catalog.load_directory(dir)?;
        }
        for name in catalog.list_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    info!("Starting ratio to pH conversion...");

    let base = match &cli.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let config = cli
        .apply(base)?
        .into_builder()
        .build()
        .context("invalid configuration")?;

    let pipeline = PhPipeline::new(config)?;
    let pipeline = if std::io::stderr().is_terminal() {
        pipeline.with_progress(RedrawProgress::new(std::io::stderr()))
    } else {
        pipeline.with_progress(LogProgress)
    };

    let config = pipeline.config();
    info!("Input: {}", config.input_dir.display());
    info!("Output: {}", config.output_dir.display());
    info!("Calibration mode: {}", config.calibration.mode);
    info!(
        "Polynomial: B3={} B2={} B1={} B0={}",
        config.coefficients.b3, config.coefficients.b2, config.coefficients.b1, config.coefficients.b0
    );
    info!(
        "LUT: {}, pH range {}-{}",
        config.visualization.lut_name, config.visualization.display_min, config.visualization.display_max
    );
    if !pipeline.catalog().exists(&config.visualization.lut_name) {
        info!("Available LUTs: {}", pipeline.catalog().list_names().join(", "));
    }

    let bounds = pipeline
        .resolve_calibration()
        .context("calibration failed, no image was processed")?;
    let summary = pipeline.run(&bounds)?;

    info!(
        "Finished: {} processed, {} skipped, {} not saved",
        summary.processed, summary.skipped, summary.errors
    );
    Ok(())
}
