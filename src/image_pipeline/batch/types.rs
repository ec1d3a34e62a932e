//! Batch result types

use std::path::PathBuf;

use crate::image_pipeline::common::error::ConversionError;

/// Result of one input file
#[derive(Debug)]
pub enum FileOutcome {
    /// Converted and written to the contained path
    Processed(PathBuf),
    /// Could not be opened or is not a 32-bit image
    Skipped(ConversionError),
    /// Converted but the output could not be written
    Failed(ConversionError),
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files discovered
    pub total: usize,
    pub processed: usize,
    pub skipped: usize,
    /// Files whose output could not be written
    pub errors: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Processed(_) => self.processed += 1,
            FileOutcome::Skipped(_) => self.skipped += 1,
            FileOutcome::Failed(_) => self.errors += 1,
        }
    }
}
