//! Batch processing module
//!
//! Finds ratio images under the input directory and drives each one through
//! conversion, visualization and persistence.

mod discovery;
mod pipeline;
mod progress;
pub mod types;


pub use discovery::{discover_files, matches_extension};
pub use pipeline::{PhPipeline, output_file_name};
pub use progress::{LogProgress, ProgressSink, RedrawProgress, progress_bar};
pub use types::{BatchSummary, FileOutcome};
