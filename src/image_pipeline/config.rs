//! Run configuration module
//!
//! One immutable [`RunConfig`] is built before any work starts and passed
//! explicitly to the pipeline. Values may come from a JSON file and are
//! overridden field by field by the builder.

mod file;
pub mod types;


pub use file::ConfigFile;
pub use types::{PersistPolicy, RunConfig, RunConfigBuilder};
