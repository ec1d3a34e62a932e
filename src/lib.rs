//! Ratiometric fluorescence images to absolute pH maps.

pub mod cli;
pub mod image_pipeline;
pub mod logger;
