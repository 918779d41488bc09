//! CLI library components for the FMI report extractor.

pub mod cli;
pub mod commands;
pub mod logging;
mod progress;
pub mod summary;
