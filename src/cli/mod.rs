//! CLI command handlers

pub mod commands;

pub use commands::{build_reports, inspect, InspectOptions, OutputFormat};
