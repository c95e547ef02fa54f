//! Configuration module for tablewash
//!
//! This module provides a centralized configuration structure for the application.
//! It handles global settings that are passed down through the application rather
//! than using global state or passing individual settings.

use std::path::{Path, PathBuf};

/// Application configuration
///
/// This struct encapsulates all global configuration settings for the application.
/// It is created at startup from the parsed CLI arguments and passed to the
/// pipeline. This approach avoids global mutable state and makes dependencies
/// explicit.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Whether to show verbose output
    verbose: bool,

    /// Path of the input spreadsheet
    input: PathBuf,

    /// Path of the cleaned CSV output
    output: PathBuf,
}

impl AppConfig {
    /// Create a new application configuration
    ///
    /// # Arguments
    /// * `verbose` - Whether to show verbose output
    /// * `input` - Path of the input spreadsheet
    /// * `output` - Path the cleaned CSV is written to
    pub fn new(verbose: bool, input: PathBuf, output: PathBuf) -> Self {
        Self {
            verbose,
            input,
            output,
        }
    }

    /// Get the verbose flag
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Get the input spreadsheet path
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Get the output CSV path
    pub fn output(&self) -> &Path {
        &self.output
    }
}
