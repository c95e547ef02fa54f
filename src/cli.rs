//! CLI argument parsing module for tablewash
//!
//! This module handles parsing command-line arguments using the clap crate.
//! The interface is deliberately small: the tool always runs the same fixed
//! cleaning pipeline, so the only knobs are the input/output paths (which
//! default to the conventional file names) and a verbosity flag.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Default input spreadsheet, expected next to the binary
pub const DEFAULT_INPUT: &str = "customers-100.xlsx";

/// Default destination for the cleaned CSV
pub const DEFAULT_OUTPUT: &str = "cleaned_customers-100.csv";

/// Command-line arguments for tablewash
///
/// This struct represents all configurable aspects of the application through
/// command-line parameters. It is automatically populated by clap based on
/// the provided arguments.
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Cleans a customer spreadsheet and writes the result as CSV"
)]
pub struct WashArgs {
    /// Input spreadsheet to clean
    ///
    /// Must be an .xlsx workbook whose first sheet carries a header row.
    #[clap(default_value = DEFAULT_INPUT, help = "Input spreadsheet (.xlsx)")]
    pub input: PathBuf,

    /// Destination for the cleaned output
    ///
    /// Written as comma-delimited text with a header row; any existing file
    /// at this path is overwritten.
    #[clap(default_value = DEFAULT_OUTPUT, help = "Output CSV path")]
    pub output: PathBuf,

    /// Enable verbose diagnostic output
    ///
    /// When enabled, the schema summary (column names and non-null counts)
    /// is re-printed after every mutating pipeline step.
    #[clap(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Parse command-line arguments into the WashArgs structure
///
/// This function uses clap to handle argument parsing, validation, and help text generation.
///
/// # Returns
/// * `Ok(WashArgs)` - Command-line arguments successfully parsed
/// * `Err` - Error during argument parsing (handled by clap, usually results in help text display)
pub fn parse_args() -> Result<WashArgs> {
    Ok(WashArgs::parse())
}
