//! tablewash - a command-line utility that cleans a customer spreadsheet
//!
//! This tool loads a customer dataset from an Excel workbook, applies a fixed
//! sequence of cleaning transformations to one in-memory table, and writes
//! the result as a comma-delimited file, printing progress and summary
//! statistics at each step.
//!
//! # Program Flow
//!
//! 1. Parse command-line arguments (input path, output path, verbosity)
//! 2. Load the spreadsheet into an in-memory table
//! 3. Deduplicate, prune, normalize, fill, and convert in fixed order
//! 4. Report the final schema alongside the original row count
//! 5. Persist the cleaned table as CSV and preview the first rows
//!
//! Every failure is routed through one top-level handler that prints a
//! user-facing message; the process exits non-zero so scripts can tell a
//! failed run from a successful one.

mod cli;
mod config;
mod csv_handler;
mod error;
mod pipeline;
mod table;
mod xlsx_handler;

use std::process::ExitCode;

use anyhow::Result;

use config::AppConfig;
use error::WashError;
use pipeline::CleanPipeline;

/// Main entry point for the tablewash utility
///
/// Parses arguments, builds the application configuration, and runs the
/// cleaning pipeline. Errors from any step land in the single handler
/// below rather than unwinding with a raw error dump.
///
/// # Returns
/// * `ExitCode::SUCCESS` when the cleaned file was written
/// * `ExitCode::FAILURE` after a reported error
fn main() -> Result<ExitCode> {
    let args = cli::parse_args()?;

    let config = AppConfig::new(args.verbose, args.input, args.output);

    if config.verbose() {
        println!("Running in verbose mode");
        println!(
            "Input: '{}', output: '{}'",
            config.input().display(),
            config.output().display()
        );
    }

    let pipeline = CleanPipeline::new(config);
    match pipeline.run() {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            report_failure(&err);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Print a user-facing message for a failed run
///
/// The two recoverable-by-the-user cases (missing input file, build without
/// spreadsheet support) get targeted instructions; everything else reports
/// the underlying error with a hint about the likely cause.
fn report_failure(err: &WashError) {
    match err {
        WashError::InputNotFound(path) => {
            eprintln!("Error: the file '{}' was not found.", path.display());
            eprintln!("Please make sure the file is in the same folder as the program.");
        }
        WashError::XlsxSupportMissing => {
            eprintln!("Error: this build cannot read Excel files.");
            eprintln!("Rebuild with spreadsheet support: cargo build --features xlsx");
        }
        other => {
            eprintln!("An error occurred: {other}");
            eprintln!("Please check your column names and file contents.");
        }
    }
}
