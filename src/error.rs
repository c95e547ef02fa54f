//! Error handling for tablewash
//!
//! This module defines custom error types for the tablewash application.
//! It categorizes the failure modes of the cleaning pipeline (missing input,
//! missing spreadsheet support, parse failures, schema problems) and supplies
//! helpful error messages to users.
//!
//! The module uses thiserror to minimize boilerplate code and create
//! a consistent error handling approach throughout the codebase.

use std::path::PathBuf;

use thiserror::Error;

/// WashError represents all possible errors that can occur in the tablewash application
///
/// This enum provides a comprehensive set of error types that can occur during:
/// - Spreadsheet ingestion
/// - Table and column operations
/// - CSV serialization
/// - File I/O
///
/// Each variant includes descriptive error messages to help users understand
/// and troubleshoot problems.
#[derive(Error, Debug)]
pub enum WashError {
    /// The input spreadsheet does not exist at the given path
    #[error("input file '{}' was not found", .0.display())]
    InputNotFound(PathBuf),

    /// The binary was built without the `xlsx` feature and cannot parse spreadsheets
    #[error("spreadsheet support is not compiled into this build")]
    XlsxSupportMissing,

    /// Error while parsing the spreadsheet content
    #[error("spreadsheet parsing error: {0}")]
    Spreadsheet(String),

    /// Error during file system operations (reading/writing files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error while writing or re-reading delimited output
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error when a required column doesn't exist in the table
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    /// Error when a row doesn't match the table's column count
    #[error("row has {got} values, but the table has {want} columns")]
    SchemaMismatch { got: usize, want: usize },
}

/// Result type alias for operations that can produce a WashError
///
/// This type alias simplifies function signatures and error handling throughout the codebase.
/// It represents either a successful result of type `T` or a `WashError`.
pub type WashResult<T> = std::result::Result<T, WashError>;
