//! Tablewash library crate
//!
//! This is the library component of tablewash, containing all the core
//! functionality for a command-line utility that cleans a customer
//! spreadsheet. The library provides:
//!
//! - Excel (.xlsx) ingestion into an in-memory table with typed cells
//! - Exact and key-based deduplication that keeps first occurrences
//! - Column pruning and header normalization (lowercase, underscores)
//! - Required-field filtering and placeholder filling for missing values
//! - Date parsing, text standardization, and digits-only phone numbers
//! - CSV serialization with nulls rendered as empty fields
//!
//! The pipeline is a single fixed sequence of in-place table mutations;
//! there is no configuration beyond the two file paths and a verbosity flag.

pub mod cli;
pub mod config;
pub mod csv_handler;
pub mod error;
pub mod pipeline;
pub mod table;
pub mod xlsx_handler;
