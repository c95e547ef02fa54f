//! CSV file handling module for tablewash
//!
//! This module serializes the cleaned in-memory table to a comma-delimited
//! file and can load such a file back into a [`Table`]. It provides:
//!
//! - Writing a table with a header row and no index column, overwriting any
//!   existing file (nulls become empty fields, datetimes their default
//!   textual representation)
//! - Loading a CSV with a header row, inferring cell types from the text
//!
//! Buffered I/O is used for both directions.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::WashResult;
use crate::table::{Table, Value};

/// Write a table to a CSV file
///
/// The header row carries the table's column names in order; each data row
/// is rendered through the [`Value`] display rules, so nulls serialize as
/// empty fields. Any existing file at the path is overwritten.
///
/// # Arguments
/// * `table` - The table to serialize
/// * `path` - Destination path
///
/// # Returns
/// * `Ok(())` if the table was successfully written
/// * `Err` if the file could not be created or written
pub fn write_csv(table: &Table, path: &Path) -> WashResult<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);

    // Write headers
    csv_writer.write_record(table.columns())?;

    // Write rows
    for row in table.rows() {
        let record: Vec<String> = row.iter().map(|value| value.to_string()).collect();
        csv_writer.write_record(&record)?;
    }

    // Flush and finish
    csv_writer.flush()?;

    Ok(())
}

/// Load a CSV file with a header row into a table
///
/// Cell types are inferred from the raw text (integer, float, boolean,
/// empty-to-null, otherwise string). Used to re-ingest cleaned output,
/// for example when checking that a second cleaning pass changes nothing.
///
/// # Arguments
/// * `path` - Path of the CSV file to read
///
/// # Returns
/// * `Ok(Table)` with columns taken from the header row
/// * `Err` if the file cannot be opened or parsed
pub fn load_csv(path: &Path) -> WashResult<Table> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()?
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>();

    let mut table = Table::new(headers);

    for result in csv_reader.records() {
        let record = result?;
        let row = record.iter().map(Value::from).collect();
        table.add_row(row)?;
    }

    Ok(table)
}
