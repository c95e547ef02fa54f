//! Spreadsheet ingestion module for tablewash
//!
//! This module loads the first worksheet of an .xlsx workbook into an
//! in-memory [`Table`], using the calamine crate. The first row of the sheet
//! is taken as the header row; every following row becomes a data row with
//! cells converted to the pipeline's [`Value`] type (empty cells and cell
//! errors become nulls, native Excel datetimes keep their type).
//!
//! Excel support is compiled in through the default `xlsx` cargo feature.
//! Without it, loading reports a missing-capability error instead, so the
//! rest of the crate builds and tests unchanged.

use std::path::Path;

use crate::error::WashResult;
use crate::table::Table;

/// Load the first worksheet of an .xlsx file into a table
///
/// # Arguments
/// * `path` - Path of the workbook to read
///
/// # Returns
/// * `Ok(Table)` with header-derived column names and typed cell values
/// * `Err(WashError::InputNotFound)` if the path does not exist
/// * `Err(WashError::Spreadsheet)` if the workbook cannot be parsed or has
///   no sheet/header row
#[cfg(feature = "xlsx")]
pub fn load_xlsx(path: &Path) -> WashResult<Table> {
    use calamine::{open_workbook, Data, DataType as _, Reader as _, Xlsx};

    use crate::error::WashError;
    use crate::table::Value;

    if !path.exists() {
        return Err(WashError::InputNotFound(path.to_path_buf()));
    }

    let mut workbook: Xlsx<std::io::BufReader<std::fs::File>> =
        open_workbook(path).map_err(|e: calamine::XlsxError| WashError::Spreadsheet(e.to_string()))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| WashError::Spreadsheet("workbook contains no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| WashError::Spreadsheet(e.to_string()))?;

    let mut rows = range.rows();

    // First row is the header; header cells render via Display so numeric
    // headers still produce usable column names.
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| WashError::Spreadsheet(format!("sheet '{sheet}' has no header row")))?
        .iter()
        .map(|cell| cell.to_string())
        .collect();

    let mut table = Table::new(headers);

    for row in rows {
        let values: Vec<Value> = row
            .iter()
            .map(|cell| match cell {
                Data::Empty | Data::Error(_) => Value::Null,
                Data::Int(i) => Value::Integer(*i),
                Data::Float(f) => Value::Float(*f),
                Data::String(s) if s.is_empty() => Value::Null,
                Data::String(s) => Value::String(s.clone()),
                Data::Bool(b) => Value::Boolean(*b),
                Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => cell
                    .as_datetime()
                    .map(Value::DateTime)
                    .unwrap_or(Value::Null),
            })
            .collect();

        table.add_row(values)?;
    }

    Ok(table)
}

/// Stub used when the crate is built without the `xlsx` feature
///
/// Always reports that spreadsheet support is missing, which the top-level
/// handler turns into a rebuild instruction for the user.
#[cfg(not(feature = "xlsx"))]
pub fn load_xlsx(_path: &Path) -> WashResult<Table> {
    Err(crate::error::WashError::XlsxSupportMissing)
}
