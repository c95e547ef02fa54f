//! Table module for tablewash
//!
//! This module provides the in-memory table representation that the cleaning
//! pipeline mutates in place. It handles:
//!
//! - Typed cell values with inference for data read back from delimited text
//! - Column name lookup via a name-to-index map
//! - Uniform row removal so every column always keeps the same length
//! - Column pruning, header normalization, and per-column value rewriting

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{WashError, WashResult};

/// Represents a value in a table cell
///
/// This enum provides the possible data types for a cell value. Spreadsheet
/// ingestion produces typed values directly (numbers, booleans, native
/// datetimes); CSV re-ingestion infers types from the raw text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Represents a NULL or missing value
    Null,
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Boolean value (true/false)
    Boolean(bool),
    /// Naive (timezone-less) date and time
    DateTime(NaiveDateTime),
}

/// Equality is strict per variant: no cross-type coercion, and floats compare
/// by bit pattern. Exact-duplicate detection must treat `Integer(1)` and
/// `Float(1.0)` as different values, and the bitwise float comparison keeps
/// `Eq` and `Hash` consistent with each other.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

// Hash with a variant tag so values of different types never collide by
// accident. Floats hash their bit pattern, matching the PartialEq impl.
impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => {
                0_i32.hash(state);
            }
            Value::Integer(i) => {
                1_i32.hash(state);
                i.hash(state);
            }
            Value::Float(f) => {
                2_i32.hash(state);
                f.to_bits().hash(state);
            }
            Value::String(s) => {
                3_i32.hash(state);
                s.hash(state);
            }
            Value::Boolean(b) => {
                4_i32.hash(state);
                b.hash(state);
            }
            Value::DateTime(dt) => {
                5_i32.hash(state);
                dt.hash(state);
            }
        }
    }
}

/// Implementation of string formatting for Value
///
/// Nulls render as empty text, which is also how they serialize into the
/// output CSV. Datetimes use the `YYYY-MM-DD HH:MM:SS` representation.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(float) => write!(f, "{float}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Implementation of string conversion to Value with automatic type inference
///
/// This enables type detection when re-ingesting delimited text. It attempts
/// to parse the string value in the following order:
/// 1. As an integer (i64)
/// 2. As a floating point number (f64)
/// 3. As a boolean
/// 4. Empty strings are converted to NULL values
/// 5. Any other content is stored as a string
impl From<&str> for Value {
    fn from(s: &str) -> Self {
        // Try to parse as integer first
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }

        // Try to parse as float
        if let Ok(fl) = s.parse::<f64>() {
            return Value::Float(fl);
        }

        // Try to parse as boolean
        match s.to_lowercase().as_str() {
            "true" | "yes" => return Value::Boolean(true),
            "false" | "no" => return Value::Boolean(false),
            "" => return Value::Null,
            _ => {}
        }

        // Default to string
        Value::String(s.to_string())
    }
}

impl Value {
    /// Whether the value counts as missing for cleaning purposes
    ///
    /// Both `Null` and empty/whitespace-only strings are treated as missing,
    /// so required-field filtering and default-fill agree on what "empty"
    /// means regardless of how the cell arrived in the table.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// Represents a row in a table
pub type Row = Vec<Value>;

/// Represents an in-memory table
///
/// Ordered column names plus positionally-aligned rows. Row order is the
/// insertion order from the source file, and every mutation preserves the
/// invariant that each row holds exactly `column_count()` values.
#[derive(Debug, Clone)]
pub struct Table {
    /// Column names
    columns: Vec<String>,

    /// Map of column names to their indices
    column_map: HashMap<String, usize>,

    /// Rows of data
    rows: Vec<Row>,
}

impl Table {
    /// Create a new, empty table with the given columns
    pub fn new(columns: Vec<String>) -> Self {
        let column_map = Self::build_column_map(&columns);

        Table {
            columns,
            column_map,
            rows: Vec::new(),
        }
    }

    fn build_column_map(columns: &[String]) -> HashMap<String, usize> {
        columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect()
    }

    /// Get the columns of the table
    ///
    /// The column names maintain their original order as specified when
    /// the table was created or loaded from a file.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get the column count
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the rows of the table
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get the row count
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the index of a column by name
    ///
    /// # Returns
    /// * `Some(usize)` with the column index if found
    /// * `None` if no column with that name exists
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_map.get(name).copied()
    }

    /// Count the non-null values in a column
    ///
    /// Used by the schema summaries printed before and after cleaning.
    pub fn non_null_count(&self, col_idx: usize) -> usize {
        self.rows
            .iter()
            .filter(|row| !matches!(row[col_idx], Value::Null))
            .count()
    }

    /// Add a row to the table
    ///
    /// Verifies that the number of values in the row matches the table
    /// definition, preserving the equal-column-length invariant.
    ///
    /// # Returns
    /// * `Ok(())` if the row was successfully added
    /// * `Err` if the row doesn't match the table schema
    pub fn add_row(&mut self, row: Row) -> WashResult<()> {
        if row.len() != self.columns.len() {
            return Err(WashError::SchemaMismatch {
                got: row.len(),
                want: self.columns.len(),
            });
        }

        self.rows.push(row);
        Ok(())
    }

    /// Keep only the rows matching a predicate
    ///
    /// Removal is uniform across all columns because whole rows are removed.
    /// Relative order of the surviving rows is unchanged.
    ///
    /// # Returns
    /// * The number of rows removed
    pub fn retain_rows<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Row) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(|row| predicate(row));
        before - self.rows.len()
    }

    /// Remove a column by name, dropping its value from every row
    ///
    /// # Returns
    /// * `true` if the column existed and was removed
    /// * `false` if no column with that name exists
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.column_index(name) else {
            return false;
        };

        self.columns.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        self.column_map = Self::build_column_map(&self.columns);
        true
    }

    /// Normalize every column name in place
    ///
    /// Names are trimmed, lowercased, and internal spaces replaced with
    /// underscores (e.g. `"Customer Id"` becomes `"customer_id"`). The
    /// name-to-index map is rebuilt afterwards.
    pub fn normalize_headers(&mut self) {
        for name in &mut self.columns {
            *name = normalize_column_name(name);
        }
        self.column_map = Self::build_column_map(&self.columns);
    }

    /// Rewrite every value in one column
    ///
    /// The closure receives a mutable reference to each cell in row order.
    /// This is the building block for default-fill, date conversion, and
    /// the text/phone normalization steps.
    pub fn map_column<F>(&mut self, col_idx: usize, mut f: F)
    where
        F: FnMut(&mut Value),
    {
        for row in &mut self.rows {
            f(&mut row[col_idx]);
        }
    }
}

/// Normalize a single column name: trim, lowercase, spaces to underscores
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}
