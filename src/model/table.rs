//! Table, Row, and Cell data structures

use std::borrow::Cow;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;

use crate::error::SampleCountError;

use super::schema::{CellType, Column};

/// Field texts read as missing, matched exactly against the raw field
pub const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A cell value with type information
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Cow<'static, str>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Infer a typed value from raw field text
    pub fn parse(s: &str) -> CellValue {
        if NA_VALUES.contains(&s) {
            return CellValue::Null;
        }

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return CellValue::Null;
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Bool(false);
        }

        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Int(i);
        }

        if let Ok(f) = trimmed.parse::<f64>() {
            return CellValue::Float(f);
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return CellValue::Date(date);
        }

        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
            return CellValue::DateTime(dt);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
            return CellValue::DateTime(dt);
        }

        CellValue::String(Cow::Owned(trimmed.to_string()))
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

/// A row in the table
#[derive(Debug, Clone)]
pub struct Row {
    /// Typed cell values in column order
    pub cells: Vec<CellValue>,
    /// Field text exactly as read, in column order
    pub text: Vec<String>,
    /// Original line number in source file (1-indexed, header is line 1)
    pub source_line: usize,
}

impl Row {
    pub fn new(cells: Vec<CellValue>, text: Vec<String>, source_line: usize) -> Self {
        Self {
            cells,
            text,
            source_line,
        }
    }

    /// Build a row from raw fields, inferring each cell's type
    pub fn parse(text: Vec<String>, source_line: usize) -> Self {
        let cells = text.iter().map(|field| CellValue::parse(field)).collect();
        Self::new(cells, text, source_line)
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }

    /// Raw text of a non-null cell, used as an identifier key
    pub fn key(&self, index: usize) -> Option<&str> {
        match self.cells.get(index) {
            Some(cell) if !cell.is_null() => self.text.get(index).map(String::as_str),
            _ => None,
        }
    }
}

/// A table containing columns and rows
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// File the table was read from
    pub source: PathBuf,
    /// Column definitions
    pub columns: Vec<Column>,
    /// All rows in the table
    pub rows: Vec<Row>,
    /// Column the row index is built on
    pub index_column: Option<usize>,
    /// Identifier value to the positions of the rows holding it
    pub row_index: IndexMap<String, Vec<usize>>,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            ..Default::default()
        }
    }

    /// Record the file this table came from
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    /// Add a row to the table
    pub fn add_row(&mut self, row: Row) {
        let idx = self.rows.len();
        if let Some(key) = self.index_column.and_then(|col| row.key(col)) {
            self.row_index.entry(key.to_string()).or_default().push(idx);
        }
        self.rows.push(row);
    }

    /// Index rows by the values of a column; the column stays in the table
    pub fn set_index(&mut self, column_name: &str) -> Result<(), SampleCountError> {
        let col_idx = self.require_column(column_name)?;
        self.index_column = Some(col_idx);
        self.rebuild_row_index();
        Ok(())
    }

    fn rebuild_row_index(&mut self) {
        self.row_index.clear();
        let Some(col_idx) = self.index_column else {
            return;
        };
        for (idx, row) in self.rows.iter().enumerate() {
            if let Some(key) = row.key(col_idx) {
                self.row_index.entry(key.to_string()).or_default().push(idx);
            }
        }
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Column index by name, failing with the table's source path
    pub fn require_column(&self, name: &str) -> Result<usize, SampleCountError> {
        self.column_index(name)
            .ok_or_else(|| SampleCountError::MissingColumn {
                column: name.to_string(),
                path: self.source.clone(),
            })
    }

    /// Identifier keys of one column in row order, `None` for null cells
    pub fn column_keys(
        &self,
        name: &str,
    ) -> Result<impl Iterator<Item = Option<&str>> + '_, SampleCountError> {
        let col_idx = self.require_column(name)?;
        Ok(self.rows.iter().map(move |row| row.key(col_idx)))
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Set each column's type from the widest cell type it holds
    pub fn infer_column_types(&mut self) {
        for (col_idx, column) in self.columns.iter_mut().enumerate() {
            column.inferred_type = self
                .rows
                .iter()
                .filter_map(|row| row.get(col_idx))
                .fold(CellType::Null, |acc, cell| acc.widen(CellType::of(cell)));
        }
    }
}
