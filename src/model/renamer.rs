//! Ordered column renaming and selection

use indexmap::IndexMap;

use crate::error::SampleCountError;

use super::schema::Column;
use super::table::{Row, Table};

/// Ordered mapping from source column name to canonical name.
///
/// Applying it keeps only the mapped columns, in mapping order, and leaves
/// the rows themselves (count, order, source lines) untouched.
#[derive(Debug, Clone, Default)]
pub struct ColumnRenamer {
    mapping: IndexMap<String, String>,
}

impl ColumnRenamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `source -> target` entry
    pub fn with(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.mapping.insert(source.into(), target.into());
        self
    }

    /// Rename and select columns, producing a new table
    pub fn apply(&self, table: &Table) -> Result<Table, SampleCountError> {
        let picks = self
            .mapping
            .keys()
            .map(|source| table.require_column(source))
            .collect::<Result<Vec<_>, _>>()?;

        let columns: Vec<Column> = picks
            .iter()
            .zip(self.mapping.values())
            .enumerate()
            .map(|(i, (&src_idx, target))| table.columns[src_idx].renamed(target.as_str(), i))
            .collect();

        let mut renamed = Table::new(columns).with_source(table.source.clone());
        renamed.rows = table
            .rows
            .iter()
            .map(|row| {
                let cells = picks
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or_default())
                    .collect();
                let text = picks
                    .iter()
                    .map(|&i| row.text.get(i).cloned().unwrap_or_default())
                    .collect();
                Row::new(cells, text, row.source_line)
            })
            .collect();

        Ok(renamed)
    }
}
