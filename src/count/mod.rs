//! Identifier frequency tables

mod merge;

use std::cmp::Reverse;

use indexmap::IndexMap;

use crate::error::SampleCountError;
use crate::model::Table;

pub use merge::{merge_outer, MergedCounts, MergedRow};

/// Occurrence count per distinct identifier.
///
/// Built once from a column or a header row. Null cells are not counted
/// but are tallied, so `total() + missing()` is the number of values seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    /// Counts keyed by identifier, in order of first appearance
    counts: IndexMap<String, usize>,
    missing: usize,
}

impl FrequencyTable {
    /// Count identifier keys; `None` marks a null cell
    pub fn from_keys<'a>(keys: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        let mut table = Self::default();
        for key in keys {
            match key {
                Some(key) => table.bump(key),
                None => table.missing += 1,
            }
        }
        table
    }

    /// Count the raw values of one column of a table
    pub fn from_column(table: &Table, column: &str) -> Result<Self, SampleCountError> {
        Ok(Self::from_keys(table.column_keys(column)?))
    }

    /// Count header names verbatim, duplicates included
    pub fn from_headers<S: AsRef<str>>(headers: impl IntoIterator<Item = S>) -> Self {
        let mut table = Self::default();
        for header in headers {
            table.bump(header.as_ref());
        }
        table
    }

    fn bump(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.to_string(), 1);
            }
        }
    }

    /// Count for an identifier, `None` when it never appeared
    pub fn get(&self, key: &str) -> Option<usize> {
        self.counts.get(key).copied()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Null values skipped while counting
    pub fn missing(&self) -> usize {
        self.missing
    }

    /// Number of distinct identifiers
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Entries in order of first appearance
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Entries by count, highest first; ties keep first-appearance order
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|&(_, count)| Reverse(count));
        entries
    }

    /// Identifiers seen more than once, highest count first
    pub fn duplicates(&self) -> Vec<(&str, usize)> {
        self.sorted()
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .collect()
    }

    /// Aggregate statistics for reporting
    pub fn summary(&self) -> CountSummary {
        CountSummary {
            counted: self.total(),
            missing: self.missing,
            distinct: self.distinct(),
            duplicates: self
                .duplicates()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

/// Per-source statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountSummary {
    pub counted: usize,
    pub missing: usize,
    pub distinct: usize,
    /// Identifiers with a count above one, highest first
    pub duplicates: Vec<(String, usize)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, Row};

    #[test]
    fn test_counts_each_occurrence() {
        let keys = ["a", "b", "a", "c", "a", "b"];
        let counts = FrequencyTable::from_keys(keys.iter().map(|&k| Some(k)));

        assert_eq!(counts.get("a"), Some(3));
        assert_eq!(counts.get("b"), Some(2));
        assert_eq!(counts.get("c"), Some(1));
        assert_eq!(counts.get("d"), None);
        assert_eq!(counts.total(), keys.len());
        assert_eq!(counts.distinct(), 3);
    }

    #[test]
    fn test_nulls_are_missing() {
        let counts = FrequencyTable::from_keys([Some("a"), None, None]);

        assert_eq!(counts.total(), 1);
        assert_eq!(counts.missing(), 2);
        assert_eq!(counts.total() + counts.missing(), 3);
    }

    #[test]
    fn test_from_headers() {
        let counts = FrequencyTable::from_headers([
            "Sample",
            "TCGA-D3-A5GT-01",
            "TCGA-D3-A5GT-01",
            "TCGA-AA-0000-01",
        ]);
        assert_eq!(counts.get("TCGA-D3-A5GT-01"), Some(2));
        assert_eq!(counts.get("Sample"), Some(1));
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.missing(), 0);
    }

    #[test]
    fn test_from_column_counts_raw_text() {
        let mut table = Table::new(vec![Column::new("sample_id", 0)]);
        let ids = ["007", "7", "1.50", "1.5", "TRUE", "true", " TCGA-1", "TCGA-1", "x", "x"];
        for (i, id) in ids.iter().enumerate() {
            table.add_row(Row::parse(vec![id.to_string()], i + 2));
        }

        let counts = FrequencyTable::from_column(&table, "sample_id").unwrap();
        assert_eq!(counts.distinct(), 9);
        assert_eq!(counts.get("007"), Some(1));
        assert_eq!(counts.get("7"), Some(1));
        assert_eq!(counts.get(" TCGA-1"), Some(1));
        assert_eq!(counts.get("x"), Some(2));
        assert!(FrequencyTable::from_column(&table, "sampleID").is_err());
    }

    #[test]
    fn test_sorted_and_duplicates() {
        let counts = FrequencyTable::from_headers(["c", "a", "b", "a", "b", "a"]);
        assert_eq!(counts.sorted(), vec![("a", 3), ("b", 2), ("c", 1)]);
        assert_eq!(counts.duplicates(), vec![("a", 3), ("b", 2)]);

        let summary = counts.summary();
        assert_eq!(summary.counted, 6);
        assert_eq!(summary.distinct, 3);
        assert_eq!(summary.duplicates[0], ("a".to_string(), 3));
    }

    #[test]
    fn test_sorted_ties_keep_first_appearance() {
        let counts = FrequencyTable::from_headers(["z", "m", "a"]);
        assert_eq!(counts.sorted(), vec![("z", 1), ("m", 1), ("a", 1)]);
    }
}
