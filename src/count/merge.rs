//! Outer merge of two frequency tables

use rustc_hash::FxHashSet;

use super::FrequencyTable;

/// One identifier in a merged table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRow {
    pub sample_id: String,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

/// Result of an outer merge, sorted by identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedCounts {
    pub left_label: String,
    pub right_label: String,
    pub rows: Vec<MergedRow>,
}

impl MergedCounts {
    /// Identifiers present on both sides
    pub fn in_both(&self) -> impl Iterator<Item = &MergedRow> {
        self.rows
            .iter()
            .filter(|r| r.left.is_some() && r.right.is_some())
    }
}

/// Full outer join on identifier; a side without the identifier is `None`
pub fn merge_outer(
    left: &FrequencyTable,
    left_label: &str,
    right: &FrequencyTable,
    right_label: &str,
) -> MergedCounts {
    let mut seen = FxHashSet::default();
    let mut keys: Vec<&str> = left
        .iter()
        .chain(right.iter())
        .map(|(key, _)| key)
        .filter(|key| seen.insert(*key))
        .collect();
    keys.sort_unstable();

    let rows = keys
        .into_iter()
        .map(|key| MergedRow {
            sample_id: key.to_string(),
            left: left.get(key),
            right: right.get(key),
        })
        .collect();

    MergedCounts {
        left_label: left_label.to_string(),
        right_label: right_label.to_string(),
        rows,
    }
}
