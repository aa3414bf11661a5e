//! JSON output format

use anyhow::Result;
use serde::Serialize;
use termcolor::WriteColor;

use crate::pipeline::Report;

use super::OutputFormatter;

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonLookup<'a> {
    sample: &'a str,
    source: String,
    count: Option<usize>,
}

#[derive(Serialize)]
struct JsonDuplicate<'a> {
    sample_id: &'a str,
    count: usize,
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    source: String,
    file: String,
    counted: usize,
    missing: usize,
    distinct: usize,
    duplicates: Vec<JsonDuplicate<'a>>,
}

#[derive(Serialize)]
struct JsonMergedRow<'a> {
    sample_id: &'a str,
    left: Option<usize>,
    right: Option<usize>,
}

#[derive(Serialize)]
struct JsonMerged<'a> {
    left: &'a str,
    right: &'a str,
    rows: Vec<JsonMergedRow<'a>>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    lookup: Option<JsonLookup<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    summaries: Vec<JsonSummary<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merged: Option<JsonMerged<'a>>,
}

impl OutputFormatter for JsonOutput {
    fn render(&self, report: &Report, writer: &mut dyn WriteColor) -> Result<()> {
        let output = JsonReport {
            lookup: report.lookup.as_ref().map(|l| JsonLookup {
                sample: &l.sample,
                source: l.source.to_string(),
                count: l.count,
            }),
            summaries: report
                .summaries
                .iter()
                .map(|s| JsonSummary {
                    source: s.source.to_string(),
                    file: s.path.display().to_string(),
                    counted: s.summary.counted,
                    missing: s.summary.missing,
                    distinct: s.summary.distinct,
                    duplicates: s
                        .summary
                        .duplicates
                        .iter()
                        .map(|(sample_id, count)| JsonDuplicate {
                            sample_id,
                            count: *count,
                        })
                        .collect(),
                })
                .collect(),
            merged: report.merged.as_ref().map(|m| JsonMerged {
                left: &m.left_label,
                right: &m.right_label,
                rows: m
                    .rows
                    .iter()
                    .map(|r| JsonMergedRow {
                        sample_id: &r.sample_id,
                        left: r.left,
                        right: r.right,
                    })
                    .collect(),
            }),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &output)?;
        } else {
            serde_json::to_writer(&mut *writer, &output)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
