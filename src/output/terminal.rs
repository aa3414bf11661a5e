//! Plain terminal output

use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::count::MergedCounts;
use crate::pipeline::{Lookup, Report, SourceSummary};

use super::OutputFormatter;

/// Printed in place of a count that does not exist
pub const ABSENT: &str = "None";

/// Printed in merged tables for a side without the identifier
const MISSING_CELL: &str = "NaN";

/// Terminal output
pub struct TerminalOutput {
    max_duplicates: usize,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self { max_duplicates: 10 }
    }

    /// Limit how many duplicated identifiers are listed per source
    pub fn with_max_duplicates(max_duplicates: usize) -> Self {
        Self { max_duplicates }
    }

    fn write_heading(&self, writer: &mut dyn WriteColor, text: &str) -> Result<()> {
        writer.set_color(ColorSpec::new().set_bold(true))?;
        write!(writer, "{}", text)?;
        writer.reset()?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_lookup(&self, lookup: &Lookup, writer: &mut dyn WriteColor) -> Result<()> {
        match lookup.count {
            Some(count) => writeln!(writer, "{}", count)?,
            None => writeln!(writer, "{}", ABSENT)?,
        }
        Ok(())
    }

    fn write_summaries(
        &self,
        summaries: &[SourceSummary],
        writer: &mut dyn WriteColor,
    ) -> Result<()> {
        self.write_heading(writer, "Sample identifier counts:")?;

        let mut builder = Builder::default();
        builder.push_record(["source", "file", "counted", "missing", "distinct", "duplicated"]);
        for s in summaries {
            builder.push_record([
                s.source.to_string(),
                s.path.display().to_string(),
                s.summary.counted.to_string(),
                s.summary.missing.to_string(),
                s.summary.distinct.to_string(),
                s.summary.duplicates.len().to_string(),
            ]);
        }
        writeln!(writer, "{}", builder.build().with(Style::sharp()))?;

        for s in summaries.iter().filter(|s| !s.summary.duplicates.is_empty()) {
            writeln!(writer)?;
            self.write_heading(writer, &format!("Duplicated in {}:", s.source))?;
            for (sample, count) in s.summary.duplicates.iter().take(self.max_duplicates) {
                writer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
                write!(writer, "  {}", sample)?;
                writer.reset()?;
                writeln!(writer, " x{}", count)?;
            }
            let hidden = s.summary.duplicates.len().saturating_sub(self.max_duplicates);
            if hidden > 0 {
                writeln!(writer, "  ... and {} more", hidden)?;
            }
        }
        Ok(())
    }

    fn write_merged(&self, merged: &MergedCounts, writer: &mut dyn WriteColor) -> Result<()> {
        self.write_heading(writer, "Merged counts:")?;

        let cell = |count: Option<usize>| {
            count.map_or_else(|| MISSING_CELL.to_string(), |c| c.to_string())
        };

        let mut builder = Builder::default();
        builder.push_record([
            "sample_id".to_string(),
            merged.left_label.clone(),
            merged.right_label.clone(),
        ]);
        for row in &merged.rows {
            builder.push_record([row.sample_id.clone(), cell(row.left), cell(row.right)]);
        }
        writeln!(writer, "{}", builder.build().with(Style::sharp()))?;
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, report: &Report, writer: &mut dyn WriteColor) -> Result<()> {
        if let Some(lookup) = &report.lookup {
            self.write_lookup(lookup, writer)?;
        }

        if !report.summaries.is_empty() {
            self.write_summaries(&report.summaries, writer)?;
        }

        if let Some(merged) = &report.merged {
            if report.lookup.is_some() || !report.summaries.is_empty() {
                writeln!(writer)?;
            }
            self.write_merged(merged, writer)?;
        }

        Ok(())
    }
}
