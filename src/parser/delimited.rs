//! Tab- and comma-separated file parser

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::error::SampleCountError;
use crate::model::{Column, Row, Table};

use super::Parser;

/// Parser for delimiter-separated text with a header row
pub struct DelimitedParser {
    delimiter: u8,
    extensions: &'static [&'static str],
}

impl DelimitedParser {
    /// Tab-separated files
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            extensions: &["tsv", "tab", "txt"],
        }
    }

    /// Comma-separated files
    pub fn csv() -> Self {
        Self {
            delimiter: b',',
            extensions: &["csv"],
        }
    }

    fn reader(&self, path: &Path) -> Result<csv::Reader<BufReader<File>>> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        // Short rows are allowed and padded; long rows are rejected per record
        Ok(csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(file)))
    }

    fn read_headers(
        &self,
        reader: &mut csv::Reader<BufReader<File>>,
        path: &Path,
    ) -> Result<Vec<String>> {
        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read headers of {}", path.display()))?;
        if headers.is_empty() {
            return Err(SampleCountError::EmptyHeader {
                path: path.to_path_buf(),
            }
            .into());
        }
        Ok(headers.iter().map(str::to_string).collect())
    }
}

impl Parser for DelimitedParser {
    fn parse(&self, path: &Path) -> Result<Table> {
        let mut reader = self.reader(path)?;

        let columns: Vec<Column> = self
            .read_headers(&mut reader, path)?
            .into_iter()
            .enumerate()
            .map(|(i, name)| Column::new(name, i))
            .collect();

        let width = columns.len();
        let mut table = Table::new(columns).with_source(path);

        for (row_num, result) in reader.records().enumerate() {
            let record = result.with_context(|| {
                format!("Failed to read row {} of {}", row_num + 1, path.display())
            })?;
            let line = record
                .position()
                .map_or(row_num + 2, |pos| pos.line() as usize);

            if record.len() > width {
                return Err(SampleCountError::MalformedRow {
                    path: path.to_path_buf(),
                    line,
                    expected: width,
                    found: record.len(),
                }
                .into());
            }

            let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
            // Pad with empty (null) fields if row has fewer columns
            fields.resize(width, String::new());

            table.add_row(Row::parse(fields, line));
        }

        table.infer_column_types();

        debug!(
            "Loaded {} rows x {} columns from {}",
            table.row_count(),
            table.column_count(),
            path.display()
        );

        Ok(table)
    }

    fn parse_headers(&self, path: &Path) -> Result<Vec<String>> {
        let mut reader = self.reader(path)?;
        self.read_headers(&mut reader, path)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.extensions.contains(&ext.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellType, CellValue};
    use std::fs;
    use std::path::PathBuf;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_parse_tsv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "clinical.tsv",
            "sampleID\tage\tcohort\nTCGA-1\t61\tBRCA\nTCGA-2\tNA\tLUAD\nTCGA-1\t60.5\n",
        );

        let table = DelimitedParser::tsv().parse(&path).unwrap();
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.source, path);
        assert_eq!(table.columns[0].inferred_type, CellType::String);
        assert_eq!(table.columns[1].inferred_type, CellType::Float);
        // short row is padded
        assert_eq!(table.rows[2].cells[2], CellValue::Null);
        assert_eq!(table.rows[2].text[2], "");
        assert_eq!(table.rows[2].source_line, 4);
    }

    #[test]
    fn test_fields_kept_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "ids.tsv", "sampleID\n007\n TCGA-1\n");

        let table = DelimitedParser::tsv().parse(&path).unwrap();
        assert_eq!(table.rows[0].text[0], "007");
        assert_eq!(table.rows[1].text[0], " TCGA-1");
    }

    #[test]
    fn test_long_row_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "mut.tsv",
            "sample\tgene\nTCGA-1\tTP53\nTCGA-2\tKRAS\textra\tmore\n",
        );

        let err = DelimitedParser::tsv().parse(&path).unwrap_err();
        match err.downcast_ref::<SampleCountError>() {
            Some(SampleCountError::MalformedRow {
                line,
                expected,
                found,
                ..
            }) => {
                assert_eq!((*line, *expected, *found), (3, 2, 4));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_headers_keeps_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "seq.tsv", "Sample\tA\tA\tB\nTP53\t1.0\t2.0\t3.0\n");

        let headers = DelimitedParser::tsv().parse_headers(&path).unwrap();
        assert_eq!(headers, vec!["Sample", "A", "A", "B"]);
    }

    #[test]
    fn test_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "empty.tsv", "");

        let err = DelimitedParser::tsv().parse(&path).unwrap_err();
        assert!(err.downcast_ref::<SampleCountError>().is_some());
    }

    #[test]
    fn test_missing_file() {
        let err = DelimitedParser::tsv()
            .parse(Path::new("/nonexistent/HiSeqV2.tsv"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open file"));
    }

    #[test]
    fn test_supports_extension() {
        assert!(DelimitedParser::tsv().supports_extension("TSV"));
        assert!(!DelimitedParser::tsv().supports_extension("csv"));
        assert!(DelimitedParser::csv().supports_extension("csv"));
    }
}
