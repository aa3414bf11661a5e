//! The three TCGA data sources and how each yields sample identifiers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::count::FrequencyTable;
use crate::model::ColumnRenamer;
use crate::parser::ParserFactory;

/// Canonical name of the identifier column after renaming
pub const SAMPLE_ID: &str = "sample_id";

/// A TCGA data file holding sample identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSource {
    /// Clinical matrix, one row per sample
    Clinical,
    /// Mutation table, one row per called mutation
    Mutation,
    /// Sequence-expression matrix, one column per sample
    Sequence,
}

impl SampleSource {
    /// Pipeline order
    pub const ALL: [SampleSource; 3] = [
        SampleSource::Clinical,
        SampleSource::Mutation,
        SampleSource::Sequence,
    ];

    pub fn default_file_name(self) -> &'static str {
        match self {
            SampleSource::Clinical => "PANCAN_clinicalMatrix.tsv",
            SampleSource::Mutation => "PANCAN_mutation.tsv",
            SampleSource::Sequence => "HiSeqV2.tsv",
        }
    }

    /// Column holding identifiers, `None` when they live in the header row
    pub fn identifier_column(self) -> Option<&'static str> {
        match self {
            SampleSource::Clinical => Some("sampleID"),
            SampleSource::Mutation => Some("sample"),
            SampleSource::Sequence => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SampleSource::Clinical => "clinical",
            SampleSource::Mutation => "mutation",
            SampleSource::Sequence => "sequence",
        }
    }
}

impl std::fmt::Display for SampleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for SampleSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clinical" => Ok(SampleSource::Clinical),
            "mutation" => Ok(SampleSource::Mutation),
            "sequence" => Ok(SampleSource::Sequence),
            _ => Err(format!("Unknown sample source: {}", s)),
        }
    }
}

/// Identifier counts read from one source file
#[derive(Debug, Clone)]
pub struct SourceCounts {
    pub source: SampleSource,
    pub path: PathBuf,
    pub counts: FrequencyTable,
}

/// Load a source file and count its sample identifiers
pub fn load_counts(
    factory: &ParserFactory,
    source: SampleSource,
    path: &Path,
) -> Result<SourceCounts> {
    info!("Counting {} identifiers in {}", source, path.display());

    let counts = match source.identifier_column() {
        Some(column) => {
            let table = factory
                .parse(path)
                .with_context(|| format!("Failed to load {} file", source))?;
            let mut renamed = ColumnRenamer::new().with(column, SAMPLE_ID).apply(&table)?;
            renamed.set_index(SAMPLE_ID)?;
            debug!(
                "{}: {} rows, {} distinct identifiers, {} column",
                source,
                renamed.row_count(),
                renamed.row_index.len(),
                renamed.columns[0].inferred_type
            );
            FrequencyTable::from_column(&renamed, SAMPLE_ID)?
        }
        None => {
            let headers = factory
                .parse_headers(path)
                .with_context(|| format!("Failed to load {} file", source))?;
            debug!("{}: {} header columns", source, headers.len());
            FrequencyTable::from_headers(&headers)
        }
    };

    Ok(SourceCounts {
        source,
        path: path.to_path_buf(),
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_clinical_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clin.tsv");
        fs::write(
            &path,
            "sampleID\t_PATIENT\tage\nTCGA-1\tP1\t40\nTCGA-2\tP2\t50\nTCGA-1\tP1\t40\n\tP3\t70\n",
        )
        .unwrap();

        let loaded = load_counts(&ParserFactory::new(), SampleSource::Clinical, &path).unwrap();
        assert_eq!(loaded.counts.get("TCGA-1"), Some(2));
        assert_eq!(loaded.counts.get("TCGA-2"), Some(1));
        assert_eq!(loaded.counts.missing(), 1);
        assert_eq!(loaded.counts.total() + loaded.counts.missing(), 4);
    }

    #[test]
    fn test_identifiers_are_not_normalised() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clin.tsv");
        fs::write(
            &path,
            "sampleID\tage\n007\t1\n7\t1\n1.50\t1\n1.5\t1\n\
             TRUE\t1\ntrue\t1\n TCGA-1\t1\nTCGA-1\t1\nabc\t1\n",
        )
        .unwrap();

        let loaded = load_counts(&ParserFactory::new(), SampleSource::Clinical, &path).unwrap();
        let expected = vec![
            ("007", 1),
            ("7", 1),
            ("1.50", 1),
            ("1.5", 1),
            ("TRUE", 1),
            ("true", 1),
            (" TCGA-1", 1),
            ("TCGA-1", 1),
            ("abc", 1),
        ];
        assert_eq!(loaded.counts.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_load_mutation_rejects_long_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mut.tsv");
        fs::write(&path, "sample\tgene\nTCGA-1\tTP53\nTCGA-2\tKRAS\textra\tmore\n").unwrap();

        let err = load_counts(&ParserFactory::new(), SampleSource::Mutation, &path).unwrap_err();
        assert!(format!("{:#}", err).contains("expected 2 fields in line 3"));
    }

    #[test]
    fn test_load_mutation_requires_sample_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mut.tsv");
        fs::write(&path, "sampleID\tgene\nTCGA-1\tTP53\n").unwrap();

        let err = load_counts(&ParserFactory::new(), SampleSource::Mutation, &path).unwrap_err();
        assert!(format!("{:#}", err).contains("column 'sample' not found"));
    }

    #[test]
    fn test_load_sequence_counts_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seq.tsv");
        fs::write(
            &path,
            "Sample\tTCGA-D3-A5GT-01\tTCGA-D3-A5GT-01\tTCGA-AA-0000-01\nTP53\t1\t2\t3\n",
        )
        .unwrap();

        let loaded = load_counts(&ParserFactory::new(), SampleSource::Sequence, &path).unwrap();
        assert_eq!(loaded.counts.get("TCGA-D3-A5GT-01"), Some(2));
        assert_eq!(loaded.counts.total(), 4);
    }

    #[test]
    fn test_source_from_str() {
        assert_eq!("Mutation".parse::<SampleSource>(), Ok(SampleSource::Mutation));
        assert!("rna".parse::<SampleSource>().is_err());
        assert_eq!(SampleSource::Sequence.to_string(), "sequence");
    }
}
