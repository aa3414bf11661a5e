//! The counting run: load every source, then look up, summarise or merge

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use crate::config::Config;
use crate::count::{merge_outer, CountSummary, MergedCounts};
use crate::parser::ParserFactory;
use crate::source::{load_counts, SampleSource, SourceCounts};

/// Count of one identifier in one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub sample: String,
    pub source: SampleSource,
    /// `None` when the identifier does not appear
    pub count: Option<usize>,
}

/// Statistics for one source file
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSummary {
    pub source: SampleSource,
    pub path: PathBuf,
    pub summary: CountSummary,
}

/// Everything a run produces for output
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Set unless the run is in summary mode
    pub lookup: Option<Lookup>,
    /// Set in summary mode
    pub summaries: Vec<SourceSummary>,
    /// Set when merging was requested
    pub merged: Option<MergedCounts>,
}

/// Counts for all three sources, in pipeline order
#[derive(Debug, Clone)]
pub struct AllCounts {
    pub clinical: SourceCounts,
    pub mutation: SourceCounts,
    pub sequence: SourceCounts,
}

impl AllCounts {
    pub fn get(&self, source: SampleSource) -> &SourceCounts {
        match source {
            SampleSource::Clinical => &self.clinical,
            SampleSource::Mutation => &self.mutation,
            SampleSource::Sequence => &self.sequence,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceCounts> {
        SampleSource::ALL.into_iter().map(move |s| self.get(s))
    }
}

/// Load and count every source; the first failure stops the run
pub fn load_all(config: &Config) -> Result<AllCounts> {
    let factory = ParserFactory::new();
    let load = |source: SampleSource| {
        let path = config.path_for(source);
        load_counts(&factory, source, &path)
            .with_context(|| format!("Failed to count {}", path.display()))
    };

    Ok(AllCounts {
        clinical: load(SampleSource::Clinical)?,
        mutation: load(SampleSource::Mutation)?,
        sequence: load(SampleSource::Sequence)?,
    })
}

/// Build the report for already-loaded counts
pub fn build_report(counts: &AllCounts, config: &Config) -> Report {
    let mut report = Report::default();

    if config.summary {
        report.summaries = counts
            .iter()
            .map(|c| SourceSummary {
                source: c.source,
                path: c.path.clone(),
                summary: c.counts.summary(),
            })
            .collect();
    } else {
        let lookup = Lookup {
            sample: config.sample.clone(),
            source: config.lookup_in,
            count: counts.get(config.lookup_in).counts.get(&config.sample),
        };
        info!(
            "{} in {}: {}",
            lookup.sample,
            lookup.source,
            lookup
                .count
                .map_or_else(|| "absent".to_string(), |c| c.to_string())
        );
        report.lookup = Some(lookup);
    }

    if config.merge {
        let merged = merge_outer(
            &counts.clinical.counts,
            SampleSource::Clinical.label(),
            &counts.mutation.counts,
            SampleSource::Mutation.label(),
        );
        info!(
            "Merged {} identifiers, {} in both sources",
            merged.rows.len(),
            merged.in_both().count()
        );
        report.merged = Some(merged);
    }

    report
}

/// Run the whole pipeline
pub fn run(config: &Config) -> Result<Report> {
    let counts = load_all(config)?;
    Ok(build_report(&counts, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_sources(dir: &Path) {
        fs::write(
            dir.join("PANCAN_clinicalMatrix.tsv"),
            "sampleID\tage\nTCGA-1\t40\nTCGA-2\t50\nTCGA-2\t51\n",
        )
        .unwrap();
        fs::write(
            dir.join("PANCAN_mutation.tsv"),
            "sample\tgene\nTCGA-2\tTP53\nTCGA-3\tKRAS\n",
        )
        .unwrap();
        fs::write(
            dir.join("HiSeqV2.tsv"),
            "Sample\tTCGA-D3-A5GT-01\tTCGA-D3-A5GT-01\tTCGA-AA-0000-01\nTP53\t1\t2\t3\n",
        )
        .unwrap();
    }

    #[test]
    fn test_default_lookup() {
        let dir = tempfile::tempdir().unwrap();
        write_sources(dir.path());

        let report = run(&Config::new(dir.path().to_path_buf())).unwrap();
        let lookup = report.lookup.unwrap();
        assert_eq!(lookup.count, Some(2));
        assert_eq!(lookup.source, SampleSource::Sequence);
        assert!(report.merged.is_none());
        assert!(report.summaries.is_empty());
    }

    #[test]
    fn test_lookup_absent_and_other_source() {
        let dir = tempfile::tempdir().unwrap();
        write_sources(dir.path());

        let config = Config::new(dir.path().to_path_buf()).with_sample("TCGA-9");
        assert_eq!(run(&config).unwrap().lookup.unwrap().count, None);

        let config = Config::new(dir.path().to_path_buf())
            .with_sample("TCGA-2")
            .with_lookup_in(SampleSource::Clinical);
        assert_eq!(run(&config).unwrap().lookup.unwrap().count, Some(2));
    }

    #[test]
    fn test_merge_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        write_sources(dir.path());

        let config = Config::new(dir.path().to_path_buf())
            .with_merge(true)
            .with_summary(true);
        let report = run(&config).unwrap();

        assert!(report.lookup.is_none());
        assert_eq!(report.summaries.len(), 3);
        assert_eq!(report.summaries[0].summary.duplicates, vec![("TCGA-2".to_string(), 2)]);

        let merged = report.merged.unwrap();
        let ids: Vec<&str> = merged.rows.iter().map(|r| r.sample_id.as_str()).collect();
        assert_eq!(ids, vec!["TCGA-1", "TCGA-2", "TCGA-3"]);
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&Config::new(dir.path().to_path_buf())).unwrap_err();
        assert!(format!("{:#}", err).contains("PANCAN_clinicalMatrix.tsv"));
    }
}
