//! Configuration handling for samplecount

use std::path::{Path, PathBuf};

use crate::source::SampleSource;

/// Identifier looked up when none is given on the command line
pub const DEFAULT_SAMPLE: &str = "TCGA-D3-A5GT-01";

/// Output format for the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Configuration for a counting run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the data files are read from
    pub data_dir: PathBuf,
    /// Clinical matrix file name
    pub clinical_file: PathBuf,
    /// Mutation table file name
    pub mutation_file: PathBuf,
    /// Sequence-expression file name
    pub sequence_file: PathBuf,
    /// Identifier to look up
    pub sample: String,
    /// Which source's counts the lookup reads
    pub lookup_in: SampleSource,
    /// Output format
    pub output_format: OutputFormat,
    /// Outer-merge the clinical and mutation counts
    pub merge: bool,
    /// Print per-source statistics instead of the lookup
    pub summary: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            clinical_file: PathBuf::from(SampleSource::Clinical.default_file_name()),
            mutation_file: PathBuf::from(SampleSource::Mutation.default_file_name()),
            sequence_file: PathBuf::from(SampleSource::Sequence.default_file_name()),
            sample: DEFAULT_SAMPLE.to_string(),
            lookup_in: SampleSource::Sequence,
            output_format: OutputFormat::default(),
            merge: false,
            summary: false,
        }
    }
}

impl Config {
    /// Create a new Config reading from the given directory
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Default::default()
        }
    }

    /// Set the identifier to look up
    pub fn with_sample(mut self, sample: impl Into<String>) -> Self {
        self.sample = sample.into();
        self
    }

    /// Set which source the lookup reads
    pub fn with_lookup_in(mut self, source: SampleSource) -> Self {
        self.lookup_in = source;
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Enable the merge step
    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    /// Enable summary mode
    pub fn with_summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }

    /// Override the file name used for a source
    pub fn with_file(mut self, source: SampleSource, name: PathBuf) -> Self {
        match source {
            SampleSource::Clinical => self.clinical_file = name,
            SampleSource::Mutation => self.mutation_file = name,
            SampleSource::Sequence => self.sequence_file = name,
        }
        self
    }

    /// File name configured for a source
    pub fn file_name(&self, source: SampleSource) -> &Path {
        match source {
            SampleSource::Clinical => &self.clinical_file,
            SampleSource::Mutation => &self.mutation_file,
            SampleSource::Sequence => &self.sequence_file,
        }
    }

    /// Full path of a source's file under the data directory
    pub fn path_for(&self, source: SampleSource) -> PathBuf {
        self.data_dir.join(self.file_name(source))
    }
}
