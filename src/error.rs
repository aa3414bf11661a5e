//! Domain errors

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by samplecount itself (I/O and CSV errors travel as anyhow context)
#[derive(Debug, Error)]
pub enum SampleCountError {
    #[error("column '{column}' not found in {}", path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("no header row in {}", path.display())]
    EmptyHeader { path: PathBuf },

    #[error("expected {expected} fields in line {line} of {}, saw {found}", path.display())]
    MalformedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
}
