//! Parser layer for reading delimited tabular files

mod delimited;

use std::path::Path;

use anyhow::Result;

use crate::error::SampleCountError;
use crate::model::Table;

pub use self::delimited::DelimitedParser;

/// Trait for parsing tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path) -> Result<Table>;

    /// Read only the header row
    fn parse_headers(&self, path: &Path) -> Result<Vec<String>>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for choosing a parser based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(DelimitedParser::tsv()), Box::new(DelimitedParser::csv())],
        }
    }

    /// Get a parser for the given file path
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser, SampleCountError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        self.parsers
            .iter()
            .find(|p| p.supports_extension(&ext))
            .map(|p| p.as_ref())
            .ok_or_else(|| SampleCountError::UnsupportedFormat {
                extension: if ext.is_empty() { "unknown".to_string() } else { ext },
            })
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path) -> Result<Table> {
        self.get_parser(path)?.parse(path)
    }

    /// Read the header row using the appropriate parser
    pub fn parse_headers(&self, path: &Path) -> Result<Vec<String>> {
        self.get_parser(path)?.parse_headers(path)
    }
}
