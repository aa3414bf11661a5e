//! samplecount - Count sample identifiers across TCGA data files
//!
//! Loads a clinical matrix, a mutation table, and a sequence-expression
//! matrix, counts how often each sample identifier occurs in each, and
//! reports the count for one identifier, per-source duplicate statistics,
//! or an outer merge of the clinical and mutation counts.

pub mod config;
pub mod count;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod source;

pub use config::Config;
pub use count::FrequencyTable;
pub use error::SampleCountError;
pub use model::Table;
pub use pipeline::Report;
pub use source::SampleSource;
