//! Data model for tabular data representation

mod renamer;
mod schema;
mod table;

pub use renamer::ColumnRenamer;
pub use schema::{CellType, Column};
pub use table::{CellValue, Row, Table};
