pub mod columns;
pub mod loader;
pub mod row;

pub use columns::{resolve_columns, ColumnMismatch, ColumnResolution, CsvLayout};
pub use loader::{LoadOutcome, LoadReport, PredictionLoader};
pub use row::{RawRow, RowParser, UnexpectedValue, UnexpectedValueLog};
