//! Tabular data structures for tabstat
//!
//! This module provides the column-major table model consumed by the
//! statistics engines, together with schema inference over raw cells.

mod datetime;
mod filter;
mod frequency;
mod schema;
mod table;
mod transform;
mod value;


// Re-exports
pub use datetime::{format_timestamp, parse_datetime, parse_timestamp_millis};
pub use filter::{Filter, Operator, filter_table};
pub use frequency::FrequencyTable;
pub use schema::{
    CategoricalSchema, ColumnSchema, DataType, DateTimeRange, DateTimeSchema, InferenceConfig,
    NumberRange, NumberSchema, infer_column, infer_schema, infer_schema_with,
};
pub use table::Table;
pub use transform::{Transform, center};
pub use value::Value;

// Type aliases for common use cases
pub type Vector = ndarray::Array1<f64>;
pub type Matrix = ndarray::Array2<f64>;

/// Sentinel substituted for missing cells before frequency counting
pub const MISSING_SENTINEL: &str = "N/A";

/// Error types specific to data operations
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Column index out of bounds: index {index}, columns {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Column '{column}' is not numeric (row {row}: {value})")]
    NonNumericData {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;
