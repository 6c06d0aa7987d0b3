//! Types shared by the model families

pub use coefficient::Coefficient;

pub use crate::error::ModelError;

pub mod coefficient;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
