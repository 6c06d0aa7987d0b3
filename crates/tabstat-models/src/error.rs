//! Model-related error types

use thiserror::Error;

use tabstat_core::data::DataError;
use tabstat_core::linalg::LinalgError;

/// Model-related errors
#[derive(Debug, Error)]
pub enum ModelError {
    /// Data-related error
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Matrix shape error raised by the linear algebra layer
    #[error("Linear algebra error: {0}")]
    Linalg(LinalgError),

    /// `XᵗX` could not be inverted
    #[error("matrix inversion failed")]
    SingularMatrix,

    /// Insufficient data for model fitting
    #[error("Not enough data: {n_samples} samples for {n_predictors} predictors")]
    InsufficientData {
        /// Number of samples
        n_samples: usize,
        /// Number of estimated coefficients
        n_predictors: usize,
    },

    /// Inputs disagree on a dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Invalid model configuration
    #[error("Invalid model configuration: {message}")]
    InvalidConfig {
        /// Configuration error message
        message: String,
    },
}

impl From<LinalgError> for ModelError {
    fn from(err: LinalgError) -> Self {
        match err {
            LinalgError::Singular => ModelError::SingularMatrix,
            other => ModelError::Linalg(other),
        }
    }
}
