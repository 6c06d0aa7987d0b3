use crate::data::DataError;
use crate::distributions::DistributionError;
use crate::linalg::LinalgError;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Linear algebra error: {0}")]
    LinearAlgebra(#[from] LinalgError),

    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
