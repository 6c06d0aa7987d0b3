//! Dense linear algebra for small systems
//!
//! Matrices are `ndarray` 2-D arrays of `f64`. Products are accumulated in
//! plain index order and the factorization is written out by hand, so
//! results are reproducible across platforms and BLAS builds.

mod lu;
mod ops;


pub use lu::{LuDecomposition, inverse};
pub use ops::{DEFAULT_TOLERANCE, flatten, identity, is_close, multiply, transpose, vector_to_matrix};

pub use crate::data::{Matrix, Vector};

/// Errors raised by matrix operations
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    #[error("Shape mismatch: cannot multiply {left:?} by {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("Matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Matrix is singular and cannot be inverted")]
    Singular,
}

/// Result type for linear algebra operations
pub type Result<T> = std::result::Result<T, LinalgError>;
