//! Elementary matrix operations

use ndarray::Axis;

use super::*;

/// Tolerance used by [`is_close`] callers that have no better choice
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Swap rows and columns
pub fn transpose(a: &Matrix) -> Matrix {
    a.t().to_owned()
}

/// Matrix product `A·B`
///
/// Each entry is accumulated left to right over the shared dimension.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.ncols() != b.nrows() {
        return Err(LinalgError::ShapeMismatch {
            left: a.dim(),
            right: b.dim(),
        });
    }

    let mut product = Matrix::zeros((a.nrows(), b.ncols()));
    for ((i, j), cell) in product.indexed_iter_mut() {
        *cell = a
            .row(i)
            .iter()
            .zip(b.column(j))
            .fold(0.0, |sum, (x, y)| sum + x * y);
    }
    Ok(product)
}

/// `n×n` identity matrix
pub fn identity(n: usize) -> Matrix {
    Matrix::eye(n)
}

/// Column matrix (`n×1`) holding `v`
pub fn vector_to_matrix(v: &Vector) -> Matrix {
    v.view().insert_axis(Axis(1)).to_owned()
}

/// First column of `m` as a vector; empty if `m` has no columns
pub fn flatten(m: &Matrix) -> Vector {
    if m.ncols() == 0 {
        return Vector::zeros(0);
    }
    m.column(0).to_owned()
}

/// Same shape and every entry within `epsilon`
pub fn is_close(a: &Matrix, b: &Matrix, epsilon: f64) -> bool {
    a.dim() == b.dim() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < epsilon)
}
