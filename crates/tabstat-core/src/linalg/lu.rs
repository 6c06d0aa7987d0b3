//! LU decomposition with partial pivoting and matrix inversion

use std::ops::Range;

use super::*;

/// Factorization `P·A = L·U` of a square matrix
///
/// `l` is unit lower triangular, `u` upper triangular and `p` a row
/// permutation of the identity.
#[derive(Debug, Clone, PartialEq)]
pub struct LuDecomposition {
    pub l: Matrix,
    pub u: Matrix,
    pub p: Matrix,
}

impl LuDecomposition {
    /// Decompose `a`, choosing at each step the remaining row with the
    /// largest magnitude in the pivot column
    ///
    /// Fails with [`LinalgError::Singular`] when a pivot is exactly zero.
    pub fn new(a: &Matrix) -> Result<Self> {
        let n = square_dim(a)?;

        let mut l = Matrix::eye(n);
        let mut u = a.clone();
        let mut p = Matrix::eye(n);

        for i in 0..n {
            let mut pivot = i;
            for k in (i + 1)..n {
                if u[[k, i]].abs() > u[[pivot, i]].abs() {
                    pivot = k;
                }
            }

            if pivot != i {
                swap_rows(&mut u, i, pivot, 0..n);
                swap_rows(&mut p, i, pivot, 0..n);
                // only the multipliers computed so far move with the row
                swap_rows(&mut l, i, pivot, 0..i);
            }

            if u[[i, i]] == 0.0 {
                return Err(LinalgError::Singular);
            }

            for j in (i + 1)..n {
                let factor = u[[j, i]] / u[[i, i]];
                l[[j, i]] = factor;
                for k in i..n {
                    let delta = factor * u[[i, k]];
                    u[[j, k]] -= delta;
                }
            }
        }

        Ok(Self { l, u, p })
    }

    /// Dimension of the decomposed matrix
    pub fn dim(&self) -> usize {
        self.u.nrows()
    }

    /// Solve `A·X = B` for `X`
    ///
    /// Forward substitution solves `L·Y = P·B`, back substitution then
    /// solves `U·X = Y`.
    pub fn solve(&self, b: &Matrix) -> Result<Matrix> {
        let n = self.dim();
        if b.nrows() != n {
            return Err(LinalgError::ShapeMismatch {
                left: self.u.dim(),
                right: b.dim(),
            });
        }

        let pb = multiply(&self.p, b)?;
        let m = b.ncols();

        let mut y = Matrix::zeros((n, m));
        for j in 0..m {
            for i in 0..n {
                let mut sum = 0.0;
                for k in 0..i {
                    sum += self.l[[i, k]] * y[[k, j]];
                }
                y[[i, j]] = pb[[i, j]] - sum;
            }
        }

        let mut x = Matrix::zeros((n, m));
        for j in 0..m {
            for i in (0..n).rev() {
                let mut sum = 0.0;
                for k in (i + 1)..n {
                    sum += self.u[[i, k]] * x[[k, j]];
                }
                let diag = self.u[[i, i]];
                if diag == 0.0 {
                    return Err(LinalgError::Singular);
                }
                x[[i, j]] = (y[[i, j]] - sum) / diag;
            }
        }

        Ok(x)
    }

    /// `A⁻¹`, obtained by solving against the identity
    pub fn inverse(&self) -> Result<Matrix> {
        if self.u.diag().iter().any(|&d| d == 0.0) {
            return Err(LinalgError::Singular);
        }
        self.solve(&Matrix::eye(self.dim()))
    }
}

/// Inverse of a square matrix via LU decomposition
///
/// Returns [`LinalgError::Singular`] when no inverse exists.
pub fn inverse(a: &Matrix) -> Result<Matrix> {
    LuDecomposition::new(a)?.inverse()
}

fn square_dim(a: &Matrix) -> Result<usize> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(LinalgError::NotSquare { rows, cols });
    }
    Ok(rows)
}

fn swap_rows(m: &mut Matrix, a: usize, b: usize, columns: Range<usize>) {
    for k in columns {
        m.swap([a, k], [b, k]);
    }
}
