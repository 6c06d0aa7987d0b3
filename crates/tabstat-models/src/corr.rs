//! Pairwise Pearson correlation
//!
//! Cells are centered by the column means recorded in the schema, the
//! covariance matrix is `XᵗX / (n − 1)` and each correlation is the
//! covariance scaled by both standard deviations. Self-pairs are pinned
//! to exactly 1. A zero-variance column yields NaN against every other
//! column; that is a valid result, not an error.

use serde::{Deserialize, Serialize};
use std::fmt;

use tabstat_core::data::{ColumnSchema, NumberSchema, Table};
use tabstat_core::linalg::Matrix;


/// A column key together with its precomputed mean
pub trait ColumnMean {
    fn key(&self) -> &str;
    fn mean(&self) -> f64;
}

impl ColumnMean for NumberSchema {
    fn key(&self) -> &str {
        &self.key
    }

    fn mean(&self) -> f64 {
        self.mean
    }
}

impl<T: ColumnMean + ?Sized> ColumnMean for &T {
    fn key(&self) -> &str {
        (**self).key()
    }

    fn mean(&self) -> f64 {
        (**self).mean()
    }
}

/// Correlation coefficient of one ordered pair of columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub x: String,
    pub y: String,
    /// In `[-1, 1]`, or NaN when either column has no variance
    pub coef: f64,
}

impl fmt::Display for Correlation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cor({}, {}) = {:.4}", self.x, self.y, self.coef)
    }
}

/// The Numerical entries of a schema, in schema order
pub fn numeric_entries(schema: &[ColumnSchema]) -> Vec<&NumberSchema> {
    schema.iter().filter_map(ColumnSchema::as_number).collect()
}

/// Covariance matrix of the table's columns
///
/// Entry `i` of `entries` describes table column `i`. Non-numeric and
/// missing cells, and columns absent from the table, contribute NaN.
pub fn covariance_matrix<E: ColumnMean>(table: &Table, entries: &[E]) -> Matrix {
    let columns: Vec<usize> = (0..entries.len()).collect();
    covariance(table, entries, &columns)
}

/// Correlation matrix of the table's columns, with a unit diagonal
pub fn correlation_matrix<E: ColumnMean>(table: &Table, entries: &[E]) -> Matrix {
    let columns: Vec<usize> = (0..entries.len()).collect();
    pearson(&covariance(table, entries, &columns))
}

/// Correlation of every ordered pair of columns
///
/// Returns `entries.len()²` correlations, row-major over `(x, y)` in entry
/// order.
pub fn calculate_correlations<E: ColumnMean>(table: &Table, entries: &[E]) -> Vec<Correlation> {
    pairs(entries, &correlation_matrix(table, entries))
}

/// Correlation of every ordered pair of Numerical columns of a table
///
/// Columns are located through the schema index, so the table does not
/// need to be narrowed to its numeric columns first.
pub fn correlate_numeric(table: &Table, schema: &[ColumnSchema]) -> Vec<Correlation> {
    let entries = numeric_entries(schema);
    let columns: Vec<usize> = entries.iter().map(|e| e.index).collect();
    pairs(&entries, &pearson(&covariance(table, &entries, &columns)))
}

fn covariance<E: ColumnMean>(table: &Table, entries: &[E], columns: &[usize]) -> Matrix {
    let n = table.nrows();

    // samples×columns, centered by the schema mean
    let centered = Matrix::from_shape_fn((n, entries.len()), |(row, col)| {
        let value = table
            .column(columns[col])
            .and_then(|cells| cells.get(row))
            .and_then(|cell| cell.as_f64())
            .unwrap_or(f64::NAN);
        value - entries[col].mean()
    });

    centered.t().dot(&centered) / (n as f64 - 1.0)
}

fn pearson(covariance: &Matrix) -> Matrix {
    let stds = covariance.diag().mapv(f64::sqrt);

    let mut correlation = covariance.clone();
    for ((i, j), value) in correlation.indexed_iter_mut() {
        *value = if i == j { 1.0 } else { *value / (stds[i] * stds[j]) };
    }
    correlation
}

fn pairs<E: ColumnMean>(entries: &[E], correlation: &Matrix) -> Vec<Correlation> {
    let k = entries.len();
    let mut correlations = Vec::with_capacity(k * k);
    for (i, x) in entries.iter().enumerate() {
        for (j, y) in entries.iter().enumerate() {
            correlations.push(Correlation {
                x: x.key().to_string(),
                y: y.key().to_string(),
                coef: correlation[[i, j]],
            });
        }
    }
    correlations
}
