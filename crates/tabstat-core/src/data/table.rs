//! Column-major table of raw cells
//!
//! A Table is what a dataset loader produces: ordered column keys, each
//! holding an equal-length sequence of [`Value`]s.

use super::*;

use indexmap::IndexMap;
use ndarray::Array2;

/// Rectangular, column-major table of cells
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub(crate) columns: IndexMap<String, Vec<Value>>,
    pub(crate) nrows: usize,
}

impl Table {
    /// Create an empty table
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a table from parallel key and column sequences
    pub fn new<S: Into<String>>(keys: Vec<S>, columns: Vec<Vec<Value>>) -> Result<Self> {
        if keys.len() != columns.len() {
            return Err(DataError::DimensionMismatch {
                expected: format!("{} columns", keys.len()),
                actual: format!("{} columns", columns.len()),
            });
        }

        Self::from_columns(keys.into_iter().zip(columns))
    }

    /// Create a table from `(key, cells)` pairs
    pub fn from_columns<I, S, V>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<V>)>,
        S: Into<String>,
        V: Into<Value>,
    {
        let mut table = Self::empty();
        let mut nrows = None;

        for (name, cells) in columns {
            let name = name.into();
            if table.columns.contains_key(&name) {
                return Err(DataError::DuplicateColumn(name));
            }

            match nrows {
                Some(n) if cells.len() != n => {
                    return Err(DataError::DimensionMismatch {
                        expected: format!("{} rows", n),
                        actual: format!("{} rows", cells.len()),
                    });
                }
                None => nrows = Some(cells.len()),
                _ => {}
            }

            table
                .columns
                .insert(name, cells.into_iter().map(Into::into).collect());
        }

        table.nrows = nrows.unwrap_or(0);
        Ok(table)
    }

    /// Get the shape of the table (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.columns.len())
    }

    /// Number of rows, shared by every column
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column keys in table order
    pub fn keys(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Position of a column key
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.columns.get_index_of(key)
    }

    /// Cells of the column at `index`
    pub fn column(&self, index: usize) -> Option<&[Value]> {
        self.columns
            .get_index(index)
            .map(|(_, cells)| cells.as_slice())
    }

    /// Cells of the column named `key`
    pub fn column_by_key(&self, key: &str) -> Option<&[Value]> {
        self.columns.get(key).map(Vec::as_slice)
    }

    /// Iterate over `(key, cells)` in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.columns
            .iter()
            .map(|(key, cells)| (key.as_str(), cells.as_slice()))
    }

    /// Numeric view of one column
    ///
    /// Missing cells become NaN; any other non-numeric cell is an error.
    pub fn numeric_column(&self, index: usize) -> Result<Vector> {
        let (key, cells) = self
            .columns
            .get_index(index)
            .ok_or(DataError::IndexOutOfBounds {
                index,
                len: self.ncols(),
            })?;

        cells
            .iter()
            .enumerate()
            .map(|(row, cell)| match cell.as_f64() {
                Some(v) => Ok(v),
                None if cell.is_missing() => Ok(f64::NAN),
                None => Err(DataError::NonNumericData {
                    column: key.clone(),
                    row,
                    value: cell.to_string(),
                }),
            })
            .collect()
    }

    /// Stack numeric columns into a features×samples matrix
    pub fn numeric_matrix(&self, indices: &[usize]) -> Result<Matrix> {
        let mut matrix = Array2::zeros((indices.len(), self.nrows));
        for (row, &index) in indices.iter().enumerate() {
            let column = self.numeric_column(index)?;
            matrix.row_mut(row).assign(&column);
        }
        Ok(matrix)
    }

    /// Keep only the listed columns, in the listed order
    pub fn select(&self, keys: &[&str]) -> Result<Self> {
        let mut columns = IndexMap::with_capacity(keys.len());
        for &key in keys {
            let cells = self
                .columns
                .get(key)
                .ok_or_else(|| DataError::ColumnNotFound(key.to_string()))?;
            if columns.insert(key.to_string(), cells.clone()).is_some() {
                return Err(DataError::DuplicateColumn(key.to_string()));
            }
        }

        Ok(Self {
            columns,
            nrows: self.nrows,
        })
    }

    /// Keep the rows whose mask entry is `true`
    pub fn rows_where(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.nrows {
            return Err(DataError::DimensionMismatch {
                expected: format!("mask length {}", self.nrows),
                actual: format!("mask length {}", mask.len()),
            });
        }
        Ok(self.retain_rows(mask))
    }

    /// Keep the rows whose mask entry is `true`; `mask` must hold one
    /// entry per row
    pub(crate) fn retain_rows(&self, mask: &[bool]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|(key, cells)| {
                let kept = cells
                    .iter()
                    .zip(mask)
                    .filter(|(_, keep)| **keep)
                    .map(|(cell, _)| cell.clone())
                    .collect();
                (key.clone(), kept)
            })
            .collect();

        Self {
            columns,
            nrows: mask.iter().filter(|keep| **keep).count(),
        }
    }

    /// Cells of one row, in column order
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.nrows {
            return None;
        }
        Some(self.columns.values().map(|cells| &cells[index]).collect())
    }
}
