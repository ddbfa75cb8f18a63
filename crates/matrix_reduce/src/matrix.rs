//! src/matrix.rs
//!
//! Immutable, row-major matrix shared read-only by every reduction worker.

use crate::error::ReduceError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// A rectangular grid of `f64` values stored contiguously in row-major order
/// behind an atomic reference count (`Arc<[f64]>`).
///
/// This enables:
/// - Zero-copy clone: cloning only bumps the `Arc` counter, so each worker can
///   own a handle to the same storage.
/// - Thread-safe sharing: the values are never mutated after construction.
///
/// A `Matrix` always has `rows >= 1` and `columns >= 1`; constructors reject
/// anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    values: Arc<[f64]>,
    rows: usize,
    columns: usize,
}

impl Matrix {
    /// Builds a matrix from a vector of rows. Every row must have the same
    /// (non-zero) length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ReduceError> {
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        if columns == 0 {
            return Err(ReduceError::EmptyDataset);
        }

        let row_count = rows.len();
        let mut values = Vec::with_capacity(row_count * columns);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != columns {
                return Err(ReduceError::RaggedRows {
                    row,
                    expected: columns,
                    found: cells.len(),
                });
            }
            values.extend(cells);
        }

        Ok(Self {
            values: values.into(),
            rows: row_count,
            columns,
        })
    }

    /// Builds a `rows x columns` matrix from already flattened row-major values.
    pub fn from_vec(rows: usize, columns: usize, values: Vec<f64>) -> Result<Self, ReduceError> {
        if rows == 0 || columns == 0 {
            return Err(ReduceError::EmptyDataset);
        }
        let expected = rows
            .checked_mul(columns)
            .ok_or(ReduceError::ShapeMismatch {
                rows,
                columns,
                expected: usize::MAX,
                found: values.len(),
            })?;
        if values.len() != expected {
            return Err(ReduceError::ShapeMismatch {
                rows,
                columns,
                expected,
                found: values.len(),
            });
        }

        Ok(Self {
            values: values.into(),
            rows,
            columns,
        })
    }

    /// Fills a `rows x columns` matrix with values drawn uniformly from `[0, 1)`.
    ///
    /// The same `seed` always produces the same matrix.
    pub fn random(rows: usize, columns: usize, seed: u64) -> Result<Self, ReduceError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let values = (0..rows.saturating_mul(columns))
            .map(|_| rng.random::<f64>())
            .collect();
        Self::from_vec(rows, columns, values)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of elements (`rows * columns`).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Maps a flattened index to `(row, column)`.
    ///
    /// Both the division and the modulus are taken against the row length.
    ///
    /// # Panics
    /// If `index >= self.len()`.
    #[inline]
    pub fn position(&self, index: usize) -> (usize, usize) {
        assert!(
            index < self.len(),
            "flattened index {} out of bounds for {}x{} matrix",
            index,
            self.rows,
            self.columns
        );
        (index / self.columns, index % self.columns)
    }

    /// Value at `(row, column)`.
    ///
    /// # Panics
    /// If either coordinate is out of range.
    #[inline]
    pub fn at(&self, row: usize, column: usize) -> f64 {
        assert!(
            row < self.rows && column < self.columns,
            "({}, {}) out of bounds for {}x{} matrix",
            row,
            column,
            self.rows,
            self.columns
        );
        self.values[row * self.columns + column]
    }

    /// Value at a flattened index.
    ///
    /// # Panics
    /// If `index >= self.len()`.
    #[inline]
    pub fn get(&self, index: usize) -> f64 {
        let (row, column) = self.position(index);
        self.at(row, column)
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.columns;
        &self.values[start..start + self.columns]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Single-threaded sum, in flattened order.
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = ReduceError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}
