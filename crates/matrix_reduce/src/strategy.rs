//! src/strategy.rs
//!
//! Common interface over sequential and multi-threaded matrix summation, so
//! callers can swap one for the other.

use crate::engine::ReduceEngine;
use crate::error::ReduceError;
use crate::matrix::Matrix;

/// Something that can reduce a whole matrix to one value.
pub trait SumMatrix {
    fn sum(&self, matrix: &Matrix) -> Result<f64, ReduceError>;
}

/// Single-threaded reference implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialSum;

impl SumMatrix for SequentialSum {
    fn sum(&self, matrix: &Matrix) -> Result<f64, ReduceError> {
        Ok(matrix.sum())
    }
}

/// Uses the engine's configured reduction, which is [`Sum`](crate::reduction::Sum)
/// unless replaced with `with_reduction`.
impl SumMatrix for ReduceEngine {
    fn sum(&self, matrix: &Matrix) -> Result<f64, ReduceError> {
        self.reduce(matrix)
    }
}
