#![allow(dead_code)]

use matrix_reduce::{Matrix, OperatorError, Reduction};
use std::time::Duration;

/// `rows x columns` matrix holding `1, 2, 3, ...` in row-major order.
/// Sums of these are exact in `f64`, whatever the fold order.
pub fn counting_matrix(rows: usize, columns: usize) -> Matrix {
    let values = (1..=rows * columns).map(|v| v as f64).collect();
    Matrix::from_vec(rows, columns, values).expect("valid shape")
}

/// Expected sum of `counting_matrix(rows, columns)`.
pub fn counting_sum(rows: usize, columns: usize) -> f64 {
    let n = (rows * columns) as f64;
    n * (n + 1.0) / 2.0
}

/// Sum that sleeps before every combine, to keep workers busy.
pub struct SlowSum {
    pub delay: Duration,
}

impl Reduction for SlowSum {
    fn identity(&self) -> f64 {
        0.0
    }

    fn combine(&self, acc: f64, value: f64) -> Result<f64, OperatorError> {
        std::thread::sleep(self.delay);
        Ok(acc + value)
    }

    fn name(&self) -> &'static str {
        "slow-sum"
    }
}

/// Sum that panics when it meets `trigger`.
pub struct PanicOn {
    pub trigger: f64,
}

impl Reduction for PanicOn {
    fn identity(&self) -> f64 {
        0.0
    }

    fn combine(&self, acc: f64, value: f64) -> Result<f64, OperatorError> {
        if value == self.trigger {
            panic!("refusing to add {}", value);
        }
        Ok(acc + value)
    }

    fn name(&self) -> &'static str {
        "panic-on"
    }
}
