//! src/reduction.rs
//!
//! Reduction operators used by workers to fold their partition and by the
//! coordinator to fold the partial results.
//!
//! An operator must be associative and commutative with respect to its
//! `identity`, so that splitting the input differently only changes
//! floating-point rounding, never the mathematical result.

use crate::error::OperatorError;

/// A combining function with an identity element.
///
/// Implementations must be `Send + Sync` so a single instance can be shared
/// by every worker thread of a reduction.
pub trait Reduction: Send + Sync {
    /// Value contributed by an empty partition.
    fn identity(&self) -> f64;

    /// Folds `value` into `acc`.
    fn combine(&self, acc: f64, value: f64) -> Result<f64, OperatorError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Plain floating-point addition. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

impl Reduction for Sum {
    fn identity(&self) -> f64 {
        0.0
    }

    #[inline]
    fn combine(&self, acc: f64, value: f64) -> Result<f64, OperatorError> {
        Ok(acc + value)
    }

    fn name(&self) -> &'static str {
        "sum"
    }
}

/// Addition that fails as soon as the accumulator overflows to infinity or
/// becomes NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckedSum;

impl Reduction for CheckedSum {
    fn identity(&self) -> f64 {
        0.0
    }

    #[inline]
    fn combine(&self, acc: f64, value: f64) -> Result<f64, OperatorError> {
        let next = acc + value;
        if next.is_finite() {
            Ok(next)
        } else {
            Err(OperatorError::NonFinite { value: next })
        }
    }

    fn name(&self) -> &'static str {
        "checked-sum"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Max;

impl Reduction for Max {
    fn identity(&self) -> f64 {
        f64::NEG_INFINITY
    }

    #[inline]
    fn combine(&self, acc: f64, value: f64) -> Result<f64, OperatorError> {
        Ok(acc.max(value))
    }

    fn name(&self) -> &'static str {
        "max"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Min;

impl Reduction for Min {
    fn identity(&self) -> f64 {
        f64::INFINITY
    }

    #[inline]
    fn combine(&self, acc: f64, value: f64) -> Result<f64, OperatorError> {
        Ok(acc.min(value))
    }

    fn name(&self) -> &'static str {
        "min"
    }
}

/// Folds `values` with `op`, starting from its identity.
pub fn fold<R, I>(op: &R, values: I) -> Result<f64, OperatorError>
where
    R: Reduction + ?Sized,
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .try_fold(op.identity(), |acc, value| op.combine(acc, value))
}
