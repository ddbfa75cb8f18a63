//! Bounded-worker parallel reduction over dense, read-only matrices.
//!
//! A [`Matrix`] is split by the [`Partitioner`] into contiguous ranges of its
//! row-major index space, one per worker. The [`ReduceEngine`] folds each
//! range on its own thread and combines the partial results once every worker
//! has been joined.

pub mod engine;
pub mod error;
pub mod matrix;
pub mod partition;
pub mod reduction;
pub mod strategy;

pub use engine::{reduce, EngineConfig, Interrupter, ReduceEngine, ReduceOutcome};
pub use error::{ConfigError, OperatorError, ReduceError};
pub use matrix::Matrix;
pub use partition::{Partition, Partitioner};
pub use reduction::{CheckedSum, Max, Min, Reduction, Sum};
pub use strategy::{SequentialSum, SumMatrix};
