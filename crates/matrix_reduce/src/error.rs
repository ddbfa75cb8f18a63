//! src/error.rs
//!
//! Error types for matrix construction and parallel reduction.

use std::time::Duration;
use thiserror::Error;

/// Errors raised by a [`Reduction`](crate::reduction::Reduction) while combining values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperatorError {
    #[error("accumulator became non-finite ({value})")]
    NonFinite { value: f64 },
}

/// Errors that can occur while building a matrix or running a reduction.
///
/// Construction errors (`EmptyDataset`, `RaggedRows`, `ShapeMismatch`,
/// `InvalidWorkerCount`) are caller bugs and are reported before any thread
/// is spawned. The remaining variants abort the join barrier: no partial sum
/// is ever returned alongside them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReduceError {
    #[error("dataset must have at least one row and one column")]
    EmptyDataset,

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{rows}x{columns} matrix needs {expected} values, got {found}")]
    ShapeMismatch {
        rows: usize,
        columns: usize,
        expected: usize,
        found: usize,
    },

    #[error("worker count must be greater than 0, got {0}")]
    InvalidWorkerCount(usize),

    #[error("failed to spawn worker thread {worker}: {message}")]
    Spawn { worker: usize, message: String },

    #[error("interrupted while waiting for worker {worker}")]
    Interrupted { worker: usize },

    #[error("worker {worker} did not finish within {timeout:?}")]
    JoinTimeout { worker: usize, timeout: Duration },

    #[error("worker {worker} panicked: {message}")]
    WorkerPanicked { worker: usize, message: String },

    #[error("reduction failed on worker {worker}: {source}")]
    Operator {
        worker: usize,
        #[source]
        source: OperatorError,
    },
}

/// Errors raised while loading an [`EngineConfig`](crate::engine::EngineConfig) from disk.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
