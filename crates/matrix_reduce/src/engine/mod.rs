//! src/engine/mod.rs
//!
//! This module implements the `ReduceEngine`.
//!
//! The engine coordinates the `Matrix`, the `Partitioner` and a set of worker
//! threads to reduce every element of the matrix to a single value.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌─────────┐
//!                    │ Matrix  │ (Arc-shared, read-only)
//!                    └────┬────┘
//!                         │ len = rows * columns
//!                         ↓
//!                  ┌──────────────┐
//!                  │ Partitioner  │ (N contiguous, disjoint ranges)
//!                  └──────┬───────┘
//!                         │
//!                         ↓
//!                  ┌──────────────┐
//!                  │ ReduceEngine │ ←───── EngineConfig (workers, timeout, ...)
//!                  └──────┬───────┘
//!                         │ spawns one thread per range
//!                         ↓
//!                   [Worker Threads] (scan range, fold with Reduction)
//!                         │
//!                         │ join barrier, creation order
//!                         ↓                ↑
//!                   ┌───────────┐     Interrupter
//!                   │  f64      │
//!                   └───────────┘
//! ```
//!
//! # Module Structure
//!
//! ```text
//! src/engine/
//! ├── mod.rs          # Public API exports + architecture docs
//! ├── config.rs       # EngineConfig, builder, JSON loading
//! ├── coordinator.rs  # ReduceEngine and the join barrier
//! ├── interrupt.rs    # Interrupter handle
//! └── worker.rs       # WorkerHandle and the per-partition scan
//! ```
//!
//! # Example Usage
//! ```
//! use matrix_reduce::{EngineConfig, Matrix, ReduceEngine};
//! use std::time::Duration;
//!
//! let matrix = Matrix::random(64, 48, 7).unwrap();
//! let config = EngineConfig::builder()
//!     .workers(4)
//!     .join_timeout(Duration::from_secs(10))
//!     .build();
//!
//! let engine = ReduceEngine::new(config).unwrap();
//! let total = engine.reduce(&matrix).unwrap();
//! assert!((total - matrix.sum()).abs() < 1e-9);
//! ```

mod config;
mod coordinator;
mod interrupt;
mod worker;

pub use config::{EngineConfig, EngineConfigBuilder};
pub use coordinator::{reduce, PartialResult, ReduceEngine, ReduceOutcome};
pub use interrupt::Interrupter;
pub use worker::current_worker_id;
