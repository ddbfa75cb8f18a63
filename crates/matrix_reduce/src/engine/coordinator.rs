//! src/engine/coordinator.rs
//!
//! `ReduceEngine`: partitions a matrix, runs one worker thread per partition
//! and folds the partial results behind a join barrier.
//!
//! # Lifecycle of one `reduce` call
//! 1. `Partitioner::contiguous` splits `[0, rows * columns)` into exactly
//!    `config.workers` ranges.
//! 2. One `WorkerHandle` is spawned per range; all of them share the same
//!    `Matrix` storage.
//! 3. Workers are joined in creation order. Each join waits for that worker's
//!    thread to terminate, then folds its partial into the running total.
//! 4. The total is returned once every worker has been joined.
//!
//! # Failure semantics
//! Interruption, join timeout, worker panic and operator errors are all
//! fatal for the call: the first one aborts the remaining joins and is
//! returned to the caller. Workers that have not been joined are detached and
//! run to completion on their own; their results are discarded.

use crate::error::ReduceError;
use crate::matrix::Matrix;
use crate::partition::{Partition, Partitioner};
use crate::reduction::{Reduction, Sum};
use crossbeam_channel::{at, never, select, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::config::EngineConfig;
use super::interrupt::Interrupter;
use super::worker::WorkerHandle;

/// Partial aggregate produced by one worker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartialResult {
    pub worker: usize,
    pub partition: Partition,
    pub value: f64,
}

/// Final value of a reduction together with the per-worker partials, in
/// creation order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReduceOutcome {
    pub value: f64,
    pub partials: Vec<PartialResult>,
}

/// Bounded one-shot parallel reduction over a [`Matrix`].
///
/// Each call to [`reduce`](Self::reduce) spawns `config.workers` fresh
/// threads; nothing is kept alive between calls.
///
/// # Thread safety
/// `ReduceEngine` is `Send + Sync`; several threads may run reductions with
/// the same engine concurrently.
pub struct ReduceEngine {
    config: EngineConfig,
    reduction: Arc<dyn Reduction>,
    interrupter: Option<Interrupter>,
}

impl ReduceEngine {
    /// Creates an engine summing with `config.workers` threads.
    pub fn new(config: EngineConfig) -> Result<Self, ReduceError> {
        if config.workers == 0 {
            return Err(ReduceError::InvalidWorkerCount(config.workers));
        }
        Ok(Self {
            config,
            reduction: Arc::new(Sum),
            interrupter: None,
        })
    }

    /// Shorthand for an engine with default config and `workers` threads.
    pub fn with_workers(workers: usize) -> Result<Self, ReduceError> {
        Self::new(EngineConfig::builder().workers(workers).build())
    }

    /// Replaces the reduction operator (defaults to [`Sum`]).
    pub fn with_reduction<R: Reduction + 'static>(mut self, reduction: R) -> Self {
        self.reduction = Arc::new(reduction);
        self
    }

    /// Makes the join barrier observe `interrupter`.
    pub fn with_interrupter(mut self, interrupter: Interrupter) -> Self {
        self.interrupter = Some(interrupter);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn reduction(&self) -> &dyn Reduction {
        self.reduction.as_ref()
    }

    /// Reduces every element of `matrix`. Blocks until all workers are joined.
    pub fn reduce(&self, matrix: &Matrix) -> Result<f64, ReduceError> {
        self.reduce_detailed(matrix).map(|outcome| outcome.value)
    }

    /// Like [`reduce`](Self::reduce), but also returns each worker's partial.
    pub fn reduce_detailed(&self, matrix: &Matrix) -> Result<ReduceOutcome, ReduceError> {
        let partitions = Partitioner::contiguous(matrix.len(), self.config.workers)?;
        let deadline = self
            .config
            .join_timeout()
            .map(|timeout| (Instant::now() + timeout, timeout));

        tracing::debug!(
            rows = matrix.rows(),
            columns = matrix.columns(),
            workers = partitions.len(),
            op = self.reduction.name(),
            "starting reduction"
        );

        let mut handles = Vec::with_capacity(partitions.len());
        for (id, partition) in partitions.into_iter().enumerate() {
            handles.push(WorkerHandle::spawn(
                id,
                partition,
                matrix.clone(),
                Arc::clone(&self.reduction),
                &self.config.thread_name_prefix,
            )?);
        }

        self.join_all(handles, deadline).inspect_err(|e| {
            tracing::warn!(error = %e, "reduction aborted");
        })
    }

    /// Joins `handles` in order, folding each partial into the running total.
    /// Returning early drops the remaining handles, detaching their threads.
    fn join_all(
        &self,
        handles: Vec<WorkerHandle>,
        deadline: Option<(Instant, Duration)>,
    ) -> Result<ReduceOutcome, ReduceError> {
        let mut total = self.reduction.identity();
        let mut partials = Vec::with_capacity(handles.len());

        for handle in handles {
            self.await_termination(&handle, deadline)?;

            let worker = handle.id();
            let partition = handle.partition();
            let value = handle.join()?;
            tracing::debug!(worker, partial = value, "joined worker");

            total = self
                .reduction
                .combine(total, value)
                .map_err(|source| ReduceError::Operator { worker, source })?;
            partials.push(PartialResult {
                worker,
                partition,
                value,
            });
        }

        Ok(ReduceOutcome {
            value: total,
            partials,
        })
    }

    /// Blocks until `handle`'s thread has terminated, the interrupter fires or
    /// the deadline passes, whichever comes first.
    fn await_termination(
        &self,
        handle: &WorkerHandle,
        deadline: Option<(Instant, Duration)>,
    ) -> Result<(), ReduceError> {
        let worker = handle.id();

        // A pending interrupt fails the join even if the worker is done.
        if self
            .interrupter
            .as_ref()
            .is_some_and(Interrupter::is_interrupted)
        {
            return Err(ReduceError::Interrupted { worker });
        }
        if let Err(TryRecvError::Disconnected) = handle.done().try_recv() {
            return Ok(());
        }

        let uninterruptible = never();
        let interrupt = self
            .interrupter
            .as_ref()
            .map(Interrupter::signal)
            .unwrap_or(&uninterruptible);
        let timer = match deadline {
            Some((when, _)) => at(when),
            None => never(),
        };

        select! {
            recv(handle.done()) -> _ => Ok(()),
            recv(interrupt) -> _ => Err(ReduceError::Interrupted { worker }),
            recv(timer) -> _ => Err(ReduceError::JoinTimeout {
                worker,
                timeout: deadline.map(|(_, timeout)| timeout).unwrap_or_default(),
            }),
        }
    }
}

/// Sums `matrix` with `workers` threads using the default configuration.
///
/// ```
/// use matrix_reduce::{reduce, Matrix};
///
/// let matrix = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
/// assert_eq!(reduce(&matrix, 2).unwrap(), 21.0);
/// ```
pub fn reduce(matrix: &Matrix, workers: usize) -> Result<f64, ReduceError> {
    ReduceEngine::with_workers(workers)?.reduce(matrix)
}
