//! src/engine/worker.rs
//!
//! One reduction worker: a named OS thread that folds a single partition of a
//! shared matrix into a partial result.
//!
//! # Result publication
//! The partial is the return value of the thread closure, so it can only be
//! observed through `JoinHandle::join`, i.e. after the thread has terminated.
//! `WorkerHandle` never exposes it any other way: the only accessor,
//! [`WorkerHandle::join`], consumes the handle.
//!
//! # Termination signal
//! Each worker also owns the sole `Sender` of a `done` channel that is never
//! sent on. The sender is dropped when the closure returns or unwinds, which
//! disconnects the receiver. The coordinator can therefore wait for
//! termination inside `select!`, next to an interrupt signal and a deadline,
//! and only call the blocking `join` once the thread is already finished.

use crate::error::{OperatorError, ReduceError};
use crate::matrix::Matrix;
use crate::partition::Partition;
use crate::reduction::Reduction;
use crossbeam_channel::{bounded, Receiver};
use std::any::Any;
use std::sync::Arc;
use std::thread;

thread_local! {
    /// Id of the worker running on the current thread, if any.
    static WORKER_ID: std::cell::Cell<Option<usize>> = const { std::cell::Cell::new(None) };
}

/// Id of the reduction worker running on the calling thread, or `None` when
/// called from any other thread.
pub fn current_worker_id() -> Option<usize> {
    WORKER_ID.with(|id| id.get())
}

/// Handle to a spawned worker thread.
pub(crate) struct WorkerHandle {
    id: usize,
    partition: Partition,
    done: Receiver<()>,
    thread: thread::JoinHandle<Result<f64, OperatorError>>,
}

impl WorkerHandle {
    /// Spawns a worker folding `partition` of `matrix` with `op`.
    pub(crate) fn spawn(
        id: usize,
        partition: Partition,
        matrix: Matrix,
        op: Arc<dyn Reduction>,
        name_prefix: &str,
    ) -> Result<Self, ReduceError> {
        let (done_tx, done) = bounded::<()>(0);

        let thread = thread::Builder::new()
            .name(format!("{}-{}", name_prefix, id))
            .spawn(move || {
                let _done = done_tx;
                WORKER_ID.with(|slot| slot.set(Some(id)));
                scan(&matrix, partition, op.as_ref())
            })
            .map_err(|e| ReduceError::Spawn {
                worker: id,
                message: e.to_string(),
            })?;

        Ok(Self {
            id,
            partition,
            done,
            thread,
        })
    }

    pub(crate) fn id(&self) -> usize {
        self.id
    }

    pub(crate) fn partition(&self) -> Partition {
        self.partition
    }

    /// Disconnects when the worker thread has finished running its closure.
    pub(crate) fn done(&self) -> &Receiver<()> {
        &self.done
    }

    /// Waits for the thread to terminate and returns its partial result.
    pub(crate) fn join(self) -> Result<f64, ReduceError> {
        let id = self.id;
        match self.thread.join() {
            Ok(Ok(partial)) => Ok(partial),
            Ok(Err(source)) => Err(ReduceError::Operator { worker: id, source }),
            Err(payload) => Err(ReduceError::WorkerPanicked {
                worker: id,
                message: panic_message(payload.as_ref()),
            }),
        }
    }
}

/// Folds the flattened indices of `partition` that lie inside `matrix`, in
/// increasing order, starting from `op.identity()`.
pub(crate) fn scan<R>(matrix: &Matrix, partition: Partition, op: &R) -> Result<f64, OperatorError>
where
    R: Reduction + ?Sized,
{
    let mut range = partition.clipped(matrix.len());
    tracing::debug!(
        worker = ?current_worker_id(),
        start = range.start,
        end = range.end,
        "scanning partition"
    );

    range.try_fold(op.identity(), |acc, index| {
        let (row, column) = matrix.position(index);
        op.combine(acc, matrix.at(row, column))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduction::{CheckedSum, Sum};

    fn two_by_three() -> Matrix {
        Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap()
    }

    #[test]
    fn test_scan_sums_only_its_range() {
        let matrix = two_by_three();
        assert_eq!(scan(&matrix, Partition::new(0, 3), &Sum).unwrap(), 6.0);
        assert_eq!(scan(&matrix, Partition::new(3, 3), &Sum).unwrap(), 15.0);
        assert_eq!(scan(&matrix, Partition::new(2, 2), &Sum).unwrap(), 7.0);
    }

    #[test]
    fn test_scan_clips_past_the_end() {
        let matrix = two_by_three();
        assert_eq!(scan(&matrix, Partition::new(4, 10), &Sum).unwrap(), 11.0);
        assert_eq!(scan(&matrix, Partition::new(6, 0), &Sum).unwrap(), 0.0);
        assert_eq!(scan(&matrix, Partition::new(9, 3), &Sum).unwrap(), 0.0);
    }

    #[test]
    fn test_spawned_worker_publishes_on_join() {
        let matrix = two_by_three();
        let handle =
            WorkerHandle::spawn(1, Partition::new(3, 3), matrix, Arc::new(Sum), "test").unwrap();
        assert_eq!(handle.id(), 1);
        assert_eq!(handle.partition(), Partition::new(3, 3));
        assert_eq!(handle.join().unwrap(), 15.0);
    }

    #[test]
    fn test_done_disconnects_after_termination() {
        let matrix = two_by_three();
        let handle =
            WorkerHandle::spawn(0, Partition::new(0, 6), matrix, Arc::new(Sum), "test").unwrap();
        assert!(handle.done().recv().is_err());
        assert_eq!(handle.join().unwrap(), 21.0);
    }

    #[test]
    fn test_operator_error_is_tagged_with_worker() {
        let matrix = Matrix::from_rows(vec![vec![f64::MAX, f64::MAX]]).unwrap();
        let handle = WorkerHandle::spawn(
            2,
            Partition::new(0, 2),
            matrix,
            Arc::new(CheckedSum),
            "test",
        )
        .unwrap();
        assert!(matches!(
            handle.join(),
            Err(ReduceError::Operator { worker: 2, .. })
        ));
    }

    #[test]
    fn test_worker_id_is_thread_local() {
        assert_eq!(current_worker_id(), None);
        let seen = std::thread::spawn(|| {
            WORKER_ID.with(|slot| slot.set(Some(7)));
            current_worker_id()
        })
        .join()
        .unwrap();
        assert_eq!(seen, Some(7));
        assert_eq!(current_worker_id(), None);
    }
}
