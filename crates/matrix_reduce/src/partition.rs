//! src/partition.rs
//!
//! Splits a flattened index space into contiguous, disjoint ranges, one per
//! worker.
//!
//! # Worker allocation
//! - For a dataset with 10 elements across 4 workers, `size = ceil(10 / 4) = 3`:
//! ```text
//! Flattened: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]
//!
//!   Worker 0: [0, 3)   -> 0, 1, 2
//!   Worker 1: [3, 6)   -> 3, 4, 5
//!   Worker 2: [6, 9)   -> 6, 7, 8
//!   Worker 3: [9, 10)  -> 9         // clipped
//! ```
//! - With more workers than elements the trailing workers get empty ranges:
//! ```text
//! 3 elements, 5 workers (size = 1):
//!   [0, 1), [1, 2), [2, 3), [3, 3), [3, 3)
//! ```

use crate::error::ReduceError;
use std::ops::Range;

/// A half-open range `[start, start + count)` of flattened indices owned by
/// one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Partition {
    start: usize,
    count: usize,
}

impl Partition {
    pub fn new(start: usize, count: usize) -> Self {
        Self { start, count }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of indices in this partition.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Exclusive upper bound (`start + count`).
    pub fn end(&self) -> usize {
        self.start + self.count
    }

    /// The indices of this partition that actually fall inside a dataset of
    /// `len` elements.
    pub fn clipped(&self, len: usize) -> Range<usize> {
        self.start.min(len)..self.end().min(len)
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// Computes contiguous partitions of a flattened index space.
#[derive(Debug, Clone, Copy, Default)]
pub struct Partitioner;

impl Partitioner {
    /// Splits `[0, total)` into exactly `workers` ordered partitions.
    ///
    /// Every partition but possibly the last has `ceil(total / workers)`
    /// elements; the last is clipped to `total`, and any partitions past the
    /// end are empty. The result is disjoint, covers `[0, total)` exactly and
    /// depends only on the arguments.
    pub fn contiguous(total: usize, workers: usize) -> Result<Vec<Partition>, ReduceError> {
        if workers == 0 {
            return Err(ReduceError::InvalidWorkerCount(workers));
        }

        let size = total.div_ceil(workers);
        let partitions = (0..workers)
            .map(|worker| {
                let start = worker.saturating_mul(size).min(total);
                let end = start.saturating_add(size).min(total);
                Partition::new(start, end - start)
            })
            .collect();

        Ok(partitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths(partitions: &[Partition]) -> Vec<usize> {
        partitions.iter().map(Partition::len).collect()
    }

    #[test]
    fn splits_evenly_divisible_totals() {
        let partitions = Partitioner::contiguous(6, 2).unwrap();
        assert_eq!(partitions, vec![Partition::new(0, 3), Partition::new(3, 3)]);
    }

    #[test]
    fn clips_the_last_partition() {
        let partitions = Partitioner::contiguous(10, 4).unwrap();
        assert_eq!(lengths(&partitions), vec![3, 3, 3, 1]);
        assert_eq!(partitions[3].indices(), 9..10);
    }

    #[test]
    fn six_elements_four_workers() {
        let partitions = Partitioner::contiguous(6, 4).unwrap();
        assert_eq!(lengths(&partitions), vec![2, 2, 2, 0]);
        assert_eq!(partitions[3].start(), 6);
    }

    #[test]
    fn single_worker_covers_everything() {
        let partitions = Partitioner::contiguous(17, 1).unwrap();
        assert_eq!(partitions, vec![Partition::new(0, 17)]);
    }

    #[test]
    fn over_provisioned_workers_get_empty_ranges() {
        let partitions = Partitioner::contiguous(3, 8).unwrap();
        assert_eq!(partitions.len(), 8);
        assert_eq!(lengths(&partitions), vec![1, 1, 1, 0, 0, 0, 0, 0]);
        assert!(partitions[3..].iter().all(|p| p.start() == 3));
    }

    #[test]
    fn empty_total_yields_empty_partitions() {
        let partitions = Partitioner::contiguous(0, 3).unwrap();
        assert_eq!(partitions, vec![Partition::new(0, 0); 3]);
    }

    #[test]
    fn rejects_zero_workers() {
        assert_eq!(
            Partitioner::contiguous(10, 0),
            Err(ReduceError::InvalidWorkerCount(0))
        );
    }

    #[test]
    fn partition_clipping() {
        let partition = Partition::new(4, 4);
        assert_eq!(partition.end(), 8);
        assert_eq!(partition.clipped(6), 4..6);
        assert_eq!(Partition::new(9, 2).clipped(6), 6..6);
        assert!(Partition::new(2, 0).is_empty());
    }
}
