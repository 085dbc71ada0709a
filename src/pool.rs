//! Fixed-size worker pools for the parallel algorithm variants.
//!
//! Work is split statically: [`WorkerPool::partitions`] cuts the vertex range into one
//! contiguous block per worker, each worker folds its block into a private accumulator and
//! the caller merges the accumulators once every worker is done.

use std::{ops::Range, sync::Arc};

use rayon::{ThreadPool, ThreadPoolBuilder};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("A worker pool needs at least one thread")]
    NoThreads,
    #[error("Failed to start worker pool: {0}")]
    Build(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Clone, Default)]
pub enum WorkerPool {
    /// rayon's global pool.
    #[default]
    Global,
    Dedicated(Arc<ThreadPool>),
}

impl WorkerPool {
    pub fn global() -> Self {
        WorkerPool::Global
    }

    pub fn with_threads(threads: usize) -> Result<Self, PoolError> {
        if threads == 0 {
            return Err(PoolError::NoThreads);
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("digraph-worker-{i}"))
            .build()?;
        Ok(WorkerPool::Dedicated(Arc::new(pool)))
    }

    pub fn threads(&self) -> usize {
        match self {
            WorkerPool::Global => rayon::current_num_threads(),
            WorkerPool::Dedicated(pool) => pool.current_num_threads(),
        }
    }

    /// Runs `op` inside the pool, so rayon iterators in it use this pool's workers.
    pub fn install<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match self {
            WorkerPool::Global => op(),
            WorkerPool::Dedicated(pool) => pool.install(op),
        }
    }

    /// Splits `0..n` into at most [`Self::threads`] disjoint, contiguous, non-empty ranges
    /// covering every index in order.
    pub fn partitions(&self, n: usize) -> Vec<Range<usize>> {
        partition(n, self.threads())
    }
}

pub(crate) fn partition(n: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.clamp(1, n.max(1));
    let base = n / parts;
    let extra = n % parts;
    let mut start = 0;
    (0..parts)
        .map(|i| {
            let len = base + usize::from(i < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .filter(|r| !r.is_empty())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partitions_cover_range_once() {
        for n in 0..20 {
            for parts in 1..8 {
                let ranges = partition(n, parts);
                assert!(ranges.len() <= parts);
                let flat: Vec<usize> = ranges.iter().cloned().flatten().collect();
                assert_eq!(flat, (0..n).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn partitions_are_balanced() {
        let ranges = partition(10, 3);
        assert_eq!(ranges, vec![0..4, 4..7, 7..10]);
    }

    #[test]
    fn zero_threads_is_an_error() {
        assert!(matches!(
            WorkerPool::with_threads(0),
            Err(PoolError::NoThreads)
        ));
    }

    #[test]
    fn dedicated_pool_reports_its_size() {
        let pool = WorkerPool::with_threads(3).unwrap();
        assert_eq!(pool.threads(), 3);
        assert_eq!(pool.install(|| rayon::current_num_threads()), 3);
        assert_eq!(pool.partitions(2), vec![0..1, 1..2]);
    }
}
