//! # Diameter
//!
//! The diameter is the largest shortest-path distance over all ordered vertex pairs. It is
//! only defined for strongly connected graphs: if some vertex can't reach another the
//! answer is `None` (`-1` as an [`AlgorithmResult`]). Graphs with zero or one vertex have
//! diameter `0`.
//!
//! All three variants run one BFS per source vertex and differ only in how the runs are
//! scheduled:
//!
//! - [`SequentialDiameter`]: one after another.
//! - [`ConcurrentDiameter`]: one future per source, awaited together.
//! - [`ParallelDiameter`]: static partitions on a [`WorkerPool`], merged in one reduction.

use std::task::Poll;

use bitvec::{bitvec, order::Lsb0};
use futures::{
    executor::block_on,
    future::{join_all, poll_fn},
};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    algorithm::{Algorithm, AlgorithmResult},
    graph::{Adjacency, Graph},
    pool::WorkerPool,
    profile::phase,
};

use super::traversal::eccentricity;

#[instrument(skip_all, fields(n = adj.len()), level = "debug")]
pub fn diameter_sequential(adj: &Adjacency) -> Option<usize> {
    let mut diameter = 0;
    for s in 0..adj.len() {
        diameter = diameter.max(eccentricity(adj, s)?);
    }
    Some(diameter)
}

/// Gives the executor a chance to poll the other tasks before this one goes on.
async fn yield_now() {
    let mut yielded = false;
    poll_fn(|cx| {
        if yielded {
            return Poll::Ready(());
        }
        yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    })
    .await
}

/// Layered BFS from `source` that suspends after every layer, so sibling tasks advance
/// together instead of one after another.
async fn eccentricity_task(adj: &Adjacency, source: usize) -> Option<usize> {
    let mut seen = bitvec![usize, Lsb0; 0; adj.len()];
    seen.set(source, true);
    let mut reached = 1;
    let mut depth = 0;
    let mut frontier = vec![source];

    loop {
        let mut next = Vec::new();
        for &u in &frontier {
            for &v in adj.out(u) {
                if !seen[v] {
                    seen.set(v, true);
                    reached += 1;
                    next.push(v);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        depth += 1;
        frontier = next;
        yield_now().await;
    }

    (reached == adj.len()).then_some(depth)
}

/// One task per source vertex. Tasks share nothing mutable; the results are only looked
/// at once every task has reported, and a single disconnected source decides the answer.
#[instrument(skip_all, fields(n = adj.len()), level = "debug")]
pub fn diameter_concurrent(adj: &Adjacency) -> Option<usize> {
    let tasks = (0..adj.len()).map(|s| eccentricity_task(adj, s));
    let eccentricities: Vec<Option<usize>> = block_on(join_all(tasks));

    eccentricities
        .into_iter()
        .try_fold(0, |diameter, ecc| ecc.map(|e| diameter.max(e)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PartitionSummary {
    max_eccentricity: usize,
    strongly_connected: bool,
}

impl PartitionSummary {
    const EMPTY: PartitionSummary = PartitionSummary {
        max_eccentricity: 0,
        strongly_connected: true,
    };

    fn merge(self, other: PartitionSummary) -> PartitionSummary {
        PartitionSummary {
            max_eccentricity: self.max_eccentricity.max(other.max_eccentricity),
            strongly_connected: self.strongly_connected && other.strongly_connected,
        }
    }
}

/// Each worker owns one contiguous block of sources and keeps a private
/// [`PartitionSummary`]; the summaries are merged after all workers finish.
#[instrument(skip_all, fields(n = adj.len(), workers = pool.threads()), level = "debug")]
pub fn diameter_parallel(adj: &Adjacency, pool: &WorkerPool) -> Option<usize> {
    let partitions = pool.partitions(adj.len());
    let summaries: Vec<PartitionSummary> = pool.install(|| {
        partitions
            .into_par_iter()
            .map(|block| {
                let mut local = PartitionSummary::EMPTY;
                for s in block {
                    match eccentricity(adj, s) {
                        Some(e) => local.max_eccentricity = local.max_eccentricity.max(e),
                        None => {
                            local.strongly_connected = false;
                            break;
                        }
                    }
                }
                local
            })
            .collect()
    });
    debug!(partitions = summaries.len(), "merging partition summaries");

    let total = summaries
        .into_iter()
        .fold(PartitionSummary::EMPTY, PartitionSummary::merge);
    total.strongly_connected.then_some(total.max_eccentricity)
}

fn snapshot(graph: &dyn Graph) -> Adjacency {
    phase("snapshot", || Adjacency::from_graph(graph))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialDiameter;

impl Algorithm for SequentialDiameter {
    fn name(&self) -> String {
        "diameter-sequential".into()
    }

    fn execute(&self, graph: &dyn Graph) -> AlgorithmResult {
        let adj = snapshot(graph);
        AlgorithmResult::from_option(phase("bfs", || diameter_sequential(&adj)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConcurrentDiameter;

impl Algorithm for ConcurrentDiameter {
    fn name(&self) -> String {
        "diameter-concurrent".into()
    }

    fn execute(&self, graph: &dyn Graph) -> AlgorithmResult {
        let adj = snapshot(graph);
        AlgorithmResult::from_option(phase("bfs", || diameter_concurrent(&adj)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParallelDiameter {
    pool: WorkerPool,
}

impl ParallelDiameter {
    pub fn new(pool: WorkerPool) -> Self {
        ParallelDiameter { pool }
    }
}

impl Algorithm for ParallelDiameter {
    fn name(&self) -> String {
        "diameter-parallel".into()
    }

    fn execute(&self, graph: &dyn Graph) -> AlgorithmResult {
        let adj = snapshot(graph);
        AlgorithmResult::from_option(phase("bfs", || diameter_parallel(&adj, &self.pool)))
    }
}
