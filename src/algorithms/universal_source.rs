//! # Universal source
//!
//! A universal source is a vertex from which every vertex is reachable. When several
//! exist the lowest index is reported; when none exists the answer is `None` (`-1` as an
//! [`AlgorithmResult`]). An empty graph has none.
//!
//! Two families:
//!
//! - reachability: try each vertex in index order and keep the first that reaches all
//!   ([`SequentialReachability`], [`ParallelReachability`]);
//! - components: partition into SCCs, condense, and answer from the unique source
//!   component if there is one ([`Kosaraju`], [`Tarjan`], [`PathBased`]).

use rayon::prelude::*;
use tracing::{debug, instrument, warn};

use crate::{
    algorithm::{Algorithm, AlgorithmResult},
    graph::{Adjacency, Graph},
    pool::WorkerPool,
    profile::phase,
};

use super::{
    scc::{kosaraju, path_based, tarjan, SccPartition},
    traversal::{reach_count, reaches_all},
};

#[instrument(skip_all, fields(n = adj.len()), level = "debug")]
pub fn universal_source_sequential(adj: &Adjacency) -> Option<usize> {
    (0..adj.len()).find(|&v| reaches_all(adj, v))
}

/// Static contiguous partitions, one per worker. Each worker scans its block in order and
/// stops at its own first hit; the lowest hit wins once every block has reported.
#[instrument(skip_all, fields(n = adj.len(), workers = pool.threads()), level = "debug")]
pub fn universal_source_parallel(adj: &Adjacency, pool: &WorkerPool) -> Option<usize> {
    let partitions = pool.partitions(adj.len());
    let hits: Vec<Option<usize>> = pool.install(|| {
        partitions
            .into_par_iter()
            .map(|mut block| block.find(|&v| reaches_all(adj, v)))
            .collect()
    });
    debug!(
        hits = hits.iter().flatten().count(),
        "merging partition results"
    );

    hits.into_iter().flatten().min()
}

/// Answers from the condensation of `partition`: the lowest vertex of the only source
/// component, or `None` when there are several (or no vertices at all).
pub fn universal_source_from_partition(
    adj: &Adjacency,
    partition: &SccPartition,
) -> Option<usize> {
    if partition.is_empty() {
        return None;
    }
    let condensation = phase("condensation", || partition.condensation(adj));
    let sources = condensation.source_components();
    debug!(
        components = partition.len(),
        sources = sources.len(),
        "condensed"
    );

    let [only] = sources[..] else {
        return None;
    };
    let candidate = partition.representative(only);
    if reach_count(adj, candidate) != adj.len() {
        warn!(candidate, "lone source component does not reach every vertex");
        return None;
    }
    Some(candidate)
}

fn snapshot(graph: &dyn Graph) -> Adjacency {
    phase("snapshot", || Adjacency::from_graph(graph))
}

fn by_components(graph: &dyn Graph, find: fn(&Adjacency) -> SccPartition) -> AlgorithmResult {
    let adj = snapshot(graph);
    let partition = phase("scc", || find(&adj));
    AlgorithmResult::from_option(universal_source_from_partition(&adj, &partition))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialReachability;

impl Algorithm for SequentialReachability {
    fn name(&self) -> String {
        "universal-source-sequential".into()
    }

    fn execute(&self, graph: &dyn Graph) -> AlgorithmResult {
        let adj = snapshot(graph);
        AlgorithmResult::from_option(phase("reachability", || {
            universal_source_sequential(&adj)
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParallelReachability {
    pool: WorkerPool,
}

impl ParallelReachability {
    pub fn new(pool: WorkerPool) -> Self {
        ParallelReachability { pool }
    }
}

impl Algorithm for ParallelReachability {
    fn name(&self) -> String {
        "universal-source-parallel".into()
    }

    fn execute(&self, graph: &dyn Graph) -> AlgorithmResult {
        let adj = snapshot(graph);
        AlgorithmResult::from_option(phase("reachability", || {
            universal_source_parallel(&adj, &self.pool)
        }))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Kosaraju;

impl Algorithm for Kosaraju {
    fn name(&self) -> String {
        "universal-source-kosaraju".into()
    }

    fn execute(&self, graph: &dyn Graph) -> AlgorithmResult {
        by_components(graph, kosaraju)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Tarjan;

impl Algorithm for Tarjan {
    fn name(&self) -> String {
        "universal-source-tarjan".into()
    }

    fn execute(&self, graph: &dyn Graph) -> AlgorithmResult {
        by_components(graph, tarjan)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PathBased;

impl Algorithm for PathBased {
    fn name(&self) -> String {
        "universal-source-path-based".into()
    }

    fn execute(&self, graph: &dyn Graph) -> AlgorithmResult {
        by_components(graph, path_based)
    }
}
