//! # Feedback arc sets
//!
//! A feedback arc set (FAS) is a list of edges whose removal leaves the graph acyclic.
//! None of the heuristics here minimises it. Each edge instance is listed once per
//! occurrence, so parallel edges on a cycle may all appear, and every self-loop is always
//! included.
//!
//! - [`RemoveCycles`]: find a cycle, delete its closing edge from a working copy, repeat.
//! - [`InsertEdges`]: order the vertices greedily and keep the edges that point backwards.
//! - [`DfsBackEdges`]: all back-edges of one colored DFS over the whole graph.
//!
//! [`is_acyclic_after_removal`](super::acyclic::is_acyclic_after_removal) checks the result.

use std::cmp::Reverse;

use bitvec::{bitvec, order::Lsb0, vec::BitVec};
use tracing::{instrument, trace};

use crate::{
    algorithm::{Algorithm, AlgorithmResult},
    graph::{Adjacency, Graph},
    profile::phase,
};

use super::traversal::{back_edges, first_back_edge};

/// Repeatedly removes the back-edge closing the first cycle the DFS finds.
#[instrument(skip_all, fields(n = adj.len(), m = adj.num_edges()), level = "debug")]
pub fn remove_cycles(adj: &Adjacency) -> Vec<(usize, usize)> {
    let mut working = adj.clone();
    let mut fas = Vec::new();
    while let Some((u, v)) = first_back_edge(&working) {
        trace!(u, v, "breaking cycle");
        working.remove_edge(u, v);
        fas.push((u, v));
    }
    fas
}

/// Greedy two-ended vertex ordering.
///
/// While vertices remain, take (lowest index first) a vertex with no remaining incoming
/// edge and append it to the front part, otherwise one with no remaining outgoing edge and
/// prepend it to the back part, otherwise the vertex maximising `out - in` into the front.
/// Self-loops don't count towards either degree.
pub fn greedy_order(adj: &Adjacency) -> Vec<usize> {
    let n = adj.len();
    let mut indeg: Vec<usize> = (0..n)
        .map(|v| adj.inc(v).iter().filter(|&&w| w != v).count())
        .collect();
    let mut outdeg: Vec<usize> = (0..n)
        .map(|v| adj.out(v).iter().filter(|&&w| w != v).count())
        .collect();
    let mut placed: BitVec = bitvec![usize, Lsb0; 0; n];

    let mut front = Vec::with_capacity(n);
    let mut back = Vec::new();

    while let Some((v, to_front)) = next_vertex(&placed, &indeg, &outdeg) {
        placed.set(v, true);
        if to_front {
            front.push(v);
        } else {
            back.push(v);
        }
        for &w in adj.out(v) {
            if w != v && !placed[w] {
                indeg[w] -= 1;
            }
        }
        for &w in adj.inc(v) {
            if w != v && !placed[w] {
                outdeg[w] -= 1;
            }
        }
    }

    front.extend(back.into_iter().rev());
    front
}

fn next_vertex(placed: &BitVec, indeg: &[usize], outdeg: &[usize]) -> Option<(usize, bool)> {
    let remaining = || placed.iter_zeros();

    if let Some(v) = remaining().find(|&v| indeg[v] == 0) {
        return Some((v, true));
    }
    if let Some(v) = remaining().find(|&v| outdeg[v] == 0) {
        return Some((v, false));
    }
    remaining()
        .max_by_key(|&v| (outdeg[v] as isize - indeg[v] as isize, Reverse(v)))
        .map(|v| (v, true))
}

/// Edges going backwards (or looping) in [`greedy_order`].
#[instrument(skip_all, fields(n = adj.len(), m = adj.num_edges()), level = "debug")]
pub fn insert_edges(adj: &Adjacency) -> Vec<(usize, usize)> {
    let order = phase("ordering", || greedy_order(adj));
    let mut position = vec![0; adj.len()];
    for (i, &v) in order.iter().enumerate() {
        position[v] = i;
    }
    adj.edges()
        .filter(|&(u, v)| position[u] >= position[v])
        .collect()
}

#[instrument(skip_all, fields(n = adj.len(), m = adj.num_edges()), level = "debug")]
pub fn dfs_back_edges(adj: &Adjacency) -> Vec<(usize, usize)> {
    back_edges(adj)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveCycles;

impl Algorithm for RemoveCycles {
    fn name(&self) -> String {
        "fas-remove-cycles".into()
    }

    fn execute(&self, graph: &dyn Graph) -> AlgorithmResult {
        let adj = phase("snapshot", || Adjacency::from_graph(graph));
        AlgorithmResult::Arcs(phase("remove-cycles", || remove_cycles(&adj)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InsertEdges;

impl Algorithm for InsertEdges {
    fn name(&self) -> String {
        "fas-insert-edges".into()
    }

    fn execute(&self, graph: &dyn Graph) -> AlgorithmResult {
        let adj = phase("snapshot", || Adjacency::from_graph(graph));
        AlgorithmResult::Arcs(insert_edges(&adj))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DfsBackEdges;

impl Algorithm for DfsBackEdges {
    fn name(&self) -> String {
        "fas-dfs-back-edges".into()
    }

    fn execute(&self, graph: &dyn Graph) -> AlgorithmResult {
        let adj = phase("snapshot", || Adjacency::from_graph(graph));
        AlgorithmResult::Arcs(phase("dfs", || dfs_back_edges(&adj)))
    }
}
