use std::collections::VecDeque;

use thiserror::Error;

use crate::graph::{Adjacency, Graph, GraphError};

use super::traversal::first_back_edge;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotDag {
    #[error("Not a DAG: {vertices_processed} vertices processed out of {total_vertices} total vertices. Remaining vertices with non-zero in-degrees: {remaining_vertices:?}")]
    HasCycle {
        vertices_processed: usize,
        total_vertices: usize,
        remaining_vertices: Vec<(usize, usize)>,
    },
}

/// Kahn's algorithm. Self-loops and parallel edges count towards in-degree, so a
/// self-loop alone makes the graph cyclic.
pub fn topological_order(graph: &dyn Graph) -> Result<Vec<usize>, NotDag> {
    topological_order_of(&Adjacency::from_graph(graph))
}

pub fn topological_order_of(adj: &Adjacency) -> Result<Vec<usize>, NotDag> {
    let n = adj.len();
    let mut indeg: Vec<usize> = (0..n).map(|v| adj.inc(v).len()).collect();

    let mut q: VecDeque<usize> = (0..n).filter(|&v| indeg[v] == 0).collect();

    let mut order = Vec::with_capacity(n);
    while let Some(u) = q.pop_front() {
        order.push(u);
        for &v in adj.out(u) {
            indeg[v] -= 1;
            if indeg[v] == 0 {
                q.push_back(v);
            }
        }
    }

    if order.len() != n {
        let remaining_vertices: Vec<(usize, usize)> = indeg
            .iter()
            .enumerate()
            .filter_map(|(v, &degree)| (degree > 0).then_some((v, degree)))
            .collect();

        return Err(NotDag::HasCycle {
            vertices_processed: order.len(),
            total_vertices: n,
            remaining_vertices,
        });
    }
    Ok(order)
}

pub fn is_acyclic(graph: &dyn Graph) -> bool {
    topological_order(graph).is_ok()
}

/// An edge closing some cycle, found by colored DFS, or `None` for a DAG.
pub fn find_cycle_edge(graph: &dyn Graph) -> Option<(usize, usize)> {
    first_back_edge(&Adjacency::from_graph(graph))
}

/// Whether deleting `arcs` (one instance each) leaves `graph` acyclic.
///
/// The deletion happens on a private copy; `graph` is not modified.
pub fn is_acyclic_after_removal(
    graph: &dyn Graph,
    arcs: &[(usize, usize)],
) -> Result<bool, GraphError> {
    let mut copy = graph.boxed_clone();
    for &(u, v) in arcs {
        copy.remove_edge(u, v)?;
    }
    Ok(is_acyclic(copy.as_ref()))
}
