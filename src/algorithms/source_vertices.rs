//! Vertices without incoming edges.
//!
//! A self-loop is an incoming edge, so a vertex whose only edge is a loop is not a source.

use tracing::instrument;

use crate::{
    algorithm::{Algorithm, AlgorithmResult},
    graph::Graph,
};

/// Ascending list of vertices with in-degree zero, counted in one pass over all out-lists.
#[instrument(skip_all, fields(n = graph.num_vertices()), level = "debug")]
pub fn source_vertices(graph: &dyn Graph) -> Vec<usize> {
    let n = graph.num_vertices();
    let mut indeg = vec![0usize; n];
    for u in 0..n {
        for v in graph.out_neighbors(u).into_iter().flatten() {
            indeg[v] += 1;
        }
    }
    (0..n).filter(|&v| indeg[v] == 0).collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SourceVertices;

impl Algorithm for SourceVertices {
    fn name(&self) -> String {
        "source-vertices".into()
    }

    fn execute(&self, graph: &dyn Graph) -> AlgorithmResult {
        AlgorithmResult::Vertices(source_vertices(graph))
    }
}
