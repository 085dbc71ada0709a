//! # Directed graphs
//!
//! The [`Graph`] trait is the only thing algorithms see. Three backings implement
//! it with identical semantics:
//!
//! - [`AdjacencyList`]: out and in vectors per vertex, insertion order.
//! - [`ForwardList`]: out lists only, newest edge first. In-neighbours are found by scanning.
//! - [`AdjacencyMatrix`]: `n x n` multiplicity counts, neighbours in ascending order.
//!
//! Vertices are `0..n`, fixed at construction. Self-loops and parallel edges are kept:
//! every [`Graph::add_edge`] adds one instance and [`Graph::remove_edge`] drops at most one.

use std::fmt;

use itertools::Itertools;
use thiserror::Error;

mod adjacency_list;
mod forward_list;
mod matrix;
mod snapshot;

pub use adjacency_list::AdjacencyList;
pub use forward_list::ForwardList;
pub use matrix::AdjacencyMatrix;
pub use snapshot::Adjacency;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Vertex count must be non-negative, got {0}")]
    NegativeVertexCount(i64),
    #[error("Vertex {vertex} out of range for graph with {vertex_count} vertices")]
    VertexOutOfRange { vertex: usize, vertex_count: usize },
}

/// Iterator over neighbour indices, in the order the backing defines.
pub type Neighbors<'a> = Box<dyn Iterator<Item = usize> + 'a>;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Representation {
    AdjacencyList,
    ForwardList,
    Matrix,
}

impl Representation {
    pub const ALL: [Representation; 3] = [
        Representation::AdjacencyList,
        Representation::ForwardList,
        Representation::Matrix,
    ];

    /// An edgeless graph of this kind with `n` vertices.
    pub fn empty(self, n: usize) -> Box<dyn Graph> {
        match self {
            Representation::AdjacencyList => Box::new(AdjacencyList::new(n)),
            Representation::ForwardList => Box::new(ForwardList::new(n)),
            Representation::Matrix => Box::new(AdjacencyMatrix::new(n)),
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::AdjacencyList => write!(f, "adjacency-list"),
            Representation::ForwardList => write!(f, "forward-list"),
            Representation::Matrix => write!(f, "matrix"),
        }
    }
}

pub trait Graph: fmt::Debug + Send + Sync {
    fn num_vertices(&self) -> usize;

    /// Adds one instance of the edge `u -> v`.
    fn add_edge(&mut self, u: usize, v: usize) -> Result<(), GraphError>;

    /// Removes at most one instance of `u -> v`. Returns whether an instance was found.
    fn remove_edge(&mut self, u: usize, v: usize) -> Result<bool, GraphError>;

    fn out_neighbors(&self, u: usize) -> Result<Neighbors<'_>, GraphError>;

    fn in_neighbors(&self, u: usize) -> Result<Neighbors<'_>, GraphError>;

    fn representation(&self) -> Representation;

    fn boxed_clone(&self) -> Box<dyn Graph>;

    fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        let vertex_count = self.num_vertices();
        if vertex < vertex_count {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex,
                vertex_count,
            })
        }
    }

    fn out_degree(&self, u: usize) -> Result<usize, GraphError> {
        Ok(self.out_neighbors(u)?.count())
    }

    fn in_degree(&self, u: usize) -> Result<usize, GraphError> {
        Ok(self.in_neighbors(u)?.count())
    }

    fn has_edge(&self, u: usize, v: usize) -> Result<bool, GraphError> {
        self.check_vertex(v)?;
        Ok(self.out_neighbors(u)?.any(|w| w == v))
    }

    /// All edge instances, grouped by source in ascending order.
    fn edges(&self) -> Vec<(usize, usize)> {
        (0..self.num_vertices())
            .flat_map(|u| {
                self.out_neighbors(u)
                    .into_iter()
                    .flatten()
                    .map(move |v| (u, v))
            })
            .collect()
    }

    fn num_edges(&self) -> usize {
        (0..self.num_vertices())
            .filter_map(|u| self.out_degree(u).ok())
            .sum()
    }

    fn dot(&self) -> String {
        let mut out = String::from("digraph {\n");
        for u in 0..self.num_vertices() {
            out.push_str(&format!("  {u};\n"));
        }
        for (u, v) in self.edges() {
            out.push_str(&format!("  {u} -> {v};\n"));
        }
        out.push('}');
        out
    }
}

impl Clone for Box<dyn Graph> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

/// Builds a graph of the requested kind. The count is signed so that callers reading
/// untrusted input get a construction error instead of a wrapped value.
pub fn create_graph(
    kind: Representation,
    vertex_count: i64,
) -> Result<Box<dyn Graph>, GraphError> {
    let n = usize::try_from(vertex_count)
        .map_err(|_| GraphError::NegativeVertexCount(vertex_count))?;
    Ok(kind.empty(n))
}

/// Builds a graph from an edge list, validating every endpoint.
pub fn from_edges<I>(
    kind: Representation,
    n: usize,
    edges: I,
) -> Result<Box<dyn Graph>, GraphError>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut g = kind.empty(n);
    for (u, v) in edges {
        g.add_edge(u, v)?;
    }
    Ok(g)
}

/// Rebuilds `graph` in another representation with the same edge multiset.
pub fn convert(graph: &dyn Graph, kind: Representation) -> Result<Box<dyn Graph>, GraphError> {
    from_edges(kind, graph.num_vertices(), graph.edges())
}

pub(crate) fn write_adjacency(graph: &dyn Graph, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for u in 0..graph.num_vertices() {
        let targets = graph
            .out_neighbors(u)
            .map_err(|_| fmt::Error)?
            .join(" ");
        if targets.is_empty() {
            writeln!(f, "{u}:")?;
        } else {
            writeln!(f, "{u}: {targets}")?;
        }
    }
    Ok(())
}
