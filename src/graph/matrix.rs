use std::fmt;

use super::{write_adjacency, Graph, GraphError, Neighbors, Representation};

/// Dense `n x n` matrix of edge multiplicities, row-major.
///
/// Neighbours come out in ascending index order, a target repeated once per parallel edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjacencyMatrix {
    n: usize,
    counts: Vec<u32>,
}

impl AdjacencyMatrix {
    pub fn new(n: usize) -> Self {
        AdjacencyMatrix {
            n,
            counts: vec![0; n * n],
        }
    }

    /// Number of parallel `u -> v` edges.
    pub fn multiplicity(&self, u: usize, v: usize) -> Result<u32, GraphError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        Ok(self.counts[u * self.n + v])
    }
}

fn repeat_index(count: u32, index: usize) -> impl Iterator<Item = usize> {
    std::iter::repeat(index).take(count as usize)
}

impl Graph for AdjacencyMatrix {
    fn num_vertices(&self) -> usize {
        self.n
    }

    fn add_edge(&mut self, u: usize, v: usize) -> Result<(), GraphError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        self.counts[u * self.n + v] += 1;
        Ok(())
    }

    fn remove_edge(&mut self, u: usize, v: usize) -> Result<bool, GraphError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        let cell = &mut self.counts[u * self.n + v];
        if *cell == 0 {
            return Ok(false);
        }
        *cell -= 1;
        Ok(true)
    }

    fn out_neighbors(&self, u: usize) -> Result<Neighbors<'_>, GraphError> {
        self.check_vertex(u)?;
        let row = &self.counts[u * self.n..(u + 1) * self.n];
        Ok(Box::new(
            row.iter()
                .enumerate()
                .flat_map(|(v, &c)| repeat_index(c, v)),
        ))
    }

    fn in_neighbors(&self, u: usize) -> Result<Neighbors<'_>, GraphError> {
        self.check_vertex(u)?;
        let n = self.n;
        Ok(Box::new(
            (0..n).flat_map(move |w| repeat_index(self.counts[w * n + u], w)),
        ))
    }

    fn has_edge(&self, u: usize, v: usize) -> Result<bool, GraphError> {
        Ok(self.multiplicity(u, v)? > 0)
    }

    fn representation(&self) -> Representation {
        Representation::Matrix
    }

    fn boxed_clone(&self) -> Box<dyn Graph> {
        Box::new(self.clone())
    }
}

impl fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_adjacency(self, f)
    }
}
