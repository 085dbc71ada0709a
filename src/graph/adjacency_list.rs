use std::fmt;

use super::{write_adjacency, Graph, GraphError, Neighbors, Representation};

/// Out and in vectors per vertex, both kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjacencyList {
    out: Vec<Vec<usize>>,
    inc: Vec<Vec<usize>>,
}

impl AdjacencyList {
    pub fn new(n: usize) -> Self {
        AdjacencyList {
            out: vec![Vec::new(); n],
            inc: vec![Vec::new(); n],
        }
    }
}

impl Graph for AdjacencyList {
    fn num_vertices(&self) -> usize {
        self.out.len()
    }

    fn add_edge(&mut self, u: usize, v: usize) -> Result<(), GraphError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        self.out[u].push(v);
        self.inc[v].push(u);
        Ok(())
    }

    fn remove_edge(&mut self, u: usize, v: usize) -> Result<bool, GraphError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        let Some(pos) = self.out[u].iter().position(|&w| w == v) else {
            return Ok(false);
        };
        self.out[u].remove(pos);
        if let Some(pos) = self.inc[v].iter().position(|&w| w == u) {
            self.inc[v].remove(pos);
        }
        Ok(true)
    }

    fn out_neighbors(&self, u: usize) -> Result<Neighbors<'_>, GraphError> {
        self.check_vertex(u)?;
        Ok(Box::new(self.out[u].iter().copied()))
    }

    fn in_neighbors(&self, u: usize) -> Result<Neighbors<'_>, GraphError> {
        self.check_vertex(u)?;
        Ok(Box::new(self.inc[u].iter().copied()))
    }

    fn out_degree(&self, u: usize) -> Result<usize, GraphError> {
        self.check_vertex(u)?;
        Ok(self.out[u].len())
    }

    fn in_degree(&self, u: usize) -> Result<usize, GraphError> {
        self.check_vertex(u)?;
        Ok(self.inc[u].len())
    }

    fn representation(&self) -> Representation {
        Representation::AdjacencyList
    }

    fn boxed_clone(&self) -> Box<dyn Graph> {
        Box::new(self.clone())
    }
}

impl fmt::Display for AdjacencyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_adjacency(self, f)
    }
}
