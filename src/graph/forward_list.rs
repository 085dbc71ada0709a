use std::{collections::VecDeque, fmt};

use super::{write_adjacency, Graph, GraphError, Neighbors, Representation};

/// Singly linked adjacency: each vertex only knows its successors, newest first.
///
/// In-neighbours are not stored; [`Graph::in_neighbors`] scans every list and reports
/// sources in ascending order, once per edge instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForwardList {
    heads: Vec<VecDeque<usize>>,
}

impl ForwardList {
    pub fn new(n: usize) -> Self {
        ForwardList {
            heads: vec![VecDeque::new(); n],
        }
    }
}

impl Graph for ForwardList {
    fn num_vertices(&self) -> usize {
        self.heads.len()
    }

    fn add_edge(&mut self, u: usize, v: usize) -> Result<(), GraphError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        self.heads[u].push_front(v);
        Ok(())
    }

    /// Drops the most recently added `u -> v`, the first one met walking from the head.
    fn remove_edge(&mut self, u: usize, v: usize) -> Result<bool, GraphError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        match self.heads[u].iter().position(|&w| w == v) {
            Some(pos) => {
                self.heads[u].remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn out_neighbors(&self, u: usize) -> Result<Neighbors<'_>, GraphError> {
        self.check_vertex(u)?;
        Ok(Box::new(self.heads[u].iter().copied()))
    }

    fn in_neighbors(&self, u: usize) -> Result<Neighbors<'_>, GraphError> {
        self.check_vertex(u)?;
        Ok(Box::new(self.heads.iter().enumerate().flat_map(
            move |(w, list)| list.iter().filter(move |&&t| t == u).map(move |_| w),
        )))
    }

    fn out_degree(&self, u: usize) -> Result<usize, GraphError> {
        self.check_vertex(u)?;
        Ok(self.heads[u].len())
    }

    fn representation(&self) -> Representation {
        Representation::ForwardList
    }

    fn boxed_clone(&self) -> Box<dyn Graph> {
        Box::new(self.clone())
    }
}

impl fmt::Display for ForwardList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_adjacency(self, f)
    }
}
