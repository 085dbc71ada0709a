use super::Graph;

/// Owned copy of a graph's adjacency, taken once at the start of an algorithm so the
/// inner loops index plain vectors instead of going through the trait object.
///
/// Out-neighbour order is the backing graph's order; in-neighbours are grouped by
/// ascending source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    out: Vec<Vec<usize>>,
    inc: Vec<Vec<usize>>,
}

impl Adjacency {
    pub fn from_graph(graph: &dyn Graph) -> Self {
        let n = graph.num_vertices();
        let mut out = Vec::with_capacity(n);
        let mut inc = vec![Vec::new(); n];
        for u in 0..n {
            let targets: Vec<usize> = graph.out_neighbors(u).into_iter().flatten().collect();
            for &v in &targets {
                inc[v].push(u);
            }
            out.push(targets);
        }
        Adjacency { out, inc }
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn out(&self, u: usize) -> &[usize] {
        &self.out[u]
    }

    pub fn inc(&self, u: usize) -> &[usize] {
        &self.inc[u]
    }

    pub fn num_edges(&self) -> usize {
        self.out.iter().map(Vec::len).sum()
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.out
            .iter()
            .enumerate()
            .flat_map(|(u, targets)| targets.iter().map(move |&v| (u, v)))
    }

    /// Drops the first `u -> v` instance from both directions.
    pub fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        let Some(pos) = self.out[u].iter().position(|&w| w == v) else {
            return false;
        };
        self.out[u].remove(pos);
        if let Some(pos) = self.inc[v].iter().position(|&w| w == u) {
            self.inc[v].remove(pos);
        }
        true
    }

    /// The same vertex set with every edge reversed.
    pub fn transpose(&self) -> Self {
        Adjacency {
            out: self.inc.clone(),
            inc: self.out.clone(),
        }
    }
}
