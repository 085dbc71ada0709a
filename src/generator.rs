//! Seeded random graphs for tests and benchmarks.

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::graph::{from_edges, Graph, GraphError, Representation};

/// `m` arcs drawn uniformly with replacement from `0..n x 0..n`, so self-loops and
/// parallel arcs can occur. No arcs when `n == 0`.
pub fn erdos_renyi_edges<R>(n: usize, m: usize, rng: &mut R) -> Vec<(usize, usize)>
where
    R: Rng + ?Sized,
{
    if n == 0 {
        return Vec::new();
    }
    (0..m)
        .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n)))
        .collect()
}

pub fn random_graph(
    kind: Representation,
    n: usize,
    m: usize,
    seed: u64,
) -> Result<Box<dyn Graph>, GraphError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    from_edges(kind, n, erdos_renyi_edges(n, m, &mut rng))
}
