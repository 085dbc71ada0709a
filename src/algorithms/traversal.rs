//! BFS and colored DFS over an [`Adjacency`] snapshot.

use std::{collections::VecDeque, ops::ControlFlow};

use bitvec::{bitvec, order::Lsb0};

use crate::graph::Adjacency;

const UNVISITED: usize = usize::MAX;

/// Largest BFS distance from `source`, or `None` if some vertex is unreachable from it.
pub fn eccentricity(adj: &Adjacency, source: usize) -> Option<usize> {
    let n = adj.len();
    let mut dist = vec![UNVISITED; n];
    let mut queue = VecDeque::new();
    dist[source] = 0;
    queue.push_back(source);

    let mut reached = 1;
    let mut farthest = 0;
    while let Some(u) = queue.pop_front() {
        for &v in adj.out(u) {
            if dist[v] == UNVISITED {
                dist[v] = dist[u] + 1;
                farthest = farthest.max(dist[v]);
                reached += 1;
                queue.push_back(v);
            }
        }
    }

    (reached == n).then_some(farthest)
}

/// Number of vertices reachable from `source`, itself included.
pub fn reach_count(adj: &Adjacency, source: usize) -> usize {
    let mut seen = bitvec![usize, Lsb0; 0; adj.len()];
    let mut stack = vec![source];
    seen.set(source, true);
    let mut count = 1;
    while let Some(u) = stack.pop() {
        for &v in adj.out(u) {
            if !seen[v] {
                seen.set(v, true);
                count += 1;
                stack.push(v);
            }
        }
    }
    count
}

pub fn reaches_all(adj: &Adjacency, source: usize) -> bool {
    reach_count(adj, source) == adj.len()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Not discovered yet.
    White,
    /// On the DFS stack.
    Gray,
    /// Finished.
    Black,
}

/// Colored DFS over all vertices in index order, calling `on_back_edge` for every edge
/// instance that reaches a gray vertex. Stops early when the callback breaks.
pub fn visit_back_edges<F>(adj: &Adjacency, mut on_back_edge: F)
where
    F: FnMut(usize, usize) -> ControlFlow<()>,
{
    let n = adj.len();
    let mut color = vec![Color::White; n];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if color[root] != Color::White {
            continue;
        }
        color[root] = Color::Gray;
        stack.push((root, 0));

        while let Some(top) = stack.last_mut() {
            let (u, next) = *top;
            let Some(&v) = adj.out(u).get(next) else {
                color[u] = Color::Black;
                stack.pop();
                continue;
            };
            top.1 += 1;
            match color[v] {
                Color::White => {
                    color[v] = Color::Gray;
                    stack.push((v, 0));
                }
                Color::Gray => {
                    if on_back_edge(u, v).is_break() {
                        return;
                    }
                }
                Color::Black => {}
            }
        }
    }
}

/// Every DFS back-edge of the graph, in discovery order.
pub fn back_edges(adj: &Adjacency) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    visit_back_edges(adj, |u, v| {
        found.push((u, v));
        ControlFlow::Continue(())
    });
    found
}

/// The first back-edge the DFS meets, i.e. the edge closing some cycle.
pub fn first_back_edge(adj: &Adjacency) -> Option<(usize, usize)> {
    let mut found = None;
    visit_back_edges(adj, |u, v| {
        found = Some((u, v));
        ControlFlow::Break(())
    });
    found
}
