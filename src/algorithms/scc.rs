//! # Strongly connected components
//!
//! Three independent ways of computing the same partition, all iterative so deep graphs
//! don't exhaust the call stack:
//!
//! - [`kosaraju`]: finish order on the graph, then DFS on the transpose in reverse finish order.
//! - [`tarjan`]: one DFS tracking low-links.
//! - [`path_based`]: one DFS with a path stack and a boundary stack (Gabow).
//!
//! Component ids are dense but their numbering differs between the three; compare
//! partitions with [`SccPartition::canonical`].

use ahash::AHashSet;
use bitvec::{bitvec, order::Lsb0};
use tracing::{instrument, trace};

use crate::graph::Adjacency;

crate::define_indexed_vec!(
    /// Dense id of a strongly connected component.
    pub struct ComponentId;

    /// Vector indexed by [`ComponentId`].
    pub struct ComponentVec;
);

const UNVISITED: usize = usize::MAX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SccPartition {
    component: Vec<ComponentId>,
    members: ComponentVec<Vec<usize>>,
}

impl SccPartition {
    /// Builds the partition from one label per vertex, labels being `0..count`.
    fn from_labels(labels: Vec<usize>, count: usize) -> Self {
        let mut members: ComponentVec<Vec<usize>> = ComponentVec::filled(Vec::new(), count);
        let component: Vec<ComponentId> = labels.into_iter().map(ComponentId).collect();
        for (v, &c) in component.iter().enumerate() {
            members[c].push(v);
        }
        SccPartition { component, members }
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn component_of(&self, v: usize) -> ComponentId {
        self.component[v]
    }

    /// Members of `c` in ascending order.
    pub fn members(&self, c: ComponentId) -> &[usize] {
        &self.members[c]
    }

    /// Lowest vertex of `c`.
    pub fn representative(&self, c: ComponentId) -> usize {
        self.members[c][0]
    }

    pub fn same_component(&self, u: usize, v: usize) -> bool {
        self.component[u] == self.component[v]
    }

    /// Components as sorted member lists, ordered by their lowest member.
    pub fn canonical(&self) -> Vec<Vec<usize>> {
        let mut comps = self.members.raw().clone();
        comps.sort();
        comps
    }

    /// Contracts every component to one node, dropping edges inside a component and
    /// merging parallel crossings.
    pub fn condensation(&self, adj: &Adjacency) -> Condensation {
        let mut successors: ComponentVec<Vec<ComponentId>> =
            ComponentVec::filled(Vec::new(), self.len());
        let mut in_degree: ComponentVec<usize> = ComponentVec::filled(0, self.len());
        let mut seen = AHashSet::new();

        for (u, v) in adj.edges() {
            let (cu, cv) = (self.component[u], self.component[v]);
            if cu != cv && seen.insert((cu, cv)) {
                successors[cu].push(cv);
                in_degree[cv] += 1;
            }
        }

        Condensation {
            successors,
            in_degree,
        }
    }
}

/// The DAG of components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condensation {
    successors: ComponentVec<Vec<ComponentId>>,
    in_degree: ComponentVec<usize>,
}

impl Condensation {
    pub fn len(&self) -> usize {
        self.successors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }

    pub fn successors(&self, c: ComponentId) -> &[ComponentId] {
        &self.successors[c]
    }

    pub fn num_edges(&self) -> usize {
        self.successors.iter().map(|(_, s)| s.len()).sum()
    }

    /// Components no other component points into.
    pub fn source_components(&self) -> Vec<ComponentId> {
        self.in_degree
            .iter()
            .filter(|&(_, &d)| d == 0)
            .map(|(c, _)| c)
            .collect()
    }

    pub fn is_acyclic(&self) -> bool {
        let mut indeg = self.in_degree.clone();
        let mut ready: Vec<ComponentId> = self.source_components();
        let mut processed = 0;
        while let Some(c) = ready.pop() {
            processed += 1;
            for &d in &self.successors[c] {
                indeg[d] -= 1;
                if indeg[d] == 0 {
                    ready.push(d);
                }
            }
        }
        processed == self.len()
    }
}

#[instrument(skip_all, fields(n = adj.len()), level = "debug")]
pub fn kosaraju(adj: &Adjacency) -> SccPartition {
    let n = adj.len();

    let mut visited = bitvec![usize, Lsb0; 0; n];
    let mut finished = Vec::with_capacity(n);
    let mut stack: Vec<(usize, usize)> = Vec::new();
    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited.set(root, true);
        stack.push((root, 0));
        while let Some(top) = stack.last_mut() {
            let (v, next) = *top;
            match adj.out(v).get(next) {
                Some(&w) => {
                    top.1 += 1;
                    if !visited[w] {
                        visited.set(w, true);
                        stack.push((w, 0));
                    }
                }
                None => {
                    finished.push(v);
                    stack.pop();
                }
            }
        }
    }

    let transposed = adj.transpose();
    let mut labels = vec![UNVISITED; n];
    let mut count = 0;
    let mut pending = Vec::new();
    for &root in finished.iter().rev() {
        if labels[root] != UNVISITED {
            continue;
        }
        labels[root] = count;
        pending.push(root);
        while let Some(v) = pending.pop() {
            for &u in transposed.out(v) {
                if labels[u] == UNVISITED {
                    labels[u] = count;
                    pending.push(u);
                }
            }
        }
        count += 1;
    }

    trace!(components = count, "kosaraju done");
    SccPartition::from_labels(labels, count)
}

#[instrument(skip_all, fields(n = adj.len()), level = "debug")]
pub fn tarjan(adj: &Adjacency) -> SccPartition {
    let n = adj.len();
    let mut index = vec![UNVISITED; n];
    let mut low = vec![0; n];
    let mut on_stack = bitvec![usize, Lsb0; 0; n];
    let mut stack = Vec::new();
    let mut labels = vec![UNVISITED; n];
    let mut counter = 0;
    let mut count = 0;

    let mut calls: Vec<(usize, usize)> = Vec::new();
    for root in 0..n {
        if index[root] != UNVISITED {
            continue;
        }
        index[root] = counter;
        low[root] = counter;
        counter += 1;
        stack.push(root);
        on_stack.set(root, true);
        calls.push((root, 0));

        while let Some(top) = calls.last_mut() {
            let (v, next) = *top;
            if let Some(&w) = adj.out(v).get(next) {
                top.1 += 1;
                if index[w] == UNVISITED {
                    index[w] = counter;
                    low[w] = counter;
                    counter += 1;
                    stack.push(w);
                    on_stack.set(w, true);
                    calls.push((w, 0));
                } else if on_stack[w] {
                    low[v] = low[v].min(index[w]);
                }
                continue;
            }

            calls.pop();
            if low[v] == index[v] {
                while let Some(w) = stack.pop() {
                    on_stack.set(w, false);
                    labels[w] = count;
                    if w == v {
                        break;
                    }
                }
                count += 1;
            }
            if let Some(&(parent, _)) = calls.last() {
                low[parent] = low[parent].min(low[v]);
            }
        }
    }

    trace!(components = count, "tarjan done");
    SccPartition::from_labels(labels, count)
}

#[instrument(skip_all, fields(n = adj.len()), level = "debug")]
pub fn path_based(adj: &Adjacency) -> SccPartition {
    let n = adj.len();
    let mut preorder = vec![UNVISITED; n];
    let mut labels = vec![UNVISITED; n];
    let mut path = Vec::new();
    let mut boundaries: Vec<usize> = Vec::new();
    let mut counter = 0;
    let mut count = 0;

    let mut calls: Vec<(usize, usize)> = Vec::new();
    for root in 0..n {
        if preorder[root] != UNVISITED {
            continue;
        }
        preorder[root] = counter;
        counter += 1;
        path.push(root);
        boundaries.push(root);
        calls.push((root, 0));

        while let Some(top) = calls.last_mut() {
            let (v, next) = *top;
            if let Some(&w) = adj.out(v).get(next) {
                top.1 += 1;
                if preorder[w] == UNVISITED {
                    preorder[w] = counter;
                    counter += 1;
                    path.push(w);
                    boundaries.push(w);
                    calls.push((w, 0));
                } else if labels[w] == UNVISITED {
                    // w is still on the path: everything above it collapses into one component
                    while boundaries
                        .last()
                        .is_some_and(|&b| preorder[w] < preorder[b])
                    {
                        boundaries.pop();
                    }
                }
                continue;
            }

            calls.pop();
            if boundaries.last() == Some(&v) {
                boundaries.pop();
                while let Some(w) = path.pop() {
                    labels[w] = count;
                    if w == v {
                        break;
                    }
                }
                count += 1;
            }
        }
    }

    trace!(components = count, "path-based done");
    SccPartition::from_labels(labels, count)
}
