//! The executable-algorithm contract shared by every strategy and decorator.

use std::fmt;

use itertools::Itertools;

use crate::graph::Graph;

/// Output of [`Algorithm::execute`].
///
/// The shape depends on the problem being solved, so consumers match on the variant
/// they expect rather than inferring it from the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgorithmResult {
    /// A diameter or a single vertex, `-1` meaning "none".
    Int(i64),
    /// Vertices in ascending order.
    Vertices(Vec<usize>),
    /// Arcs, in no particular order.
    Arcs(Vec<(usize, usize)>),
}

impl AlgorithmResult {
    pub const NONE: AlgorithmResult = AlgorithmResult::Int(-1);

    pub fn from_option(value: Option<usize>) -> Self {
        match value {
            Some(v) => AlgorithmResult::Int(v as i64),
            None => AlgorithmResult::NONE,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AlgorithmResult::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_vertices(&self) -> Option<&[usize]> {
        match self {
            AlgorithmResult::Vertices(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_arcs(&self) -> Option<&[(usize, usize)]> {
        match self {
            AlgorithmResult::Arcs(a) => Some(a),
            _ => None,
        }
    }

    /// Short description for logs: the value itself, or the length of a sequence.
    pub fn summary(&self) -> String {
        match self {
            AlgorithmResult::Int(i) => i.to_string(),
            AlgorithmResult::Vertices(v) => format!("{} vertices", v.len()),
            AlgorithmResult::Arcs(a) => format!("{} arcs", a.len()),
        }
    }
}

/// Integers print bare, vertex lists space separated, arcs one `u v` pair per line.
impl fmt::Display for AlgorithmResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmResult::Int(i) => write!(f, "{i}"),
            AlgorithmResult::Vertices(v) => write!(f, "{}", v.iter().join(" ")),
            AlgorithmResult::Arcs(a) => {
                write!(f, "{}", a.iter().map(|(u, v)| format!("{u} {v}")).join("\n"))
            }
        }
    }
}

/// A named unit that computes one property of a graph.
///
/// Implementations keep no state between calls, borrow the graph read-only and may be
/// wrapped by decorators (see [`crate::profile::Profiled`]) any number of times.
pub trait Algorithm: Send + Sync {
    fn name(&self) -> String;

    fn execute(&self, graph: &dyn Graph) -> AlgorithmResult;
}

impl<A: Algorithm + ?Sized> Algorithm for Box<A> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn execute(&self, graph: &dyn Graph) -> AlgorithmResult {
        (**self).execute(graph)
    }
}

impl<A: Algorithm + ?Sized> Algorithm for &A {
    fn name(&self) -> String {
        (**self).name()
    }

    fn execute(&self, graph: &dyn Graph) -> AlgorithmResult {
        (**self).execute(graph)
    }
}
