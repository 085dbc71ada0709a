//! # digraph-engine
//!
//! Structural analysis of directed graphs: source vertices, diameter, feedback arc sets
//! and the first universal source, each solved by several interchangeable algorithms
//! that must agree.
//!
//! Graphs come in three representations behind the [`Graph`] trait. Algorithms implement
//! [`Algorithm`], can be wrapped by the [`Profiled`](profile::Profiled) decorator and are
//! picked per [`Problem`] by a [`StrategyProvider`].
//!
//! ```
//! use digraph_engine::{
//!     graph::{from_edges, Representation},
//!     strategy::{EngineConfig, Problem, StrategyProvider},
//! };
//!
//! let graph = from_edges(Representation::AdjacencyList, 3, [(0, 1), (1, 2)]).unwrap();
//! let provider = StrategyProvider::new(EngineConfig::default()).unwrap();
//! let result = provider.solve(Problem::FirstUniversalSource, graph.as_ref()).unwrap();
//! assert_eq!(result.to_string(), "0");
//! ```

pub mod algorithm;
pub mod algorithms;
pub mod generator;
pub mod graph;
pub mod pool;
pub mod profile;
pub mod strategy;
pub mod typed_vec;

#[cfg(test)]
mod test_graphs;

pub use algorithm::{Algorithm, AlgorithmResult};
pub use graph::{create_graph, Graph, GraphError, Representation};
pub use strategy::{EngineConfig, EngineError, Problem, StrategyProvider};
