//! # Graph property algorithms
//!
//! Every property has several independent implementations that must agree on every
//! input. They all implement [`Algorithm`](crate::algorithm::Algorithm) and only see
//! the graph through [`Graph`](crate::graph::Graph).
//!
//! ## Available Algorithms
//!
//! ### Source vertices
//! - [`source_vertices`]: vertices with no incoming edge, in one pass over the edges
//!
//! ### Diameter
//! - [`diameter`]: one BFS per vertex, run sequentially, as futures, or on a worker pool
//!
//! ### Feedback arc sets
//! - [`feedback_arc_set`]: iterative cycle removal, vertex ordering, DFS back-edges
//!
//! ### Universal source
//! - [`universal_source`]: reachability (sequential and pooled) and three SCC based finders
//! - [`scc`]: Kosaraju, Tarjan and path-based component partitions plus the condensation
//!
//! ### Acyclicity
//! - [`acyclic`]: topological order, cycle detection and FAS validation

pub mod acyclic;
pub mod diameter;
pub mod feedback_arc_set;
pub mod scc;
pub mod source_vertices;
pub mod traversal;
pub mod universal_source;
