use std::fmt;

use itertools::Itertools;
use thiserror::Error;

use crate::{
    algorithm::AlgorithmResult,
    algorithms::{
        acyclic::{is_acyclic_after_removal, topological_order},
        scc::{kosaraju, path_based, tarjan},
    },
    graph::{from_edges, Adjacency, Graph, Representation},
    profile::ProfilingLevel,
    strategy::{EngineConfig, EngineError, Problem, StrategyProvider},
};

#[test]
fn test_empty() -> TestResult {
    TestGraph::Empty(0).test_all()?;
    TestGraph::Empty(1).test_all()?;
    TestGraph::Empty(4).test_all()
}

#[test]
fn test_path() -> TestResult {
    TestGraph::Path(1).test_all()?;
    TestGraph::Path(6).test_all()
}

#[test]
fn test_cycle() -> TestResult {
    TestGraph::Cycle(2).test_all()?;
    TestGraph::Cycle(7).test_all()
}

#[test]
fn test_complete() -> TestResult {
    TestGraph::Complete(5).test_all()
}

#[test]
fn test_transitive_tournament() -> TestResult {
    TestGraph::TransitiveTournament(6).test_all()
}

#[test]
fn test_stars() -> TestResult {
    TestGraph::OutStar(5).test_all()?;
    TestGraph::InStar(5).test_all()
}

#[test]
fn test_wheel() -> TestResult {
    TestGraph::Wheel(6).test_all()
}

#[test]
fn test_source_into_cycle() -> TestResult {
    TestGraph::SourceIntoCycle(4).test_all()
}

#[test]
fn test_two_cycles() -> TestResult {
    TestGraph::TwoCycles(3).test_all()
}

#[test]
fn test_petersen() -> TestResult {
    TestGraph::Petersen.test_all()
}

#[derive(Debug, Clone)]
enum TestGraph {
    Empty(usize),                // n isolated vertices
    Path(usize),                 // 0 -> 1 -> .. -> n-1
    Cycle(usize),                // directed cycle of length n, n >= 2
    Complete(usize),             // every ordered pair, n >= 2
    TransitiveTournament(usize), // i -> j for every i < j, n >= 2
    OutStar(usize),              // 0 -> i, n >= 2
    InStar(usize),               // i -> 0, n >= 3
    Wheel(usize),                // hub 0 both ways to a directed rim of n >= 3
    SourceIntoCycle(usize),      // 0 -> cycle on 1..=n
    TwoCycles(usize),            // two disjoint cycles of length n
    Petersen,                    // every undirected edge in both directions
}

impl fmt::Display for TestGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestGraph::Empty(n) => write!(f, "Empty({n})"),
            TestGraph::Path(n) => write!(f, "Path({n})"),
            TestGraph::Cycle(n) => write!(f, "Cycle({n})"),
            TestGraph::Complete(n) => write!(f, "Complete({n})"),
            TestGraph::TransitiveTournament(n) => write!(f, "TransitiveTournament({n})"),
            TestGraph::OutStar(n) => write!(f, "OutStar({n})"),
            TestGraph::InStar(n) => write!(f, "InStar({n})"),
            TestGraph::Wheel(n) => write!(f, "Wheel({n})"),
            TestGraph::SourceIntoCycle(n) => write!(f, "SourceIntoCycle({n})"),
            TestGraph::TwoCycles(n) => write!(f, "TwoCycles({n})"),
            TestGraph::Petersen => write!(f, "Petersen"),
        }
    }
}

#[derive(Debug)]
struct GraphProperties {
    n_vertices: usize,
    n_edges: usize,
    sources: Vec<usize>,
    diameter: Option<usize>,
    universal_source: Option<usize>,
    components: usize,
    acyclic: bool,
}

fn cycle(offset: usize, n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).map(move |i| (offset + i, offset + (i + 1) % n))
}

fn both_ways(edges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    edges.iter().flat_map(|&(u, v)| [(u, v), (v, u)]).collect()
}

impl TestGraph {
    fn edges(&self) -> (usize, Vec<(usize, usize)>) {
        match *self {
            TestGraph::Empty(n) => (n, vec![]),
            TestGraph::Path(n) => (n, (1..n).map(|i| (i - 1, i)).collect()),
            TestGraph::Cycle(n) => (n, cycle(0, n).collect()),
            TestGraph::Complete(n) => (
                n,
                (0..n).cartesian_product(0..n).filter(|(i, j)| i != j).collect(),
            ),
            TestGraph::TransitiveTournament(n) => (n, (0..n).tuple_combinations().collect()),
            TestGraph::OutStar(n) => (n, (1..n).map(|i| (0, i)).collect()),
            TestGraph::InStar(n) => (n, (1..n).map(|i| (i, 0)).collect()),
            TestGraph::Wheel(n) => {
                let spokes: Vec<_> = (1..=n).map(|i| (0, i)).collect();
                let mut edges = both_ways(&spokes);
                edges.extend(cycle(1, n));
                (n + 1, edges)
            }
            TestGraph::SourceIntoCycle(n) => {
                let mut edges = vec![(0, 1)];
                edges.extend(cycle(1, n));
                (n + 1, edges)
            }
            TestGraph::TwoCycles(n) => (2 * n, cycle(0, n).chain(cycle(n, n)).collect()),
            TestGraph::Petersen => {
                let outer = cycle(0, 5);
                let spokes = (0..5).map(|i| (i, i + 5));
                let inner = [(5, 7), (7, 9), (9, 6), (6, 8), (8, 5)];
                let undirected: Vec<_> = outer.chain(spokes).chain(inner).collect();
                (10, both_ways(&undirected))
            }
        }
    }

    fn properties(&self) -> GraphProperties {
        let (n_vertices, edges) = self.edges();
        let n_edges = edges.len();
        let trivial = n_vertices <= 1;
        let (sources, diameter, universal_source, components, acyclic) = match *self {
            TestGraph::Empty(n) => (
                (0..n).collect(),
                trivial.then_some(0),
                (n == 1).then_some(0),
                n,
                true,
            ),
            TestGraph::Path(n) => (vec![0], trivial.then_some(0), Some(0), n, true),
            TestGraph::Cycle(n) => (vec![], Some(n - 1), Some(0), 1, false),
            TestGraph::Complete(_) => (vec![], Some(1), Some(0), 1, false),
            TestGraph::TransitiveTournament(n) | TestGraph::OutStar(n) => {
                (vec![0], None, Some(0), n, true)
            }
            TestGraph::InStar(n) => ((1..n).collect(), None, None, n, true),
            TestGraph::Wheel(_) => (vec![], Some(2), Some(0), 1, false),
            TestGraph::SourceIntoCycle(_) => (vec![0], None, Some(0), 2, false),
            TestGraph::TwoCycles(_) => (vec![], None, None, 2, false),
            TestGraph::Petersen => (vec![], Some(2), Some(0), 1, false),
        };

        GraphProperties {
            n_vertices,
            n_edges,
            sources,
            diameter,
            universal_source,
            components,
            acyclic,
        }
    }

    fn build(&self, kind: Representation) -> Result<(Box<dyn Graph>, GraphProperties), TestError> {
        let (n, edges) = self.edges();
        let graph = from_edges(kind, n, edges).map_err(|e| TestError::Engine(e.into()))?;
        Ok((graph, self.properties()))
    }
}

type TestResult = Result<(), TestError>;

#[derive(Debug, Error)]
enum TestError {
    #[error("{graph} on {kind}: wrong {what}. Expected: {expected}, Found: {found}")]
    Mismatch {
        graph: String,
        kind: Representation,
        what: &'static str,
        expected: String,
        found: String,
    },
    #[error("{graph} on {kind}: arc set {arcs:?} leaves a cycle")]
    CycleLeft {
        graph: String,
        kind: Representation,
        arcs: Vec<(usize, usize)>,
    },
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl TestGraph {
    fn check<T: PartialEq + fmt::Debug>(
        &self,
        kind: Representation,
        what: &'static str,
        expected: T,
        found: T,
    ) -> TestResult {
        if expected == found {
            return Ok(());
        }
        Err(TestError::Mismatch {
            graph: self.to_string(),
            kind,
            what,
            expected: format!("{expected:?}"),
            found: format!("{found:?}"),
        })
    }

    fn test_basic_properties(
        &self,
        kind: Representation,
        graph: &dyn Graph,
        props: &GraphProperties,
    ) -> TestResult {
        self.check(kind, "vertex count", props.n_vertices, graph.num_vertices())?;
        self.check(kind, "edge count", props.n_edges, graph.num_edges())?;
        self.check(
            kind,
            "acyclicity",
            props.acyclic,
            topological_order(graph).is_ok(),
        )?;

        let adj = Adjacency::from_graph(graph);
        for partition in [kosaraju(&adj), tarjan(&adj), path_based(&adj)] {
            self.check(kind, "component count", props.components, partition.len())?;
        }
        Ok(())
    }

    fn test_problems(
        &self,
        kind: Representation,
        graph: &dyn Graph,
        props: &GraphProperties,
    ) -> TestResult {
        let provider = StrategyProvider::new(EngineConfig {
            verification: true,
            profiling: ProfilingLevel::Total,
            workers: Some(3),
        })?;

        let results = provider.solve_all(graph)?;
        let found: Vec<_> = results.iter().map(|(_, r)| r.clone()).collect();
        self.check(
            kind,
            "source vertices",
            &AlgorithmResult::Vertices(props.sources.clone()),
            &found[0],
        )?;
        self.check(
            kind,
            "diameter",
            &AlgorithmResult::from_option(props.diameter),
            &found[1],
        )?;
        self.check(
            kind,
            "universal source",
            &AlgorithmResult::from_option(props.universal_source),
            &found[3],
        )?;

        for algorithm in provider.all(Problem::FeedbackArcSet) {
            let result = algorithm.execute(graph);
            let arcs = result.as_arcs().unwrap_or_default();
            let valid = is_acyclic_after_removal(graph, arcs).map_err(EngineError::from)?;
            if !valid {
                return Err(TestError::CycleLeft {
                    graph: self.to_string(),
                    kind,
                    arcs: arcs.to_vec(),
                });
            }
            if props.acyclic {
                self.check(kind, "arc set of a DAG", 0, arcs.len())?;
            }
        }

        // one record per variant per problem, plus the feedback arc sets run above
        let runs: usize = Problem::ALL.into_iter().map(|p| provider.all(p).len()).sum();
        self.check(kind, "profile records", runs + 3, provider.log().len())?;
        Ok(())
    }

    fn test_all(&self) -> TestResult {
        for kind in Representation::ALL {
            let (graph, properties) = self.build(kind)?;
            self.test_basic_properties(kind, graph.as_ref(), &properties)?;
            self.test_problems(kind, graph.as_ref(), &properties)?;
        }
        Ok(())
    }
}
