//! # Strategy selection
//!
//! Maps each [`Problem`] to the algorithms that solve it. [`StrategyProvider::canonical`]
//! is the one the driver runs; [`StrategyProvider::all`] lists every variant, canonical
//! first, for cross-checking.
//!
//! With [`EngineConfig::verification`] set, [`StrategyProvider::solve`] runs every variant
//! and rejects the answer when an exact problem's variants disagree or when a feedback arc
//! set leaves a cycle behind.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::{
    algorithm::{Algorithm, AlgorithmResult},
    algorithms::{
        acyclic::is_acyclic_after_removal,
        diameter::{ConcurrentDiameter, ParallelDiameter, SequentialDiameter},
        feedback_arc_set::{DfsBackEdges, InsertEdges, RemoveCycles},
        source_vertices::SourceVertices,
        universal_source::{
            Kosaraju, ParallelReachability, PathBased, SequentialReachability, Tarjan,
        },
    },
    graph::{Graph, GraphError},
    pool::{PoolError, WorkerPool},
    profile::{decorate, ProfileLog, ProfilingLevel},
};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Problem {
    SourceVertexCount,
    DiameterMeasure,
    FeedbackArcSet,
    FirstUniversalSource,
}

impl Problem {
    pub const ALL: [Problem; 4] = [
        Problem::SourceVertexCount,
        Problem::DiameterMeasure,
        Problem::FeedbackArcSet,
        Problem::FirstUniversalSource,
    ];

    /// 1-based position in [`Problem::ALL`].
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn title(self) -> &'static str {
        match self {
            Problem::SourceVertexCount => "Source Vertex Count",
            Problem::DiameterMeasure => "Diameter Measure",
            Problem::FeedbackArcSet => "Feedback Arc Set",
            Problem::FirstUniversalSource => "First Universal Source",
        }
    }

    /// Whether every variant must return the same result. Feedback arc sets only have
    /// to be valid.
    pub fn is_exact(self) -> bool {
        !matches!(self, Problem::FeedbackArcSet)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Problem {}: {}", self.number(), self.title())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Run every variant and check the canonical answer against them.
    pub verification: bool,
    pub profiling: ProfilingLevel,
    /// Dedicated pool size for the parallel variants, rayon's global pool when `None`.
    pub workers: Option<usize>,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(
        "{problem}: {algorithm} returned {}, expected {}",
        .found.summary(),
        .expected.summary()
    )]
    Disagreement {
        problem: Problem,
        algorithm: String,
        expected: AlgorithmResult,
        found: AlgorithmResult,
    },
    #[error("{algorithm} returned arcs whose removal leaves a cycle")]
    InvalidFeedbackArcSet { algorithm: String },
}

pub struct StrategyProvider {
    config: EngineConfig,
    pool: WorkerPool,
    log: ProfileLog,
}

impl StrategyProvider {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let pool = match config.workers {
            Some(threads) => WorkerPool::with_threads(threads)?,
            None => WorkerPool::global(),
        };
        debug!(?config, threads = pool.threads(), "strategy provider ready");
        Ok(StrategyProvider {
            config,
            pool,
            log: ProfileLog::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Records of every profiled run so far. Empty when profiling is off.
    pub fn log(&self) -> &ProfileLog {
        &self.log
    }

    pub fn canonical(&self, problem: Problem) -> Box<dyn Algorithm> {
        let algorithm: Box<dyn Algorithm> = match problem {
            Problem::SourceVertexCount => Box::new(SourceVertices),
            Problem::DiameterMeasure => Box::new(ConcurrentDiameter),
            Problem::FeedbackArcSet => Box::new(DfsBackEdges),
            Problem::FirstUniversalSource => Box::new(Tarjan),
        };
        self.decorated(algorithm)
    }

    /// Every variant for `problem`, canonical first.
    pub fn all(&self, problem: Problem) -> Vec<Box<dyn Algorithm>> {
        let others: Vec<Box<dyn Algorithm>> = match problem {
            Problem::SourceVertexCount => vec![],
            Problem::DiameterMeasure => vec![
                Box::new(SequentialDiameter),
                Box::new(ParallelDiameter::new(self.pool.clone())),
            ],
            Problem::FeedbackArcSet => vec![Box::new(RemoveCycles), Box::new(InsertEdges)],
            Problem::FirstUniversalSource => vec![
                Box::new(SequentialReachability),
                Box::new(ParallelReachability::new(self.pool.clone())),
                Box::new(Kosaraju),
                Box::new(PathBased),
            ],
        };
        std::iter::once(self.canonical(problem))
            .chain(others.into_iter().map(|a| self.decorated(a)))
            .collect()
    }

    fn decorated(&self, algorithm: Box<dyn Algorithm>) -> Box<dyn Algorithm> {
        decorate(algorithm, self.config.profiling, &self.log)
    }

    #[instrument(skip_all, fields(%problem, n = graph.num_vertices()), level = "debug")]
    pub fn solve(
        &self,
        problem: Problem,
        graph: &dyn Graph,
    ) -> Result<AlgorithmResult, EngineError> {
        if !self.config.verification {
            return Ok(self.canonical(problem).execute(graph));
        }

        let canonical = self.canonical(problem);
        let expected = canonical.execute(graph);
        self.check_arcs(problem, canonical.as_ref(), &expected, graph)?;

        for algorithm in self.all(problem).into_iter().skip(1) {
            let found = algorithm.execute(graph);
            if problem.is_exact() && found != expected {
                warn!(algorithm = %algorithm.name(), "variant disagrees");
                return Err(EngineError::Disagreement {
                    problem,
                    algorithm: algorithm.name(),
                    expected,
                    found,
                });
            }
            self.check_arcs(problem, algorithm.as_ref(), &found, graph)?;
        }
        Ok(expected)
    }

    fn check_arcs(
        &self,
        problem: Problem,
        algorithm: &dyn Algorithm,
        result: &AlgorithmResult,
        graph: &dyn Graph,
    ) -> Result<(), EngineError> {
        if problem != Problem::FeedbackArcSet {
            return Ok(());
        }
        let arcs = result.as_arcs().unwrap_or_default();
        if is_acyclic_after_removal(graph, arcs)? {
            Ok(())
        } else {
            Err(EngineError::InvalidFeedbackArcSet {
                algorithm: algorithm.name(),
            })
        }
    }

    /// The four problems in order, each through [`Self::solve`].
    pub fn solve_all(
        &self,
        graph: &dyn Graph,
    ) -> Result<Vec<(Problem, AlgorithmResult)>, EngineError> {
        Problem::ALL
            .into_iter()
            .map(|problem| {
                let result = self.solve(problem, graph)?;
                info!(%problem, result = %result.summary(), "solved");
                Ok((problem, result))
            })
            .collect()
    }
}
