//! # Profiling
//!
//! [`Profiled`] wraps any [`Algorithm`] and records how long each call took, without
//! touching the result. Decorators nest: every layer appends its own [`ProfileRecord`]
//! to the [`ProfileLog`] it was given.
//!
//! Algorithms mark interesting stretches of work with [`phase`]. Phase timings are only
//! collected at [`ProfilingLevel::Phases`], and only on the thread that called
//! [`Algorithm::execute`]; everywhere else `phase` just runs the closure.
//!
//! [`sweep`] times every registered algorithm over a range of random graph sizes and
//! returns a [`ProfileTable`] that prints as CSV.

use std::{
    cell::RefCell,
    fmt,
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use itertools::Itertools;
use thiserror::Error;
use tracing::{info, instrument, trace_span};

use crate::{
    algorithm::{Algorithm, AlgorithmResult},
    generator::random_graph,
    graph::{Graph, Representation},
    strategy::{EngineConfig, EngineError, Problem, StrategyProvider},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProfilingLevel {
    #[default]
    Off,
    /// Wall-clock time per call.
    Total,
    /// Adds the graph size to each record.
    Detailed,
    /// Adds per-phase timings.
    Phases,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Profiling level must be non-negative, got {0}")]
pub struct InvalidProfilingLevel(pub i64);

/// Levels above 3 saturate at [`ProfilingLevel::Phases`].
impl TryFrom<i64> for ProfilingLevel {
    type Error = InvalidProfilingLevel;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        match level {
            l if l < 0 => Err(InvalidProfilingLevel(l)),
            0 => Ok(ProfilingLevel::Off),
            1 => Ok(ProfilingLevel::Total),
            2 => Ok(ProfilingLevel::Detailed),
            _ => Ok(ProfilingLevel::Phases),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseTiming {
    pub name: String,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileRecord {
    pub algorithm: String,
    pub elapsed: Duration,
    pub vertices: Option<usize>,
    pub edges: Option<usize>,
    pub phases: Vec<PhaseTiming>,
}

/// Shared, append-only list of records. Clones point at the same list.
#[derive(Debug, Clone, Default)]
pub struct ProfileLog(Arc<Mutex<Vec<ProfileRecord>>>);

impl ProfileLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, record: ProfileRecord) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    pub fn records(&self) -> Vec<ProfileRecord> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

thread_local! {
    static FRAMES: RefCell<Vec<Vec<PhaseTiming>>> = const { RefCell::new(Vec::new()) };
}

/// Runs `f` as a named phase of the current algorithm.
pub fn phase<T>(name: &'static str, f: impl FnOnce() -> T) -> T {
    let _span = trace_span!("phase", name).entered();
    let collecting = FRAMES.with(|frames| !frames.borrow().is_empty());
    if !collecting {
        return f();
    }

    let start = Instant::now();
    let out = f();
    let elapsed = start.elapsed();
    FRAMES.with(|frames| {
        if let Some(top) = frames.borrow_mut().last_mut() {
            top.push(PhaseTiming {
                name: name.to_string(),
                elapsed,
            });
        }
    });
    out
}

/// Collects the phases of one profiled call. The frame is popped on drop so a
/// panicking algorithm doesn't leave it behind.
struct PhaseFrame {
    closed: bool,
}

impl PhaseFrame {
    fn open() -> Self {
        FRAMES.with(|frames| frames.borrow_mut().push(Vec::new()));
        PhaseFrame { closed: false }
    }

    fn close(mut self) -> Vec<PhaseTiming> {
        self.closed = true;
        FRAMES
            .with(|frames| frames.borrow_mut().pop())
            .unwrap_or_default()
    }
}

impl Drop for PhaseFrame {
    fn drop(&mut self) {
        if !self.closed {
            FRAMES.with(|frames| {
                frames.borrow_mut().pop();
            });
        }
    }
}

pub struct Profiled<A> {
    inner: A,
    level: ProfilingLevel,
    log: ProfileLog,
}

impl<A: Algorithm> Profiled<A> {
    pub fn new(inner: A, level: ProfilingLevel, log: ProfileLog) -> Self {
        Profiled { inner, level, log }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: Algorithm> Algorithm for Profiled<A> {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn execute(&self, graph: &dyn Graph) -> AlgorithmResult {
        if self.level == ProfilingLevel::Off {
            return self.inner.execute(graph);
        }

        let frame = (self.level >= ProfilingLevel::Phases).then(PhaseFrame::open);
        let start = Instant::now();
        let result = self.inner.execute(graph);
        let elapsed = start.elapsed();
        let phases = frame.map(PhaseFrame::close).unwrap_or_default();

        let (vertices, edges) = if self.level >= ProfilingLevel::Detailed {
            (Some(graph.num_vertices()), Some(graph.num_edges()))
        } else {
            (None, None)
        };

        let algorithm = self.inner.name();
        info!(
            algorithm = %algorithm,
            elapsed_us = elapsed.as_micros() as u64,
            result = %result.summary(),
            "profiled run"
        );
        self.log.push(ProfileRecord {
            algorithm,
            elapsed,
            vertices,
            edges,
            phases,
        });
        result
    }
}

/// Wraps `algorithm` in [`Profiled`] unless profiling is off.
pub fn decorate(
    algorithm: Box<dyn Algorithm>,
    level: ProfilingLevel,
    log: &ProfileLog,
) -> Box<dyn Algorithm> {
    match level {
        ProfilingLevel::Off => algorithm,
        _ => Box::new(Profiled::new(algorithm, level, log.clone())),
    }
}

/// Elapsed time of every algorithm (rows) on every graph size (columns).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileTable {
    sizes: Vec<(usize, usize)>,
    rows: Vec<(String, Vec<Duration>)>,
}

impl ProfileTable {
    pub fn new(sizes: Vec<(usize, usize)>) -> Self {
        ProfileTable {
            sizes,
            rows: Vec::new(),
        }
    }

    /// `(vertices, edges)` of each column.
    pub fn sizes(&self) -> &[(usize, usize)] {
        &self.sizes
    }

    /// Algorithm names in the order they first ran.
    pub fn algorithms(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(name, _)| name.as_str())
    }

    pub fn timing(&self, algorithm: &str, column: usize) -> Option<Duration> {
        self.rows
            .iter()
            .find(|(name, _)| name == algorithm)
            .and_then(|(_, times)| times.get(column).copied())
    }

    /// Adds `elapsed` to the cell of `algorithm` in `column`; repeated runs accumulate.
    pub fn record(&mut self, algorithm: &str, column: usize, elapsed: Duration) {
        let width = self.sizes.len();
        if column >= width {
            return;
        }
        let row = match self.rows.iter().position(|(name, _)| name == algorithm) {
            Some(row) => row,
            None => {
                self.rows
                    .push((algorithm.to_string(), vec![Duration::ZERO; width]));
                self.rows.len() - 1
            }
        };
        self.rows[row].1[column] += elapsed;
    }
}

/// CSV with an `Algorithm` column and one `"V:<n>,E:<m>"` column per size, times in
/// seconds.
impl fmt::Display for ProfileTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Algorithm")?;
        for (n, m) in &self.sizes {
            write!(f, ",\"V:{n},E:{m}\"")?;
        }
        writeln!(f)?;
        for (name, times) in &self.rows {
            let cells = times
                .iter()
                .map(|t| format!("{:.6}", t.as_secs_f64()))
                .join(",");
            writeln!(f, "{name},{cells}")?;
        }
        Ok(())
    }
}

/// Runs every algorithm of every problem once per size on a seeded random graph.
/// Column `i` uses the seed `seed + i`. Levels below [`ProfilingLevel::Total`] are
/// raised to it, since nothing would be timed otherwise.
#[instrument(skip_all, fields(columns = sizes.len(), seed), level = "debug")]
pub fn sweep(
    sizes: &[(usize, usize)],
    seed: u64,
    level: ProfilingLevel,
) -> Result<ProfileTable, EngineError> {
    let provider = StrategyProvider::new(EngineConfig {
        verification: false,
        profiling: level.max(ProfilingLevel::Total),
        workers: None,
    })?;

    let mut table = ProfileTable::new(sizes.to_vec());
    for (column, &(n, m)) in sizes.iter().enumerate() {
        let graph = random_graph(
            Representation::AdjacencyList,
            n,
            m,
            seed.wrapping_add(column as u64),
        )?;
        provider.log().clear();
        for problem in Problem::ALL {
            for algorithm in provider.all(problem) {
                algorithm.execute(graph.as_ref());
            }
        }
        for record in provider.log().records() {
            table.record(&record.algorithm, column, record.elapsed);
        }
        info!(vertices = n, edges = m, "profiled graph size");
    }
    Ok(table)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::{from_edges, Representation};

    struct EdgeCount;

    impl Algorithm for EdgeCount {
        fn name(&self) -> String {
            "edge-count".into()
        }

        fn execute(&self, graph: &dyn Graph) -> AlgorithmResult {
            let n = phase("count", || graph.num_edges());
            phase("noop", || ());
            AlgorithmResult::Int(n as i64)
        }
    }

    fn triangle() -> Box<dyn Graph> {
        from_edges(Representation::AdjacencyList, 3, [(0, 1), (1, 2), (2, 0)]).unwrap()
    }

    #[test]
    fn level_parsing() {
        assert_eq!(ProfilingLevel::try_from(0), Ok(ProfilingLevel::Off));
        assert_eq!(ProfilingLevel::try_from(2), Ok(ProfilingLevel::Detailed));
        assert_eq!(ProfilingLevel::try_from(9), Ok(ProfilingLevel::Phases));
        assert_eq!(
            ProfilingLevel::try_from(-1),
            Err(InvalidProfilingLevel(-1))
        );
    }

    #[test]
    fn off_records_nothing() {
        let log = ProfileLog::new();
        let algo = Profiled::new(EdgeCount, ProfilingLevel::Off, log.clone());
        assert_eq!(algo.execute(triangle().as_ref()), AlgorithmResult::Int(3));
        assert!(log.is_empty());
    }

    #[test]
    fn total_level_keeps_result() {
        let log = ProfileLog::new();
        let algo = Profiled::new(EdgeCount, ProfilingLevel::Total, log.clone());
        assert_eq!(algo.name(), "edge-count");
        assert_eq!(algo.execute(triangle().as_ref()), AlgorithmResult::Int(3));

        let records = log.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].algorithm, "edge-count");
        assert_eq!(records[0].vertices, None);
        assert!(records[0].phases.is_empty());
    }

    #[test]
    fn detailed_level_adds_size() {
        let log = ProfileLog::new();
        let algo = Profiled::new(EdgeCount, ProfilingLevel::Detailed, log.clone());
        algo.execute(triangle().as_ref());
        let record = &log.records()[0];
        assert_eq!(record.vertices, Some(3));
        assert_eq!(record.edges, Some(3));
    }

    #[test]
    fn phases_go_to_innermost_frame() {
        let outer_log = ProfileLog::new();
        let inner_log = ProfileLog::new();
        let algo = Profiled::new(
            Profiled::new(EdgeCount, ProfilingLevel::Phases, inner_log.clone()),
            ProfilingLevel::Phases,
            outer_log.clone(),
        );
        assert_eq!(algo.execute(triangle().as_ref()), AlgorithmResult::Int(3));

        let inner = inner_log.records();
        let outer = outer_log.records();
        assert_eq!(inner.len(), 1);
        assert_eq!(outer.len(), 1);
        let names: Vec<_> = inner[0].phases.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["count", "noop"]);
        assert!(outer[0].phases.is_empty());
        assert!(outer[0].elapsed >= inner[0].elapsed);
    }

    #[test]
    fn nested_decorators_share_a_log() {
        let log = ProfileLog::new();
        let algo = decorate(
            decorate(Box::new(EdgeCount), ProfilingLevel::Total, &log),
            ProfilingLevel::Detailed,
            &log,
        );
        algo.execute(triangle().as_ref());
        algo.execute(triangle().as_ref());
        assert_eq!(log.len(), 4);
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn table_prints_as_csv() {
        let mut table = ProfileTable::new(vec![(10, 20), (100, 400)]);
        table.record("diameter-sequential", 0, Duration::from_micros(1500));
        table.record("diameter-sequential", 1, Duration::from_millis(2));
        table.record("tarjan", 1, Duration::from_micros(3));
        table.record("tarjan", 1, Duration::from_micros(4));
        table.record("tarjan", 5, Duration::from_secs(1));

        assert_eq!(table.timing("tarjan", 1), Some(Duration::from_micros(7)));
        assert_eq!(table.timing("tarjan", 5), None);
        insta::assert_snapshot!(table, @r#"
        Algorithm,"V:10,E:20","V:100,E:400"
        diameter-sequential,0.001500,0.002000
        tarjan,0.000000,0.000007
        "#);
    }

    #[test]
    fn sweep_times_every_algorithm_on_every_size() {
        let sizes = [(6, 12), (15, 40), (30, 120)];
        let table = sweep(&sizes, 5, ProfilingLevel::Off).unwrap();
        assert_eq!(table.sizes(), &sizes);

        let provider = StrategyProvider::new(EngineConfig::default()).unwrap();
        let expected: Vec<String> = Problem::ALL
            .into_iter()
            .flat_map(|p| provider.all(p))
            .map(|a| a.name())
            .collect();
        let found: Vec<_> = table.algorithms().collect();
        assert_eq!(found, expected);

        let csv = table.to_string();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some(r#"Algorithm,"V:6,E:12","V:15,E:40","V:30,E:120""#)
        );
        let rows: Vec<_> = lines.collect();
        assert_eq!(rows.len(), 12);
        for (row, name) in rows.iter().zip(&expected) {
            let fields: Vec<_> = row.split(',').collect();
            assert_eq!(fields.len(), sizes.len() + 1);
            assert_eq!(fields[0], name);
            assert!(fields[1..].iter().all(|t| t.parse::<f64>().is_ok()));
        }
    }

    #[test]
    fn phase_outside_profiling_is_transparent() {
        assert_eq!(phase("free", || 7), 7);
    }
}
