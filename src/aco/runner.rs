//! Colony execution loop.
//!
//! Each iteration runs: construct one route per ant, evaluate lengths,
//! evaporate and deposit pheromone, update the incumbent, notify the
//! observer, then check for cancellation.

use super::ant::{route_length, RouteBuilder};
use super::config::AcoConfig;
use super::observer::{Control, IterationReport, NoOpObserver, Observer};
use super::pheromone::PheromoneMatrix;
use crate::distance::DistanceMatrix;
use crate::error::AcoError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Lifecycle of an [`AntColony`].
///
/// `Idle → Running → {Completed, Cancelled}`. `Failed` is entered when
/// construction errors under [`DegeneratePolicy::Fail`](super::DegeneratePolicy::Fail).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Cancelled,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Completed => "completed",
            RunState::Cancelled => "cancelled",
            RunState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// All configured iterations ran.
    Completed,
    /// An observer or the cancel flag stopped the run early.
    Cancelled,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Completed => f.write_str("completed"),
            Termination::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Result of a colony run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoResult {
    /// Best route found, a permutation of all city indices.
    pub best_route: Vec<usize>,

    /// Closed-tour length of `best_route`.
    pub best_length: f64,

    /// Best length so far after each completed iteration. Non-increasing.
    pub history: Vec<f64>,

    /// Number of iterations executed (`history.len()`).
    pub iterations: usize,

    /// Whether the run completed or was cancelled.
    pub termination: Termination,

    /// Wall time of the run.
    pub elapsed: Duration,
}

impl AcoResult {
    /// Whether the run was stopped before the configured iteration count.
    pub fn cancelled(&self) -> bool {
        self.termination == Termination::Cancelled
    }
}

/// Ant Colony Optimization engine for the symmetric TSP.
///
/// Owns the distance matrix and the pheromone trail for its whole lifetime.
/// An engine runs once; build a new one to start again from a fresh trail.
///
/// # Usage
///
/// ```
/// use u_aco::aco::{AcoConfig, AntColony};
/// use u_aco::cities::City;
/// use u_aco::distance::DistanceMatrix;
///
/// let cities = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)].map(City::from);
/// let distances = DistanceMatrix::from_points(&cities).unwrap();
/// let config = AcoConfig::default().with_ants(10).with_iterations(20).with_seed(42);
///
/// let mut colony = AntColony::new(distances, config).unwrap();
/// let result = colony.run().unwrap();
/// assert!((result.best_length - 4.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct AntColony {
    distances: DistanceMatrix,
    config: AcoConfig,
    pheromone: PheromoneMatrix,
    state: RunState,
}

impl AntColony {
    /// Creates an idle colony.
    ///
    /// # Errors
    ///
    /// [`AcoError::TooFewCities`] for fewer than two cities, or
    /// [`AcoError::InvalidConfig`] from [`AcoConfig::validate`].
    pub fn new(distances: DistanceMatrix, config: AcoConfig) -> Result<Self, AcoError> {
        let n = distances.size();
        if n < 2 {
            return Err(AcoError::TooFewCities { count: n });
        }
        config.validate()?;

        Ok(Self {
            pheromone: PheromoneMatrix::new(n),
            distances,
            config,
            state: RunState::Idle,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Current pheromone trail.
    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    /// Distance matrix the colony runs on.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Configuration this colony was built with.
    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Runs all iterations without an observer.
    pub fn run(&mut self) -> Result<AcoResult, AcoError> {
        self.run_with_observer(&mut NoOpObserver)
    }

    /// Runs with a progress observer that may stop the run early.
    pub fn run_with_observer<O>(&mut self, observer: &mut O) -> Result<AcoResult, AcoError>
    where
        O: Observer + ?Sized,
    {
        self.run_with_cancel(observer, None)
    }

    /// Runs with an observer and an optional cancellation token.
    ///
    /// The flag is checked once per iteration, right after the observer
    /// is notified, so at most one more iteration runs after it is set.
    ///
    /// # Errors
    ///
    /// [`AcoError::NotIdle`] if this colony already ran, or
    /// [`AcoError::DegenerateWeights`] under the `Fail` policy.
    pub fn run_with_cancel<O>(
        &mut self,
        observer: &mut O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult, AcoError>
    where
        O: Observer + ?Sized,
    {
        if self.state != RunState::Idle {
            return Err(AcoError::NotIdle { state: self.state });
        }
        self.state = RunState::Running;

        match self.iterate(observer, cancel.as_deref()) {
            Ok(result) => {
                self.state = match result.termination {
                    Termination::Completed => RunState::Completed,
                    Termination::Cancelled => RunState::Cancelled,
                };
                observer.on_finish(&result);
                Ok(result)
            }
            Err(err) => {
                self.state = RunState::Failed;
                Err(err)
            }
        }
    }

    fn iterate<O>(
        &mut self,
        observer: &mut O,
        cancel: Option<&AtomicBool>,
    ) -> Result<AcoResult, AcoError>
    where
        O: Observer + ?Sized,
    {
        let start = Instant::now();
        let n = self.distances.size();
        let config = &self.config;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        observer.on_start(n, config);

        let mut best_route: Vec<usize> = Vec::new();
        let mut best_length = f64::INFINITY;
        let mut history = Vec::with_capacity(config.iterations);
        let mut termination = Termination::Completed;

        for iteration in 0..config.iterations {
            // Frozen snapshot: every ant of this iteration reads the same table.
            let builder = RouteBuilder::new(
                &self.distances,
                &self.pheromone,
                config.alpha,
                config.beta,
                config.degenerate_policy,
            );
            let seeds: Vec<u64> = (0..config.ants).map(|_| rng.random()).collect();
            let routes = construct_routes(&builder, &seeds, config.parallel)?;
            let lengths: Vec<f64> = routes
                .iter()
                .map(|r| route_length(&self.distances, r))
                .collect();

            self.pheromone.evaporate(config.evaporation_rate);
            for (route, &length) in routes.iter().zip(&lengths) {
                // Zero-length tours (all cities coincident) deposit nothing.
                if length > 0.0 {
                    self.pheromone.deposit_route(route, config.q / length);
                }
            }

            let (iter_best_idx, iteration_best_length) = argmin(&lengths);
            if best_route.is_empty() || iteration_best_length < best_length {
                best_length = iteration_best_length;
                best_route = routes[iter_best_idx].clone();
            }
            history.push(best_length);

            let report = IterationReport {
                iteration,
                best_route: &best_route,
                best_length,
                iteration_best_route: &routes[iter_best_idx],
                iteration_best_length,
                elapsed: start.elapsed(),
                pheromone: &self.pheromone,
            };
            let control = observer.on_iteration(&report);

            let flagged = cancel.is_some_and(|flag| flag.load(Ordering::Relaxed));
            if control == Control::Stop || flagged {
                termination = Termination::Cancelled;
                break;
            }
        }

        Ok(AcoResult {
            iterations: history.len(),
            best_route,
            best_length,
            history,
            termination,
            elapsed: start.elapsed(),
        })
    }
}

/// Index and value of the first minimum. `values` must be non-empty.
fn argmin(values: &[f64]) -> (usize, f64) {
    let mut best = (0, values[0]);
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v < best.1 {
            best = (i, v);
        }
    }
    best
}

/// Builds one route per seed. Each ant owns an RNG seeded from the master
/// stream, so the outcome does not depend on execution order.
#[cfg(feature = "parallel")]
fn construct_routes(
    builder: &RouteBuilder,
    seeds: &[u64],
    parallel: bool,
) -> Result<Vec<Vec<usize>>, AcoError> {
    use rayon::prelude::*;

    if parallel {
        seeds
            .par_iter()
            .map(|&s| builder.build(&mut StdRng::seed_from_u64(s)))
            .collect()
    } else {
        construct_sequential(builder, seeds)
    }
}

#[cfg(not(feature = "parallel"))]
fn construct_routes(
    builder: &RouteBuilder,
    seeds: &[u64],
    _parallel: bool,
) -> Result<Vec<Vec<usize>>, AcoError> {
    construct_sequential(builder, seeds)
}

fn construct_sequential(
    builder: &RouteBuilder,
    seeds: &[u64],
) -> Result<Vec<Vec<usize>>, AcoError> {
    seeds
        .iter()
        .map(|&s| builder.build(&mut StdRng::seed_from_u64(s)))
        .collect()
}
