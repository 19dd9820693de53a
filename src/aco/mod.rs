//! Ant Colony Optimization (Ant System) for the symmetric TSP.
//!
//! A colony of simulated ants repeatedly builds closed tours, choosing each
//! next city with probability weighted by pheromone and inverse distance.
//! After every iteration the trail evaporates and each ant deposits
//! `q / length` on the edges it used, so short tours attract later ants.
//!
//! # Key Types
//!
//! - [`AcoConfig`]: Algorithm parameters (ants, iterations, alpha, beta, rho, q)
//! - [`AntColony`]: The engine; owns distances and pheromone for one run
//! - [`Observer`]: Per-iteration progress callback that may stop the run
//! - [`AcoResult`]: Best tour, its length, and the best-so-far history
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod ant;
mod config;
mod observer;
mod pheromone;
mod runner;

pub use ant::{is_permutation, route_length, sample_index, RouteBuilder};
pub use config::{AcoConfig, DegeneratePolicy};
pub use observer::{
    Chain, Control, IterationReport, LogObserver, NoOpObserver, Observer, TimeLimitObserver,
};
pub use pheromone::PheromoneMatrix;
pub use runner::{AcoResult, AntColony, RunState, Termination};
