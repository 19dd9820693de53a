//! Ant Colony Optimization for the Traveling Salesman Problem.
//!
//! Provides:
//!
//! - **Colony engine** ([`aco`]): pheromone-guided probabilistic tour
//!   construction, evaporation and deposition, and an iteration loop that
//!   tracks the best tour found. Runs report progress to an observer and
//!   can be cancelled cooperatively.
//! - **Distance provider** ([`distance`]): the immutable symmetric
//!   distance matrix the engine consumes.
//! - **City sources** ([`cities`]): random instances and a TSPLIB
//!   `NODE_COORD_SECTION` reader.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use u_aco::aco::{AcoConfig, AntColony};
//! use u_aco::cities::generate_cities;
//! use u_aco::distance::DistanceMatrix;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let cities = generate_cities(20, &mut rng);
//! let distances = DistanceMatrix::from_points(&cities).unwrap();
//!
//! let config = AcoConfig::default().with_iterations(30).with_seed(42);
//! let mut colony = AntColony::new(distances, config).unwrap();
//! let result = colony.run().unwrap();
//! assert_eq!(result.history.len(), 30);
//! ```

pub mod aco;
pub mod cities;
pub mod distance;
pub mod error;

pub use error::AcoError;
