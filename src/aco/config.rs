//! Colony configuration.

use crate::error::AcoError;

/// What route construction does when every candidate weight is zero.
///
/// This happens when `pheromone^alpha * (1/distance)^beta` underflows for
/// all unvisited cities, e.g. with large negative exponents or after
/// evaporation has annihilated the trail (`evaporation_rate >= 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DegeneratePolicy {
    /// Pick uniformly among the unvisited cities, using the ant's RNG.
    #[default]
    Uniform,

    /// Abort the run with [`AcoError::DegenerateWeights`].
    Fail,
}

/// Configuration for an Ant Colony Optimization run.
///
/// Defaults follow the classic Ant System settings for small Euclidean
/// instances: 20 ants, 50 iterations, `alpha = 1`, `beta = 5`,
/// `evaporation_rate = 0.5`, `q = 100`.
///
/// # Examples
///
/// ```
/// use u_aco::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_ants(10)
///     .with_iterations(200)
///     .with_alpha(1.0)
///     .with_beta(3.0)
///     .with_evaporation_rate(0.1)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Number of ants constructing a route each iteration.
    pub ants: usize,

    /// Number of iterations to run.
    pub iterations: usize,

    /// Pheromone influence exponent.
    pub alpha: f64,

    /// Heuristic (inverse distance) influence exponent.
    pub beta: f64,

    /// Fraction of pheromone removed per iteration.
    ///
    /// Expected in `[0, 1)`. Values `>= 1` are accepted and wipe the whole
    /// trail every iteration.
    pub evaporation_rate: f64,

    /// Deposition scale: each ant adds `q / route_length` to its edges.
    pub q: f64,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Resolution of all-zero selection weights.
    pub degenerate_policy: DegeneratePolicy,

    /// Construct ant routes on the rayon pool.
    ///
    /// Only has an effect with the `parallel` feature. Results are
    /// identical to sequential construction.
    pub parallel: bool,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            ants: 20,
            iterations: 50,
            alpha: 1.0,
            beta: 5.0,
            evaporation_rate: 0.5,
            q: 100.0,
            seed: None,
            degenerate_policy: DegeneratePolicy::default(),
            parallel: false,
        }
    }
}

impl AcoConfig {
    pub fn with_ants(mut self, n: usize) -> Self {
        self.ants = n;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_evaporation_rate(mut self, rho: f64) -> Self {
        self.evaporation_rate = rho;
        self
    }

    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// `alpha` and `beta` may be any non-NaN real; their numeric
    /// consequences are the caller's responsibility.
    pub fn validate(&self) -> Result<(), AcoError> {
        if self.ants == 0 {
            return Err(AcoError::config("ants", "must be positive, got 0"));
        }
        if self.iterations == 0 {
            return Err(AcoError::config("iterations", "must be positive, got 0"));
        }
        if self.alpha.is_nan() {
            return Err(AcoError::config("alpha", "must not be NaN"));
        }
        if self.beta.is_nan() {
            return Err(AcoError::config("beta", "must not be NaN"));
        }
        if !(self.evaporation_rate.is_finite() && self.evaporation_rate >= 0.0) {
            return Err(AcoError::config(
                "evaporation_rate",
                format!("must be finite and non-negative, got {}", self.evaporation_rate),
            ));
        }
        if !(self.q.is_finite() && self.q > 0.0) {
            return Err(AcoError::config(
                "q",
                format!("must be finite and positive, got {}", self.q),
            ));
        }
        Ok(())
    }
}
