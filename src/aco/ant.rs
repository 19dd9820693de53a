//! Single-ant tour construction.
//!
//! An ant starts at a uniformly random city and repeatedly moves to an
//! unvisited city `j` with probability proportional to
//!
//! ```text
//! tau(i, j)^alpha * (1 / d(i, j))^beta
//! ```
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*, Section 3.8
//!   (precomputed choice information)

use super::config::DegeneratePolicy;
use super::pheromone::PheromoneMatrix;
use crate::distance::DistanceMatrix;
use crate::error::AcoError;
use rand::Rng;

/// Builds ant routes from a frozen pheromone snapshot.
///
/// The selection weight of every edge is computed once at construction, so
/// all ants of an iteration share the same read-only table and may run in
/// any order (or in parallel) with identical outcomes.
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    choice: Vec<f64>,
    size: usize,
    policy: DegeneratePolicy,
}

impl RouteBuilder {
    /// Computes the choice table `tau^alpha * (1/d)^beta` for every edge.
    ///
    /// Products that come out NaN (e.g. `0 * inf`) are stored as zero.
    pub fn new(
        distances: &DistanceMatrix,
        pheromone: &PheromoneMatrix,
        alpha: f64,
        beta: f64,
        policy: DegeneratePolicy,
    ) -> Self {
        let n = distances.size();
        let mut choice = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let trail = pheromone.get(i, j).powf(alpha);
                let visibility = (1.0 / distances.get(i, j)).powf(beta);
                let w = trail * visibility;
                choice[i * n + j] = if w.is_nan() { 0.0 } else { w };
            }
        }
        Self {
            choice,
            size: n,
            policy,
        }
    }

    /// Selection weight of moving from `from` to `to`.
    #[inline]
    pub fn weight(&self, from: usize, to: usize) -> f64 {
        self.choice[from * self.size + to]
    }

    /// Constructs one closed tour visiting every city exactly once.
    ///
    /// # Errors
    ///
    /// [`AcoError::DegenerateWeights`] if all candidate weights are zero and
    /// the policy is [`DegeneratePolicy::Fail`].
    pub fn build<R: Rng>(&self, rng: &mut R) -> Result<Vec<usize>, AcoError> {
        let n = self.size;
        let mut route = Vec::with_capacity(n);
        if n == 0 {
            return Ok(route);
        }

        let start = rng.random_range(0..n);
        route.push(start);
        let mut unvisited: Vec<usize> = (0..n).filter(|&c| c != start).collect();
        let mut weights = Vec::with_capacity(n);

        let mut current = start;
        while !unvisited.is_empty() {
            weights.clear();
            weights.extend(unvisited.iter().map(|&c| self.weight(current, c)));

            let pick = match sample_index(&weights, rng) {
                Some(idx) => idx,
                None => match self.policy {
                    DegeneratePolicy::Uniform => rng.random_range(0..unvisited.len()),
                    DegeneratePolicy::Fail => {
                        return Err(AcoError::DegenerateWeights {
                            city: current,
                            visited: route.len(),
                        })
                    }
                },
            };

            current = unvisited.swap_remove(pick);
            route.push(current);
        }

        Ok(route)
    }
}

/// Samples an index with probability proportional to `weights[i]`.
///
/// Weights are rescaled by their maximum before the cumulative-sum draw so
/// that large finite weights cannot overflow the total. If any weight is
/// `+inf` the choice is uniform among the infinite ones. Zero, negative and
/// NaN weights are never selected.
///
/// Returns `None` if no weight is positive.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_aco::aco::sample_index;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// assert_eq!(sample_index(&[0.0, 3.0, 0.0], &mut rng), Some(1));
/// assert_eq!(sample_index(&[0.0, 0.0], &mut rng), None);
/// ```
pub fn sample_index<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let max = weights
        .iter()
        .copied()
        .filter(|w| *w > 0.0)
        .fold(0.0_f64, f64::max);

    if max == 0.0 {
        return None;
    }

    if max.is_infinite() {
        let infinite: Vec<usize> = weights
            .iter()
            .enumerate()
            .filter(|(_, w)| w.is_infinite() && **w > 0.0)
            .map(|(i, _)| i)
            .collect();
        return Some(infinite[rng.random_range(0..infinite.len())]);
    }

    let scaled = |w: f64| if w > 0.0 { w / max } else { 0.0 };
    let total: f64 = weights.iter().map(|&w| scaled(w)).sum();

    let mut roll = rng.random_range(0.0..total);
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        let s = scaled(w);
        if s == 0.0 {
            continue;
        }
        if roll < s {
            return Some(i);
        }
        roll -= s;
        last_positive = i;
    }
    // Rounding can leave a sliver of `roll` after the last bucket.
    Some(last_positive)
}

/// Length of the closed tour `route` under `distances`.
///
/// This is the score the colony assigns each ant, wrap edge included.
/// Same value as [`DistanceMatrix::tour_length`].
#[inline]
pub fn route_length(distances: &DistanceMatrix, route: &[usize]) -> f64 {
    distances.tour_length(route)
}

/// Returns `true` if `route` is a permutation of `0..n`.
pub fn is_permutation(route: &[usize], n: usize) -> bool {
    if route.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &c in route {
        if c >= n || seen[c] {
            return false;
        }
        seen[c] = true;
    }
    true
}
