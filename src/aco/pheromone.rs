//! Pheromone trail state.

/// Floor for the normalization denominator in [`PheromoneMatrix::normalized`].
const NORMALIZE_FLOOR: f64 = 1e-9;

/// Symmetric n×n pheromone matrix, row-major.
///
/// Every cell starts at `1/n`. Entries stay finite and non-negative through
/// any sequence of [`evaporate`](Self::evaporate) and
/// [`deposit_route`](Self::deposit_route) calls.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    data: Vec<f64>,
    size: usize,
}

impl PheromoneMatrix {
    /// Creates an `n×n` matrix with every cell set to `1/n`.
    pub fn new(n: usize) -> Self {
        let init = if n == 0 { 0.0 } else { 1.0 / n as f64 };
        Self {
            data: vec![init; n * n],
            size: n,
        }
    }

    /// Number of cities.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Pheromone on the edge `(from, to)`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Multiplies every entry by `1 - rate`, clamped at zero so rates above
    /// one wipe the trail instead of flipping its sign.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = (1.0 - rate).max(0.0);
        for p in &mut self.data {
            *p *= keep;
        }
    }

    /// Adds `amount` to both directions of every edge of the closed tour
    /// `route`, including the wrap edge.
    ///
    /// Each addition saturates at `f64::MAX`, so repeated or infinite
    /// deposits never push an entry to `+inf`. `NaN` and negative amounts
    /// are ignored.
    pub fn deposit_route(&mut self, route: &[usize], amount: f64) {
        if amount.is_nan() || amount < 0.0 || route.len() < 2 {
            return;
        }
        let n = route.len();
        for i in 0..n {
            let a = route[i];
            let b = route[(i + 1) % n];
            self.add_saturating(a * self.size + b, amount);
            self.add_saturating(b * self.size + a, amount);
        }
    }

    #[inline]
    fn add_saturating(&mut self, idx: usize, amount: f64) {
        let p = &mut self.data[idx];
        *p = (*p + amount).min(f64::MAX);
    }

    /// Largest entry, or 0 for an empty matrix.
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }

    /// Entry scaled into `[0, 1]` relative to the current maximum.
    pub fn normalized(&self, from: usize, to: usize) -> f64 {
        self.get(from, to) / self.max().max(NORMALIZE_FLOOR)
    }

    /// Undirected edges `(i, j, intensity)` with `i < j` whose normalized
    /// intensity exceeds `threshold`.
    ///
    /// Useful for drawing the trail: strong edges are the ones the colony
    /// is converging on.
    pub fn strong_edges(&self, threshold: f64) -> Vec<(usize, usize, f64)> {
        let scale = self.max().max(NORMALIZE_FLOOR);
        let mut edges = Vec::new();
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let intensity = self.get(i, j) / scale;
                if intensity > threshold {
                    edges.push((i, j, intensity));
                }
            }
        }
        edges
    }

    /// Returns `true` if every entry is finite and non-negative.
    pub fn is_well_formed(&self) -> bool {
        self.data.iter().all(|p| p.is_finite() && *p >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_value() {
        let p = PheromoneMatrix::new(4);
        assert_eq!(p.size(), 4);
        for i in 0..4 {
            for j in 0..4 {
                assert!((p.get(i, j) - 0.25).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn test_evaporate() {
        let mut p = PheromoneMatrix::new(2);
        p.evaporate(0.5);
        assert!((p.get(0, 1) - 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_evaporate_rate_above_one_clamps_to_zero() {
        let mut p = PheromoneMatrix::new(3);
        p.evaporate(1.7);
        assert_eq!(p.max(), 0.0);
        assert!(p.is_well_formed());
    }

    #[test]
    fn test_deposit_is_symmetric_and_covers_wrap_edge() {
        let mut p = PheromoneMatrix::new(4);
        p.evaporate(1.0);
        p.deposit_route(&[0, 1, 2, 3], 2.0);
        assert_eq!(p.get(0, 1), 2.0);
        assert_eq!(p.get(1, 0), 2.0);
        assert_eq!(p.get(3, 0), 2.0);
        assert_eq!(p.get(0, 3), 2.0);
        assert_eq!(p.get(0, 2), 0.0);
    }

    #[test]
    fn test_deposit_two_city_route_hits_edge_twice() {
        let mut p = PheromoneMatrix::new(2);
        p.evaporate(1.0);
        p.deposit_route(&[1, 0], 1.5);
        assert_eq!(p.get(0, 1), 3.0);
        assert_eq!(p.get(1, 0), 3.0);
    }

    #[test]
    fn test_deposit_ignores_bad_amounts() {
        let mut p = PheromoneMatrix::new(3);
        let before = p.clone();
        p.deposit_route(&[0, 1, 2], -1.0);
        p.deposit_route(&[0, 1, 2], f64::NAN);
        assert_eq!(p, before);
    }

    #[test]
    fn test_repeated_huge_deposits_saturate() {
        let mut p = PheromoneMatrix::new(4);
        for _ in 0..5 {
            p.deposit_route(&[0, 1, 2, 3], 1e308);
        }
        assert!(p.is_well_formed(), "max = {}", p.max());
        assert_eq!(p.get(0, 1), f64::MAX);
        assert_eq!(p.get(1, 0), f64::MAX);
        assert_eq!(p.get(0, 2), 0.25, "off-route edge must be untouched");
    }

    #[test]
    fn test_infinite_deposit_saturates() {
        let mut p = PheromoneMatrix::new(3);
        p.deposit_route(&[0, 1, 2], f64::INFINITY);
        assert!(p.is_well_formed());
        assert_eq!(p.get(2, 0), f64::MAX);
        assert_eq!(p.get(0, 0), 1.0 / 3.0);
    }

    #[test]
    fn test_normalized_and_strong_edges() {
        let mut p = PheromoneMatrix::new(3);
        p.evaporate(1.0);
        p.deposit_route(&[0, 1], 1.0);
        assert!((p.normalized(0, 1) - 1.0).abs() < 1e-12);
        assert_eq!(p.normalized(1, 2), 0.0);
        let edges = p.strong_edges(0.01);
        assert_eq!(edges.len(), 1);
        assert_eq!((edges[0].0, edges[0].1), (0, 1));
    }

    #[test]
    fn test_normalized_on_empty_trail_is_zero() {
        let mut p = PheromoneMatrix::new(3);
        p.evaporate(1.0);
        assert_eq!(p.normalized(0, 1), 0.0);
        assert!(p.strong_edges(0.0).is_empty());
    }
}
