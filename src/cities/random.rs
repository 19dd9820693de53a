//! Random instance generation.

use super::City;
use rand::Rng;

/// Side length of the square region random cities are drawn from.
pub const REGION_SIZE: f64 = 100.0;

/// Generates `n` cities uniformly distributed in
/// `[0, REGION_SIZE) × [0, REGION_SIZE)`.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_aco::cities::generate_cities;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let cities = generate_cities(20, &mut rng);
/// assert_eq!(cities.len(), 20);
/// ```
pub fn generate_cities<R: Rng>(n: usize, rng: &mut R) -> Vec<City> {
    (0..n)
        .map(|_| {
            City::new(
                rng.random_range(0.0..REGION_SIZE),
                rng.random_range(0.0..REGION_SIZE),
            )
        })
        .collect()
}
