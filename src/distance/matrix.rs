//! Dense distance matrix.

use crate::cities::City;
use crate::error::AcoError;

/// Tolerance used when checking symmetry of explicit matrices.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// An immutable n×n distance matrix stored in row-major order.
///
/// Invariants, checked by every constructor: square, entries finite and
/// non-negative, zero diagonal, symmetric.
///
/// # Examples
///
/// ```
/// use u_aco::cities::City;
/// use u_aco::distance::DistanceMatrix;
///
/// let cities = vec![City::new(0.0, 0.0), City::new(3.0, 4.0), City::new(6.0, 8.0)];
/// let dm = DistanceMatrix::from_points(&cities).unwrap();
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes a Euclidean distance matrix from city coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`AcoError::InvalidDistanceMatrix`] if a coordinate is `NaN`
    /// or infinite, or two cities are so far apart that their distance
    /// overflows to infinity.
    pub fn from_points(cities: &[City]) -> Result<Self, AcoError> {
        let n = cities.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        let dm = Self { data, size: n };
        dm.check()?;
        Ok(dm)
    }

    /// Creates a distance matrix from an explicit row-major n×n grid.
    ///
    /// # Errors
    ///
    /// Returns [`AcoError::InvalidDistanceMatrix`] if the data length does
    /// not match `size * size` or the values break the matrix invariants.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self, AcoError> {
        if data.len() != size * size {
            return Err(invalid(format!(
                "expected {} entries for a {size}x{size} matrix, got {}",
                size * size,
                data.len()
            )));
        }
        let dm = Self { data, size };
        dm.check()?;
        Ok(dm)
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Same conditions as [`from_data`](Self::from_data), plus ragged rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, AcoError> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(invalid(format!(
                    "row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Self::from_data(n, data)
    }

    fn check(&self) -> Result<(), AcoError> {
        let n = self.size;
        for i in 0..n {
            if self.get(i, i) != 0.0 {
                return Err(invalid(format!(
                    "diagonal entry ({i},{i}) is {}, expected 0",
                    self.get(i, i)
                )));
            }
            for j in 0..n {
                let d = self.get(i, j);
                if !d.is_finite() || d < 0.0 {
                    return Err(invalid(format!(
                        "entry ({i},{j}) must be finite and non-negative, got {d}"
                    )));
                }
            }
        }
        if !self.is_symmetric(SYMMETRY_TOLERANCE) {
            return Err(invalid("matrix is not symmetric".to_string()));
        }
        Ok(())
    }

    /// Returns the distance between cities `from` and `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of cities in this matrix.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Length of the closed tour `route`, including the edge from the last
    /// city back to the first.
    ///
    /// Empty and single-city routes have length 0.
    pub fn tour_length(&self, route: &[usize]) -> f64 {
        match route {
            [] | [_] => 0.0,
            [first, .., last] => {
                let open: f64 = route.windows(2).map(|w| self.get(w[0], w[1])).sum();
                open + self.get(*last, *first)
            }
        }
    }
}

fn invalid(reason: String) -> AcoError {
    AcoError::InvalidDistanceMatrix { reason }
}
