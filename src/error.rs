//! Error types for u-aco.
//!
//! Configuration problems are reported when an engine is built, never
//! mid-run. The city-source variants belong to the collaborators in
//! [`crate::cities`] and never originate from the engine itself.

use thiserror::Error;

/// Unified error type for colony construction, runs, and city sources.
#[derive(Debug, Error)]
pub enum AcoError {
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        /// Name of the offending parameter.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The instance has fewer than two cities.
    #[error("at least 2 cities are required, got {count}")]
    TooFewCities {
        /// Number of cities supplied.
        count: usize,
    },

    /// The distance matrix violates its shape or value contract.
    #[error("invalid distance matrix: {reason}")]
    InvalidDistanceMatrix {
        /// Description of the violation.
        reason: String,
    },

    /// Every candidate weight evaluated to zero under
    /// [`DegeneratePolicy::Fail`](crate::aco::DegeneratePolicy::Fail).
    #[error("all selection weights are zero leaving city {city} after {visited} visited")]
    DegenerateWeights {
        /// City the ant was standing on.
        city: usize,
        /// Number of cities already on the partial route.
        visited: usize,
    },

    /// A run was requested on an engine that is not idle.
    #[error("colony has already run (state: {state})")]
    NotIdle {
        /// State the engine was in.
        state: crate::aco::RunState,
    },

    /// A coordinate record could not be parsed.
    #[error("parse error on line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// The input has no `NODE_COORD_SECTION` marker.
    #[error("missing NODE_COORD_SECTION")]
    MissingCoordSection,

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AcoError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        AcoError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
