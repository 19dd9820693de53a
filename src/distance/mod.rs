//! Distance provider.
//!
//! Provides the immutable dense distance matrix consumed by the colony.

mod matrix;

pub use matrix::DistanceMatrix;
