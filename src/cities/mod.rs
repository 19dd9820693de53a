//! City sources.
//!
//! Two ways to obtain coordinates for an instance: uniformly random points
//! ([`generate_cities`]) or a TSPLIB-style coordinate list
//! ([`parse_tsplib`], [`read_tsplib`]).

mod city;
mod random;
mod tsplib;

pub use city::City;
pub use random::{generate_cities, REGION_SIZE};
pub use tsplib::{parse_tsplib, read_tsplib};
