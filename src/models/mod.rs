//! Domain model types for fleet routing.
//!
//! Locations are plain planar points identified by their position in the
//! location set; clusters group them per vehicle and tours order them.

mod cluster;
mod point;
mod tour;

pub use cluster::Cluster;
pub use point::Point;
pub use tour::Tour;
