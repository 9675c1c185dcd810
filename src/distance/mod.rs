//! Euclidean metric over planar points.
//!
//! Provides the point-to-point distance and the length of a closed tour.

mod metric;

pub use metric::{euclidean, tour_length};
