//! Partitioning of locations into per-vehicle clusters.
//!
//! - [`kmeans`] — Lloyd's k-means with seeded random initialization

mod kmeans;

pub use kmeans::{centroid, kmeans, KMeans, Partition};
