//! Constructive heuristics for building closed tours.
//!
//! - [`NearestNeighbor`] — Randomized nearest-neighbor with branch-and-bound pruning, O(n²)
//! - [`nearest_neighbor_tour`] — Plain greedy nearest-neighbor tour, O(n²)
//! - [`Baseline`] — Identity or shuffled strawman tours for seeding a search
//! - [`landing_pad`] — Start location nearest the centroid

mod baseline;
mod landing_pad;
mod nearest_neighbor;

pub use baseline::{identity_tour, shuffled_tour, Baseline};
pub use landing_pad::landing_pad;
pub use nearest_neighbor::{
    nearest_neighbor_tour, Construction, NearestNeighbor, DEFAULT_DETOUR_PROBABILITY,
};
