//! Error types for fleet routing.

use thiserror::Error;

/// Errors raised by the routing engine.
///
/// A search that finds no improving tour is not an error; see
/// [`Construction::Pruned`](crate::constructive::Construction::Pruned).
#[derive(Debug, Error)]
pub enum RoutingError {
    /// No locations were supplied.
    #[error("location set is empty")]
    EmptyLocationSet,

    /// Cluster count outside `1..=n`.
    #[error("cluster count {k} is outside 1..={n}")]
    InvalidClusterCount {
        /// Requested cluster count.
        k: usize,
        /// Number of locations.
        n: usize,
    },

    /// Tour start index does not address a location.
    #[error("start index {start} is out of range for {n} locations")]
    InvalidStart {
        /// Requested start index.
        start: usize,
        /// Number of locations.
        n: usize,
    },

    /// A location has a NaN or infinite coordinate.
    #[error("location {index} has a non-finite coordinate")]
    NonFinitePoint {
        /// Index of the offending location.
        index: usize,
    },

    /// Invalid planner configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Planner configuration could not be parsed.
    #[error("TOML parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type alias for routing operations.
pub type Result<T> = std::result::Result<T, RoutingError>;
