//! # fleet-routing
//!
//! Delivery routing for a small fleet: partition locations into one cluster
//! per vehicle with k-means, then build a closed tour per cluster with an
//! anytime nearest-neighbor search that prunes against the best tour found.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Point, Cluster, Tour)
//! - [`distance`] — Euclidean metric and tour length
//! - [`clustering`] — K-means partitioner
//! - [`constructive`] — Randomized nearest-neighbor with pruning, baselines
//! - [`local_search`] — 2-opt polishing
//! - [`search`] — Anytime search, deadlines and cancellation
//! - [`planner`] — Per-fleet-size planning and reporting
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use fleet_routing::models::Point;
//! use fleet_routing::planner::{Planner, PlannerConfig};
//! use fleet_routing::search::CancellationToken;
//!
//! let points: Vec<Point> = (0..20)
//!     .map(|i| Point::new((i * 7 % 13) as f64, (i * 5 % 11) as f64))
//!     .collect();
//! let planner = Planner::new(
//!     PlannerConfig::default()
//!         .with_time_budget(Duration::from_secs(5))
//!         .with_max_attempts(100),
//! )
//! .unwrap();
//! let report = planner.plan(&points, &CancellationToken::new()).unwrap();
//! assert_eq!(report.plans.len(), 4);
//! ```

pub mod clustering;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod local_search;
pub mod models;
pub mod planner;
pub mod search;

pub use error::{Result, RoutingError};
