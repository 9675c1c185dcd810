//! Fleet planning across vehicle counts.
//!
//! For each fleet size `k`, partitions the locations with k-means, runs an
//! anytime search per non-empty cluster, and maps each cluster tour back to
//! original location indices.

use serde::Serialize;
use tracing::{info, warn};

use crate::clustering::KMeans;
use crate::constructive::landing_pad;
use crate::error::{Result, RoutingError};
use crate::models::{Cluster, Point, Tour};
use crate::search::{AnytimeSearch, CancellationToken, SearchOutcome};

use super::PlannerConfig;

/// Route of one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    /// Cluster centroid, unrounded.
    pub centroid: Point,
    /// Number of locations served.
    pub member_count: usize,
    /// Closed tour over original location indices; empty if no members.
    pub tour: Tour,
    /// Closed tour length; zero if no members.
    pub distance: f64,
}

/// Plan for one fleet size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetPlan {
    /// Number of vehicles (clusters).
    pub vehicles: usize,
    /// Sum of route distances.
    pub total_distance: f64,
    /// One route per cluster, in cluster order.
    pub routes: Vec<RoutePlan>,
    /// K-means within-cluster sum of squares.
    pub objective: f64,
}

/// Plans for every fleet size that was run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlannerReport {
    /// Plans in increasing fleet size.
    pub plans: Vec<FleetPlan>,
}

impl PlannerReport {
    /// Plan for exactly `vehicles` vehicles, if it was run.
    pub fn plan(&self, vehicles: usize) -> Option<&FleetPlan> {
        self.plans.iter().find(|p| p.vehicles == vehicles)
    }

    /// Plan with the lowest total distance (fewest vehicles on ties).
    pub fn best(&self) -> Option<&FleetPlan> {
        self.plans.iter().fold(None, |best: Option<&FleetPlan>, p| match best {
            Some(b) if b.total_distance <= p.total_distance => Some(b),
            _ => Some(p),
        })
    }
}

/// An improvement found while planning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    /// Fleet size being planned.
    pub vehicles: usize,
    /// Cluster whose tour improved.
    pub cluster: usize,
    /// New best tour length for that cluster.
    pub distance: f64,
}

/// Fleet planner.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fleet_routing::models::Point;
/// use fleet_routing::planner::{Planner, PlannerConfig};
/// use fleet_routing::search::CancellationToken;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 10.0),
///     Point::new(10.0, 10.0),
///     Point::new(10.0, 0.0),
/// ];
/// let config = PlannerConfig::default()
///     .with_max_vehicles(2)
///     .with_time_budget(Duration::from_secs(5))
///     .with_max_attempts(50);
///
/// let report = Planner::new(config).unwrap()
///     .plan(&points, &CancellationToken::new())
///     .unwrap();
/// let single = report.plan(1).unwrap();
/// assert!((single.total_distance - 40.0).abs() < 1e-9);
/// assert_eq!(report.plans.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    /// Creates a planner after validating `config`.
    ///
    /// # Errors
    ///
    /// [`RoutingError::Config`] if the configuration is invalid.
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans for every fleet size `1..=min(max_vehicles, n)`.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::EmptyLocationSet`] if `points` is empty
    /// - [`RoutingError::NonFinitePoint`] if a coordinate is NaN or infinite
    pub fn plan(&self, points: &[Point], cancel: &CancellationToken) -> Result<PlannerReport> {
        self.plan_with_progress(points, cancel, |_| {})
    }

    /// Like [`plan`](Self::plan), reporting every improvement.
    pub fn plan_with_progress<F>(
        &self,
        points: &[Point],
        cancel: &CancellationToken,
        mut on_progress: F,
    ) -> Result<PlannerReport>
    where
        F: FnMut(Progress),
    {
        if points.is_empty() {
            return Err(RoutingError::EmptyLocationSet);
        }
        let max = self.config.max_vehicles.min(points.len());
        if max < self.config.max_vehicles {
            warn!(
                n = points.len(),
                max_vehicles = self.config.max_vehicles,
                "fewer locations than vehicles, skipping larger fleets"
            );
        }

        let mut plans = Vec::with_capacity(max);
        for k in 1..=max {
            plans.push(self.plan_fleet_inner(points, k, cancel, &mut on_progress)?);
        }
        Ok(PlannerReport { plans })
    }

    /// Plans for exactly `k` vehicles.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::EmptyLocationSet`] if `points` is empty
    /// - [`RoutingError::InvalidClusterCount`] if `k` is outside `1..=n`
    /// - [`RoutingError::NonFinitePoint`] if a coordinate is NaN or infinite
    pub fn plan_fleet(
        &self,
        points: &[Point],
        k: usize,
        cancel: &CancellationToken,
    ) -> Result<FleetPlan> {
        self.plan_fleet_inner(points, k, cancel, &mut |_: Progress| {})
    }

    fn plan_fleet_inner<F>(
        &self,
        points: &[Point],
        k: usize,
        cancel: &CancellationToken,
        on_progress: &mut F,
    ) -> Result<FleetPlan>
    where
        F: FnMut(Progress),
    {
        let mut kmeans = KMeans::new(k).with_seed(self.config.seed);
        if let Some(max) = self.config.max_kmeans_iterations {
            kmeans = kmeans.with_max_iterations(max);
        }
        let partition = kmeans.partition(points)?;

        let mut routes = Vec::with_capacity(k);
        for (index, cluster) in partition.clusters.iter().enumerate() {
            let route = self.route_cluster(points, cluster, k, index, cancel, |distance| {
                on_progress(Progress {
                    vehicles: k,
                    cluster: index,
                    distance,
                })
            })?;
            routes.push(route);
        }

        let total_distance = routes.iter().map(|r| r.distance).sum();
        info!(
            event = "fleet_planned",
            vehicles = k,
            total_distance,
            kmeans_iterations = partition.iterations,
        );

        Ok(FleetPlan {
            vehicles: k,
            total_distance,
            routes,
            objective: partition.objective,
        })
    }

    fn route_cluster<F>(
        &self,
        points: &[Point],
        cluster: &Cluster,
        k: usize,
        index: usize,
        cancel: &CancellationToken,
        on_improvement: F,
    ) -> Result<RoutePlan>
    where
        F: FnMut(f64),
    {
        if cluster.is_empty() {
            return Ok(RoutePlan {
                centroid: cluster.centroid(),
                member_count: 0,
                tour: Tour::empty(),
                distance: 0.0,
            });
        }

        let local = cluster.member_points(points);
        let start = if self.config.landing_pad_start {
            landing_pad(&local).unwrap_or(0)
        } else {
            0
        };

        let search = AnytimeSearch::new(
            self.config
                .search_config(cluster_seed(self.config.seed, k, index)),
        );
        let SearchOutcome { tour, distance, .. } =
            search.run_with_progress(&local, start, cancel, on_improvement)?;

        Ok(RoutePlan {
            centroid: cluster.centroid(),
            member_count: cluster.len(),
            tour: tour.translate(cluster.members()),
            distance,
        })
    }
}

/// Derives an independent search seed for cluster `index` of a `k`-fleet.
fn cluster_seed(seed: u64, k: usize, index: usize) -> u64 {
    let salt = ((k as u64) << 32) | index as u64;
    seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ salt
}
