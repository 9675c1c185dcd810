//! K-means partitioner.
//!
//! # Algorithm
//!
//! 1. Sample `k` distinct locations as initial centroids (seeded RNG).
//! 2. Assign every location to its nearest centroid; ties go to the lowest
//!    cluster index.
//! 3. Move each non-empty cluster's centroid to the mean of its members.
//!    Empty clusters keep their previous centroid.
//! 4. Stop when no centroid moved (exact equality), otherwise repeat from 2.
//!
//! Exact equality matches Lloyd's original stopping rule. Floating-point
//! oscillation can in principle keep it from terminating; callers that need
//! a hard bound set [`KMeans::with_max_iterations`].
//!
//! # Complexity
//!
//! O(n·k) per iteration.
//!
//! # Reference
//!
//! Lloyd, S.P. (1982). "Least squares quantization in PCM",
//! *IEEE Transactions on Information Theory* 28(2), 129-137.

use rand::seq::index::sample;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::distance::euclidean;
use crate::error::{Result, RoutingError};
use crate::models::{Cluster, Point};

/// Result of a partitioning run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partition {
    /// Exactly `k` clusters, some possibly empty.
    pub clusters: Vec<Cluster>,
    /// Within-cluster sum of squared distances to the centroids.
    ///
    /// Squares exceed the `f64` range once a member lies more than about
    /// `1e154` from its centroid; the objective is then `f64::INFINITY`
    /// while clusters and centroids remain finite.
    pub objective: f64,
    /// Number of assignment/update passes performed.
    pub iterations: usize,
    /// `false` only when an iteration ceiling stopped the run early.
    pub converged: bool,
}

/// K-means partitioner settings.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Point;
/// use fleet_routing::clustering::KMeans;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(100.0, 0.0),
///     Point::new(100.0, 1.0),
/// ];
/// let kmeans = KMeans::new(2).with_seed(7);
/// assert_eq!(kmeans.k(), 2);
/// let partition = kmeans.partition(&points).unwrap();
/// assert_eq!(partition.clusters.len(), 2);
/// for cluster in &partition.clusters {
///     assert_eq!(cluster.len(), 2);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct KMeans {
    k: usize,
    seed: u64,
    max_iterations: Option<usize>,
}

impl KMeans {
    /// Creates a partitioner for `k` clusters with seed 0 and no
    /// iteration ceiling.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            seed: 0,
            max_iterations: None,
        }
    }

    /// Sets the seed used to pick the initial centroids.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Stops after at most `max` passes even if centroids still move.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// Number of clusters.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Partitions `points` into `k` clusters.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::EmptyLocationSet`] if `points` is empty
    /// - [`RoutingError::InvalidClusterCount`] if `k` is outside `1..=n`
    /// - [`RoutingError::NonFinitePoint`] if a coordinate is NaN or infinite
    pub fn partition(&self, points: &[Point]) -> Result<Partition> {
        let n = points.len();
        if n == 0 {
            return Err(RoutingError::EmptyLocationSet);
        }
        if self.k == 0 || self.k > n {
            return Err(RoutingError::InvalidClusterCount { k: self.k, n });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(RoutingError::NonFinitePoint { index });
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut centroids: Vec<Point> = sample(&mut rng, n, self.k)
            .into_iter()
            .map(|i| points[i])
            .collect();

        let mut iterations = 0;
        let mut converged = false;
        let mut groups;

        loop {
            groups = assign(points, &centroids);
            let next = update(points, &groups, &centroids);
            iterations += 1;

            let moved = next != centroids;
            centroids = next;
            trace!(iteration = iterations, moved, "kmeans pass");

            if !moved {
                converged = true;
                break;
            }
            if self.max_iterations.is_some_and(|max| iterations >= max) {
                warn!(
                    k = self.k,
                    iterations, "kmeans stopped at iteration ceiling before convergence"
                );
                break;
            }
        }

        let clusters: Vec<Cluster> = centroids
            .into_iter()
            .zip(groups)
            .map(|(c, members)| Cluster::new(c, members))
            .collect();
        let objective = objective(points, &clusters);

        debug!(k = self.k, n, iterations, objective, converged, "kmeans finished");

        Ok(Partition {
            clusters,
            objective,
            iterations,
            converged,
        })
    }
}

/// Partitions `points` into `k` clusters with the given seed and no
/// iteration ceiling.
///
/// Equivalent to `KMeans::new(k).with_seed(seed).partition(points)`.
pub fn kmeans(points: &[Point], k: usize, seed: u64) -> Result<Partition> {
    KMeans::new(k).with_seed(seed).partition(points)
}

/// Coordinate-wise mean of `points`, or `None` if there are none.
///
/// Each coordinate is divided by the count before summing so the result
/// stays finite for any finite input.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Point;
/// use fleet_routing::clustering::centroid;
///
/// let c = centroid(&[Point::new(0.0, 0.0), Point::new(2.0, 4.0)]).unwrap();
/// assert_eq!(c, Point::new(1.0, 2.0));
/// ```
pub fn centroid(points: &[Point]) -> Option<Point> {
    mean(points.iter())
}

fn mean<'a>(points: impl ExactSizeIterator<Item = &'a Point>) -> Option<Point> {
    let n = points.len();
    if n == 0 {
        return None;
    }
    let count = n as f64;
    let (sx, sy) = points.fold((0.0, 0.0), |(sx, sy), p| {
        (sx + p.x() / count, sy + p.y() / count)
    });
    Some(Point::new(sx, sy))
}

/// Assigns every point to the first nearest centroid.
fn assign(points: &[Point], centroids: &[Point]) -> Vec<Vec<usize>> {
    let mut groups = vec![Vec::new(); centroids.len()];
    for (i, p) in points.iter().enumerate() {
        let mut best = 0;
        let mut best_dist = euclidean(p, &centroids[0]);
        for (j, c) in centroids.iter().enumerate().skip(1) {
            let d = euclidean(p, c);
            if d < best_dist {
                best = j;
                best_dist = d;
            }
        }
        groups[best].push(i);
    }
    groups
}

/// Recomputes centroids from the current groups; empty groups keep theirs.
fn update(points: &[Point], groups: &[Vec<usize>], previous: &[Point]) -> Vec<Point> {
    groups
        .iter()
        .zip(previous)
        .map(|(members, &prev)| mean(members.iter().map(|&i| &points[i])).unwrap_or(prev))
        .collect()
}

fn objective(points: &[Point], clusters: &[Cluster]) -> f64 {
    clusters
        .iter()
        .map(|c| {
            let center = c.centroid();
            c.members()
                .iter()
                .map(|&i| euclidean(&points[i], &center).powi(2))
                .sum::<f64>()
        })
        .sum()
}
