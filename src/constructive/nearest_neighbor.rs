//! Randomized nearest-neighbor tour construction with branch-and-bound
//! pruning.
//!
//! Builds a closed tour greedily: from the current location, move to the
//! nearest unvisited one. With a small probability the second-nearest is
//! taken instead, so repeated runs explore different tours. The running
//! length is compared against an incumbent bound after every edge and the
//! attempt is abandoned as soon as it can no longer beat it.
//!
//! # Complexity
//!
//! O(n²) per attempt, often much less once the bound is tight.
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An Analysis of
//! Several Heuristics for the Traveling Salesman Problem",
//! *SIAM Journal on Computing* 6(3), 563-581.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::distance::{euclidean, tour_length};
use crate::error::{Result, RoutingError};
use crate::models::{Point, Tour};

/// Default probability of taking the second-nearest candidate.
pub const DEFAULT_DETOUR_PROBABILITY: f64 = 0.1;

/// Outcome of one construction attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Construction {
    /// A complete tour strictly shorter than the bound.
    Complete {
        /// Visit order over the input points.
        tour: Tour,
        /// Closed length including the return edge.
        distance: f64,
    },
    /// The partial tour reached the bound and was abandoned.
    Pruned,
}

impl Construction {
    /// Returns `true` if the attempt produced a tour.
    pub fn is_complete(&self) -> bool {
        matches!(self, Construction::Complete { .. })
    }

    /// Tour length, or `None` if pruned.
    pub fn distance(&self) -> Option<f64> {
        match self {
            Construction::Complete { distance, .. } => Some(*distance),
            Construction::Pruned => None,
        }
    }

    /// Converts into `(tour, distance)`, or `None` if pruned.
    pub fn into_tour(self) -> Option<(Tour, f64)> {
        match self {
            Construction::Complete { tour, distance } => Some((tour, distance)),
            Construction::Pruned => None,
        }
    }
}

/// Randomized nearest-neighbor tour constructor.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Point;
/// use fleet_routing::constructive::{Construction, NearestNeighbor};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 10.0),
///     Point::new(10.0, 10.0),
///     Point::new(10.0, 0.0),
/// ];
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let nn = NearestNeighbor::new();
///
/// let result = nn.construct(&points, 0, f64::INFINITY, &mut rng).unwrap();
/// assert!(result.is_complete());
///
/// // A zero bound prunes on the first edge.
/// let pruned = nn.construct(&points, 0, 0.0, &mut rng).unwrap();
/// assert_eq!(pruned, Construction::Pruned);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NearestNeighbor {
    detour_probability: f64,
}

impl Default for NearestNeighbor {
    fn default() -> Self {
        Self::new()
    }
}

impl NearestNeighbor {
    /// Creates a constructor with the default detour probability (0.1).
    pub fn new() -> Self {
        Self {
            detour_probability: DEFAULT_DETOUR_PROBABILITY,
        }
    }

    /// Sets the probability of taking the second-nearest candidate.
    ///
    /// Values are clamped to `[0, 1]`; zero gives the plain greedy tour.
    pub fn with_detour_probability(mut self, p: f64) -> Self {
        self.detour_probability = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        self
    }

    /// Probability of taking the second-nearest candidate.
    pub fn detour_probability(&self) -> f64 {
        self.detour_probability
    }

    /// Builds one tour over `points` starting at `start`.
    ///
    /// Returns [`Construction::Pruned`] as soon as the running length
    /// reaches `bound`, including after the closing edge. Pass
    /// `f64::INFINITY` for an unbounded attempt. A single location always
    /// yields the trivial tour `[0]` of length zero.
    ///
    /// # Errors
    ///
    /// [`RoutingError::InvalidStart`] if `start >= points.len()`.
    pub fn construct<R: Rng>(
        &self,
        points: &[Point],
        start: usize,
        bound: f64,
        rng: &mut R,
    ) -> Result<Construction> {
        let n = points.len();
        if start >= n {
            return Err(RoutingError::InvalidStart { start, n });
        }
        if n == 1 {
            return Ok(Construction::Complete {
                tour: Tour::new(vec![start]),
                distance: 0.0,
            });
        }

        let mut unvisited: Vec<usize> = (0..n).filter(|&i| i != start).collect();
        let mut order = Vec::with_capacity(n);
        order.push(start);
        let mut current = start;
        let mut length = 0.0;

        while !unvisited.is_empty() {
            let (pos, d) = if unvisited.len() == 1 {
                (0, euclidean(&points[current], &points[unvisited[0]]))
            } else {
                let (nearest, second) = two_nearest(points, current, &unvisited);
                if rng.random_bool(self.detour_probability) {
                    second
                } else {
                    nearest
                }
            };

            length += d;
            if length >= bound {
                return Ok(Construction::Pruned);
            }

            current = unvisited.remove(pos);
            order.push(current);
        }

        length += euclidean(&points[current], &points[start]);
        if length >= bound {
            return Ok(Construction::Pruned);
        }

        Ok(Construction::Complete {
            tour: Tour::new(order),
            distance: length,
        })
    }
}

/// Builds the plain greedy nearest-neighbor tour from `start` and returns
/// it with its closed length.
///
/// # Errors
///
/// [`RoutingError::InvalidStart`] if `start >= points.len()`.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Point;
/// use fleet_routing::constructive::nearest_neighbor_tour;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(3.0, 0.0),
///     Point::new(1.0, 0.0),
/// ];
/// let (tour, len) = nearest_neighbor_tour(&points, 0).unwrap();
/// assert_eq!(tour.indices(), &[0, 2, 1]);
/// assert!((len - 6.0).abs() < 1e-10);
/// ```
pub fn nearest_neighbor_tour(points: &[Point], start: usize) -> Result<(Tour, f64)> {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let greedy = NearestNeighbor::new().with_detour_probability(0.0);
    match greedy.construct(points, start, f64::INFINITY, &mut rng)? {
        Construction::Complete { tour, distance } => Ok((tour, distance)),
        // Only reachable if the closed length overflows to infinity.
        Construction::Pruned => {
            let tour = Tour::new(
                std::iter::once(start)
                    .chain((0..points.len()).filter(|&i| i != start))
                    .collect(),
            );
            let distance = tour_length(points, &tour);
            Ok((tour, distance))
        }
    }
}

/// Positions in `candidates` of the nearest and second-nearest location to
/// `from`, with their distances. Exact ties keep candidate order.
///
/// Requires at least two candidates.
fn two_nearest(
    points: &[Point],
    from: usize,
    candidates: &[usize],
) -> ((usize, f64), (usize, f64)) {
    let origin = &points[from];
    let mut nearest = (usize::MAX, f64::INFINITY);
    let mut second = (usize::MAX, f64::INFINITY);
    for (pos, &c) in candidates.iter().enumerate() {
        let d = euclidean(origin, &points[c]);
        if nearest.0 == usize::MAX || d < nearest.1 {
            second = nearest;
            nearest = (pos, d);
        } else if second.0 == usize::MAX || d < second.1 {
            second = (pos, d);
        }
    }
    (nearest, second)
}
