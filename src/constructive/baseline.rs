//! Strawman tours used to seed the pruning bound before an anytime search.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distance::tour_length;
use crate::error::{Result, RoutingError};
use crate::models::{Point, Tour};

use super::nearest_neighbor_tour;

/// How the incumbent is seeded before the anytime loop starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    /// Visit locations in index order.
    #[default]
    Identity,
    /// Visit locations in one random order.
    Shuffle,
    /// Plain greedy nearest-neighbor tour from the search start.
    Greedy,
}

impl Baseline {
    /// Builds the baseline tour over `points` with its closed length.
    ///
    /// `start` is only used by [`Baseline::Greedy`] but is validated for
    /// every variant.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::EmptyLocationSet`] if `points` is empty
    /// - [`RoutingError::InvalidStart`] if `start >= points.len()`
    ///
    /// # Examples
    ///
    /// ```
    /// use fleet_routing::models::Point;
    /// use fleet_routing::constructive::Baseline;
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let points = vec![Point::new(0.0, 0.0), Point::new(0.0, 2.0)];
    /// let mut rng = ChaCha8Rng::seed_from_u64(0);
    /// let (tour, len) = Baseline::Identity.build(&points, 0, &mut rng).unwrap();
    /// assert_eq!(tour.indices(), &[0, 1]);
    /// assert!((len - 4.0).abs() < 1e-10);
    /// ```
    pub fn build<R: Rng>(
        &self,
        points: &[Point],
        start: usize,
        rng: &mut R,
    ) -> Result<(Tour, f64)> {
        let n = points.len();
        if n == 0 {
            return Err(RoutingError::EmptyLocationSet);
        }
        if start >= n {
            return Err(RoutingError::InvalidStart { start, n });
        }
        let tour = match self {
            Baseline::Identity => identity_tour(n),
            Baseline::Shuffle => shuffled_tour(n, rng),
            Baseline::Greedy => return nearest_neighbor_tour(points, start),
        };
        let distance = tour_length(points, &tour);
        Ok((tour, distance))
    }
}

/// The tour `0, 1, ..., n-1`.
pub fn identity_tour(n: usize) -> Tour {
    Tour::new((0..n).collect())
}

/// A uniformly random permutation of `0..n`.
pub fn shuffled_tour<R: Rng>(n: usize, rng: &mut R) -> Tour {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    Tour::new(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
        ]
    }

    #[test]
    fn test_identity_baseline() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let (tour, len) = Baseline::Identity.build(&square(), 0, &mut rng).expect("valid");
        assert_eq!(tour.indices(), &[0, 1, 2, 3]);
        // two diagonals and two sides
        let expected = 2.0 * 200f64.sqrt() + 20.0;
        assert!((len - expected).abs() < 1e-10);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for n in 0..30 {
            assert!(shuffled_tour(n, &mut rng).is_permutation_of(n));
        }
    }

    #[test]
    fn test_shuffle_reproducible() {
        let a = shuffled_tour(50, &mut ChaCha8Rng::seed_from_u64(3));
        let b = shuffled_tour(50, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_greedy_baseline_is_perimeter() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let (tour, len) = Baseline::Greedy.build(&square(), 1, &mut rng).expect("valid");
        assert_eq!(tour.start(), Some(1));
        assert!((len - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_invalid_input() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            Baseline::Identity.build(&[], 0, &mut rng),
            Err(RoutingError::EmptyLocationSet)
        ));
        assert!(matches!(
            Baseline::Shuffle.build(&square(), 9, &mut rng),
            Err(RoutingError::InvalidStart { start: 9, n: 4 })
        ));
    }

    #[test]
    fn test_single_point_baseline() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let (tour, len) = Baseline::Shuffle
            .build(&[Point::new(1.0, 1.0)], 0, &mut rng)
            .expect("valid");
        assert_eq!(tour.indices(), &[0]);
        assert_eq!(len, 0.0);
    }
}
