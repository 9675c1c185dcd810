//! 2-opt improvement of a closed tour.
//!
//! # Algorithm
//!
//! For each pair of positions `1 <= i < j < n`, compute the change in length
//! from reversing the segment `t[i..=j]`:
//!
//! ```text
//! delta = d(t[i-1], t[j]) + d(t[i], t[j+1]) - d(t[i-1], t[i]) - d(t[j], t[j+1])
//! ```
//!
//! where `t[n]` wraps to `t[0]`. If delta < 0, reverse the segment and
//! continue (first-improvement). Repeat until no improving move remains.
//! Position 0 is never moved, so the tour keeps its start.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::{euclidean, tour_length};
use crate::models::{Point, Tour};

/// Applies 2-opt to a closed tour over `points` and returns the improved
/// tour with its length.
///
/// The result is never longer than the input.
///
/// # Panics
///
/// Panics if a tour index is out of bounds for `points`.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{Point, Tour};
/// use fleet_routing::local_search::two_opt_improve;
///
/// let square = vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 10.0),
///     Point::new(10.0, 10.0),
///     Point::new(10.0, 0.0),
/// ];
/// // 0 -> 2 -> 1 -> 3 crosses itself
/// let (improved, len) = two_opt_improve(&square, &Tour::new(vec![0, 2, 1, 3]));
/// assert!((len - 40.0).abs() < 1e-10);
/// assert_eq!(improved.start(), Some(0));
/// ```
pub fn two_opt_improve(points: &[Point], tour: &Tour) -> (Tour, f64) {
    let mut current = tour.indices().to_vec();
    let n = current.len();
    if n < 4 {
        return (tour.clone(), tour_length(points, tour));
    }

    let mut improved = true;
    while improved {
        improved = false;
        for i in 1..n - 1 {
            for j in i + 1..n {
                if two_opt_delta(points, &current, i, j) < -1e-10 {
                    current[i..=j].reverse();
                    improved = true;
                }
            }
        }
    }

    let result = Tour::new(current);
    let dist = tour_length(points, &result);
    (result, dist)
}

/// Length change from reversing `tour[i..=j]` in a closed tour.
fn two_opt_delta(points: &[Point], tour: &[usize], i: usize, j: usize) -> f64 {
    let n = tour.len();
    let prev_i = &points[tour[i - 1]];
    let next_j = &points[tour[(j + 1) % n]];
    let first = &points[tour[i]];
    let last = &points[tour[j]];

    let old_cost = euclidean(prev_i, first) + euclidean(last, next_j);
    let new_cost = euclidean(prev_i, last) + euclidean(first, next_j);

    new_cost - old_cost
}
