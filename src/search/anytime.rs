//! Anytime tour search.
//!
//! Repeats randomized nearest-neighbor construction, each attempt bounded by
//! the best length found so far, until the time budget runs out, the attempt
//! ceiling is reached, or the cancellation token is set. Cancellation is
//! checked before each attempt; an attempt in progress always finishes or
//! prunes itself first.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::constructive::{Construction, NearestNeighbor};
use crate::error::{Result, RoutingError};
use crate::local_search::two_opt_improve;
use crate::models::{Point, Tour};

use super::{CancellationToken, SearchConfig};

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The time budget elapsed.
    Deadline,
    /// The cancellation token was set.
    Aborted,
    /// The attempt ceiling was reached.
    AttemptLimit,
    /// Three or fewer locations: every tour has the same length.
    Exhaustive,
}

/// Best tour found by a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Best tour over the searched points.
    pub tour: Tour,
    /// Closed length of `tour`.
    pub distance: f64,
    /// Length of the baseline that seeded the bound.
    pub baseline_distance: f64,
    /// Improving lengths in the order they were found.
    pub improvements: Vec<f64>,
    /// Number of construction attempts made.
    pub attempts: u64,
    /// Why the loop ended.
    pub stop: StopReason,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Incumbent of one search. Its distance never increases.
#[derive(Debug)]
struct SearchState {
    best_tour: Tour,
    best_distance: f64,
    improvements: Vec<f64>,
}

impl SearchState {
    fn new(tour: Tour, distance: f64) -> Self {
        Self {
            best_tour: tour,
            best_distance: distance,
            improvements: Vec::new(),
        }
    }

    /// Accepts `tour` if it is strictly shorter than the incumbent.
    fn offer(&mut self, tour: Tour, distance: f64) -> bool {
        if distance < self.best_distance {
            self.best_tour = tour;
            self.best_distance = distance;
            self.improvements.push(distance);
            true
        } else {
            false
        }
    }
}

/// Wall-clock deadline captured once when a search starts.
#[derive(Debug, Clone, Copy)]
struct Deadline {
    started: Instant,
    budget: Option<Duration>,
}

impl Deadline {
    fn start(budget: Option<Duration>) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn expired(&self) -> bool {
        self.budget.is_some_and(|b| self.started.elapsed() >= b)
    }
}

/// Anytime search driver for a single location set.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fleet_routing::models::Point;
/// use fleet_routing::search::{AnytimeSearch, CancellationToken, SearchConfig, StopReason};
///
/// let points: Vec<Point> = (0..12)
///     .map(|i| {
///         let a = i as f64 * std::f64::consts::TAU / 12.0;
///         Point::new(a.cos() * 50.0, a.sin() * 50.0)
///     })
///     .collect();
///
/// let search = AnytimeSearch::new(
///     SearchConfig::default()
///         .with_time_budget(Duration::from_secs(5))
///         .with_max_attempts(200),
/// );
/// let outcome = search.run(&points, 0, &CancellationToken::new()).unwrap();
/// assert!(outcome.tour.is_permutation_of(12));
/// assert!(outcome.distance <= outcome.baseline_distance);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnytimeSearch {
    config: SearchConfig,
}

impl AnytimeSearch {
    /// Creates a search with the given configuration.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the search over `points`, starting each attempt at `start`.
    ///
    /// The returned tour always begins at `start`, including when the
    /// baseline is never beaten.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::EmptyLocationSet`] if `points` is empty
    /// - [`RoutingError::InvalidStart`] if `start >= points.len()`
    pub fn run(
        &self,
        points: &[Point],
        start: usize,
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome> {
        self.run_with_progress(points, start, cancel, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_improvement` with each new best
    /// length as soon as it is found.
    pub fn run_with_progress<F>(
        &self,
        points: &[Point],
        start: usize,
        cancel: &CancellationToken,
        mut on_improvement: F,
    ) -> Result<SearchOutcome>
    where
        F: FnMut(f64),
    {
        let n = points.len();
        if n == 0 {
            return Err(RoutingError::EmptyLocationSet);
        }
        if start >= n {
            return Err(RoutingError::InvalidStart { start, n });
        }

        let deadline = Deadline::start(self.config.time_budget);
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let constructor =
            NearestNeighbor::new().with_detour_probability(self.config.detour_probability);

        let (baseline_tour, baseline_distance) =
            self.config.baseline.build(points, start, &mut rng)?;
        let mut state = SearchState::new(baseline_tour, baseline_distance);
        info!(
            event = "search_start",
            n,
            start,
            baseline = ?self.config.baseline,
            baseline_distance,
        );

        let mut attempts: u64 = 0;
        let stop = loop {
            if n <= 3 {
                break StopReason::Exhaustive;
            }
            if cancel.is_cancelled() {
                break StopReason::Aborted;
            }
            if deadline.expired() {
                break StopReason::Deadline;
            }
            if self.config.max_attempts.is_some_and(|max| attempts >= max) {
                break StopReason::AttemptLimit;
            }

            attempts += 1;
            let result = constructor.construct(points, start, state.best_distance, &mut rng)?;
            if let Construction::Complete { tour, distance } = result {
                if state.offer(tour, distance) {
                    debug!(attempt = attempts, distance, "improved tour");
                    on_improvement(distance);
                }
            }
        };

        if self.config.two_opt {
            let (tour, distance) = two_opt_improve(points, &state.best_tour);
            if state.offer(tour, distance) {
                debug!(distance, "2-opt improved tour");
                on_improvement(distance);
            }
        }

        let tour = state.best_tour.rotated_to(start);
        let elapsed = deadline.elapsed();
        info!(
            event = "search_end",
            distance = state.best_distance,
            attempts,
            improvements = state.improvements.len(),
            stop = ?stop,
            elapsed_ms = elapsed.as_millis() as u64,
        );

        Ok(SearchOutcome {
            tour,
            distance: state.best_distance,
            baseline_distance,
            improvements: state.improvements,
            attempts,
            stop,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::Baseline;
    use crate::distance::tour_length;

    fn ring(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let a = i as f64 * std::f64::consts::TAU / n as f64;
                Point::new(100.0 * a.cos(), 100.0 * a.sin())
            })
            .collect()
    }

    fn scattered(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| Point::new((i * 73 % 101) as f64, (i * 41 % 97) as f64))
            .collect()
    }

    fn bounded(attempts: u64) -> SearchConfig {
        SearchConfig::default()
            .with_time_budget(Duration::from_secs(60))
            .with_max_attempts(attempts)
    }

    #[test]
    fn test_empty_rejected() {
        let search = AnytimeSearch::new(bounded(10));
        assert!(matches!(
            search.run(&[], 0, &CancellationToken::new()),
            Err(RoutingError::EmptyLocationSet)
        ));
    }

    #[test]
    fn test_invalid_start_rejected() {
        let search = AnytimeSearch::new(bounded(10));
        assert!(matches!(
            search.run(&ring(5), 5, &CancellationToken::new()),
            Err(RoutingError::InvalidStart { start: 5, n: 5 })
        ));
    }

    #[test]
    fn test_single_point() {
        let search = AnytimeSearch::new(SearchConfig::default());
        let outcome = search
            .run(&[Point::new(1.0, 2.0)], 0, &CancellationToken::new())
            .expect("valid");
        assert_eq!(outcome.tour.indices(), &[0]);
        assert_eq!(outcome.distance, 0.0);
        assert_eq!(outcome.stop, StopReason::Exhaustive);
        assert_eq!(outcome.attempts, 0);
    }

    #[test]
    fn test_attempt_limit() {
        let search = AnytimeSearch::new(bounded(25));
        let outcome = search
            .run(&scattered(30), 0, &CancellationToken::new())
            .expect("valid");
        assert_eq!(outcome.stop, StopReason::AttemptLimit);
        assert_eq!(outcome.attempts, 25);
        assert!(outcome.tour.is_permutation_of(30));
    }

    #[test]
    fn test_improvements_strictly_decrease() {
        let points = scattered(40);
        let search = AnytimeSearch::new(bounded(300).with_baseline(Baseline::Shuffle));
        let mut seen = Vec::new();
        let outcome = search
            .run_with_progress(&points, 0, &CancellationToken::new(), |d| seen.push(d))
            .expect("valid");
        assert_eq!(seen, outcome.improvements);
        assert!(!seen.is_empty());
        assert!(seen[0] < outcome.baseline_distance);
        for w in seen.windows(2) {
            assert!(w[1] < w[0]);
        }
        assert_eq!(*seen.last().expect("non-empty"), outcome.distance);
    }

    #[test]
    fn test_distance_matches_tour() {
        let points = scattered(25);
        let search = AnytimeSearch::new(bounded(100).with_seed(3));
        let outcome = search
            .run(&points, 4, &CancellationToken::new())
            .expect("valid");
        let recomputed = tour_length(&points, &outcome.tour);
        assert!((recomputed - outcome.distance).abs() < 1e-9);
    }

    #[test]
    fn test_pre_cancelled_returns_baseline() {
        let token = CancellationToken::new();
        token.cancel();
        let points = ring(8);
        let search = AnytimeSearch::new(SearchConfig::default());
        let outcome = search.run(&points, 0, &token).expect("valid");
        assert_eq!(outcome.stop, StopReason::Aborted);
        assert_eq!(outcome.attempts, 0);
        assert_eq!(outcome.tour.indices(), &[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(outcome.distance, outcome.baseline_distance);
    }

    #[test]
    fn test_deadline_stops_search() {
        let search = AnytimeSearch::new(
            SearchConfig::default().with_time_budget(Duration::from_millis(20)),
        );
        let outcome = search
            .run(&scattered(20), 0, &CancellationToken::new())
            .expect("valid");
        assert_eq!(outcome.stop, StopReason::Deadline);
        assert!(outcome.elapsed >= Duration::from_millis(20));
        assert!(outcome.tour.is_permutation_of(20));
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let token = CancellationToken::new();
        let remote = token.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            remote.cancel();
        });
        let search = AnytimeSearch::new(SearchConfig::default().without_time_budget());
        let outcome = search.run(&scattered(30), 0, &token).expect("valid");
        handle.join().expect("canceller thread");
        assert_eq!(outcome.stop, StopReason::Aborted);
        assert!(outcome.tour.is_permutation_of(30));
    }

    #[test]
    fn test_ring_reaches_perimeter() {
        // Greedy from any vertex of a convex ring walks the hull.
        let points = ring(10);
        let perimeter = tour_length(&points, &Tour::new((0..10).collect()));
        let search = AnytimeSearch::new(bounded(200).with_baseline(Baseline::Shuffle));
        let outcome = search
            .run(&points, 0, &CancellationToken::new())
            .expect("valid");
        assert!((outcome.distance - perimeter).abs() < 1e-6);
    }

    #[test]
    fn test_tour_begins_at_start_when_baseline_wins() {
        let points = ring(8);
        let search = AnytimeSearch::new(bounded(0));
        let outcome = search
            .run(&points, 5, &CancellationToken::new())
            .expect("valid");
        assert!(outcome.improvements.is_empty());
        assert_eq!(outcome.tour.indices(), &[5, 6, 7, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_tour_begins_at_start_for_small_sets() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 3.0),
        ];
        for baseline in [Baseline::Identity, Baseline::Shuffle, Baseline::Greedy] {
            let search = AnytimeSearch::new(bounded(10).with_baseline(baseline));
            let outcome = search
                .run(&points, 2, &CancellationToken::new())
                .expect("valid");
            assert_eq!(outcome.stop, StopReason::Exhaustive);
            assert_eq!(outcome.tour.start(), Some(2));
            assert!((outcome.distance - 12.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_same_seed_reproducible() {
        let points = scattered(35);
        let search = AnytimeSearch::new(bounded(150).with_seed(21));
        let a = search.run(&points, 0, &CancellationToken::new()).expect("valid");
        let b = search.run(&points, 0, &CancellationToken::new()).expect("valid");
        assert_eq!(a.tour, b.tour);
        assert_eq!(a.improvements, b.improvements);
    }

    #[test]
    fn test_two_opt_never_worsens() {
        let points = scattered(40);
        let plain = AnytimeSearch::new(bounded(50).with_seed(5))
            .run(&points, 0, &CancellationToken::new())
            .expect("valid");
        let polished = AnytimeSearch::new(bounded(50).with_seed(5).with_two_opt(true))
            .run(&points, 0, &CancellationToken::new())
            .expect("valid");
        assert!(polished.distance <= plain.distance + 1e-10);
        assert!(polished.tour.is_permutation_of(40));
    }
}
