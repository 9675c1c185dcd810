//! Anytime search settings.

use std::time::Duration;

use crate::constructive::{Baseline, DEFAULT_DETOUR_PROBABILITY};

/// Default wall-clock budget for one search.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(30);

/// Configuration for [`AnytimeSearch`](super::AnytimeSearch).
///
/// A search stops at whichever comes first: the time budget, the attempt
/// ceiling, or cancellation. With neither a budget nor a ceiling it runs
/// until cancelled.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fleet_routing::constructive::Baseline;
/// use fleet_routing::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_time_budget(Duration::from_millis(200))
///     .with_max_attempts(1_000)
///     .with_baseline(Baseline::Shuffle)
///     .with_seed(7);
/// assert_eq!(config.max_attempts, Some(1_000));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Wall-clock budget measured from the start of the search.
    pub time_budget: Option<Duration>,
    /// Maximum number of construction attempts.
    pub max_attempts: Option<u64>,
    /// Tour that seeds the pruning bound.
    pub baseline: Baseline,
    /// Probability of taking the second-nearest candidate.
    pub detour_probability: f64,
    /// Polish the best tour with 2-opt after the loop ends.
    pub two_opt: bool,
    /// Seed for the construction RNG.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget: Some(DEFAULT_TIME_BUDGET),
            max_attempts: None,
            baseline: Baseline::default(),
            detour_probability: DEFAULT_DETOUR_PROBABILITY,
            two_opt: false,
            seed: 0,
        }
    }
}

impl SearchConfig {
    /// Sets the wall-clock budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Removes the wall-clock budget.
    pub fn without_time_budget(mut self) -> Self {
        self.time_budget = None;
        self
    }

    /// Sets the attempt ceiling.
    pub fn with_max_attempts(mut self, max: u64) -> Self {
        self.max_attempts = Some(max);
        self
    }

    /// Sets the baseline tour.
    pub fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the detour probability.
    pub fn with_detour_probability(mut self, p: f64) -> Self {
        self.detour_probability = p;
        self
    }

    /// Enables or disables final 2-opt polishing.
    pub fn with_two_opt(mut self, enabled: bool) -> Self {
        self.two_opt = enabled;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SearchConfig::default();
        assert_eq!(c.time_budget, Some(Duration::from_secs(30)));
        assert_eq!(c.max_attempts, None);
        assert_eq!(c.baseline, Baseline::Identity);
        assert_eq!(c.detour_probability, 0.1);
        assert!(!c.two_opt);
    }

    #[test]
    fn test_without_time_budget() {
        let c = SearchConfig::default().without_time_budget();
        assert!(c.time_budget.is_none());
    }
}
