//! Planner configuration.
//!
//! Load settings from TOML or build them in code:
//!
//! ```
//! use fleet_routing::planner::PlannerConfig;
//! use fleet_routing::constructive::Baseline;
//!
//! let config = PlannerConfig::from_toml_str(r#"
//!     max_vehicles = 3
//!     seed = 7
//!     time_budget_ms = 500
//!     baseline = "greedy"
//!     two_opt = true
//! "#).unwrap();
//!
//! assert_eq!(config.max_vehicles, 3);
//! assert_eq!(config.baseline, Baseline::Greedy);
//! assert_eq!(config.detour_probability, 0.1);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constructive::{Baseline, DEFAULT_DETOUR_PROBABILITY};
use crate::error::{Result, RoutingError};
use crate::search::SearchConfig;

/// Settings for a fleet planning run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Largest fleet size to plan for; plans are built for `1..=max_vehicles`.
    pub max_vehicles: usize,
    /// Seed for partitioning and tour construction.
    pub seed: u64,
    /// Wall-clock budget for each cluster's search, in milliseconds.
    pub time_budget_ms: Option<u64>,
    /// Ceiling on construction attempts per cluster.
    pub max_attempts: Option<u64>,
    /// Ceiling on k-means passes. Unset means run to exact convergence.
    pub max_kmeans_iterations: Option<usize>,
    /// Tour that seeds each cluster's pruning bound.
    pub baseline: Baseline,
    /// Probability of taking the second-nearest candidate.
    pub detour_probability: f64,
    /// Polish each cluster tour with 2-opt.
    pub two_opt: bool,
    /// Start each cluster tour at the member nearest its centroid.
    pub landing_pad_start: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_vehicles: 4,
            seed: 42,
            time_budget_ms: Some(30_000),
            max_attempts: None,
            max_kmeans_iterations: None,
            baseline: Baseline::default(),
            detour_probability: DEFAULT_DETOUR_PROBABILITY,
            two_opt: false,
            landing_pad_start: false,
        }
    }
}

impl PlannerConfig {
    /// Parses and validates a TOML configuration. Missing keys take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// [`RoutingError::ConfigParse`] on malformed TOML or unknown keys, and
    /// [`RoutingError::Config`] if validation fails.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the settings describe a runnable plan.
    ///
    /// # Errors
    ///
    /// [`RoutingError::Config`] if `max_vehicles` is zero or the detour
    /// probability is outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.max_vehicles == 0 {
            return Err(RoutingError::Config(
                "max_vehicles must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.detour_probability) {
            return Err(RoutingError::Config(format!(
                "detour_probability {} is outside [0, 1]",
                self.detour_probability
            )));
        }
        Ok(())
    }

    /// Sets the largest fleet size.
    pub fn with_max_vehicles(mut self, max: usize) -> Self {
        self.max_vehicles = max;
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the per-cluster time budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = Some(u64::try_from(budget.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Sets the per-cluster attempt ceiling.
    pub fn with_max_attempts(mut self, max: u64) -> Self {
        self.max_attempts = Some(max);
        self
    }

    /// Sets the k-means iteration ceiling.
    pub fn with_max_kmeans_iterations(mut self, max: usize) -> Self {
        self.max_kmeans_iterations = Some(max);
        self
    }

    /// Sets the baseline tour.
    pub fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Enables or disables 2-opt polishing.
    pub fn with_two_opt(mut self, enabled: bool) -> Self {
        self.two_opt = enabled;
        self
    }

    /// Enables or disables landing-pad start selection.
    pub fn with_landing_pad_start(mut self, enabled: bool) -> Self {
        self.landing_pad_start = enabled;
        self
    }

    /// Search settings for one cluster, seeded with `seed`.
    pub(crate) fn search_config(&self, seed: u64) -> SearchConfig {
        SearchConfig {
            time_budget: self.time_budget_ms.map(Duration::from_millis),
            max_attempts: self.max_attempts,
            baseline: self.baseline,
            detour_probability: self.detour_probability,
            two_opt: self.two_opt,
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = PlannerConfig::from_toml_str("").expect("valid");
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            PlannerConfig::from_toml_str("vehicles = 3"),
            Err(RoutingError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_zero_vehicles_rejected() {
        assert!(matches!(
            PlannerConfig::from_toml_str("max_vehicles = 0"),
            Err(RoutingError::Config(_))
        ));
    }

    #[test]
    fn test_bad_detour_rejected() {
        let config = PlannerConfig {
            detour_probability: 1.5,
            ..PlannerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_huge_time_budget_saturates() {
        let config = PlannerConfig::default().with_time_budget(Duration::MAX);
        assert_eq!(config.time_budget_ms, Some(u64::MAX));
    }

    #[test]
    fn test_search_config_mapping() {
        let config = PlannerConfig::default()
            .with_time_budget(Duration::from_millis(250))
            .with_max_attempts(10)
            .with_two_opt(true);
        let search = config.search_config(99);
        assert_eq!(search.time_budget, Some(Duration::from_millis(250)));
        assert_eq!(search.max_attempts, Some(10));
        assert!(search.two_opt);
        assert_eq!(search.seed, 99);
    }
}
