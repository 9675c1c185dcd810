//! Fleet planning: partition, route each cluster, total per fleet size.

mod config;
mod fleet;

pub use config::PlannerConfig;
pub use fleet::{FleetPlan, Planner, PlannerReport, Progress, RoutePlan};
