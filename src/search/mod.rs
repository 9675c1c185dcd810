//! Anytime search over tour constructions.
//!
//! - [`AnytimeSearch`] — Repeated pruned construction under a deadline
//! - [`CancellationToken`] — Shared abort flag, set by a listener thread
//! - [`spawn_abort_listener`] — Thread that cancels on one line of input

mod anytime;
mod cancel;
mod config;

pub use anytime::{AnytimeSearch, SearchOutcome, StopReason};
pub use cancel::{spawn_abort_listener, CancellationToken};
pub use config::{SearchConfig, DEFAULT_TIME_BUDGET};
