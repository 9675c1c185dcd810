//! Local search operators for polishing tours.
//!
//! - [`two_opt`] — 2-opt segment reversal on a closed tour

mod two_opt;

pub use two_opt::two_opt_improve;
