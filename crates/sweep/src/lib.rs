//! `warrantrack-sweep`
//!
//! **Responsibility:** the periodic expiry pass that moves date-lapsed
//! warranties and return windows to `Expired`.
//!
//! The domain crates expose `mark_as_expired` but never expire anything on
//! read; this crate decides *when*. It does not load or store purchases:
//! callers hand it loaded aggregates and persist the ones the report lists.

pub mod config;
pub mod sweep;

pub use config::SweepConfig;
pub use sweep::{ExpirySweep, SweepReport};
