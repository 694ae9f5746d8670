//! Purchases domain module.
//!
//! `Purchase` is the aggregate root of one consumer purchase and exclusively
//! owns its warranties, return windows and receipts. Implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage); callers load an
//! aggregate, call a mutator or query with their own `now`, and persist it.

pub mod purchase;

pub use purchase::{NewPurchase, ProductCategory, Purchase, PurchaseRecord, PurchaseStatus};
