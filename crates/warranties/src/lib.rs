//! Warranty domain module.
//!
//! A warranty is a coverage period on one purchase plus a claim sub-workflow
//! (file / approve / reject). Pure, deterministic domain logic: no IO, and
//! every time-dependent call takes `now` from the caller.

pub mod warranty;

pub use warranty::{
    EXPIRING_SOON_DAYS, NewWarranty, Warranty, WarrantyRecord, WarrantyStatus, WarrantyType,
};
