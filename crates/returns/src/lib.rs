//! Return-window domain module.
//!
//! One eligibility period for returning a purchased item, with an optional
//! restocking fee (no IO, no HTTP, no storage).

pub mod window;

pub use window::{
    CLOSING_SOON_DAYS, NewReturnWindow, ReturnWindow, ReturnWindowRecord, ReturnWindowStatus,
};
