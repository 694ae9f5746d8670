//! `warrantrack-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the purchase,
//! warranty, return-window and receipt modules (no infrastructure concerns).

pub mod aggregate;
pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod notes;
pub mod period;
pub mod value_object;
pub mod wire;

pub use aggregate::{AggregateRoot, ExpectedVersion};
pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{PurchaseId, ReceiptId, ReturnWindowId, UserId, WarrantyId};
pub use money::{Percentage, round_money};
pub use notes::Notes;
pub use period::{calendar_days_between, ensure_period};
pub use value_object::ValueObject;
