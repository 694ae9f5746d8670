//! Money and percentages.
//!
//! Amounts are `rust_decimal::Decimal`. Derived amounts are rounded to cents
//! with banker's rounding so repeated computations stay deterministic.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Decimal places kept on computed amounts.
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to cents, half-to-even (`2.345 -> 2.34`, `2.355 -> 2.36`).
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// A percentage in `0..=100`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percentage(Decimal);

impl ValueObject for Percentage {}

impl Percentage {
    pub fn new(value: Decimal) -> DomainResult<Self> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(DomainError::validation(format!(
                "percentage must be within 0..=100 (got {value})"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// `amount * self / 100`, rounded to cents.
    ///
    /// Never panics: when `amount * self` overflows, the amount is scaled down
    /// first. The result is at most `amount`, so that path cannot overflow.
    pub fn of(&self, amount: Decimal) -> Decimal {
        let share = match amount.checked_mul(self.0) {
            Some(product) => product / Decimal::ONE_HUNDRED,
            None => amount / Decimal::ONE_HUNDRED * self.0,
        };
        round_money(share)
    }
}

impl TryFrom<Decimal> for Percentage {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentage> for Decimal {
    fn from(value: Percentage) -> Self {
        value.0
    }
}

impl core::fmt::Display for Percentage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.0)
    }
}
