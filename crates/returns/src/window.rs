use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use warrantrack_core::{
    DomainResult, Entity, Notes, Percentage, PurchaseId, ReturnWindowId, calendar_days_between,
    ensure_period, impl_wire_codes,
};

/// A window is "closing soon" when at most this many days remain.
pub const CLOSING_SOON_DAYS: i64 = 7;

/// Return window status lifecycle.
///
/// ```text
/// Open -> Used | Expired
/// (any but Voided) -> Voided
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnWindowStatus {
    Open,
    Used,
    Expired,
    Voided,
}

impl_wire_codes!(ReturnWindowStatus, "ReturnWindowStatus", {
    Open => 0,
    Used => 1,
    Expired => 2,
    Voided => 3,
});

impl ReturnWindowStatus {
    pub fn can_transition_to(self, next: ReturnWindowStatus) -> bool {
        use ReturnWindowStatus::*;
        matches!((self, next), (Open, Used) | (Open, Expired)) || (next == Voided && self != Voided)
    }

    pub fn is_terminal(self) -> bool {
        self != ReturnWindowStatus::Open
    }
}

/// Input for opening a return window on a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReturnWindow {
    pub return_window_id: ReturnWindowId,
    pub purchase_id: PurchaseId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub duration_days: u32,
    pub policy_details: String,
    pub conditions: Option<String>,
    pub restocking_fee_percent: Option<Decimal>,
    pub notes: Option<String>,
}

/// Persisted field set of a return window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnWindowRecord {
    pub return_window_id: ReturnWindowId,
    pub purchase_id: PurchaseId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub duration_days: u32,
    pub policy_details: String,
    pub conditions: Option<String>,
    pub restocking_fee_percent: Option<Decimal>,
    pub status: i32,
    pub notes: Option<String>,
}

/// Entity: ReturnWindow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnWindow {
    id: ReturnWindowId,
    purchase_id: PurchaseId,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    duration_days: u32,
    policy_details: String,
    conditions: Option<String>,
    restocking_fee_percent: Option<Percentage>,
    status: ReturnWindowStatus,
    notes: Notes,
}

impl ReturnWindow {
    /// Open a new return window.
    ///
    /// Rejects `end_date < start_date` and fee percentages outside `0..=100`.
    pub fn new(input: NewReturnWindow) -> DomainResult<Self> {
        ensure_period(input.start_date, input.end_date)?;
        let restocking_fee_percent = input
            .restocking_fee_percent
            .map(Percentage::new)
            .transpose()?;

        Ok(Self {
            id: input.return_window_id,
            purchase_id: input.purchase_id,
            start_date: input.start_date,
            end_date: input.end_date,
            duration_days: input.duration_days,
            policy_details: input.policy_details,
            conditions: input.conditions,
            restocking_fee_percent,
            status: ReturnWindowStatus::Open,
            notes: Notes::from_option(input.notes),
        })
    }

    /// Rehydrate from persisted fields. The period is taken as stored.
    pub fn from_record(record: ReturnWindowRecord) -> DomainResult<Self> {
        Ok(Self {
            id: record.return_window_id,
            purchase_id: record.purchase_id,
            start_date: record.start_date,
            end_date: record.end_date,
            duration_days: record.duration_days,
            policy_details: record.policy_details,
            conditions: record.conditions,
            restocking_fee_percent: record
                .restocking_fee_percent
                .map(Percentage::new)
                .transpose()?,
            status: ReturnWindowStatus::try_from(record.status)?,
            notes: Notes::from_option(record.notes),
        })
    }

    pub fn to_record(&self) -> ReturnWindowRecord {
        ReturnWindowRecord {
            return_window_id: self.id,
            purchase_id: self.purchase_id,
            start_date: self.start_date,
            end_date: self.end_date,
            duration_days: self.duration_days,
            policy_details: self.policy_details.clone(),
            conditions: self.conditions.clone(),
            restocking_fee_percent: self.restocking_fee_percent.map(|p| p.value()),
            status: self.status.code(),
            notes: self.notes.as_deref().map(str::to_string),
        }
    }

    pub fn id_typed(&self) -> ReturnWindowId {
        self.id
    }

    pub fn purchase_id(&self) -> PurchaseId {
        self.purchase_id
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn policy_details(&self) -> &str {
        &self.policy_details
    }

    pub fn conditions(&self) -> Option<&str> {
        self.conditions.as_deref()
    }

    pub fn restocking_fee_percent(&self) -> Option<Percentage> {
        self.restocking_fee_percent
    }

    pub fn status(&self) -> ReturnWindowStatus {
        self.status
    }

    pub fn notes(&self) -> &Notes {
        &self.notes
    }

    /// Status is `Open` and `start_date <= now <= end_date`.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.status == ReturnWindowStatus::Open && self.start_date <= now && now <= self.end_date
    }

    pub fn is_closing_soon(&self, now: DateTime<Utc>) -> bool {
        self.is_closing_within(now, Duration::days(CLOSING_SOON_DAYS))
    }

    pub fn is_closing_within(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.is_open(now) && self.end_date - now <= window
    }

    /// Calendar days until the window closes; 0 unless currently open.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        if !self.is_open(now) {
            return 0;
        }
        calendar_days_between(now, self.end_date).max(0)
    }

    /// Whether a sweep running at `now` should expire this window.
    pub fn is_lapsed(&self, now: DateTime<Utc>) -> bool {
        self.status == ReturnWindowStatus::Open && now > self.end_date
    }

    /// Fee withheld on a return at `purchase_price`, rounded half-to-even at
    /// cents. Exactly zero when the policy has no restocking fee.
    pub fn calculate_restocking_fee(&self, purchase_price: Decimal) -> Decimal {
        match self.restocking_fee_percent {
            Some(percent) => percent.of(purchase_price),
            None => Decimal::ZERO,
        }
    }

    pub fn mark_as_used(&mut self) {
        self.transition(ReturnWindowStatus::Used, "mark_as_used");
    }

    pub fn mark_as_expired(&mut self) {
        self.transition(ReturnWindowStatus::Expired, "mark_as_expired");
    }

    pub fn void_window(&mut self, reason: &str) {
        self.transition(ReturnWindowStatus::Voided, "void_window");
        self.notes.append_reason("Voided", reason);
    }

    /// Replace the eligibility period. Not validated.
    pub fn set_period(&mut self, start_date: DateTime<Utc>, end_date: DateTime<Utc>) {
        self.start_date = start_date;
        self.end_date = end_date;
    }

    fn transition(&mut self, next: ReturnWindowStatus, action: &'static str) {
        if self.status != next && !self.status.can_transition_to(next) {
            tracing::warn!(
                return_window_id = %self.id,
                from = ?self.status,
                to = ?next,
                action,
                "return window transition outside lifecycle applied"
            );
        } else {
            tracing::debug!(
                return_window_id = %self.id,
                to = ?next,
                action,
                "return window transition"
            );
        }
        self.status = next;
    }
}

impl Entity for ReturnWindow {
    type Id = ReturnWindowId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
