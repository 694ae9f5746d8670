use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use warrantrack_core::{
    DomainResult, Entity, Notes, PurchaseId, WarrantyId, calendar_days_between, ensure_period,
    impl_wire_codes,
};

/// A warranty is "expiring soon" when at most this many days of coverage remain.
pub const EXPIRING_SOON_DAYS: i64 = 30;

/// Who backs the coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarrantyType {
    Manufacturer,
    Extended,
    Store,
    ThirdParty,
    Limited,
    Lifetime,
}

impl_wire_codes!(WarrantyType, "WarrantyType", {
    Manufacturer => 0,
    Extended => 1,
    Store => 2,
    ThirdParty => 3,
    Limited => 4,
    Lifetime => 5,
});

/// Warranty status lifecycle.
///
/// ```text
/// Active -> ClaimFiled -> ClaimApproved | ClaimRejected
/// Active -> Expired
/// (any but Voided) -> Voided
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarrantyStatus {
    Active,
    Expired,
    ClaimFiled,
    ClaimApproved,
    ClaimRejected,
    Voided,
}

impl_wire_codes!(WarrantyStatus, "WarrantyStatus", {
    Active => 0,
    Expired => 1,
    ClaimFiled => 2,
    ClaimApproved => 3,
    ClaimRejected => 4,
    Voided => 5,
});

impl WarrantyStatus {
    /// Transition table. Mutators do not enforce it; see `Warranty::transition`.
    pub fn can_transition_to(self, next: WarrantyStatus) -> bool {
        use WarrantyStatus::*;
        matches!(
            (self, next),
            (Active, ClaimFiled)
                | (ClaimFiled, ClaimApproved)
                | (ClaimFiled, ClaimRejected)
                | (Active, Expired)
        ) || (next == Voided && self != Voided)
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            WarrantyStatus::Expired
                | WarrantyStatus::ClaimApproved
                | WarrantyStatus::ClaimRejected
                | WarrantyStatus::Voided
        )
    }
}

/// Input for registering a new warranty against a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWarranty {
    pub warranty_id: WarrantyId,
    pub purchase_id: PurchaseId,
    pub warranty_type: WarrantyType,
    pub provider: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub duration_months: u32,
    pub coverage_details: String,
    pub terms: Option<String>,
    pub registration_number: Option<String>,
    pub notes: Option<String>,
}

/// Persisted field set of a warranty; enums are stored as integer codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarrantyRecord {
    pub warranty_id: WarrantyId,
    pub purchase_id: PurchaseId,
    pub warranty_type: i32,
    pub provider: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub duration_months: u32,
    pub coverage_details: String,
    pub terms: Option<String>,
    pub registration_number: Option<String>,
    pub status: i32,
    pub claim_filed_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Entity: Warranty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warranty {
    id: WarrantyId,
    purchase_id: PurchaseId,
    warranty_type: WarrantyType,
    provider: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    duration_months: u32,
    coverage_details: String,
    terms: Option<String>,
    registration_number: Option<String>,
    status: WarrantyStatus,
    claim_filed_date: Option<DateTime<Utc>>,
    notes: Notes,
}

impl Warranty {
    /// Register a new warranty in `Active` status.
    ///
    /// Rejects `end_date < start_date`. The period is not re-checked after
    /// construction (`set_period`, `from_record`).
    pub fn new(input: NewWarranty) -> DomainResult<Self> {
        ensure_period(input.start_date, input.end_date)?;

        Ok(Self {
            id: input.warranty_id,
            purchase_id: input.purchase_id,
            warranty_type: input.warranty_type,
            provider: input.provider,
            start_date: input.start_date,
            end_date: input.end_date,
            duration_months: input.duration_months,
            coverage_details: input.coverage_details,
            terms: input.terms,
            registration_number: input.registration_number,
            status: WarrantyStatus::Active,
            claim_filed_date: None,
            notes: Notes::from_option(input.notes),
        })
    }

    /// Rehydrate from persisted fields.
    pub fn from_record(record: WarrantyRecord) -> DomainResult<Self> {
        Ok(Self {
            id: record.warranty_id,
            purchase_id: record.purchase_id,
            warranty_type: WarrantyType::try_from(record.warranty_type)?,
            provider: record.provider,
            start_date: record.start_date,
            end_date: record.end_date,
            duration_months: record.duration_months,
            coverage_details: record.coverage_details,
            terms: record.terms,
            registration_number: record.registration_number,
            status: WarrantyStatus::try_from(record.status)?,
            claim_filed_date: record.claim_filed_date,
            notes: Notes::from_option(record.notes),
        })
    }

    pub fn to_record(&self) -> WarrantyRecord {
        WarrantyRecord {
            warranty_id: self.id,
            purchase_id: self.purchase_id,
            warranty_type: self.warranty_type.code(),
            provider: self.provider.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            duration_months: self.duration_months,
            coverage_details: self.coverage_details.clone(),
            terms: self.terms.clone(),
            registration_number: self.registration_number.clone(),
            status: self.status.code(),
            claim_filed_date: self.claim_filed_date,
            notes: self.notes.as_deref().map(str::to_string),
        }
    }

    pub fn id_typed(&self) -> WarrantyId {
        self.id
    }

    pub fn purchase_id(&self) -> PurchaseId {
        self.purchase_id
    }

    pub fn warranty_type(&self) -> WarrantyType {
        self.warranty_type
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    pub fn duration_months(&self) -> u32 {
        self.duration_months
    }

    pub fn coverage_details(&self) -> &str {
        &self.coverage_details
    }

    pub fn terms(&self) -> Option<&str> {
        self.terms.as_deref()
    }

    pub fn registration_number(&self) -> Option<&str> {
        self.registration_number.as_deref()
    }

    pub fn status(&self) -> WarrantyStatus {
        self.status
    }

    pub fn claim_filed_date(&self) -> Option<DateTime<Utc>> {
        self.claim_filed_date
    }

    pub fn notes(&self) -> &Notes {
        &self.notes
    }

    /// Status is `Active` and coverage has not lapsed by date.
    ///
    /// Status is sticky until a sweep calls `mark_as_expired`, so an `Active`
    /// warranty past its end date reports `false` here while `status()` still
    /// says `Active`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.status == WarrantyStatus::Active && now <= self.end_date
    }

    pub fn is_expiring_soon(&self, now: DateTime<Utc>) -> bool {
        self.is_expiring_within(now, Duration::days(EXPIRING_SOON_DAYS))
    }

    pub fn is_expiring_within(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.is_active(now) && self.end_date - now <= window
    }

    /// Calendar days of coverage left; 0 once `now` is past the end date.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        if now > self.end_date {
            return 0;
        }
        calendar_days_between(now, self.end_date).max(0)
    }

    /// Whether a sweep running at `now` should expire this warranty.
    pub fn is_lapsed(&self, now: DateTime<Utc>) -> bool {
        self.status == WarrantyStatus::Active && now > self.end_date
    }

    pub fn file_claim(&mut self, now: DateTime<Utc>) {
        self.transition(WarrantyStatus::ClaimFiled, "file_claim");
        self.claim_filed_date = Some(now);
    }

    pub fn approve_claim(&mut self) {
        self.transition(WarrantyStatus::ClaimApproved, "approve_claim");
    }

    pub fn reject_claim(&mut self, reason: &str) {
        self.transition(WarrantyStatus::ClaimRejected, "reject_claim");
        self.notes.append_reason("Claim rejected", reason);
    }

    pub fn mark_as_expired(&mut self) {
        self.transition(WarrantyStatus::Expired, "mark_as_expired");
    }

    pub fn void_warranty(&mut self, reason: &str) {
        self.transition(WarrantyStatus::Voided, "void_warranty");
        self.notes.append_reason("Voided", reason);
    }

    /// Replace the coverage period. Not validated.
    pub fn set_period(&mut self, start_date: DateTime<Utc>, end_date: DateTime<Utc>) {
        self.start_date = start_date;
        self.end_date = end_date;
    }

    // Transitions are unconditional; off-table moves are only logged.
    fn transition(&mut self, next: WarrantyStatus, action: &'static str) {
        if self.status != next && !self.status.can_transition_to(next) {
            tracing::warn!(
                warranty_id = %self.id,
                from = ?self.status,
                to = ?next,
                action,
                "warranty transition outside lifecycle applied"
            );
        } else {
            tracing::debug!(warranty_id = %self.id, to = ?next, action, "warranty transition");
        }
        self.status = next;
    }
}

impl Entity for Warranty {
    type Id = WarrantyId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
