use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use warrantrack_core::{
    DomainError, DomainResult, Entity, Notes, PurchaseId, ReceiptId, impl_wire_codes,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptType {
    Purchase,
    Return,
    Exchange,
    WarrantyRegistration,
    Refund,
}

impl_wire_codes!(ReceiptType, "ReceiptType", {
    Purchase => 0,
    Return => 1,
    Exchange => 2,
    WarrantyRegistration => 3,
    Refund => 4,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptFormat {
    Paper,
    Pdf,
    Image,
    Email,
    Digital,
}

impl_wire_codes!(ReceiptFormat, "ReceiptFormat", {
    Paper => 0,
    Pdf => 1,
    Image => 2,
    Email => 3,
    Digital => 4,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    PayPal,
    BankTransfer,
    DigitalWallet,
    Check,
    Other,
}

impl_wire_codes!(PaymentMethod, "PaymentMethod", {
    Cash => 0,
    CreditCard => 1,
    DebitCard => 2,
    PayPal => 3,
    BankTransfer => 4,
    DigitalWallet => 5,
    Check => 6,
    Other => 7,
});

/// Receipt status lifecycle.
///
/// ```text
/// Active -> Archived | Lost
/// (any but Invalid) -> Invalid
/// ```
///
/// Verification is tracked separately (`is_verified`) and never changes status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    Active,
    Archived,
    Lost,
    Invalid,
}

impl_wire_codes!(ReceiptStatus, "ReceiptStatus", {
    Active => 0,
    Archived => 1,
    Lost => 2,
    Invalid => 3,
});

impl ReceiptStatus {
    pub fn can_transition_to(self, next: ReceiptStatus) -> bool {
        use ReceiptStatus::*;
        matches!((self, next), (Active, Archived) | (Active, Lost))
            || (next == Invalid && self != Invalid)
    }

    /// Only an `Active` receipt can still be archived or lost.
    pub fn is_terminal(self) -> bool {
        !matches!(self, ReceiptStatus::Active)
    }
}

/// Input for recording a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReceipt {
    pub receipt_id: ReceiptId,
    pub purchase_id: PurchaseId,
    pub receipt_number: String,
    pub receipt_type: ReceiptType,
    pub format: ReceiptFormat,
    pub storage_location: Option<String>,
    pub receipt_date: DateTime<Utc>,
    pub store_name: String,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

/// Persisted field set of a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    pub receipt_id: ReceiptId,
    pub purchase_id: PurchaseId,
    pub receipt_number: String,
    pub receipt_type: i32,
    pub format: i32,
    pub storage_location: Option<String>,
    pub receipt_date: DateTime<Utc>,
    pub store_name: String,
    pub total_amount: Decimal,
    pub payment_method: i32,
    pub status: i32,
    pub is_verified: bool,
    pub notes: Option<String>,
}

/// Entity: Receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    id: ReceiptId,
    purchase_id: PurchaseId,
    receipt_number: String,
    receipt_type: ReceiptType,
    format: ReceiptFormat,
    storage_location: Option<String>,
    receipt_date: DateTime<Utc>,
    store_name: String,
    total_amount: Decimal,
    payment_method: PaymentMethod,
    status: ReceiptStatus,
    is_verified: bool,
    notes: Notes,
}

impl Receipt {
    /// Record a new, unverified receipt in `Active` status.
    pub fn new(input: NewReceipt) -> DomainResult<Self> {
        if input.total_amount < Decimal::ZERO {
            return Err(DomainError::validation("receipt total must not be negative"));
        }

        Ok(Self {
            id: input.receipt_id,
            purchase_id: input.purchase_id,
            receipt_number: input.receipt_number,
            receipt_type: input.receipt_type,
            format: input.format,
            storage_location: input.storage_location,
            receipt_date: input.receipt_date,
            store_name: input.store_name,
            total_amount: input.total_amount,
            payment_method: input.payment_method,
            status: ReceiptStatus::Active,
            is_verified: false,
            notes: Notes::from_option(input.notes),
        })
    }

    pub fn from_record(record: ReceiptRecord) -> DomainResult<Self> {
        Ok(Self {
            id: record.receipt_id,
            purchase_id: record.purchase_id,
            receipt_number: record.receipt_number,
            receipt_type: ReceiptType::try_from(record.receipt_type)?,
            format: ReceiptFormat::try_from(record.format)?,
            storage_location: record.storage_location,
            receipt_date: record.receipt_date,
            store_name: record.store_name,
            total_amount: record.total_amount,
            payment_method: PaymentMethod::try_from(record.payment_method)?,
            status: ReceiptStatus::try_from(record.status)?,
            is_verified: record.is_verified,
            notes: Notes::from_option(record.notes),
        })
    }

    pub fn to_record(&self) -> ReceiptRecord {
        ReceiptRecord {
            receipt_id: self.id,
            purchase_id: self.purchase_id,
            receipt_number: self.receipt_number.clone(),
            receipt_type: self.receipt_type.code(),
            format: self.format.code(),
            storage_location: self.storage_location.clone(),
            receipt_date: self.receipt_date,
            store_name: self.store_name.clone(),
            total_amount: self.total_amount,
            payment_method: self.payment_method.code(),
            status: self.status.code(),
            is_verified: self.is_verified,
            notes: self.notes.as_deref().map(str::to_string),
        }
    }

    pub fn id_typed(&self) -> ReceiptId {
        self.id
    }

    pub fn purchase_id(&self) -> PurchaseId {
        self.purchase_id
    }

    pub fn receipt_number(&self) -> &str {
        &self.receipt_number
    }

    pub fn receipt_type(&self) -> ReceiptType {
        self.receipt_type
    }

    pub fn format(&self) -> ReceiptFormat {
        self.format
    }

    pub fn storage_location(&self) -> Option<&str> {
        self.storage_location.as_deref()
    }

    pub fn receipt_date(&self) -> DateTime<Utc> {
        self.receipt_date
    }

    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn status(&self) -> ReceiptStatus {
        self.status
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    pub fn notes(&self) -> &Notes {
        &self.notes
    }

    /// `Active` with a non-empty storage location. Whitespace counts as present.
    pub fn is_accessible(&self) -> bool {
        self.status == ReceiptStatus::Active
            && self.storage_location.as_deref().is_some_and(|loc| !loc.is_empty())
    }

    pub fn verify(&mut self) {
        tracing::debug!(receipt_id = %self.id, "receipt verified");
        self.is_verified = true;
    }

    pub fn archive(&mut self) {
        self.transition(ReceiptStatus::Archived, "archive");
    }

    pub fn mark_as_lost(&mut self) {
        self.transition(ReceiptStatus::Lost, "mark_as_lost");
    }

    pub fn mark_as_invalid(&mut self, reason: &str) {
        self.transition(ReceiptStatus::Invalid, "mark_as_invalid");
        self.notes.append_reason("Invalid", reason);
    }

    /// Replace where the receipt is stored. Allowed in any status.
    pub fn update_storage_location(&mut self, location: impl Into<String>) {
        self.storage_location = Some(location.into());
    }

    fn transition(&mut self, next: ReceiptStatus, action: &'static str) {
        if self.status != next && !self.status.can_transition_to(next) {
            tracing::warn!(
                receipt_id = %self.id,
                from = ?self.status,
                to = ?next,
                action,
                "receipt transition outside lifecycle applied"
            );
        } else {
            tracing::debug!(receipt_id = %self.id, to = ?next, action, "receipt transition");
        }
        self.status = next;
    }
}

impl Entity for Receipt {
    type Id = ReceiptId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
