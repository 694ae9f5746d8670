use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use warrantrack_core::{
    AggregateRoot, DomainError, DomainResult, Entity, Notes, PurchaseId, ReceiptId,
    ReturnWindowId, UserId, WarrantyId, calendar_days_between, impl_wire_codes,
};
use warrantrack_receipts::{Receipt, ReceiptRecord};
use warrantrack_returns::{ReturnWindow, ReturnWindowRecord};
use warrantrack_warranties::{Warranty, WarrantyRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Electronics,
    Appliances,
    Furniture,
    Clothing,
    Tools,
    Automotive,
    Sports,
    Other,
}

impl_wire_codes!(ProductCategory, "ProductCategory", {
    Electronics => 0,
    Appliances => 1,
    Furniture => 2,
    Clothing => 3,
    Tools => 4,
    Automotive => 5,
    Sports => 6,
    Other => 7,
});

/// Purchase status lifecycle.
///
/// Only `mark_as_returned` and `mark_as_disposed` move a purchase; a purchase
/// never transitions on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    Active,
    Returned,
    Disposed,
    UnderWarrantyClaim,
}

impl_wire_codes!(PurchaseStatus, "PurchaseStatus", {
    Active => 0,
    Returned => 1,
    Disposed => 2,
    UnderWarrantyClaim => 3,
});

impl PurchaseStatus {
    pub fn can_transition_to(self, next: PurchaseStatus) -> bool {
        use PurchaseStatus::*;
        matches!(
            (self, next),
            (Active, Returned | Disposed | UnderWarrantyClaim)
                | (UnderWarrantyClaim, Active | Returned | Disposed)
        )
    }

    /// Returned and Disposed purchases are closed.
    pub fn is_terminal(self) -> bool {
        matches!(self, PurchaseStatus::Returned | PurchaseStatus::Disposed)
    }
}

/// Input for logging a new purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPurchase {
    pub purchase_id: PurchaseId,
    pub user_id: UserId,
    pub product_name: String,
    pub category: ProductCategory,
    pub store_name: String,
    pub purchase_date: DateTime<Utc>,
    pub price: Decimal,
    pub model_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Persisted field set of a purchase and its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub purchase_id: PurchaseId,
    pub user_id: UserId,
    pub product_name: String,
    pub category: i32,
    pub store_name: String,
    pub purchase_date: DateTime<Utc>,
    pub price: Decimal,
    pub model_number: Option<String>,
    pub notes: Option<String>,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub version: u64,
    #[serde(default)]
    pub warranties: Vec<WarrantyRecord>,
    #[serde(default)]
    pub return_windows: Vec<ReturnWindowRecord>,
    #[serde(default)]
    pub receipts: Vec<ReceiptRecord>,
}

/// Aggregate root: Purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    id: PurchaseId,
    user_id: UserId,
    product_name: String,
    category: ProductCategory,
    store_name: String,
    purchase_date: DateTime<Utc>,
    price: Decimal,
    model_number: Option<String>,
    notes: Notes,
    status: PurchaseStatus,
    created_at: DateTime<Utc>,
    version: u64,
    warranties: Vec<Warranty>,
    return_windows: Vec<ReturnWindow>,
    receipts: Vec<Receipt>,
}

impl Purchase {
    /// Log a new purchase in `Active` status with no children.
    pub fn new(input: NewPurchase) -> DomainResult<Self> {
        if input.price < Decimal::ZERO {
            return Err(DomainError::validation("price must not be negative"));
        }

        Ok(Self {
            id: input.purchase_id,
            user_id: input.user_id,
            product_name: input.product_name,
            category: input.category,
            store_name: input.store_name,
            purchase_date: input.purchase_date,
            price: input.price,
            model_number: input.model_number,
            notes: Notes::from_option(input.notes),
            status: PurchaseStatus::Active,
            created_at: input.created_at,
            version: 0,
            warranties: Vec::new(),
            return_windows: Vec::new(),
            receipts: Vec::new(),
        })
    }

    /// Rehydrate the aggregate, children included.
    ///
    /// Children whose `purchase_id` is not this purchase are rejected.
    pub fn from_record(record: PurchaseRecord) -> DomainResult<Self> {
        let mut purchase = Self {
            id: record.purchase_id,
            user_id: record.user_id,
            product_name: record.product_name,
            category: ProductCategory::try_from(record.category)?,
            store_name: record.store_name,
            purchase_date: record.purchase_date,
            price: record.price,
            model_number: record.model_number,
            notes: Notes::from_option(record.notes),
            status: PurchaseStatus::try_from(record.status)?,
            created_at: record.created_at,
            version: record.version,
            warranties: Vec::with_capacity(record.warranties.len()),
            return_windows: Vec::with_capacity(record.return_windows.len()),
            receipts: Vec::with_capacity(record.receipts.len()),
        };

        for warranty in record.warranties {
            purchase.add_warranty(Warranty::from_record(warranty)?)?;
        }
        for window in record.return_windows {
            purchase.add_return_window(ReturnWindow::from_record(window)?)?;
        }
        for receipt in record.receipts {
            purchase.add_receipt(Receipt::from_record(receipt)?)?;
        }

        Ok(purchase)
    }

    pub fn to_record(&self) -> PurchaseRecord {
        PurchaseRecord {
            purchase_id: self.id,
            user_id: self.user_id,
            product_name: self.product_name.clone(),
            category: self.category.code(),
            store_name: self.store_name.clone(),
            purchase_date: self.purchase_date,
            price: self.price,
            model_number: self.model_number.clone(),
            notes: self.notes.as_deref().map(str::to_string),
            status: self.status.code(),
            created_at: self.created_at,
            version: self.version,
            warranties: self.warranties.iter().map(Warranty::to_record).collect(),
            return_windows: self.return_windows.iter().map(ReturnWindow::to_record).collect(),
            receipts: self.receipts.iter().map(Receipt::to_record).collect(),
        }
    }

    pub fn id_typed(&self) -> PurchaseId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn category(&self) -> ProductCategory {
        self.category
    }

    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    pub fn purchase_date(&self) -> DateTime<Utc> {
        self.purchase_date
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn model_number(&self) -> Option<&str> {
        self.model_number.as_deref()
    }

    pub fn notes(&self) -> &Notes {
        &self.notes
    }

    pub fn status(&self) -> PurchaseStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn warranties(&self) -> &[Warranty] {
        &self.warranties
    }

    pub fn return_windows(&self) -> &[ReturnWindow] {
        &self.return_windows
    }

    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    /// Children can be mutated in place but not re-parented or removed here.
    pub fn warranties_mut(&mut self) -> &mut [Warranty] {
        &mut self.warranties
    }

    pub fn return_windows_mut(&mut self) -> &mut [ReturnWindow] {
        &mut self.return_windows
    }

    pub fn receipts_mut(&mut self) -> &mut [Receipt] {
        &mut self.receipts
    }

    pub fn is_closed(&self) -> bool {
        self.status.is_terminal()
    }

    // ---- child management ----

    pub fn add_warranty(&mut self, warranty: Warranty) -> DomainResult<()> {
        self.ensure_owned(warranty.purchase_id(), "warranty")?;
        attach(&mut self.warranties, warranty, "warranty")
    }

    pub fn add_return_window(&mut self, window: ReturnWindow) -> DomainResult<()> {
        self.ensure_owned(window.purchase_id(), "return window")?;
        attach(&mut self.return_windows, window, "return window")
    }

    pub fn add_receipt(&mut self, receipt: Receipt) -> DomainResult<()> {
        self.ensure_owned(receipt.purchase_id(), "receipt")?;
        attach(&mut self.receipts, receipt, "receipt")
    }

    pub fn warranty(&self, id: WarrantyId) -> Option<&Warranty> {
        find(&self.warranties, &id).map(|i| &self.warranties[i])
    }

    pub fn warranty_mut(&mut self, id: WarrantyId) -> DomainResult<&mut Warranty> {
        let i = find(&self.warranties, &id).ok_or_else(DomainError::not_found)?;
        Ok(&mut self.warranties[i])
    }

    pub fn remove_warranty(&mut self, id: WarrantyId) -> DomainResult<Warranty> {
        let i = find(&self.warranties, &id).ok_or_else(DomainError::not_found)?;
        Ok(self.warranties.remove(i))
    }

    pub fn return_window(&self, id: ReturnWindowId) -> Option<&ReturnWindow> {
        find(&self.return_windows, &id).map(|i| &self.return_windows[i])
    }

    pub fn return_window_mut(&mut self, id: ReturnWindowId) -> DomainResult<&mut ReturnWindow> {
        let i = find(&self.return_windows, &id).ok_or_else(DomainError::not_found)?;
        Ok(&mut self.return_windows[i])
    }

    pub fn remove_return_window(&mut self, id: ReturnWindowId) -> DomainResult<ReturnWindow> {
        let i = find(&self.return_windows, &id).ok_or_else(DomainError::not_found)?;
        Ok(self.return_windows.remove(i))
    }

    pub fn receipt(&self, id: ReceiptId) -> Option<&Receipt> {
        find(&self.receipts, &id).map(|i| &self.receipts[i])
    }

    pub fn receipt_mut(&mut self, id: ReceiptId) -> DomainResult<&mut Receipt> {
        let i = find(&self.receipts, &id).ok_or_else(DomainError::not_found)?;
        Ok(&mut self.receipts[i])
    }

    pub fn remove_receipt(&mut self, id: ReceiptId) -> DomainResult<Receipt> {
        let i = find(&self.receipts, &id).ok_or_else(DomainError::not_found)?;
        Ok(self.receipts.remove(i))
    }

    // ---- aggregate queries ----

    pub fn has_active_warranty(&self, now: DateTime<Utc>) -> bool {
        self.warranties.iter().any(|w| w.is_active(now))
    }

    pub fn can_be_returned(&self, now: DateTime<Utc>) -> bool {
        self.return_windows.iter().any(|r| r.is_open(now))
    }

    /// Calendar days since the purchase date. Negative for a future-dated purchase.
    pub fn days_since_purchase(&self, now: DateTime<Utc>) -> i64 {
        calendar_days_between(self.purchase_date, now)
    }

    pub fn active_warranties(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Warranty> {
        self.warranties.iter().filter(move |w| w.is_active(now))
    }

    pub fn expiring_warranties(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Warranty> {
        self.warranties.iter().filter(move |w| w.is_expiring_soon(now))
    }

    pub fn open_return_windows(&self, now: DateTime<Utc>) -> impl Iterator<Item = &ReturnWindow> {
        self.return_windows.iter().filter(move |r| r.is_open(now))
    }

    pub fn closing_return_windows(
        &self,
        now: DateTime<Utc>,
    ) -> impl Iterator<Item = &ReturnWindow> {
        self.return_windows.iter().filter(move |r| r.is_closing_soon(now))
    }

    pub fn accessible_receipts(&self) -> impl Iterator<Item = &Receipt> {
        self.receipts.iter().filter(|r| r.is_accessible())
    }

    /// Restocking fee if the item were returned at `now`, using the first open
    /// window. `None` when no window is open.
    pub fn restocking_fee(&self, now: DateTime<Utc>) -> Option<Decimal> {
        self.open_return_windows(now)
            .next()
            .map(|window| window.calculate_restocking_fee(self.price))
    }

    // ---- mutators ----

    /// Sets `Returned` and appends `Returned on {yyyy-MM-dd}` to the notes.
    pub fn mark_as_returned(&mut self, return_date: DateTime<Utc>) {
        self.transition(PurchaseStatus::Returned, "mark_as_returned");
        self.notes
            .append(format!("Returned on {}", return_date.format("%Y-%m-%d")));
    }

    pub fn mark_as_disposed(&mut self) {
        self.transition(PurchaseStatus::Disposed, "mark_as_disposed");
    }

    pub fn add_note(&mut self, text: &str) {
        self.notes.append(text);
    }

    fn transition(&mut self, next: PurchaseStatus, action: &'static str) {
        if self.status != next && !self.status.can_transition_to(next) {
            tracing::warn!(
                purchase_id = %self.id,
                from = ?self.status,
                to = ?next,
                action,
                "purchase transition outside lifecycle applied"
            );
        } else {
            tracing::debug!(purchase_id = %self.id, to = ?next, action, "purchase transition");
        }
        self.status = next;
    }

    fn ensure_owned(&self, child_purchase_id: PurchaseId, kind: &str) -> DomainResult<()> {
        if child_purchase_id != self.id {
            return Err(DomainError::invariant(format!(
                "{kind} belongs to purchase {child_purchase_id}, not {}",
                self.id
            )));
        }
        Ok(())
    }
}

fn find<E: Entity>(items: &[E], id: &E::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

fn attach<E: Entity>(items: &mut Vec<E>, child: E, kind: &str) -> DomainResult<()> {
    if find(items, child.id()).is_some() {
        return Err(DomainError::conflict(format!(
            "{kind} {:?} already attached",
            child.id()
        )));
    }
    items.push(child);
    Ok(())
}

impl AggregateRoot for Purchase {
    type Id = PurchaseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use warrantrack_returns::NewReturnWindow;
    use warrantrack_warranties::{NewWarranty, WarrantyType};

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
    }

    fn new_purchase() -> NewPurchase {
        NewPurchase {
            purchase_id: PurchaseId::new(),
            user_id: UserId::new(),
            product_name: "Samsung TV".to_string(),
            category: ProductCategory::Electronics,
            store_name: "Best Buy".to_string(),
            purchase_date: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            price: Decimal::new(129999, 2),
            model_number: Some("UN65TU8000".to_string()),
            notes: None,
            created_at: test_time(),
        }
    }

    fn purchase() -> Purchase {
        Purchase::new(new_purchase()).unwrap()
    }

    fn warranty_for(purchase: &Purchase, end_offset_days: i64) -> Warranty {
        Warranty::new(NewWarranty {
            warranty_id: WarrantyId::new(),
            purchase_id: purchase.id_typed(),
            warranty_type: WarrantyType::Manufacturer,
            provider: "Samsung".to_string(),
            start_date: test_time() - Duration::days(400),
            end_date: test_time() + Duration::days(end_offset_days),
            duration_months: 12,
            coverage_details: "Parts and labor".to_string(),
            terms: None,
            registration_number: None,
            notes: None,
        })
        .unwrap()
    }

    fn window_for(purchase: &Purchase, start_offset: i64, end_offset: i64) -> ReturnWindow {
        ReturnWindow::new(NewReturnWindow {
            return_window_id: ReturnWindowId::new(),
            purchase_id: purchase.id_typed(),
            start_date: test_time() + Duration::days(start_offset),
            end_date: test_time() + Duration::days(end_offset),
            duration_days: 30,
            policy_details: "30-day returns".to_string(),
            conditions: None,
            restocking_fee_percent: Some(Decimal::from(15)),
            notes: None,
        })
        .unwrap()
    }

    #[test]
    fn new_purchase_is_active_and_empty() {
        let purchase = purchase();
        assert_eq!(purchase.status(), PurchaseStatus::Active);
        assert_eq!(purchase.version(), 0);
        assert_eq!(purchase.model_number(), Some("UN65TU8000"));
        assert!(purchase.warranties().is_empty());
        assert!(purchase.return_windows().is_empty());
        assert!(purchase.receipts().is_empty());
        assert!(!purchase.is_closed());
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut input = new_purchase();
        input.price = Decimal::NEGATIVE_ONE;
        assert!(matches!(Purchase::new(input), Err(DomainError::Validation(_))));
    }

    #[test]
    fn mark_as_returned_formats_the_date() {
        let mut purchase = purchase();
        purchase.mark_as_returned(Utc.with_ymd_and_hms(2024, 2, 15, 18, 45, 0).unwrap());
        assert_eq!(purchase.status(), PurchaseStatus::Returned);
        assert_eq!(purchase.notes().as_deref(), Some("Returned on 2024-02-15"));
        assert!(purchase.is_closed());
    }

    #[test]
    fn mark_as_returned_appends_after_existing_notes() {
        let mut input = new_purchase();
        input.notes = Some("Original note".to_string());
        let mut purchase = Purchase::new(input).unwrap();

        purchase.mark_as_returned(Utc.with_ymd_and_hms(2024, 2, 15, 0, 0, 0).unwrap());

        assert_eq!(
            purchase.notes().as_deref(),
            Some("Original note\nReturned on 2024-02-15")
        );
    }

    #[test]
    fn mark_as_disposed() {
        let mut purchase = purchase();
        purchase.mark_as_disposed();
        assert_eq!(purchase.status(), PurchaseStatus::Disposed);
        assert!(purchase.is_closed());
    }

    #[test]
    fn no_children_means_no_entitlements() {
        let purchase = purchase();
        assert!(!purchase.has_active_warranty(test_time()));
        assert!(!purchase.can_be_returned(test_time()));
        assert_eq!(purchase.restocking_fee(test_time()), None);
    }

    #[test]
    fn has_active_warranty_scans_children() {
        let mut purchase = purchase();
        let mut expired = warranty_for(&purchase, 100);
        expired.mark_as_expired();
        purchase.add_warranty(expired).unwrap();
        assert!(!purchase.has_active_warranty(test_time()));

        purchase.add_warranty(warranty_for(&purchase, 100)).unwrap();
        assert!(purchase.has_active_warranty(test_time()));
        assert_eq!(purchase.active_warranties(test_time()).count(), 1);
    }

    #[test]
    fn lapsed_active_warranty_does_not_count() {
        let mut purchase = purchase();
        purchase.add_warranty(warranty_for(&purchase, -1)).unwrap();
        assert!(!purchase.has_active_warranty(test_time()));
    }

    #[test]
    fn can_be_returned_while_a_window_is_open() {
        let mut purchase = purchase();
        purchase.add_return_window(window_for(&purchase, -35, -5)).unwrap();
        assert!(!purchase.can_be_returned(test_time()));

        purchase.add_return_window(window_for(&purchase, -5, 25)).unwrap();
        assert!(purchase.can_be_returned(test_time()));
        assert_eq!(purchase.open_return_windows(test_time()).count(), 1);
        // 15% of 1299.99 = 194.9985
        assert_eq!(
            purchase.restocking_fee(test_time()),
            Some(Decimal::new(19500, 2))
        );
    }

    #[test]
    fn closing_and_expiring_helpers() {
        let mut purchase = purchase();
        purchase.add_warranty(warranty_for(&purchase, 10)).unwrap();
        purchase.add_warranty(warranty_for(&purchase, 300)).unwrap();
        purchase.add_return_window(window_for(&purchase, -25, 3)).unwrap();

        assert_eq!(purchase.expiring_warranties(test_time()).count(), 1);
        assert_eq!(purchase.closing_return_windows(test_time()).count(), 1);
    }

    #[test]
    fn days_since_purchase_counts_calendar_days() {
        let mut input = new_purchase();
        input.purchase_date = test_time() - Duration::days(30);
        let purchase = Purchase::new(input).unwrap();
        assert_eq!(purchase.days_since_purchase(test_time()), 30);
        assert_eq!(purchase.days_since_purchase(test_time() - Duration::days(31)), -1);
    }

    #[test]
    fn foreign_children_are_rejected() {
        let mut purchase = purchase();
        let other = Purchase::new(new_purchase()).unwrap();
        let err = purchase.add_warranty(warranty_for(&other, 10)).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert!(purchase.warranties().is_empty());
    }

    #[test]
    fn duplicate_children_conflict() {
        let mut purchase = purchase();
        let warranty = warranty_for(&purchase, 10);
        purchase.add_warranty(warranty.clone()).unwrap();
        assert!(matches!(
            purchase.add_warranty(warranty),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn child_lookup_and_removal() {
        let mut purchase = purchase();
        let warranty = warranty_for(&purchase, 10);
        let id = warranty.id_typed();
        purchase.add_warranty(warranty).unwrap();

        purchase.warranty_mut(id).unwrap().void_warranty("Product returned");
        assert!(purchase.warranty(id).unwrap().notes().contains("Voided"));

        let removed = purchase.remove_warranty(id).unwrap();
        assert_eq!(removed.id_typed(), id);
        assert!(matches!(purchase.remove_warranty(id), Err(DomainError::NotFound)));
        assert!(matches!(purchase.warranty_mut(id), Err(DomainError::NotFound)));
    }

    #[test]
    fn rehydration_rejects_children_of_another_purchase() {
        let purchase = purchase();
        let other = Purchase::new(new_purchase()).unwrap();
        let mut record = purchase.to_record();
        record.warranties.push(warranty_for(&other, 10).to_record());
        assert!(matches!(
            Purchase::from_record(record),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn record_round_trip_keeps_children_and_queries() {
        let mut purchase = purchase();
        purchase.add_warranty(warranty_for(&purchase, 10)).unwrap();
        purchase.add_return_window(window_for(&purchase, -5, 25)).unwrap();
        purchase.add_note("Wall mount included");

        let json = serde_json::to_string(&purchase.to_record()).unwrap();
        let restored = Purchase::from_record(serde_json::from_str(&json).unwrap()).unwrap();

        assert_eq!(restored, purchase);
        let now = test_time();
        assert_eq!(restored.has_active_warranty(now), purchase.has_active_warranty(now));
        assert_eq!(restored.can_be_returned(now), purchase.can_be_returned(now));
        assert_eq!(restored.days_since_purchase(now), purchase.days_since_purchase(now));
    }

    #[test]
    fn transition_table() {
        use PurchaseStatus::*;
        assert!(Active.can_transition_to(Returned));
        assert!(UnderWarrantyClaim.can_transition_to(Active));
        assert!(!Returned.can_transition_to(Active));
        assert!(!Disposed.can_transition_to(Returned));
        assert!(Returned.is_terminal() && Disposed.is_terminal());
        assert!(!UnderWarrantyClaim.is_terminal());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn restocking_fee_never_exceeds_price(cents in 0i64..10_000_000, pct in 0u32..=100) {
                let mut input = new_purchase();
                input.price = Decimal::new(cents, 2);
                let mut purchase = Purchase::new(input).unwrap();
                let mut window = window_for(&purchase, -5, 25).to_record();
                window.restocking_fee_percent = Some(Decimal::from(pct));
                purchase.add_return_window(ReturnWindow::from_record(window).unwrap()).unwrap();

                let fee = purchase.restocking_fee(test_time()).unwrap();
                prop_assert!(fee >= Decimal::ZERO);
                prop_assert!(fee <= purchase.price());
                prop_assert!(fee.scale() <= 2);
            }

            #[test]
            fn days_since_purchase_tracks_offset(days in -365i64..3650) {
                let purchase = purchase();
                let now = purchase.purchase_date() + Duration::days(days);
                prop_assert_eq!(purchase.days_since_purchase(now), days);
            }
        }
    }
}
