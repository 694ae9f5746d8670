//! Expiry sweep over loaded purchase aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use warrantrack_core::{Clock, PurchaseId, ReturnWindowId, WarrantyId};
use warrantrack_purchases::Purchase;

use crate::config::SweepConfig;

/// Outcome of one sweep run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    pub ran_at: DateTime<Utc>,
    pub dry_run: bool,
    pub scanned_purchases: usize,
    pub expired_warranties: Vec<WarrantyId>,
    pub expired_return_windows: Vec<ReturnWindowId>,
    /// Purchases with at least one expired child; the caller persists these.
    pub touched_purchases: Vec<PurchaseId>,
}

impl SweepReport {
    fn new(ran_at: DateTime<Utc>, dry_run: bool) -> Self {
        Self {
            ran_at,
            dry_run,
            scanned_purchases: 0,
            expired_warranties: Vec::new(),
            expired_return_windows: Vec::new(),
            touched_purchases: Vec::new(),
        }
    }

    pub fn expired_total(&self) -> usize {
        self.expired_warranties.len() + self.expired_return_windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expired_total() == 0
    }
}

/// Expires every `Active` warranty and `Open` return window whose end date is
/// before the clock's `now`.
///
/// Status is only ever written through the entities' own `mark_as_expired`,
/// so a second run at the same instant finds nothing to do.
#[derive(Debug, Clone)]
pub struct ExpirySweep<C: Clock> {
    clock: C,
    config: SweepConfig,
}

impl<C: Clock> ExpirySweep<C> {
    pub fn new(clock: C, config: SweepConfig) -> Self {
        Self { clock, config }
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn run(&self, purchases: &mut [Purchase]) -> SweepReport {
        let now = self.clock.now();
        let mut report = SweepReport::new(now, self.config.dry_run);

        for purchase in purchases.iter_mut() {
            report.scanned_purchases += 1;
            if self.sweep_purchase(purchase, now, &mut report) {
                report.touched_purchases.push(purchase.id_typed());
            }
        }

        info!(
            sweep = %self.config.name,
            dry_run = self.config.dry_run,
            scanned = report.scanned_purchases,
            warranties = report.expired_warranties.len(),
            return_windows = report.expired_return_windows.len(),
            "expiry sweep finished"
        );

        report
    }

    fn sweep_purchase(
        &self,
        purchase: &mut Purchase,
        now: DateTime<Utc>,
        report: &mut SweepReport,
    ) -> bool {
        let purchase_id = purchase.id_typed();
        let dry_run = self.config.dry_run;
        let mut touched = false;

        for warranty in purchase.warranties_mut() {
            if !warranty.is_lapsed(now) {
                continue;
            }
            debug!(%purchase_id, warranty_id = %warranty.id_typed(), "expiring warranty");
            if !dry_run {
                warranty.mark_as_expired();
            }
            report.expired_warranties.push(warranty.id_typed());
            touched = true;
        }

        for window in purchase.return_windows_mut() {
            if !window.is_lapsed(now) {
                continue;
            }
            debug!(%purchase_id, return_window_id = %window.id_typed(), "expiring return window");
            if !dry_run {
                window.mark_as_expired();
            }
            report.expired_return_windows.push(window.id_typed());
            touched = true;
        }

        touched
    }
}
