use std::fs;

use anyhow::{Context, Result};

use warrantrack_core::SystemClock;
use warrantrack_purchases::{Purchase, PurchaseRecord};
use warrantrack_sweep::{ExpirySweep, SweepConfig};

/// Usage: `warrantrack-sweep <snapshot.json>`
///
/// Reads a JSON array of purchase records, expires lapsed warranties and
/// return windows, and writes the updated records to stdout. Logs go to stderr.
fn main() -> Result<()> {
    warrantrack_observability::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: warrantrack-sweep <snapshot.json>")?;

    let raw = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let records: Vec<PurchaseRecord> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))?;

    let mut purchases = records
        .into_iter()
        .map(Purchase::from_record)
        .collect::<Result<Vec<_>, _>>()
        .context("loading purchase snapshot")?;

    let config = SweepConfig::from_env();
    tracing::info!(sweep = %config.name, dry_run = config.dry_run, %path, "starting expiry sweep");

    let report = ExpirySweep::new(SystemClock, config).run(&mut purchases);
    tracing::info!(
        report = %serde_json::to_string(&report)?,
        "sweep report"
    );

    let records: Vec<PurchaseRecord> = purchases.iter().map(Purchase::to_record).collect();
    println!("{}", serde_json::to_string_pretty(&records)?);

    Ok(())
}
