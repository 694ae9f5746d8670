//! Sweep configuration.

use serde::{Deserialize, Serialize};

pub const ENV_DRY_RUN: &str = "WARRANTRACK_SWEEP_DRY_RUN";
pub const ENV_NAME: &str = "WARRANTRACK_SWEEP_NAME";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Name for logging
    pub name: String,
    /// Compute the report without mutating anything
    pub dry_run: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            name: "expiry-sweep".to_string(),
            dry_run: false,
        }
    }
}

impl SweepConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Defaults overridden by `WARRANTRACK_SWEEP_NAME` / `WARRANTRACK_SWEEP_DRY_RUN`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(name) = lookup(ENV_NAME).filter(|n| !n.is_empty()) {
            config.name = name;
        }

        if let Some(raw) = lookup(ENV_DRY_RUN) {
            match parse_flag(&raw) {
                Some(flag) => config.dry_run = flag,
                None => tracing::warn!(
                    "{ENV_DRY_RUN}={raw:?} is not a boolean; keeping dry_run={}",
                    config.dry_run
                ),
            }
        }

        config
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
