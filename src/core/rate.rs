//! Rate lookup abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A resolved rate: the price of one `from` asset unit in the `to` currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    pub from: String,
    pub to: String,
    pub rate: f64,
    /// When the rate was obtained, not when it was last served.
    pub timestamp: DateTime<Utc>,
}

#[async_trait]
pub trait RateSource: Send + Sync {
    /// Looks up the current rate of `asset_id` in `currency` (lowercase).
    ///
    /// `Ok(None)` means the source has no rate for the pair, `Err` means the
    /// lookup itself failed and may be retried.
    async fn lookup(&self, asset_id: &str, currency: &str) -> Result<Option<f64>>;
}
