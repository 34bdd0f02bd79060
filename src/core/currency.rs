//! Fiat currency list abstractions

use super::asset::CurrencyCode;
use anyhow::Result;
use async_trait::async_trait;

/// Currencies offered when the upstream list cannot be retrieved.
pub const FALLBACK_CURRENCIES: [&str; 3] = ["USD", "EUR", "INR"];

#[async_trait]
pub trait CurrencyListProvider: Send + Sync {
    async fn list_supported_currencies(&self) -> Result<Vec<CurrencyCode>>;
}

pub fn fallback_currencies() -> Vec<CurrencyCode> {
    FALLBACK_CURRENCIES
        .iter()
        .filter_map(|code| CurrencyCode::new(code).ok())
        .collect()
}
