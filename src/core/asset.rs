//! Assets and currency codes

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A cryptocurrency known to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub ticker: String,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub current_price: Option<f64>,
}

impl Asset {
    pub fn new(id: &str, ticker: &str) -> Self {
        Asset {
            id: id.to_string(),
            ticker: ticker.to_uppercase(),
            name: None,
            icon: None,
            current_price: None,
        }
    }

    /// True when the ticker names the same unit as `currency`.
    pub fn is_quoted_in(&self, currency: &CurrencyCode) -> bool {
        self.ticker.eq_ignore_ascii_case(currency.as_str())
    }
}

/// Fiat currency ticker, held uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: &str) -> Result<Self> {
        let code = code.trim();
        if code.is_empty() {
            return Err(anyhow!("Currency code must not be empty"));
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(anyhow!("Invalid currency code: {}", code));
        }
        Ok(CurrencyCode(code.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form used for cache keys and upstream requests.
    pub fn to_lower(&self) -> String {
        self.0.to_lowercase()
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CurrencyCode::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> String {
        code.0
    }
}

#[async_trait]
pub trait AssetProvider: Send + Sync {
    async fn fetch_assets(&self) -> Result<Vec<Asset>>;
}
