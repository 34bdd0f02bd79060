use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::config::CoinGeckoProviderConfig;
use crate::core::{Asset, AssetProvider, CurrencyCode, CurrencyListProvider, RateSource};

/// Hosts CoinGecko serves coin images from.
const ASSET_DOMAINS: [&str; 3] = [
    "https://assets.coingecko.com",
    "https://coin-images.coingecko.com",
    "https://www.coingecko.com/coins/images",
];

/// Replaces the first matching CoinGecko asset domain with `prefix`.
pub fn rewrite_icon_url(url: &str, prefix: &str) -> String {
    ASSET_DOMAINS
        .iter()
        .find_map(|domain| {
            url.strip_prefix(domain)
                .map(|rest| format!("{prefix}{rest}"))
        })
        .unwrap_or_else(|| url.to_string())
}

#[derive(Debug, Clone)]
pub struct CoinGeckoProvider {
    base_url: String,
    icon_proxy_prefix: Option<String>,
}

impl CoinGeckoProvider {
    pub fn new(base_url: &str) -> Self {
        CoinGeckoProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            icon_proxy_prefix: None,
        }
    }

    pub fn from_config(config: &CoinGeckoProviderConfig) -> Self {
        Self::new(&config.base_url).with_icon_proxy(config.icon_proxy_prefix.as_deref())
    }

    pub fn with_icon_proxy(mut self, prefix: Option<&str>) -> Self {
        self.icon_proxy_prefix = prefix.map(str::to_string);
        self
    }

    /// Builds the request URL, percent-encoding the query pairs.
    fn endpoint_url(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint))
            .with_context(|| format!("Invalid CoinGecko base URL: {}", self.base_url))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.endpoint_url(endpoint, query)?;
        debug!("Requesting {}", url);

        let client = reqwest::Client::builder()
            .user_agent("coinrate/1.0")
            .build()?;
        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for URL: {}", response.status(), url));
        }

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))?;
        serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response from {}: {}", url, e))
    }
}

/// `{ "bitcoin": { "usd": 65000 } }`
type SimplePriceResponse = HashMap<String, HashMap<String, Option<f64>>>;

#[derive(Debug, Deserialize)]
struct MarketItem {
    id: String,
    symbol: String,
    name: String,
    image: Option<String>,
    current_price: Option<f64>,
}

#[async_trait]
impl RateSource for CoinGeckoProvider {
    #[instrument(name = "CoinGeckoRateLookup", skip(self))]
    async fn lookup(&self, asset_id: &str, currency: &str) -> Result<Option<f64>> {
        let id = asset_id.to_lowercase();
        let currency = currency.to_lowercase();
        let data: SimplePriceResponse = self
            .get_json(
                "/simple/price",
                &[("ids", id.as_str()), ("vs_currencies", currency.as_str())],
            )
            .await?;
        let rate = data
            .get(&id)
            .and_then(|prices| prices.get(&currency))
            .copied()
            .flatten();
        debug!(?rate, "Received CoinGecko price");
        Ok(rate)
    }
}

#[async_trait]
impl CurrencyListProvider for CoinGeckoProvider {
    async fn list_supported_currencies(&self) -> Result<Vec<CurrencyCode>> {
        let codes: Vec<String> = self
            .get_json("/simple/supported_vs_currencies", &[])
            .await?;
        Ok(codes
            .iter()
            .filter_map(|code| match CurrencyCode::new(code) {
                Ok(code) => Some(code),
                Err(e) => {
                    debug!("Skipping unsupported currency code {:?}: {}", code, e);
                    None
                }
            })
            .collect())
    }
}

#[async_trait]
impl AssetProvider for CoinGeckoProvider {
    #[instrument(name = "CoinGeckoAssetFetch", skip(self))]
    async fn fetch_assets(&self) -> Result<Vec<Asset>> {
        let items: Vec<MarketItem> = self
            .get_json(
                "/coins/markets",
                &[
                    ("vs_currency", "usd"),
                    ("order", "market_cap_desc"),
                    ("per_page", "100"),
                    ("page", "1"),
                    ("sparkline", "false"),
                ],
            )
            .await
            .context("Failed to fetch cryptocurrencies")?;

        Ok(items
            .into_iter()
            .map(|item| Asset {
                icon: item.image.map(|url| match &self.icon_proxy_prefix {
                    Some(prefix) => rewrite_icon_url(&url, prefix),
                    None => url,
                }),
                ticker: item.symbol.to_uppercase(),
                id: item.id,
                name: Some(item.name),
                current_price: item.current_price,
            })
            .collect())
    }
}
