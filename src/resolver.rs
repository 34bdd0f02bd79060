//! Rate resolution with a time-bounded cache in front of a [`RateSource`].

use crate::core::cache::{RateCache, cache_key};
use crate::core::{Asset, Clock, CurrencyCode, RateRecord, RateSource};
use chrono::Duration;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, instrument, warn};

/// Snapshot of the most recent resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionState {
    pub record: Option<RateRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct RateResolver<S: RateSource> {
    source: S,
    cache: RateCache,
    clock: Arc<dyn Clock>,
    state: Mutex<ResolutionState>,
}

impl<S: RateSource> RateResolver<S> {
    pub fn new(source: S, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            cache: RateCache::new(ttl, Arc::clone(&clock)),
            clock,
            state: Mutex::new(ResolutionState::default()),
        }
    }

    pub fn cache(&self) -> &RateCache {
        &self.cache
    }

    pub async fn current_state(&self) -> ResolutionState {
        self.state.lock().await.clone()
    }

    /// Resolves the rate of `asset` in `currency`.
    ///
    /// Never fails: a missing rate or a failed lookup yields `None`, with the
    /// failure message available from [`RateResolver::current_state`].
    #[instrument(
        name = "ResolveRate",
        skip(self, asset, currency),
        fields(asset = %asset.id, currency = %currency)
    )]
    pub async fn resolve(&self, asset: &Asset, currency: &CurrencyCode) -> Option<RateRecord> {
        {
            let mut state = self.state.lock().await;
            state.loading = true;
            state.error = None;
            state.record = None;
        }

        if asset.id.trim().is_empty() || asset.ticker.trim().is_empty() {
            warn!("Refusing to resolve a rate for an asset without id or ticker");
            return self
                .finish_with_error("Asset must have an id and a ticker".to_string())
                .await;
        }

        let key = cache_key(&asset.id, currency.as_str());
        if let Some(cached) = self.cache.get_fresh(&key).await {
            debug!("Using cached rate for {} to {}", asset.id, currency);
            return self.finish(Some(cached)).await;
        }

        if asset.is_quoted_in(currency) {
            let record = RateRecord {
                from: asset.id.clone(),
                to: currency.to_string(),
                rate: 1.0,
                timestamp: self.clock.now(),
            };
            self.cache.put(key, record.clone()).await;
            return self.finish(Some(record)).await;
        }

        match self.source.lookup(&asset.id, &currency.to_lower()).await {
            Ok(Some(rate)) => {
                let record = RateRecord {
                    from: asset.id.clone(),
                    to: currency.to_string(),
                    rate,
                    timestamp: self.clock.now(),
                };
                self.cache.put(key, record.clone()).await;
                self.finish(Some(record)).await
            }
            Ok(None) => {
                warn!("No conversion rate found for {} to {}", asset.id, currency);
                self.finish(None).await
            }
            Err(e) => {
                error!(error = ?e, "Failed to fetch conversion rate");
                self.finish_with_error(e.to_string()).await
            }
        }
    }

    async fn finish(&self, record: Option<RateRecord>) -> Option<RateRecord> {
        let mut state = self.state.lock().await;
        state.record = record.clone();
        state.loading = false;
        record
    }

    async fn finish_with_error(&self, message: String) -> Option<RateRecord> {
        let mut state = self.state.lock().await;
        state.record = None;
        state.error = Some(message);
        state.loading = false;
        None
    }
}
