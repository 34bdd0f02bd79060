use super::clock::Clock;
use super::rate::RateRecord;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Cached rates are served for this many seconds after they were stored.
pub const DEFAULT_TTL_SECS: u64 = 5 * 60;

pub fn default_ttl() -> Duration {
    Duration::seconds(DEFAULT_TTL_SECS as i64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub record: RateRecord,
    pub cached_at: DateTime<Utc>,
}

/// Builds the cache key for an asset/currency pair, e.g. `bitcoin-usd`.
pub fn cache_key(asset_id: &str, currency: &str) -> String {
    format!("{}-{}", asset_id.to_lowercase(), currency.to_lowercase())
}

/// Rate cache with a fixed time-to-live.
///
/// Entries are never evicted. A stale entry is simply ignored on lookup and
/// replaced by the next successful resolution for its key.
pub struct RateCache {
    inner: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl RateCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached record if it is younger than the TTL.
    pub async fn get_fresh(&self, key: &str) -> Option<RateRecord> {
        let cache = self.inner.lock().await;
        match cache.get(key) {
            Some(entry) if self.clock.now() - entry.cached_at < self.ttl => {
                debug!("Cache HIT for key: {}", key);
                Some(entry.record.clone())
            }
            Some(_) => {
                debug!("Cache entry expired for key: {}", key);
                None
            }
            None => {
                debug!("Cache MISS for key: {}", key);
                None
            }
        }
    }

    /// Stores `record` under `key`, replacing any previous entry.
    pub async fn put(&self, key: String, record: RateRecord) {
        let entry = CacheEntry {
            record,
            cached_at: self.clock.now(),
        };
        let mut cache = self.inner.lock().await;
        debug!("Cache PUT for key: {}", key);
        cache.insert(key, entry);
    }

    /// Raw entry lookup, stale or not.
    pub async fn entry(&self, key: &str) -> Option<CacheEntry> {
        self.inner.lock().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}
