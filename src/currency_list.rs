//! Supported fiat currencies, loaded once from a [`CurrencyListProvider`].

use crate::core::CurrencyCode;
use crate::core::currency::{CurrencyListProvider, fallback_currencies};
use tokio::sync::Mutex;
use tracing::{debug, error};

#[derive(Debug, Default)]
struct ListState {
    currencies: Vec<CurrencyCode>,
    loading: bool,
    error: Option<String>,
}

pub struct CurrencyList<P: CurrencyListProvider> {
    provider: P,
    state: Mutex<ListState>,
}

impl<P: CurrencyListProvider> CurrencyList<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: Mutex::new(ListState::default()),
        }
    }

    /// Loads the list unless it is already populated or a load is running.
    pub async fn ensure_loaded(&self) {
        {
            let mut state = self.state.lock().await;
            if !state.currencies.is_empty() || state.loading {
                return;
            }
            state.loading = true;
        }
        self.fetch().await;
    }

    /// Fetches the list again, replacing whatever was loaded before.
    pub async fn load(&self) {
        self.state.lock().await.loading = true;
        self.fetch().await;
    }

    async fn fetch(&self) {
        self.state.lock().await.error = None;

        let result = self.provider.list_supported_currencies().await;

        let mut state = self.state.lock().await;
        match result {
            Ok(currencies) => {
                debug!("Loaded {} supported currencies", currencies.len());
                state.currencies = currencies;
            }
            Err(e) => {
                error!(error = ?e, "Failed to fetch supported currencies, using fallback");
                state.error = Some(e.to_string());
                state.currencies = fallback_currencies();
            }
        }
        state.loading = false;
    }

    pub async fn currencies(&self) -> Vec<CurrencyCode> {
        self.state.lock().await.currencies.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.loading
    }

    /// Message from the last failed load, kept for diagnostics.
    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }
}
