//! Known cryptocurrencies, loaded from an [`AssetProvider`].

use crate::core::{Asset, AssetProvider};
use tokio::sync::Mutex;
use tracing::{debug, error};

#[derive(Debug, Default)]
struct CatalogState {
    assets: Vec<Asset>,
    loading: bool,
    error: Option<String>,
}

pub struct AssetCatalog<P: AssetProvider> {
    provider: P,
    state: Mutex<CatalogState>,
}

impl<P: AssetProvider> AssetCatalog<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: Mutex::new(CatalogState::default()),
        }
    }

    /// Loads the catalog if it is empty, idle and has not failed before.
    pub async fn ensure_loaded(&self) {
        {
            let mut state = self.state.lock().await;
            if !state.assets.is_empty() || state.loading || state.error.is_some() {
                return;
            }
            state.loading = true;
        }
        self.fetch().await;
    }

    /// Fetches the catalog regardless of its current state.
    pub async fn load(&self) {
        self.state.lock().await.loading = true;
        self.fetch().await;
    }

    async fn fetch(&self) {
        self.state.lock().await.error = None;

        let result = self.provider.fetch_assets().await;

        let mut state = self.state.lock().await;
        match result {
            Ok(assets) => {
                debug!("Loaded {} assets", assets.len());
                state.assets = assets;
            }
            Err(e) => {
                error!(error = ?e, "Failed to fetch assets");
                state.error = Some(e.to_string());
            }
        }
        state.loading = false;
    }

    /// Finds an asset by id, ignoring case.
    pub async fn find(&self, id: &str) -> Option<Asset> {
        self.state
            .lock()
            .await
            .assets
            .iter()
            .find(|asset| asset.id.eq_ignore_ascii_case(id))
            .cloned()
    }

    pub async fn all(&self) -> Vec<Asset> {
        self.state.lock().await.assets.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }
}
