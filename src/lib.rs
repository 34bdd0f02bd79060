pub mod catalog;
pub mod cli;
pub mod core;
pub mod currency_list;
pub mod providers;
pub mod resolver;

use crate::catalog::AssetCatalog;
use crate::core::config::AppConfig;
use crate::core::{CurrencyCode, SystemClock};
use crate::currency_list::CurrencyList;
use crate::providers::CoinGeckoProvider;
use crate::resolver::RateResolver;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Rate {
        asset: String,
        currency: Option<String>,
    },
    Currencies,
    Assets,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("coinrate starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = CoinGeckoProvider::from_config(&config.coingecko());

    match command {
        AppCommand::Rate { asset, currency } => {
            let currency = CurrencyCode::new(currency.as_deref().unwrap_or(&config.currency))?;
            let catalog = AssetCatalog::new(provider.clone());
            let resolver = RateResolver::new(provider, config.cache_ttl()?, Arc::new(SystemClock));
            cli::rate::run(&catalog, &resolver, &asset, &currency).await
        }
        AppCommand::Currencies => cli::currencies::run(&CurrencyList::new(provider)).await,
        AppCommand::Assets => cli::assets::run(&AssetCatalog::new(provider)).await,
    }
}
