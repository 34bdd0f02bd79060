use std::fs;
use std::sync::Arc;
use tracing::info;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coinrate::core::cache::default_ttl;
use coinrate::core::{Asset, CurrencyCode, SystemClock};
use coinrate::providers::CoinGeckoProvider;
use coinrate::resolver::RateResolver;

mod test_utils {
    use super::*;

    pub const MARKETS_RESPONSE: &str = r#"[
        {
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://coin-images.coingecko.com/coins/images/1/large/bitcoin.png",
            "current_price": 65000
        },
        {
            "id": "ethereum",
            "symbol": "eth",
            "name": "Ethereum",
            "image": "https://coin-images.coingecko.com/coins/images/279/large/ethereum.png",
            "current_price": 3000
        }
    ]"#;

    pub async fn create_mock_server() -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/coins/markets"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MARKETS_RESPONSE))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .and(query_param("ids", "bitcoin"))
            .and(query_param("vs_currencies", "eur"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"bitcoin": {"eur": 60000}}"#),
            )
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(mock_server: &MockServer) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
currency: "EUR"
providers:
  coingecko:
    base_url: {}
"#,
            mock_server.uri()
        );
        fs::write(config_file.path(), &config_content).expect("Failed to write config file");
        config_file
    }
}

#[test_log::test(tokio::test)]
async fn test_rate_command_with_mock() {
    let mock_server = test_utils::create_mock_server().await;
    let config_file = test_utils::write_config(&mock_server);

    let result = coinrate::run_command(
        coinrate::AppCommand::Rate {
            asset: "Bitcoin".to_string(),
            currency: None,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Rate command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_rate_command_unknown_asset() {
    let mock_server = test_utils::create_mock_server().await;
    let config_file = test_utils::write_config(&mock_server);

    let result = coinrate::run_command(
        coinrate::AppCommand::Rate {
            asset: "solana".to_string(),
            currency: Some("usd".to_string()),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert_eq!(result.unwrap_err().to_string(), "Unknown asset: solana");
}

#[test_log::test(tokio::test)]
async fn test_rate_command_reports_missing_rate() {
    let mock_server = test_utils::create_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("vs_currencies", "xau"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&mock_server)
        .await;
    let config_file = test_utils::write_config(&mock_server);

    let result = coinrate::run_command(
        coinrate::AppCommand::Rate {
            asset: "ethereum".to_string(),
            currency: Some("xau".to_string()),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert_eq!(
        result.unwrap_err().to_string(),
        "No conversion rate found for ethereum to XAU"
    );
}

#[test_log::test(tokio::test)]
async fn test_currencies_command_falls_back_when_unavailable() {
    let mock_server = test_utils::create_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/simple/supported_vs_currencies"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;
    let config_file = test_utils::write_config(&mock_server);

    let result = coinrate::run_command(
        coinrate::AppCommand::Currencies,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok());
}

#[test_log::test(tokio::test)]
async fn test_assets_command_with_mock() {
    let mock_server = test_utils::create_mock_server().await;
    let config_file = test_utils::write_config(&mock_server);

    let result = coinrate::run_command(
        coinrate::AppCommand::Assets,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok());
}

#[test_log::test(tokio::test)]
async fn test_resolver_hits_upstream_once() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("ids", "bitcoin"))
        .and(query_param("vs_currencies", "usd"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"bitcoin": {"usd": 65000}}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = CoinGeckoProvider::new(&mock_server.uri());
    let resolver = RateResolver::new(provider, default_ttl(), Arc::new(SystemClock));
    let bitcoin = Asset::new("bitcoin", "BTC");
    let usd = CurrencyCode::new("USD").unwrap();

    let first = resolver.resolve(&bitcoin, &usd).await.unwrap();
    info!(?first, "Resolved rate");
    assert_eq!(first.from, "bitcoin");
    assert_eq!(first.to, "USD");
    assert_eq!(first.rate, 65000.0);

    let second = resolver.resolve(&bitcoin, &usd).await.unwrap();
    assert_eq!(second, first);
    assert!(resolver.cache().entry("bitcoin-usd").await.is_some());

    // Identity pairs never reach the network
    let tether = resolver
        .resolve(&Asset::new("tether", "USD"), &usd)
        .await
        .unwrap();
    assert_eq!(tether.rate, 1.0);

    mock_server.verify().await;
}

#[test_log::test(tokio::test)]
async fn test_resolver_retries_after_transport_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"ethereum": {"usd": 3000.25}}"#),
        )
        .mount(&mock_server)
        .await;

    let provider = CoinGeckoProvider::new(&mock_server.uri());
    let resolver = RateResolver::new(provider, default_ttl(), Arc::new(SystemClock));
    let eth = Asset::new("ethereum", "ETH");
    let usd = CurrencyCode::new("usd").unwrap();

    assert!(resolver.resolve(&eth, &usd).await.is_none());
    let state = resolver.current_state().await;
    assert!(state.error.unwrap().starts_with("HTTP error: 502 Bad Gateway"));
    assert!(!state.loading);

    let record = resolver.resolve(&eth, &usd).await.unwrap();
    assert_eq!(record.rate, 3000.25);
}
