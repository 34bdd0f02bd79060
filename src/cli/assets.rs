use super::ui;
use crate::catalog::AssetCatalog;
use crate::core::{Asset, AssetProvider};
use anyhow::{Result, anyhow};
use comfy_table::Cell;

pub fn display_assets(assets: &[Asset]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Id"),
        ui::header_cell("Ticker"),
        ui::header_cell("Name"),
        ui::header_cell("Price (USD)"),
    ]);

    for (rank, asset) in assets.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&asset.id),
            Cell::new(&asset.ticker),
            Cell::new(asset.name.as_deref().unwrap_or("")),
            ui::format_optional_cell(asset.current_price, ui::format_rate),
        ]);
    }

    table.to_string()
}

pub async fn run<P: AssetProvider>(catalog: &AssetCatalog<P>) -> Result<()> {
    catalog.ensure_loaded().await;
    if let Some(e) = catalog.error().await {
        return Err(anyhow!("Asset catalog unavailable: {}", e));
    }

    println!(
        "{}\n\n{}",
        ui::style_text("Cryptocurrencies by market cap", ui::StyleType::Title),
        display_assets(&catalog.all().await)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_assets() {
        let mut bitcoin = Asset::new("bitcoin", "btc");
        bitcoin.name = Some("Bitcoin".to_string());
        bitcoin.current_price = Some(65000.0);
        let output = display_assets(&[bitcoin, Asset::new("mystery", "mys")]);

        assert!(output.contains("bitcoin"));
        assert!(output.contains("BTC"));
        assert!(output.contains("65000.00"));
        assert!(output.contains("N/A"));
    }
}
