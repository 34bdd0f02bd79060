use super::ui;
use crate::catalog::AssetCatalog;
use crate::core::{Asset, AssetProvider, CurrencyCode, RateRecord, RateSource};
use crate::resolver::RateResolver;
use anyhow::{Result, anyhow};
use comfy_table::Cell;

impl RateRecord {
    pub fn display_as_table(&self, asset: &Asset) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Asset"),
            ui::header_cell("Ticker"),
            ui::header_cell(&format!("Rate ({})", self.to)),
            ui::header_cell("As of"),
        ]);
        table.add_row(vec![
            Cell::new(asset.name.as_deref().unwrap_or(&asset.id)),
            Cell::new(&asset.ticker),
            ui::format_optional_cell(Some(self.rate), ui::format_rate),
            Cell::new(self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")),
        ]);

        format!(
            "1 {} = {} {}\n\n{}",
            asset.ticker,
            ui::style_text(&ui::format_rate(self.rate), ui::StyleType::Value),
            self.to,
            table
        )
    }
}

pub async fn run<P, S>(
    catalog: &AssetCatalog<P>,
    resolver: &RateResolver<S>,
    asset_id: &str,
    currency: &CurrencyCode,
) -> Result<()>
where
    P: AssetProvider,
    S: RateSource,
{
    catalog.ensure_loaded().await;
    let asset = match catalog.find(asset_id).await {
        Some(asset) => asset,
        None => {
            return Err(match catalog.error().await {
                Some(e) => anyhow!("Asset catalog unavailable: {}", e),
                None => anyhow!("Unknown asset: {}", asset_id),
            });
        }
    };

    match resolver.resolve(&asset, currency).await {
        Some(record) => {
            println!("{}", record.display_as_table(&asset));
            Ok(())
        }
        None => {
            let state = resolver.current_state().await;
            let message = match state.error {
                Some(e) => format!("Failed to fetch rate for {} to {}: {}", asset.id, currency, e),
                None => format!("No conversion rate found for {} to {}", asset.id, currency),
            };
            println!("{}", ui::style_text(&message, ui::StyleType::Error));
            Err(anyhow!(message))
        }
    }
}
