use super::ui;
use crate::core::{CurrencyCode, CurrencyListProvider};
use crate::currency_list::CurrencyList;
use anyhow::Result;

pub fn display_currencies(currencies: &[CurrencyCode]) -> String {
    currencies
        .iter()
        .map(CurrencyCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub async fn run<P: CurrencyListProvider>(list: &CurrencyList<P>) -> Result<()> {
    list.ensure_loaded().await;
    let currencies = list.currencies().await;

    println!(
        "{}\n\n{}",
        ui::style_text("Supported currencies", ui::StyleType::Title),
        display_currencies(&currencies)
    );
    if let Some(e) = list.error().await {
        println!(
            "\n{}",
            ui::style_text(&format!("Showing default list: {e}"), ui::StyleType::Subtle)
        );
    }
    Ok(())
}
