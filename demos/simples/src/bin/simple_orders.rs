use chrono::{Duration, Utc};
use tasty_client::prelude::*;

/// Lists the live orders and the last week of filled orders of the first
/// account, then dry-runs a one share limit order.
///
/// Run with: cargo run --bin simple_orders
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();
    let client = Client::new(Config::new()).await?;

    let Some(account) = client.get_accounts().await?.into_iter().next() else {
        warn!("No accounts found");
        return Ok(());
    };
    let account_number = account.account_number;

    for order in client.get_live_orders(&account_number).await? {
        info!("Live: {} {} {}", order.id, order.underlying_symbol, order.status);
    }

    let filter = OrdersFilter::default()
        .with_status("Filled")
        .with_date_range(Some(Utc::now() - Duration::days(7)), None)
        .with_per_page(25);
    for order in client.get_orders(&account_number, Some(&filter)).await? {
        let fills: f64 = order.fills().map(|f| f.fill_price).sum();
        info!("Filled: {} {} fills {:.2}", order.id, order.underlying_symbol, fills);
    }

    let order = OrderRequest::limit(TimeInForce::Day, 1.0, Effect::Debit).with_leg(OrderLeg::new(
        InstrumentType::Equity,
        "AAPL",
        1.0,
        ActionType::BuyToOpen,
    ));
    let response = client.dry_run_order(&account_number, &order).await?;
    if response.has_errors() {
        for error in &response.errors {
            warn!("Dry run rejected: {} ({})", error.message, error.code);
        }
    } else if let Some(effect) = &response.buying_power_effect {
        info!(
            "Dry run ok, buying power change {:.2} {}",
            effect.change_in_buying_power, effect.change_in_buying_power_effect
        );
    }
    Ok(())
}
