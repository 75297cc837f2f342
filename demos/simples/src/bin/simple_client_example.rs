use tasty_client::prelude::*;

/// Logs in with the credentials of the environment and prints every account
/// with its balances and open positions.
///
/// Run with: cargo run --bin simple_client_example
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();
    info!("Starting simple client example");

    let client = Client::new(Config::new()).await?;
    info!("✓ Client created and authenticated");

    for account in client.get_accounts().await? {
        let balance = client.get_balance(&account.account_number).await?;
        info!(
            "{} ({}): net liquidating value {:.2}, cash {:.2}",
            account.account_number,
            account.margin_or_cash,
            balance.net_liquidating_value,
            balance.cash_balance
        );

        let positions = client.get_positions(&account.account_number, None).await?;
        for position in positions {
            info!(
                "  {} {} x{} @ {:.2}",
                position.symbol,
                position.instrument_type,
                position.signed_quantity(),
                position.average_open_price
            );
        }
    }

    client.logout().await?;
    Ok(())
}
