use tasty_client::prelude::*;

/// Reuses a saved session when possible and logs in otherwise.
///
/// The session is written gzip compressed to `TASTY_SESSION_FILE`
/// (default `tasty-session.gz`); the next run skips the password login and
/// renews the token with the remember-me token when it expired.
///
/// Run with: cargo run --bin simple_session_store
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();
    let path =
        std::env::var("TASTY_SESSION_FILE").unwrap_or_else(|_| "tasty-session.gz".to_string());
    let mut config = Config::new();
    config.remember_me = true;

    let client = match Session::load(&path).await {
        Ok(session) => {
            info!("Restored session of {}", session.identity().username);
            Client::from_session(config, session)?
        }
        Err(e) => {
            warn!("No usable saved session ({}), logging in", e);
            Client::new(config).await?
        }
    };

    let accounts = match client.get_accounts().await {
        Ok(accounts) => accounts,
        Err(e) if e.requires_login() => {
            warn!("Saved session can no longer be renewed: {}", e);
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };
    info!("{} accounts available", accounts.len());

    let tokens = client.session().tokens().await;
    info!(
        "Session token valid until {}, remember-me token until {:?}",
        tokens.session_expires_on, tokens.remember_expires_on
    );

    client.session().save(&path).await?;
    info!("✓ Session saved to {}", path);
    Ok(())
}
