//! # tasty-client
//!
//! A typed client for the tastytrade Open API.
//!
//! The crate takes care of the two-token session lifecycle: a short-lived
//! session token authorizes every request, and a long-lived remember-me token
//! renews it without the password. Renewal is transparent and happens at most
//! once even when many tasks share the same [`application::client::Client`].
//!
//! On top of the session it exposes account, balance, position, transaction
//! and order operations that decode the API's JSON documents into typed
//! records.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tasty_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     setup_logger();
//!     let client = Client::new(Config::new()).await?;
//!     for account in client.get_accounts().await? {
//!         let positions = client.get_positions(&account.account_number, None).await?;
//!         info!("{}: {} positions", account.account_number, positions.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! [`application::config::Config::new`] reads a `.env` file and the following
//! variables:
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `TASTY_USERNAME` / `TASTY_PASSWORD` | login credentials | none |
//! | `TASTY_SANDBOX` | use the certification environment | `false` |
//! | `TASTY_REMEMBER_ME` | request a remember-me token | `false` |
//! | `TASTY_DEBUG` | log requests and answers (secrets redacted) | `false` |
//! | `TASTY_API_URL` / `TASTY_STREAMER_URL` | production endpoints | tastytrade |
//! | `TASTY_SANDBOX_API_URL` / `TASTY_SANDBOX_STREAMER_URL` | certification endpoints | tastytrade |
//! | `TASTY_TIMEOUT` | request timeout in seconds | `30` |
//! | `TASTY_RATE_LIMIT_MAX_REQUESTS` / `_PERIOD_SECONDS` / `_BURST_SIZE` | client-side throttle | `120` / `60` / `20` |
//! | `MAX_RETRY_COUNT` / `RETRY_DELAY_SECS` | retries of idempotent requests on 5xx | no retries / `2` |
//! | `LOGLEVEL` | `tracing` level | `INFO` |

/// Session management, configuration, service traits and their implementations
pub mod application;
/// Endpoints, token lifetimes and other constants
pub mod constants;
/// Library error type
pub mod error;
/// Wire types: JSON access, requests, responses and transport
pub mod model;
/// Commonly used items in one import
pub mod prelude;
/// Decoded domain records
pub mod presentation;
/// Environment and logging helpers
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
