/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/

/// User agent string used in HTTP requests to identify this client to the tastytrade API
pub const USER_AGENT: &str = concat!("tasty-client/", env!("CARGO_PKG_VERSION"));

/// Production REST API base URL
pub const API_URL: &str = "https://api.tastyworks.com";
/// Sandbox (certification) REST API base URL
pub const SANDBOX_API_URL: &str = "https://api.cert.tastyworks.com";
/// Production account streamer URL
pub const ACCOUNT_STREAMER_URL: &str = "wss://streamer.tastyworks.com";
/// Sandbox (certification) account streamer URL
pub const SANDBOX_ACCOUNT_STREAMER_URL: &str = "wss://streamer.cert.tastyworks.com";

/// Validity of a session token from the moment it was issued (24 hours)
pub const SESSION_TOKEN_LIFETIME_HOURS: i64 = 24;
/// Validity of a remember-me token from the moment it was issued (28 days)
pub const REMEMBER_TOKEN_LIFETIME_DAYS: i64 = 28;
/// A session token is considered expired this many seconds before its real expiry,
/// so a token never expires while a request is in flight (5 minutes)
pub const SESSION_EXPIRY_MARGIN_SECONDS: i64 = 300;

/// Date filters at or before this year are treated as unset
pub const DATE_FILTER_EPOCH_YEAR: i32 = 1900;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
/// Default delay between retries of a failed idempotent request
pub const DEFAULT_RETRY_DELAY_SECONDS: u64 = 2;
