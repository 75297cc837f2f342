/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/
use crate::constants::{
    ACCOUNT_STREAMER_URL, API_URL, DEFAULT_TIMEOUT_SECONDS, SANDBOX_ACCOUNT_STREAMER_URL,
    SANDBOX_API_URL, USER_AGENT,
};
use crate::model::retry::RetryConfig;
use crate::utils::config::{get_env_flag, get_env_or_default};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, Default, PartialEq)]
/// Login credentials for the tastytrade API
pub struct Credentials {
    /// Username or email of the tastytrade account
    pub username: String,
    /// Password; never serialized, so never printed
    #[serde(skip_serializing, default)]
    pub password: String,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
/// Base URLs of the production and sandbox environments
pub struct EndpointConfig {
    /// Production REST API
    pub api_url: String,
    /// Production account streamer
    pub streamer_url: String,
    /// Sandbox REST API
    pub sandbox_api_url: String,
    /// Sandbox account streamer
    pub sandbox_streamer_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            api_url: API_URL.to_string(),
            streamer_url: ACCOUNT_STREAMER_URL.to_string(),
            sandbox_api_url: SANDBOX_API_URL.to_string(),
            sandbox_streamer_url: SANDBOX_ACCOUNT_STREAMER_URL.to_string(),
        }
    }
}

impl EndpointConfig {
    /// Every environment pointing at the same base URL, e.g. a local mock server
    pub fn single(base_url: &str) -> Self {
        Self {
            api_url: base_url.to_string(),
            streamer_url: base_url.to_string(),
            sandbox_api_url: base_url.to_string(),
            sandbox_streamer_url: base_url.to_string(),
        }
    }

    /// REST and streamer base URLs of the selected environment
    #[must_use]
    pub fn select(&self, sandbox: bool) -> (&str, &str) {
        if sandbox {
            (&self.sandbox_api_url, &self.sandbox_streamer_url)
        } else {
            (&self.api_url, &self.streamer_url)
        }
    }

    /// Streamer URL matching a REST base URL; anything but the sandbox is production
    #[must_use]
    pub fn streamer_for(&self, api_url: &str) -> &str {
        if api_url == self.sandbox_api_url {
            &self.sandbox_streamer_url
        } else {
            &self.streamer_url
        }
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
/// Configuration for rate limiting API requests
pub struct RateLimiterConfig {
    /// Maximum number of requests allowed per period
    pub max_requests: u32,
    /// Time period in seconds for the rate limit
    pub period_seconds: u64,
    /// Burst size - maximum number of requests that can be made at once
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_requests: 120,
            period_seconds: 60,
            burst_size: 20,
        }
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
/// Main configuration for the tastytrade API client
pub struct Config {
    /// Login credentials
    pub credentials: Credentials,
    /// Environment base URLs
    pub endpoints: EndpointConfig,
    /// User agent sent with every request
    pub user_agent: String,
    /// Ask for a remember-me token at login so the session renews itself
    pub remember_me: bool,
    /// Use the sandbox environment
    pub sandbox: bool,
    /// Log request and response bodies at debug level
    pub debug: bool,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Rate limiter configuration for API requests
    pub rate_limiter: RateLimiterConfig,
    /// Retry policy for idempotent requests
    pub retry: RetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Builds the configuration from the environment, loading `.env` first
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `TASTY_USERNAME`, `TASTY_PASSWORD` | empty |
    /// | `TASTY_API_URL`, `TASTY_STREAMER_URL` | production URLs |
    /// | `TASTY_SANDBOX_API_URL`, `TASTY_SANDBOX_STREAMER_URL` | sandbox URLs |
    /// | `TASTY_SANDBOX`, `TASTY_REMEMBER_ME`, `TASTY_DEBUG` | `false` |
    /// | `TASTY_TIMEOUT` | 30 |
    /// | `TASTY_RATE_LIMIT_MAX_REQUESTS` / `_PERIOD_SECONDS` / `_BURST_SIZE` | 120 / 60 / 20 |
    /// | `MAX_RETRY_COUNT`, `RETRY_DELAY_SECS` | no retries / 2 |
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let username = get_env_or_default("TASTY_USERNAME", String::new());
        let password = get_env_or_default("TASTY_PASSWORD", String::new());
        if username.is_empty() {
            warn!("TASTY_USERNAME not found in environment variables or .env file");
        }
        if password.is_empty() {
            warn!("TASTY_PASSWORD not found in environment variables or .env file");
        }

        let defaults = EndpointConfig::default();
        let rate_defaults = RateLimiterConfig::default();

        Config {
            credentials: Credentials { username, password },
            endpoints: EndpointConfig {
                api_url: get_env_or_default("TASTY_API_URL", defaults.api_url),
                streamer_url: get_env_or_default("TASTY_STREAMER_URL", defaults.streamer_url),
                sandbox_api_url: get_env_or_default(
                    "TASTY_SANDBOX_API_URL",
                    defaults.sandbox_api_url,
                ),
                sandbox_streamer_url: get_env_or_default(
                    "TASTY_SANDBOX_STREAMER_URL",
                    defaults.sandbox_streamer_url,
                ),
            },
            user_agent: USER_AGENT.to_string(),
            remember_me: get_env_flag("TASTY_REMEMBER_ME", false),
            sandbox: get_env_flag("TASTY_SANDBOX", false),
            debug: get_env_flag("TASTY_DEBUG", false),
            timeout: get_env_or_default("TASTY_TIMEOUT", DEFAULT_TIMEOUT_SECONDS),
            rate_limiter: RateLimiterConfig {
                max_requests: get_env_or_default(
                    "TASTY_RATE_LIMIT_MAX_REQUESTS",
                    rate_defaults.max_requests,
                ),
                period_seconds: get_env_or_default(
                    "TASTY_RATE_LIMIT_PERIOD_SECONDS",
                    rate_defaults.period_seconds,
                ),
                burst_size: get_env_or_default(
                    "TASTY_RATE_LIMIT_BURST_SIZE",
                    rate_defaults.burst_size,
                ),
            },
            retry: RetryConfig::default(),
        }
    }

    /// A configuration that talks to `base_url` for every environment
    ///
    /// Credentials are empty, retries are off and the rate limit is generous.
    /// Meant for mock servers and tests; nothing is read from the environment.
    pub fn for_base_url(base_url: &str) -> Self {
        Config {
            credentials: Credentials::default(),
            endpoints: EndpointConfig::single(base_url),
            user_agent: USER_AGENT.to_string(),
            remember_me: false,
            sandbox: false,
            debug: false,
            timeout: DEFAULT_TIMEOUT_SECONDS,
            rate_limiter: RateLimiterConfig {
                max_requests: 1000,
                period_seconds: 1,
                burst_size: 1000,
            },
            retry: RetryConfig::disabled(),
        }
    }

    /// Request timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
