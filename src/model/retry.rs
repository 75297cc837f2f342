/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/
use crate::constants::DEFAULT_RETRY_DELAY_SECONDS;
use crate::utils::config::get_env_or_none;
use pretty_simple_display::DisplaySimple;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry policy for server errors on idempotent requests
///
/// Only `GET` and `DELETE` requests answered with a 5xx status are retried,
/// waiting `delay * attempt` between tries. Client errors and transport
/// failures are returned immediately.
#[derive(Debug, Clone, PartialEq, Eq, DisplaySimple, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retries (None = no retries)
    pub max_retry_count: Option<u32>,
    /// Base delay in seconds between retries (None = default 2 seconds)
    pub retry_delay_secs: Option<u64>,
}

impl RetryConfig {
    /// Reads the configuration from `MAX_RETRY_COUNT` and `RETRY_DELAY_SECS`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration that never retries
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_retry_count: None,
            retry_delay_secs: None,
        }
    }

    /// Creates a new retry configuration with a maximum number of retries
    #[must_use]
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retry_count: Some(max_retries),
            retry_delay_secs: None,
        }
    }

    /// Creates a new retry configuration with both max retries and custom delay
    #[must_use]
    pub fn with_max_retries_and_delay(max_retries: u32, delay_secs: u64) -> Self {
        Self {
            max_retry_count: Some(max_retries),
            retry_delay_secs: Some(delay_secs),
        }
    }

    /// Gets the maximum retry count (0 = no retries)
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retry_count.unwrap_or(0)
    }

    /// Gets the base retry delay in seconds
    #[must_use]
    pub fn delay_secs(&self) -> u64 {
        self.retry_delay_secs.unwrap_or(DEFAULT_RETRY_DELAY_SECONDS)
    }

    /// Delay before retry number `attempt` (1 based)
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        Duration::from_secs(self.delay_secs().saturating_mul(u64::from(attempt)))
    }

    /// Whether a request that got `status` on its `attempt`-th retry may be retried again
    #[must_use]
    pub fn should_retry(&self, method: &Method, status: StatusCode, attempt: u32) -> bool {
        let idempotent = *method == Method::GET || *method == Method::DELETE;
        idempotent && status.is_server_error() && attempt < self.max_retries()
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        let max_retry_count: Option<u32> = get_env_or_none("MAX_RETRY_COUNT");
        let retry_delay_secs: Option<u64> = get_env_or_none("RETRY_DELAY_SECS");

        Self {
            max_retry_count,
            retry_delay_secs,
        }
    }
}
