use reqwest::{Method, StatusCode};
use std::time::Duration;
use tasty_client::model::retry::RetryConfig;

#[test]
fn test_disabled_never_retries() {
    let config = RetryConfig::disabled();
    assert_eq!(config.max_retries(), 0);
    assert!(!config.should_retry(&Method::GET, StatusCode::BAD_GATEWAY, 0));
}

#[test]
fn test_only_idempotent_server_errors_are_retried() {
    let config = RetryConfig::with_max_retries(3);
    assert!(config.should_retry(&Method::GET, StatusCode::SERVICE_UNAVAILABLE, 0));
    assert!(config.should_retry(&Method::DELETE, StatusCode::INTERNAL_SERVER_ERROR, 2));
    assert!(!config.should_retry(&Method::GET, StatusCode::INTERNAL_SERVER_ERROR, 3));
    assert!(!config.should_retry(&Method::POST, StatusCode::INTERNAL_SERVER_ERROR, 0));
    assert!(!config.should_retry(&Method::GET, StatusCode::NOT_FOUND, 0));
}

#[test]
fn test_delay_grows_linearly() {
    let config = RetryConfig::with_max_retries_and_delay(3, 5);
    assert_eq!(config.delay_secs(), 5);
    assert_eq!(config.delay_for(1), Duration::from_secs(5));
    assert_eq!(config.delay_for(3), Duration::from_secs(15));
}

#[test]
fn test_default_delay() {
    let config = RetryConfig::with_max_retries(1);
    assert_eq!(config.delay_secs(), 2);
}
