/// Session lifecycle: login, renewal, logout and persistence
pub mod auth;
/// Authenticated request dispatcher
pub mod client;
/// Application configuration module
pub mod config;
/// Service traits
pub mod interfaces;
/// Rate limiter module for API request throttling
pub mod rate_limiter;
/// Service implementations for the client
pub mod services;
