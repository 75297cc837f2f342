/// Account service implementation for the client
pub mod account_service;
/// Order service implementation for the client
pub mod order_service;
