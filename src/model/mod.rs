/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/
/// Session wire models: login body, login response, persisted record
pub mod auth;
/// HTTP request utilities with rate limiting and retry
pub mod http;
/// Path addressed JSON access and declarative decoding
pub mod json;
/// Filters and order submission bodies
pub mod requests;
/// Order submission responses
pub mod responses;
/// Retry configuration for HTTP requests
pub mod retry;
