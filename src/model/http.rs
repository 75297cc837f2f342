/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/

use crate::application::rate_limiter::RateLimiter;
use crate::error::AppError;
use crate::model::json::JsonField;
use crate::model::retry::RetryConfig;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, error, warn};

/// Keys whose values never appear in logs
const SECRET_KEYS: [&str; 3] = ["password", "remember-token", "session-token"];
/// Headers whose values never appear in logs
const SECRET_HEADERS: [&str; 1] = ["authorization"];
const REDACTED: &str = "<redacted>";

/// Raw outcome of an HTTP exchange with a status below 400
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Response status
    pub status: StatusCode,
    /// Raw body bytes
    pub body: Vec<u8>,
    /// When the response headers arrived
    pub received_at: DateTime<Utc>,
}

impl HttpResponse {
    /// Parses the body as a JSON document; an empty body is `null`
    ///
    /// # Errors
    /// Returns [`AppError::Json`] when the body is not valid JSON.
    pub fn json(&self) -> Result<Value, AppError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Body as text, replacing invalid UTF-8
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// One outbound request
#[derive(Debug, Clone)]
pub struct HttpRequest<'a> {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Extra headers, on top of the client defaults
    pub headers: Vec<(&'a str, &'a str)>,
    /// Query parameters; keys may repeat
    pub query: &'a [(String, String)],
    /// JSON body
    pub body: Option<Value>,
}

impl<'a> HttpRequest<'a> {
    /// A request without headers, query or body
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            query: &[],
            body: None,
        }
    }

    /// Adds a header
    pub fn header(mut self, name: &'a str, value: &'a str) -> Self {
        self.headers.push((name, value));
        self
    }

    /// Sets the query parameters
    pub fn query(mut self, query: &'a [(String, String)]) -> Self {
        self.query = query;
        self
    }

    /// Sets the JSON body
    pub fn body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }
}

/// Makes an HTTP request with rate limiting and retry of idempotent server errors
///
/// Waits on the shared rate limiter before every attempt. A status of 400 or
/// above becomes [`AppError::Api`] carrying the raw body; a transport failure
/// becomes [`AppError::Transport`] and is never retried. When `verbose` is set
/// the request and response are logged at debug level with secrets redacted.
///
/// # Arguments
///
/// * `client` - The HTTP client to use for the request
/// * `rate_limiter` - Shared rate limiter
/// * `request` - Method, URL, headers, query and body
/// * `retry_config` - Retry policy for 5xx answers to `GET`/`DELETE`
/// * `verbose` - Log request and response bodies
pub async fn make_http_request(
    client: &Client,
    rate_limiter: &RateLimiter,
    request: &HttpRequest<'_>,
    retry_config: &RetryConfig,
    verbose: bool,
) -> Result<HttpResponse, AppError> {
    let mut attempt = 0;

    loop {
        rate_limiter.wait().await;

        debug!("{} {}", request.method, request.url);
        if verbose {
            log_request(request);
        }

        let mut builder = client.request(request.method.clone(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, *value);
        }
        if !request.query.is_empty() {
            builder = builder.query(request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let received_at = Utc::now();
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        debug!("Response status: {}", status);
        if verbose {
            debug!("Response body: {}", redact_body(&body));
        }

        if status.as_u16() < 400 {
            return Ok(HttpResponse {
                status,
                body,
                received_at,
            });
        }

        if retry_config.should_retry(&request.method, status, attempt) {
            attempt += 1;
            let delay = retry_config.delay_for(attempt);
            warn!(
                "{} {} answered {} (retry {} of {}), waiting {:?}",
                request.method,
                request.url,
                status,
                attempt,
                retry_config.max_retries(),
                delay
            );
            tokio::time::sleep(delay).await;
            continue;
        }

        let body = String::from_utf8_lossy(&body).into_owned();
        error!("Request failed with status {}: {}", status, body);
        return Err(AppError::Api { status, body });
    }
}

/// Reads `data.items` of a list response
///
/// # Errors
/// Returns [`AppError::Decode`] when `data.items` is present but not a list.
pub fn data_items(document: &Value) -> Result<Vec<JsonField<'_>>, AppError> {
    JsonField::new(document).get("data.items").items()
}

fn log_request(request: &HttpRequest<'_>) {
    let headers: Vec<(&str, &str)> = request
        .headers
        .iter()
        .map(|(name, value)| {
            if SECRET_HEADERS.contains(&name.to_ascii_lowercase().as_str()) {
                (*name, REDACTED)
            } else {
                (*name, *value)
            }
        })
        .collect();
    debug!("Request headers: {:?}", headers);
    if !request.query.is_empty() {
        debug!("Request query: {:?}", request.query);
    }
    if let Some(body) = &request.body {
        debug!("Request body: {}", redact(body));
    }
}

fn redact_body(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => redact(&value).to_string(),
        Err(_) => format!("<{} bytes>", body.len()),
    }
}

/// Copy of `value` with every secret field replaced
pub(crate) fn redact(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, v)| {
                    if SECRET_KEYS.contains(&key.as_str()) {
                        (key.clone(), Value::String(REDACTED.to_string()))
                    } else {
                        (key.clone(), redact(v))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}
