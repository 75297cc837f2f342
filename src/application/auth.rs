/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/

//! Authentication module for the tastytrade API
//!
//! This module owns the credential lifecycle:
//! - Login with username and password, optionally asking for a remember-me token
//! - Lazy renewal of the session token before it expires, by exchanging the
//!   remember-me token for a fresh pair of tokens
//! - Logout (server side invalidation)
//! - Persisting a session to bytes and restoring it
//!
//! A [`Session`] can be shared by any number of tasks. Reading the token takes a
//! read lock; renewing it takes the write lock for the whole re-check, exchange
//! and update, so at most one renewal is in flight per session.

use crate::application::config::{Config, EndpointConfig};
use crate::application::rate_limiter::RateLimiter;
use crate::constants::{
    REMEMBER_TOKEN_LIFETIME_DAYS, SESSION_EXPIRY_MARGIN_SECONDS, SESSION_TOKEN_LIFETIME_HOURS,
};
use crate::error::AppError;
use crate::model::auth::{LoginRequest, LoginResponse, PersistedSession};
use crate::model::http::{HttpRequest, make_http_request};
use crate::model::json::JsonField;
use crate::model::retry::RetryConfig;
use chrono::{DateTime, Duration, Utc};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Who the session belongs to; fixed at login
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Identity {
    /// Login name
    pub username: String,
    /// Display name
    pub name: String,
    /// Nickname
    pub nickname: String,
    /// Email
    pub email: String,
    /// External identifier
    pub external_id: String,
}

/// The mutable part of a session: both tokens and their expiries
#[derive(Clone, PartialEq, Eq)]
pub struct SessionTokens {
    /// Token sent in the `Authorization` header
    pub session_token: String,
    /// When the session token stops being accepted
    pub session_expires_on: DateTime<Utc>,
    /// Single use token that buys a new session token
    pub remember_token: Option<String>,
    /// When the remember-me token stops being accepted
    pub remember_expires_on: Option<DateTime<Utc>>,
    /// When the current tokens were issued
    pub authenticated_on: DateTime<Utc>,
}

impl SessionTokens {
    /// Tokens issued at `issued_at`, truncated to whole seconds
    ///
    /// The session token lives 24 hours; the remember-me token, when present, 28 days.
    pub fn issue(
        session_token: String,
        remember_token: Option<String>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let issued_at = DateTime::from_timestamp(issued_at.timestamp(), 0).unwrap_or(issued_at);
        let remember_token = remember_token.filter(|token| !token.is_empty());
        let remember_expires_on = remember_token
            .as_ref()
            .map(|_| issued_at + Duration::days(REMEMBER_TOKEN_LIFETIME_DAYS));
        Self {
            session_token,
            session_expires_on: issued_at + Duration::hours(SESSION_TOKEN_LIFETIME_HOURS),
            remember_token,
            remember_expires_on,
            authenticated_on: issued_at,
        }
    }

    /// Whether the session token must be renewed before use at `now`
    ///
    /// True from five minutes before the real expiry onwards.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        now >= self.session_expires_on - Duration::seconds(SESSION_EXPIRY_MARGIN_SECONDS)
    }

    /// Whether the remember-me token is missing or no longer usable at `now`
    #[must_use]
    pub fn remember_expired(&self, now: DateTime<Utc>) -> bool {
        self.remember_expires_on.is_none_or(|expires| now >= expires)
    }
}

impl fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokens")
            .field("session_expires_on", &self.session_expires_on)
            .field("has_remember_token", &self.remember_token.is_some())
            .field("remember_expires_on", &self.remember_expires_on)
            .field("authenticated_on", &self.authenticated_on)
            .finish_non_exhaustive()
    }
}

/// An authenticated session with the tastytrade API
///
/// Identity, endpoints and the debug flag never change. The tokens sit behind
/// a lock and are only replaced by [`Auth::ensure_valid`].
pub struct Session {
    identity: Identity,
    api_url: String,
    streamer_url: String,
    debug: bool,
    tokens: RwLock<SessionTokens>,
}

impl Session {
    /// Assembles a session from its parts
    pub fn new(
        identity: Identity,
        api_url: impl Into<String>,
        streamer_url: impl Into<String>,
        debug: bool,
        tokens: SessionTokens,
    ) -> Self {
        Self {
            identity,
            api_url: api_url.into(),
            streamer_url: streamer_url.into(),
            debug,
            tokens: RwLock::new(tokens),
        }
    }

    /// Account holder
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// REST base URL selected at login
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Account streamer URL selected at login
    #[must_use]
    pub fn streamer_url(&self) -> &str {
        &self.streamer_url
    }

    /// Whether request and response bodies are logged
    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Snapshot of the current tokens
    pub async fn tokens(&self) -> SessionTokens {
        self.tokens.read().await.clone()
    }

    /// Current session token, without renewing it
    pub async fn session_token(&self) -> String {
        self.tokens.read().await.session_token.clone()
    }

    /// The on-disk record of this session
    pub async fn to_persisted(&self) -> PersistedSession {
        let tokens = self.tokens.read().await;
        PersistedSession {
            authenticated_on: tokens.authenticated_on.timestamp(),
            url: self.api_url.clone(),
            streamer_url: self.streamer_url.clone(),
            token: tokens.session_token.clone(),
            expires: tokens.session_expires_on.timestamp(),
            remember_token: tokens.remember_token.clone().unwrap_or_default(),
            remember_expires: tokens.remember_expires_on.map_or(0, |t| t.timestamp()),
            name: self.identity.name.clone(),
            nickname: self.identity.nickname.clone(),
            email: self.identity.email.clone(),
            external_id: self.identity.external_id.clone(),
            username: self.identity.username.clone(),
            debug: self.debug,
        }
    }

    /// Rebuilds a session from its on-disk record
    ///
    /// The stored streamer URL is kept. Records without one derive it from the
    /// REST URL through `endpoints`: the sandbox REST URL maps to the sandbox
    /// streamer, anything else to the production streamer.
    ///
    /// # Errors
    /// Returns [`AppError::Decode`] when a timestamp is out of range.
    pub fn from_persisted(
        record: PersistedSession,
        endpoints: &EndpointConfig,
    ) -> Result<Self, AppError> {
        let timestamp = |secs: i64, field: &str| {
            DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| AppError::Decode(format!("invalid {field} timestamp {secs}")))
        };
        let remember_token = Some(record.remember_token).filter(|t| !t.is_empty());
        let remember_expires_on = match &remember_token {
            Some(_) => Some(timestamp(record.remember_expires, "remember-expires")?),
            None => None,
        };
        let tokens = SessionTokens {
            session_token: record.token,
            session_expires_on: timestamp(record.expires, "expires")?,
            remember_token,
            remember_expires_on,
            authenticated_on: timestamp(record.authenticated_on, "authenticated-on")?,
        };
        let streamer_url = if record.streamer_url.is_empty() {
            endpoints.streamer_for(&record.url).to_string()
        } else {
            record.streamer_url
        };
        let identity = Identity {
            username: record.username,
            name: record.name,
            nickname: record.nickname,
            email: record.email,
            external_id: record.external_id,
        };
        Ok(Self::new(identity, record.url, streamer_url, record.debug, tokens))
    }

    /// Serializes the session as gzip compressed JSON
    ///
    /// # Errors
    /// Returns an error if serialization or compression fails.
    pub async fn to_bytes(&self) -> Result<Vec<u8>, AppError> {
        let record = self.to_persisted().await;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        serde_json::to_writer(&mut encoder, &record)?;
        encoder.flush()?;
        Ok(encoder.finish()?)
    }

    /// Restores a session written by [`Session::to_bytes`]
    ///
    /// # Errors
    /// Returns an error if the bytes are not a compressed session record.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AppError> {
        Self::from_bytes_with_endpoints(bytes, &EndpointConfig::default())
    }

    /// Like [`Session::from_bytes`], deriving a missing streamer URL from
    /// `endpoints`
    ///
    /// # Errors
    /// Returns an error if the bytes are not a compressed session record.
    pub fn from_bytes_with_endpoints(
        bytes: &[u8],
        endpoints: &EndpointConfig,
    ) -> Result<Self, AppError> {
        let record: PersistedSession = serde_json::from_reader(GzDecoder::new(bytes))?;
        Self::from_persisted(record, endpoints)
    }

    /// Writes the session to `path`
    ///
    /// # Errors
    /// Returns an error if the session cannot be serialized or written.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), AppError> {
        let bytes = self.to_bytes().await?;
        tokio::fs::write(path.as_ref(), bytes).await?;
        debug!("Session saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Reads a session written by [`Session::save`]
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or decoded.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        Self::load_with_endpoints(path, &EndpointConfig::default()).await
    }

    /// Like [`Session::load`], deriving a missing streamer URL from `endpoints`
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or decoded.
    pub async fn load_with_endpoints(
        path: impl AsRef<Path>,
        endpoints: &EndpointConfig,
    ) -> Result<Self, AppError> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        Self::from_bytes_with_endpoints(&bytes, endpoints)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("identity", &self.identity)
            .field("api_url", &self.api_url)
            .field("streamer_url", &self.streamer_url)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

/// Options of a username and password login
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginOptions {
    /// Ask for a remember-me token so the session can renew itself
    pub remember_me: bool,
    /// Use the sandbox environment
    pub sandbox: bool,
    /// Log request and response bodies
    pub debug: bool,
}

impl LoginOptions {
    /// The options configured in `config`
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            remember_me: config.remember_me,
            sandbox: config.sandbox,
            debug: config.debug,
        }
    }
}

/// Session manager: login, renewal and logout
///
/// Holds the HTTP client and the rate limiter shared by every request made
/// on behalf of the sessions it manages.
pub struct Auth {
    config: Arc<Config>,
    http_client: Client,
    rate_limiter: RateLimiter,
}

impl Auth {
    /// Creates the session manager and its HTTP client
    ///
    /// # Errors
    /// Returns [`AppError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: Arc<Config>) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;
        let rate_limiter = RateLimiter::new(&config.rate_limiter);

        Ok(Self {
            config,
            http_client,
            rate_limiter,
        })
    }

    /// Configuration the manager was built with
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.http_client
    }

    pub(crate) fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    pub(crate) fn retry_config(&self) -> &RetryConfig {
        &self.config.retry
    }

    /// Logs in with the credentials and options of the configuration
    ///
    /// # Errors
    /// See [`Auth::login`].
    pub async fn login_with_config(&self) -> Result<Session, AppError> {
        let credentials = &self.config.credentials;
        self.login(
            &credentials.username,
            &credentials.password,
            LoginOptions::from_config(&self.config),
        )
        .await
    }

    /// Logs in with username and password
    ///
    /// The tokens are considered issued when the response arrived.
    ///
    /// # Errors
    /// * [`AppError::Auth`] - the API refused the login (status 400 or above)
    /// * [`AppError::Transport`] - the request could not be sent
    /// * [`AppError::Decode`] - the response carried no session token
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        options: LoginOptions,
    ) -> Result<Session, AppError> {
        let (api_url, streamer_url) = self.config.endpoints.select(options.sandbox);
        debug!("Logging in {} at {}", username, api_url);

        let body = LoginRequest::with_password(username, password, options.remember_me);
        let (response, received_at) = self.exchange(api_url, &body, options.debug).await?;

        let remember_token = options.remember_me.then_some(response.remember_token);
        if options.remember_me && remember_token.as_deref().is_none_or(str::is_empty) {
            warn!("Login asked for a remember-me token but none was returned");
        }
        let tokens = SessionTokens::issue(response.session_token, remember_token, received_at);
        let identity = Identity {
            username: if response.username.is_empty() {
                username.to_string()
            } else {
                response.username
            },
            name: response.name,
            nickname: response.nickname,
            email: response.email,
            external_id: response.external_id,
        };

        info!("✓ Login successful, user: {}", identity.username);
        Ok(Session::new(identity, api_url, streamer_url, options.debug, tokens))
    }

    /// Returns a usable session token, renewing it first when needed
    ///
    /// Concurrent callers share a single renewal: the first one takes the write
    /// lock and exchanges the remember-me token, the others wait and then read
    /// the fresh token. Renewal replaces both tokens; the old remember-me token
    /// is discarded.
    ///
    /// # Errors
    /// * [`AppError::SessionExpired`] - expired and no remember-me token
    /// * [`AppError::RenewalTokenExpired`] - the remember-me token expired too
    /// * any error of the renewal exchange
    pub async fn ensure_valid(&self, session: &Session) -> Result<String, AppError> {
        {
            let tokens = session.tokens.read().await;
            if !tokens.needs_refresh(Utc::now()) {
                return Ok(tokens.session_token.clone());
            }
        }

        let mut tokens = session.tokens.write().await;
        let now = Utc::now();
        if !tokens.needs_refresh(now) {
            debug!("Session token renewed by another caller");
            return Ok(tokens.session_token.clone());
        }

        debug!(
            "Session token expires at {}, remember-me token expires at {:?}",
            tokens.session_expires_on, tokens.remember_expires_on
        );

        let Some(remember_token) = tokens.remember_token.clone() else {
            return Err(AppError::SessionExpired);
        };
        if tokens.remember_expired(now) {
            return Err(AppError::RenewalTokenExpired);
        }

        let body = LoginRequest::with_remember_token(&session.identity.username, &remember_token);
        let (response, received_at) = self
            .exchange(&session.api_url, &body, session.debug)
            .await?;

        *tokens = SessionTokens::issue(
            response.session_token,
            Some(response.remember_token),
            received_at,
        );
        info!(
            "✓ Session renewed for {}, expires at {}",
            session.identity.username, tokens.session_expires_on
        );
        Ok(tokens.session_token.clone())
    }

    /// Invalidates the session on the server
    ///
    /// The local tokens are left untouched.
    ///
    /// # Errors
    /// Returns an error if the token cannot be renewed or the API answers
    /// with a status of 400 or above.
    pub async fn logout(&self, session: &Session) -> Result<(), AppError> {
        info!("Logging out");
        let token = self.ensure_valid(session).await?;
        let request = HttpRequest::new(Method::DELETE, format!("{}/sessions", session.api_url))
            .header("Authorization", &token);
        make_http_request(
            &self.http_client,
            &self.rate_limiter,
            &request,
            &self.config.retry,
            session.debug,
        )
        .await?;
        info!("✓ Logged out successfully");
        Ok(())
    }

    /// Posts to `/sessions` and reads the tokens of the answer
    async fn exchange(
        &self,
        api_url: &str,
        body: &LoginRequest,
        verbose: bool,
    ) -> Result<(LoginResponse, DateTime<Utc>), AppError> {
        let request = HttpRequest::new(Method::POST, format!("{api_url}/sessions"))
            .body(Some(serde_json::to_value(body)?));
        let response = make_http_request(
            &self.http_client,
            &self.rate_limiter,
            &request,
            &self.config.retry,
            verbose,
        )
        .await
        .map_err(|e| match e {
            AppError::Api { status, body } => AppError::Auth { status, body },
            other => other,
        })?;

        let document = response.json()?;
        let login: LoginResponse = JsonField::new(&document).decode();
        if login.session_token.is_empty() {
            return Err(AppError::Decode(
                "session response has no data.session-token".to_string(),
            ));
        }
        Ok((login, response.received_at))
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("config", &self.config)
            .field("rate_limiter", &self.rate_limiter)
            .finish_non_exhaustive()
    }
}
