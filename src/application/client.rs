/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/

//! Request dispatcher
//!
//! [`Client`] pairs a session manager with one session. Every call first makes
//! sure the session token is valid (renewing it when needed), then sends the
//! request with the token in the `Authorization` header and returns the parsed
//! JSON document. Resource decoding lives in the service implementations.

use crate::application::auth::{Auth, LoginOptions, Session};
use crate::application::config::Config;
use crate::error::AppError;
use crate::model::http::{HttpRequest, make_http_request};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Authenticated client for the tastytrade API
///
/// Cheap to clone: clones share the session, the HTTP client and the rate limiter.
#[derive(Clone, Debug)]
pub struct Client {
    auth: Arc<Auth>,
    session: Arc<Session>,
}

impl Client {
    /// Logs in with the credentials and options found in `config`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built or the login fails.
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let auth = Arc::new(Auth::new(Arc::new(config))?);
        let session = auth.login_with_config().await?;
        Ok(Self::from_parts(auth, Arc::new(session)))
    }

    /// Logs in with explicit credentials and options
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built or the login fails.
    pub async fn login(
        config: Config,
        username: &str,
        password: &str,
        options: LoginOptions,
    ) -> Result<Self, AppError> {
        let auth = Arc::new(Auth::new(Arc::new(config))?);
        let session = auth.login(username, password, options).await?;
        Ok(Self::from_parts(auth, Arc::new(session)))
    }

    /// Wraps an existing session, e.g. one restored with [`Session::load`]
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_session(config: Config, session: Session) -> Result<Self, AppError> {
        let auth = Arc::new(Auth::new(Arc::new(config))?);
        Ok(Self::from_parts(auth, Arc::new(session)))
    }

    /// Assembles a client from a shared session manager and session
    #[must_use]
    pub fn from_parts(auth: Arc<Auth>, session: Arc<Session>) -> Self {
        Self { auth, session }
    }

    /// The session this client acts for
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// The session manager
    #[must_use]
    pub fn auth(&self) -> &Arc<Auth> {
        &self.auth
    }

    /// Invalidates the session on the server
    ///
    /// # Errors
    /// See [`Auth::logout`].
    pub async fn logout(&self) -> Result<(), AppError> {
        self.auth.logout(&self.session).await
    }

    /// Sends an authenticated request and returns the JSON document of the answer
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - path relative to the API base URL, e.g. `accounts/5WT00001/balances`
    /// * `query` - query parameters; keys may repeat
    /// * `body` - JSON body
    ///
    /// # Errors
    /// * errors of [`Auth::ensure_valid`]
    /// * [`AppError::Api`] when the API answers with a status of 400 or above
    /// * [`AppError::Transport`] and [`AppError::Json`]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<Value, AppError> {
        let token = self.auth.ensure_valid(&self.session).await?;
        let url = format!(
            "{}/{}",
            self.session.api_url().trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        let request = HttpRequest::new(method, url)
            .header("Authorization", &token)
            .query(query)
            .body(body);
        let response = make_http_request(
            self.auth.http_client(),
            self.auth.rate_limiter(),
            &request,
            self.auth.retry_config(),
            self.session.debug(),
        )
        .await?;
        debug!("{} {} -> {}", request.method, path, response.status);
        response.json()
    }

    /// GET with query parameters
    ///
    /// # Errors
    /// See [`Client::request`].
    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, AppError> {
        self.request(Method::GET, path, query, None).await
    }

    /// POST with a JSON body
    ///
    /// # Errors
    /// See [`Client::request`].
    pub async fn post(&self, path: &str, body: Value) -> Result<Value, AppError> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    /// DELETE
    ///
    /// # Errors
    /// See [`Client::request`].
    pub async fn delete(&self, path: &str) -> Result<Value, AppError> {
        self.request(Method::DELETE, path, &[], None).await
    }
}
