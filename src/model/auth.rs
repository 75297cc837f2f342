/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/
use crate::impl_from_json;
use crate::model::json::JsonField;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /sessions`
///
/// Carries either the password (login) or a remember-me token (renewal).
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct LoginRequest {
    /// Username or email
    pub login: String,
    /// Password, for a full login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Ask for a remember-me token in the response
    pub remember_me: bool,
    /// Remember-me token, for a renewal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remember_token: Option<String>,
}

impl LoginRequest {
    /// A full login with username and password
    pub fn with_password(login: &str, password: &str, remember_me: bool) -> Self {
        Self {
            login: login.to_string(),
            password: Some(password.to_string()),
            remember_me,
            remember_token: None,
        }
    }

    /// A renewal exchanging a remember-me token; always asks for a new one
    pub fn with_remember_token(login: &str, remember_token: &str) -> Self {
        Self {
            login: login.to_string(),
            password: None,
            remember_me: true,
            remember_token: Some(remember_token.to_string()),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("remember_me", &self.remember_me)
            .field("remember_token", &self.remember_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Fields read from a successful `POST /sessions` response
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginResponse {
    /// New session token
    pub session_token: String,
    /// New remember-me token, empty unless requested
    pub remember_token: String,
    /// Username
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

impl_from_json!(LoginResponse {
    session_token: "data.session-token" => JsonField::string,
    remember_token: "data.remember-token" => JsonField::string,
    username: "data.user.username" => JsonField::string,
    name: "data.user.name" => JsonField::string,
    nickname: "data.user.nickname" => JsonField::string,
    email: "data.user.email" => JsonField::string,
    external_id: "data.user.external-id" => JsonField::string,
});

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("username", &self.username)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("has_remember_token", &!self.remember_token.is_empty())
            .finish_non_exhaustive()
    }
}

/// On-disk record of a session
///
/// Timestamps are Unix seconds. A missing remember-me token is stored as an
/// empty string with a zero expiry. Records written before the streamer URL
/// was stored carry an empty `streamer_url`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct PersistedSession {
    pub authenticated_on: i64,
    pub url: String,
    pub streamer_url: String,
    pub token: String,
    pub expires: i64,
    pub remember_token: String,
    pub remember_expires: i64,
    pub name: String,
    pub nickname: String,
    pub email: String,
    pub external_id: String,
    pub username: String,
    pub debug: bool,
}
