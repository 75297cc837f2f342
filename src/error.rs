/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/

//! Error type shared by every layer of the client

use reqwest::StatusCode;
use std::fmt;

/// Main error type for the library
#[derive(Debug)]
pub enum AppError {
    /// Network or connection failure reported by the HTTP transport
    Transport(reqwest::Error),
    /// The API answered with a status of 400 or above
    Api {
        /// HTTP status returned by the server
        status: StatusCode,
        /// Raw response body, kept for diagnosis
        body: String,
    },
    /// Login was refused by the API
    Auth {
        /// HTTP status returned by the server
        status: StatusCode,
        /// Raw response body, kept for diagnosis
        body: String,
    },
    /// The session token expired and no remember-me token is available
    SessionExpired,
    /// The remember-me token itself expired; a new login is required
    RenewalTokenExpired,
    /// A response document could not be interpreted
    Decode(String),
    /// JSON serialization or parsing failure
    Json(serde_json::Error),
    /// I/O failure while persisting or loading a session
    Io(std::io::Error),
    /// The caller supplied an invalid argument
    InvalidInput(String),
}

impl AppError {
    /// HTTP status carried by the error, if the server produced one
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Api { status, .. } | AppError::Auth { status, .. } => Some(*status),
            AppError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the caller has to log in again with username and password
    #[must_use]
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            AppError::SessionExpired | AppError::RenewalTokenExpired | AppError::Auth { .. }
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Transport(e) => write!(f, "transport error: {e}"),
            AppError::Api { status, body } => write!(f, "api error {status}: {body}"),
            AppError::Auth { status, body } => write!(f, "authentication failed {status}: {body}"),
            AppError::SessionExpired => write!(f, "session token is expired"),
            AppError::RenewalTokenExpired => write!(f, "remember-me token is expired"),
            AppError::Decode(msg) => write!(f, "decode error: {msg}"),
            AppError::Json(e) => write!(f, "json error: {e}"),
            AppError::Io(e) => write!(f, "io error: {e}"),
            AppError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Transport(e) => Some(e),
            AppError::Json(e) => Some(e),
            AppError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        AppError::Transport(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Json(error)
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        AppError::Io(error)
    }
}
