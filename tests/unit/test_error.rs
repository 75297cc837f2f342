use reqwest::StatusCode;
use std::error::Error;
use tasty_client::error::AppError;

#[test]
fn test_app_error_display_api() {
    let error = AppError::Api {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        body: "bad order".to_string(),
    };
    let text = error.to_string();
    assert!(text.contains("422"));
    assert!(text.contains("bad order"));
}

#[test]
fn test_app_error_display_session() {
    assert_eq!(
        AppError::SessionExpired.to_string(),
        "session token is expired"
    );
    assert_eq!(
        AppError::RenewalTokenExpired.to_string(),
        "remember-me token is expired"
    );
}

#[test]
fn test_app_error_display_decode() {
    let error = AppError::Decode("missing items".to_string());
    assert_eq!(error.to_string(), "decode error: missing items");
}

#[test]
fn test_app_error_status() {
    let api = AppError::Api {
        status: StatusCode::NOT_FOUND,
        body: String::new(),
    };
    assert_eq!(api.status(), Some(StatusCode::NOT_FOUND));

    let auth = AppError::Auth {
        status: StatusCode::UNAUTHORIZED,
        body: String::new(),
    };
    assert_eq!(auth.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(AppError::SessionExpired.status(), None);
}

#[test]
fn test_app_error_requires_login() {
    assert!(AppError::SessionExpired.requires_login());
    assert!(AppError::RenewalTokenExpired.requires_login());
    assert!(
        AppError::Auth {
            status: StatusCode::UNAUTHORIZED,
            body: String::new()
        }
        .requires_login()
    );
    assert!(!AppError::InvalidInput("x".to_string()).requires_login());
}

#[test]
fn test_app_error_from_json_keeps_source() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: AppError = json_error.into();
    assert!(matches!(error, AppError::Json(_)));
    assert!(error.source().is_some());
}

#[test]
fn test_app_error_from_io() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::Io(_)));
    assert!(error.to_string().contains("gone"));
}
