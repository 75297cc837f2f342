use crate::common;
use chrono::{Duration, Utc};
use mockito::{Matcher, Server};
use serde_json::json;
use tasty_client::prelude::*;

#[tokio::test]
async fn test_login_returns_session_with_identity_and_tokens() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/sessions")
        .match_body(Matcher::PartialJson(json!({
            "login": "tester",
            "password": "secret",
            "remember-me": true
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(common::login_body("sess-1", "rem-1"))
        .expect(1)
        .create_async()
        .await;

    let options = LoginOptions {
        remember_me: true,
        ..Default::default()
    };
    let before = Utc::now() - Duration::seconds(1);
    let client = Client::login(
        common::create_test_config(&server.url()),
        "tester",
        "secret",
        options,
    )
    .await
    .expect("login should succeed");
    login.assert_async().await;

    let session = client.session();
    assert_eq!(session.identity().email, "tester@example.com");
    assert_eq!(session.identity().external_id, "U0000000001");
    assert_eq!(session.api_url(), server.url());

    let tokens = session.tokens().await;
    assert_eq!(tokens.session_token, "sess-1");
    assert_eq!(tokens.remember_token.as_deref(), Some("rem-1"));
    assert!(tokens.authenticated_on >= before);
    assert_eq!(
        tokens.session_expires_on - tokens.authenticated_on,
        Duration::hours(24)
    );
    assert_eq!(
        tokens.remember_expires_on.expect("remember expiry") - tokens.authenticated_on,
        Duration::days(28)
    );
}

#[tokio::test]
async fn test_login_without_remember_me_keeps_no_renewal_token() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/sessions")
        .with_status(201)
        .with_body(common::login_body("sess-1", "ignored"))
        .create_async()
        .await;

    let client = Client::login(
        common::create_test_config(&server.url()),
        "tester",
        "secret",
        LoginOptions::default(),
    )
    .await
    .expect("login should succeed");

    let tokens = client.session().tokens().await;
    assert!(tokens.remember_token.is_none());
    assert!(tokens.remember_expires_on.is_none());
}

#[tokio::test]
async fn test_login_refused_is_auth_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/sessions")
        .with_status(401)
        .with_body(r#"{"error":{"code":"invalid_credentials","message":"Invalid login"}}"#)
        .create_async()
        .await;

    let result = Client::login(
        common::create_test_config(&server.url()),
        "tester",
        "wrong",
        LoginOptions::default(),
    )
    .await;

    match result {
        Err(AppError::Auth { status, body }) => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("invalid_credentials"));
        }
        other => panic!("expected an auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_login_without_session_token_is_decode_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/sessions")
        .with_status(201)
        .with_body(r#"{"data":{"user":{"username":"tester"}}}"#)
        .create_async()
        .await;

    let result = Client::login(
        common::create_test_config(&server.url()),
        "tester",
        "secret",
        LoginOptions::default(),
    )
    .await;
    assert!(matches!(result, Err(AppError::Decode(_))));
}

#[tokio::test]
async fn test_fresh_token_is_sent_without_renewal() {
    let mut server = Server::new_async().await;
    let renewal = server
        .mock("POST", "/sessions")
        .expect(0)
        .create_async()
        .await;
    let accounts = server
        .mock("GET", "/customers/me/accounts")
        .match_header("authorization", "session-token")
        .with_status(200)
        .with_body(r#"{"data":{"items":[]}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let result = client.get_accounts().await.expect("accounts");
    assert!(result.is_empty());

    renewal.assert_async().await;
    accounts.assert_async().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_share_one_renewal() {
    let mut server = Server::new_async().await;
    let renewal = server
        .mock("POST", "/sessions")
        .match_body(Matcher::PartialJson(json!({
            "login": "tester",
            "remember-token": "remember-token",
            "remember-me": true
        })))
        .with_status(201)
        .with_body(common::login_body("renewed-session", "renewed-remember"))
        .expect(1)
        .create_async()
        .await;
    let accounts = server
        .mock("GET", "/customers/me/accounts")
        .match_header("authorization", "renewed-session")
        .with_status(200)
        .with_body(r#"{"data":{"items":[]}}"#)
        .expect(8)
        .create_async()
        .await;

    let issued_at = Utc::now() - Duration::hours(24);
    let session = common::session_issued_at(&server.url(), issued_at, Some("remember-token"));
    let client = common::client_with_session(&server.url(), session);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.get_accounts().await })
        })
        .collect();
    for handle in handles {
        handle.await.expect("task panicked").expect("request failed");
    }

    renewal.assert_async().await;
    accounts.assert_async().await;

    let tokens = client.session().tokens().await;
    assert_eq!(tokens.session_token, "renewed-session");
    assert_eq!(tokens.remember_token.as_deref(), Some("renewed-remember"));
    assert!(!tokens.needs_refresh(Utc::now()));
}

#[tokio::test]
async fn test_renewal_starts_five_minutes_before_expiry() {
    let mut server = Server::new_async().await;
    let renewal = server
        .mock("POST", "/sessions")
        .with_status(201)
        .with_body(common::login_body("renewed-session", "renewed-remember"))
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/customers/me/accounts")
        .match_header("authorization", "renewed-session")
        .with_status(200)
        .with_body(r#"{"data":{"items":[]}}"#)
        .create_async()
        .await;

    let issued_at = Utc::now() - Duration::hours(24) + Duration::minutes(4);
    let session = common::session_issued_at(&server.url(), issued_at, Some("remember-token"));
    let client = common::client_with_session(&server.url(), session);

    client.get_accounts().await.expect("accounts");
    renewal.assert_async().await;
}

#[tokio::test]
async fn test_expired_session_without_remember_token() {
    let mut server = Server::new_async().await;
    let renewal = server
        .mock("POST", "/sessions")
        .expect(0)
        .create_async()
        .await;

    let issued_at = Utc::now() - Duration::hours(25);
    let session = common::session_issued_at(&server.url(), issued_at, None);
    let client = common::client_with_session(&server.url(), session);

    let result = client.get_accounts().await;
    assert!(matches!(result, Err(AppError::SessionExpired)));
    renewal.assert_async().await;
}

#[tokio::test]
async fn test_expired_remember_token() {
    let mut server = Server::new_async().await;
    let renewal = server
        .mock("POST", "/sessions")
        .expect(0)
        .create_async()
        .await;

    let issued_at = Utc::now() - Duration::days(29);
    let session = common::session_issued_at(&server.url(), issued_at, Some("remember-token"));
    let client = common::client_with_session(&server.url(), session);

    let result = client.get_accounts().await;
    assert!(matches!(result, Err(AppError::RenewalTokenExpired)));
    assert!(result.unwrap_err().requires_login());
    renewal.assert_async().await;
}

#[tokio::test]
async fn test_refused_renewal_is_auth_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/sessions")
        .with_status(401)
        .with_body(r#"{"error":{"code":"invalid_remember_token"}}"#)
        .create_async()
        .await;

    let issued_at = Utc::now() - Duration::hours(30);
    let session = common::session_issued_at(&server.url(), issued_at, Some("remember-token"));
    let client = common::client_with_session(&server.url(), session);

    let result = client.get_accounts().await;
    assert!(matches!(result, Err(AppError::Auth { .. })));
    // the old tokens are kept
    let tokens = client.session().tokens().await;
    assert_eq!(tokens.session_token, "session-token");
}

#[tokio::test]
async fn test_logout_deletes_session() {
    let mut server = Server::new_async().await;
    let logout = server
        .mock("DELETE", "/sessions")
        .match_header("authorization", "session-token")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    client.logout().await.expect("logout");
    logout.assert_async().await;
}

#[tokio::test]
async fn test_saved_session_is_restored() {
    let server = Server::new_async().await;
    let client = common::create_test_client(&server.url());
    let path = std::env::temp_dir().join(format!(
        "tasty-client-session-{}.gz",
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));

    client.session().save(&path).await.expect("save");
    let restored = Session::load(&path).await.expect("load");
    let endpoints = EndpointConfig::single(&server.url());
    let with_endpoints = Session::load_with_endpoints(&path, &endpoints)
        .await
        .expect("load");
    let _ = std::fs::remove_file(&path);

    assert_eq!(restored.api_url(), client.session().api_url());
    assert_eq!(restored.streamer_url(), "wss://streamer.test");
    assert_eq!(with_endpoints.streamer_url(), "wss://streamer.test");
    assert_eq!(restored.identity(), client.session().identity());
    assert_eq!(restored.tokens().await, client.session().tokens().await);
}
