use crate::common::{self, ACCOUNT};
use chrono::{NaiveDate, TimeZone, Utc};
use mockito::{Matcher, Server};
use serde_json::json;
use tasty_client::prelude::*;

#[tokio::test]
async fn test_get_accounts_decodes_nested_account() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/customers/me/accounts")
        .with_status(200)
        .with_body(
            json!({
                "data": {
                    "items": [
                        {
                            "account": {
                                "account-number": ACCOUNT,
                                "external-id": "A0000000001",
                                "opened-at": "2023-02-17T15:04:05.123+00:00",
                                "nickname": "Individual",
                                "account-type-name": "Individual",
                                "day-trader-status": false,
                                "is-firm-error": false,
                                "is-firm-proprietary": false,
                                "is-test-drive": false,
                                "margin-or-cash": "Margin",
                                "is-foreign": false,
                                "funding-date": "2023-02-20"
                            },
                            "authority-level": "owner"
                        },
                        {
                            "account": {"account-number": "5WT00002", "margin-or-cash": "Cash"},
                            "authority-level": "trading-only"
                        }
                    ]
                },
                "context": "/customers/me/accounts"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let accounts = client.get_accounts().await.expect("accounts");

    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].account_number, ACCOUNT);
    assert_eq!(accounts[0].authority_level, "owner");
    assert_eq!(accounts[0].margin_or_cash, "Margin");
    assert_eq!(
        accounts[0].funding_date,
        Some(Utc.with_ymd_and_hms(2023, 2, 20, 0, 0, 0).unwrap())
    );
    assert_eq!(accounts[1].account_number, "5WT00002");
    assert!(accounts[1].opened_at.is_none());
}

#[tokio::test]
async fn test_get_accounts_rejects_non_list_items() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/customers/me/accounts")
        .with_status(200)
        .with_body(r#"{"data":{"items":{"account":{}}}}"#)
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let result = client.get_accounts().await;
    assert!(matches!(result, Err(AppError::Decode(_))));
}

#[tokio::test]
async fn test_get_balance() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", format!("/accounts/{ACCOUNT}/balances").as_str())
        .with_status(200)
        .with_body(
            json!({
                "data": {
                    "account-number": ACCOUNT,
                    "cash-balance": "1000.25",
                    "net-liquidating-value": "15234.5",
                    "equity-buying-power": 2000,
                    "pending-cash-effect": "None",
                    "unsettled-cryptocurrency-fiat-effect": "Debit",
                    "updated-at": "2024-03-01T20:00:00Z"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let balance = client.get_balance(ACCOUNT).await.expect("balance");

    assert_eq!(balance.account_number, ACCOUNT);
    assert_eq!(balance.cash_balance, 1000.25);
    assert_eq!(balance.net_liquidating_value, 15234.5);
    assert_eq!(balance.equity_buying_power, 2000.0);
    assert_eq!(balance.pending_cash_effect, Effect::NoEffect);
    assert_eq!(balance.unsettled_cryptocurrency_fiat_effect, Effect::Debit);
    assert_eq!(balance.margin_equity, 0.0);
    assert!(balance.updated_at.is_some());
}

#[tokio::test]
async fn test_get_balance_snapshot_takes_first_item() {
    let mut server = Server::new_async().await;
    let snapshot = server
        .mock("GET", format!("/accounts/{ACCOUNT}/balance-snapshots").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("snapshot-date".into(), "2024-01-02".into()),
            Matcher::UrlEncoded("time-of-day".into(), "EOD".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "data": {
                    "items": [
                        {"account-number": ACCOUNT, "cash-balance": "10.5", "snapshot-date": "2024-01-02"},
                        {"account-number": ACCOUNT, "cash-balance": "99"}
                    ]
                }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let balance = client
        .get_balance_snapshot(ACCOUNT, TimeOfDay::EndOfDay, date)
        .await
        .expect("snapshot");

    snapshot.assert_async().await;
    assert_eq!(balance.cash_balance, 10.5);
    assert_eq!(
        balance.snapshot_date,
        Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap())
    );
}

#[tokio::test]
async fn test_get_balance_snapshot_empty_list_is_decode_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", format!("/accounts/{ACCOUNT}/balance-snapshots").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"data":{"items":[]}}"#)
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let result = client
        .get_balance_snapshot(ACCOUNT, TimeOfDay::BeginningOfDay, date)
        .await;
    assert!(matches!(result, Err(AppError::Decode(_))));
}

#[tokio::test]
async fn test_get_positions_sends_filter() {
    let mut server = Server::new_async().await;
    let positions = server
        .mock("GET", format!("/accounts/{ACCOUNT}/positions").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("underlying-symbol[]".into(), "SPY".into()),
            Matcher::UrlEncoded("underlying-symbol[]".into(), "QQQ".into()),
            Matcher::UrlEncoded("instrument-type".into(), "Equity Option".into()),
            Matcher::UrlEncoded("include-closed-positions".into(), "true".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "data": {
                    "items": [
                        {
                            "account-number": ACCOUNT,
                            "symbol": "SPY   240621C00500000",
                            "instrument-type": "Equity Option",
                            "underlying-symbol": "SPY",
                            "quantity": 3,
                            "quantity-direction": "Short",
                            "average-open-price": "4.15",
                            "multiplier": 100,
                            "cost-effect": "Credit",
                            "realized-day-gain-effect": "None",
                            "expires-at": "2024-06-21T20:15:00.000+00:00"
                        }
                    ]
                }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let filter = PositionFilter::default()
        .with_underlying_symbol("SPY")
        .with_underlying_symbol("QQQ")
        .with_instrument_type(InstrumentType::EquityOption)
        .with_closed_positions();
    let result = client
        .get_positions(ACCOUNT, Some(&filter))
        .await
        .expect("positions");

    positions.assert_async().await;
    assert_eq!(result.len(), 1);
    let position = &result[0];
    assert_eq!(position.instrument_type, InstrumentType::EquityOption);
    assert_eq!(position.quantity, 3.0);
    assert_eq!(position.signed_quantity(), -3.0);
    assert_eq!(position.multiplier, 100.0);
    assert_eq!(position.cost_effect, Effect::Credit);
    assert_eq!(position.realized_day_gain_effect, Effect::NoEffect);
    assert!(position.expires_at.is_some());
}

#[tokio::test]
async fn test_get_transactions_sends_default_sort() {
    let mut server = Server::new_async().await;
    let transactions = server
        .mock("GET", format!("/accounts/{ACCOUNT}/transactions").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("per-page".into(), "50".into()),
            Matcher::UrlEncoded("sort".into(), "Desc".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "data": {
                    "items": [
                        {
                            "id": 2001,
                            "account-number": ACCOUNT,
                            "transaction-type": "Trade",
                            "transaction-sub-type": "Sell to Open",
                            "action": "Sell to Open",
                            "instrument-type": "Equity Option",
                            "quantity": "1.0",
                            "value": "415.0",
                            "value-effect": "Credit",
                            "order-id": 55,
                            "lots": [
                                {"id": "L1", "transaction-id": 2001, "quantity": "1", "price": "4.15", "quantity-direction": "Short"}
                            ]
                        }
                    ]
                },
                "pagination": {"per-page": 50, "page-offset": 0, "total-items": 1, "total-pages": 1}
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let filter = TransactionFilter::default().with_per_page(50);
    let result = client
        .get_transactions(ACCOUNT, Some(&filter))
        .await
        .expect("transactions");

    transactions.assert_async().await;
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 2001);
    assert_eq!(result[0].action, ActionType::SellToOpen);
    assert_eq!(result[0].value_effect, Effect::Credit);
    assert_eq!(result[0].order_id, 55);
    assert_eq!(result[0].lots.len(), 1);
    assert_eq!(result[0].lots[0].price, 4.15);
}

#[tokio::test]
async fn test_get_all_transactions_walks_every_page() {
    let mut server = Server::new_async().await;
    let page = |offset: u32, ids: &[i64]| {
        let items: Vec<_> = ids
            .iter()
            .map(|id| json!({"id": id, "account-number": ACCOUNT}))
            .collect();
        json!({
            "data": {"items": items},
            "pagination": {"per-page": 2, "page-offset": offset, "total-items": 3, "total-pages": 2}
        })
        .to_string()
    };
    let first = server
        .mock("GET", format!("/accounts/{ACCOUNT}/transactions").as_str())
        .match_query(Matcher::Regex("^per-page=2&sort=Desc$".into()))
        .with_status(200)
        .with_body(page(0, &[1, 2]))
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", format!("/accounts/{ACCOUNT}/transactions").as_str())
        .match_query(Matcher::Regex("^per-page=2&page-offset=1&sort=Desc$".into()))
        .with_status(200)
        .with_body(page(1, &[3]))
        .expect(1)
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let filter = TransactionFilter::default().with_per_page(2);
    let result = client
        .get_all_transactions(ACCOUNT, Some(&filter))
        .await
        .expect("transactions");

    first.assert_async().await;
    second.assert_async().await;
    let ids: Vec<i64> = result.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", format!("/accounts/{ACCOUNT}/balances").as_str())
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    match client.get_balance(ACCOUNT).await {
        Err(AppError::Api { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected an api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_errors_on_reads_are_retried() {
    let mut server = Server::new_async().await;
    let balances = server
        .mock("GET", format!("/accounts/{ACCOUNT}/balances").as_str())
        .with_status(503)
        .with_body("unavailable")
        .expect(3)
        .create_async()
        .await;

    let mut config = common::create_test_config(&server.url());
    config.retry = RetryConfig::with_max_retries_and_delay(2, 0);
    let session = common::session_issued_at(&server.url(), Utc::now(), None);
    let client = Client::from_session(config, session).expect("client");

    let result = client.get_balance(ACCOUNT).await;
    assert!(matches!(result, Err(AppError::Api { status, .. }) if status.as_u16() == 503));
    balances.assert_async().await;
}
