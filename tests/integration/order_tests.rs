use crate::common::{self, ACCOUNT};
use mockito::{Matcher, Server};
use serde_json::{Value, json};
use tasty_client::prelude::*;

fn order_document(id: u64, status: &str) -> Value {
    json!({
        "id": id,
        "account-number": ACCOUNT,
        "time-in-force": "Day",
        "order-type": "Limit",
        "size": "1",
        "underlying-symbol": "AAPL",
        "underlying-instrument-type": "Equity",
        "price": "150.5",
        "price-effect": "Debit",
        "status": status,
        "cancellable": true,
        "editable": true,
        "edited": false,
        "received-at": "2024-03-01T14:30:00.000+00:00",
        "updated-at": 1709303400000_u64,
        "legs": [
            {
                "instrument-type": "Equity",
                "symbol": "AAPL",
                "quantity": "1",
                "remaining-quantity": "0",
                "action": "Buy to Open",
                "fills": [
                    {"fill-id": "F1", "quantity": "1", "fill-price": "150.45", "filled-at": "2024-03-01T14:30:01Z"}
                ]
            }
        ],
        "order-rule": [
            {
                "route-after": "2024-03-01T14:35:00Z",
                "conditions": [
                    {
                        "id": "C1",
                        "action": "route",
                        "symbol": "SPY",
                        "instrument-type": "Equity",
                        "indicator": "last",
                        "comparator": "gte",
                        "threshold": "500",
                        "price-components": [
                            {"symbol": "SPY", "instrument-type": "Equity", "quantity": "1", "quantity-direction": "Long"}
                        ]
                    }
                ]
            }
        ]
    })
}

fn limit_order() -> OrderRequest {
    OrderRequest::limit(TimeInForce::Day, 150.5, Effect::Debit).with_leg(OrderLeg::new(
        InstrumentType::Equity,
        "AAPL",
        1.0,
        ActionType::BuyToOpen,
    ))
}

#[tokio::test]
async fn test_get_orders_decodes_full_tree() {
    let mut server = Server::new_async().await;
    let orders = server
        .mock("GET", format!("/accounts/{ACCOUNT}/orders").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("status[]".into(), "Filled".into()),
            Matcher::UrlEncoded("status[]".into(), "Live".into()),
            Matcher::UrlEncoded("sort".into(), "Asc".into()),
            Matcher::UrlEncoded("underlying-symbol".into(), "AAPL".into()),
        ]))
        .with_status(200)
        .with_body(json!({"data": {"items": [order_document(1001, "Filled")]}}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let filter = OrdersFilter::default()
        .with_status("Filled")
        .with_status("Live")
        .with_sort(SortOrder::Ascending)
        .with_underlying_symbol("AAPL");
    let result = client
        .get_orders(ACCOUNT, Some(&filter))
        .await
        .expect("orders");
    orders.assert_async().await;

    assert_eq!(result.len(), 1);
    let order = &result[0];
    assert_eq!(order.id, "1001");
    assert_eq!(order.order_type, OrderType::Limit);
    assert_eq!(order.underlying_instrument_type, InstrumentType::Equity);
    assert_eq!(order.price, 150.5);
    assert_eq!(order.price_effect, Effect::Debit);
    assert!(order.is_terminal());
    // a non-string timestamp is left unset
    assert!(order.updated_at.is_none());

    assert_eq!(order.legs.len(), 1);
    assert_eq!(order.legs[0].action, ActionType::BuyToOpen);
    assert_eq!(order.legs[0].fills[0].fill_price, 150.45);
    assert_eq!(order.fills().count(), 1);

    let rule = &order.order_rule[0];
    assert!(rule.route_after.is_some());
    let condition = &rule.conditions[0];
    assert_eq!(condition.action, ActionCondition::Route);
    assert_eq!(condition.indicator, Indicator::Last);
    assert_eq!(condition.comparator, Comparator::GreaterOrEqual);
    assert_eq!(condition.threshold, 500.0);
    assert_eq!(condition.price_components[0].quantity_direction, "Long");
}

#[tokio::test]
async fn test_get_live_orders() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", format!("/accounts/{ACCOUNT}/orders/live").as_str())
        .with_status(200)
        .with_body(
            json!({"data": {"items": [order_document(1, "Live"), order_document(2, "Received")]}})
                .to_string(),
        )
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let orders = client.get_live_orders(ACCOUNT).await.expect("live orders");
    let ids: Vec<&str> = orders.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert!(orders.iter().all(|o| !o.is_terminal()));
}

#[tokio::test]
async fn test_get_order() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", format!("/accounts/{ACCOUNT}/orders/1001").as_str())
        .with_status(200)
        .with_body(json!({"data": order_document(1001, "Live")}).to_string())
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let order = client.get_order(ACCOUNT, "1001").await.expect("order");
    assert_eq!(order.id, "1001");
    assert_eq!(order.status, "Live");
}

#[tokio::test]
async fn test_submit_order_posts_to_account_orders() {
    let mut server = Server::new_async().await;
    let submit = server
        .mock("POST", format!("/accounts/{ACCOUNT}/orders").as_str())
        .match_header("authorization", "session-token")
        .match_body(Matcher::PartialJson(json!({
            "time-in-force": "Day",
            "order-type": "Limit",
            "price": 150.5,
            "price-effect": "Debit",
            "legs": [
                {"instrument-type": "Equity", "symbol": "AAPL", "quantity": 1.0, "action": "Buy to Open"}
            ]
        })))
        .with_status(201)
        .with_body(
            json!({
                "data": {
                    "order": order_document(1001, "Routed"),
                    "buying-power-effect": {
                        "change-in-buying-power": "150.5",
                        "change-in-buying-power-effect": "Debit",
                        "is-spread": false,
                        "effect": "Debit"
                    },
                    "fee-calculation": {"total-fees": "0.01", "total-fees-effect": "Debit"},
                    "warnings": [{"code": "tif_next_valid_sesssion", "message": "Order will be routed next session"}]
                }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let response = client
        .submit_order(ACCOUNT, &limit_order())
        .await
        .expect("submit");
    submit.assert_async().await;

    assert!(!response.has_errors());
    assert_eq!(response.warnings.len(), 1);
    let order = response.order.expect("order");
    assert_eq!(order.id, "1001");
    let buying_power = response.buying_power_effect.expect("buying power");
    assert_eq!(buying_power.change_in_buying_power, 150.5);
    assert_eq!(buying_power.effect, Effect::Debit);
    let fees = response.fee_calculation.expect("fees");
    assert_eq!(fees.total_fees, 0.01);
}

#[tokio::test]
async fn test_submit_order_soft_rejection_is_ok() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", format!("/accounts/{ACCOUNT}/orders").as_str())
        .with_status(201)
        .with_body(
            json!({
                "data": {
                    "errors": [
                        {"code": "insufficient_buying_power", "message": "Not enough buying power"}
                    ]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let response = client
        .submit_order(ACCOUNT, &limit_order())
        .await
        .expect("soft rejection is not an error");
    assert!(response.has_errors());
    assert!(response.order.is_none());
    assert_eq!(response.errors[0].code, "insufficient_buying_power");
}

#[tokio::test]
async fn test_submit_order_hard_rejection_is_api_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", format!("/accounts/{ACCOUNT}/orders").as_str())
        .with_status(422)
        .with_body(r#"{"error":{"code":"validation_error","message":"Invalid order"}}"#)
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    match client.submit_order(ACCOUNT, &limit_order()).await {
        Err(AppError::Api { status, body }) => {
            assert_eq!(status.as_u16(), 422);
            assert!(body.contains("validation_error"));
        }
        other => panic!("expected an api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_order_is_rejected_locally() {
    let mut server = Server::new_async().await;
    let submit = server
        .mock("POST", format!("/accounts/{ACCOUNT}/orders").as_str())
        .expect(0)
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let order = OrderRequest::limit(TimeInForce::Day, 150.5, Effect::Debit);
    let result = client.submit_order(ACCOUNT, &order).await;

    assert!(matches!(result, Err(AppError::InvalidInput(_))));
    submit.assert_async().await;
}

#[tokio::test]
async fn test_dry_run_order() {
    let mut server = Server::new_async().await;
    let dry_run = server
        .mock("POST", format!("/accounts/{ACCOUNT}/orders/dry-run").as_str())
        .with_status(201)
        .with_body(json!({"data": {"order": order_document(0, "Received")}}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let response = client
        .dry_run_order(ACCOUNT, &limit_order())
        .await
        .expect("dry run");
    dry_run.assert_async().await;
    assert_eq!(response.order.expect("order").status, "Received");
}

#[tokio::test]
async fn test_delete_order_reads_nested_or_flat_order() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", format!("/accounts/{ACCOUNT}/orders/1001").as_str())
        .with_status(200)
        .with_body(json!({"data": {"order": order_document(1001, "Cancel Requested")}}).to_string())
        .create_async()
        .await;
    server
        .mock("DELETE", format!("/accounts/{ACCOUNT}/orders/1002").as_str())
        .with_status(200)
        .with_body(json!({"data": order_document(1002, "Cancelled")}).to_string())
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let nested = client.delete_order(ACCOUNT, "1001").await.expect("delete");
    assert_eq!(nested.id, "1001");
    assert_eq!(nested.status, "Cancel Requested");

    let flat = client.delete_order(ACCOUNT, "1002").await.expect("delete");
    assert_eq!(flat.id, "1002");
    assert!(flat.is_terminal());
}

#[tokio::test]
async fn test_delete_order_failure_is_api_error() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", format!("/accounts/{ACCOUNT}/orders/1003").as_str())
        .with_status(404)
        .with_body(r#"{"error":{"code":"not_found"}}"#)
        .create_async()
        .await;

    let client = common::create_test_client(&server.url());
    let result = client.delete_order(ACCOUNT, "1003").await;
    assert!(matches!(
        result,
        Err(AppError::Api { status, .. }) if status.as_u16() == 404
    ));
}
