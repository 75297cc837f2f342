/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/
use crate::application::client::Client;
use crate::application::interfaces::order::OrderService;
use crate::error::AppError;
use crate::model::http::data_items;
use crate::model::json::JsonField;
use crate::model::requests::{OrderRequest, OrdersFilter};
use crate::model::responses::OrderResponse;
use crate::presentation::order_status::OrderStatus;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

fn order_list(document: &Value) -> Result<Vec<OrderStatus>, AppError> {
    Ok(data_items(document)?
        .into_iter()
        .map(JsonField::decode)
        .collect())
}

/// Cancellation answers carry the order either under `data.order` or as `data` itself
fn order_node(document: &Value) -> JsonField<'_> {
    let data = JsonField::new(document).get("data");
    let nested = data.get("order");
    if nested.exists() { nested } else { data }
}

fn order_response(document: &Value) -> OrderResponse {
    let response: OrderResponse = JsonField::new(document).get("data").decode();
    for error in &response.errors {
        warn!("Order rejected: {} ({})", error.message, error.code);
    }
    for warning in &response.warnings {
        debug!("Order warning: {} ({})", warning.message, warning.code);
    }
    response
}

#[async_trait]
impl OrderService for Client {
    async fn get_orders(
        &self,
        account_number: &str,
        filter: Option<&OrdersFilter>,
    ) -> Result<Vec<OrderStatus>, AppError> {
        debug!("Getting orders of {}", account_number);
        let path = format!("accounts/{account_number}/orders");
        let query = filter.map(OrdersFilter::to_query).unwrap_or_default();
        let document = self.get(&path, &query).await?;
        order_list(&document)
    }

    async fn get_live_orders(&self, account_number: &str) -> Result<Vec<OrderStatus>, AppError> {
        debug!("Getting live orders of {}", account_number);
        let path = format!("accounts/{account_number}/orders/live");
        let document = self.get(&path, &[]).await?;
        order_list(&document)
    }

    async fn get_order(
        &self,
        account_number: &str,
        order_id: &str,
    ) -> Result<OrderStatus, AppError> {
        let path = format!("accounts/{account_number}/orders/{order_id}");
        let document = self.get(&path, &[]).await?;
        Ok(order_node(&document).decode())
    }

    async fn submit_order(
        &self,
        account_number: &str,
        order: &OrderRequest,
    ) -> Result<OrderResponse, AppError> {
        order.validate()?;
        info!(
            "Submitting {} {} order with {} legs to {}",
            order.time_in_force,
            order.order_type,
            order.legs.len(),
            account_number
        );
        let path = format!("accounts/{account_number}/orders");
        let document = self.post(&path, serde_json::to_value(order)?).await?;
        let response = order_response(&document);
        if let Some(status) = &response.order {
            info!("Order {} is {}", status.id, status.status);
        }
        Ok(response)
    }

    async fn dry_run_order(
        &self,
        account_number: &str,
        order: &OrderRequest,
    ) -> Result<OrderResponse, AppError> {
        order.validate()?;
        debug!("Dry run of {} order on {}", order.order_type, account_number);
        let path = format!("accounts/{account_number}/orders/dry-run");
        let document = self.post(&path, serde_json::to_value(order)?).await?;
        Ok(order_response(&document))
    }

    async fn delete_order(
        &self,
        account_number: &str,
        order_id: &str,
    ) -> Result<OrderStatus, AppError> {
        info!("Cancelling order {} of {}", order_id, account_number);
        let path = format!("accounts/{account_number}/orders/{order_id}");
        let document = self.delete(&path).await?;
        Ok(order_node(&document).decode())
    }
}
