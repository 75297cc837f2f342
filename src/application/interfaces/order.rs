/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/
use crate::error::AppError;
use crate::model::requests::{OrderRequest, OrdersFilter};
use crate::model::responses::OrderResponse;
use crate::presentation::order_status::OrderStatus;
use async_trait::async_trait;

#[async_trait]
/// Service for listing, submitting and cancelling orders
///
/// Submission answers with a successful status may still carry errors: the
/// returned [`OrderResponse`] lists them instead of failing the call.
pub trait OrderService: Send + Sync {
    /// Gets one page of orders, optionally filtered
    async fn get_orders(
        &self,
        account_number: &str,
        filter: Option<&OrdersFilter>,
    ) -> Result<Vec<OrderStatus>, AppError>;

    /// Gets the orders that are still working or changed today
    async fn get_live_orders(&self, account_number: &str) -> Result<Vec<OrderStatus>, AppError>;

    /// Gets a single order
    async fn get_order(&self, account_number: &str, order_id: &str)
    -> Result<OrderStatus, AppError>;

    /// Submits an order for execution
    ///
    /// The order is validated locally first and rejected with
    /// [`AppError::InvalidInput`] without any network call.
    async fn submit_order(
        &self,
        account_number: &str,
        order: &OrderRequest,
    ) -> Result<OrderResponse, AppError>;

    /// Runs the API's checks on an order without submitting it
    async fn dry_run_order(
        &self,
        account_number: &str,
        order: &OrderRequest,
    ) -> Result<OrderResponse, AppError>;

    /// Cancels an order and returns its resulting state
    async fn delete_order(&self, account_number: &str, order_id: &str)
    -> Result<OrderStatus, AppError>;
}
