/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/
use crate::impl_from_json;
use crate::model::json::JsonField;
use crate::presentation::order::Effect;
use crate::presentation::order_status::OrderStatus;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};

/// Outcome of an order submission, dry run or cancellation
///
/// A successful HTTP status with non-empty `errors` is still a response: the
/// caller inspects `errors` and `warnings` to learn why the order was not accepted.
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct OrderResponse {
    /// The order as accepted (or simulated)
    pub order: Option<OrderStatus>,
    /// Effect on buying power
    pub buying_power_effect: Option<BuyingPowerChange>,
    /// Fees charged for the order
    pub fee_calculation: Option<FeeInfo>,
    /// Rejection reasons
    pub errors: Vec<ErrorMsg>,
    /// Non blocking warnings
    pub warnings: Vec<ErrorMsg>,
}

impl_from_json!(OrderResponse {
    order: "order" => JsonField::optional::<OrderStatus>,
    buying_power_effect: "buying-power-effect" => JsonField::optional::<BuyingPowerChange>,
    fee_calculation: "fee-calculation" => JsonField::optional::<FeeInfo>,
    errors: "errors" => JsonField::list::<ErrorMsg>,
    warnings: "warnings" => JsonField::list::<ErrorMsg>,
});

impl OrderResponse {
    /// Whether the API reported any error for the order
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Change in buying power caused by an order
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct BuyingPowerChange {
    pub change_in_margin_requirement: f64,
    pub change_in_margin_requirement_effect: Effect,
    pub change_in_buying_power: f64,
    pub change_in_buying_power_effect: Effect,
    pub current_buying_power: f64,
    pub current_buying_power_effect: Effect,
    pub new_buying_power: f64,
    pub new_buying_power_effect: Effect,
    pub isolated_order_margin_requirement: f64,
    pub isolated_order_margin_requirement_effect: Effect,
    pub is_spread: bool,
    pub impact: f64,
    /// Overall effect on cash, read from `effect`
    pub effect: Effect,
}

impl_from_json!(BuyingPowerChange {
    change_in_margin_requirement: "change-in-margin-requirement" => JsonField::float,
    change_in_margin_requirement_effect: "change-in-margin-requirement-effect" => JsonField::decode::<Effect>,
    change_in_buying_power: "change-in-buying-power" => JsonField::float,
    change_in_buying_power_effect: "change-in-buying-power-effect" => JsonField::decode::<Effect>,
    current_buying_power: "current-buying-power" => JsonField::float,
    current_buying_power_effect: "current-buying-power-effect" => JsonField::decode::<Effect>,
    new_buying_power: "new-buying-power" => JsonField::float,
    new_buying_power_effect: "new-buying-power-effect" => JsonField::decode::<Effect>,
    isolated_order_margin_requirement: "isolated-order-margin-requirement" => JsonField::float,
    isolated_order_margin_requirement_effect: "isolated-order-margin-requirement-effect" => JsonField::decode::<Effect>,
    is_spread: "is-spread" => JsonField::boolean,
    impact: "impact" => JsonField::float,
    effect: "effect" => JsonField::decode::<Effect>,
});

/// Fees charged for an order
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct FeeInfo {
    pub regulatory_fees: f64,
    pub regulatory_fees_effect: Effect,
    pub clearing_fees: f64,
    pub clearing_fees_effect: Effect,
    pub commission: f64,
    pub commission_effect: Effect,
    pub proprietary_index_option_fees: f64,
    pub proprietary_index_option_fees_effect: Effect,
    pub total_fees: f64,
    pub total_fees_effect: Effect,
}

impl_from_json!(FeeInfo {
    regulatory_fees: "regulatory-fees" => JsonField::float,
    regulatory_fees_effect: "regulatory-fees-effect" => JsonField::decode::<Effect>,
    clearing_fees: "clearing-fees" => JsonField::float,
    clearing_fees_effect: "clearing-fees-effect" => JsonField::decode::<Effect>,
    commission: "commission" => JsonField::float,
    commission_effect: "commission-effect" => JsonField::decode::<Effect>,
    proprietary_index_option_fees: "proprietary-index-option-fees" => JsonField::float,
    proprietary_index_option_fees_effect: "proprietary-index-option-fees-effect" => JsonField::decode::<Effect>,
    total_fees: "total-fees" => JsonField::float,
    total_fees_effect: "total-fees-effect" => JsonField::decode::<Effect>,
});

/// Error or warning attached to an order response
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ErrorMsg {
    /// Machine readable code, e.g. `margin_check_failed`
    pub code: String,
    /// Human readable message
    pub message: String,
    /// Preflight check that produced the message
    pub preflight_id: String,
}

impl_from_json!(ErrorMsg {
    code: "code" => JsonField::string,
    message: "message" => JsonField::string,
    preflight_id: "preflight-id" => JsonField::string,
});

/// Paging metadata of list endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Pagination {
    pub per_page: i64,
    pub page_offset: i64,
    pub item_offset: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl_from_json!(Pagination {
    per_page: "per-page" => JsonField::int,
    page_offset: "page-offset" => JsonField::int,
    item_offset: "item-offset" => JsonField::int,
    total_items: "total-items" => JsonField::int,
    total_pages: "total-pages" => JsonField::int,
});
