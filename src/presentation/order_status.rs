/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/

//! Order snapshots as reported by the API
//!
//! An order carries its legs (each with the fills executed against it) and its
//! routing rules (each with conditions built from price components). Child lists
//! keep the order in which the API returned them.

use crate::impl_from_json;
use crate::model::json::JsonField;
use crate::presentation::instrument::InstrumentType;
use crate::presentation::order::{
    ActionCondition, ActionType, Comparator, Effect, Indicator, OrderType,
};
use chrono::{DateTime, Utc};
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};

/// Status values after which an order no longer changes
const TERMINAL_STATUSES: [&str; 4] = ["Filled", "Cancelled", "Rejected", "Expired"];

/// Current state of an order
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct OrderStatus {
    /// Order identifier
    pub id: String,
    /// Account the order belongs to
    pub account_number: String,
    /// Lifecycle status, e.g. `Received`, `Live`, `Filled`
    pub status: String,
    /// Time in force as sent by the API
    pub time_in_force: String,
    /// Pricing behaviour
    pub order_type: OrderType,
    /// Order size
    pub size: String,
    /// Underlying symbol shared by all legs
    pub underlying_symbol: String,
    /// Instrument type of the underlying
    pub underlying_instrument_type: InstrumentType,
    /// Limit price
    pub price: f64,
    /// Whether the price is paid or received
    pub price_effect: Effect,
    /// Notional value
    pub value: f64,
    /// Whether the value is paid or received
    pub value_effect: Effect,
    /// Stop trigger price, as text
    pub stop_trigger: String,
    /// Expiry date for GTD orders
    pub gtc_date: Option<DateTime<Utc>>,
    /// Whether the order can be cancelled
    pub cancellable: bool,
    /// Whether the order can be replaced
    pub editable: bool,
    /// Whether the order was replaced at some point
    pub edited: bool,
    /// Contingent status for orders that wait on a trigger
    pub contingent_status: String,
    /// Confirmation status
    pub confirmation_status: String,
    /// Rejection reason, empty unless rejected
    pub reject_reason: String,
    /// Preflight check identifier
    pub preflight_id: String,
    /// Order this one replaces
    pub replaces_order_id: String,
    /// Order that replaces this one
    pub replacing_order_id: String,
    /// Parent complex order, if any
    pub complex_order_id: String,
    /// Tag of the parent complex order
    pub complex_order_tag: String,
    /// User that placed the order
    pub username: String,
    /// Identifier of the user that placed the order
    pub user_id: String,
    /// User that cancelled the order
    pub cancel_username: String,
    /// Identifier of the user that cancelled the order
    pub cancel_user_id: String,
    /// When the order was received
    pub received_at: Option<DateTime<Utc>>,
    /// When the order went live
    pub live_at: Option<DateTime<Utc>>,
    /// When the order was routed
    pub in_flight_at: Option<DateTime<Utc>>,
    /// When the order was cancelled
    pub cancelled_at: Option<DateTime<Utc>>,
    /// When the order reached a terminal status
    pub terminal_at: Option<DateTime<Utc>>,
    /// Last update
    pub updated_at: Option<DateTime<Utc>>,
    /// Order legs
    pub legs: Vec<LegStatus>,
    /// Routing rules
    pub order_rule: Vec<RuleStatus>,
}

impl_from_json!(OrderStatus {
    id: "id" => JsonField::string,
    account_number: "account-number" => JsonField::string,
    status: "status" => JsonField::string,
    time_in_force: "time-in-force" => JsonField::string,
    order_type: "order-type" => JsonField::decode::<OrderType>,
    size: "size" => JsonField::string,
    underlying_symbol: "underlying-symbol" => JsonField::string,
    underlying_instrument_type: "underlying-instrument-type" => JsonField::decode::<InstrumentType>,
    price: "price" => JsonField::float,
    price_effect: "price-effect" => JsonField::decode::<Effect>,
    value: "value" => JsonField::float,
    value_effect: "value-effect" => JsonField::decode::<Effect>,
    stop_trigger: "stop-trigger" => JsonField::string,
    gtc_date: "gtc-date" => JsonField::time,
    cancellable: "cancellable" => JsonField::boolean,
    editable: "editable" => JsonField::boolean,
    edited: "edited" => JsonField::boolean,
    contingent_status: "contingent-status" => JsonField::string,
    confirmation_status: "confirmation-status" => JsonField::string,
    reject_reason: "reject-reason" => JsonField::string,
    preflight_id: "preflight-id" => JsonField::string,
    replaces_order_id: "replaces-order-id" => JsonField::string,
    replacing_order_id: "replacing-order-id" => JsonField::string,
    complex_order_id: "complex-order-id" => JsonField::string,
    complex_order_tag: "complex-order-tag" => JsonField::string,
    username: "username" => JsonField::string,
    user_id: "user-id" => JsonField::string,
    cancel_username: "cancel-username" => JsonField::string,
    cancel_user_id: "cancel-user-id" => JsonField::string,
    received_at: "received-at" => JsonField::time,
    live_at: "live-at" => JsonField::time,
    in_flight_at: "in-flight-at" => JsonField::time,
    cancelled_at: "cancelled-at" => JsonField::time,
    terminal_at: "terminal-at" => JsonField::time,
    updated_at: "updated-at" => JsonField::time,
    legs: "legs" => JsonField::list::<LegStatus>,
    order_rule: "order-rule" => JsonField::list::<RuleStatus>,
});

impl OrderStatus {
    /// Whether the order reached a status it will not leave
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        TERMINAL_STATUSES.contains(&self.status.as_str())
    }

    /// Whether this order was replaced by another one
    #[must_use]
    pub fn is_replaced(&self) -> bool {
        !self.replacing_order_id.is_empty()
    }

    /// Every fill of every leg, in leg order
    pub fn fills(&self) -> impl Iterator<Item = &FillStatus> {
        self.legs.iter().flat_map(|leg| leg.fills.iter())
    }
}

/// One leg of a reported order
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct LegStatus {
    /// Instrument type of the leg
    pub instrument_type: InstrumentType,
    /// Leg symbol
    pub symbol: String,
    /// Ordered quantity
    pub quantity: String,
    /// Quantity still to be filled
    pub remaining_quantity: String,
    /// Side and intent
    pub action: ActionType,
    /// Executions against this leg
    pub fills: Vec<FillStatus>,
}

impl_from_json!(LegStatus {
    instrument_type: "instrument-type" => JsonField::decode::<InstrumentType>,
    symbol: "symbol" => JsonField::string,
    quantity: "quantity" => JsonField::string,
    remaining_quantity: "remaining-quantity" => JsonField::string,
    action: "action" => JsonField::decode::<ActionType>,
    fills: "fills" => JsonField::list::<FillStatus>,
});

/// An execution against a leg
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct FillStatus {
    /// Fill identifier
    pub fill_id: String,
    /// Executed quantity
    pub quantity: String,
    /// Execution price
    pub fill_price: f64,
    /// Execution time
    pub filled_at: Option<DateTime<Utc>>,
    /// Venue that executed the fill
    pub destination_venue: String,
    /// Exchange group fill identifier
    pub ext_group_fill_id: String,
    /// Exchange execution identifier
    pub ext_exec_id: String,
}

impl_from_json!(FillStatus {
    fill_id: "fill-id" => JsonField::string,
    quantity: "quantity" => JsonField::string,
    fill_price: "fill-price" => JsonField::float,
    filled_at: "filled-at" => JsonField::time,
    destination_venue: "destination-venue" => JsonField::string,
    ext_group_fill_id: "ext-group-fill-id" => JsonField::string,
    ext_exec_id: "ext-exec-id" => JsonField::string,
});

/// Conditional routing rule attached to an order
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RuleStatus {
    /// Earliest routing time
    pub route_after: Option<DateTime<Utc>>,
    /// When the order was routed
    pub routed_at: Option<DateTime<Utc>>,
    /// Scheduled cancellation time
    pub cancel_at: Option<DateTime<Utc>>,
    /// When the order was cancelled by the rule
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Trigger conditions
    pub conditions: Vec<ConditionStatus>,
}

impl_from_json!(RuleStatus {
    route_after: "route-after" => JsonField::time,
    routed_at: "routed-at" => JsonField::time,
    cancel_at: "cancel-at" => JsonField::time,
    cancelled_at: "cancelled-at" => JsonField::time,
    conditions: "conditions" => JsonField::list::<ConditionStatus>,
});

/// A trigger condition of a rule
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ConditionStatus {
    /// Condition identifier
    pub id: String,
    /// What happens when the condition triggers
    pub action: ActionCondition,
    /// When the condition triggered
    pub triggered_at: Option<DateTime<Utc>>,
    /// Indicator value at trigger time
    pub triggered_value: f64,
    /// Watched symbol
    pub symbol: String,
    /// Instrument type of the watched symbol
    pub instrument_type: InstrumentType,
    /// Watched market value
    pub indicator: Indicator,
    /// Comparison against the threshold
    pub comparator: Comparator,
    /// Threshold value
    pub threshold: f64,
    /// Whether the threshold is a notional amount
    pub is_threshold_based_on_notional: bool,
    /// Components making up the watched price
    pub price_components: Vec<ConditionPriceComponent>,
}

impl_from_json!(ConditionStatus {
    id: "id" => JsonField::string,
    action: "action" => JsonField::decode::<ActionCondition>,
    triggered_at: "triggered-at" => JsonField::time,
    triggered_value: "triggered-value" => JsonField::float,
    symbol: "symbol" => JsonField::string,
    instrument_type: "instrument-type" => JsonField::decode::<InstrumentType>,
    indicator: "indicator" => JsonField::decode::<Indicator>,
    comparator: "comparator" => JsonField::decode::<Comparator>,
    threshold: "threshold" => JsonField::float,
    is_threshold_based_on_notional: "is-threshold-based-on-notional" => JsonField::boolean,
    price_components: "price-components" => JsonField::list::<ConditionPriceComponent>,
});

/// One instrument contributing to a condition's price
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ConditionPriceComponent {
    /// Component symbol
    pub symbol: String,
    /// Component instrument type
    pub instrument_type: InstrumentType,
    /// Component quantity
    pub quantity: String,
    /// `Long` or `Short`
    pub quantity_direction: String,
}

impl_from_json!(ConditionPriceComponent {
    symbol: "symbol" => JsonField::string,
    instrument_type: "instrument-type" => JsonField::decode::<InstrumentType>,
    quantity: "quantity" => JsonField::string,
    quantity_direction: "quantity-direction" => JsonField::string,
});
