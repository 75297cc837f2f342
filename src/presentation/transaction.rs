/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/
use crate::impl_from_json;
use crate::model::json::JsonField;
use crate::presentation::instrument::InstrumentType;
use crate::presentation::order::{ActionType, Effect};
use chrono::{DateTime, Utc};
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};

/// A ledger entry of an account: trades, money movements, fees, receipts
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Transaction {
    pub id: i64,
    pub account_number: String,
    pub executed_at: Option<DateTime<Utc>>,
    pub transaction_date: Option<DateTime<Utc>>,
    /// Broad category, e.g. `Trade` or `Money Movement`
    pub transaction_type: String,
    /// Detailed category, e.g. `Buy to Open`
    pub transaction_sub_type: String,
    pub description: String,
    pub underlying_symbol: String,
    pub instrument_type: InstrumentType,
    pub symbol: String,
    pub action: ActionType,
    pub quantity: f64,
    pub price: f64,
    pub value: f64,
    pub value_effect: Effect,
    pub regulatory_fees: f64,
    pub regulatory_fees_effect: Effect,
    pub clearing_fees: f64,
    pub clearing_fees_effect: Effect,
    pub other_charge: f64,
    pub other_charge_effect: Effect,
    pub other_charge_description: String,
    /// Value after fees and commissions
    pub net_value: f64,
    pub net_value_effect: Effect,
    pub commission: f64,
    pub commission_effect: Effect,
    pub proprietary_index_option_fees: f64,
    pub proprietary_index_option_fees_effect: Effect,
    pub is_estimated_fee: bool,
    pub order_id: i64,
    /// Lots opened or closed by this transaction
    pub lots: Vec<Lot>,
    pub leg_count: i64,
    pub destination_venue: String,
    pub agency_price: f64,
    pub principal_price: f64,
    pub ext_exchange_order_number: String,
    pub ext_global_order_number: i64,
    pub ext_group_id: String,
    pub ext_group_fill_id: String,
    pub ext_exec_id: String,
    pub exec_id: String,
    pub exchange: String,
    /// Transaction reversed by this one
    pub reverses_id: i64,
    pub exchange_affiliation_identifier: String,
    pub cost_basis_reconciliation_date: Option<DateTime<Utc>>,
}

impl_from_json!(Transaction {
    id: "id" => JsonField::int,
    account_number: "account-number" => JsonField::string,
    executed_at: "executed-at" => JsonField::time,
    transaction_date: "transaction-date" => JsonField::time,
    transaction_type: "transaction-type" => JsonField::string,
    transaction_sub_type: "transaction-sub-type" => JsonField::string,
    description: "description" => JsonField::string,
    underlying_symbol: "underlying-symbol" => JsonField::string,
    instrument_type: "instrument-type" => JsonField::decode::<InstrumentType>,
    symbol: "symbol" => JsonField::string,
    action: "action" => JsonField::decode::<ActionType>,
    quantity: "quantity" => JsonField::float,
    price: "price" => JsonField::float,
    value: "value" => JsonField::float,
    value_effect: "value-effect" => JsonField::decode::<Effect>,
    regulatory_fees: "regulatory-fees" => JsonField::float,
    regulatory_fees_effect: "regulatory-fees-effect" => JsonField::decode::<Effect>,
    clearing_fees: "clearing-fees" => JsonField::float,
    clearing_fees_effect: "clearing-fees-effect" => JsonField::decode::<Effect>,
    other_charge: "other-charge" => JsonField::float,
    other_charge_effect: "other-charge-effect" => JsonField::decode::<Effect>,
    other_charge_description: "other-charge-description" => JsonField::string,
    net_value: "net-value" => JsonField::float,
    net_value_effect: "net-value-effect" => JsonField::decode::<Effect>,
    commission: "commission" => JsonField::float,
    commission_effect: "commission-effect" => JsonField::decode::<Effect>,
    proprietary_index_option_fees: "proprietary-index-option-fees" => JsonField::float,
    proprietary_index_option_fees_effect: "proprietary-index-option-fees-effect" => JsonField::decode::<Effect>,
    is_estimated_fee: "is-estimated-fee" => JsonField::boolean,
    order_id: "order-id" => JsonField::int,
    lots: "lots" => JsonField::list::<Lot>,
    leg_count: "leg-count" => JsonField::int,
    destination_venue: "destination-venue" => JsonField::string,
    agency_price: "agency-price" => JsonField::float,
    principal_price: "principal-price" => JsonField::float,
    ext_exchange_order_number: "ext-exchange-order-number" => JsonField::string,
    ext_global_order_number: "ext-global-order-number" => JsonField::int,
    ext_group_id: "ext-group-id" => JsonField::string,
    ext_group_fill_id: "ext-group-fill-id" => JsonField::string,
    ext_exec_id: "ext-exec-id" => JsonField::string,
    exec_id: "exec-id" => JsonField::string,
    exchange: "exchange" => JsonField::string,
    reverses_id: "reverses-id" => JsonField::int,
    exchange_affiliation_identifier: "exchange-affiliation-identifier" => JsonField::string,
    cost_basis_reconciliation_date: "cost-basis-reconciliation-date" => JsonField::time,
});

/// A tax lot touched by a transaction
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Lot {
    pub id: String,
    pub transaction_id: i64,
    pub quantity: f64,
    pub price: f64,
    pub quantity_direction: String,
    pub executed_at: Option<DateTime<Utc>>,
    pub transaction_date: Option<DateTime<Utc>>,
}

impl_from_json!(Lot {
    id: "id" => JsonField::string,
    transaction_id: "transaction-id" => JsonField::int,
    quantity: "quantity" => JsonField::float,
    price: "price" => JsonField::float,
    quantity_direction: "quantity-direction" => JsonField::string,
    executed_at: "executed-at" => JsonField::time,
    transaction_date: "transaction-date" => JsonField::time,
});
