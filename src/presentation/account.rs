/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/
use crate::impl_from_json;
use crate::model::json::JsonField;
use crate::presentation::order::Effect;
use crate::string_enum;
use chrono::{DateTime, Utc};
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};

string_enum! {
    /// Point of the trading day a balance snapshot is taken at
    pub enum TimeOfDay {
        /// Beginning of day
        BeginningOfDay => "BOD",
        /// End of day
        EndOfDay => "EOD",
    }
}

/// A brokerage account the customer has access to
///
/// Decoded from one element of `data.items` of `/customers/me/accounts`; every
/// field except `authority_level` lives under the element's `account` object.
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Account {
    /// Account number used in every account-scoped path
    pub account_number: String,
    /// External identifier
    pub external_id: String,
    /// Opening date
    pub opened_at: Option<DateTime<Utc>>,
    /// Customer chosen nickname
    pub nickname: String,
    /// Account type name, e.g. `Individual`
    pub account_type: String,
    /// Pattern day trader flag
    pub day_trader_status: bool,
    /// `Margin` or `Cash`
    pub margin_or_cash: String,
    /// Access level of the customer on this account, e.g. `owner`
    pub authority_level: String,
    /// Firm error account
    pub is_firm_error: bool,
    /// Firm proprietary account
    pub is_firm_proprietary: bool,
    /// Paper trading account
    pub is_test_drive: bool,
    /// Foreign account
    pub is_foreign: bool,
    /// Date the account was first funded
    pub funding_date: Option<DateTime<Utc>>,
}

impl_from_json!(Account {
    account_number: "account.account-number" => JsonField::string,
    external_id: "account.external-id" => JsonField::string,
    opened_at: "account.opened-at" => JsonField::time,
    nickname: "account.nickname" => JsonField::string,
    account_type: "account.account-type-name" => JsonField::string,
    day_trader_status: "account.day-trader-status" => JsonField::boolean,
    margin_or_cash: "account.margin-or-cash" => JsonField::string,
    authority_level: "authority-level" => JsonField::string,
    is_firm_error: "account.is-firm-error" => JsonField::boolean,
    is_firm_proprietary: "account.is-firm-proprietary" => JsonField::boolean,
    is_test_drive: "account.is-test-drive" => JsonField::boolean,
    is_foreign: "account.is-foreign" => JsonField::boolean,
    funding_date: "account.funding-date" => JsonField::time,
});

/// Balances of an account, current or as of a snapshot
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Balance {
    pub account_number: String,
    pub cash_balance: f64,
    pub long_equity_value: f64,
    pub short_equity_value: f64,
    pub long_derivative_value: f64,
    pub short_derivative_value: f64,
    pub long_futures_value: f64,
    pub short_futures_value: f64,
    pub long_futures_derivative_value: f64,
    pub short_futures_derivative_value: f64,
    pub long_margineable_value: f64,
    pub short_margineable_value: f64,
    pub margin_equity: f64,
    pub equity_buying_power: f64,
    pub derivative_buying_power: f64,
    pub day_trading_buying_power: f64,
    pub futures_margin_requirement: f64,
    pub available_trading_funds: f64,
    pub maintenance_requirement: f64,
    pub maintenance_call_value: f64,
    pub reg_t_call_value: f64,
    pub day_trading_call_value: f64,
    pub day_equity_call_value: f64,
    /// Total account value if every position were closed at the mark
    pub net_liquidating_value: f64,
    pub cash_available_to_withdraw: f64,
    pub day_trade_excess: f64,
    pub pending_cash: f64,
    pub pending_cash_effect: Effect,
    pub long_cryptocurrency_value: f64,
    pub short_cryptocurrency_value: f64,
    pub cryptocurrency_margin_requirement: f64,
    pub unsettled_cryptocurrency_fiat_amount: f64,
    pub unsettled_cryptocurrency_fiat_effect: Effect,
    pub closed_loop_available_balance: f64,
    pub equity_offering_margin_requirement: f64,
    pub long_bond_value: f64,
    pub bond_margin_requirement: f64,
    pub used_derivative_buying_power: f64,
    /// Date of the snapshot, absent for current balances
    pub snapshot_date: Option<DateTime<Utc>>,
    pub reg_t_margin_requirement: f64,
    pub futures_overnight_margin_requirement: f64,
    pub futures_intraday_margin_requirement: f64,
    pub maintenance_excess: f64,
    pub pending_margin_interest: f64,
    pub effective_cryptocurrency_buying_power: f64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl_from_json!(Balance {
    account_number: "account-number" => JsonField::string,
    cash_balance: "cash-balance" => JsonField::float,
    long_equity_value: "long-equity-value" => JsonField::float,
    short_equity_value: "short-equity-value" => JsonField::float,
    long_derivative_value: "long-derivative-value" => JsonField::float,
    short_derivative_value: "short-derivative-value" => JsonField::float,
    long_futures_value: "long-futures-value" => JsonField::float,
    short_futures_value: "short-futures-value" => JsonField::float,
    long_futures_derivative_value: "long-futures-derivative-value" => JsonField::float,
    short_futures_derivative_value: "short-futures-derivative-value" => JsonField::float,
    long_margineable_value: "long-margineable-value" => JsonField::float,
    short_margineable_value: "short-margineable-value" => JsonField::float,
    margin_equity: "margin-equity" => JsonField::float,
    equity_buying_power: "equity-buying-power" => JsonField::float,
    derivative_buying_power: "derivative-buying-power" => JsonField::float,
    day_trading_buying_power: "day-trading-buying-power" => JsonField::float,
    futures_margin_requirement: "futures-margin-requirement" => JsonField::float,
    available_trading_funds: "available-trading-funds" => JsonField::float,
    maintenance_requirement: "maintenance-requirement" => JsonField::float,
    maintenance_call_value: "maintenance-call-value" => JsonField::float,
    reg_t_call_value: "reg-t-call-value" => JsonField::float,
    day_trading_call_value: "day-trading-call-value" => JsonField::float,
    day_equity_call_value: "day-equity-call-value" => JsonField::float,
    net_liquidating_value: "net-liquidating-value" => JsonField::float,
    cash_available_to_withdraw: "cash-available-to-withdraw" => JsonField::float,
    day_trade_excess: "day-trade-excess" => JsonField::float,
    pending_cash: "pending-cash" => JsonField::float,
    pending_cash_effect: "pending-cash-effect" => JsonField::decode::<Effect>,
    long_cryptocurrency_value: "long-cryptocurrency-value" => JsonField::float,
    short_cryptocurrency_value: "short-cryptocurrency-value" => JsonField::float,
    cryptocurrency_margin_requirement: "cryptocurrency-margin-requirement" => JsonField::float,
    unsettled_cryptocurrency_fiat_amount: "unsettled-cryptocurrency-fiat-amount" => JsonField::float,
    unsettled_cryptocurrency_fiat_effect: "unsettled-cryptocurrency-fiat-effect" => JsonField::decode::<Effect>,
    closed_loop_available_balance: "closed-loop-available-balance" => JsonField::float,
    equity_offering_margin_requirement: "equity-offering-margin-requirement" => JsonField::float,
    long_bond_value: "long-bond-value" => JsonField::float,
    bond_margin_requirement: "bond-margin-requirement" => JsonField::float,
    used_derivative_buying_power: "used-derivative-buying-power" => JsonField::float,
    snapshot_date: "snapshot-date" => JsonField::time,
    reg_t_margin_requirement: "reg-t-margin-requirement" => JsonField::float,
    futures_overnight_margin_requirement: "futures-overnight-margin-requirement" => JsonField::float,
    futures_intraday_margin_requirement: "futures-intraday-margin-requirement" => JsonField::float,
    maintenance_excess: "maintenance-excess" => JsonField::float,
    pending_margin_interest: "pending-margin-interest" => JsonField::float,
    effective_cryptocurrency_buying_power: "effective-cryptocurrency-buying-power" => JsonField::float,
    updated_at: "updated-at" => JsonField::time,
});
