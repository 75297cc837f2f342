/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/
use crate::impl_from_json;
use crate::model::json::JsonField;
use crate::presentation::instrument::InstrumentType;
use crate::presentation::order::Effect;
use chrono::{DateTime, Utc};
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};

/// An open (or, when requested, closed) position in an account
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Position {
    pub account_number: String,
    pub symbol: String,
    pub instrument_type: InstrumentType,
    pub underlying_symbol: String,
    pub quantity: f64,
    /// `Long`, `Short` or `Zero`
    pub quantity_direction: String,
    pub close_price: f64,
    pub average_open_price: f64,
    pub average_yearly_market_close_price: f64,
    pub average_daily_market_close_price: f64,
    pub multiplier: f64,
    pub cost_effect: Effect,
    pub is_suppressed: bool,
    pub is_frozen: bool,
    pub restricted_quantity: f64,
    pub realized_day_gain: f64,
    pub realized_day_gain_effect: Effect,
    pub realized_day_gain_date: Option<DateTime<Utc>>,
    pub realized_today: f64,
    pub realized_today_effect: Effect,
    pub realized_today_date: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl_from_json!(Position {
    account_number: "account-number" => JsonField::string,
    symbol: "symbol" => JsonField::string,
    instrument_type: "instrument-type" => JsonField::decode::<InstrumentType>,
    underlying_symbol: "underlying-symbol" => JsonField::string,
    quantity: "quantity" => JsonField::float,
    quantity_direction: "quantity-direction" => JsonField::string,
    close_price: "close-price" => JsonField::float,
    average_open_price: "average-open-price" => JsonField::float,
    average_yearly_market_close_price: "average-yearly-market-close-price" => JsonField::float,
    average_daily_market_close_price: "average-daily-market-close-price" => JsonField::float,
    multiplier: "multiplier" => JsonField::float,
    cost_effect: "cost-effect" => JsonField::decode::<Effect>,
    is_suppressed: "is-suppressed" => JsonField::boolean,
    is_frozen: "is-frozen" => JsonField::boolean,
    restricted_quantity: "restricted-quantity" => JsonField::float,
    realized_day_gain: "realized-day-gain" => JsonField::float,
    realized_day_gain_effect: "realized-day-gain-effect" => JsonField::decode::<Effect>,
    realized_day_gain_date: "realized-day-gain-date" => JsonField::time,
    realized_today: "realized-today" => JsonField::float,
    realized_today_effect: "realized-today-effect" => JsonField::decode::<Effect>,
    realized_today_date: "realized-today-date" => JsonField::time,
    expires_at: "expires-at" => JsonField::time,
    created_at: "created-at" => JsonField::time,
    updated_at: "updated-at" => JsonField::time,
});

impl Position {
    /// Signed quantity: negative for short positions
    #[must_use]
    pub fn signed_quantity(&self) -> f64 {
        if self.quantity_direction == "Short" {
            -self.quantity
        } else {
            self.quantity
        }
    }
}
