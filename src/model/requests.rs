/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/
use crate::constants::DATE_FILTER_EPOCH_YEAR;
use crate::error::AppError;
use crate::presentation::instrument::InstrumentType;
use crate::presentation::order::{
    ActionCondition, ActionType, Comparator, Effect, Indicator, OrderType, TimeInForce,
};
use crate::string_enum;
use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};

string_enum! {
    /// Ordering of paginated results by date
    pub enum SortOrder {
        /// Oldest first
        Ascending => "Asc",
        /// Newest first
        Descending => "Desc",
    }
}

impl SortOrder {
    /// The order applied when none was chosen
    pub const DEFAULT: SortOrder = SortOrder::Descending;

    fn or_default(self) -> Self {
        if self.is_undefined() { Self::DEFAULT } else { self }
    }
}

/// Query parameters in the order they will be sent
type Query = Vec<(String, String)>;

fn push(query: &mut Query, key: &str, value: impl ToString) {
    query.push((key.to_string(), value.to_string()));
}

fn push_text(query: &mut Query, key: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        push(query, key, value);
    }
}

fn push_list(query: &mut Query, key: &str, values: &[String]) {
    for value in values {
        push(query, key, value);
    }
}

fn push_flag(query: &mut Query, key: &str, enabled: bool) {
    if enabled {
        push(query, key, "true");
    }
}

/// Dates at or before 1900-01-01 are placeholders and never sent
fn push_date(query: &mut Query, key: &str, value: &Option<DateTime<Utc>>) {
    let Some(epoch) = Utc
        .with_ymd_and_hms(DATE_FILTER_EPOCH_YEAR, 1, 1, 0, 0, 0)
        .single()
    else {
        return;
    };
    if let Some(date) = value.filter(|d| *d > epoch) {
        push(query, key, date.to_rfc3339_opts(SecondsFormat::Secs, true));
    }
}

/// Filter for `GET /accounts/{n}/positions`
#[derive(Debug, Clone, Default, PartialEq, DisplaySimple, Serialize, Deserialize)]
pub struct PositionFilter {
    /// Only positions on these underlyings
    pub underlying_symbols: Vec<String>,
    /// Only this symbol
    pub symbol: Option<String>,
    /// Only this instrument type
    pub instrument_type: InstrumentType,
    /// Also return positions closed today
    pub include_closed_positions: bool,
    /// Only this underlying product code (futures)
    pub underlying_product_code: Option<String>,
    /// Only these partitions
    pub partition_keys: Vec<String>,
    /// Net positions across partitions
    pub net_positions: bool,
    /// Include current marks
    pub include_marks: bool,
}

impl PositionFilter {
    /// Restrict to one more underlying symbol
    pub fn with_underlying_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.underlying_symbols.push(symbol.into());
        self
    }

    /// Restrict to a single symbol
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Restrict to an instrument type
    pub fn with_instrument_type(mut self, instrument_type: InstrumentType) -> Self {
        self.instrument_type = instrument_type;
        self
    }

    /// Include positions closed today
    pub fn with_closed_positions(mut self) -> Self {
        self.include_closed_positions = true;
        self
    }

    /// Restrict to an underlying product code
    pub fn with_underlying_product_code(mut self, code: impl Into<String>) -> Self {
        self.underlying_product_code = Some(code.into());
        self
    }

    /// Restrict to one more partition
    pub fn with_partition_key(mut self, key: impl Into<String>) -> Self {
        self.partition_keys.push(key.into());
        self
    }

    /// Net positions across partitions
    pub fn with_net_positions(mut self) -> Self {
        self.net_positions = true;
        self
    }

    /// Include marks in the response
    pub fn with_marks(mut self) -> Self {
        self.include_marks = true;
        self
    }

    /// Query parameters for the non-default fields
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Query::new();
        push_list(&mut query, "underlying-symbol[]", &self.underlying_symbols);
        push_text(&mut query, "symbol", &self.symbol);
        if !self.instrument_type.is_undefined() {
            push(&mut query, "instrument-type", self.instrument_type);
        }
        push_flag(&mut query, "include-closed-positions", self.include_closed_positions);
        push_text(&mut query, "underlying-product-code", &self.underlying_product_code);
        push_list(&mut query, "partition-keys[]", &self.partition_keys);
        push_flag(&mut query, "net-positions", self.net_positions);
        push_flag(&mut query, "include-marks", self.include_marks);
        query
    }
}

/// Filter for `GET /accounts/{n}/transactions`
///
/// `sort` is always sent; an unset sort order is sent as [`SortOrder::DEFAULT`].
#[derive(Debug, Clone, Default, PartialEq, DisplaySimple, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// Page size
    pub per_page: Option<u32>,
    /// Zero based page index
    pub page_offset: Option<u32>,
    /// Sort by execution date
    pub sort: SortOrder,
    /// Transaction types; one is sent as `type`, several as `types[]`
    pub transaction_types: Vec<String>,
    /// Transaction sub types
    pub transaction_sub_types: Vec<String>,
    /// Earliest transaction date
    pub start_date: Option<DateTime<Utc>>,
    /// Latest transaction date
    pub end_date: Option<DateTime<Utc>>,
    /// Only this symbol
    pub symbol: Option<String>,
    /// Only this instrument type
    pub instrument_type: InstrumentType,
    /// Only this underlying
    pub underlying_symbol: Option<String>,
    /// Only this action
    pub action: ActionType,
    /// Only this partition
    pub partition_key: Option<String>,
    /// Only this futures symbol
    pub futures_symbol: Option<String>,
}

impl TransactionFilter {
    /// Set the page size
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Set the page offset
    pub fn with_page_offset(mut self, page_offset: u32) -> Self {
        self.page_offset = Some(page_offset);
        self
    }

    /// Set the sort order
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Add a transaction type
    pub fn with_transaction_type(mut self, transaction_type: impl Into<String>) -> Self {
        self.transaction_types.push(transaction_type.into());
        self
    }

    /// Add a transaction sub type
    pub fn with_transaction_sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.transaction_sub_types.push(sub_type.into());
        self
    }

    /// Set the date range; either end may be left open
    pub fn with_date_range(
        mut self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    /// Restrict to a symbol
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Restrict to an instrument type
    pub fn with_instrument_type(mut self, instrument_type: InstrumentType) -> Self {
        self.instrument_type = instrument_type;
        self
    }

    /// Restrict to an underlying
    pub fn with_underlying_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.underlying_symbol = Some(symbol.into());
        self
    }

    /// Restrict to an action
    pub fn with_action(mut self, action: ActionType) -> Self {
        self.action = action;
        self
    }

    /// Restrict to a partition
    pub fn with_partition_key(mut self, key: impl Into<String>) -> Self {
        self.partition_key = Some(key.into());
        self
    }

    /// Restrict to a futures symbol
    pub fn with_futures_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.futures_symbol = Some(symbol.into());
        self
    }

    /// Query parameters for the non-default fields, plus `sort`. A zero page
    /// size or offset is treated as unset.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Query::new();
        if let Some(per_page) = self.per_page.filter(|n| *n > 0) {
            push(&mut query, "per-page", per_page);
        }
        if let Some(page_offset) = self.page_offset.filter(|n| *n > 0) {
            push(&mut query, "page-offset", page_offset);
        }
        push(&mut query, "sort", self.sort.or_default());
        match self.transaction_types.as_slice() {
            [] => {}
            [single] => push(&mut query, "type", single),
            many => push_list(&mut query, "types[]", many),
        }
        push_list(&mut query, "sub-type[]", &self.transaction_sub_types);
        push_date(&mut query, "start-date", &self.start_date);
        push_date(&mut query, "end-date", &self.end_date);
        push_text(&mut query, "symbol", &self.symbol);
        if !self.instrument_type.is_undefined() {
            push(&mut query, "instrument-type", self.instrument_type);
        }
        push_text(&mut query, "underlying-symbol", &self.underlying_symbol);
        if !self.action.is_undefined() {
            push(&mut query, "action", self.action);
        }
        push_text(&mut query, "partition-key", &self.partition_key);
        push_text(&mut query, "futures-symbol", &self.futures_symbol);
        query
    }
}

/// Filter for `GET /accounts/{n}/orders`
///
/// `sort` is always sent; an unset sort order is sent as [`SortOrder::DEFAULT`].
#[derive(Debug, Clone, Default, PartialEq, DisplaySimple, Serialize, Deserialize)]
pub struct OrdersFilter {
    /// Page size
    pub per_page: Option<u32>,
    /// Zero based page index
    pub page_offset: Option<u32>,
    /// Sort by date
    pub sort: SortOrder,
    /// Only orders in these statuses
    pub statuses: Vec<String>,
    /// Earliest order date
    pub start_date: Option<DateTime<Utc>>,
    /// Latest order date
    pub end_date: Option<DateTime<Utc>>,
    /// Only this underlying
    pub underlying_symbol: Option<String>,
    /// Only this underlying instrument type
    pub underlying_instrument_type: InstrumentType,
    /// Only this futures symbol
    pub futures_symbol: Option<String>,
}

impl OrdersFilter {
    /// Set the page size
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Set the page offset
    pub fn with_page_offset(mut self, page_offset: u32) -> Self {
        self.page_offset = Some(page_offset);
        self
    }

    /// Set the sort order
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Add a status
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.statuses.push(status.into());
        self
    }

    /// Set the date range; either end may be left open
    pub fn with_date_range(
        mut self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    /// Restrict to an underlying
    pub fn with_underlying_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.underlying_symbol = Some(symbol.into());
        self
    }

    /// Restrict to an underlying instrument type
    pub fn with_underlying_instrument_type(mut self, instrument_type: InstrumentType) -> Self {
        self.underlying_instrument_type = instrument_type;
        self
    }

    /// Restrict to a futures symbol
    pub fn with_futures_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.futures_symbol = Some(symbol.into());
        self
    }

    /// Query parameters for the non-default fields, plus `sort`. A zero page
    /// size or offset is treated as unset.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Query::new();
        if let Some(per_page) = self.per_page.filter(|n| *n > 0) {
            push(&mut query, "per-page", per_page);
        }
        if let Some(page_offset) = self.page_offset.filter(|n| *n > 0) {
            push(&mut query, "page-offset", page_offset);
        }
        push(&mut query, "sort", self.sort.or_default());
        push_list(&mut query, "status[]", &self.statuses);
        push_date(&mut query, "start-date", &self.start_date);
        push_date(&mut query, "end-date", &self.end_date);
        push_text(&mut query, "underlying-symbol", &self.underlying_symbol);
        if !self.underlying_instrument_type.is_undefined() {
            push(
                &mut query,
                "underlying-instrument-type",
                self.underlying_instrument_type,
            );
        }
        push_text(&mut query, "futures-symbol", &self.futures_symbol);
        query
    }
}

/// Body of `POST /accounts/{n}/orders`
#[derive(Debug, Clone, PartialEq, DisplaySimple, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrderRequest {
    /// How long the order stays working
    pub time_in_force: TimeInForce,
    /// Expiry date, required for GTD orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtc_date: Option<NaiveDate>,
    /// Pricing behaviour
    pub order_type: OrderType,
    /// Trigger price for stop orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_trigger: Option<f64>,
    /// Limit price, always positive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Whether the price is paid or received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_effect: Option<Effect>,
    /// Notional value for notional market orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Whether the value is paid or received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_effect: Option<Effect>,
    /// Free text source tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Partition the order belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<String>,
    /// Identifier of a previous preflight check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preflight_id: Option<String>,
    /// Order legs
    pub legs: Vec<OrderLeg>,
    /// Routing rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<OrderRules>,
}

impl OrderRequest {
    /// An order of the given type without legs
    pub fn new(order_type: OrderType, time_in_force: TimeInForce) -> Self {
        Self {
            time_in_force,
            gtc_date: None,
            order_type,
            stop_trigger: None,
            price: None,
            price_effect: None,
            value: None,
            value_effect: None,
            source: None,
            partition_key: None,
            preflight_id: None,
            legs: Vec::new(),
            rules: None,
        }
    }

    /// A limit order paying (`Debit`) or receiving (`Credit`) `price`
    pub fn limit(time_in_force: TimeInForce, price: f64, price_effect: Effect) -> Self {
        Self::new(OrderType::Limit, time_in_force).with_price(price, price_effect)
    }

    /// A market order
    pub fn market(time_in_force: TimeInForce) -> Self {
        Self::new(OrderType::Market, time_in_force)
    }

    /// A stop order triggering at `stop_trigger`
    pub fn stop(time_in_force: TimeInForce, stop_trigger: f64) -> Self {
        Self::new(OrderType::Stop, time_in_force).with_stop_trigger(stop_trigger)
    }

    /// A notional market order for `value`
    pub fn notional_market(value: f64, value_effect: Effect) -> Self {
        let mut order = Self::new(OrderType::NotionalMarket, TimeInForce::ImmediateOrCancel);
        order.value = Some(value);
        order.value_effect = Some(value_effect);
        order
    }

    /// Set the limit price
    pub fn with_price(mut self, price: f64, price_effect: Effect) -> Self {
        self.price = Some(price);
        self.price_effect = Some(price_effect);
        self
    }

    /// Set the stop trigger
    pub fn with_stop_trigger(mut self, stop_trigger: f64) -> Self {
        self.stop_trigger = Some(stop_trigger);
        self
    }

    /// Set the GTD expiry date
    pub fn with_gtc_date(mut self, date: NaiveDate) -> Self {
        self.gtc_date = Some(date);
        self
    }

    /// Set the source tag
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Append a leg
    pub fn with_leg(mut self, leg: OrderLeg) -> Self {
        self.legs.push(leg);
        self
    }

    /// Set the routing rules
    pub fn with_rules(mut self, rules: OrderRules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Checks the order locally before it is sent
    ///
    /// # Errors
    /// Returns [`AppError::InvalidInput`] naming the first problem found.
    pub fn validate(&self) -> Result<(), AppError> {
        let invalid = |msg: &str| Err(AppError::InvalidInput(msg.to_string()));
        if self.order_type.is_undefined() {
            return invalid("order type is required");
        }
        if self.time_in_force.is_undefined() {
            return invalid("time in force is required");
        }
        if self.legs.is_empty() {
            return invalid("order must have at least one leg");
        }
        if self.time_in_force == TimeInForce::GoodTillDate && self.gtc_date.is_none() {
            return invalid("GTD orders require a gtc date");
        }
        let needs_price = matches!(
            self.order_type,
            OrderType::Limit | OrderType::StopLimit | OrderType::MarketableLimit
        );
        if needs_price && self.price.is_none() {
            return invalid("limit orders require a price");
        }
        if self.price.is_some() && self.price_effect.is_none() {
            return invalid("price requires a price effect");
        }
        if matches!(self.order_type, OrderType::Stop | OrderType::StopLimit)
            && self.stop_trigger.is_none()
        {
            return invalid("stop orders require a stop trigger");
        }
        if self.order_type == OrderType::NotionalMarket {
            if self.value.is_none() || self.value_effect.is_none() {
                return invalid("notional market orders require a value and value effect");
            }
        } else if let Some(leg) = self
            .legs
            .iter()
            .find(|leg| leg.quantity.is_none_or(|q| q <= 0.0))
        {
            return Err(AppError::InvalidInput(format!(
                "leg {} requires a positive quantity",
                leg.symbol
            )));
        }
        if let Some(leg) = self.legs.iter().find(|leg| leg.action.is_undefined()) {
            return Err(AppError::InvalidInput(format!(
                "leg {} requires an action",
                leg.symbol
            )));
        }
        Ok(())
    }
}

/// One leg of an order to submit
#[derive(Debug, Clone, PartialEq, DisplaySimple, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrderLeg {
    /// Instrument type of the symbol
    pub instrument_type: InstrumentType,
    /// Symbol to trade
    pub symbol: String,
    /// Quantity; omitted for notional market orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Side and intent
    pub action: ActionType,
}

impl OrderLeg {
    /// A leg trading `quantity` of `symbol`
    pub fn new(
        instrument_type: InstrumentType,
        symbol: impl Into<String>,
        quantity: f64,
        action: ActionType,
    ) -> Self {
        Self {
            instrument_type,
            symbol: symbol.into(),
            quantity: Some(quantity),
            action,
        }
    }

    /// A leg without quantity, for notional market orders
    pub fn notional(
        instrument_type: InstrumentType,
        symbol: impl Into<String>,
        action: ActionType,
    ) -> Self {
        Self {
            instrument_type,
            symbol: symbol.into(),
            quantity: None,
            action,
        }
    }
}

/// Routing rules of an order to submit
#[derive(Debug, Clone, Default, PartialEq, DisplaySimple, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrderRules {
    /// Do not route before this time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_after: Option<DateTime<Utc>>,
    /// Cancel at this time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_at: Option<DateTime<Utc>>,
    /// Trigger conditions
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub conditions: Vec<OrderCondition>,
}

/// Trigger condition of an order to submit
#[derive(Debug, Clone, PartialEq, DisplaySimple, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrderCondition {
    /// What happens on trigger
    pub action: ActionCondition,
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
    /// Components making up the watched price
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub price_components: Vec<OrderPriceComponent>,
}

/// Price component of a condition to submit
#[derive(Debug, Clone, PartialEq, DisplaySimple, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrderPriceComponent {
    /// Component symbol
    pub symbol: String,
    /// Component instrument type
    pub instrument_type: InstrumentType,
    /// Component quantity
    pub quantity: f64,
    /// `Long` or `Short`
    pub quantity_direction: String,
}
