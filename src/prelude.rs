/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/

//! # tasty-client Prelude
//!
//! Brings the commonly used types and traits of the crate into scope with a
//! single import.
//!
//! ```rust,no_run
//! use tasty_client::prelude::*;
//!
//! # async fn run() -> Result<(), AppError> {
//! let client = Client::new(Config::new()).await?;
//! let accounts = client.get_accounts().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Configuration of the client
pub use crate::application::config::{Config, Credentials, EndpointConfig, RateLimiterConfig};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type for the library
pub use crate::error::AppError;

// ============================================================================
// AUTHENTICATION AND SESSION MANAGEMENT
// ============================================================================

/// Session manager and session state
pub use crate::application::auth::{Auth, Identity, LoginOptions, Session, SessionTokens};

/// Authenticated request dispatcher
pub use crate::application::client::Client;

// ============================================================================
// CORE SERVICES (TRAITS)
// ============================================================================

/// Account service trait
pub use crate::application::interfaces::account::AccountService;

/// Order service trait
pub use crate::application::interfaces::order::OrderService;

// ============================================================================
// REQUEST AND RESPONSE MODELS
// ============================================================================

/// Query filters and order requests
pub use crate::model::requests::{
    OrderCondition, OrderLeg, OrderPriceComponent, OrderRequest, OrderRules, OrdersFilter,
    PositionFilter, SortOrder, TransactionFilter,
};

/// Order submission answers
pub use crate::model::responses::{BuyingPowerChange, ErrorMsg, FeeInfo, OrderResponse, Pagination};

/// Retry policy
pub use crate::model::retry::RetryConfig;

/// JSON access used by the decoders
pub use crate::model::json::{FromJson, JsonField};

// ============================================================================
// DOMAIN RECORDS
// ============================================================================

/// Accounts and balances
pub use crate::presentation::account::{Account, Balance, TimeOfDay};

/// Instrument classification
pub use crate::presentation::instrument::InstrumentType;

/// Order enumerations
pub use crate::presentation::order::{
    ActionCondition, ActionType, Comparator, Effect, Indicator, OrderType, TimeInForce,
};

/// Order state
pub use crate::presentation::order_status::{
    ConditionPriceComponent, ConditionStatus, FillStatus, LegStatus, OrderStatus, RuleStatus,
};

/// Positions and transactions
pub use crate::presentation::position::Position;
pub use crate::presentation::transaction::{Lot, Transaction};

// ============================================================================
// UTILITIES
// ============================================================================

/// Rate limiting
pub use crate::application::rate_limiter::RateLimiter;

/// Logging utilities
pub use crate::utils::logger::setup_logger;

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

/// Re-export commonly used external types
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
pub use tokio;
pub use tracing::{debug, error, info, warn};
