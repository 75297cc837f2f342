/// Account and balance models
pub mod account;
/// Instrument classification
pub mod instrument;
/// Order vocabularies: actions, effects, order types, time in force, rule conditions
pub mod order;
/// Reported order state: legs, fills, rules, conditions
pub mod order_status;
/// Position models
pub mod position;
/// Closed string vocabulary support
pub mod serialization;
/// Transaction history models
pub mod transaction;
