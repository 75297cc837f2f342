/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/
use crate::string_enum;

string_enum! {
    /// Kind of instrument traded or held
    pub enum InstrumentType {
        /// Bond
        Bond => "Bond",
        /// Cryptocurrency pair such as `BTC/USD`
        Cryptocurrency => "Cryptocurrency",
        /// Currency pair
        CurrencyPair => "Currency Pair",
        /// Stock or ETF
        Equity => "Equity",
        /// Equity offering
        EquityOffering => "Equity Offering",
        /// Option on an equity
        EquityOption => "Equity Option",
        /// Futures contract
        Future => "Future",
        /// Option on a futures contract
        FutureOption => "Future Option",
        /// Index
        Index => "Index",
        /// The API's own "unknown" instrument type
        Unknown => "Unknown",
        /// Warrant
        Warrant => "Warrant",
    }
}
