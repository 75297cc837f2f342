/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/
use crate::string_enum;

string_enum! {
    /// Side and intent of an order leg or a transaction
    pub enum ActionType {
        /// Allocation (transactions only)
        Allocate => "Allocate",
        /// Plain buy, used for futures and cryptocurrencies
        Buy => "Buy",
        /// Buy to close a short position
        BuyToClose => "Buy to Close",
        /// Buy to open a long position
        BuyToOpen => "Buy to Open",
        /// Plain sell, used for futures and cryptocurrencies
        Sell => "Sell",
        /// Sell to close a long position
        SellToClose => "Sell to Close",
        /// Sell to open a short position
        SellToOpen => "Sell to Open",
    }
}

string_enum! {
    /// Direction of a money amount relative to the account
    pub enum Effect {
        /// Money flows into the account
        Credit => "Credit",
        /// Money flows out of the account
        Debit => "Debit",
        /// No money moves
        NoEffect => "None",
    }
}

string_enum! {
    /// Pricing behaviour of an order
    pub enum OrderType {
        /// Executed at the limit price or better
        Limit => "Limit",
        /// Executed immediately at the market price
        Market => "Market",
        /// Limit order priced to execute immediately
        MarketableLimit => "Marketable Limit",
        /// Becomes a market order once the stop trigger is reached
        Stop => "Stop",
        /// Becomes a limit order once the stop trigger is reached
        StopLimit => "Stop Limit",
        /// Market order sized by notional value (cryptocurrencies)
        NotionalMarket => "Notional Market",
    }
}

string_enum! {
    /// How long an order stays working
    pub enum TimeInForce {
        /// Until the end of the regular session
        Day => "Day",
        /// Good till cancelled
        GoodTillCancel => "GTC",
        /// Good till the given date
        GoodTillDate => "GTD",
        /// Day order that also works in the extended sessions
        Extended => "Ext",
        /// Good till cancelled, including extended sessions
        GoodTillCancelExtended => "GTC Ext",
        /// Immediate or cancel
        ImmediateOrCancel => "IOC",
    }
}

string_enum! {
    /// What happens when an order rule condition triggers
    pub enum ActionCondition {
        /// Route the order
        Route => "route",
        /// Cancel the order
        Cancel => "cancel",
    }
}

string_enum! {
    /// Market value watched by a rule condition
    pub enum Indicator {
        /// Last traded price
        Last => "last",
    }
}

string_enum! {
    /// Comparison applied between the indicator and the threshold
    pub enum Comparator {
        /// Indicator greater than or equal to the threshold
        GreaterOrEqual => "gte",
        /// Indicator less than or equal to the threshold
        LessOrEqual => "lte",
    }
}
