/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/
use crate::error::AppError;
use crate::model::requests::{PositionFilter, TransactionFilter};
use crate::presentation::account::{Account, Balance, TimeOfDay};
use crate::presentation::position::Position;
use crate::presentation::transaction::Transaction;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Interface for the account service
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Gets every account the customer can access
    async fn get_accounts(&self) -> Result<Vec<Account>, AppError>;

    /// Gets the current balances of an account
    async fn get_balance(&self, account_number: &str) -> Result<Balance, AppError>;

    /// Gets the balances of an account at the beginning or end of a given day
    ///
    /// # Arguments
    /// * `account_number` - The account
    /// * `time_of_day` - `BOD` or `EOD`; `Undefined` lets the API choose
    /// * `snapshot_date` - The day of the snapshot
    async fn get_balance_snapshot(
        &self,
        account_number: &str,
        time_of_day: TimeOfDay,
        snapshot_date: NaiveDate,
    ) -> Result<Balance, AppError>;

    /// Gets the positions of an account, optionally filtered
    async fn get_positions(
        &self,
        account_number: &str,
        filter: Option<&PositionFilter>,
    ) -> Result<Vec<Position>, AppError>;

    /// Gets one page of transactions, optionally filtered
    async fn get_transactions(
        &self,
        account_number: &str,
        filter: Option<&TransactionFilter>,
    ) -> Result<Vec<Transaction>, AppError>;

    /// Gets every page of transactions matching the filter, in page order
    ///
    /// Starts at the filter's page offset (or the first page) and follows
    /// `pagination.total-pages`.
    async fn get_all_transactions(
        &self,
        account_number: &str,
        filter: Option<&TransactionFilter>,
    ) -> Result<Vec<Transaction>, AppError>;
}
