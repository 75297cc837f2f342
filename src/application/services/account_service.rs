/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/
use crate::application::client::Client;
use crate::application::interfaces::account::AccountService;
use crate::error::AppError;
use crate::model::http::data_items;
use crate::model::json::JsonField;
use crate::model::requests::{PositionFilter, TransactionFilter};
use crate::model::responses::Pagination;
use crate::presentation::account::{Account, Balance, TimeOfDay};
use crate::presentation::position::Position;
use crate::presentation::transaction::Transaction;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info};

impl Client {
    async fn transactions_page(
        &self,
        account_number: &str,
        filter: &TransactionFilter,
    ) -> Result<(Vec<Transaction>, Pagination), AppError> {
        let path = format!("accounts/{account_number}/transactions");
        let document = self.get(&path, &filter.to_query()).await?;
        let transactions = data_items(&document)?
            .into_iter()
            .map(JsonField::decode)
            .collect();
        let pagination = JsonField::new(&document).get("pagination").decode();
        Ok((transactions, pagination))
    }
}

/// A snapshot answer is either a list (first element wins) or a single object
fn snapshot_node(document: &Value) -> Result<JsonField<'_>, AppError> {
    let data = JsonField::new(document).get("data");
    if !data.get("items").exists() {
        return Ok(data);
    }
    data.get("items")
        .items()?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Decode("balance snapshot list is empty".to_string()))
}

#[async_trait]
impl AccountService for Client {
    async fn get_accounts(&self) -> Result<Vec<Account>, AppError> {
        info!("Getting account information");
        let document = self.get("customers/me/accounts", &[]).await?;
        let accounts: Vec<Account> = data_items(&document)?
            .into_iter()
            .map(JsonField::decode)
            .collect();
        debug!("Account information obtained: {} accounts", accounts.len());
        Ok(accounts)
    }

    async fn get_balance(&self, account_number: &str) -> Result<Balance, AppError> {
        debug!("Getting balances of {}", account_number);
        let path = format!("accounts/{account_number}/balances");
        let document = self.get(&path, &[]).await?;
        Ok(JsonField::new(&document).get("data").decode())
    }

    async fn get_balance_snapshot(
        &self,
        account_number: &str,
        time_of_day: TimeOfDay,
        snapshot_date: NaiveDate,
    ) -> Result<Balance, AppError> {
        debug!(
            "Getting {} balance snapshot of {} for {}",
            time_of_day, account_number, snapshot_date
        );
        let path = format!("accounts/{account_number}/balance-snapshots");
        let mut query = vec![(
            "snapshot-date".to_string(),
            snapshot_date.format("%Y-%m-%d").to_string(),
        )];
        if !time_of_day.is_undefined() {
            query.push(("time-of-day".to_string(), time_of_day.to_string()));
        }
        let document = self.get(&path, &query).await?;
        Ok(snapshot_node(&document)?.decode())
    }

    async fn get_positions(
        &self,
        account_number: &str,
        filter: Option<&PositionFilter>,
    ) -> Result<Vec<Position>, AppError> {
        debug!("Getting positions of {}", account_number);
        let path = format!("accounts/{account_number}/positions");
        let query = filter.map(PositionFilter::to_query).unwrap_or_default();
        let document = self.get(&path, &query).await?;
        let positions: Vec<Position> = data_items(&document)?
            .into_iter()
            .map(JsonField::decode)
            .collect();
        debug!("Positions obtained: {} positions", positions.len());
        Ok(positions)
    }

    async fn get_transactions(
        &self,
        account_number: &str,
        filter: Option<&TransactionFilter>,
    ) -> Result<Vec<Transaction>, AppError> {
        debug!("Getting transactions of {}", account_number);
        let path = format!("accounts/{account_number}/transactions");
        let query = filter.map(TransactionFilter::to_query).unwrap_or_default();
        let document = self.get(&path, &query).await?;
        Ok(data_items(&document)?
            .into_iter()
            .map(JsonField::decode)
            .collect())
    }

    async fn get_all_transactions(
        &self,
        account_number: &str,
        filter: Option<&TransactionFilter>,
    ) -> Result<Vec<Transaction>, AppError> {
        let mut filter = filter.cloned().unwrap_or_default();
        let mut offset = filter.page_offset.unwrap_or(0);
        let mut transactions = Vec::new();

        loop {
            filter.page_offset = Some(offset);
            let (page, pagination) = self.transactions_page(account_number, &filter).await?;
            let page_len = page.len();
            transactions.extend(page);
            debug!(
                "Transactions page {} of {}: {} items",
                offset + 1,
                pagination.total_pages,
                page_len
            );

            offset += 1;
            if page_len == 0 || i64::from(offset) >= pagination.total_pages {
                break;
            }
        }

        info!(
            "Transactions of {} obtained: {} items",
            account_number,
            transactions.len()
        );
        Ok(transactions)
    }
}
