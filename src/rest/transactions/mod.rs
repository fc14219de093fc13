//! Transaction endpoints.

mod types;

pub use types::*;

use crate::error::LunchMoneyError;
use crate::rest::LunchMoneyClient;
use crate::rest::endpoints::v1;
use crate::types::query::optional_query;
use crate::validation::{Rules, Validate};

impl LunchMoneyClient {
    /// Get transactions matching `filters`.
    ///
    /// Without filters the server returns the current month.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use lunchmoney_api_client::rest::LunchMoneyClient;
    /// use lunchmoney_api_client::rest::transactions::TransactionFilters;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = LunchMoneyClient::new("access_token");
    ///     let filters = TransactionFilters::between("2024-01-01", "2024-01-31");
    ///     for tx in client.get_transactions(Some(&filters)).await? {
    ///         println!("{} {} {}", tx.date, tx.payee, tx.parsed_amount()?);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_transactions(
        &self,
        filters: Option<&TransactionFilters>,
    ) -> Result<Vec<Transaction>, LunchMoneyError> {
        let query = optional_query(filters)?;
        let response: TransactionsResponse = self
            .get_resource(v1::TRANSACTIONS, &query, "get transactions: decode response")
            .await?;

        Rules::new()
            .each("transactions", &response.transactions)
            .finish()?;
        Ok(response.transactions)
    }

    /// Get a single transaction by id.
    pub async fn get_transaction(
        &self,
        id: i64,
        filters: Option<&TransactionFilters>,
    ) -> Result<Transaction, LunchMoneyError> {
        let query = optional_query(filters)?;
        let transaction: Transaction = self
            .get_resource(&v1::transaction(id), &query, "get transaction: decode response")
            .await?;

        transaction.validate()?;
        Ok(transaction)
    }

    /// Insert transactions and return the new ids.
    pub async fn insert_transactions(
        &self,
        request: &InsertTransactionsRequest,
    ) -> Result<Vec<i64>, LunchMoneyError> {
        request.validate()?;
        let response: InsertTransactionsResponse = self
            .post_resource(v1::TRANSACTIONS, request, "insert transactions: decode response")
            .await?;
        Ok(response.ids)
    }

    /// Update (and optionally split) a transaction.
    pub async fn update_transaction(
        &self,
        id: i64,
        request: &UpdateTransactionRequest,
    ) -> Result<UpdateTransactionResponse, LunchMoneyError> {
        request.validate()?;
        self.put_resource(
            &v1::transaction(id),
            request,
            "update transaction: decode response",
        )
        .await
    }
}
