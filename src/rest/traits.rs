//! Trait definition for the Lunch Money REST API client.
//!
//! [`LunchMoneyApi`] abstracts every resource accessor so that code using the
//! API can be written against a mock or a wrapping implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use lunchmoney_api_client::rest::{LunchMoneyApi, LunchMoneyClient};
//!
//! async fn total_assets<C: LunchMoneyApi>(client: &C) -> Result<usize, lunchmoney_api_client::LunchMoneyError> {
//!     Ok(client.get_assets().await?.len())
//! }
//! ```

use std::future::Future;

use crate::error::LunchMoneyError;
use crate::rest::LunchMoneyClient;
use crate::rest::assets::Asset;
use crate::rest::budgets::{Budget, BudgetFilters};
use crate::rest::categories::{Category, CreateCategoryRequest, UpdateCategoryRequest};
use crate::rest::plaid::PlaidAccount;
use crate::rest::recurring::{RecurringExpense, RecurringExpenseFilters};
use crate::rest::tags::Tag;
use crate::rest::transactions::{
    InsertTransactionsRequest, Transaction, TransactionFilters, UpdateTransactionRequest,
    UpdateTransactionResponse,
};
use crate::rest::user::User;

/// Every Lunch Money REST operation.
///
/// All methods are async and return `Result<T, LunchMoneyError>`.
pub trait LunchMoneyApi: Send + Sync {
    // ========== User ==========

    /// Get the user the API key belongs to.
    fn get_user(&self) -> impl Future<Output = Result<User, LunchMoneyError>> + Send;

    // ========== Categories ==========

    /// Get all categories.
    fn get_categories(&self) -> impl Future<Output = Result<Vec<Category>, LunchMoneyError>> + Send;

    /// Get a single category.
    fn get_category(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Category, LunchMoneyError>> + Send;

    /// Create a category, returning its id.
    fn create_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> impl Future<Output = Result<i64, LunchMoneyError>> + Send;

    /// Update a category.
    fn update_category(
        &self,
        id: i64,
        request: &UpdateCategoryRequest,
    ) -> impl Future<Output = Result<bool, LunchMoneyError>> + Send;

    // ========== Tags ==========

    /// Get all tags.
    fn get_tags(&self) -> impl Future<Output = Result<Vec<Tag>, LunchMoneyError>> + Send;

    // ========== Transactions ==========

    /// Get transactions matching the filters.
    fn get_transactions(
        &self,
        filters: Option<&TransactionFilters>,
    ) -> impl Future<Output = Result<Vec<Transaction>, LunchMoneyError>> + Send;

    /// Get a single transaction.
    fn get_transaction(
        &self,
        id: i64,
        filters: Option<&TransactionFilters>,
    ) -> impl Future<Output = Result<Transaction, LunchMoneyError>> + Send;

    /// Insert transactions, returning their ids.
    fn insert_transactions(
        &self,
        request: &InsertTransactionsRequest,
    ) -> impl Future<Output = Result<Vec<i64>, LunchMoneyError>> + Send;

    /// Update a transaction.
    fn update_transaction(
        &self,
        id: i64,
        request: &UpdateTransactionRequest,
    ) -> impl Future<Output = Result<UpdateTransactionResponse, LunchMoneyError>> + Send;

    // ========== Budgets ==========

    /// Get budgets for a range of months.
    fn get_budgets(
        &self,
        filters: Option<&BudgetFilters>,
    ) -> impl Future<Output = Result<Vec<Budget>, LunchMoneyError>> + Send;

    // ========== Recurring expenses ==========

    /// Get recurring expenses.
    fn get_recurring_expenses(
        &self,
        filters: Option<&RecurringExpenseFilters>,
    ) -> impl Future<Output = Result<Vec<RecurringExpense>, LunchMoneyError>> + Send;

    // ========== Accounts ==========

    /// Get manually-managed assets.
    fn get_assets(&self) -> impl Future<Output = Result<Vec<Asset>, LunchMoneyError>> + Send;

    /// Get Plaid-linked accounts.
    fn get_plaid_accounts(
        &self,
    ) -> impl Future<Output = Result<Vec<PlaidAccount>, LunchMoneyError>> + Send;
}

impl LunchMoneyApi for LunchMoneyClient {
    async fn get_user(&self) -> Result<User, LunchMoneyError> {
        LunchMoneyClient::get_user(self).await
    }

    async fn get_categories(&self) -> Result<Vec<Category>, LunchMoneyError> {
        LunchMoneyClient::get_categories(self).await
    }

    async fn get_category(&self, id: i64) -> Result<Category, LunchMoneyError> {
        LunchMoneyClient::get_category(self, id).await
    }

    async fn create_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> Result<i64, LunchMoneyError> {
        LunchMoneyClient::create_category(self, request).await
    }

    async fn update_category(
        &self,
        id: i64,
        request: &UpdateCategoryRequest,
    ) -> Result<bool, LunchMoneyError> {
        LunchMoneyClient::update_category(self, id, request).await
    }

    async fn get_tags(&self) -> Result<Vec<Tag>, LunchMoneyError> {
        LunchMoneyClient::get_tags(self).await
    }

    async fn get_transactions(
        &self,
        filters: Option<&TransactionFilters>,
    ) -> Result<Vec<Transaction>, LunchMoneyError> {
        LunchMoneyClient::get_transactions(self, filters).await
    }

    async fn get_transaction(
        &self,
        id: i64,
        filters: Option<&TransactionFilters>,
    ) -> Result<Transaction, LunchMoneyError> {
        LunchMoneyClient::get_transaction(self, id, filters).await
    }

    async fn insert_transactions(
        &self,
        request: &InsertTransactionsRequest,
    ) -> Result<Vec<i64>, LunchMoneyError> {
        LunchMoneyClient::insert_transactions(self, request).await
    }

    async fn update_transaction(
        &self,
        id: i64,
        request: &UpdateTransactionRequest,
    ) -> Result<UpdateTransactionResponse, LunchMoneyError> {
        LunchMoneyClient::update_transaction(self, id, request).await
    }

    async fn get_budgets(
        &self,
        filters: Option<&BudgetFilters>,
    ) -> Result<Vec<Budget>, LunchMoneyError> {
        LunchMoneyClient::get_budgets(self, filters).await
    }

    async fn get_recurring_expenses(
        &self,
        filters: Option<&RecurringExpenseFilters>,
    ) -> Result<Vec<RecurringExpense>, LunchMoneyError> {
        LunchMoneyClient::get_recurring_expenses(self, filters).await
    }

    async fn get_assets(&self) -> Result<Vec<Asset>, LunchMoneyError> {
        LunchMoneyClient::get_assets(self).await
    }

    async fn get_plaid_accounts(&self) -> Result<Vec<PlaidAccount>, LunchMoneyError> {
        LunchMoneyClient::get_plaid_accounts(self).await
    }
}
