//! Types for the transaction endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{CurrencyError, Money, parse_currency};
use crate::types::QueryFilter;
use crate::types::serde_helpers::{empty_string_as_none, null_as_default, number_or_string};
use crate::validation::{Rules, Validate, ValidationErrors};

/// Statuses a transaction can be in.
pub const TRANSACTION_STATUSES: &[&str] = &[
    "cleared",
    "uncleared",
    "recurring",
    "recurring_suggested",
    "pending",
];

/// Statuses a client may set on a new or updated transaction.
pub const WRITABLE_TRANSACTION_STATUSES: &[&str] = &["cleared", "uncleared"];

/// A single Lunch Money transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: i64,
    /// Date of the transaction, `YYYY-MM-DD`.
    pub date: String,
    /// Payee or merchant name.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub payee: String,
    /// Amount as a decimal string.
    pub amount: String,
    /// ISO 4217 currency code, usually lower case.
    pub currency: String,
    /// User notes.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub notes: Option<String>,
    /// Assigned category.
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Matching recurring expense.
    #[serde(default)]
    pub recurring_id: Option<i64>,
    /// Manually-managed asset this transaction belongs to.
    #[serde(default)]
    pub asset_id: Option<i64>,
    /// Plaid account this transaction was imported from.
    #[serde(default)]
    pub plaid_account_id: Option<i64>,
    /// One of [`TRANSACTION_STATUSES`].
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub status: Option<String>,
    /// Whether this is a transaction group.
    #[serde(default)]
    pub is_group: bool,
    /// Group this transaction belongs to.
    #[serde(default)]
    pub group_id: Option<i64>,
    /// Parent transaction if this one was split.
    #[serde(default)]
    pub parent_id: Option<i64>,
    /// User-defined external id, numeric or free-form.
    #[serde(default, deserialize_with = "number_or_string::deserialize")]
    pub external_id: Option<String>,
}

impl Transaction {
    /// The amount as [`Money`] in the transaction's currency.
    pub fn parsed_amount(&self) -> Result<Money, CurrencyError> {
        parse_currency(&self.amount, &self.currency)
    }
}

impl Validate for Transaction {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .date("date", &self.date)
            .one_of("status", self.status.as_deref(), TRANSACTION_STATUSES)
            .finish()
    }
}

/// Filters for listing transactions. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilters {
    /// Only transactions with this tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<i64>,
    /// Only transactions matching this recurring expense.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_id: Option<i64>,
    /// Only transactions from this Plaid account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plaid_account_id: Option<i64>,
    /// Only transactions in this category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Only transactions on this asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<i64>,
    /// Number of transactions to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Maximum number of transactions to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Start of the date range, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// End of the date range, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Report debits as negative amounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debit_as_negative: Option<bool>,
}

impl TransactionFilters {
    /// Filters for a date range.
    pub fn between(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
            ..Default::default()
        }
    }
}

impl Validate for TransactionFilters {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .optional_date("start_date", self.start_date.as_deref())
            .optional_date("end_date", self.end_date.as_deref())
            .finish()
    }
}

impl QueryFilter for TransactionFilters {}

/// Response from listing transactions.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
}

/// A transaction to insert.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    /// Date, `YYYY-MM-DD`.
    pub date: String,
    /// Amount. Positive values are debits unless `debit_as_negative` is set.
    pub amount: Decimal,
    /// Payee or merchant name.
    pub payee: Option<String>,
    /// ISO 4217 currency code; the account's primary currency if unset.
    pub currency: Option<String>,
    /// Category to assign.
    pub category_id: Option<i64>,
    /// Asset to attach the transaction to.
    pub asset_id: Option<i64>,
    /// Recurring expense to associate.
    pub recurring_id: Option<i64>,
    /// User notes.
    pub notes: Option<String>,
    /// `cleared` or `uncleared`.
    pub status: Option<String>,
    /// User-defined external id, unique per asset.
    pub external_id: Option<String>,
    /// Tag names to apply.
    pub tags: Option<Vec<String>>,
}

impl NewTransaction {
    /// A transaction of `amount` on `date`.
    pub fn new(date: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date: date.into(),
            amount,
            payee: None,
            currency: None,
            category_id: None,
            asset_id: None,
            recurring_id: None,
            notes: None,
            status: None,
            external_id: None,
            tags: None,
        }
    }

    /// Set the payee.
    pub fn payee(mut self, payee: impl Into<String>) -> Self {
        self.payee = Some(payee.into());
        self
    }

    /// Set the currency.
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Set the category.
    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Set the notes.
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl Validate for NewTransaction {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .date("date", &self.date)
            .one_of("status", self.status.as_deref(), WRITABLE_TRANSACTION_STATUSES)
            .finish()
    }
}

/// Request body for inserting transactions.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertTransactionsRequest {
    /// Transactions to insert.
    pub transactions: Vec<NewTransaction>,
    /// Apply the account's rules to the new transactions.
    pub apply_rules: Option<bool>,
    /// Skip transactions that look like duplicates.
    pub skip_duplicates: Option<bool>,
    /// Match the new transactions against recurring expenses.
    pub check_for_recurring: Option<bool>,
    /// Treat negative amounts as debits.
    pub debit_as_negative: Option<bool>,
    /// Do not update asset balances.
    pub skip_balance_update: Option<bool>,
}

impl InsertTransactionsRequest {
    /// A request inserting `transactions` with server defaults.
    pub fn new(transactions: Vec<NewTransaction>) -> Self {
        Self {
            transactions,
            apply_rules: None,
            skip_duplicates: None,
            check_for_recurring: None,
            debit_as_negative: None,
            skip_balance_update: None,
        }
    }
}

impl Validate for InsertTransactionsRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .check(
                "transactions",
                !self.transactions.is_empty(),
                "at least one transaction is required",
            )
            .each("transactions", &self.transactions)
            .finish()
    }
}

/// Response from inserting transactions.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct InsertTransactionsResponse {
    pub ids: Vec<i64>,
}

/// Fields to change on an existing transaction. Unset fields are left alone.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionUpdate {
    /// New date, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// New category.
    pub category_id: Option<i64>,
    /// New payee.
    pub payee: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New currency.
    pub currency: Option<String>,
    /// New asset.
    pub asset_id: Option<i64>,
    /// New recurring expense.
    pub recurring_id: Option<i64>,
    /// New notes.
    pub notes: Option<String>,
    /// `cleared` or `uncleared`.
    pub status: Option<String>,
    /// New external id.
    pub external_id: Option<String>,
    /// Tag names to apply.
    pub tags: Option<Vec<String>>,
}

impl Validate for TransactionUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .optional_date("date", self.date.as_deref())
            .one_of("status", self.status.as_deref(), WRITABLE_TRANSACTION_STATUSES)
            .finish()
    }
}

/// One part of a split transaction.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSplit {
    /// Amount of this part.
    pub amount: Decimal,
    /// Payee; inherits the parent's if unset.
    pub payee: Option<String>,
    /// Date, `YYYY-MM-DD`; inherits the parent's if unset.
    pub date: Option<String>,
    /// Category of this part.
    pub category_id: Option<i64>,
    /// Notes for this part.
    pub notes: Option<String>,
}

impl Validate for TransactionSplit {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .optional_date("date", self.date.as_deref())
            .finish()
    }
}

/// Request body for updating a transaction.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateTransactionRequest {
    /// Fields to change.
    pub transaction: TransactionUpdate,
    /// Split the transaction into these parts.
    pub split: Option<Vec<TransactionSplit>>,
    /// Treat negative amounts as debits.
    pub debit_as_negative: Option<bool>,
    /// Do not update asset balances.
    pub skip_balance_update: Option<bool>,
}

impl Validate for UpdateTransactionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let rules = Rules::new().nested("transaction", &self.transaction);
        match &self.split {
            Some(split) => rules.each("split", split),
            None => rules,
        }
        .finish()
    }
}

/// Response from updating a transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateTransactionResponse {
    /// Whether the transaction was updated.
    pub updated: bool,
    /// Ids of the transactions created by a split.
    #[serde(default)]
    pub split: Option<Vec<i64>>,
}
