//! Types for the recurring expense endpoint.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::money::{CurrencyError, Money, parse_currency};
use crate::types::QueryFilter;
use crate::types::serde_helpers::{empty_string_as_none, null_as_default};
use crate::validation::{Rules, Validate, ValidationErrors};

/// An expected recurring expense, such as a subscription.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecurringExpense {
    /// Unique identifier.
    pub id: i64,
    /// First occurrence, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub start_date: Option<String>,
    /// Last occurrence, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub end_date: Option<String>,
    /// How often it recurs, e.g. `monthly`.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub cadence: String,
    /// Payee.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub payee: String,
    /// Amount as a decimal string.
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Creation time.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    /// Description.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub description: Option<String>,
    /// Expected billing date in the requested month.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub billing_date: Option<String>,
    /// `cleared` or `suggested`.
    #[serde(default, rename = "type", deserialize_with = "empty_string_as_none::deserialize")]
    pub kind: Option<String>,
    /// Payee as originally imported.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub original_name: Option<String>,
    /// How the expense was created, e.g. `manual` or `transaction`.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub source: Option<String>,
    /// Plaid account the expense is paid from.
    #[serde(default)]
    pub plaid_account_id: Option<i64>,
    /// Asset the expense is paid from.
    #[serde(default)]
    pub asset_id: Option<i64>,
    /// Transaction the expense was created from.
    #[serde(default)]
    pub transaction_id: Option<i64>,
}

impl RecurringExpense {
    /// The amount as [`Money`].
    pub fn parsed_amount(&self) -> Result<Money, CurrencyError> {
        parse_currency(&self.amount, &self.currency)
    }
}

impl Validate for RecurringExpense {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .optional_date("start_date", self.start_date.as_deref())
            .optional_date("end_date", self.end_date.as_deref())
            .finish()
    }
}

/// Filters for listing recurring expenses. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpenseFilters {
    /// Month to list expenses for, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Report debits as negative amounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debit_as_negative: Option<bool>,
}

impl Validate for RecurringExpenseFilters {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .optional_date("start_date", self.start_date.as_deref())
            .finish()
    }
}

impl QueryFilter for RecurringExpenseFilters {}

/// Response from listing recurring expenses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RecurringExpensesResponse {
    pub recurring_expenses: Vec<RecurringExpense>,
}
