//! Plaid-linked account endpoint.

use serde::Deserialize;
use time::OffsetDateTime;

use crate::error::LunchMoneyError;
use crate::money::{CurrencyError, Money, parse_currency};
use crate::rest::LunchMoneyClient;
use crate::rest::endpoints::v1;
use crate::types::QueryMap;
use crate::types::serde_helpers::{empty_string_as_none, null_as_default};
use crate::validation::{Rules, Validate, ValidationErrors};

/// Sync states a Plaid account can be in.
pub const PLAID_ACCOUNT_STATUSES: &[&str] = &[
    "active",
    "inactive",
    "relink",
    "syncing",
    "error",
    "not found",
    "not supported",
];

/// A bank account linked through Plaid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaidAccount {
    /// Unique identifier.
    pub id: i64,
    /// Date the account was linked, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub date_linked: Option<String>,
    /// Name.
    pub name: String,
    /// Display name, if set.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub display_name: Option<String>,
    /// Primary type, e.g. `credit` or `depository`.
    #[serde(default, rename = "type", deserialize_with = "null_as_default::deserialize")]
    pub kind: String,
    /// Optional subtype, e.g. `checking`.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub subtype: Option<String>,
    /// Last four digits of the account number.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub mask: Option<String>,
    /// Institution name.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub institution_name: String,
    /// One of [`PLAID_ACCOUNT_STATUSES`].
    pub status: String,
    /// Last successful import.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_import: Option<OffsetDateTime>,
    /// Current balance as a decimal string.
    pub balance: String,
    /// ISO 4217 currency code.
    pub currency: String,
    /// When the balance was last updated.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub balance_last_update: Option<OffsetDateTime>,
    /// Credit limit, for credit accounts.
    #[serde(default)]
    pub limit: Option<i64>,
}

impl PlaidAccount {
    /// The balance as [`Money`].
    pub fn parsed_amount(&self) -> Result<Money, CurrencyError> {
        parse_currency(&self.balance, &self.currency)
    }
}

impl Validate for PlaidAccount {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .one_of("status", Some(self.status.as_str()), PLAID_ACCOUNT_STATUSES)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct PlaidAccountsResponse {
    plaid_accounts: Vec<PlaidAccount>,
}

impl LunchMoneyClient {
    /// Get all accounts linked through Plaid.
    pub async fn get_plaid_accounts(&self) -> Result<Vec<PlaidAccount>, LunchMoneyError> {
        let response: PlaidAccountsResponse = self
            .get_resource(
                v1::PLAID_ACCOUNTS,
                &QueryMap::new(),
                "get plaid accounts: decode response",
            )
            .await?;

        Rules::new()
            .each("plaid_accounts", &response.plaid_accounts)
            .finish()?;
        Ok(response.plaid_accounts)
    }
}
