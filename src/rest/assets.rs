//! Manually-managed asset endpoint.

use serde::Deserialize;
use time::OffsetDateTime;

use crate::error::LunchMoneyError;
use crate::money::{CurrencyError, Money, parse_currency};
use crate::rest::LunchMoneyClient;
use crate::rest::endpoints::v1;
use crate::types::QueryMap;
use crate::types::serde_helpers::{empty_string_as_none, null_as_default};

/// A manually-managed asset or liability.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Asset {
    /// Unique identifier.
    pub id: i64,
    /// Primary type, e.g. `cash` or `credit`.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub type_name: String,
    /// Optional subtype, e.g. `retirement`.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub subtype_name: Option<String>,
    /// Name.
    pub name: String,
    /// Display name, if set.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub display_name: Option<String>,
    /// Current balance as a decimal string.
    pub balance: String,
    /// When the balance was last set.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub balance_as_of: Option<OffsetDateTime>,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Account status.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub status: Option<String>,
    /// Institution holding the asset.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub institution_name: Option<String>,
    /// Creation time.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl Asset {
    /// The balance as [`Money`].
    pub fn parsed_amount(&self) -> Result<Money, CurrencyError> {
        parse_currency(&self.balance, &self.currency)
    }
}

#[derive(Debug, Deserialize)]
struct AssetsResponse {
    assets: Vec<Asset>,
}

impl LunchMoneyClient {
    /// Get all manually-managed assets.
    pub async fn get_assets(&self) -> Result<Vec<Asset>, LunchMoneyError> {
        let response: AssetsResponse = self
            .get_resource(v1::ASSETS, &QueryMap::new(), "get assets: decode response")
            .await?;
        Ok(response.assets)
    }
}
