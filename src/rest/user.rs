//! Current user endpoint.

use serde::Deserialize;

use crate::error::LunchMoneyError;
use crate::rest::LunchMoneyClient;
use crate::rest::endpoints::v1;
use crate::types::QueryMap;
use crate::types::serde_helpers::empty_string_as_none;

/// The user the API key belongs to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    /// User's name.
    pub user_name: String,
    /// User's email.
    pub user_email: String,
    /// User id.
    pub user_id: i64,
    /// Budget account id.
    pub account_id: i64,
    /// Name of the budget.
    pub budget_name: String,
    /// Primary currency of the budget.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub primary_currency: Option<String>,
    /// Label of the API key used for the request.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub api_key_label: Option<String>,
}

impl LunchMoneyClient {
    /// Get the user the API key belongs to.
    ///
    /// Handy as a cheap check that a key is valid.
    pub async fn get_user(&self) -> Result<User, LunchMoneyError> {
        self.get_resource(v1::ME, &QueryMap::new(), "get user: decode response")
            .await
    }
}
