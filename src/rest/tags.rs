//! Tag endpoint.

use serde::Deserialize;

use crate::error::LunchMoneyError;
use crate::rest::LunchMoneyClient;
use crate::rest::endpoints::v1;
use crate::types::QueryMap;
use crate::types::serde_helpers::empty_string_as_none;

/// A transaction tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tag {
    /// Unique identifier.
    pub id: i64,
    /// Name.
    pub name: String,
    /// Description.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub description: Option<String>,
}

impl LunchMoneyClient {
    /// Get all tags.
    pub async fn get_tags(&self) -> Result<Vec<Tag>, LunchMoneyError> {
        self.get_resource(v1::TAGS, &QueryMap::new(), "get tags: decode response")
            .await
    }
}
