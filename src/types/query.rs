//! Flattening typed filters into query parameters.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::LunchMoneyError;
use crate::validation::Validate;

/// Query parameters sent with a GET request, keyed by filter name.
pub type QueryMap = BTreeMap<String, String>;

/// A filter struct that can be sent as GET parameters.
///
/// Implementors mark every optional field with
/// `#[serde(skip_serializing_if = "Option::is_none")]` so that an unset field
/// is absent from the query string rather than sent empty.
pub trait QueryFilter: Serialize + DeserializeOwned + Validate {
    /// Convert the set fields into a query map.
    ///
    /// Integers become base-10 strings, booleans `"true"`/`"false"` and
    /// strings pass through verbatim.
    fn to_map(&self) -> Result<QueryMap, LunchMoneyError> {
        let encoded = serde_urlencoded::to_string(self)
            .map_err(|e| LunchMoneyError::InvalidRequest(e.to_string()))?;
        serde_urlencoded::from_str(&encoded)
            .map_err(|e| LunchMoneyError::InvalidRequest(e.to_string()))
    }

    /// Rebuild a filter from a query map.
    fn from_map(map: &QueryMap) -> Result<Self, LunchMoneyError> {
        let encoded = serde_urlencoded::to_string(map)
            .map_err(|e| LunchMoneyError::InvalidRequest(e.to_string()))?;
        serde_urlencoded::from_str(&encoded)
            .map_err(|e| LunchMoneyError::InvalidRequest(e.to_string()))
    }

    /// Validate, then flatten. Used by the resource accessors.
    fn to_query(&self) -> Result<QueryMap, LunchMoneyError> {
        self.validate()?;
        self.to_map()
    }
}

/// Validate and flatten an optional filter; `None` sends no parameters.
pub(crate) fn optional_query<F: QueryFilter>(
    filters: Option<&F>,
) -> Result<QueryMap, LunchMoneyError> {
    filters.map_or_else(|| Ok(QueryMap::new()), QueryFilter::to_query)
}
