//! Custom serde helpers for Lunch Money's loosely typed JSON.
//!
//! The API is not always consistent about field types across endpoints and
//! revisions. These modules keep the record types strict where it matters and
//! tolerant where the server is not.

use std::fmt;

use serde::{Deserialize, Deserializer, de};

/// Deserialize to `None` instead of failing on invalid/unexpected data.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use lunchmoney_api_client::types::serde_helpers::default_on_error;
///
/// #[derive(Deserialize, Debug)]
/// struct Envelope {
///     #[serde(deserialize_with = "default_on_error::deserialize", default)]
///     message: Option<String>,
/// }
///
/// let json = r#"{"message":404}"#;
/// let envelope: Envelope = serde_json::from_str(json).unwrap();
/// assert!(envelope.message.is_none());
/// ```
pub mod default_on_error {
    use super::*;

    /// Deserialize a value, returning None if deserialization fails.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Ok(T::deserialize(deserializer).ok())
    }
}

/// Helper for empty strings that should be deserialized as None.
///
/// Several fields come back as `""` instead of null.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use lunchmoney_api_client::types::serde_helpers::empty_string_as_none;
///
/// #[derive(Deserialize, Debug)]
/// struct Response {
///     #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
///     notes: Option<String>,
/// }
///
/// let json = r#"{"notes":""}"#;
/// let response: Response = serde_json::from_str(json).unwrap();
/// assert!(response.notes.is_none());
/// ```
pub mod empty_string_as_none {
    use super::*;

    /// Deserialize a string, returning None if empty.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.filter(|s| !s.is_empty()))
    }
}

/// Treat an explicit `null` like a missing field.
///
/// Combine with `#[serde(default)]` so both cases yield `T::default()`.
pub mod null_as_default {
    use super::*;

    /// Deserialize a value, mapping `null` to its default.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Deserialize<'de> + Default,
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

/// Helper for numeric fields sent either as a JSON number or a string.
///
/// The value is kept in its textual form so no precision is lost before it
/// reaches [`parse_currency`](crate::money::parse_currency).
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use lunchmoney_api_client::types::serde_helpers::number_or_string;
///
/// #[derive(Deserialize, Debug)]
/// struct Data {
///     #[serde(deserialize_with = "number_or_string::deserialize", default)]
///     budget_amount: Option<String>,
/// }
///
/// let a: Data = serde_json::from_str(r#"{"budget_amount":150.5}"#).unwrap();
/// let b: Data = serde_json::from_str(r#"{"budget_amount":"150.5"}"#).unwrap();
/// assert_eq!(a.budget_amount, b.budget_amount);
/// ```
pub mod number_or_string {
    use super::*;

    /// Deserialize a number or string into its textual form.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumberOrStringVisitor;

        impl<'de> de::Visitor<'de> for NumberOrStringVisitor {
            type Value = Option<String>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number, a numeric string or null")
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Some(v.to_string()))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Some(v.to_string()))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Some(v.to_string()))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Some(v.to_string()).filter(|s| !s.is_empty()))
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Some(v).filter(|s| !s.is_empty()))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }
        }

        deserializer.deserialize_any(NumberOrStringVisitor)
    }
}
