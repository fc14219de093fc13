//! Common types used across the Lunch Money client library.

pub mod query;
pub mod serde_helpers;

pub use query::{QueryFilter, QueryMap};
