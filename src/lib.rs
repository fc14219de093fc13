//! # Lunch Money Client
//!
//! An async Rust client library for the Lunch Money personal-finance REST API.
//!
//! ## Features
//!
//! - Transactions, budgets, categories, tags, recurring expenses, assets,
//!   Plaid accounts and the user profile
//! - Typed filters with presence semantics: unset fields are never sent
//! - Tolerant decoding of the API's several error shapes
//! - Caller-controlled cancellation and deadlines
//! - Fixed-point money with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lunchmoney_api_client::rest::LunchMoneyClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = LunchMoneyClient::new("access_token");
//!     let user = client.get_user().await?;
//!     println!("Hello, {}", user.user_name);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod context;
pub mod error;
pub mod money;
pub mod rest;
pub mod types;
pub mod validation;

// Re-export commonly used types at crate root
pub use context::{CancelHandle, CancelReason, RequestContext};
pub use error::{ApiError, ErrorKind, LunchMoneyError};
pub use money::{Money, parse_currency};
pub use rest::{LunchMoneyApi, LunchMoneyClient};

/// Result type alias using LunchMoneyError
pub type Result<T> = std::result::Result<T, LunchMoneyError>;
