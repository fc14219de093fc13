//! Lunch Money REST API client.
//!
//! [`LunchMoneyClient`] runs every request through one pipeline that
//! authenticates it and turns the API's error shapes into
//! [`LunchMoneyError`](crate::LunchMoneyError). Each resource module adds its
//! accessors to the client.
//!
//! # Trait-based API
//!
//! The [`LunchMoneyApi`] trait abstracts all accessors so callers can swap in
//! a mock or a wrapper:
//!
//! ```rust,ignore
//! use lunchmoney_api_client::rest::{LunchMoneyApi, LunchMoneyClient};
//!
//! async fn use_client<C: LunchMoneyApi>(client: &C) -> Result<(), lunchmoney_api_client::LunchMoneyError> {
//!     let user = client.get_user().await?;
//!     println!("Budget: {}", user.budget_name);
//!     Ok(())
//! }
//! ```

mod client;
mod endpoints;
mod envelope;
mod traits;

pub mod assets;
pub mod budgets;
pub mod categories;
pub mod plaid;
pub mod recurring;
pub mod tags;
pub mod transactions;
pub mod user;

pub use client::{LunchMoneyClient, LunchMoneyClientBuilder, ResponseBody};
pub use endpoints::*;
pub use envelope::{ErrorEnvelope, ErrorField};
pub use traits::LunchMoneyApi;
