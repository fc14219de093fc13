//! Authentication module for the Lunch Money API.
//!
//! Lunch Money authenticates with a personal access token sent as a bearer
//! token. This module provides secure storage for that token and pluggable
//! ways to obtain it.

mod credentials;

pub use credentials::{
    ApiKey, CredentialsProvider, DEFAULT_TOKEN_VAR, EnvCredentials, StaticCredentials,
};
