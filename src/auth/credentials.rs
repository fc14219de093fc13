//! Credential management for Lunch Money API authentication.

use secrecy::{ExposeSecret, SecretString};

/// Default environment variable holding the API key.
pub const DEFAULT_TOKEN_VAR: &str = "LUNCHMONEY_TOKEN";

/// A Lunch Money API access token.
///
/// Sent as `Authorization: Bearer <key>` on every request.
#[derive(Clone)]
pub struct ApiKey {
    token: SecretString,
}

impl ApiKey {
    /// Wrap an access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }

    /// Get the raw token for the Authorization header.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.token.expose_secret()
    }

    /// Check if the token is blank.
    pub fn is_empty(&self) -> bool {
        self.token.expose_secret().trim().is_empty()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing the API key.
///
/// Implement this trait to customize how the key is retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the API key.
    fn api_key(&self) -> &ApiKey;
}

/// Static credentials provider that holds the key directly.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    api_key: ApiKey,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            api_key: ApiKey::new(token),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn api_key(&self) -> &ApiKey {
        &self.api_key
    }
}

/// Credentials provider that reads the key from an environment variable.
///
/// By default, reads `LUNCHMONEY_TOKEN`.
#[derive(Debug)]
pub struct EnvCredentials {
    api_key: ApiKey,
}

impl EnvCredentials {
    /// Try to read the key from `LUNCHMONEY_TOKEN`.
    ///
    /// Returns `None` if the variable is not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_var(DEFAULT_TOKEN_VAR)
    }

    /// Try to read the key from a custom environment variable.
    ///
    /// Returns `None` if the variable is not set.
    pub fn try_from_env_var(var: &str) -> Option<Self> {
        let token = std::env::var(var).ok()?;
        Some(Self {
            api_key: ApiKey::new(token),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn api_key(&self) -> &ApiKey {
        &self.api_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_debug_redacted() {
        let key = ApiKey::new("super_secret");
        let debug_str = format!("{:?}", key);
        assert!(!debug_str.contains("super_secret"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_shared_provider_behind_trait_object() {
        let provider: std::sync::Arc<dyn CredentialsProvider> =
            std::sync::Arc::new(StaticCredentials::new("shared_token"));
        let copy = std::sync::Arc::clone(&provider);
        assert_eq!(copy.api_key().expose_secret(), "shared_token");
    }

    #[test]
    fn test_static_credentials() {
        let provider = StaticCredentials::new("token");
        assert_eq!(provider.api_key().expose_secret(), "token");
        assert!(!provider.api_key().is_empty());
    }

    #[test]
    fn test_blank_key_is_empty() {
        assert!(ApiKey::new("").is_empty());
        assert!(ApiKey::new("   ").is_empty());
    }

    #[test]
    fn test_missing_env_var() {
        assert!(EnvCredentials::try_from_env_var("LUNCHMONEY_TEST_UNSET_VARIABLE").is_none());
    }
}
