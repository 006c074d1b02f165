//! Environment variable secret provider.
//!
//! Read-only: secrets are set via shell config or the process environment,
//! never through the application. Values are wrapped in
//! [`secrecy::SecretString`] as early as possible so they stay out of Debug
//! output and logs.

use secrecy::SecretString;

/// Environment variable secret provider.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    /// Create a new environment variable secret provider.
    pub fn new() -> Self {
        Self
    }

    /// Read a secret from the environment.
    ///
    /// Returns `None` when the variable is unset. Blank and non-UTF-8
    /// values also resolve to `None`, with a warning, since a secret
    /// that cannot be used is as good as missing.
    pub fn get(&self, key: &str) -> Option<SecretString> {
        match std::env::var(key) {
            Ok(value) if value.trim().is_empty() => {
                tracing::warn!("environment variable {key} is set but blank");
                None
            }
            Ok(value) => Some(SecretString::from(value)),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                tracing::warn!("environment variable {key} contains invalid unicode");
                None
            }
        }
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}
