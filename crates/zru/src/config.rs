use std::fmt;

use crate::constants::{ENV_KEY, ENV_SECRET_KEY};
use crate::error::ZruError;

/// Credentials for one ZRU account.
///
/// The secret key is only ever used as signing material; `Debug` redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub key: String,
    secret_key: String,
}

impl ClientConfig {
    pub fn new(key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Read `ZRU_KEY` and `ZRU_SECRET_KEY` from the process environment.
    pub fn from_env() -> Result<Self, ZruError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source. Empty values count as missing.
    ///
    /// The public key is trimmed; the secret key is kept byte for byte (see
    /// [`secret_key_from_lookup`]).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ZruError> {
        let key = lookup(ENV_KEY)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ZruError::ConfigError(format!("{ENV_KEY} is required")))?;

        Ok(Self {
            key,
            secret_key: secret_key_from_lookup(&lookup)?,
        })
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

/// Read `ZRU_SECRET_KEY` exactly as stored; only an empty value counts as missing.
///
/// The platform signs with the exact secret bytes, so surrounding whitespace is
/// part of the key.
pub fn secret_key_from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ZruError> {
    lookup(ENV_SECRET_KEY)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ZruError::ConfigError(format!("{ENV_SECRET_KEY} is required")))
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("key", &self.key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
