use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// A credential value that must never show up in logs.
///
/// Unlike a plain `String`, `Debug` and `Display` print `[REDACTED]` and the
/// buffer is zeroed on drop. It still serializes transparently because the
/// credentials have to reach the persisted snapshot and the composite
/// registration payload.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretText {
    inner: String,
}

impl SecretText {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Borrow the secret. Callers must not log the result.
    pub fn expose(&self) -> &str {
        &self.inner
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<&str> for SecretText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SecretText {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for SecretText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Deref for SecretText {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.expose()
    }
}

impl Drop for SecretText {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}
