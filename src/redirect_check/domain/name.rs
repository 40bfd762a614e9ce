//! Validated profile name type.

use super::RedirectDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a communication profile, unique within a payload's scope.
///
/// Profile names double as RPC addresses, so they are kept exactly as
/// stored (e.g. `http`, `websocket`, `dns`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileName(String);

impl ProfileName {
    /// Creates a validated profile name.
    ///
    /// # Errors
    ///
    /// Returns [`RedirectDomainError::EmptyProfileName`] when the value is
    /// blank, or [`RedirectDomainError::PaddedProfileName`] when it has
    /// leading or trailing whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, RedirectDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RedirectDomainError::EmptyProfileName);
        }
        if trimmed.len() != raw.len() {
            return Err(RedirectDomainError::PaddedProfileName(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the profile name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProfileName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
