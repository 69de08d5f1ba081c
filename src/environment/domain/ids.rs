//! Identifier types for the world domain.

use super::EnvironmentDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum length for a caller-supplied world identifier.
const MAX_ID_LENGTH: usize = 64;

/// Reconciliation key of a world record.
///
/// Identifiers are opaque. Generated ones are lowercase hex taken from a v4
/// UUID; caller-supplied ones only need to be non-empty ASCII alphanumerics,
/// `-` or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentId(String);

impl EnvironmentId {
    /// Creates a validated identifier from caller input.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentDomainError::EmptyEnvironmentId`] when the value is
    /// blank, [`EnvironmentDomainError::EnvironmentIdTooLong`] when it exceeds
    /// 64 characters, or [`EnvironmentDomainError::InvalidEnvironmentId`] when
    /// it contains other characters.
    pub fn new(value: impl Into<String>) -> Result<Self, EnvironmentDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(EnvironmentDomainError::EmptyEnvironmentId);
        }

        if trimmed.len() > MAX_ID_LENGTH {
            return Err(EnvironmentDomainError::EnvironmentIdTooLong(raw));
        }

        let is_valid = trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !is_valid {
            return Err(EnvironmentDomainError::InvalidEnvironmentId(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Generates a fresh random identifier of the given length.
    #[must_use]
    pub fn generate(length: IdLength) -> Self {
        let token = Uuid::new_v4().simple().to_string();
        Self(token.chars().take(length.get()).collect())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EnvironmentId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EnvironmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number of hex characters kept from a generated identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdLength(usize);

impl IdLength {
    /// Shortest accepted generated identifier.
    pub const MIN: usize = 8;
    /// Longest accepted generated identifier (a full simple UUID).
    pub const MAX: usize = 32;

    /// Creates a validated identifier length.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentDomainError::InvalidIdLength`] when `length` is
    /// outside `8..=32`.
    pub const fn new(length: usize) -> Result<Self, EnvironmentDomainError> {
        if length < Self::MIN || length > Self::MAX {
            return Err(EnvironmentDomainError::InvalidIdLength {
                length,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(length))
    }

    /// Returns the length as a `usize`.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for IdLength {
    fn default() -> Self {
        Self(Self::MIN)
    }
}
