//! Error types for world domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing world domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvironmentDomainError {
    /// The world identifier is empty after trimming.
    #[error("environment id must not be empty")]
    EmptyEnvironmentId,

    /// The world identifier contains characters outside `[A-Za-z0-9_-]`.
    #[error(
        "environment id '{0}' contains invalid characters (only ASCII alphanumerics, '-' and '_' allowed)"
    )]
    InvalidEnvironmentId(String),

    /// The world identifier exceeds the 64-character limit.
    #[error("environment id exceeds 64 character limit: {0}")]
    EnvironmentIdTooLong(String),

    /// The generated identifier length is outside the supported range.
    #[error("generated id length must be between {min} and {max}, got {length}")]
    InvalidIdLength {
        /// Requested length.
        length: usize,
        /// Smallest accepted length.
        min: usize,
        /// Largest accepted length.
        max: usize,
    },

    /// A port value is not a number in `1..=65535`.
    #[error("invalid port '{0}': expected an integer between 1 and 65535")]
    InvalidPort(String),

    /// The adb port derived from the control port does not fit in a port.
    #[error("adb port derived from control port {control} exceeds 65535")]
    DerivedPortOutOfRange {
        /// Control port the derivation started from.
        control: u16,
    },

    /// The host is empty after trimming.
    #[error("host must not be empty")]
    EmptyHost,
}
