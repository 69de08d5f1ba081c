//! Host port values and the control/adb port assignment.

use super::EnvironmentDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset between a world's control port and its adb port.
///
/// Containers already provisioned rely on this convention, so it must not
/// change.
pub const ADB_PORT_OFFSET: u16 = 56;

/// A TCP port in `1..=65535`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Port(u16);

impl Port {
    /// Control port used when nothing else is configured.
    pub const DEFAULT_BASE: Self = Self(5000);

    /// Creates a validated port.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentDomainError::InvalidPort`] for port `0`.
    pub fn new(value: u16) -> Result<Self, EnvironmentDomainError> {
        if value == 0 {
            return Err(EnvironmentDomainError::InvalidPort(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Wraps a non-zero port constant.
    pub(super) const fn from_static(value: u16) -> Self {
        Self(value)
    }

    /// Parses a port from user input.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentDomainError::InvalidPort`] when the input is not
    /// an integer in `1..=65535`.
    pub fn parse(raw: &str) -> Result<Self, EnvironmentDomainError> {
        let value = raw
            .trim()
            .parse::<u16>()
            .map_err(|_| EnvironmentDomainError::InvalidPort(raw.to_owned()))?;
        Self::new(value)
    }

    /// Returns the port number.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Returns this port shifted by `offset`, or `None` past 65535.
    #[must_use]
    pub fn checked_add(self, offset: u16) -> Option<Self> {
        self.0.checked_add(offset).map(Self)
    }
}

impl TryFrom<u16> for Port {
    type Error = EnvironmentDomainError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host ports published for a world, by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortAssignment {
    control: Port,
    adb: Port,
}

impl PortAssignment {
    /// Resolves the assignment for a control port.
    ///
    /// The adb port is `control + 56` unless `adb` overrides it.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentDomainError::DerivedPortOutOfRange`] when no
    /// override is given and the derived port would exceed 65535.
    pub fn resolve(control: Port, adb: Option<Port>) -> Result<Self, EnvironmentDomainError> {
        let adb_port = match adb {
            Some(explicit) => explicit,
            None => control.checked_add(ADB_PORT_OFFSET).ok_or(
                EnvironmentDomainError::DerivedPortOutOfRange {
                    control: control.get(),
                },
            )?,
        };
        Ok(Self {
            control,
            adb: adb_port,
        })
    }

    /// Returns the control port.
    #[must_use]
    pub const fn control(&self) -> Port {
        self.control
    }

    /// Returns the adb port.
    #[must_use]
    pub const fn adb(&self) -> Port {
        self.adb
    }
}
