//! Identifier types used throughout the Akademi core.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Errors from parsing identifier strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    /// The identifier string was empty.
    #[error("identifier is empty")]
    Empty,

    /// The identifier is neither a UUID nor 32 hex characters.
    #[error("malformed device id: {0:?}")]
    Malformed(String),
}

/// Identifier for one browser/device profile.
///
/// Accepted forms are a UUID (hyphenated, any case) or exactly 32 lowercase
/// hex characters — the two shapes the generator produces. Generated once per
/// profile and immutable thereafter; generation itself lives with the device
/// identity provider, this type only guards the format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Validates and wraps a device id string.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(IdError::Empty);
        }
        let well_formed = Uuid::parse_str(&raw).is_ok()
            || (raw.len() == 32 && raw.bytes().all(|b| b.is_ascii_hexdigit()));
        if !well_formed {
            return Err(IdError::Malformed(raw));
        }
        Ok(Self(raw))
    }

    /// Creates a device id from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first eight characters, used for watermarks and
    /// synthesized user ids.
    #[must_use]
    pub fn short(&self) -> &str {
        &self.0[..8]
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DeviceId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Identifier for the user that holds a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wraps a user id string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}
