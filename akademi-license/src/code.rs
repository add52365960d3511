//! Code grammar, normalization, and masking.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed demo code accepted alongside production codes.
pub const DEMO_CODE: &str = "SA-DEMO-2024";

/// Placeholder shown when no (or too short a) code is available to mask.
pub const MASK_PLACEHOLDER: &str = "SA-…";

/// Segment count of a production code, prefix included.
const SEGMENTS: usize = 4;
/// Length of each body segment.
const SEGMENT_LEN: usize = 4;

/// The input did not match the code grammar after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("code does not match the SA-XXXX-XXXX-XXXX format")]
pub struct InvalidCode;

/// Canonicalizes raw user input: trims whitespace, uppercases, and strips
/// every character outside `[A-Z0-9-]`. Idempotent.
///
/// Uppercasing is Unicode-aware, so letters that uppercase into `[A-Z]`
/// (dotless `ı` → `I`, `ß` → `SS`) survive the strip the same way they do
/// in the web client.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .flat_map(char::to_uppercase)
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Returns true iff `code` is the demo literal or matches
/// `SA-[A-Z0-9]{4}-[A-Z0-9]{4}-[A-Z0-9]{4}` exactly.
///
/// The check is anchored and case-sensitive; callers are expected to have
/// run [`normalize`] first.
#[must_use]
pub fn is_valid_format(code: &str) -> bool {
    if code == DEMO_CODE {
        return true;
    }

    let parts: Vec<&str> = code.split('-').collect();
    parts.len() == SEGMENTS
        && parts[0] == "SA"
        && parts[1..].iter().all(|seg| {
            seg.len() == SEGMENT_LEN
                && seg
                    .bytes()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        })
}

/// Redacts a code for display: first seven characters, an ellipsis, and the
/// last four. Codes of eight characters or fewer collapse to the fixed
/// placeholder. Display-only, not a security measure.
#[must_use]
pub fn mask(code: &str) -> String {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() <= 8 {
        return MASK_PLACEHOLDER.to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

/// A normalized, format-valid license code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LicenseCode(String);

impl LicenseCode {
    /// Normalizes `raw` and checks it against the grammar.
    pub fn parse(raw: &str) -> Result<Self, InvalidCode> {
        let normalized = normalize(raw);
        if is_valid_format(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(InvalidCode)
        }
    }

    /// Returns the normalized code string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the redacted display form.
    #[must_use]
    pub fn masked(&self) -> String {
        mask(&self.0)
    }

    /// Returns true if this is the demo code.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.0 == DEMO_CODE
    }
}

impl fmt::Display for LicenseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LicenseCode {
    type Err = InvalidCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LicenseCode {
    type Error = InvalidCode;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<LicenseCode> for String {
    fn from(code: LicenseCode) -> Self {
        code.0
    }
}
