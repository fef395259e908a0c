use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Lowercase version-4 layout: `xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`, `y` in `[89ab]`.
const V4_PATTERN: &str = r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";

/// Hex positions after which a hyphen is inserted.
const HYPHEN_AFTER: [usize; 4] = [8, 12, 16, 20];

fn v4_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(V4_PATTERN).expect("invalid regex"))
}

/// Random RFC 4122 version-4 identifier in its canonical 36-character form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Total length of the hyphenated form.
    pub const LEN: usize = 36;

    /// Builds an identifier from 16 random bytes.
    ///
    /// Byte 6 gets the version nibble `0100` and byte 8 the `10` variant
    /// prefix; every other bit is taken from `bytes` unchanged.
    pub fn from_random_bytes(mut bytes: [u8; 16]) -> Self {
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;

        let hex = hex::encode(bytes);
        let mut out = String::with_capacity(Self::LEN);
        let mut start = 0;
        for end in HYPHEN_AFTER {
            out.push_str(&hex[start..end]);
            out.push('-');
            start = end;
        }
        out.push_str(&hex[start..]);
        Self(out)
    }

    /// Parses a validated identifier from a string.
    ///
    /// Only the lowercase version-4 form is accepted.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !v4_regex().is_match(&s) {
            return Err(ValidationError::PatternMismatch {
                field: "Identifier",
                value: s,
            });
        }
        Ok(Self(s))
    }

    /// Returns the hyphenated text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the 16 bytes the identifier encodes.
    pub fn as_bytes(&self) -> [u8; 16] {
        let hex: String = self.0.chars().filter(|c| *c != '-').collect();
        let mut bytes = [0u8; 16];
        // The constructor and parse() both guarantee 32 lowercase hex digits.
        hex::decode_to_slice(hex, &mut bytes).expect("identifier holds 32 hex digits");
        bytes
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
