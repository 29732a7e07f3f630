//! The short alphanumeric share code.
//!
//! Codes are 6 characters drawn from a 32-symbol alphabet that omits the
//! ambiguous `I`, `O`, `0`, and `1`. Parsing normalizes to uppercase so
//! codes can be typed in either case.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Number of characters in a share code.
pub const CODE_LENGTH: usize = 6;

/// The 32-symbol code alphabet. 32^6 gives roughly 1.07 billion codes.
pub const CODE_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// A validated, uppercase share code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "String", into = "String")]
#[sqlx(transparent)]
pub struct ShareCode(String);

impl ShareCode {
    /// Parse and normalize a user-supplied code.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let normalized = input.trim().to_ascii_uppercase();
        if normalized.len() != CODE_LENGTH {
            return Err(AppError::validation(format!(
                "Share code must be exactly {CODE_LENGTH} characters"
            )));
        }
        if !normalized.bytes().all(|b| CODE_ALPHABET.contains(&b)) {
            return Err(AppError::validation(
                "Share code contains characters outside the code alphabet",
            ));
        }
        Ok(Self(normalized))
    }

    /// Build a code from bytes already drawn from [`CODE_ALPHABET`].
    ///
    /// Used by the generator; panics are impossible because the generator
    /// only indexes into the alphabet.
    pub fn from_alphabet_bytes(bytes: [u8; CODE_LENGTH]) -> Self {
        debug_assert!(bytes.iter().all(|b| CODE_ALPHABET.contains(b)));
        Self(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShareCode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ShareCode {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShareCode> for String {
    fn from(code: ShareCode) -> String {
        code.0
    }
}
