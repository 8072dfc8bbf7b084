//! Admin PIN.

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Pin`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PinError {
    /// The input is empty or only whitespace.
    #[error("PIN cannot be empty")]
    Empty,
    /// The input is not exactly [`Pin::LENGTH`] ASCII digits.
    #[error("PIN must be exactly {len} digits")]
    Format {
        /// Required number of digits.
        len: usize,
    },
}

/// A 4-digit PIN gating the admin view.
///
/// Stored and compared as plain text. `Debug` does not print the digits.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Pin(String);

impl Pin {
    /// Number of digits in a PIN.
    pub const LENGTH: usize = 4;

    /// Parse a PIN from user input (surrounding whitespace is trimmed).
    ///
    /// # Errors
    ///
    /// Returns [`PinError::Empty`] for blank input and [`PinError::Format`]
    /// unless the input is exactly four ASCII digits.
    pub fn parse(s: &str) -> Result<Self, PinError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PinError::Empty);
        }
        if s.len() != Self::LENGTH || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PinError::Format { len: Self::LENGTH });
        }
        Ok(Self(s.to_owned()))
    }

    /// Case-sensitive comparison against an entered PIN.
    #[must_use]
    pub fn matches(&self, entered: &str) -> bool {
        self.0 == entered
    }

    /// Returns the PIN digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Pin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Pin([REDACTED])")
    }
}
