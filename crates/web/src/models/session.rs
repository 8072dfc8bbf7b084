//! Session-related types.
//!
//! The [`SessionState`](malice_core::SessionState) value and the pending
//! feedback banner are stored in the tower-sessions session under [`keys`].

use serde::{Deserialize, Serialize};

/// Banner colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

/// One-shot feedback banner shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    /// A success banner.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    /// An error banner.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    /// Returns `true` for an error banner.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == FlashKind::Error
    }
}

/// Session keys.
pub mod keys {
    /// Key for the identity, view and admin flag.
    pub const SESSION_STATE: &str = "malice_session";

    /// Key for the pending feedback banner.
    pub const FLASH: &str = "flash";
}
