//! Core types for Malice.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod pin;
pub mod role;

pub use email::{Email, EmailError};
pub use id::*;
pub use pin::{Pin, PinError};
pub use role::{Role, View};
