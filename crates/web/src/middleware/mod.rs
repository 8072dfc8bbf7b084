//! HTTP middleware and extractors.
//!
//! # Layer Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with the in-process memory store)
//!
//! Route handlers read the session through the extractors in [`auth`].

pub mod auth;
pub mod session;

pub use auth::{RequireAdmin, RequireUser, SessionRejection, UserSession};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
