//! Web-layer models stored in the browser session.

pub mod session;

pub use session::{Flash, FlashKind, keys as session_keys};
