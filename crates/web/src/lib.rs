//! Malice web library.
//!
//! The ordering form and the admin panel as a library, so the integration
//! tests and the CLI can build the same router and stores.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`db`] - Order store (`PostgreSQL` slot or process memory)
//! - [`routes`] - Axum handlers and the application router
//! - [`services`] - Simulated remote reports
//! - [`state`] - Shared state: directory, menu, order store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::{ExportMode, MaliceConfig};
pub use routes::app;
pub use state::AppState;
