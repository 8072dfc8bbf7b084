//! Malice Core - Domain types and rules for office lunch ordering.
//!
//! This crate provides the types shared by the Malice components:
//! - `web` - Ordering form and admin panel (axum)
//! - `cli` - Command-line tools for migrations, exports and maintenance
//!
//! # Architecture
//!
//! The core crate contains types and pure rules only - no I/O, no database
//! access, no HTTP. Storage and presentation live in the `web` crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, emails, PINs and roles
//! - [`employee`] - Employee records and the employee directory
//! - [`menu`] - Daily specials, permanent meals and menu publication
//! - [`order`] - Orders and order submission rules
//! - [`session`] - Login, admin view gate and PIN check
//! - [`summary`] - Per-meal aggregation of a day's orders
//! - [`export`] - XML and CSV exports

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod employee;
pub mod export;
pub mod menu;
pub mod order;
pub mod session;
pub mod summary;
pub mod types;

pub use employee::{Employee, EmployeeDirectory, EmployeeError, EmployeeInput};
pub use export::{ExportError, ExportFile};
pub use menu::{Meal, MenuBoard, MenuError};
pub use order::{Order, OrderDraft, OrderEdit, OrderError};
pub use session::{AdminAccess, CurrentUser, SessionError, SessionState};
pub use summary::{DailySummary, MealTally};
pub use types::*;
