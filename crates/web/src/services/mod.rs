//! Services behind the admin actions.
//!
//! # Services
//!
//! - `reports` - Simulated spreadsheet upload and monthly email report

pub mod reports;

pub use reports::{EmailReceipt, ReportError, ReportService, SheetReceipt};
