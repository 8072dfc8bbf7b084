//! File exports of the order store.
//!
//! - [`daily_xml`] - today's orders as an XML document
//! - [`monthly_csv`] - the whole history as a CSV sheet with a UTF-8 BOM

mod csv;
mod xml;

use chrono::{Datelike, NaiveDate};

pub use self::csv::monthly_csv;
pub use self::xml::daily_xml;

/// Errors from building an export.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// No orders dated today.
    #[error("Danes ni nobenih naročil za izvoz.")]
    NoOrdersToday,
    /// The store is empty.
    #[error("Ni shranjenih naročil za izvoz.")]
    NoOrders,
}

/// A generated export, ready to be sent as an attachment or written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub content: String,
    /// Number of orders in the file.
    pub orders: usize,
}

const MONTHS_SL: [&str; 12] = [
    "januar", "februar", "marec", "april", "maj", "junij", "julij", "avgust", "september",
    "oktober", "november", "december",
];

/// Slovene name of the month of `date`, lower case.
#[must_use]
pub fn month_name(date: NaiveDate) -> &'static str {
    MONTHS_SL[date.month0() as usize]
}
