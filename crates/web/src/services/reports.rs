//! Simulated remote reporting.
//!
//! Stands in for a spreadsheet upload of today's orders and an emailed
//! monthly report. Both wait for the configured delay, log what would have
//! been sent and succeed. No network call is made.

use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

use malice_core::export::{self, ExportError};
use malice_core::order::{Order, orders_on};

/// Recipient used when `MALICE_REPORT_EMAIL` is not set.
pub const DEFAULT_REPORT_RECIPIENT: &str = "malice@example.com";

/// Errors from report dispatch.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Nothing to report.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result of a simulated spreadsheet upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetReceipt {
    pub date: NaiveDate,
    pub rows: usize,
}

/// Result of a simulated email report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailReceipt {
    pub to: String,
    pub subject: String,
    pub attachment: String,
    pub orders: usize,
    pub message_id: String,
}

/// Simulated remote reporting service.
#[derive(Debug, Clone)]
pub struct ReportService {
    delay: Duration,
    recipient: String,
}

impl ReportService {
    /// Create a service that waits `delay` before each simulated call.
    #[must_use]
    pub fn new(delay: Duration, recipient: Option<String>) -> Self {
        Self {
            delay,
            recipient: recipient.unwrap_or_else(|| DEFAULT_REPORT_RECIPIENT.to_string()),
        }
    }

    /// Recipient of the monthly report.
    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Post today's orders to the order spreadsheet.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Export(NoOrdersToday)` if nothing was ordered today.
    pub async fn post_daily_sheet(
        &self,
        orders: &[Order],
        today: NaiveDate,
    ) -> Result<SheetReceipt, ReportError> {
        let rows = orders_on(orders, today).len();
        if rows == 0 {
            return Err(ExportError::NoOrdersToday.into());
        }

        tracing::info!(%today, rows, "Simulating spreadsheet upload");
        tokio::time::sleep(self.delay).await;
        tracing::info!(%today, rows, "Spreadsheet upload complete (simulated)");

        Ok(SheetReceipt { date: today, rows })
    }

    /// Email the monthly CSV report.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Export(NoOrders)` if the store is empty.
    pub async fn send_monthly_report(
        &self,
        orders: &[Order],
        today: NaiveDate,
    ) -> Result<EmailReceipt, ReportError> {
        let file = export::monthly_csv(orders, today)?;
        let subject = format!(
            "Malice - {} {}",
            export::month_name(today),
            chrono::Datelike::year(&today)
        );

        tracing::info!(
            to = %self.recipient,
            subject = %subject,
            attachment = %file.filename,
            bytes = file.content.len(),
            "Simulating monthly report email"
        );
        tokio::time::sleep(self.delay).await;

        let message_id = format!("mock-report-{}", chrono::Utc::now().timestamp_millis());
        tracing::info!(message_id = %message_id, "Monthly report sent (simulated)");

        Ok(EmailReceipt {
            to: self.recipient.clone(),
            subject,
            attachment: file.filename,
            orders: file.orders,
            message_id,
        })
    }
}
