//! Daily and monthly exports.
//!
//! In download mode the admin gets an XML or CSV attachment. In remote mode
//! the same data goes through the simulated [`ReportService`](crate::services::ReportService).
//! Routes of the inactive mode answer 404.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use malice_core::{ExportError, ExportFile, Order, export};

use crate::config::ExportMode;
use crate::error::AppError;
use crate::middleware::{RequireAdmin, UserSession};
use crate::models::Flash;
use crate::state::{AppState, today};

const DAILY_FAILURE: &str = "Napaka pri izvozu naročil. Poskusite znova.";
const MONTHLY_FAILURE: &str = "Napaka pri izvozu mesečnega poročila.";

fn require_mode(state: &AppState, mode: ExportMode) -> Result<(), AppError> {
    if state.config().export_mode == mode {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("export in {mode} mode")))
    }
}

/// Stored orders, or an error banner when the store cannot be read.
async fn load_orders(state: &AppState, failure: &str) -> Result<Vec<Order>, Flash> {
    state.orders().list_submitted().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to read orders for export");
        Flash::error(failure)
    })
}

fn attachment(file: ExportFile) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    (
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.content,
    )
        .into_response()
}

/// Queue `flash` for the admin page and hand out `file`.
async fn download(
    session: &UserSession,
    flash: Flash,
    file: ExportFile,
) -> Result<Response, AppError> {
    session.flash(flash).await?;
    Ok(attachment(file))
}

async fn back_to_admin(session: &UserSession, flash: Flash) -> Result<Response, AppError> {
    session.redirect_with(flash, "/admin").await
}

fn export_error_flash(e: &ExportError) -> Flash {
    Flash::error(e.to_string())
}

// =============================================================================
// Download mode
// =============================================================================

/// Download today's orders as XML.
#[instrument(skip_all)]
pub async fn daily(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
) -> Result<Response, AppError> {
    require_mode(&state, ExportMode::Download)?;

    let orders = match load_orders(&state, DAILY_FAILURE).await {
        Ok(orders) => orders,
        Err(flash) => return back_to_admin(&session, flash).await,
    };
    match export::daily_xml(&orders, today()) {
        Ok(file) => {
            tracing::info!(orders = file.orders, filename = %file.filename, "Daily export");
            let message = format!(
                "Uspešno izvoženo {} naročil v datoteko {}!",
                file.orders, file.filename
            );
            download(&session, Flash::success(message), file).await
        }
        Err(e) => back_to_admin(&session, export_error_flash(&e)).await,
    }
}

/// Download the whole order history as CSV.
#[instrument(skip_all)]
pub async fn monthly(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
) -> Result<Response, AppError> {
    require_mode(&state, ExportMode::Download)?;

    let orders = match load_orders(&state, MONTHLY_FAILURE).await {
        Ok(orders) => orders,
        Err(flash) => return back_to_admin(&session, flash).await,
    };
    match export::monthly_csv(&orders, today()) {
        Ok(file) => {
            tracing::info!(orders = file.orders, filename = %file.filename, "Monthly export");
            let message = format!(
                "Uspešno izvoženo {} naročil. Priporočamo, da sedaj počistite zgodovino.",
                file.orders
            );
            download(&session, Flash::success(message), file).await
        }
        Err(e) => back_to_admin(&session, export_error_flash(&e)).await,
    }
}

// =============================================================================
// Remote mode
// =============================================================================

/// Post today's orders to the (simulated) order spreadsheet.
#[instrument(skip_all)]
pub async fn daily_report(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
) -> Result<Response, AppError> {
    require_mode(&state, ExportMode::Remote)?;

    let orders = match load_orders(&state, DAILY_FAILURE).await {
        Ok(orders) => orders,
        Err(flash) => return back_to_admin(&session, flash).await,
    };
    let flash = match state.reports().post_daily_sheet(&orders, today()).await {
        Ok(receipt) => Flash::success(format!(
            "Uspešno poslano {} naročil v preglednico za {}.",
            receipt.rows, receipt.date
        )),
        Err(e) => Flash::error(e.to_string()),
    };
    back_to_admin(&session, flash).await
}

/// Email the (simulated) monthly report.
#[instrument(skip_all)]
pub async fn monthly_report(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
) -> Result<Response, AppError> {
    require_mode(&state, ExportMode::Remote)?;

    let orders = match load_orders(&state, MONTHLY_FAILURE).await {
        Ok(orders) => orders,
        Err(flash) => return back_to_admin(&session, flash).await,
    };
    let flash = match state.reports().send_monthly_report(&orders, today()).await {
        Ok(receipt) => Flash::success(format!(
            "Mesečno poročilo ({} naročil) je bilo poslano na {}. Priporočamo, da sedaj počistite zgodovino.",
            receipt.orders, receipt.to
        )),
        Err(e) => Flash::error(e.to_string()),
    };
    back_to_admin(&session, flash).await
}
