//! Order history listing and clearing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use malice_core::Order;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::Flash;
use crate::routes::views::HeaderView;
use crate::state::AppState;

/// One row of the history table.
#[derive(Debug, Clone)]
pub struct OrderRow {
    pub id: String,
    pub date: String,
    pub user: String,
    pub meal: String,
    pub soup: &'static str,
    pub note: String,
    /// Orders stored without an id cannot be addressed.
    pub editable: bool,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            date: order.date.to_string(),
            user: order.user.clone(),
            meal: order.meal.clone(),
            soup: if order.has_soup { "Da" } else { "Ne" },
            note: order.note().unwrap_or("-").to_string(),
            editable: order.id.is_some(),
        }
    }
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/orders.html")]
pub struct OrdersTemplate {
    pub header: Option<HeaderView>,
    pub flash: Option<Flash>,
    pub orders: Vec<OrderRow>,
}

/// Display every stored order, newest first.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
) -> Result<Response, AppError> {
    let orders = state.orders().list().await?;
    let flash = session.take_flash().await?;

    Ok(OrdersTemplate {
        header: HeaderView::from_state(&session.state),
        flash,
        orders: orders.iter().map(OrderRow::from).collect(),
    }
    .into_response())
}

/// Delete the whole order history.
#[instrument(skip_all)]
pub async fn clear(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
) -> Result<Response, AppError> {
    let flash = match state.orders().list().await {
        Ok(orders) if orders.is_empty() => Flash::error("Zgodovina je že prazna."),
        Ok(orders) => match state.orders().clear().await {
            Ok(()) => {
                tracing::info!(count = orders.len(), "Order history cleared");
                Flash::success("Zgodovina naročil je bila uspešno počiščena.")
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to clear order history");
                Flash::error("Napaka pri brisanju zgodovine.")
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "Failed to read order history");
            Flash::error("Napaka pri brisanju zgodovine.")
        }
    };
    session.redirect_with(flash, "/admin").await
}
