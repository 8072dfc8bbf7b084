//! Editing and deleting a single order.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use malice_core::{Meal, Order, OrderEdit, OrderId, menu::permanent_meals};

use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, UserSession};
use crate::models::Flash;
use crate::routes::views::HeaderView;
use crate::state::AppState;

/// Order edit form data.
#[derive(Debug, Default, Deserialize)]
pub struct OrderEditForm {
    #[serde(default)]
    pub meal: String,
    pub has_soup: Option<String>,
    pub note: Option<String>,
}

impl From<OrderEditForm> for OrderEdit {
    fn from(form: OrderEditForm) -> Self {
        Self {
            meal: form.meal,
            has_soup: form.has_soup.is_some(),
            note: form.note,
        }
    }
}

/// A meal in the edit dropdown.
#[derive(Debug, Clone)]
pub struct MealOption {
    pub name: String,
    pub selected: bool,
}

/// Order edit page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/order_edit.html")]
pub struct OrderEditTemplate {
    pub header: Option<HeaderView>,
    pub flash: Option<Flash>,
    pub order_id: String,
    pub date: String,
    pub user: String,
    pub meal_choices: Vec<MealOption>,
    pub has_soup: bool,
    pub note: String,
}

/// Meal names offered when editing an order placed for `current`.
///
/// The published menu (or the permanent meals before publication), with
/// `current` appended when it is no longer on offer.
fn meal_options(menu: &[Meal], current: &str) -> Vec<MealOption> {
    let mut names: Vec<String> = if menu.is_empty() {
        permanent_meals().into_iter().map(|m| m.name).collect()
    } else {
        menu.iter().map(|m| m.name.clone()).collect()
    };
    if !current.is_empty() && !names.iter().any(|n| n == current) {
        names.push(current.to_string());
    }
    names
        .into_iter()
        .map(|name| MealOption {
            selected: name == current,
            name,
        })
        .collect()
}

async fn find_order(state: &AppState, id: &OrderId) -> Result<Order, AppError> {
    state
        .orders()
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}

async fn render_edit(
    state: &AppState,
    session: &UserSession,
    flash: Option<Flash>,
    id: &OrderId,
    order: &Order,
) -> OrderEditTemplate {
    let meal_choices = meal_options(state.menu().read().await.meals(), &order.meal);
    OrderEditTemplate {
        header: HeaderView::from_state(&session.state),
        flash,
        order_id: id.to_string(),
        date: order.date.to_string(),
        user: order.user.clone(),
        meal_choices,
        has_soup: order.has_soup,
        note: order.note.clone().unwrap_or_default(),
    }
}

/// Display the edit form of one order.
#[instrument(skip_all, fields(order_id = %id))]
pub async fn edit(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = OrderId::new(id);
    let order = find_order(&state, &id).await?;
    let flash = session.take_flash().await?;
    Ok(render_edit(&state, &session, flash, &id, &order)
        .await
        .into_response())
}

/// Replace meal, soup and note of one order.
#[instrument(skip_all, fields(order_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Path(id): Path<String>,
    Form(form): Form<OrderEditForm>,
) -> Result<Response, AppError> {
    let id = OrderId::new(id);
    let order = find_order(&state, &id).await?;
    let edit = OrderEdit::from(form);

    let updated = match order.edited(edit.clone()) {
        Ok(updated) => updated,
        Err(e) => {
            // Echo the submitted values back into the form
            let submitted = Order {
                meal: edit.meal,
                has_soup: edit.has_soup,
                note: edit.note,
                ..order
            };
            let flash = Some(Flash::error(e.to_string()));
            return Ok(render_edit(&state, &session, flash, &id, &submitted)
                .await
                .into_response());
        }
    };

    state.orders().update(updated).await?;
    tracing::info!("Order updated");
    session
        .redirect_with(Flash::success("Naročilo je bilo posodobljeno."), "/admin/orders")
        .await
}

/// Remove one order from the history.
#[instrument(skip_all, fields(order_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = OrderId::new(id);
    state.orders().delete(&id).await?;
    tracing::info!("Order deleted");
    session
        .redirect_with(Flash::success("Naročilo je bilo izbrisano."), "/admin/orders")
        .await
}
