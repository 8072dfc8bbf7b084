//! Ordering page: today's menu, the order form and the daily summary.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use malice_core::{DailySummary, MealId, OrderDraft};

use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireUser, UserSession};
use crate::models::Flash;
use crate::state::{AppState, today};

use super::views::{HeaderView, SummaryView};

/// Order form data.
///
/// Unchecked checkboxes and unselected radios are absent from the body.
#[derive(Debug, Default, Deserialize)]
pub struct OrderForm {
    pub meal_id: Option<String>,
    pub has_soup: Option<String>,
    pub note: Option<String>,
}

impl OrderForm {
    fn has_soup(&self) -> bool {
        self.has_soup.is_some()
    }
}

/// A menu entry on the order form.
#[derive(Debug, Clone)]
pub struct MealChoice {
    pub id: String,
    pub name: String,
    pub special: bool,
    pub checked: bool,
}

/// Values echoed back into the order form.
#[derive(Debug, Clone, Default)]
pub struct OrderFormView {
    pub has_soup: bool,
    pub note: String,
}

/// Ordering page template.
#[derive(Template, WebTemplate)]
#[template(path = "ordering/index.html")]
pub struct OrderingTemplate {
    pub header: Option<HeaderView>,
    pub flash: Option<Flash>,
    pub published: bool,
    pub meals: Vec<MealChoice>,
    pub form: OrderFormView,
    pub today: String,
    pub summary: SummaryView,
}

/// Display the ordering page.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireUser(session): RequireUser,
) -> Result<Response, AppError> {
    if session.state.shows_admin_view() {
        return Ok(Redirect::to("/admin").into_response());
    }
    let flash = session.take_flash().await?;
    let page = render(&state, &session, flash, &OrderForm::default()).await?;
    Ok(page.into_response())
}

async fn render(
    state: &AppState,
    session: &UserSession,
    flash: Option<Flash>,
    form: &OrderForm,
) -> Result<OrderingTemplate, AppError> {
    let today = today();
    let orders = state.orders().list_submitted().await?;
    let summary = DailySummary::for_day(&orders, today);

    let menu = state.menu().read().await;
    let meals = menu
        .meals()
        .iter()
        .map(|meal| MealChoice {
            id: meal.id.to_string(),
            name: meal.name.clone(),
            special: is_daily_special(&meal.id),
            checked: form.meal_id.as_deref() == Some(meal.id.as_str()),
        })
        .collect();

    Ok(OrderingTemplate {
        header: HeaderView::from_state(&session.state),
        flash,
        published: menu.is_published(),
        meals,
        form: OrderFormView {
            has_soup: form.has_soup(),
            note: form.note.clone().unwrap_or_default(),
        },
        today: today.to_string(),
        summary: SummaryView::from(&summary),
    })
}

fn is_daily_special(id: &MealId) -> bool {
    malice_core::menu::DAILY_SPECIAL_IDS.contains(&id.as_str())
}

/// Submit an order for the logged-in identity.
#[instrument(skip_all, fields(meal_id = ?form.meal_id))]
pub async fn submit(
    State(state): State<AppState>,
    RequireUser(session): RequireUser,
    Form(form): Form<OrderForm>,
) -> Result<Response, AppError> {
    let user = session
        .state
        .current()
        .map(|u| u.name.clone())
        .unwrap_or_default();
    let draft = OrderDraft {
        user,
        meal_id: form.meal_id.as_deref().map(MealId::new),
        has_soup: form.has_soup(),
        note: form.note.clone(),
    };

    let submitted = {
        let menu = state.menu().read().await;
        draft.submit(&menu, today())
    };
    let order = match submitted {
        Ok(order) => order,
        Err(e) => {
            let page = render(&state, &session, Some(Flash::error(e.to_string())), &form).await?;
            return Ok(page.into_response());
        }
    };

    let meal = order.meal.clone();
    if let Err(e) = state.orders().append(order).await {
        tracing::error!(error = %e, "Failed to store order");
        let flash = Flash::error("Napaka pri oddaji naročila. Poskusite znova.");
        let page = render(&state, &session, Some(flash), &form).await?;
        return Ok(page.into_response());
    }

    tracing::info!(meal = %meal, "Order submitted");
    session
        .redirect_with(
            Flash::success("Vaše naročilo je bilo uspešno oddano. Dober tek!"),
            "/",
        )
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_special_ids() {
        assert!(is_daily_special(&MealId::new("1")));
        assert!(is_daily_special(&MealId::new("2")));
        assert!(!is_daily_special(&MealId::new("3")));
    }

    #[test]
    fn test_soup_checkbox_presence() {
        let form = OrderForm {
            has_soup: Some("on".to_string()),
            ..OrderForm::default()
        };
        assert!(form.has_soup());
        assert!(!OrderForm::default().has_soup());
    }
}
