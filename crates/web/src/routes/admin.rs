//! Admin panel: menu publication, summary, exports and employee list.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use malice_core::{DailySummary, Meal, menu::permanent_meals, order::orders_on};

use crate::config::ExportMode;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, UserSession};
use crate::models::Flash;
use crate::state::{AppState, today};

use super::employees::EmployeeFormView;
use super::views::{HeaderView, SummaryView};

/// Menu publication form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuForm {
    #[serde(default)]
    pub special_1: String,
    #[serde(default)]
    pub special_2: String,
}

/// Employee row on the admin page.
#[derive(Debug, Clone)]
pub struct EmployeeRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role_label: &'static str,
    pub is_self: bool,
}

/// Admin page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/index.html")]
pub struct AdminTemplate {
    pub header: Option<HeaderView>,
    pub flash: Option<Flash>,
    pub published: bool,
    pub menu: MenuForm,
    pub permanent: Vec<Meal>,
    pub today: String,
    pub summary: SummaryView,
    pub history_count: usize,
    pub today_count: usize,
    pub remote_exports: bool,
    pub report_recipient: String,
    pub employees: Vec<EmployeeRow>,
    /// New-employee form.
    pub form: EmployeeFormView,
}

/// Form values to echo back after a failed submission.
#[derive(Debug, Default)]
pub struct AdminForms {
    pub menu: Option<MenuForm>,
    pub employee: EmployeeFormView,
}

/// Build the admin page for `session`.
///
/// Without a menu form the inputs show the currently published specials.
pub async fn render_admin(
    state: &AppState,
    session: &UserSession,
    flash: Option<Flash>,
    forms: AdminForms,
) -> Result<AdminTemplate, AppError> {
    let today = today();
    let orders = state.orders().list_submitted().await?;
    let summary = DailySummary::for_day(&orders, today);

    let (published, menu) = {
        let board = state.menu().read().await;
        let menu = forms.menu.unwrap_or_else(|| match board.meals() {
            [first, second, ..] => MenuForm {
                special_1: first.name.clone(),
                special_2: second.name.clone(),
            },
            _ => MenuForm::default(),
        });
        (board.is_published(), menu)
    };

    let acting = session.state.employee_id();
    let employees = state
        .directory()
        .read()
        .await
        .all()
        .iter()
        .map(|e| EmployeeRow {
            id: e.id.to_string(),
            name: e.name.clone(),
            email: e.email.to_string(),
            role_label: if e.role.is_admin() {
                "Administrator"
            } else {
                "Uporabnik"
            },
            is_self: acting == Some(&e.id),
        })
        .collect();

    Ok(AdminTemplate {
        header: HeaderView::from_state(&session.state),
        flash,
        published,
        menu,
        permanent: permanent_meals(),
        today: today.to_string(),
        summary: SummaryView::from(&summary),
        history_count: orders.len(),
        today_count: orders_on(&orders, today).len(),
        remote_exports: state.config().export_mode == ExportMode::Remote,
        report_recipient: state.reports().recipient().to_string(),
        employees,
        form: forms.employee,
    })
}

/// Display the admin page.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
) -> Result<Response, AppError> {
    let flash = session.take_flash().await?;
    let page = render_admin(&state, &session, flash, AdminForms::default()).await?;
    Ok(page.into_response())
}

/// Publish today's menu and switch back to the ordering view.
#[instrument(skip_all)]
pub async fn publish_menu(
    State(state): State<AppState>,
    RequireAdmin(mut session): RequireAdmin,
    Form(form): Form<MenuForm>,
) -> Result<Response, AppError> {
    let published = state
        .menu()
        .write()
        .await
        .publish(&form.special_1, &form.special_2)
        .map(<[Meal]>::len);

    match published {
        Ok(meals) => {
            tracing::info!(meals, "Menu published");
            session.state.show_user_view();
            session
                .redirect_with(Flash::success("Današnji meni je bil uspešno objavljen!"), "/")
                .await
        }
        Err(e) => {
            let forms = AdminForms {
                menu: Some(form),
                ..AdminForms::default()
            };
            let page = render_admin(&state, &session, Some(Flash::error(e.to_string())), forms)
                .await?;
            Ok(page.into_response())
        }
    }
}
