//! Login, logout, view switching and the admin PIN prompt.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use malice_core::{AdminAccess, EmployeeId};

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{RequireUser, UserSession};
use crate::models::Flash;
use crate::state::AppState;

use super::views::HeaderView;

// =============================================================================
// Form Types
// =============================================================================

/// Employee login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub user_id: String,
}

/// Guest login form data.
#[derive(Debug, Deserialize)]
pub struct GuestForm {
    #[serde(default)]
    pub name: String,
}

/// PIN form data.
#[derive(Deserialize)]
pub struct PinForm {
    #[serde(default)]
    pub pin: String,
}

impl std::fmt::Debug for PinForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinForm").field("pin", &"[REDACTED]").finish()
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Employee choice on the login page.
#[derive(Debug, Clone)]
pub struct EmployeeOption {
    pub id: String,
    pub name: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub header: Option<HeaderView>,
    pub flash: Option<Flash>,
    pub employees: Vec<EmployeeOption>,
    pub guest_name: String,
}

/// PIN prompt template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/pin.html")]
pub struct PinTemplate {
    pub header: Option<HeaderView>,
    pub flash: Option<Flash>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
#[instrument(skip_all)]
pub async fn login_page(
    State(state): State<AppState>,
    session: UserSession,
) -> Result<Response, AppError> {
    if session.state.current().is_some() {
        return Ok(Redirect::to("/").into_response());
    }
    let flash = session.take_flash().await?;
    Ok(render_login(&state, flash, String::new()).await.into_response())
}

async fn render_login(state: &AppState, flash: Option<Flash>, guest_name: String) -> LoginTemplate {
    let employees = state
        .directory()
        .read()
        .await
        .all()
        .iter()
        .map(|e| EmployeeOption {
            id: e.id.to_string(),
            name: e.name.clone(),
        })
        .collect();

    LoginTemplate {
        header: None,
        flash,
        employees,
        guest_name,
    }
}

/// Log in as an employee from the directory.
#[instrument(skip_all, fields(user_id = %form.user_id))]
pub async fn login(
    State(state): State<AppState>,
    mut session: UserSession,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let directory = state.directory().read().await;
    match session
        .state
        .login(&directory, &EmployeeId::new(form.user_id.trim()))
    {
        Ok(user) => {
            set_sentry_user(user.id.as_ref().map(EmployeeId::as_str), &user.name);
            tracing::info!(name = %user.name, role = %user.role, "Employee logged in");
            session.save().await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            tracing::debug!("Login rejected: {e}");
            session.redirect_with(Flash::error(e.to_string()), "/login").await
        }
    }
}

/// Log in as a guest with a free-text name.
#[instrument(skip_all)]
pub async fn login_guest(
    State(state): State<AppState>,
    mut session: UserSession,
    Form(form): Form<GuestForm>,
) -> Result<Response, AppError> {
    match session.state.login_guest(&form.name) {
        Ok(user) => {
            set_sentry_user(None, &user.name);
            tracing::info!(name = %user.name, "Guest logged in");
            session.save().await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => Ok(render_login(&state, Some(Flash::error(e.to_string())), form.name)
            .await
            .into_response()),
    }
}

/// Log out and forget the admin flag.
#[instrument(skip_all)]
pub async fn logout(mut session: UserSession) -> Result<Redirect, AppError> {
    session.state.logout();
    session.save().await?;
    clear_sentry_user();
    Ok(Redirect::to("/login"))
}

// =============================================================================
// View Switching
// =============================================================================

/// Switch to the ordering view.
#[instrument(skip_all)]
pub async fn show_user_view(RequireUser(mut session): RequireUser) -> Result<Redirect, AppError> {
    session.state.show_user_view();
    session.save().await?;
    Ok(Redirect::to("/"))
}

/// Ask for the admin view; opens the PIN prompt when needed.
#[instrument(skip_all)]
pub async fn request_admin_view(
    RequireUser(mut session): RequireUser,
) -> Result<Redirect, AppError> {
    let target = match session.state.request_admin_view() {
        AdminAccess::Granted => "/admin",
        AdminAccess::PinRequired => "/pin",
        AdminAccess::Denied => "/",
    };
    session.save().await?;
    Ok(Redirect::to(target))
}

// =============================================================================
// PIN Routes
// =============================================================================

/// Display the PIN prompt.
#[instrument(skip_all)]
pub async fn pin_page(RequireUser(mut session): RequireUser) -> Result<Response, AppError> {
    let is_admin = session
        .state
        .current()
        .is_some_and(|user| user.role.is_admin());
    if !is_admin {
        return Ok(Redirect::to("/").into_response());
    }
    if session.state.request_admin_view() == AdminAccess::Granted {
        session.save().await?;
        return Ok(Redirect::to("/admin").into_response());
    }

    let flash = session.take_flash().await?;
    Ok(PinTemplate {
        header: HeaderView::from_state(&session.state),
        flash,
    }
    .into_response())
}

/// Check the entered PIN and open the admin view.
#[instrument(skip_all)]
pub async fn submit_pin(
    State(state): State<AppState>,
    RequireUser(mut session): RequireUser,
    Form(form): Form<PinForm>,
) -> Result<Response, AppError> {
    let directory = state.directory().read().await;
    match session.state.submit_pin(&directory, &form.pin) {
        Ok(()) => {
            tracing::info!("Admin view unlocked");
            session.save().await?;
            Ok(Redirect::to("/admin").into_response())
        }
        Err(e) => {
            tracing::warn!("Rejected admin PIN");
            session.redirect_with(Flash::error(e.to_string()), "/pin").await
        }
    }
}
