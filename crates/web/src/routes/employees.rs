//! Employee management on the admin panel.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use malice_core::{Employee, EmployeeError, EmployeeId, EmployeeInput, Role};

use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, UserSession};
use crate::models::Flash;
use crate::state::AppState;

use super::admin::{AdminForms, render_admin};
use super::views::HeaderView;

/// Values shown in the employee form.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFormView {
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub pin: String,
}

impl From<&EmployeeInput> for EmployeeFormView {
    fn from(input: &EmployeeInput) -> Self {
        Self {
            name: input.name.clone(),
            email: input.email.clone(),
            is_admin: input.role.is_admin(),
            pin: input.pin.clone().unwrap_or_default(),
        }
    }
}

impl From<&Employee> for EmployeeFormView {
    fn from(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            email: employee.email.to_string(),
            is_admin: employee.role == Role::Admin,
            pin: employee
                .pin
                .as_ref()
                .map(|p| p.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Employee edit page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/employee_edit.html")]
pub struct EmployeeEditTemplate {
    pub header: Option<HeaderView>,
    pub flash: Option<Flash>,
    pub employee_id: String,
    pub form: EmployeeFormView,
}

fn not_found(id: &EmployeeId) -> AppError {
    AppError::NotFound(format!("employee {id}"))
}

/// Add an employee to the directory.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Form(input): Form<EmployeeInput>,
) -> Result<Response, AppError> {
    let added = state.directory().write().await.add(&input);
    match added {
        Ok(employee) => {
            tracing::info!(employee_id = %employee.id, role = %employee.role, "Employee added");
            let message = format!("Uporabnik \"{}\" je bil uspešno dodan.", employee.name);
            session.redirect_with(Flash::success(message), "/admin").await
        }
        Err(e) => {
            let forms = AdminForms {
                employee: EmployeeFormView::from(&input),
                ..AdminForms::default()
            };
            let page = render_admin(&state, &session, Some(Flash::error(e.to_string())), forms)
                .await?;
            Ok(page.into_response())
        }
    }
}

/// Display the edit form of one employee.
#[instrument(skip_all, fields(employee_id = %id))]
pub async fn edit(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = EmployeeId::new(id);
    let form = state
        .directory()
        .read()
        .await
        .find(&id)
        .map(EmployeeFormView::from)
        .ok_or_else(|| not_found(&id))?;

    let flash = session.take_flash().await?;
    Ok(render_edit(&session, flash, &id, form).into_response())
}

fn render_edit(
    session: &UserSession,
    flash: Option<Flash>,
    id: &EmployeeId,
    form: EmployeeFormView,
) -> EmployeeEditTemplate {
    EmployeeEditTemplate {
        header: HeaderView::from_state(&session.state),
        flash,
        employee_id: id.to_string(),
        form,
    }
}

/// Save the edit form of one employee.
#[instrument(skip_all, fields(employee_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(mut session): RequireAdmin,
    Path(id): Path<String>,
    Form(input): Form<EmployeeInput>,
) -> Result<Response, AppError> {
    let id = EmployeeId::new(id);
    let updated = state.directory().write().await.update(&id, &input);
    match updated {
        Ok(employee) => {
            tracing::info!(role = %employee.role, "Employee updated");
            session.state.refresh_identity(&employee);
            session
                .redirect_with(
                    Flash::success("Podatki o uporabniku so bili posodobljeni."),
                    "/admin",
                )
                .await
        }
        Err(EmployeeError::NotFound(_)) => Err(not_found(&id)),
        Err(e) => {
            let flash = Flash::error(e.to_string());
            Ok(render_edit(&session, Some(flash), &id, EmployeeFormView::from(&input)).into_response())
        }
    }
}

/// Remove an employee; the logged-in admin cannot remove themselves.
#[instrument(skip_all, fields(employee_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = EmployeeId::new(id);
    let deleted = state
        .directory()
        .write()
        .await
        .delete(&id, session.state.employee_id());
    let flash = match deleted {
        Ok(employee) => {
            tracing::info!(name = %employee.name, "Employee deleted");
            Flash::success("Uporabnik je bil izbrisan.")
        }
        Err(EmployeeError::NotFound(_)) => return Err(not_found(&id)),
        Err(e) => {
            tracing::warn!("Employee delete rejected: {e}");
            Flash::error(e.to_string())
        }
    };
    session.redirect_with(flash, "/admin").await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use malice_core::EmployeeDirectory;

    use super::*;

    #[test]
    fn test_form_view_from_admin_record() {
        let dir = EmployeeDirectory::seeded();
        let admin = dir.find(&EmployeeId::new("emp-1")).unwrap();
        let view = EmployeeFormView::from(admin);

        assert_eq!(view.name, "Ana Novak");
        assert!(view.is_admin);
        assert_eq!(view.pin.len(), 4);
    }

    #[test]
    fn test_form_view_keeps_submitted_values() {
        let input = EmployeeInput {
            name: "Nina".to_string(),
            email: "not-an-email".to_string(),
            role: Role::User,
            pin: None,
        };
        let view = EmployeeFormView::from(&input);
        assert_eq!(view.email, "not-an-email");
        assert!(!view.is_admin);
        assert!(view.pin.is_empty());
    }
}
