//! Session extractors.
//!
//! [`UserSession`] loads the [`SessionState`] of the current browser
//! session; [`RequireUser`] and [`RequireAdmin`] additionally gate the route.
//! Both re-read the employee directory, so a removed employee is logged out
//! and a demoted admin loses the admin view on their next request.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn protected_handler(RequireAdmin(session): RequireAdmin) -> impl IntoResponse {
//!     let name = session.state.current().map(|u| u.name.clone());
//!     format!("Hello, {name:?}!")
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use malice_core::SessionState;

use crate::error::AppError;
use crate::models::{Flash, session_keys};
use crate::state::AppState;

/// The browser session together with its decoded [`SessionState`].
///
/// Handlers mutate `state` and call [`UserSession::save`] to persist it.
pub struct UserSession {
    pub session: Session,
    pub state: SessionState,
}

impl UserSession {
    /// Load the state stored in `session` (default state if none).
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn load(session: Session) -> Result<Self, tower_sessions::session::Error> {
        let state = session
            .get::<SessionState>(session_keys::SESSION_STATE)
            .await?
            .unwrap_or_default();
        Ok(Self { session, state })
    }

    /// Write the state back into the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn save(&self) -> Result<(), AppError> {
        self.session
            .insert(session_keys::SESSION_STATE, &self.state)
            .await?;
        Ok(())
    }

    /// Queue a banner for the next rendered page.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn flash(&self, flash: Flash) -> Result<(), AppError> {
        self.session.insert(session_keys::FLASH, flash).await?;
        Ok(())
    }

    /// Take the pending banner, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn take_flash(&self) -> Result<Option<Flash>, AppError> {
        Ok(self.session.remove::<Flash>(session_keys::FLASH).await?)
    }

    /// Save the state, queue `flash` and redirect to `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn redirect_with(&self, flash: Flash, to: &str) -> Result<Response, AppError> {
        self.save().await?;
        self.flash(flash).await?;
        Ok(Redirect::to(to).into_response())
    }
}

/// Error returned when the session cannot be loaded or the route is gated.
#[derive(Debug)]
pub enum SessionRejection {
    /// Session layer missing or store failure.
    Unavailable,
    /// Not logged in.
    RedirectToLogin,
    /// Logged in but the admin view is not active.
    RedirectToOrdering,
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unavailable => {
                tracing::error!("Session unavailable");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::RedirectToOrdering => Redirect::to("/").into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for UserSession
where
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(SessionRejection::Unavailable)?;

        Self::load(session).await.map_err(|e| {
            tracing::error!("Failed to load session: {e}");
            SessionRejection::Unavailable
        })
    }
}

/// Extractor that requires a logged-in employee or guest.
///
/// Redirects to the login page otherwise.
pub struct RequireUser(pub UserSession);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = SessionRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let mut session = UserSession::from_request_parts(parts, state).await?;

        let changed = session
            .state
            .sync_with_directory(&*state.directory().read().await);
        if changed {
            tracing::info!(
                logged_in = session.state.current().is_some(),
                "Session identity changed in the directory"
            );
            session.save().await.map_err(|e| {
                tracing::error!("Failed to save session: {e}");
                SessionRejection::Unavailable
            })?;
        }

        if session.state.current().is_none() {
            return Err(SessionRejection::RedirectToLogin);
        }
        Ok(Self(session))
    }
}

/// Extractor that requires an admin with the admin view active.
///
/// Redirects anonymous sessions to the login page and everyone else to the
/// ordering page.
pub struct RequireAdmin(pub UserSession);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = SessionRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireUser(session) = RequireUser::from_request_parts(parts, state).await?;
        if !session.state.shows_admin_view() {
            return Err(SessionRejection::RedirectToOrdering);
        }
        Ok(Self(session))
    }
}
