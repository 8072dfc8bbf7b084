//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness
//! GET  /health/ready                - Readiness (database when configured)
//!
//! # Auth
//! GET  /login                       - Employee list and guest form
//! POST /login                       - Log in as an employee
//! POST /login/guest                 - Log in as a guest
//! POST /logout                      - Logout
//! POST /view/user                   - Switch to the ordering view
//! POST /view/admin                  - Switch to the admin view (may ask for the PIN)
//! GET  /pin                         - PIN prompt
//! POST /pin                         - Check the PIN
//!
//! # Ordering
//! GET  /                            - Menu, order form, today's summary
//! POST /orders                      - Submit an order
//!
//! # Admin
//! GET  /admin                       - Admin panel
//! POST /admin/menu                  - Publish today's menu
//! POST /admin/employees             - Add an employee
//! GET  /admin/employees/{id}/edit   - Employee edit form
//! POST /admin/employees/{id}        - Update an employee
//! POST /admin/employees/{id}/delete - Delete an employee
//! GET  /admin/orders                - Order history
//! POST /admin/orders/clear          - Delete all orders
//! GET  /admin/orders/{id}/edit      - Order edit form
//! POST /admin/orders/{id}           - Update an order
//! POST /admin/orders/{id}/delete    - Delete an order
//! GET  /admin/export/daily          - Today's orders as XML (download mode)
//! GET  /admin/export/monthly        - All orders as CSV (download mode)
//! POST /admin/reports/daily         - Simulated spreadsheet upload (remote mode)
//! POST /admin/reports/monthly       - Simulated monthly email (remote mode)
//! ```

pub mod admin;
pub mod auth;
pub mod employees;
pub mod exports;
pub mod health;
pub mod ordering;
pub mod orders;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::create_session_layer;
use crate::state::AppState;

/// Build the page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/login/guest", post(auth::login_guest))
        .route("/logout", post(auth::logout))
        .route("/view/user", post(auth::show_user_view))
        .route("/view/admin", post(auth::request_admin_view))
        .route("/pin", get(auth::pin_page).post(auth::submit_pin))
        // Ordering
        .route("/", get(ordering::index))
        .route("/orders", post(ordering::submit))
        // Admin
        .route("/admin", get(admin::index))
        .route("/admin/menu", post(admin::publish_menu))
        .route("/admin/employees", post(employees::create))
        .route("/admin/employees/{id}", post(employees::update))
        .route("/admin/employees/{id}/edit", get(employees::edit))
        .route("/admin/employees/{id}/delete", post(employees::delete))
        .route("/admin/orders", get(orders::index))
        .route("/admin/orders/clear", post(orders::clear))
        .route("/admin/orders/{id}", post(orders::update))
        .route("/admin/orders/{id}/edit", get(orders::edit))
        .route("/admin/orders/{id}/delete", post(orders::delete))
        .route("/admin/export/daily", get(exports::daily))
        .route("/admin/export/monthly", get(exports::monthly))
        .route("/admin/reports/daily", post(exports::daily_report))
        .route("/admin/reports/monthly", post(exports::monthly_report))
}

/// Build the full application with sessions, static files and tracing.
///
/// Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        .merge(routes())
        .nest_service("/static", ServeDir::new("crates/web/static"))
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
