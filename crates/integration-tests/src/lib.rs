//! Integration test harness for Malice.
//!
//! [`TestApp`] drives the full axum router in process with the in-memory
//! order store. The session cookie is carried between requests like a
//! browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p malice-integration-tests
//! ```

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use tower::ServiceExt;

use malice_web::{AppState, ExportMode, MaliceConfig, app};

/// Seeded admin and their PIN.
pub const ADMIN_ID: &str = "emp-1";
pub const ADMIN_PIN: &str = "1234";

/// Seeded regular employee.
pub const USER_ID: &str = "emp-2";

/// A collected response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Target of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.header(header::LOCATION.as_str())
    }

    /// A header value as text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// One browser session against an in-process app.
pub struct TestApp {
    router: Router,
    state: AppState,
    cookie: Option<String>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// App in download export mode.
    #[must_use]
    pub fn new() -> Self {
        Self::with_export_mode(ExportMode::Download)
    }

    /// App with the given export mode and no simulated latency.
    #[must_use]
    pub fn with_export_mode(export_mode: ExportMode) -> Self {
        let config = MaliceConfig {
            export_mode,
            mock_delay: Duration::ZERO,
            ..MaliceConfig::default()
        };
        let state = AppState::in_memory(config);
        Self {
            router: app(state.clone()),
            state,
            cookie: None,
        }
    }

    /// Shared state of the app.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Another browser against the same app, with no cookie yet.
    #[must_use]
    pub fn second_browser(&self) -> Self {
        Self {
            router: self.router.clone(),
            state: self.state.clone(),
            cookie: None,
        }
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty());
        self.send(request.expect("valid request")).await
    }

    /// Send a url-encoded form POST.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn post(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body));
        self.send(request.expect("valid request")).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .expect("ascii cookie")
                .split(';')
                .next()
                .unwrap_or_default();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Log in as a directory employee.
    pub async fn login(&mut self, user_id: &str) -> TestResponse {
        self.post("/login", &[("user_id", user_id)]).await
    }

    /// Log in as the seeded admin and unlock the admin view.
    ///
    /// # Panics
    ///
    /// Panics if the PIN is not accepted.
    pub async fn login_admin(&mut self) {
        self.login(ADMIN_ID).await;
        let response = self.post("/view/admin", &[]).await;
        assert_eq!(response.location(), Some("/pin"));
        let response = self.post("/pin", &[("pin", ADMIN_PIN)]).await;
        assert_eq!(response.location(), Some("/admin"));
    }

    /// Publish a menu as admin and return to the admin view.
    ///
    /// # Panics
    ///
    /// Panics if publication fails.
    pub async fn publish_menu(&mut self, special_1: &str, special_2: &str) {
        let response = self
            .post(
                "/admin/menu",
                &[("special_1", special_1), ("special_2", special_2)],
            )
            .await;
        assert_eq!(response.location(), Some("/"));
    }
}
