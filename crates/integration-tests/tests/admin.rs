//! Menu publication and employee management.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use malice_core::{EmployeeId, Role};
use malice_integration_tests::{ADMIN_ID, TestApp, USER_ID};

#[tokio::test]
async fn test_publish_requires_both_specials() {
    let mut app = TestApp::new();
    app.login_admin().await;

    let response = app
        .post("/admin/menu", &[("special_1", "Golaž"), ("special_2", "  ")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Prosimo, vnesite obe dnevni malici."));
    assert!(response.body.contains("value=\"Golaž\""));
    assert!(!app.state().menu().read().await.is_published());
}

#[tokio::test]
async fn test_publish_switches_to_ordering_view() {
    let mut app = TestApp::new();
    app.login_admin().await;
    app.publish_menu("Golaž", "Rižota").await;

    let page = app.get("/").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Današnji meni je bil uspešno objavljen!"));
    assert!(page.body.contains("Rižota"));

    let menu = app.state().menu().read().await;
    assert_eq!(menu.meals().len(), 6);
    assert_eq!(menu.meals()[0].id.as_str(), "1");
    assert_eq!(menu.meals()[1].id.as_str(), "2");
}

#[tokio::test]
async fn test_admin_page_prefills_published_specials() {
    let mut app = TestApp::new();
    app.login_admin().await;
    app.publish_menu("Golaž", "Rižota").await;
    app.post("/view/admin", &[]).await;

    let page = app.get("/admin").await;
    assert!(page.body.contains("value=\"Rižota\""));
    assert!(page.body.contains("Ocvrti sir"));
}

#[tokio::test]
async fn test_add_employee() {
    let mut app = TestApp::new();
    app.login_admin().await;

    let response = app
        .post(
            "/admin/employees",
            &[
                ("name", "Tina Mlakar"),
                ("email", "tina@example.com"),
                ("role", "user"),
                ("pin", ""),
            ],
        )
        .await;
    assert_eq!(response.location(), Some("/admin"));

    let page = app.get("/admin").await;
    assert!(page.body.contains("je bil uspešno dodan."));
    assert!(page.body.contains("tina@example.com"));
    assert_eq!(app.state().directory().read().await.len(), 8);

    // New employees can log in right away
    let mut other = app.second_browser();
    let id = app
        .state()
        .directory()
        .read()
        .await
        .all()
        .last()
        .unwrap()
        .id
        .clone();
    assert_eq!(other.login(id.as_str()).await.location(), Some("/"));
}

#[tokio::test]
async fn test_add_admin_requires_pin() {
    let mut app = TestApp::new();
    app.login_admin().await;

    let response = app
        .post(
            "/admin/employees",
            &[
                ("name", "Tina Mlakar"),
                ("email", "tina@example.com"),
                ("role", "admin"),
                ("pin", ""),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Koda PIN je obvezna za administratorje."));
    assert!(response.body.contains("value=\"Tina Mlakar\""));
    assert_eq!(app.state().directory().read().await.len(), 7);
}

#[tokio::test]
async fn test_update_employee_drops_pin_on_demotion() {
    let mut app = TestApp::new();
    app.login_admin().await;

    let response = app
        .post(
            "/admin/employees/emp-7",
            &[
                ("name", "Anja Kos"),
                ("email", "anja.kos@example.com"),
                ("role", "user"),
                ("pin", "8520"),
            ],
        )
        .await;
    assert_eq!(response.location(), Some("/admin"));

    let directory = app.state().directory().read().await;
    let anja = directory.find(&EmployeeId::new("emp-7")).unwrap();
    assert_eq!(anja.name, "Anja Kos");
    assert_eq!(anja.role, Role::User);
    assert!(anja.pin.is_none());
}

#[tokio::test]
async fn test_edit_form_and_validation() {
    let mut app = TestApp::new();
    app.login_admin().await;

    let form = app.get("/admin/employees/emp-3/edit").await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("value=\"eva.kovacic@example.com\""));

    let response = app
        .post(
            "/admin/employees/emp-3",
            &[("name", ""), ("email", "eva@example.com"), ("role", "user")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Ime in e-pošta uporabnika ne smeta biti prazna."));

    let missing = app.get("/admin/employees/emp-404/edit").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_editing_self_refreshes_header() {
    let mut app = TestApp::new();
    app.login_admin().await;

    app.post(
        "/admin/employees/emp-1",
        &[
            ("name", "Ana Novak Kranjc"),
            ("email", "ana.novak@example.com"),
            ("role", "admin"),
            ("pin", "4321"),
        ],
    )
    .await;

    let page = app.get("/admin").await;
    assert!(page.body.contains("Ana Novak Kranjc (vi)"));
}

#[tokio::test]
async fn test_delete_employee() {
    let mut app = TestApp::new();
    app.login_admin().await;

    let response = app.post("/admin/employees/emp-6/delete", &[]).await;
    assert_eq!(response.location(), Some("/admin"));
    assert!(app.get("/admin").await.body.contains("Uporabnik je bil izbrisan."));
    assert_eq!(app.state().directory().read().await.len(), 6);

    let response = app.post(&format!("/admin/employees/{ADMIN_ID}/delete"), &[]).await;
    assert_eq!(response.location(), Some("/admin"));
    let page = app.get("/admin").await;
    assert!(page
        .body
        .contains("Ne morete izbrisati uporabnika, s katerim ste trenutno prijavljeni."));
    assert_eq!(app.state().directory().read().await.len(), 6);
}

#[tokio::test]
async fn test_regular_user_cannot_manage_employees() {
    let mut app = TestApp::new();
    app.login(USER_ID).await;

    let response = app.post("/admin/employees/emp-6/delete", &[]).await;
    assert_eq!(response.location(), Some("/"));
    assert_eq!(app.state().directory().read().await.len(), 7);
}

/// Second browser logged in as Anja (emp-7) with the admin view unlocked.
async fn second_admin(app: &TestApp) -> TestApp {
    let mut other = app.second_browser();
    other.login("emp-7").await;
    other.post("/view/admin", &[]).await;
    let response = other.post("/pin", &[("pin", "8520")]).await;
    assert_eq!(response.location(), Some("/admin"));
    assert_eq!(other.get("/admin").await.status, StatusCode::OK);
    other
}

#[tokio::test]
async fn test_deleted_admin_loses_access_in_other_browser() {
    let mut app = TestApp::new();
    app.login_admin().await;
    let mut anja = second_admin(&app).await;

    let response = app.post("/admin/employees/emp-7/delete", &[]).await;
    assert_eq!(response.location(), Some("/admin"));

    assert_eq!(anja.get("/admin").await.location(), Some("/login"));
    let response = anja
        .post(&format!("/admin/employees/{ADMIN_ID}/delete"), &[])
        .await;
    assert_eq!(response.location(), Some("/login"));
    assert!(
        app.state()
            .directory()
            .read()
            .await
            .find(&EmployeeId::new(ADMIN_ID))
            .is_some()
    );
    assert_eq!(anja.get("/").await.location(), Some("/login"));
}

#[tokio::test]
async fn test_demoted_admin_loses_admin_view_in_other_browser() {
    let mut app = TestApp::new();
    app.login_admin().await;
    let mut anja = second_admin(&app).await;

    let response = app
        .post(
            "/admin/employees/emp-7",
            &[
                ("name", "Anja"),
                ("email", "anja@example.com"),
                ("role", "user"),
                ("pin", ""),
            ],
        )
        .await;
    assert_eq!(response.location(), Some("/admin"));

    assert_eq!(anja.get("/admin").await.location(), Some("/"));
    let response = anja
        .post(&format!("/admin/employees/{ADMIN_ID}/delete"), &[])
        .await;
    assert_eq!(response.location(), Some("/"));
    assert_eq!(app.state().directory().read().await.len(), 7);

    // Still logged in as a regular employee
    assert_eq!(anja.get("/").await.status, StatusCode::OK);
    assert_eq!(anja.post("/view/admin", &[]).await.location(), Some("/"));
}
