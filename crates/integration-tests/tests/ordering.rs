//! Order submission and the daily summary.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use malice_integration_tests::{TestApp, USER_ID};

#[tokio::test]
async fn test_order_before_publication_is_rejected() {
    let mut app = TestApp::new();
    app.login(USER_ID).await;

    let response = app.post("/orders", &[("meal_id", "3")]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Današnji meni še ni objavljen."));
    assert!(app.state().orders().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_order_and_summary() {
    let mut admin = TestApp::new();
    admin.login_admin().await;
    admin.publish_menu("Golaž s polento", "Zelenjavna rižota").await;

    let mut user = admin.second_browser();
    user.login(USER_ID).await;
    let page = user.get("/").await;
    assert!(page.body.contains("Golaž s polento"));
    assert!(page.body.contains("Kebab Krožnik"));

    let response = user
        .post(
            "/orders",
            &[("meal_id", "1"), ("has_soup", "on"), ("note", "  brez čebule ")],
        )
        .await;
    assert_eq!(response.location(), Some("/"));

    let page = user.get("/").await;
    assert!(page.body.contains("Vaše naročilo je bilo uspešno oddano. Dober tek!"));
    assert!(page.body.contains("Luka Horvat"));
    assert!(page.body.contains("100 %"));

    let orders = user.state().orders().list().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].meal, "Golaž s polento");
    assert_eq!(orders[0].user, "Luka Horvat");
    assert!(orders[0].has_soup);
    assert_eq!(orders[0].note.as_deref(), Some("brez čebule"));
    assert!(orders[0].id.is_some());
}

#[tokio::test]
async fn test_missing_meal_keeps_form_values() {
    let mut admin = TestApp::new();
    admin.login_admin().await;
    admin.publish_menu("Golaž", "Rižota").await;

    let mut user = admin.second_browser();
    user.login(USER_ID).await;
    let response = user
        .post("/orders", &[("has_soup", "on"), ("note", "ostanek")])
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Prosimo, izberite malico."));
    assert!(response.body.contains(">ostanek</textarea>"));
    assert!(response.body.contains("value=\"on\" checked"));
    assert!(user.state().orders().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_meal_is_rejected() {
    let mut admin = TestApp::new();
    admin.login_admin().await;
    admin.publish_menu("Golaž", "Rižota").await;

    let mut user = admin.second_browser();
    user.login(USER_ID).await;
    let response = user.post("/orders", &[("meal_id", "99")]).await;

    assert!(response.body.contains("Izbrana malica ni na današnjem meniju."));
    assert!(user.state().orders().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_guest_orders_under_entered_name() {
    let mut admin = TestApp::new();
    admin.login_admin().await;
    admin.publish_menu("Golaž", "Rižota").await;

    let mut guest = admin.second_browser();
    guest.post("/login/guest", &[("name", "Petra Gost")]).await;
    guest.post("/orders", &[("meal_id", "6")]).await;

    let orders = guest.state().orders().list().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].user, "Petra Gost");
    assert_eq!(orders[0].meal, "Solata s piščancem");
}
