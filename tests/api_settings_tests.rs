// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Settings API tests: admin gating, wholesale overwrite, and the
//! precondition checks on the manual test-email triggers.

use axum::http::StatusCode;

mod common;
use common::{admin_token, body_json, create_test_app, create_user_directly, login, request_json};

#[tokio::test]
async fn settings_require_admin() {
    let app = create_test_app();
    create_user_directly(&app, "bob", "secret123", false);
    let bob = login(&app, "bob", "secret123").await.unwrap();

    let response = request_json(&app, "GET", "/api/settings/email", Some(&bob), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = request_json(
        &app,
        "PUT",
        "/api/settings/email",
        Some(&bob),
        Some(serde_json::json!({"enabled": false})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = request_json(&app, "POST", "/api/settings/email/test", Some(&bob), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn settings_default_to_disabled() {
    let app = create_test_app();
    let token = admin_token(&app).await;

    let response = request_json(&app, "GET", "/api/settings/email", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["enabled"], false);
    assert_eq!(json["smtp_port"], 587);
    assert_eq!(json["reminder_time"], "09:00");
}

#[tokio::test]
async fn update_overwrites_wholesale_and_reads_back() {
    let app = create_test_app();
    let token = admin_token(&app).await;

    let response = request_json(
        &app,
        "PUT",
        "/api/settings/email",
        Some(&token),
        Some(serde_json::json!({
            "enabled": true,
            "smtp_server": "smtp.example.com",
            "smtp_port": 587,
            "smtp_username": "user@example.com",
            "smtp_password": "pass",
            "from_email": "from@example.com",
            "recipients": ["a@example.com"],
            "reminder_time": "07:30",
            "test_mode": true
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = request_json(&app, "GET", "/api/settings/email", Some(&token), None).await;
    let json = body_json(response).await;
    assert_eq!(json["enabled"], true);
    assert_eq!(json["reminder_time"], "07:30");
    assert_eq!(json["recipients"][0], "a@example.com");

    // Fields omitted from a later update fall back to their defaults:
    // the record is overwritten wholesale, not merged.
    let response = request_json(
        &app,
        "PUT",
        "/api/settings/email",
        Some(&token),
        Some(serde_json::json!({"enabled": false})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = request_json(&app, "GET", "/api/settings/email", Some(&token), None).await;
    let json = body_json(response).await;
    assert_eq!(json["enabled"], false);
    assert_eq!(json["reminder_time"], "09:00");
    assert!(json["recipients"].as_array().unwrap().is_empty());

    // Scheduler was restarted by the updates and stays stoppable.
    app.state.scheduler.stop();
}

#[tokio::test]
async fn test_email_requires_enabled_notifications() {
    let app = create_test_app();
    let token = admin_token(&app).await;

    let response = request_json(&app, "POST", "/api/settings/email/test", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_email_requires_recipients() {
    let app = create_test_app();
    let token = admin_token(&app).await;

    let response = request_json(
        &app,
        "PUT",
        "/api/settings/email",
        Some(&token),
        Some(serde_json::json!({"enabled": true, "recipients": []})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    app.state.scheduler.stop();

    let response = request_json(&app, "POST", "/api/settings/email/test", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ai_test_email_requires_ai_configuration() {
    let app = create_test_app();
    let token = admin_token(&app).await;

    let response = request_json(
        &app,
        "PUT",
        "/api/settings/email",
        Some(&token),
        Some(serde_json::json!({
            "enabled": true,
            "recipients": ["a@example.com"],
            "ai_enabled": false
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    app.state.scheduler.stop();

    let response =
        request_json(&app, "POST", "/api/settings/email/test-ai", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ai_test_email_requires_a_dated_birthday() {
    let app = create_test_app();
    let token = admin_token(&app).await;

    let response = request_json(
        &app,
        "PUT",
        "/api/settings/email",
        Some(&token),
        Some(serde_json::json!({
            "enabled": true,
            "recipients": ["a@example.com"],
            "ai_enabled": true,
            "openai_api_key": "sk-test"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    app.state.scheduler.stop();

    // No birthdays at all -> nothing to preview.
    let response =
        request_json(&app, "POST", "/api/settings/email/test-ai", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
