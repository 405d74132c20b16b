// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use birthday_tracker::config::Config;
use birthday_tracker::models::User;
use birthday_tracker::routes::create_router;
use birthday_tracker::services::{ensure_default_admin, hash_password, AiClient, Mailer, ReminderScheduler};
use birthday_tracker::store::{BirthdayStore, SettingsStore, UserStore};
use birthday_tracker::AppState;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// A test app over a throwaway data directory. The reminder scheduler is
/// left stopped; tests drive reminder passes directly.
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    _data_dir: TempDir,
}

#[allow(dead_code)]
pub fn create_test_app() -> TestApp {
    let data_dir = TempDir::new().expect("Failed to create temp data dir");
    let config = Config::test_default(data_dir.path().to_path_buf());

    let users = UserStore::open(config.data_dir.join("users.json")).expect("users store");
    let birthdays =
        BirthdayStore::open(config.data_dir.join("birthdays.json")).expect("birthdays store");
    let settings =
        SettingsStore::open(config.data_dir.join("settings.json")).expect("settings store");

    ensure_default_admin(&users, &config).expect("default admin");

    let state = Arc::new(AppState {
        config,
        users,
        birthdays,
        settings,
        mailer: Mailer::default(),
        ai: AiClient::new(),
        scheduler: ReminderScheduler::default(),
    });

    TestApp {
        router: create_router(state.clone()),
        state,
        _data_dir: data_dir,
    }
}

/// Log in through the API and return the bearer token.
#[allow(dead_code)]
pub async fn login(app: &TestApp, username: &str, password: &str) -> Option<String> {
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/token")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(format!(
                    "username={username}&password={password}"
                )))
                .unwrap(),
        )
        .await
        .unwrap();

    if !response.status().is_success() {
        return None;
    }
    let json = body_json(response).await;
    json["access_token"].as_str().map(str::to_string)
}

/// Token for the bootstrap admin.
#[allow(dead_code)]
pub async fn admin_token(app: &TestApp) -> String {
    login(app, "admin", "changeme").await.expect("admin login")
}

/// Create a user directly in the store (bypassing the API).
#[allow(dead_code)]
pub fn create_user_directly(app: &TestApp, username: &str, password: &str, is_admin: bool) {
    app.state
        .users
        .create(User {
            username: username.to_string(),
            hashed_password: hash_password(password).unwrap(),
            disabled: false,
            is_admin,
        })
        .expect("create user");
}

/// Issue an authenticated JSON request against the app.
#[allow(dead_code)]
pub async fn request_json(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.router.clone().oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
