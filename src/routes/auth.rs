// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login and user management routes.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, AuthUser};
use crate::models::{User, UserCreate, UserResponse};
use crate::services::credentials::{authenticate_user, hash_password};
use crate::AppState;

const MIN_PASSWORD_LEN: usize = 6;

/// Routes reachable without a token.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/auth/token", post(login))
}

/// Routes behind the auth middleware (applied in routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/auth/users", get(list_users).post(create_user))
        .route("/api/auth/users/{username}/password", put(change_password))
        .route("/api/auth/users/{username}", delete(delete_user))
}

#[derive(Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Login and get an access token.
async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>> {
    let user = authenticate_user(&state.users, &form.username, &form.password)?
        .ok_or(AppError::Unauthorized)?;
    if user.disabled {
        return Err(AppError::Unauthorized);
    }

    let access_token = create_jwt(&user.username, &state.config.jwt_signing_key)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Get current user information.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let record = state
        .users
        .get_by_username(&user.username)?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.username)))?;
    Ok(Json(UserResponse::from(&record)))
}

/// List all users (admin only).
async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<UserResponse>>> {
    user.require_admin()?;
    let users = state.users.get_all()?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// Create a new user (admin only).
async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<UserCreate>,
) -> Result<Json<UserResponse>> {
    user.require_admin()?;

    if body.username.trim().is_empty() {
        return Err(AppError::BadRequest("username must not be empty".to_string()));
    }
    if body.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let created = state.users.create(User {
        username: body.username,
        hashed_password: hash_password(&body.password)?,
        disabled: false,
        is_admin: body.is_admin,
    })?;

    tracing::info!(username = %created.username, "User created");
    Ok(Json(UserResponse::from(&created)))
}

#[derive(Deserialize)]
pub struct PasswordChange {
    password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Change a user's password (admin only).
async fn change_password(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<PasswordChange>,
) -> Result<Json<MessageResponse>> {
    user.require_admin()?;

    if body.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let mut record = state
        .users
        .get_by_username(&username)?
        .ok_or_else(|| AppError::NotFound(format!("User {username} not found")))?;
    record.hashed_password = hash_password(&body.password)?;
    state.users.update(&username, record)?;

    Ok(Json(MessageResponse {
        message: format!("Password updated for {username}"),
    }))
}

/// Delete a user (admin only). Admins cannot delete their own account.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MessageResponse>> {
    user.require_admin()?;

    if username == user.username {
        return Err(AppError::BadRequest(
            "Cannot delete your own account".to_string(),
        ));
    }

    if !state.users.delete(&username)? {
        return Err(AppError::NotFound(format!("User {username} not found")));
    }

    tracing::info!(username = %username, "User deleted");
    Ok(Json(MessageResponse {
        message: format!("User {username} deleted"),
    }))
}
