// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Birthday CRUD routes. Any authenticated user sees the same shared set.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Birthday, BirthdayCreate, BirthdayUpdate};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/birthdays", get(list_birthdays).post(create_birthday))
        .route(
            "/api/birthdays/{id}",
            get(get_birthday)
                .put(update_birthday)
                .delete(delete_birthday),
        )
}

/// Get all birthdays.
async fn list_birthdays(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Birthday>>> {
    Ok(Json(state.birthdays.get_all()?))
}

/// Get a specific birthday.
async fn get_birthday(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Birthday>> {
    let birthday = state
        .birthdays
        .get_by_id(&id)?
        .ok_or_else(|| AppError::NotFound("Birthday not found".to_string()))?;
    Ok(Json(birthday))
}

/// Create a new birthday.
async fn create_birthday(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BirthdayCreate>,
) -> Result<Json<Birthday>> {
    body.validate().map_err(AppError::BadRequest)?;
    let created = state.birthdays.create(body.into_record())?;
    Ok(Json(created))
}

/// Partially update a birthday: only fields present in the request change.
async fn update_birthday(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<BirthdayUpdate>,
) -> Result<Json<Birthday>> {
    body.validate().map_err(AppError::BadRequest)?;

    let mut record = state
        .birthdays
        .get_by_id(&id)?
        .ok_or_else(|| AppError::NotFound("Birthday not found".to_string()))?;
    body.apply(&mut record);

    let updated = state
        .birthdays
        .update(&id, record)?
        .ok_or_else(|| AppError::NotFound("Birthday not found".to_string()))?;
    Ok(Json(updated))
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Delete a birthday.
async fn delete_birthday(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    if !state.birthdays.delete(&id)? {
        return Err(AppError::NotFound("Birthday not found".to_string()));
    }
    Ok(Json(MessageResponse {
        message: "Birthday deleted".to_string(),
    }))
}
