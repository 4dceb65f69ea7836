// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registry write endpoints backing the registration flow.

use crate::error::{AppError, Result};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", post(upsert_contact))
        .route("/users/{telegram_id}/key", put(set_api_key))
}

#[derive(Deserialize)]
pub struct ContactRequest {
    pub telegram_id: i64,
    pub username: String,
}

/// Save or update a user's username.
async fn upsert_contact(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ContactRequest>,
) -> Result<StatusCode> {
    let username = request.username.trim();
    if username.is_empty() {
        return Err(AppError::BadRequest("username must not be empty".to_string()));
    }

    state
        .registry
        .upsert_contact(request.telegram_id, username)
        .await?;

    tracing::info!(telegram_id = request.telegram_id, "Contact saved");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct ApiKeyRequest {
    pub api_key: String,
}

/// Save or update a user's WakaTime API key.
async fn set_api_key(
    State(state): State<Arc<AppState>>,
    Path(telegram_id): Path<i64>,
    Json(request): Json<ApiKeyRequest>,
) -> Result<StatusCode> {
    let api_key = request.api_key.trim();
    if api_key.is_empty() {
        return Err(AppError::BadRequest("api_key must not be empty".to_string()));
    }

    state.registry.set_api_key(telegram_id, api_key).await?;

    tracing::info!(telegram_id, "WakaTime API key saved");
    Ok(StatusCode::NO_CONTENT)
}
