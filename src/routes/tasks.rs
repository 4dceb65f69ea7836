// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Task routes for cache refresh.
//!
//! Called by a scheduler or an operator, never by end users. Protected by
//! a shared token header rather than user auth.

use crate::error::{AppError, Result};
use crate::models::window::ParseWindowError;
use crate::models::TimeWindow;
use crate::AppState;
use axum::{
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Header carrying the shared task token.
pub const TASKS_AUTH_HEADER: &str = "x-tasks-auth";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/tasks/refresh-board", post(refresh_board))
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    /// Window to refresh; omitted means every cached window.
    #[serde(default)]
    pub window: Option<String>,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub refreshed: Vec<RefreshedWindow>,
}

#[derive(Serialize)]
pub struct RefreshedWindow {
    pub window: String,
    pub entries: usize,
}

/// Recompute cached leaderboards and overwrite their slots, bypassing the
/// request path entirely.
async fn refresh_board(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    let token_ok = headers
        .get(TASKS_AUTH_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|token| token == state.config.tasks_auth_token)
        .unwrap_or(false);

    if !token_ok {
        tracing::warn!("Blocked unauthorized cache refresh request");
        return Err(AppError::Unauthorized);
    }

    let windows: Vec<TimeWindow> = match &request.window {
        Some(name) => {
            let window: TimeWindow = name
                .parse()
                .map_err(|e: ParseWindowError| AppError::BadRequest(e.to_string()))?;
            if window.ttl().is_none() {
                return Err(AppError::BadRequest(format!(
                    "window {window} is not cached"
                )));
            }
            vec![window]
        }
        None => TimeWindow::CACHED.to_vec(),
    };

    let mut refreshed = Vec::with_capacity(windows.len());
    for window in windows {
        let entries = state.board.refresh_window(window).await?;
        refreshed.push(RefreshedWindow {
            window: window.to_string(),
            entries,
        });
    }

    Ok(Json(RefreshResponse { refreshed }))
}
