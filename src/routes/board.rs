// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard routes: the boundary the chat-command layer calls into.

use crate::error::{AppError, Result};
use crate::format;
use crate::models::window::ParseWindowError;
use crate::models::{LeaderboardOutcome, TimeWindow};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/board/{window}", get(get_board))
}

/// One ranked entry.
#[derive(Serialize)]
pub struct EntryResponse {
    pub rank: usize,
    pub username: String,
    pub minutes: f64,
    pub formatted: String,
}

/// Leaderboard response.
///
/// `message` is set only when nobody has registered an API key, which is
/// a different situation from a board that happens to have no entries.
#[derive(Serialize)]
pub struct BoardResponse {
    pub window: String,
    pub title: String,
    pub entries: Vec<EntryResponse>,
    /// Pre-rendered lines a chat layer can relay verbatim
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Leaderboard for one window, as structured entries plus display lines.
async fn get_board(
    State(state): State<Arc<AppState>>,
    Path(window): Path<String>,
) -> Result<Json<BoardResponse>> {
    let window: TimeWindow = window
        .parse()
        .map_err(|e: ParseWindowError| AppError::BadRequest(e.to_string()))?;

    let title = format!("Top coders ({})", window.label());

    match state.board.request_leaderboard(window).await? {
        LeaderboardOutcome::Board(board) => {
            let entries = board
                .entries
                .iter()
                .enumerate()
                .map(|(i, entry)| EntryResponse {
                    rank: i + 1,
                    username: entry.username.clone(),
                    minutes: entry.minutes,
                    formatted: format::format_duration(entry.minutes),
                })
                .collect();

            Ok(Json(BoardResponse {
                window: window.to_string(),
                title,
                lines: format::format_lines(&board, 1),
                entries,
                message: None,
            }))
        }
        LeaderboardOutcome::NoRegisteredUsers => Ok(Json(BoardResponse {
            window: window.to_string(),
            title,
            entries: Vec::new(),
            lines: Vec::new(),
            message: Some("Nobody has registered a WakaTime API key yet.".to_string()),
        })),
    }
}
