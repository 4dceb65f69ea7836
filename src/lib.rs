// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Wakaboard: coding-time leaderboards for a chat group
//!
//! This crate aggregates per-user WakaTime stats over day/week/month/year
//! windows and serves them as ranked leaderboards, caching the expensive
//! windows.

pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::UserRegistry;
use services::BoardService;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub registry: Arc<dyn UserRegistry>,
    pub board: BoardService,
}
