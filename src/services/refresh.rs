// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Background cache refresh loops for the cached window classes.

use crate::models::TimeWindow;
use crate::services::board::BoardService;

/// Spawn one refresh loop per cached window class.
///
/// Each loop ticks at the class TTL, so the cache slot is normally
/// rewritten right as it would expire. The first tick fires immediately
/// and warms the cache at startup. A failed refresh leaves the old entry
/// in place until its TTL runs out; requests then fall back to live
/// computation.
pub fn spawn_refresh_loops(board: BoardService) {
    for window in TimeWindow::CACHED {
        let Some(ttl) = window.ttl() else { continue };
        let board = board.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(ttl);
            loop {
                interval.tick().await;
                match board.refresh_window(window).await {
                    Ok(count) => {
                        tracing::info!(
                            window = %window,
                            entries = count,
                            "Refreshed leaderboard cache"
                        );
                    }
                    Err(err) => {
                        tracing::error!(
                            window = %window,
                            error = %err,
                            "Cache refresh failed"
                        );
                    }
                }
            }
        });
    }
}
