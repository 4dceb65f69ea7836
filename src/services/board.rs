// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard serving: cache fast path, aggregation slow path.

use crate::db::UserRegistry;
use crate::error::Result;
use crate::models::{LeaderboardOutcome, TimeWindow};
use crate::services::aggregator::Aggregator;
use crate::services::cache::LeaderboardCache;
use chrono::{FixedOffset, NaiveDate, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Serves leaderboards for the command surface.
///
/// Cached window classes (Month, Year) go through [`LeaderboardCache`]
/// with single-flight recomputation on miss; Day and Week always compute
/// live. The background refresh path writes the cache without reading it.
#[derive(Clone)]
pub struct BoardService {
    registry: Arc<dyn UserRegistry>,
    aggregator: Aggregator,
    cache: LeaderboardCache,
    /// Per-window mutex so concurrent misses coalesce into one recompute.
    compute_locks: Arc<DashMap<TimeWindow, Arc<Mutex<()>>>>,
    /// Fixed offset pinning what "today" means, independent of server tz.
    tz_offset: FixedOffset,
}

impl BoardService {
    pub fn new(
        registry: Arc<dyn UserRegistry>,
        aggregator: Aggregator,
        cache: LeaderboardCache,
        tz_offset: FixedOffset,
    ) -> Self {
        Self {
            registry,
            aggregator,
            cache,
            compute_locks: Arc::new(DashMap::new()),
            tz_offset,
        }
    }

    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz_offset).date_naive()
    }

    /// Leaderboard for `window`, through the cache when the class allows.
    pub async fn request_leaderboard(&self, window: TimeWindow) -> Result<LeaderboardOutcome> {
        if window.ttl().is_none() {
            return self.compute(window).await;
        }

        if let Some(board) = self.cache.get(window).await {
            return Ok(LeaderboardOutcome::Board(board));
        }

        // Single-flight: only one task per window recomputes. Waiters
        // re-read the entry the winner writes.
        let lock = self
            .compute_locks
            .entry(window)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        if let Some(board) = self.cache.get(window).await {
            return Ok(LeaderboardOutcome::Board(board));
        }

        let outcome = self.compute(window).await?;
        if let LeaderboardOutcome::Board(board) = &outcome {
            self.cache.put(window, board).await;
        }
        Ok(outcome)
    }

    /// Background refresh: recompute and overwrite the cache slot without
    /// consulting it. Returns the number of entries written.
    pub async fn refresh_window(&self, window: TimeWindow) -> Result<usize> {
        match self.compute(window).await? {
            LeaderboardOutcome::Board(board) => {
                let count = board.len();
                self.cache.put(window, &board).await;
                Ok(count)
            }
            LeaderboardOutcome::NoRegisteredUsers => {
                tracing::warn!(window = %window, "No registered users, nothing to refresh");
                Ok(0)
            }
        }
    }

    async fn compute(&self, window: TimeWindow) -> Result<LeaderboardOutcome> {
        let users = self.registry.get_all_users().await?;
        Ok(self
            .aggregator
            .build_leaderboard(&users, window, self.today())
            .await)
    }
}
