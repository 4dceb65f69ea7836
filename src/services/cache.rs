// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Freshness-bounded leaderboard cache.
//!
//! One slot per cached window class, written through a pluggable
//! `SETEX`/`GET` store. Day and Week are never cached (their TTL is
//! `None`), so `get`/`put` are no-ops for them.

use crate::models::{Leaderboard, TimeWindow, UserStat};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Storage-layer failure. Readers treat it as a miss, writers log and
/// move on; it never propagates to the serving path.
#[derive(Debug, thiserror::Error)]
#[error("cache store error: {0}")]
pub struct StoreError(pub String);

/// Key-value store with `SETEX`/`GET` semantics.
///
/// The in-memory implementation below is the default; a Redis-backed
/// store would implement the same two calls.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Store `payload` under `key`, expiring after `ttl`. Overwrites any
    /// existing value (last writer wins).
    async fn set_ex(&self, key: &str, ttl: Duration, payload: String) -> Result<(), StoreError>;

    /// Fetch the value under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
}

/// In-memory cache store. Writes are atomic per key and expiry is
/// enforced on read.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: DashMap<String, StoredEntry>,
}

struct StoredEntry {
    expires_at: DateTime<Utc>,
    payload: String,
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn set_ex(&self, key: &str, ttl: Duration, payload: String) -> Result<(), StoreError> {
        let ttl = chrono::Duration::from_std(ttl).map_err(|e| StoreError(e.to_string()))?;
        self.entries.insert(
            key.to_string(),
            StoredEntry {
                expires_at: Utc::now() + ttl,
                payload,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = Utc::now();
        let payload = self
            .entries
            .get(key)
            .and_then(|entry| (now < entry.expires_at).then(|| entry.payload.clone()));
        if payload.is_none() {
            // Expired slots are reclaimed on read
            self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        }
        Ok(payload)
    }
}

/// Wire payload for a cached leaderboard:
/// `{"computed_at": "<ISO-8601>", "data": [["username", minutes], ...]}`.
///
/// The pair list keeps entry order, so the stored board round-trips
/// rank-for-rank; f64 minutes survive JSON round-trips losslessly.
#[derive(Debug, Serialize, Deserialize)]
struct CachePayload {
    computed_at: DateTime<Utc>,
    data: Vec<(String, f64)>,
}

/// Cache of precomputed leaderboards.
#[derive(Clone)]
pub struct LeaderboardCache {
    store: std::sync::Arc<dyn CacheStore>,
}

impl LeaderboardCache {
    pub fn new(store: std::sync::Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Stored snapshot for `window`, if present and fresh.
    ///
    /// A store failure or a corrupt payload degrades to a miss; the
    /// caller recomputes live. Never recomputes itself.
    pub async fn get(&self, window: TimeWindow) -> Option<Leaderboard> {
        window.ttl()?;

        let raw = match self.store.get(&window.cache_key()).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::error!(window = %window, error = %err, "Cache read failed, treating as miss");
                return None;
            }
        };

        let payload: CachePayload = match serde_json::from_str(&raw) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(window = %window, error = %err, "Corrupt cache payload, treating as miss");
                return None;
            }
        };

        let age = Utc::now() - payload.computed_at;
        tracing::info!(
            window = %window,
            age_secs = age.num_seconds(),
            entries = payload.data.len(),
            "Cache hit"
        );

        Some(Leaderboard {
            entries: payload
                .data
                .into_iter()
                .map(|(username, minutes)| UserStat { username, minutes })
                .collect(),
        })
    }

    /// Store a fresh snapshot for `window`, stamped `computed_at = now`.
    ///
    /// A storage failure is logged but non-fatal: the caller still holds
    /// the computed board and can serve it once.
    pub async fn put(&self, window: TimeWindow, board: &Leaderboard) {
        let Some(ttl) = window.ttl() else { return };

        let payload = CachePayload {
            computed_at: Utc::now(),
            data: board
                .entries
                .iter()
                .map(|e| (e.username.clone(), e.minutes))
                .collect(),
        };

        let raw = match serde_json::to_string(&payload) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::error!(window = %window, error = %err, "Failed to serialize cache payload");
                return;
            }
        };

        match self.store.set_ex(&window.cache_key(), ttl, raw).await {
            Ok(()) => {
                tracing::info!(window = %window, entries = board.len(), "Cache updated");
            }
            Err(err) => {
                tracing::warn!(window = %window, error = %err, "Cache write failed");
            }
        }
    }
}
