// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared stub dependencies for integration tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wakaboard::config::Config;
use wakaboard::db::UserRegistry;
use wakaboard::error::Result;
use wakaboard::models::User;
use wakaboard::routes::create_router;
use wakaboard::services::{
    Aggregator, BoardService, CacheStore, CodingStatsProvider, FetchError, LeaderboardCache,
    MemoryCacheStore, StoreError,
};
use wakaboard::AppState;

/// In-memory registry stub.
#[derive(Default)]
pub struct StubRegistry {
    users: Mutex<Vec<User>>,
}

impl StubRegistry {
    #[allow(dead_code)]
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }
}

#[async_trait]
impl UserRegistry for StubRegistry {
    async fn get_all_users(&self) -> Result<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn upsert_contact(&self, telegram_id: i64, username: &str) -> Result<()> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.telegram_id == telegram_id) {
            Some(user) => user.username = Some(username.to_string()),
            None => users.push(User {
                telegram_id,
                username: Some(username.to_string()),
                wakatime_key: None,
            }),
        }
        Ok(())
    }

    async fn set_api_key(&self, telegram_id: i64, api_key: &str) -> Result<()> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.telegram_id == telegram_id) {
            Some(user) => user.wakatime_key = Some(api_key.to_string()),
            None => users.push(User {
                telegram_id,
                username: None,
                wakatime_key: Some(api_key.to_string()),
            }),
        }
        Ok(())
    }
}

/// Stats stub: fixed minutes per API key, counting every fetch. Unknown
/// keys fail, which exercises the degrade-to-zero path.
pub struct CountingStats {
    minutes_by_key: HashMap<String, f64>,
    calls: AtomicUsize,
}

impl CountingStats {
    pub fn new(entries: &[(&str, f64)]) -> Self {
        Self {
            minutes_by_key: entries.iter().map(|(k, m)| (k.to_string(), *m)).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CodingStatsProvider for CountingStats {
    async fn fetch_window_minutes(
        &self,
        api_key: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> std::result::Result<f64, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.minutes_by_key
            .get(api_key)
            .copied()
            .ok_or(FetchError::Status(401))
    }
}

/// Cache store whose backend is down: every call fails.
#[derive(Default)]
#[allow(dead_code)]
pub struct FailingCacheStore;

#[async_trait]
impl CacheStore for FailingCacheStore {
    async fn set_ex(
        &self,
        _key: &str,
        _ttl: Duration,
        _payload: String,
    ) -> std::result::Result<(), StoreError> {
        Err(StoreError("backend down".to_string()))
    }

    async fn get(&self, _key: &str) -> std::result::Result<Option<String>, StoreError> {
        Err(StoreError("backend down".to_string()))
    }
}

#[allow(dead_code)]
pub fn user(telegram_id: i64, username: &str, key: Option<&str>) -> User {
    User {
        telegram_id,
        username: Some(username.to_string()),
        wakatime_key: key.map(String::from),
    }
}

/// Two keyed users plus one without a key.
#[allow(dead_code)]
pub fn test_users() -> Vec<User> {
    vec![
        user(1, "ada", Some("k1")),
        user(2, "grace", Some("k2")),
        user(3, "keyless", None),
    ]
}

/// Board service wired from stubs, with UTC day boundaries.
#[allow(dead_code)]
pub fn board_service(
    registry: Arc<StubRegistry>,
    stats: Arc<CountingStats>,
    store: Arc<dyn CacheStore>,
) -> BoardService {
    BoardService::new(
        registry,
        Aggregator::new(stats),
        LeaderboardCache::new(store),
        chrono::FixedOffset::east_opt(0).unwrap(),
    )
}

/// Create a test app with stub dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(users: Vec<User>, stats: Arc<CountingStats>) -> (axum::Router, Arc<AppState>) {
    let registry = Arc::new(StubRegistry::with_users(users));
    let board = board_service(
        registry.clone(),
        stats,
        Arc::new(MemoryCacheStore::default()),
    );

    let state = Arc::new(AppState {
        config: Config::default(),
        registry,
        board,
    });

    (create_router(state.clone()), state)
}
