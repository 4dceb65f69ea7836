// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard aggregation: fan out per-user fetches and rank the results.

use crate::models::{Leaderboard, LeaderboardOutcome, TimeWindow, User, UserStat};
use crate::services::wakatime::CodingStatsProvider;
use chrono::NaiveDate;
use futures_util::{stream, StreamExt};
use std::sync::Arc;

/// Upper bound on concurrent WakaTime calls per aggregation run.
const MAX_CONCURRENT_FETCHES: usize = 8;

/// Builds leaderboards by fanning stats fetches out across the roster.
#[derive(Clone)]
pub struct Aggregator {
    stats: Arc<dyn CodingStatsProvider>,
}

impl Aggregator {
    pub fn new(stats: Arc<dyn CodingStatsProvider>) -> Self {
        Self { stats }
    }

    /// Aggregate one window across the roster.
    ///
    /// Users without an API key are skipped entirely; if nobody is left
    /// after the filter, the distinct `NoRegisteredUsers` outcome is
    /// returned. A failed fetch contributes 0.0 minutes instead of
    /// aborting the batch.
    ///
    /// All fetches complete before ranking. `buffered` keeps roster order,
    /// so ties in the stable sort resolve to registry order.
    pub async fn build_leaderboard(
        &self,
        users: &[User],
        window: TimeWindow,
        today: NaiveDate,
    ) -> LeaderboardOutcome {
        let (start, end) = window.resolve(today);

        let roster: Vec<(String, i64, String)> = users
            .iter()
            .filter_map(|user| {
                user.api_key()
                    .map(|key| (key.to_string(), user.telegram_id, user.display_token()))
            })
            .collect();

        if roster.is_empty() {
            return LeaderboardOutcome::NoRegisteredUsers;
        }

        tracing::info!(
            window = %window,
            users = roster.len(),
            %start,
            %end,
            "Aggregating coding time"
        );

        let entries: Vec<UserStat> = stream::iter(roster.into_iter().map(|(key, telegram_id, username)| {
            let stats = Arc::clone(&self.stats);
            async move {
                let minutes = match stats.fetch_window_minutes(&key, start, end).await {
                    Ok(minutes) => minutes,
                    Err(err) => {
                        tracing::warn!(
                            telegram_id = telegram_id,
                            error = %err,
                            "Stats fetch failed, counting 0 minutes"
                        );
                        0.0
                    }
                };
                UserStat {
                    username,
                    minutes,
                }
            }
        }))
        .buffered(MAX_CONCURRENT_FETCHES)
        .collect()
        .await;

        LeaderboardOutcome::Board(Leaderboard::from_stats(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::wakatime::FetchError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub provider: fixed minutes per API key, "down" keys fail.
    struct StubStats {
        minutes_by_key: HashMap<String, f64>,
        calls: AtomicUsize,
    }

    impl StubStats {
        fn new(entries: &[(&str, f64)]) -> Self {
            Self {
                minutes_by_key: entries
                    .iter()
                    .map(|(k, m)| (k.to_string(), *m))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CodingStatsProvider for StubStats {
        async fn fetch_window_minutes(
            &self,
            api_key: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<f64, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.minutes_by_key
                .get(api_key)
                .copied()
                .ok_or(FetchError::Timeout)
        }
    }

    fn user(id: i64, name: &str, key: Option<&str>) -> User {
        User {
            telegram_id: id,
            username: Some(name.to_string()),
            wakatime_key: key.map(String::from),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn test_users_without_key_never_appear() {
        let stats = Arc::new(StubStats::new(&[("k1", 10.0)]));
        let aggregator = Aggregator::new(stats.clone());

        let users = vec![
            user(1, "keyed", Some("k1")),
            user(2, "keyless", None),
            user(3, "empty", Some("")),
        ];

        let outcome = aggregator
            .build_leaderboard(&users, TimeWindow::Day, today())
            .await;

        let LeaderboardOutcome::Board(board) = outcome else {
            panic!("expected a board");
        };
        assert_eq!(board.len(), 1);
        assert_eq!(board.entries[0].username, "keyed");
        // Only the keyed user triggered a fetch
        assert_eq!(stats.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_roster_is_distinct_outcome() {
        let aggregator = Aggregator::new(Arc::new(StubStats::new(&[])));

        let outcome = aggregator
            .build_leaderboard(&[user(1, "keyless", None)], TimeWindow::Week, today())
            .await;
        assert_eq!(outcome, LeaderboardOutcome::NoRegisteredUsers);

        let outcome = aggregator
            .build_leaderboard(&[], TimeWindow::Week, today())
            .await;
        assert_eq!(outcome, LeaderboardOutcome::NoRegisteredUsers);
    }

    #[tokio::test]
    async fn test_failed_fetch_degrades_to_zero() {
        let aggregator = Aggregator::new(Arc::new(StubStats::new(&[
            ("k1", 120.0),
            ("k3", 45.0),
        ])));

        // "broken" is not in the stub map, so its fetch fails
        let users = vec![
            user(1, "ada", Some("k1")),
            user(2, "broken", Some("nope")),
            user(3, "grace", Some("k3")),
        ];

        let outcome = aggregator
            .build_leaderboard(&users, TimeWindow::Month, today())
            .await;

        let LeaderboardOutcome::Board(board) = outcome else {
            panic!("expected a board");
        };
        assert_eq!(board.len(), 3);
        let broken = board
            .entries
            .iter()
            .find(|e| e.username == "broken")
            .unwrap();
        assert_eq!(broken.minutes, 0.0);
        // Failed user sorts last
        assert_eq!(board.entries.last().unwrap().username, "broken");
    }

    #[tokio::test]
    async fn test_sorted_descending_with_stable_ties() {
        let aggregator = Aggregator::new(Arc::new(StubStats::new(&[
            ("k1", 60.0),
            ("k2", 300.0),
            ("k3", 60.0),
        ])));

        let users = vec![
            user(1, "first_tied", Some("k1")),
            user(2, "top", Some("k2")),
            user(3, "second_tied", Some("k3")),
        ];

        let outcome = aggregator
            .build_leaderboard(&users, TimeWindow::Week, today())
            .await;

        let LeaderboardOutcome::Board(board) = outcome else {
            panic!("expected a board");
        };
        let names: Vec<&str> = board.entries.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["top", "first_tied", "second_tied"]);
    }

    #[tokio::test]
    async fn test_identical_input_yields_identical_board() {
        let aggregator = Aggregator::new(Arc::new(StubStats::new(&[
            ("k1", 15.5),
            ("k2", 200.0),
        ])));
        let users = vec![user(1, "ada", Some("k1")), user(2, "grace", Some("k2"))];

        let first = aggregator
            .build_leaderboard(&users, TimeWindow::Year, today())
            .await;
        let second = aggregator
            .build_leaderboard(&users, TimeWindow::Year, today())
            .await;

        assert_eq!(first, second);
    }
}
