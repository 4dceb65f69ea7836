//! Leaderboard data produced by the aggregator.

use serde::{Deserialize, Serialize};

/// One user's total for a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStat {
    /// Pre-rendered display token (username or fallback)
    pub username: String,
    /// Total coding time in minutes, never negative
    pub minutes: f64,
}

/// Ranked result for one window: entries sorted by minutes descending,
/// ties kept in roster order. Built once per aggregation run and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<UserStat>,
}

impl Leaderboard {
    /// Build a leaderboard from collected stats, sorting descending by
    /// minutes. The sort is stable, so equal totals keep input order.
    pub fn from_stats(mut entries: Vec<UserStat>) -> Self {
        entries.sort_by(|a, b| {
            b.minutes
                .partial_cmp(&a.minutes)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Outcome of a leaderboard request.
///
/// `NoRegisteredUsers` is distinct from an empty board so the command
/// surface can render a "nobody registered yet" message instead of an
/// empty list.
#[derive(Debug, Clone, PartialEq)]
pub enum LeaderboardOutcome {
    Board(Leaderboard),
    NoRegisteredUsers,
}
