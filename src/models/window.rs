// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aggregation time windows and their caching policy.

use chrono::{Duration, NaiveDate};
use std::str::FromStr;
use std::time::Duration as StdDuration;

/// Cache TTL for the Month window (1 hour).
const MONTH_TTL_SECS: u64 = 3600;
/// Cache TTL for the Year window (24 hours).
const YEAR_TTL_SECS: u64 = 86400;

/// A named date range over which coding time is aggregated.
///
/// Each window resolves to an inclusive `[start, end]` range ending today.
/// Day and Week are cheap enough to recompute per request; Month and Year
/// are cached (see [`TimeWindow::ttl`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeWindow {
    Day,
    Week,
    Month,
    Year,
}

impl TimeWindow {
    /// Number of days covered, inclusive of today.
    pub fn days(&self) -> i64 {
        match self {
            TimeWindow::Day => 1,
            TimeWindow::Week => 7,
            TimeWindow::Month => 30,
            TimeWindow::Year => 365,
        }
    }

    /// Resolve to an inclusive `(start, end)` date range anchored at `today`.
    ///
    /// Pure function of the given date: `end == today`,
    /// `start == today - (days - 1)`.
    pub fn resolve(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        (today - Duration::days(self.days() - 1), today)
    }

    /// Cache TTL for this window class. `None` means the window is never
    /// cached and every request recomputes.
    pub fn ttl(&self) -> Option<StdDuration> {
        match self {
            TimeWindow::Day | TimeWindow::Week => None,
            TimeWindow::Month => Some(StdDuration::from_secs(MONTH_TTL_SECS)),
            TimeWindow::Year => Some(StdDuration::from_secs(YEAR_TTL_SECS)),
        }
    }

    /// Cache slot for this window class. One slot per class: the leaderboard
    /// is a shared, global view.
    pub fn cache_key(&self) -> String {
        format!("wakaboard:{}_stats", self.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
        }
    }

    /// Human-readable label for board titles.
    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::Day => "today",
            TimeWindow::Week => "last 7 days",
            TimeWindow::Month => "last 30 days",
            TimeWindow::Year => "last 365 days",
        }
    }

    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::Day,
        TimeWindow::Week,
        TimeWindow::Month,
        TimeWindow::Year,
    ];

    /// The window classes that are cached (and thus background-refreshed).
    pub const CACHED: [TimeWindow; 2] = [TimeWindow::Month, TimeWindow::Year];
}

impl FromStr for TimeWindow {
    type Err = ParseWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "year" => Ok(TimeWindow::Year),
            other => Err(ParseWindowError(other.to_string())),
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown window name in a request.
#[derive(Debug, thiserror::Error)]
#[error("unknown time window: {0:?} (expected day, week, month or year)")]
pub struct ParseWindowError(pub String);
