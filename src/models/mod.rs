// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod leaderboard;
pub mod user;
pub mod window;

pub use leaderboard::{Leaderboard, LeaderboardOutcome, UserStat};
pub use user::User;
pub use window::TimeWindow;
