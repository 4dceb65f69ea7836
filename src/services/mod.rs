// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod aggregator;
pub mod board;
pub mod cache;
pub mod refresh;
pub mod wakatime;

pub use aggregator::Aggregator;
pub use board::BoardService;
pub use cache::{CacheStore, LeaderboardCache, MemoryCacheStore, StoreError};
pub use wakatime::{CodingStatsProvider, FetchError, WakaTimeClient};
