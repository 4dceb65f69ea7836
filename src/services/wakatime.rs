// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! WakaTime API client for fetching coding-time summaries.
//!
//! One call per user per window: a date-bounded query against the
//! summaries endpoint, authenticated by the user's API key as a query
//! parameter. The grand total of every daily record counts, so all
//! coding categories are included, not just one activity type.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

/// Named failure kinds for a summaries fetch.
///
/// The aggregator consumes these and degrades the affected user to zero
/// minutes; none of them abort a batch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

/// Source of per-user coding totals.
///
/// Implemented by [`WakaTimeClient`]; the seam exists so the aggregator
/// can take a test double.
#[async_trait]
pub trait CodingStatsProvider: Send + Sync {
    /// Total coding minutes over the inclusive `[start, end]` range.
    async fn fetch_window_minutes(
        &self,
        api_key: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, FetchError>;
}

/// WakaTime API client.
#[derive(Clone)]
pub struct WakaTimeClient {
    http: reqwest::Client,
    base_url: String,
}

impl WakaTimeClient {
    /// Create a client with a bounded per-request timeout; a hung call
    /// must not hold an aggregation batch open.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl CodingStatsProvider for WakaTimeClient {
    async fn fetch_window_minutes(
        &self,
        api_key: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, FetchError> {
        let url = format!("{}/users/current/summaries", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("start", start.to_string()),
                ("end", end.to_string()),
                ("api_key", api_key.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Transport(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body: SummariesResponse = response
            .json()
            .await
            .map_err(|e| FetchError::MalformedBody(e.to_string()))?;

        if body.data.is_empty() {
            return Err(FetchError::MalformedBody(
                "no daily records in response".to_string(),
            ));
        }

        let total_seconds: f64 = body.data.iter().map(|d| d.grand_total.total_seconds).sum();
        Ok(total_seconds / 60.0)
    }
}

/// Response from the summaries endpoint: one record per day in the range.
#[derive(Debug, Clone, Deserialize)]
struct SummariesResponse {
    #[serde(default)]
    data: Vec<DaySummary>,
}

/// One day's records. Only the grand total matters here.
#[derive(Debug, Clone, Deserialize)]
struct DaySummary {
    /// Absent grand total counts as zero seconds.
    #[serde(default)]
    grand_total: GrandTotal,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct GrandTotal {
    #[serde(default)]
    total_seconds: f64,
}
