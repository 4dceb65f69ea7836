//! User model for the registry.

use serde::{Deserialize, Serialize};

/// A registered user, as stored in the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Telegram ID (primary key in the registry)
    pub telegram_id: i64,
    /// Telegram username (may be unset if the profile has none)
    pub username: Option<String>,
    /// WakaTime API key; users without one are excluded from aggregation
    pub wakatime_key: Option<String>,
}

impl User {
    /// The API key, if present and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.wakatime_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Display token used on the leaderboard.
    ///
    /// Users without a username still hold a registry row, so fall back to
    /// a stable token derived from the Telegram ID.
    pub fn display_token(&self) -> String {
        match self.username.as_deref().filter(|u| !u.is_empty()) {
            Some(name) => name.to_string(),
            None => format!("user{}", self.telegram_id),
        }
    }
}
