//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string for the user registry
    pub database_url: String,
    /// Server port
    pub port: u16,
    /// Base URL of the WakaTime API
    pub wakatime_base_url: String,
    /// Per-request timeout for WakaTime calls, in seconds
    pub wakatime_timeout_secs: u64,
    /// Shared token protecting the internal task routes
    pub tasks_auth_token: String,
    /// Fixed UTC offset (hours) used to decide what "today" means
    pub tz_offset_hours: i32,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/wakaboard_test".to_string(),
            port: 8080,
            wakatime_base_url: "https://wakatime.com/api/v1".to_string(),
            wakatime_timeout_secs: 15,
            tasks_auth_token: "test_tasks_token".to_string(),
            tz_offset_hours: 0,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let tz_offset_hours: i32 = env::var("TZ_OFFSET_HOURS")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("TZ_OFFSET_HOURS"))?;
        // FixedOffset rejects anything outside a day
        if !(-23..=23).contains(&tz_offset_hours) {
            return Err(ConfigError::Invalid("TZ_OFFSET_HOURS"));
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            wakatime_base_url: env::var("WAKATIME_BASE_URL")
                .unwrap_or_else(|_| "https://wakatime.com/api/v1".to_string()),
            wakatime_timeout_secs: env::var("WAKATIME_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .unwrap_or(15),
            tasks_auth_token: env::var("TASKS_AUTH_TOKEN")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("TASKS_AUTH_TOKEN"))?,
            tz_offset_hours,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
