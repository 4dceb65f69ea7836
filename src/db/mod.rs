//! Database layer (Postgres user registry).

pub mod postgres;

pub use postgres::PostgresRegistry;

use crate::error::Result;
use crate::models::User;
use async_trait::async_trait;

/// Read/write access to the user registry.
///
/// The aggregation core only reads the roster; the write methods back
/// the registration endpoints.
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Every registered user, in stable roster order.
    async fn get_all_users(&self) -> Result<Vec<User>>;

    /// Insert a user or update their username.
    async fn upsert_contact(&self, telegram_id: i64, username: &str) -> Result<()>;

    /// Insert a user or update their WakaTime API key.
    async fn set_api_key(&self, telegram_id: i64, api_key: &str) -> Result<()>;
}
