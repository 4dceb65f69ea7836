// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Postgres-backed user registry.

use crate::db::UserRegistry;
use crate::error::Result;
use crate::models::User;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};

const MAX_POOL_CONNECTIONS: u32 = 5;

/// Raw registry row.
#[derive(FromRow)]
struct UserRow {
    telegram_id: i64,
    username: Option<String>,
    wakatime_key: Option<String>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            telegram_id: self.telegram_id,
            username: self.username,
            wakatime_key: self.wakatime_key,
        }
    }
}

/// Postgres registry client.
#[derive(Clone)]
pub struct PostgresRegistry {
    pool: PgPool,
}

impl PostgresRegistry {
    /// Connect to Postgres and make sure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_POOL_CONNECTIONS)
            .connect(database_url)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                telegram_id BIGINT PRIMARY KEY,
                username TEXT,
                wakatime_key TEXT
            )",
        )
        .execute(&pool)
        .await?;

        tracing::info!("Connected to Postgres registry");
        Ok(Self { pool })
    }
}

#[async_trait]
impl UserRegistry for PostgresRegistry {
    async fn get_all_users(&self) -> Result<Vec<User>> {
        // Ordered so roster order (and thus leaderboard tie order) is stable
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT telegram_id, username, wakatime_key FROM users ORDER BY telegram_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }

    async fn upsert_contact(&self, telegram_id: i64, username: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (telegram_id, username)
             VALUES ($1, $2)
             ON CONFLICT (telegram_id) DO UPDATE
               SET username = EXCLUDED.username",
        )
        .bind(telegram_id)
        .bind(username)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_api_key(&self, telegram_id: i64, api_key: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (telegram_id, wakatime_key)
             VALUES ($1, $2)
             ON CONFLICT (telegram_id) DO UPDATE
               SET wakatime_key = EXCLUDED.wakatime_key",
        )
        .bind(telegram_id)
        .bind(api_key)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
