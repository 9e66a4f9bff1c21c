//! PostgreSQL implementation of the persistence layer.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::Storage;
use super::models::{ColorRoleRow, SplashLogRow};
use crate::config::BotConfig;
use crate::domain::{ColorRoleRecord, GuildId, SplashEvent, UserId};
use crate::error::BotError;

/// PostgreSQL-backed storage using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    /// Creates a storage handle over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool from configuration and applies pending
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::StorageError`] if the database is unreachable or
    /// a migration fails.
    pub async fn connect(config: &BotConfig) -> Result<Self, BotError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| BotError::StorageError(e.to_string()))?;

        tracing::info!("database migrations applied");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl Storage for PostgresStorage {
    async fn insert_color_roles(&self, records: &[ColorRoleRecord]) -> Result<(), BotError> {
        let mut tx = self.pool.begin().await?;

        for record in records {
            let result = sqlx::query(
                "INSERT INTO holi_roles (guild_id, role_id, color_name) VALUES ($1, $2, $3)",
            )
            .bind(record.guild_id.to_db())
            .bind(record.role_id.to_db())
            .bind(record.color.name())
            .execute(&mut *tx)
            .await;

            match result {
                Ok(_) => {}
                Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                    return Err(BotError::AlreadyExists(record.guild_id));
                }
                Err(e) => return Err(e.into()),
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn color_roles(&self, guild_id: GuildId) -> Result<Vec<ColorRoleRecord>, BotError> {
        let rows = sqlx::query_as::<_, (i64, i64, i64, String)>(
            "SELECT id, guild_id, role_id, color_name FROM holi_roles \
             WHERE guild_id = $1 ORDER BY id ASC",
        )
        .bind(guild_id.to_db())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(id, guild_id, role_id, color_name)| {
                ColorRoleRecord::try_from(ColorRoleRow {
                    id,
                    guild_id,
                    role_id,
                    color_name,
                })
            })
            .collect()
    }

    async fn clear_color_roles(&self, guild_id: GuildId) -> Result<u64, BotError> {
        let result = sqlx::query("DELETE FROM holi_roles WHERE guild_id = $1")
            .bind(guild_id.to_db())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn append_splash(
        &self,
        guild_id: GuildId,
        splasher_id: UserId,
        target_id: UserId,
        color_name: &str,
    ) -> Result<SplashEvent, BotError> {
        let (id, created_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            "INSERT INTO splash_logs (guild_id, splasher_id, target_id, color_name) \
             VALUES ($1, $2, $3, $4) RETURNING id, created_at",
        )
        .bind(guild_id.to_db())
        .bind(splasher_id.to_db())
        .bind(target_id.to_db())
        .bind(color_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(SplashEvent {
            id,
            guild_id,
            splasher_id,
            target_id,
            color_name: color_name.to_string(),
            timestamp: created_at,
        })
    }

    async fn recent_splashes(
        &self,
        guild_id: GuildId,
        limit: u32,
    ) -> Result<Vec<SplashEvent>, BotError> {
        let rows = sqlx::query_as::<_, (i64, i64, i64, i64, String, DateTime<Utc>)>(
            "SELECT id, guild_id, splasher_id, target_id, color_name, created_at \
             FROM splash_logs WHERE guild_id = $1 ORDER BY id DESC LIMIT $2",
        )
        .bind(guild_id.to_db())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(id, guild_id, splasher_id, target_id, color_name, created_at)| {
                    SplashEvent::from(SplashLogRow {
                        id,
                        guild_id,
                        splasher_id,
                        target_id,
                        color_name,
                        created_at,
                    })
                },
            )
            .collect())
    }
}
