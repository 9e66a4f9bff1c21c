//! Persistence layer: color role registry rows and the splash log.
//!
//! [`Storage`] is the storage collaborator injected into the registry and
//! ledger. [`PostgresStorage`] is the durable implementation;
//! [`MemoryStorage`] keeps everything in process and backs tests and
//! deployments with persistence switched off.

pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{ColorRoleRecord, GuildId, SplashEvent, UserId};
use crate::error::BotError;

pub use memory::MemoryStorage;
pub use postgres::PostgresStorage;

/// Durable storage keyed by guild.
#[async_trait]
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// Inserts a guild's color role records all together or not at all.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::AlreadyExists`] if any record collides with an
    /// existing `(guild_id, color)` pair, or [`BotError::StorageError`].
    async fn insert_color_roles(&self, records: &[ColorRoleRecord]) -> Result<(), BotError>;

    /// Returns every color role record for the guild, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::StorageError`] on storage failure.
    async fn color_roles(&self, guild_id: GuildId) -> Result<Vec<ColorRoleRecord>, BotError>;

    /// Deletes every color role record for the guild, returning how many
    /// were removed.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::StorageError`] on storage failure.
    async fn clear_color_roles(&self, guild_id: GuildId) -> Result<u64, BotError>;

    /// Appends a splash event, assigning its id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::StorageError`] on storage failure.
    async fn append_splash(
        &self,
        guild_id: GuildId,
        splasher_id: UserId,
        target_id: UserId,
        color_name: &str,
    ) -> Result<SplashEvent, BotError>;

    /// Returns up to `limit` of the guild's most recently appended events,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::StorageError`] on storage failure.
    async fn recent_splashes(
        &self,
        guild_id: GuildId,
        limit: u32,
    ) -> Result<Vec<SplashEvent>, BotError>;
}
