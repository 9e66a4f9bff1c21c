//! In-process storage.
//!
//! Used when `PERSISTENCE_ENABLED=false` and as the storage fake in tests.
//! Nothing survives a restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::Storage;
use crate::domain::{ColorRoleRecord, GuildId, SplashEvent, UserId};
use crate::error::BotError;

/// Storage kept in memory behind async locks.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    roles: RwLock<HashMap<GuildId, Vec<ColorRoleRecord>>>,
    splashes: RwLock<Vec<SplashEvent>>,
    fail_on_append: AtomicBool,
    fail_on_insert: AtomicBool,
}

impl MemoryStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent [`Storage::append_splash`] fail, for
    /// exercising error paths.
    pub fn set_fail_on_append(&self, fail: bool) {
        self.fail_on_append.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent [`Storage::insert_color_roles`] fail without
    /// writing anything.
    pub fn set_fail_on_insert(&self, fail: bool) {
        self.fail_on_insert.store(fail, Ordering::SeqCst);
    }

    /// Total number of splash events across all guilds.
    pub async fn splash_count(&self) -> usize {
        self.splashes.read().await.len()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn insert_color_roles(&self, records: &[ColorRoleRecord]) -> Result<(), BotError> {
        if self.fail_on_insert.load(Ordering::SeqCst) {
            return Err(BotError::StorageError("role registry unavailable".to_string()));
        }

        let mut map = self.roles.write().await;

        for (i, record) in records.iter().enumerate() {
            let stored = map.get(&record.guild_id).into_iter().flatten();
            let earlier = records.iter().take(i);
            let clash = stored
                .chain(earlier)
                .any(|r| r.guild_id == record.guild_id && r.color == record.color);
            if clash {
                return Err(BotError::AlreadyExists(record.guild_id));
            }
        }

        for record in records {
            map.entry(record.guild_id).or_default().push(*record);
        }
        Ok(())
    }

    async fn color_roles(&self, guild_id: GuildId) -> Result<Vec<ColorRoleRecord>, BotError> {
        Ok(self
            .roles
            .read()
            .await
            .get(&guild_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn clear_color_roles(&self, guild_id: GuildId) -> Result<u64, BotError> {
        let removed = self.roles.write().await.remove(&guild_id);
        Ok(removed.map_or(0, |records| records.len() as u64))
    }

    async fn append_splash(
        &self,
        guild_id: GuildId,
        splasher_id: UserId,
        target_id: UserId,
        color_name: &str,
    ) -> Result<SplashEvent, BotError> {
        if self.fail_on_append.load(Ordering::SeqCst) {
            return Err(BotError::StorageError("splash log unavailable".to_string()));
        }

        let mut log = self.splashes.write().await;
        let id = log.last().map_or(1, |last| last.id.saturating_add(1));
        let event = SplashEvent {
            id,
            guild_id,
            splasher_id,
            target_id,
            color_name: color_name.to_string(),
            timestamp: Utc::now(),
        };
        log.push(event.clone());
        Ok(event)
    }

    async fn recent_splashes(
        &self,
        guild_id: GuildId,
        limit: u32,
    ) -> Result<Vec<SplashEvent>, BotError> {
        let log = self.splashes.read().await;
        Ok(log
            .iter()
            .rev()
            .filter(|event| event.guild_id == guild_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
