//! Splash ledger: append-only log of splash events.

use std::sync::Arc;

use crate::domain::{GuildId, SplashEvent, UserId};
use crate::error::BotError;
use crate::persistence::Storage;

/// Number of events returned when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Sole writer of [`SplashEvent`]s.
#[derive(Debug, Clone)]
pub struct SplashLedger {
    storage: Arc<dyn Storage>,
}

impl SplashLedger {
    /// Creates a ledger over the given storage.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Appends one splash event. The caller has already validated the
    /// color against the registry.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::StorageError`] on storage failure.
    pub async fn record_splash(
        &self,
        guild_id: GuildId,
        splasher_id: UserId,
        target_id: UserId,
        color_name: &str,
    ) -> Result<SplashEvent, BotError> {
        let event = self
            .storage
            .append_splash(guild_id, splasher_id, target_id, color_name)
            .await?;
        tracing::debug!(%guild_id, id = event.id, color = color_name, "splash recorded");
        Ok(event)
    }

    /// Returns the guild's most recent events, newest first by insertion
    /// order, bounded by `limit` (default [`DEFAULT_HISTORY_LIMIT`]).
    ///
    /// # Errors
    ///
    /// Returns [`BotError::StorageError`] on storage failure.
    pub async fn recent_splashes(
        &self,
        guild_id: GuildId,
        limit: Option<u32>,
    ) -> Result<Vec<SplashEvent>, BotError> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.storage.recent_splashes(guild_id, limit).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    const GUILD: GuildId = GuildId::new(42);

    fn make_ledger() -> SplashLedger {
        SplashLedger::new(Arc::new(MemoryStorage::new()))
    }

    #[tokio::test]
    async fn returns_ten_most_recent_of_fifteen() {
        let ledger = make_ledger();
        for n in 0..15_u64 {
            let result = ledger
                .record_splash(GUILD, UserId::new(n), UserId::new(99), "Red")
                .await;
            assert!(result.is_ok());
        }

        let Ok(events) = ledger.recent_splashes(GUILD, Some(10)).await else {
            panic!("history read failed");
        };
        let splashers: Vec<u64> = events.iter().map(|e| e.splasher_id.get()).collect();
        assert_eq!(splashers, (5..15).rev().collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn default_limit_is_ten() {
        let ledger = make_ledger();
        for n in 0..12_u64 {
            let _ = ledger
                .record_splash(GUILD, UserId::new(n), UserId::new(99), "Blue")
                .await;
        }
        let Ok(events) = ledger.recent_splashes(GUILD, None).await else {
            panic!("history read failed");
        };
        assert_eq!(events.len(), 10);
    }

    #[tokio::test]
    async fn ordering_follows_insertion_not_timestamp() {
        let ledger = make_ledger();
        let first = ledger
            .record_splash(GUILD, UserId::new(1), UserId::new(2), "Red")
            .await;
        let second = ledger
            .record_splash(GUILD, UserId::new(3), UserId::new(4), "Pink")
            .await;
        let (Ok(first), Ok(second)) = (first, second) else {
            panic!("record failed");
        };
        assert!(second.id > first.id);

        let Ok(events) = ledger.recent_splashes(GUILD, Some(5)).await else {
            panic!("history read failed");
        };
        assert_eq!(events.first().map(|e| e.id), Some(second.id));
    }

    #[tokio::test]
    async fn zero_limit_is_empty() {
        let ledger = make_ledger();
        let _ = ledger
            .record_splash(GUILD, UserId::new(1), UserId::new(2), "Red")
            .await;
        let result = ledger.recent_splashes(GUILD, Some(0)).await;
        assert!(matches!(result, Ok(ref events) if events.is_empty()));
    }

    #[tokio::test]
    async fn storage_failure_surfaces() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_fail_on_append(true);
        let ledger = SplashLedger::new(storage);
        let result = tokio_test::assert_err!(
            ledger
                .record_splash(GUILD, UserId::new(1), UserId::new(2), "Red")
                .await
        );
        assert!(matches!(result, BotError::StorageError(_)));
    }
}
