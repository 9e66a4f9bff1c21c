//! Role registry: which color roles exist per guild.
//!
//! Creation and deletion act on a guild's whole palette. The platform
//! calls underneath are not atomic, but the registry only ever records a
//! complete result of one call, so color resolution never sees a palette
//! left half-built by an aborted operation.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{ColorRoleRecord, GuildId, PaletteColor, RoleId, select_and_validate};
use crate::error::BotError;
use crate::gateway::{ChatError, ChatGateway, NewRole};
use crate::persistence::Storage;

const CREATE_REASON: &str = "Holi roles setup";
const DELETE_REASON: &str = "Holi roles cleanup";
const ROLLBACK_REASON: &str = "Holi roles setup aborted";

/// A palette color that could not be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorFailure {
    /// Color that failed.
    pub color: PaletteColor,
    /// Platform error text.
    pub message: String,
}

/// Result of creating a guild's palette.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaletteCreation {
    /// Records that were created and registered.
    pub created: Vec<ColorRoleRecord>,
    /// Colors skipped because of non-fatal platform failures.
    pub failures: Vec<ColorFailure>,
}

impl PaletteCreation {
    /// Number of roles created.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created.len()
    }
}

/// A color chosen for a splash, with the palette it was chosen from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSelection {
    /// The record to assign.
    pub chosen: ColorRoleRecord,
    /// Every record registered for the guild when the choice was made.
    pub configured: Vec<ColorRoleRecord>,
}

impl ColorSelection {
    /// Returns `true` if `role_id` is one of the guild's color roles.
    #[must_use]
    pub fn is_color_role(&self, role_id: RoleId) -> bool {
        self.configured.iter().any(|r| r.role_id == role_id)
    }
}

/// Registry of per-guild color roles, backed by [`Storage`] and kept in
/// step with the platform through [`ChatGateway`].
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    storage: Arc<dyn Storage>,
    gateway: Arc<dyn ChatGateway>,
    verified_role_name: String,
}

impl RoleRegistry {
    /// Creates a registry.
    ///
    /// New roles are positioned directly above the guild role named
    /// `verified_role_name` (case-insensitive), when one exists.
    #[must_use]
    pub fn new(
        storage: Arc<dyn Storage>,
        gateway: Arc<dyn ChatGateway>,
        verified_role_name: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            gateway,
            verified_role_name: verified_role_name.into(),
        }
    }

    /// Creates one role per palette color and registers them.
    ///
    /// Per-color failures other than `Forbidden` are collected in the
    /// result and do not stop the remaining colors.
    ///
    /// # Errors
    ///
    /// - [`BotError::AlreadyExists`] if the guild already has records.
    /// - [`BotError::Forbidden`] as soon as the platform denies role
    ///   management; roles created earlier in the call are deleted again
    ///   and nothing is registered.
    /// - [`BotError::ExternalError`] if the guild's roles cannot be listed.
    /// - [`BotError::StorageError`] if the records cannot be written.
    pub async fn create_roles(&self, guild_id: GuildId) -> Result<PaletteCreation, BotError> {
        if !self.storage.color_roles(guild_id).await?.is_empty() {
            return Err(BotError::AlreadyExists(guild_id));
        }

        let position = self.target_position(guild_id).await?;
        let mut outcome = PaletteCreation::default();

        for color in PaletteColor::ALL {
            let new_role = NewRole {
                name: color.name().to_string(),
                color: color.rgb(),
            };
            let role = match self.gateway.create_role(guild_id, &new_role, CREATE_REASON).await {
                Ok(role) => role,
                Err(ChatError::Forbidden(msg)) => {
                    self.roll_back(guild_id, &outcome.created).await;
                    return Err(BotError::Forbidden(msg));
                }
                Err(e) => {
                    tracing::error!(%guild_id, %color, error = %e, "failed to create color role");
                    outcome.failures.push(ColorFailure {
                        color,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            outcome
                .created
                .push(ColorRoleRecord::new(guild_id, role.id, color));

            match self.gateway.move_role(guild_id, role.id, position).await {
                Ok(()) => {}
                Err(ChatError::Forbidden(msg)) => {
                    self.roll_back(guild_id, &outcome.created).await;
                    return Err(BotError::Forbidden(msg));
                }
                Err(e) => {
                    tracing::warn!(%guild_id, %color, role_id = %role.id, error = %e, "failed to position color role");
                }
            }
        }

        if !outcome.created.is_empty()
            && let Err(e) = self.storage.insert_color_roles(&outcome.created).await
        {
            self.roll_back(guild_id, &outcome.created).await;
            return Err(e);
        }

        tracing::info!(
            %guild_id,
            created = outcome.created_count(),
            failed = outcome.failures.len(),
            "color roles created"
        );
        Ok(outcome)
    }

    /// Deletes the guild's color roles from the platform and clears the
    /// registry, returning how many platform roles were deleted.
    ///
    /// Roles already gone from the platform are skipped, and other
    /// per-role failures are logged; the registry is cleared either way.
    ///
    /// # Errors
    ///
    /// - [`BotError::NotFound`] if the guild has no records.
    /// - [`BotError::Forbidden`] if the platform denies role management;
    ///   the registry is left untouched so the call can be repeated.
    /// - [`BotError::StorageError`] on storage failure.
    pub async fn delete_roles(&self, guild_id: GuildId) -> Result<usize, BotError> {
        let records = self.storage.color_roles(guild_id).await?;
        if records.is_empty() {
            return Err(BotError::NotFound(guild_id));
        }

        let mut deleted = 0_usize;
        for record in &records {
            match self
                .gateway
                .delete_role(guild_id, record.role_id, DELETE_REASON)
                .await
            {
                Ok(()) => deleted += 1,
                Err(ChatError::UnknownResource(_)) => {
                    tracing::warn!(%guild_id, role_id = %record.role_id, "color role already gone; skipped");
                }
                Err(ChatError::Forbidden(msg)) => return Err(BotError::Forbidden(msg)),
                Err(e) => {
                    tracing::error!(%guild_id, color = %record.color, error = %e, "failed to delete color role");
                }
            }
        }

        self.storage.clear_color_roles(guild_id).await?;

        tracing::info!(%guild_id, deleted, "color roles deleted");
        Ok(deleted)
    }

    /// Returns the guild's registered color roles; empty if none.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::StorageError`] on storage failure.
    pub async fn list_roles(&self, guild_id: GuildId) -> Result<Vec<ColorRoleRecord>, BotError> {
        self.storage.color_roles(guild_id).await
    }

    /// Finds the record whose color matches `name`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::StorageError`] on storage failure.
    pub async fn resolve_color(
        &self,
        guild_id: GuildId,
        name: &str,
    ) -> Result<Option<ColorRoleRecord>, BotError> {
        let records = self.storage.color_roles(guild_id).await?;
        Ok(records.into_iter().find(|r| r.matches_name(name)))
    }

    /// Picks the color role for a splash from a single read of the
    /// registry; see [`select_and_validate`].
    ///
    /// # Errors
    ///
    /// Returns [`BotError::NoRolesConfigured`], [`BotError::UnknownColor`],
    /// or [`BotError::StorageError`].
    pub async fn select_and_validate(
        &self,
        guild_id: GuildId,
        requested: Option<&str>,
    ) -> Result<ColorSelection, BotError> {
        let configured = self.storage.color_roles(guild_id).await?;
        let mut rng = rand::rng();
        let chosen = select_and_validate(&configured, requested, &mut rng)?;
        Ok(ColorSelection { chosen, configured })
    }

    /// Position just above the guild's verified role, or `1` without one.
    async fn target_position(&self, guild_id: GuildId) -> Result<i32, BotError> {
        let roles = self.gateway.guild_roles(guild_id).await?;
        let verified = roles
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(&self.verified_role_name));
        Ok(verified.map_or(1, |r| r.position.saturating_add(1)))
    }

    /// Best-effort removal of roles created during an aborted call.
    async fn roll_back(&self, guild_id: GuildId, created: &[ColorRoleRecord]) {
        for record in created {
            let role_id = record.role_id;
            if let Err(e) = self
                .gateway
                .delete_role(guild_id, role_id, ROLLBACK_REASON)
                .await
            {
                tracing::warn!(%guild_id, %role_id, error = %e, "failed to roll back color role");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use crate::test_support::{FakeGateway, SharedBuffer};

    const GUILD: GuildId = GuildId::new(500);

    fn make_registry() -> (RoleRegistry, Arc<MemoryStorage>, Arc<FakeGateway>) {
        let storage = Arc::new(MemoryStorage::new());
        let gateway = Arc::new(FakeGateway::new());
        let registry = RoleRegistry::new(
            Arc::clone(&storage) as Arc<dyn Storage>,
            Arc::clone(&gateway) as Arc<dyn ChatGateway>,
            "verified",
        );
        (registry, storage, gateway)
    }

    #[tokio::test]
    async fn create_registers_full_palette_above_verified() {
        let (registry, _, gateway) = make_registry();
        gateway.add_role(77, "Verified", 5, 0).await;

        let Ok(outcome) = registry.create_roles(GUILD).await else {
            panic!("creation should succeed");
        };
        assert_eq!(outcome.created_count(), 7);
        assert!(outcome.failures.is_empty());

        let Ok(listed) = registry.list_roles(GUILD).await else {
            panic!("list failed");
        };
        let colors: Vec<PaletteColor> = listed.iter().map(|r| r.color).collect();
        assert_eq!(colors, PaletteColor::ALL.to_vec());

        let state = gateway.state().await;
        assert!(
            state
                .roles
                .iter()
                .filter(|r| r.name != "Verified")
                .all(|r| r.position == 6)
        );
    }

    #[tokio::test]
    async fn create_without_verified_role_uses_position_one() {
        let (registry, _, gateway) = make_registry();
        let _ = registry.create_roles(GUILD).await;
        let state = gateway.state().await;
        assert!(state.calls.iter().any(|c| c.ends_with(":1") && c.starts_with("move:")));
    }

    #[tokio::test]
    async fn create_twice_fails_and_creates_nothing_new() {
        let (registry, _, gateway) = make_registry();
        let _ = registry.create_roles(GUILD).await;
        let before = gateway.role_names().await.len();

        let result = registry.create_roles(GUILD).await;
        assert!(matches!(result, Err(BotError::AlreadyExists(g)) if g == GUILD));
        assert_eq!(gateway.role_names().await.len(), before);
    }

    #[tokio::test]
    async fn non_fatal_failures_are_collected() {
        let (registry, _, gateway) = make_registry();
        gateway.state().await.fail_create.insert(
            "Yellow".to_string(),
            ChatError::Http {
                status: 500,
                body: "boom".to_string(),
            },
        );

        let Ok(outcome) = registry.create_roles(GUILD).await else {
            panic!("creation should succeed partially");
        };
        assert_eq!(outcome.created_count(), 6);
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures.iter().all(|f| f.color == PaletteColor::Yellow));

        let Ok(listed) = registry.list_roles(GUILD).await else {
            panic!("list failed");
        };
        assert_eq!(listed.len(), 6);
        assert!(listed.iter().all(|r| r.color != PaletteColor::Yellow));
    }

    #[tokio::test]
    async fn forbidden_aborts_and_rolls_back() {
        let (registry, _, gateway) = make_registry();
        gateway
            .state()
            .await
            .fail_create
            .insert("Green".to_string(), ChatError::Forbidden("Missing Permissions".to_string()));

        let result = registry.create_roles(GUILD).await;
        assert!(matches!(result, Err(BotError::Forbidden(_))));
        assert!(gateway.role_names().await.is_empty());

        let Ok(listed) = registry.list_roles(GUILD).await else {
            panic!("list failed");
        };
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn forbidden_move_rolls_back_created_role() {
        let (registry, _, gateway) = make_registry();
        gateway.state().await.fail_move =
            Some(ChatError::Forbidden("Missing Permissions".to_string()));

        let result = registry.create_roles(GUILD).await;
        assert!(matches!(result, Err(BotError::Forbidden(_))));
        assert!(gateway.role_names().await.is_empty());

        let Ok(listed) = registry.list_roles(GUILD).await else {
            panic!("list failed");
        };
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn storage_failure_rolls_back_every_created_role() {
        let (registry, storage, gateway) = make_registry();
        storage.set_fail_on_insert(true);

        let result = registry.create_roles(GUILD).await;
        assert!(matches!(result, Err(BotError::StorageError(_))));
        assert!(gateway.role_names().await.is_empty());
        let deletes = gateway
            .state()
            .await
            .calls
            .iter()
            .filter(|c| c.starts_with("delete:"))
            .count();
        assert_eq!(deletes, 7);

        storage.set_fail_on_insert(false);
        let Ok(listed) = registry.list_roles(GUILD).await else {
            panic!("list failed");
        };
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn non_forbidden_move_failure_keeps_role() {
        let (registry, _, gateway) = make_registry();
        gateway.state().await.fail_move = Some(ChatError::Http {
            status: 400,
            body: "bad position".to_string(),
        });
        let Ok(outcome) = registry.create_roles(GUILD).await else {
            panic!("creation should succeed");
        };
        assert_eq!(outcome.created_count(), 7);
    }

    #[tokio::test]
    async fn delete_without_records_is_not_found() {
        let (registry, _, _) = make_registry();
        let result = registry.delete_roles(GUILD).await;
        assert!(matches!(result, Err(BotError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_skips_missing_roles_and_clears_registry() {
        let (registry, _, gateway) = make_registry();
        let Ok(outcome) = registry.create_roles(GUILD).await else {
            panic!("creation failed");
        };
        let Some(first) = outcome.created.first() else {
            panic!("no roles created");
        };
        let Some(second) = outcome.created.get(1) else {
            panic!("only one role created");
        };
        // One removed by hand on the platform, one failing transiently.
        gateway.state().await.roles.retain(|r| r.id != first.role_id);
        gateway.state().await.fail_delete.insert(
            second.role_id,
            ChatError::Http {
                status: 502,
                body: "upstream".to_string(),
            },
        );

        let result = registry.delete_roles(GUILD).await;
        assert!(matches!(result, Ok(5)));

        let Ok(listed) = registry.list_roles(GUILD).await else {
            panic!("list failed");
        };
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn missing_platform_role_is_logged_as_warning() {
        let (registry, _, gateway) = make_registry();
        let Ok(outcome) = registry.create_roles(GUILD).await else {
            panic!("creation failed");
        };
        let Some(first) = outcome.created.first() else {
            panic!("no roles created");
        };
        gateway.state().await.roles.retain(|r| r.id != first.role_id);

        let sink = SharedBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(sink.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let result = {
            let _guard = tracing::subscriber::set_default(subscriber);
            registry.delete_roles(GUILD).await
        };
        assert!(matches!(result, Ok(6)));

        let logs = sink.contents();
        let Some(line) = logs.lines().find(|l| l.contains("color role already gone")) else {
            panic!("skip was not logged at warn: {logs}");
        };
        assert!(line.contains("WARN"));
        assert!(line.contains(&first.role_id.to_string()));
    }

    #[tokio::test]
    async fn delete_forbidden_keeps_registry() {
        let (registry, _, gateway) = make_registry();
        let Ok(outcome) = registry.create_roles(GUILD).await else {
            panic!("creation failed");
        };
        let Some(first) = outcome.created.first() else {
            panic!("no roles created");
        };
        gateway
            .state()
            .await
            .fail_delete
            .insert(first.role_id, ChatError::Forbidden("Missing Permissions".to_string()));

        let result = registry.delete_roles(GUILD).await;
        assert!(matches!(result, Err(BotError::Forbidden(_))));
        let Ok(listed) = registry.list_roles(GUILD).await else {
            panic!("list failed");
        };
        assert_eq!(listed.len(), 7);
    }

    #[tokio::test]
    async fn resolve_color_is_case_insensitive() {
        let (registry, _, _) = make_registry();
        let _ = registry.create_roles(GUILD).await;

        let lower = registry.resolve_color(GUILD, "purple").await;
        let title = registry.resolve_color(GUILD, "Purple").await;
        let (Ok(Some(lower)), Ok(Some(title))) = (lower, title) else {
            panic!("purple should resolve");
        };
        assert_eq!(lower, title);
        assert!(matches!(registry.resolve_color(GUILD, "teal").await, Ok(None)));
    }

    #[tokio::test]
    async fn select_without_roles_fails() {
        let (registry, _, _) = make_registry();
        let result = registry.select_and_validate(GUILD, None).await;
        assert!(matches!(result, Err(BotError::NoRolesConfigured)));
    }

    #[tokio::test]
    async fn selection_carries_the_palette_it_read() {
        let (registry, _, _) = make_registry();
        let _ = registry.create_roles(GUILD).await;

        let Ok(selection) = registry.select_and_validate(GUILD, Some("PINK")).await else {
            panic!("pink should be selectable");
        };
        assert_eq!(selection.chosen.color, PaletteColor::Pink);
        assert_eq!(selection.configured.len(), 7);
        assert!(selection.is_color_role(selection.chosen.role_id));
        assert!(!selection.is_color_role(RoleId::new(1)));
    }
}
