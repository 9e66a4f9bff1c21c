//! Splash orchestration: pick a color, swap the member's color role,
//! record the event, and render history.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::splash_event::{fallback_name, render_history};
use crate::domain::{GuildId, HistoryLine, PaletteColor, SplashEvent, UserId};
use crate::error::BotError;
use crate::gateway::ChatGateway;
use crate::service::{RoleRegistry, SplashLedger};

const REMOVE_REASON: &str = "Removing old Holi color before splashing new one";

/// A completed splash, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplashOutcome {
    /// The recorded event.
    pub event: SplashEvent,
    /// Color assigned.
    pub color: PaletteColor,
    /// Display name of the splasher.
    pub splasher_name: String,
    /// Display name of the target.
    pub target_name: String,
}

impl SplashOutcome {
    /// Announcement text, e.g. `"Asha splashed Ravi with Blue!"`.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "{} splashed {} with {}!",
            self.splasher_name, self.target_name, self.color
        )
    }
}

/// Rendered splash history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplashHistory {
    /// Raw events, newest first.
    pub events: Vec<SplashEvent>,
    /// One display line per event, same order.
    pub lines: Vec<HistoryLine>,
}

impl SplashHistory {
    /// Full message text, header included.
    #[must_use]
    pub fn text(&self) -> String {
        render_history(&self.lines)
    }
}

/// Coordinates the registry, the ledger, and the platform for splashes.
///
/// Platform calls run strictly in sequence: read the member, remove old
/// color roles, add the new one, then write the ledger. Nothing is retried.
#[derive(Debug, Clone)]
pub struct SplashService {
    registry: Arc<RoleRegistry>,
    ledger: Arc<SplashLedger>,
    gateway: Arc<dyn ChatGateway>,
}

impl SplashService {
    /// Creates a new `SplashService`.
    #[must_use]
    pub fn new(
        registry: Arc<RoleRegistry>,
        ledger: Arc<SplashLedger>,
        gateway: Arc<dyn ChatGateway>,
    ) -> Self {
        Self {
            registry,
            ledger,
            gateway,
        }
    }

    /// Returns a reference to the inner [`RoleRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<RoleRegistry> {
        &self.registry
    }

    /// Returns a reference to the inner [`SplashLedger`].
    #[must_use]
    pub fn ledger(&self) -> &Arc<SplashLedger> {
        &self.ledger
    }

    /// Returns a reference to the platform gateway.
    #[must_use]
    pub fn gateway(&self) -> &Arc<dyn ChatGateway> {
        &self.gateway
    }

    /// Splashes `target_id` with `color`, or with a random configured color
    /// when `color` is `None`.
    ///
    /// Every other configured color role the target holds is removed before
    /// the new one is added. If a removal fails the new role is not added
    /// and no event is written; removals that already succeeded stay
    /// applied.
    ///
    /// # Errors
    ///
    /// - [`BotError::NoRolesConfigured`] / [`BotError::UnknownColor`] from
    ///   color selection.
    /// - [`BotError::MemberNotFound`] if the target is not in the guild.
    /// - [`BotError::ColorRoleMissing`] if the chosen role no longer exists
    ///   on the platform.
    /// - [`BotError::Forbidden`] / [`BotError::ExternalError`] from any
    ///   platform call.
    /// - [`BotError::StorageError`] on storage failure.
    pub async fn splash(
        &self,
        guild_id: GuildId,
        splasher_id: UserId,
        target_id: UserId,
        color: Option<&str>,
    ) -> Result<SplashOutcome, BotError> {
        let selection = self.registry.select_and_validate(guild_id, color).await?;
        let chosen = selection.chosen;

        let guild_roles = self.gateway.guild_roles(guild_id).await?;
        if !guild_roles.iter().any(|r| r.id == chosen.role_id) {
            return Err(BotError::ColorRoleMissing(chosen.color.name().to_string()));
        }

        let member = self
            .gateway
            .member(guild_id, target_id)
            .await?
            .ok_or(BotError::MemberNotFound(target_id))?;

        let stale = member
            .role_ids
            .iter()
            .copied()
            .filter(|held| *held != chosen.role_id && selection.is_color_role(*held));
        for role_id in stale {
            if let Err(e) = self
                .gateway
                .remove_member_role(guild_id, target_id, role_id, REMOVE_REASON)
                .await
            {
                tracing::warn!(%guild_id, %target_id, %role_id, error = %e, "color role removal failed; splash aborted");
                return Err(e.into());
            }
        }

        let reason = format!("Holi splash by {splasher_id}");
        self.gateway
            .add_member_role(guild_id, target_id, chosen.role_id, &reason)
            .await?;

        let event = self
            .ledger
            .record_splash(guild_id, splasher_id, target_id, chosen.color.name())
            .await?;

        let splasher_name = self.display_name(guild_id, splasher_id).await;
        tracing::info!(%guild_id, %splasher_id, %target_id, color = %chosen.color, "member splashed");

        Ok(SplashOutcome {
            event,
            color: chosen.color,
            splasher_name,
            target_name: member.display_name,
        })
    }

    /// Loads the guild's recent splashes and resolves member names.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::StorageError`] on storage failure. Name lookups
    /// never fail the call; unresolved members render as `User(<id>)`.
    pub async fn history(
        &self,
        guild_id: GuildId,
        limit: Option<u32>,
    ) -> Result<SplashHistory, BotError> {
        let events = self.ledger.recent_splashes(guild_id, limit).await?;

        let mut lines = Vec::with_capacity(events.len());
        for event in &events {
            let splasher = self.display_name(guild_id, event.splasher_id).await;
            let target = self.display_name(guild_id, event.target_id).await;
            lines.push(HistoryLine::new(event, splasher, target));
        }

        Ok(SplashHistory { events, lines })
    }

    async fn display_name(&self, guild_id: GuildId, user_id: UserId) -> String {
        match self.gateway.member(guild_id, user_id).await {
            Ok(Some(member)) => member.display_name,
            Ok(None) => fallback_name(user_id),
            Err(e) => {
                tracing::warn!(%guild_id, %user_id, error = %e, "member lookup failed");
                fallback_name(user_id)
            }
        }
    }
}
