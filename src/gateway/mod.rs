//! Chat platform gateway: the role and member operations the bot needs.
//!
//! [`ChatGateway`] is the seam between the bot's logic and the platform.
//! [`DiscordClient`] implements it over the Discord REST API; tests use an
//! in-memory fake.

pub mod discord;

use async_trait::async_trait;

use crate::domain::{GuildId, RoleId, UserId};

pub use discord::DiscordClient;

/// Permission bit granting every permission in a guild.
pub const ADMINISTRATOR: u64 = 1 << 3;

/// Failure reported by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    /// The bot lacks the permission for this operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The guild, role, or member does not exist (anymore).
    #[error("unknown resource: {0}")]
    UnknownResource(String),

    /// Any other non-success response.
    #[error("platform returned {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The request never produced a response.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// A role as the platform reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildRole {
    /// Role identifier.
    pub id: RoleId,
    /// Role name.
    pub name: String,
    /// Position in the guild's role hierarchy (higher sits above).
    pub position: i32,
    /// Permission bitfield.
    pub permissions: u64,
    /// Packed `0xRRGGBB` color, `0` for none.
    pub color: u32,
}

/// A guild member as the platform reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMember {
    /// User identifier.
    pub user_id: UserId,
    /// Name shown in the guild (nickname, global name, or username).
    pub display_name: String,
    /// Roles the member currently holds, in platform order.
    pub role_ids: Vec<RoleId>,
}

/// Parameters for creating a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    /// Role name.
    pub name: String,
    /// Packed `0xRRGGBB` color.
    pub color: u32,
}

/// Role and member operations consumed from the chat platform.
///
/// Every call may fail with [`ChatError::Forbidden`] when the bot has lost
/// the capability to manage roles.
#[async_trait]
pub trait ChatGateway: Send + Sync + std::fmt::Debug {
    /// Returns the user who owns the guild.
    async fn guild_owner(&self, guild_id: GuildId) -> Result<UserId, ChatError>;

    /// Lists every role in the guild.
    async fn guild_roles(&self, guild_id: GuildId) -> Result<Vec<GuildRole>, ChatError>;

    /// Creates a role.
    async fn create_role(
        &self,
        guild_id: GuildId,
        role: &NewRole,
        reason: &str,
    ) -> Result<GuildRole, ChatError>;

    /// Moves a role to the given hierarchy position.
    async fn move_role(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
        position: i32,
    ) -> Result<(), ChatError>;

    /// Deletes a role. Fails with [`ChatError::UnknownResource`] if the role
    /// is already gone.
    async fn delete_role(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), ChatError>;

    /// Looks up a member, returning `None` if the user is not in the guild.
    async fn member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Option<GuildMember>, ChatError>;

    /// Grants a role to a member.
    async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), ChatError>;

    /// Takes a role away from a member.
    async fn remove_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), ChatError>;

    /// Returns `true` if the user owns the guild or holds a role (the
    /// implicit everyone role included) carrying [`ADMINISTRATOR`].
    async fn is_administrator(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<bool, ChatError> {
        if self.guild_owner(guild_id).await? == user_id {
            return Ok(true);
        }
        let Some(member) = self.member(guild_id, user_id).await? else {
            return Ok(false);
        };
        // The everyone role shares the guild's id.
        let everyone = RoleId::new(guild_id.get());
        let roles = self.guild_roles(guild_id).await?;
        Ok(roles.iter().any(|role| {
            (role.id == everyone || member.role_ids.contains(&role.id))
                && role.permissions & ADMINISTRATOR != 0
        }))
    }
}
