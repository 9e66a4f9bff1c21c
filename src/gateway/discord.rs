//! Discord REST implementation of [`ChatGateway`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::{ChatError, ChatGateway, GuildMember, GuildRole, NewRole};
use crate::domain::{GuildId, RoleId, UserId};

/// Default Discord REST base URL.
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

const AUDIT_REASON_HEADER: &str = "X-Audit-Log-Reason";

/// Discord REST client authenticated as a bot user.
#[derive(Debug, Clone)]
pub struct DiscordClient {
    http: Client,
    api_base: String,
    token: String,
}

impl DiscordClient {
    /// Creates a client for the given API base URL and bot token.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        api_base: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ChatError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("holi-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChatError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ChatError> {
        let response = request
            .header("Authorization", format!("Bot {}", self.token))
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), %body, "discord request failed");
        Err(match status {
            StatusCode::FORBIDDEN => ChatError::Forbidden(body),
            StatusCode::NOT_FOUND => ChatError::UnknownResource(body),
            other => ChatError::Http {
                status: other.as_u16(),
                body,
            },
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ChatError> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ChatError::Decode(e.to_string()))
    }
}

// ── Wire Types ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GuildWire {
    owner_id: String,
}

#[derive(Debug, Deserialize)]
struct RoleWire {
    id: String,
    name: String,
    position: i32,
    permissions: String,
    #[serde(default)]
    color: u32,
}

#[derive(Debug, Deserialize)]
struct UserWire {
    id: String,
    username: String,
    global_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MemberWire {
    user: Option<UserWire>,
    nick: Option<String>,
    #[serde(default)]
    roles: Vec<String>,
}

fn parse_snowflake<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, ChatError> {
    raw.parse()
        .map_err(|_| ChatError::Decode(format!("invalid {what} id: {raw}")))
}

impl TryFrom<RoleWire> for GuildRole {
    type Error = ChatError;

    fn try_from(wire: RoleWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_snowflake(&wire.id, "role")?,
            name: wire.name,
            position: wire.position,
            permissions: wire.permissions.parse().map_err(|_| {
                ChatError::Decode(format!("invalid permissions: {}", wire.permissions))
            })?,
            color: wire.color,
        })
    }
}

impl MemberWire {
    fn into_member(self, user_id: UserId) -> Result<GuildMember, ChatError> {
        let role_ids = self
            .roles
            .iter()
            .map(|raw| parse_snowflake(raw, "role"))
            .collect::<Result<Vec<RoleId>, _>>()?;
        let (user_id, display_name) = match self.user {
            Some(user) => {
                let name = self
                    .nick
                    .or(user.global_name)
                    .unwrap_or(user.username);
                (parse_snowflake(&user.id, "user")?, name)
            }
            None => (user_id, self.nick.unwrap_or_else(|| format!("User({user_id})"))),
        };
        Ok(GuildMember {
            user_id,
            display_name,
            role_ids,
        })
    }
}

#[async_trait]
impl ChatGateway for DiscordClient {
    async fn guild_owner(&self, guild_id: GuildId) -> Result<UserId, ChatError> {
        let guild: GuildWire = self
            .send_json(self.http.get(self.url(&format!("/guilds/{guild_id}"))))
            .await?;
        parse_snowflake(&guild.owner_id, "user")
    }

    async fn guild_roles(&self, guild_id: GuildId) -> Result<Vec<GuildRole>, ChatError> {
        let roles: Vec<RoleWire> = self
            .send_json(self.http.get(self.url(&format!("/guilds/{guild_id}/roles"))))
            .await?;
        roles.into_iter().map(GuildRole::try_from).collect()
    }

    async fn create_role(
        &self,
        guild_id: GuildId,
        role: &NewRole,
        reason: &str,
    ) -> Result<GuildRole, ChatError> {
        let request = self
            .http
            .post(self.url(&format!("/guilds/{guild_id}/roles")))
            .header(AUDIT_REASON_HEADER, reason)
            .json(&json!({
                "name": role.name,
                "color": role.color,
                "hoist": false,
                "mentionable": false,
            }));
        let created: RoleWire = self.send_json(request).await?;
        GuildRole::try_from(created)
    }

    async fn move_role(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
        position: i32,
    ) -> Result<(), ChatError> {
        let request = self
            .http
            .patch(self.url(&format!("/guilds/{guild_id}/roles")))
            .json(&json!([{ "id": role_id.to_string(), "position": position }]));
        self.send(request).await?;
        Ok(())
    }

    async fn delete_role(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), ChatError> {
        let request = self
            .http
            .delete(self.url(&format!("/guilds/{guild_id}/roles/{role_id}")))
            .header(AUDIT_REASON_HEADER, reason);
        self.send(request).await?;
        Ok(())
    }

    async fn member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Option<GuildMember>, ChatError> {
        let request = self
            .http
            .get(self.url(&format!("/guilds/{guild_id}/members/{user_id}")));
        match self.send_json::<MemberWire>(request).await {
            Ok(wire) => wire.into_member(user_id).map(Some),
            Err(ChatError::UnknownResource(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), ChatError> {
        let request = self
            .http
            .put(self.url(&format!(
                "/guilds/{guild_id}/members/{user_id}/roles/{role_id}"
            )))
            .header(AUDIT_REASON_HEADER, reason);
        self.send(request).await?;
        Ok(())
    }

    async fn remove_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), ChatError> {
        let request = self
            .http
            .delete(self.url(&format!(
                "/guilds/{guild_id}/members/{user_id}/roles/{role_id}"
            )))
            .header(AUDIT_REASON_HEADER, reason);
        self.send(request).await?;
        Ok(())
    }
}
