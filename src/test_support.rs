//! Scripted chat platform fake shared by unit tests.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{GuildId, RoleId, UserId};
use crate::gateway::{ChatError, ChatGateway, GuildMember, GuildRole, NewRole};

/// Log sink for asserting on emitted `tracing` events.
#[derive(Debug, Clone, Default)]
pub(crate) struct SharedBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Everything written so far, as text.
    pub(crate) fn contents(&self) -> String {
        self.0
            .lock()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }
}

/// Writer handed out by [`SharedBuffer`].
#[derive(Debug)]
pub(crate) struct BufferWriter(Arc<std::sync::Mutex<Vec<u8>>>);

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SharedBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter(Arc::clone(&self.0))
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Mutable state behind [`FakeGateway`]. Tests poke at it directly.
#[derive(Debug, Default)]
pub(crate) struct FakeState {
    pub owner: UserId,
    pub roles: Vec<GuildRole>,
    pub members: HashMap<UserId, GuildMember>,
    pub next_role_id: u64,
    /// Failure returned when creating a role with this name.
    pub fail_create: HashMap<String, ChatError>,
    pub fail_move: Option<ChatError>,
    pub fail_delete: HashMap<RoleId, ChatError>,
    pub fail_remove: HashMap<RoleId, ChatError>,
    pub fail_add: Option<ChatError>,
    /// Every mutating call, in order, e.g. `"remove:11:20"`.
    pub calls: Vec<String>,
}

/// Single-guild, in-memory [`ChatGateway`].
#[derive(Debug)]
pub(crate) struct FakeGateway {
    state: Mutex<FakeState>,
}

impl FakeGateway {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                owner: UserId::new(1),
                next_role_id: 1000,
                ..FakeState::default()
            }),
        }
    }

    pub(crate) async fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().await
    }

    pub(crate) async fn add_role(&self, id: u64, name: &str, position: i32, permissions: u64) {
        self.state.lock().await.roles.push(GuildRole {
            id: RoleId::new(id),
            name: name.to_string(),
            position,
            permissions,
            color: 0,
        });
    }

    pub(crate) async fn add_member(&self, id: u64, name: &str, roles: &[u64]) {
        self.state.lock().await.members.insert(
            UserId::new(id),
            GuildMember {
                user_id: UserId::new(id),
                display_name: name.to_string(),
                role_ids: roles.iter().copied().map(RoleId::new).collect(),
            },
        );
    }

    pub(crate) async fn member_roles(&self, id: u64) -> Vec<RoleId> {
        self.state
            .lock()
            .await
            .members
            .get(&UserId::new(id))
            .map(|m| m.role_ids.clone())
            .unwrap_or_default()
    }

    pub(crate) async fn role_names(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .roles
            .iter()
            .map(|r| r.name.clone())
            .collect()
    }
}

#[async_trait]
impl ChatGateway for FakeGateway {
    async fn guild_owner(&self, _guild_id: GuildId) -> Result<UserId, ChatError> {
        Ok(self.state.lock().await.owner)
    }

    async fn guild_roles(&self, _guild_id: GuildId) -> Result<Vec<GuildRole>, ChatError> {
        Ok(self.state.lock().await.roles.clone())
    }

    async fn create_role(
        &self,
        _guild_id: GuildId,
        role: &NewRole,
        _reason: &str,
    ) -> Result<GuildRole, ChatError> {
        let mut state = self.state.lock().await;
        if let Some(err) = state.fail_create.get(&role.name) {
            return Err(err.clone());
        }
        state.next_role_id += 1;
        let created = GuildRole {
            id: RoleId::new(state.next_role_id),
            name: role.name.clone(),
            position: 1,
            permissions: 0,
            color: role.color,
        };
        state.calls.push(format!("create:{}", role.name));
        state.roles.push(created.clone());
        Ok(created)
    }

    async fn move_role(
        &self,
        _guild_id: GuildId,
        role_id: RoleId,
        position: i32,
    ) -> Result<(), ChatError> {
        let mut state = self.state.lock().await;
        if let Some(err) = state.fail_move.clone() {
            return Err(err);
        }
        state.calls.push(format!("move:{role_id}:{position}"));
        if let Some(role) = state.roles.iter_mut().find(|r| r.id == role_id) {
            role.position = position;
        }
        Ok(())
    }

    async fn delete_role(
        &self,
        _guild_id: GuildId,
        role_id: RoleId,
        _reason: &str,
    ) -> Result<(), ChatError> {
        let mut state = self.state.lock().await;
        if let Some(err) = state.fail_delete.get(&role_id) {
            return Err(err.clone());
        }
        let before = state.roles.len();
        state.roles.retain(|r| r.id != role_id);
        if state.roles.len() == before {
            return Err(ChatError::UnknownResource("Unknown Role".to_string()));
        }
        state.calls.push(format!("delete:{role_id}"));
        Ok(())
    }

    async fn member(
        &self,
        _guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Option<GuildMember>, ChatError> {
        Ok(self.state.lock().await.members.get(&user_id).cloned())
    }

    async fn add_member_role(
        &self,
        _guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        _reason: &str,
    ) -> Result<(), ChatError> {
        let mut state = self.state.lock().await;
        if let Some(err) = state.fail_add.clone() {
            return Err(err);
        }
        state.calls.push(format!("add:{role_id}:{user_id}"));
        let member = state
            .members
            .get_mut(&user_id)
            .ok_or_else(|| ChatError::UnknownResource("Unknown Member".to_string()))?;
        if !member.role_ids.contains(&role_id) {
            member.role_ids.push(role_id);
        }
        Ok(())
    }

    async fn remove_member_role(
        &self,
        _guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        _reason: &str,
    ) -> Result<(), ChatError> {
        let mut state = self.state.lock().await;
        if let Some(err) = state.fail_remove.get(&role_id) {
            return Err(err.clone());
        }
        state.calls.push(format!("remove:{role_id}:{user_id}"));
        let member = state
            .members
            .get_mut(&user_id)
            .ok_or_else(|| ChatError::UnknownResource("Unknown Member".to_string()))?;
        member.role_ids.retain(|r| *r != role_id);
        Ok(())
    }
}
