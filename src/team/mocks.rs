#![allow(clippy::significant_drop_tightening)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use super::repository::{
    CreateInvitation, CreateMembership, CreateTeam, TeamInvitationRepository,
    TeamMembershipRepository, TeamRepository, UpdateTeamInfo,
};
use super::types::{Team, TeamInvitation, TeamMember};
use crate::policy::Role;
use crate::RosterError;

/// In-memory team store. Clones share the same underlying state, so one
/// handle can seed fixtures while another is moved into an action.
#[derive(Clone, Default)]
pub struct MockTeamRepository {
    inner: Arc<TeamState>,
}

#[derive(Default)]
struct TeamState {
    teams: RwLock<HashMap<u64, Team>>,
    next_id: AtomicU64,
}

impl MockTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamRepository for MockTeamRepository {
    async fn create(&self, data: CreateTeam) -> Result<Team, RosterError> {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let team = Team {
            id,
            name: data.name,
            description: data.description,
            avatar_url: data.avatar_url,
            created_by: data.created_by,
            default_invite_role: data.default_invite_role,
            invite_token_hash: None,
            created_at: now,
            updated_at: now,
        };

        let mut teams = self
            .inner
            .teams
            .write()
            .map_err(|_| RosterError::Internal("lock poisoned".into()))?;
        teams.insert(id, team.clone());

        Ok(team)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Team>, RosterError> {
        let teams = self
            .inner
            .teams
            .read()
            .map_err(|_| RosterError::Internal("lock poisoned".into()))?;
        Ok(teams.get(&id).cloned())
    }

    async fn update_info(&self, id: u64, patch: UpdateTeamInfo) -> Result<Team, RosterError> {
        let mut teams = self
            .inner
            .teams
            .write()
            .map_err(|_| RosterError::Internal("lock poisoned".into()))?;

        let team = teams.get_mut(&id).ok_or(RosterError::TeamNotFound)?;

        if let Some(name) = patch.name {
            team.name = name;
        }
        if let Some(description) = patch.description {
            team.description = Some(description);
        }
        if let Some(avatar_url) = patch.avatar_url {
            team.avatar_url = Some(avatar_url);
        }
        if let Some(role) = patch.default_invite_role {
            team.default_invite_role = role;
        }
        team.updated_at = Utc::now();

        Ok(team.clone())
    }

    async fn update_invite_token(&self, id: u64, token_hash: &str) -> Result<Team, RosterError> {
        let mut teams = self
            .inner
            .teams
            .write()
            .map_err(|_| RosterError::Internal("lock poisoned".into()))?;

        let team = teams.get_mut(&id).ok_or(RosterError::TeamNotFound)?;
        team.invite_token_hash = Some(token_hash.to_owned());
        team.updated_at = Utc::now();

        Ok(team.clone())
    }
}

/// In-memory membership store; clones share state.
#[derive(Clone, Default)]
pub struct MockTeamMembershipRepository {
    inner: Arc<MembershipState>,
}

#[derive(Default)]
struct MembershipState {
    memberships: RwLock<HashMap<u64, TeamMember>>,
    next_id: AtomicU64,
}

impl MockTeamMembershipRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamMembershipRepository for MockTeamMembershipRepository {
    async fn create(&self, data: CreateMembership) -> Result<TeamMember, RosterError> {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let member = TeamMember {
            id,
            team_id: data.team_id,
            user_id: data.user_id,
            username: data.username,
            role: data.role,
            created_at: now,
            updated_at: now,
        };

        let mut memberships = self
            .inner
            .memberships
            .write()
            .map_err(|_| RosterError::Internal("lock poisoned".into()))?;
        memberships.insert(id, member.clone());

        Ok(member)
    }

    async fn find_by_team(&self, team_id: u64) -> Result<Vec<TeamMember>, RosterError> {
        let memberships = self
            .inner
            .memberships
            .read()
            .map_err(|_| RosterError::Internal("lock poisoned".into()))?;
        Ok(memberships
            .values()
            .filter(|m| m.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn find_by_team_and_user(
        &self,
        team_id: u64,
        user_id: u64,
    ) -> Result<Option<TeamMember>, RosterError> {
        let memberships = self
            .inner
            .memberships
            .read()
            .map_err(|_| RosterError::Internal("lock poisoned".into()))?;
        Ok(memberships
            .values()
            .find(|m| m.team_id == team_id && m.user_id == user_id)
            .cloned())
    }

    async fn update_role(
        &self,
        team_id: u64,
        user_id: u64,
        role: Role,
    ) -> Result<TeamMember, RosterError> {
        let mut memberships = self
            .inner
            .memberships
            .write()
            .map_err(|_| RosterError::Internal("lock poisoned".into()))?;

        let member = memberships
            .values_mut()
            .find(|m| m.team_id == team_id && m.user_id == user_id)
            .ok_or(RosterError::MemberNotFound)?;

        member.role = role;
        member.updated_at = Utc::now();

        Ok(member.clone())
    }

    async fn delete_by_team_and_user(
        &self,
        team_id: u64,
        user_id: u64,
    ) -> Result<(), RosterError> {
        let mut memberships = self
            .inner
            .memberships
            .write()
            .map_err(|_| RosterError::Internal("lock poisoned".into()))?;
        memberships.retain(|_, m| !(m.team_id == team_id && m.user_id == user_id));
        Ok(())
    }
}

/// In-memory invitation store; clones share state.
#[derive(Clone, Default)]
pub struct MockTeamInvitationRepository {
    inner: Arc<InvitationState>,
}

#[derive(Default)]
struct InvitationState {
    invitations: RwLock<HashMap<u64, TeamInvitation>>,
    next_id: AtomicU64,
}

impl MockTeamInvitationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamInvitationRepository for MockTeamInvitationRepository {
    async fn create(&self, data: CreateInvitation) -> Result<TeamInvitation, RosterError> {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let invitation = TeamInvitation {
            id,
            team_id: data.team_id,
            email: data.email,
            role: data.role,
            token_hash: data.token_hash,
            invited_by: data.invited_by,
            expires_at: data.expires_at,
            accepted_at: None,
            created_at: Utc::now(),
        };

        let mut invitations = self
            .inner
            .invitations
            .write()
            .map_err(|_| RosterError::Internal("lock poisoned".into()))?;
        invitations.insert(id, invitation.clone());

        Ok(invitation)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<TeamInvitation>, RosterError> {
        let invitations = self
            .inner
            .invitations
            .read()
            .map_err(|_| RosterError::Internal("lock poisoned".into()))?;
        Ok(invitations.get(&id).cloned())
    }

    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<TeamInvitation>, RosterError> {
        let invitations = self
            .inner
            .invitations
            .read()
            .map_err(|_| RosterError::Internal("lock poisoned".into()))?;
        Ok(invitations
            .values()
            .find(|i| i.token_hash == token_hash)
            .cloned())
    }

    async fn find_pending_by_team(
        &self,
        team_id: u64,
    ) -> Result<Vec<TeamInvitation>, RosterError> {
        let invitations = self
            .inner
            .invitations
            .read()
            .map_err(|_| RosterError::Internal("lock poisoned".into()))?;
        Ok(invitations
            .values()
            .filter(|i| i.team_id == team_id && !i.is_accepted() && !i.is_expired())
            .cloned()
            .collect())
    }

    async fn mark_accepted(&self, id: u64) -> Result<TeamInvitation, RosterError> {
        let mut invitations = self
            .inner
            .invitations
            .write()
            .map_err(|_| RosterError::Internal("lock poisoned".into()))?;

        let invitation = invitations
            .get_mut(&id)
            .ok_or(RosterError::InvitationNotFound)?;
        invitation.accepted_at = Some(Utc::now());

        Ok(invitation.clone())
    }

    async fn delete(&self, id: u64) -> Result<(), RosterError> {
        let mut invitations = self
            .inner
            .invitations
            .write()
            .map_err(|_| RosterError::Internal("lock poisoned".into()))?;
        invitations
            .remove(&id)
            .ok_or(RosterError::InvitationNotFound)?;
        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64, RosterError> {
        let mut invitations = self
            .inner
            .invitations
            .write()
            .map_err(|_| RosterError::Internal("lock poisoned".into()))?;
        let before = invitations.len();
        invitations.retain(|_, i| !i.is_expired());
        Ok((before - invitations.len()) as u64)
    }
}
