use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::types::{Team, TeamInvitation, TeamMember};
use crate::policy::Role;
use crate::RosterError;

#[derive(Debug, Clone)]
pub struct CreateTeam {
    pub name: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub created_by: u64,
    pub default_invite_role: Role,
}

/// Partial team-profile update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTeamInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub default_invite_role: Option<Role>,
}

#[derive(Debug, Clone)]
pub struct CreateMembership {
    pub team_id: u64,
    pub user_id: u64,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct CreateInvitation {
    pub team_id: u64,
    pub email: String,
    pub role: Role,
    pub token_hash: String,
    pub invited_by: u64,
    pub expires_at: DateTime<Utc>,
}

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn create(&self, data: CreateTeam) -> Result<Team, RosterError>;
    async fn find_by_id(&self, id: u64) -> Result<Option<Team>, RosterError>;
    async fn update_info(&self, id: u64, patch: UpdateTeamInfo) -> Result<Team, RosterError>;
    async fn update_invite_token(&self, id: u64, token_hash: &str) -> Result<Team, RosterError>;
}

#[async_trait]
pub trait TeamMembershipRepository: Send + Sync {
    async fn create(&self, data: CreateMembership) -> Result<TeamMember, RosterError>;
    async fn find_by_team(&self, team_id: u64) -> Result<Vec<TeamMember>, RosterError>;
    async fn find_by_team_and_user(
        &self,
        team_id: u64,
        user_id: u64,
    ) -> Result<Option<TeamMember>, RosterError>;
    async fn update_role(
        &self,
        team_id: u64,
        user_id: u64,
        role: Role,
    ) -> Result<TeamMember, RosterError>;
    async fn delete_by_team_and_user(&self, team_id: u64, user_id: u64)
        -> Result<(), RosterError>;
}

#[async_trait]
pub trait TeamInvitationRepository: Send + Sync {
    async fn create(&self, data: CreateInvitation) -> Result<TeamInvitation, RosterError>;
    async fn find_by_id(&self, id: u64) -> Result<Option<TeamInvitation>, RosterError>;
    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<TeamInvitation>, RosterError>;
    async fn find_pending_by_team(&self, team_id: u64) -> Result<Vec<TeamInvitation>, RosterError>;
    async fn mark_accepted(&self, id: u64) -> Result<TeamInvitation, RosterError>;
    async fn delete(&self, id: u64) -> Result<(), RosterError>;
    async fn delete_expired(&self) -> Result<u64, RosterError>;
}
