use chrono::Utc;

use crate::config::RosterConfig;
use crate::crypto::hash_token;
use crate::events::{self, TeamEvent};
use crate::policy::{SeatState, SeatUsage};
use crate::team::{
    CreateMembership, Subscription, TeamInvitationRepository, TeamMember,
    TeamMembershipRepository,
};
use crate::{RosterError, SecretString};

/// Input data for accepting a team invitation.
#[derive(Debug, Clone)]
pub struct AcceptInvitationInput {
    /// The invitation token (plain text, as sent to the invitee).
    pub token: SecretString,
    /// The user accepting the invitation.
    pub user_id: u64,
    /// Display name to record on the membership.
    pub username: String,
    /// Email of the accepting user; must match the invitation.
    pub email: String,
    /// The team's subscription as reported by the billing system.
    pub subscription: Subscription,
}

/// Action to accept a team invitation.
///
/// This action:
/// 1. Resolves the token by its hash
/// 2. Verifies the invitation belongs to the user's email
/// 3. Checks invitation is not expired or already accepted
/// 4. Re-checks the free-plan seat cap for billable roles
/// 5. Creates the team membership
/// 6. Marks the invitation as accepted
pub struct AcceptInvitationAction<I, M>
where
    I: TeamInvitationRepository,
    M: TeamMembershipRepository,
{
    invitation_repo: I,
    membership_repo: M,
    config: RosterConfig,
}

impl<I, M> AcceptInvitationAction<I, M>
where
    I: TeamInvitationRepository,
    M: TeamMembershipRepository,
{
    /// Creates a new `AcceptInvitationAction` with default configuration.
    pub fn new(invitation_repo: I, membership_repo: M) -> Self {
        Self {
            invitation_repo,
            membership_repo,
            config: RosterConfig::default(),
        }
    }

    /// Creates a new `AcceptInvitationAction` with custom configuration.
    pub fn with_config(invitation_repo: I, membership_repo: M, config: RosterConfig) -> Self {
        Self {
            invitation_repo,
            membership_repo,
            config,
        }
    }

    /// Accepts a team invitation using the provided token.
    ///
    /// # Returns
    ///
    /// - `Ok(membership)` - Invitation accepted, user added to team
    /// - `Err(RosterError::TokenInvalid)` - Token not found
    /// - `Err(RosterError::TokenExpired)` - Invitation has expired
    /// - `Err(RosterError::EmailMismatch)` - User's email doesn't match invitation
    /// - `Err(RosterError::InvitationAlreadyAccepted)` - Invitation already used
    /// - `Err(RosterError::AlreadyMember)` - User already in team
    /// - `Err(RosterError::SeatLimitReached)` - Billable role, but the
    ///   team filled its free-plan cap since the invite was sent
    /// - `Err(_)` - Repository errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "accept_invitation", skip_all, err)
    )]
    pub async fn execute(&self, input: AcceptInvitationInput) -> Result<TeamMember, RosterError> {
        // hash the token to find it
        let token_hash = hash_token(input.token.expose_secret());

        let invitation = self
            .invitation_repo
            .find_by_token_hash(&token_hash)
            .await?
            .ok_or(RosterError::TokenInvalid)?;

        // verify email matches
        if invitation.email != input.email {
            return Err(RosterError::EmailMismatch);
        }

        // check not expired
        if invitation.is_expired() {
            return Err(RosterError::TokenExpired);
        }

        // check not already accepted
        if invitation.is_accepted() {
            return Err(RosterError::InvitationAlreadyAccepted);
        }

        // check user is not already a member
        if self
            .membership_repo
            .find_by_team_and_user(invitation.team_id, input.user_id)
            .await?
            .is_some()
        {
            return Err(RosterError::AlreadyMember);
        }

        // the roster may have filled up since the invite was sent
        if invitation.role.is_billable() {
            let members = self.membership_repo.find_by_team(invitation.team_id).await?;
            let billable = members.iter().filter(|m| m.role.is_billable()).count() as u32;
            let usage = SeatUsage::new(input.subscription.seats, billable);
            if SeatState::derive(input.subscription.plan, usage, &self.config.seats).is_at_limit()
            {
                return Err(RosterError::SeatLimitReached);
            }
        }

        let membership = self
            .membership_repo
            .create(CreateMembership {
                team_id: invitation.team_id,
                user_id: input.user_id,
                username: input.username,
                role: invitation.role,
            })
            .await?;

        // mark invitation as accepted (log error but don't fail)
        if let Err(e) = self.invitation_repo.mark_accepted(invitation.id).await {
            log::error!(
                target: "roster",
                "msg=\"failed to mark invitation as accepted\", invitation_id={}, error=\"{e}\"",
                invitation.id
            );
        }

        log::info!(
            target: "roster",
            "msg=\"invitation accepted\", team_id={}, user_id={}, role={}",
            membership.team_id,
            membership.user_id,
            membership.role.as_str()
        );

        events::dispatch(TeamEvent::InvitationAccepted {
            team_id: membership.team_id,
            user_id: membership.user_id,
            at: Utc::now(),
        })
        .await;

        Ok(membership)
    }
}
