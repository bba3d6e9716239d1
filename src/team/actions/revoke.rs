use chrono::Utc;

use super::{enforce, load_snapshot};
use crate::config::RosterConfig;
use crate::events::{self, TeamEvent};
use crate::policy::{evaluate, TeamIntent};
use crate::team::{
    Subscription, TeamInvitationRepository, TeamMembershipRepository, TeamRepository,
};
use crate::RosterError;

/// Input data for revoking a pending invitation.
#[derive(Debug, Clone)]
pub struct RevokeInvitationInput {
    pub team_id: u64,
    /// The acting user; must be an Admin.
    pub actor_id: u64,
    pub invitation_id: u64,
    pub subscription: Subscription,
}

/// Action to revoke a pending team invitation.
///
/// The invitation token stops resolving as soon as the record is gone;
/// an invitee holding a revoked link gets a token-invalid error.
pub struct RevokeInvitationAction<T, M, I>
where
    T: TeamRepository,
    M: TeamMembershipRepository,
    I: TeamInvitationRepository,
{
    team_repo: T,
    membership_repo: M,
    invitation_repo: I,
    config: RosterConfig,
}

impl<T, M, I> RevokeInvitationAction<T, M, I>
where
    T: TeamRepository,
    M: TeamMembershipRepository,
    I: TeamInvitationRepository,
{
    /// Creates a new `RevokeInvitationAction`.
    pub fn new(team_repo: T, membership_repo: M, invitation_repo: I) -> Self {
        Self {
            team_repo,
            membership_repo,
            invitation_repo,
            config: RosterConfig::default(),
        }
    }

    /// Deletes the pending invitation.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Invitation revoked
    /// - `Err(RosterError::Denied(_))` - The policy rejected the revocation
    /// - `Err(_)` - Repository errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "revoke_invitation", skip_all, err)
    )]
    pub async fn execute(&self, input: RevokeInvitationInput) -> Result<(), RosterError> {
        let mut snapshot = load_snapshot(
            &self.team_repo,
            &self.membership_repo,
            input.team_id,
            input.actor_id,
            input.subscription,
        )
        .await?;
        snapshot.pending_invitations = self
            .invitation_repo
            .find_pending_by_team(input.team_id)
            .await?;

        let intent = TeamIntent::RevokeInvitation {
            invitation_id: input.invitation_id,
        };
        enforce(evaluate(&snapshot, &intent, &self.config), false)?;

        self.invitation_repo.delete(input.invitation_id).await?;

        log::info!(
            target: "roster",
            "msg=\"invitation revoked\", team_id={}, invitation_id={}, revoked_by={}",
            input.team_id,
            input.invitation_id,
            input.actor_id
        );

        events::dispatch(TeamEvent::InvitationRevoked {
            team_id: input.team_id,
            invitation_id: input.invitation_id,
            at: Utc::now(),
        })
        .await;

        Ok(())
    }
}
