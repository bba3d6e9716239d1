use chrono::Utc;

use super::{enforce, load_snapshot};
use crate::config::RosterConfig;
use crate::events::{self, TeamEvent};
use crate::policy::{evaluate, TeamIntent};
use crate::team::{Subscription, TeamMembershipRepository, TeamRepository};
use crate::RosterError;

/// Input data for leaving a team.
#[derive(Debug, Clone)]
pub struct LeaveTeamInput {
    pub team_id: u64,
    /// The user leaving their own membership behind.
    pub actor_id: u64,
    pub subscription: Subscription,
}

/// Action for a member to leave a team.
///
/// This is the only path through which a user's own membership ends; the
/// role-change and removal actions refuse self-targets. The last Admin of
/// a team cannot leave.
pub struct LeaveTeamAction<T, M>
where
    T: TeamRepository,
    M: TeamMembershipRepository,
{
    team_repo: T,
    membership_repo: M,
    config: RosterConfig,
}

impl<T, M> LeaveTeamAction<T, M>
where
    T: TeamRepository,
    M: TeamMembershipRepository,
{
    /// Creates a new `LeaveTeamAction`.
    pub fn new(team_repo: T, membership_repo: M) -> Self {
        Self {
            team_repo,
            membership_repo,
            config: RosterConfig::default(),
        }
    }

    /// Removes the actor's own membership.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Membership removed
    /// - `Err(RosterError::Denied(DenyReason::LastAdmin))` - The actor is
    ///   the team's only Admin
    /// - `Err(RosterError::Denied(DenyReason::NotAMember))` - The actor is
    ///   not on the roster
    /// - `Err(_)` - Repository errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "leave_team", skip_all, err)
    )]
    pub async fn execute(&self, input: LeaveTeamInput) -> Result<(), RosterError> {
        let snapshot = load_snapshot(
            &self.team_repo,
            &self.membership_repo,
            input.team_id,
            input.actor_id,
            input.subscription,
        )
        .await?;

        enforce(
            evaluate(&snapshot, &TeamIntent::LeaveTeam, &self.config),
            false,
        )?;

        self.membership_repo
            .delete_by_team_and_user(input.team_id, input.actor_id)
            .await?;

        log::info!(
            target: "roster",
            "msg=\"member left\", team_id={}, user_id={}",
            input.team_id,
            input.actor_id
        );

        events::dispatch(TeamEvent::MemberLeft {
            team_id: input.team_id,
            user_id: input.actor_id,
            at: Utc::now(),
        })
        .await;

        Ok(())
    }
}
