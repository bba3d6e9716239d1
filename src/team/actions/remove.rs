use chrono::Utc;

use super::{enforce, load_snapshot};
use crate::config::RosterConfig;
use crate::events::{self, TeamEvent};
use crate::policy::{evaluate, TeamIntent};
use crate::team::{Subscription, TeamMembershipRepository, TeamRepository};
use crate::RosterError;

/// Input data for removing a member from a team.
#[derive(Debug, Clone)]
pub struct RemoveFromTeamInput {
    pub team_id: u64,
    /// The acting user; must be an Admin other than the target.
    pub actor_id: u64,
    /// The member to remove.
    pub member_id: u64,
    pub subscription: Subscription,
}

/// Action to remove another member from a team.
///
/// Self-removal is rejected; it goes through
/// [`LeaveTeamAction`](super::LeaveTeamAction) instead.
pub struct RemoveFromTeamAction<T, M>
where
    T: TeamRepository,
    M: TeamMembershipRepository,
{
    team_repo: T,
    membership_repo: M,
    config: RosterConfig,
}

impl<T, M> RemoveFromTeamAction<T, M>
where
    T: TeamRepository,
    M: TeamMembershipRepository,
{
    /// Creates a new `RemoveFromTeamAction`.
    pub fn new(team_repo: T, membership_repo: M) -> Self {
        Self {
            team_repo,
            membership_repo,
            config: RosterConfig::default(),
        }
    }

    /// Removes the member.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Member removed
    /// - `Err(RosterError::Denied(_))` - The policy rejected the removal
    /// - `Err(_)` - Repository errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "remove_from_team", skip_all, err)
    )]
    pub async fn execute(&self, input: RemoveFromTeamInput) -> Result<(), RosterError> {
        let snapshot = load_snapshot(
            &self.team_repo,
            &self.membership_repo,
            input.team_id,
            input.actor_id,
            input.subscription,
        )
        .await?;

        let intent = TeamIntent::RemoveFromTeam {
            member_id: input.member_id,
        };
        enforce(evaluate(&snapshot, &intent, &self.config), false)?;

        self.membership_repo
            .delete_by_team_and_user(input.team_id, input.member_id)
            .await?;

        log::info!(
            target: "roster",
            "msg=\"member removed\", team_id={}, user_id={}, removed_by={}",
            input.team_id,
            input.member_id,
            input.actor_id
        );

        events::dispatch(TeamEvent::MemberRemoved {
            team_id: input.team_id,
            user_id: input.member_id,
            at: Utc::now(),
        })
        .await;

        Ok(())
    }
}
