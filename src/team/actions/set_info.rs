use chrono::Utc;

use super::{enforce, load_snapshot};
use crate::config::RosterConfig;
use crate::events::{self, TeamEvent};
use crate::policy::{evaluate, Role, TeamIntent};
use crate::team::{
    Subscription, Team, TeamMembershipRepository, TeamRepository, UpdateTeamInfo,
};
use crate::validators::validate_team_name;
use crate::RosterError;

/// Input data for updating the team profile.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone)]
pub struct SetTeamInfoInput {
    pub team_id: u64,
    /// The acting user; must be an Admin.
    pub actor_id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub default_invite_role: Option<Role>,
    pub subscription: Subscription,
}

/// Action to update the team profile (name, description, avatar, default
/// invite role).
pub struct SetTeamInfoAction<T, M>
where
    T: TeamRepository,
    M: TeamMembershipRepository,
{
    team_repo: T,
    membership_repo: M,
    config: RosterConfig,
}

impl<T, M> SetTeamInfoAction<T, M>
where
    T: TeamRepository,
    M: TeamMembershipRepository,
{
    /// Creates a new `SetTeamInfoAction`.
    pub fn new(team_repo: T, membership_repo: M) -> Self {
        Self {
            team_repo,
            membership_repo,
            config: RosterConfig::default(),
        }
    }

    /// Applies the profile update.
    ///
    /// # Returns
    ///
    /// - `Ok(team)` - The updated team
    /// - `Err(RosterError::Validation(_))` - The new name is empty or too long
    /// - `Err(RosterError::Denied(_))` - The actor is not an Admin
    /// - `Err(_)` - Repository errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "set_team_info", skip_all, err)
    )]
    pub async fn execute(&self, input: SetTeamInfoInput) -> Result<Team, RosterError> {
        if let Some(name) = &input.name {
            validate_team_name(name)?;
        }

        let snapshot = load_snapshot(
            &self.team_repo,
            &self.membership_repo,
            input.team_id,
            input.actor_id,
            input.subscription,
        )
        .await?;

        let intent = TeamIntent::SetTeamInfo {
            name: input.name.clone(),
            description: input.description.clone(),
            avatar_url: input.avatar_url.clone(),
            default_invite_role: input.default_invite_role,
        };
        enforce(evaluate(&snapshot, &intent, &self.config), false)?;

        let team = self
            .team_repo
            .update_info(
                input.team_id,
                UpdateTeamInfo {
                    name: input.name,
                    description: input.description,
                    avatar_url: input.avatar_url,
                    default_invite_role: input.default_invite_role,
                },
            )
            .await?;

        log::info!(
            target: "roster",
            "msg=\"team info updated\", team_id={}, updated_by={}",
            team.id,
            input.actor_id
        );

        events::dispatch(TeamEvent::TeamInfoUpdated {
            team_id: team.id,
            at: Utc::now(),
        })
        .await;

        Ok(team)
    }
}
