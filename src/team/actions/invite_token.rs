use super::{enforce, load_snapshot};
use crate::config::RosterConfig;
use crate::crypto::{generate_token, hash_token};
use crate::policy::{evaluate, TeamIntent};
use crate::team::{Subscription, Team, TeamMembershipRepository, TeamRepository};
use crate::{RosterError, SecretString};

/// Output from regenerating the shareable invite-link token.
#[derive(Debug)]
pub struct RegenerateInviteTokenOutput {
    /// The team with the new token hash recorded.
    pub team: Team,
    /// The plain token to embed in the invite link (not stored, only
    /// returned once). Regenerating invalidates all previously shared
    /// links.
    pub token: SecretString,
}

/// Action to replace a team's shareable invite-link token.
pub struct RegenerateInviteTokenAction<T, M>
where
    T: TeamRepository,
    M: TeamMembershipRepository,
{
    team_repo: T,
    membership_repo: M,
    config: RosterConfig,
}

impl<T, M> RegenerateInviteTokenAction<T, M>
where
    T: TeamRepository,
    M: TeamMembershipRepository,
{
    /// Creates a new `RegenerateInviteTokenAction`.
    pub fn new(team_repo: T, membership_repo: M) -> Self {
        Self {
            team_repo,
            membership_repo,
            config: RosterConfig::default(),
        }
    }

    /// Generates and records a fresh invite-link token.
    ///
    /// # Returns
    ///
    /// - `Ok(output)` - New token recorded, plain token for the link
    /// - `Err(RosterError::Denied(_))` - The actor is not an Admin
    /// - `Err(_)` - Repository errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "regenerate_invite_token", skip_all, err)
    )]
    pub async fn execute(
        &self,
        team_id: u64,
        actor_id: u64,
        subscription: Subscription,
    ) -> Result<RegenerateInviteTokenOutput, RosterError> {
        let snapshot = load_snapshot(
            &self.team_repo,
            &self.membership_repo,
            team_id,
            actor_id,
            subscription,
        )
        .await?;

        enforce(
            evaluate(&snapshot, &TeamIntent::RegenerateInviteToken, &self.config),
            false,
        )?;

        let token = generate_token(self.config.invitation.token_length);
        let team = self
            .team_repo
            .update_invite_token(team_id, &hash_token(&token))
            .await?;

        log::info!(
            target: "roster",
            "msg=\"invite token regenerated\", team_id={}, regenerated_by={}",
            team.id,
            actor_id
        );

        Ok(RegenerateInviteTokenOutput {
            team,
            token: SecretString::new(token),
        })
    }
}

#[cfg(all(test, feature = "mocks"))]
mod tests {
    use super::*;
    use crate::policy::{DenyReason, Role};
    use crate::team::{
        CreateMembership, CreateTeam, MockTeamMembershipRepository, MockTeamRepository,
    };

    async fn setup_team(
        team_repo: &MockTeamRepository,
        membership_repo: &MockTeamMembershipRepository,
        roster: &[(u64, Role)],
    ) -> u64 {
        let team = team_repo
            .create(CreateTeam {
                name: "Test Team".to_owned(),
                description: None,
                avatar_url: None,
                created_by: roster[0].0,
                default_invite_role: Role::Viewer,
            })
            .await
            .unwrap();

        for (user_id, role) in roster {
            membership_repo
                .create(CreateMembership {
                    team_id: team.id,
                    user_id: *user_id,
                    username: format!("user-{user_id}"),
                    role: *role,
                })
                .await
                .unwrap();
        }

        team.id
    }

    #[tokio::test]
    async fn test_regenerate_success() {
        let team_repo = MockTeamRepository::new();
        let membership_repo = MockTeamMembershipRepository::new();
        let team_id = setup_team(&team_repo, &membership_repo, &[(1, Role::Admin)]).await;

        let action = RegenerateInviteTokenAction::new(team_repo, membership_repo);

        let output = action
            .execute(team_id, 1, Subscription::free())
            .await
            .unwrap();

        assert!(!output.token.expose_secret().is_empty());
        assert!(output.team.invite_token_hash.is_some());

        // the stored hash matches the returned token
        assert_eq!(
            output.team.invite_token_hash.as_deref(),
            Some(hash_token(output.token.expose_secret()).as_str())
        );
    }

    #[tokio::test]
    async fn test_regenerate_rejects_non_admin() {
        let team_repo = MockTeamRepository::new();
        let membership_repo = MockTeamMembershipRepository::new();
        let team_id = setup_team(
            &team_repo,
            &membership_repo,
            &[(1, Role::Admin), (2, Role::Editor)],
        )
        .await;

        let action = RegenerateInviteTokenAction::new(team_repo, membership_repo);

        let result = action.execute(team_id, 2, Subscription::free()).await;

        assert_eq!(
            result.unwrap_err(),
            RosterError::Denied(DenyReason::InsufficientRole)
        );
    }
}
