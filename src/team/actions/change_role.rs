use chrono::Utc;

use super::{enforce, load_snapshot};
use crate::config::RosterConfig;
use crate::events::{self, TeamEvent};
use crate::policy::{evaluate, Role, TeamIntent};
use crate::team::{Subscription, TeamMember, TeamMembershipRepository, TeamRepository};
use crate::RosterError;

/// Input data for changing a member's role.
#[derive(Debug, Clone)]
pub struct ChangeRoleInput {
    pub team_id: u64,
    /// The acting user; must be an Admin other than the target.
    pub actor_id: u64,
    /// The member whose role changes.
    pub member_id: u64,
    pub role: Role,
    pub subscription: Subscription,
    /// Set after the external seat-purchase dialog has been accepted.
    pub seat_purchase_confirmed: bool,
}

/// Action to change an existing member's role.
///
/// Self-management is rejected here; a user changes their own standing only
/// through [`LeaveTeamAction`](super::LeaveTeamAction). Promoting a Viewer
/// on a full Pro team consumes a new seat and goes through the
/// payment-confirmation gate first.
pub struct ChangeRoleAction<T, M>
where
    T: TeamRepository,
    M: TeamMembershipRepository,
{
    team_repo: T,
    membership_repo: M,
    config: RosterConfig,
}

impl<T, M> ChangeRoleAction<T, M>
where
    T: TeamRepository,
    M: TeamMembershipRepository,
{
    /// Creates a new `ChangeRoleAction` with default configuration.
    pub fn new(team_repo: T, membership_repo: M) -> Self {
        Self {
            team_repo,
            membership_repo,
            config: RosterConfig::default(),
        }
    }

    /// Creates a new `ChangeRoleAction` with custom configuration.
    pub fn with_config(team_repo: T, membership_repo: M, config: RosterConfig) -> Self {
        Self {
            team_repo,
            membership_repo,
            config,
        }
    }

    /// Applies the role change.
    ///
    /// # Returns
    ///
    /// - `Ok(membership)` - The updated membership
    /// - `Err(RosterError::Denied(_))` - The policy rejected the change
    /// - `Err(RosterError::PaymentConfirmationRequired)` - Promoting this
    ///   Viewer consumes an unpaid seat and the confirmation flag was not set
    /// - `Err(_)` - Repository errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "change_role", skip_all, err)
    )]
    pub async fn execute(&self, input: ChangeRoleInput) -> Result<TeamMember, RosterError> {
        let snapshot = load_snapshot(
            &self.team_repo,
            &self.membership_repo,
            input.team_id,
            input.actor_id,
            input.subscription,
        )
        .await?;

        let intent = TeamIntent::ChangeRole {
            member_id: input.member_id,
            role: input.role,
        };
        enforce(
            evaluate(&snapshot, &intent, &self.config),
            input.seat_purchase_confirmed,
        )?;

        let membership = self
            .membership_repo
            .update_role(input.team_id, input.member_id, input.role)
            .await?;

        log::info!(
            target: "roster",
            "msg=\"role changed\", team_id={}, user_id={}, role={}",
            membership.team_id,
            membership.user_id,
            membership.role.as_str()
        );

        events::dispatch(TeamEvent::RoleChanged {
            team_id: membership.team_id,
            user_id: membership.user_id,
            role: membership.role,
            at: Utc::now(),
        })
        .await;

        Ok(membership)
    }
}

#[cfg(all(test, feature = "mocks"))]
mod tests {
    use super::*;
    use crate::policy::DenyReason;
    use crate::team::{
        BillingInterval, CreateMembership, CreateTeam, MockTeamMembershipRepository,
        MockTeamRepository,
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
    async fn test_change_role_success() {
        let team_repo = MockTeamRepository::new();
        let membership_repo = MockTeamMembershipRepository::new();
        let team_id = setup_team(
            &team_repo,
            &membership_repo,
            &[(1, Role::Admin), (2, Role::Viewer)],
        )
        .await;

        let action = ChangeRoleAction::new(team_repo, membership_repo);

        let membership = action
            .execute(ChangeRoleInput {
                team_id,
                actor_id: 1,
                member_id: 2,
                role: Role::Editor,
                subscription: Subscription::free(),
                seat_purchase_confirmed: false,
            })
            .await
            .unwrap();

        assert_eq!(membership.role, Role::Editor);
    }

    #[tokio::test]
    async fn test_change_role_rejects_non_admin() {
        let team_repo = MockTeamRepository::new();
        let membership_repo = MockTeamMembershipRepository::new();
        let team_id = setup_team(
            &team_repo,
            &membership_repo,
            &[(1, Role::Admin), (2, Role::Editor), (3, Role::Viewer)],
        )
        .await;

        let action = ChangeRoleAction::new(team_repo, membership_repo);

        let result = action
            .execute(ChangeRoleInput {
                team_id,
                actor_id: 2,
                member_id: 3,
                role: Role::Editor,
                subscription: Subscription::free(),
                seat_purchase_confirmed: false,
            })
            .await;

        assert_eq!(
            result.unwrap_err(),
            RosterError::Denied(DenyReason::InsufficientRole)
        );
    }

    #[tokio::test]
    async fn test_change_role_rejects_self() {
        let team_repo = MockTeamRepository::new();
        let membership_repo = MockTeamMembershipRepository::new();
        let team_id = setup_team(
            &team_repo,
            &membership_repo,
            &[(1, Role::Admin), (2, Role::Editor)],
        )
        .await;

        let action = ChangeRoleAction::new(team_repo, membership_repo);

        let result = action
            .execute(ChangeRoleInput {
                team_id,
                actor_id: 1,
                member_id: 1,
                role: Role::Editor,
                subscription: Subscription::free(),
                seat_purchase_confirmed: false,
            })
            .await;

        assert_eq!(
            result.unwrap_err(),
            RosterError::Denied(DenyReason::CannotTargetSelf)
        );
    }

    #[tokio::test]
    async fn test_promote_viewer_on_full_pro_team() {
        let team_repo = MockTeamRepository::new();
        let membership_repo = MockTeamMembershipRepository::new();
        let team_id = setup_team(
            &team_repo,
            &membership_repo,
            &[(1, Role::Admin), (2, Role::Editor), (3, Role::Viewer)],
        )
        .await;

        let action = ChangeRoleAction::new(team_repo, membership_repo);
        let subscription = Subscription::pro(2, BillingInterval::Monthly);

        // 2 seats, 2 billable: promotion needs the confirmation flag
        let result = action
            .execute(ChangeRoleInput {
                team_id,
                actor_id: 1,
                member_id: 3,
                role: Role::Editor,
                subscription,
                seat_purchase_confirmed: false,
            })
            .await;
        assert_eq!(
            result.unwrap_err(),
            RosterError::PaymentConfirmationRequired
        );

        let membership = action
            .execute(ChangeRoleInput {
                team_id,
                actor_id: 1,
                member_id: 3,
                role: Role::Editor,
                subscription,
                seat_purchase_confirmed: true,
            })
            .await
            .unwrap();
        assert_eq!(membership.role, Role::Editor);
    }
}
