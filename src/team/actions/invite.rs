use chrono::{Duration, Utc};

use super::{enforce, load_snapshot};
use crate::config::RosterConfig;
use crate::crypto::{generate_token, hash_token};
use crate::events::{self, TeamEvent};
use crate::policy::{evaluate, Role, TeamIntent};
use crate::team::{
    CreateInvitation, Subscription, TeamInvitation, TeamInvitationRepository,
    TeamMembershipRepository, TeamRepository,
};
use crate::validators::validate_email;
use crate::{RosterError, SecretString};

/// Input data for creating a team invitation.
#[derive(Debug, Clone)]
pub struct InviteToTeamInput {
    pub team_id: u64,
    /// The acting user; must be on the roster with a role that may grant
    /// `role`.
    pub actor_id: u64,
    pub email: String,
    pub role: Role,
    /// The team's subscription as reported by the billing system.
    pub subscription: Subscription,
    /// Set after the external seat-purchase dialog has been accepted.
    pub seat_purchase_confirmed: bool,
}

/// Output from creating a team invitation.
#[derive(Debug)]
pub struct InviteToTeamOutput {
    /// The created invitation record.
    pub invitation: TeamInvitation,
    /// The plain token to send to the invitee (not stored, only returned once).
    pub token: SecretString,
}

/// Action to invite a user to a team.
///
/// This action:
/// 1. Validates the invitee email
/// 2. Evaluates the invite intent against a fresh snapshot (actor role,
///    invitable roles, seat limits, payment confirmation)
/// 3. Generates a secure invitation token
/// 4. Creates the invitation record
///
/// The returned token should be sent to the invitee (e.g., via email).
/// The token is hashed before storage and cannot be retrieved later.
pub struct InviteToTeamAction<T, M, I>
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

impl<T, M, I> InviteToTeamAction<T, M, I>
where
    T: TeamRepository,
    M: TeamMembershipRepository,
    I: TeamInvitationRepository,
{
    /// Creates a new `InviteToTeamAction` with default configuration.
    pub fn new(team_repo: T, membership_repo: M, invitation_repo: I) -> Self {
        Self {
            team_repo,
            membership_repo,
            invitation_repo,
            config: RosterConfig::default(),
        }
    }

    /// Creates a new `InviteToTeamAction` with custom configuration.
    pub fn with_config(
        team_repo: T,
        membership_repo: M,
        invitation_repo: I,
        config: RosterConfig,
    ) -> Self {
        Self {
            team_repo,
            membership_repo,
            invitation_repo,
            config,
        }
    }

    /// Creates an invitation for a user to join a team.
    ///
    /// # Returns
    ///
    /// - `Ok(output)` - Invitation created with plain token for delivery
    /// - `Err(RosterError::TeamNotFound)` - Team does not exist
    /// - `Err(RosterError::Denied(_))` - The policy rejected the invite
    /// - `Err(RosterError::PaymentConfirmationRequired)` - The invite
    ///   consumes an unpaid seat and the confirmation flag was not set
    /// - `Err(_)` - Validation or repository errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "invite_to_team", skip_all, err)
    )]
    pub async fn execute(&self, input: InviteToTeamInput) -> Result<InviteToTeamOutput, RosterError> {
        validate_email(&input.email)?;

        let snapshot = load_snapshot(
            &self.team_repo,
            &self.membership_repo,
            input.team_id,
            input.actor_id,
            input.subscription,
        )
        .await?;

        let intent = TeamIntent::InviteToTeam {
            email: input.email.clone(),
            role: input.role,
        };
        enforce(
            evaluate(&snapshot, &intent, &self.config),
            input.seat_purchase_confirmed,
        )?;

        // generate token
        let token = generate_token(self.config.invitation.token_length);
        let token_hash = hash_token(&token);

        // calculate expiry
        let expires_at = Utc::now() + Duration::days(self.config.invitation.expiry_days);

        let data = CreateInvitation {
            team_id: input.team_id,
            email: input.email,
            role: input.role,
            token_hash,
            invited_by: input.actor_id,
            expires_at,
        };

        let invitation = self.invitation_repo.create(data).await?;

        log::info!(
            target: "roster",
            "msg=\"invitation created\", team_id={}, invitation_id={}, email=\"{}\", role={}",
            invitation.team_id,
            invitation.id,
            invitation.email,
            invitation.role.as_str()
        );

        events::dispatch(TeamEvent::MemberInvited {
            team_id: invitation.team_id,
            invitation_id: invitation.id,
            email: invitation.email.clone(),
            role: invitation.role,
            at: Utc::now(),
        })
        .await;

        Ok(InviteToTeamOutput {
            invitation,
            token: SecretString::new(token),
        })
    }
}
