//! Typed actions over the repository traits.
//!
//! Every action re-evaluates the relevant [`TeamIntent`](crate::TeamIntent)
//! against a fresh snapshot right before mutating, so a stale form cannot
//! smuggle a rejected change through.

mod accept;
mod change_role;
mod invite;
mod invite_token;
mod leave;
mod remove;
mod revoke;
mod set_info;

pub use accept::{AcceptInvitationAction, AcceptInvitationInput};
pub use change_role::{ChangeRoleAction, ChangeRoleInput};
pub use invite::{InviteToTeamAction, InviteToTeamInput, InviteToTeamOutput};
pub use invite_token::{RegenerateInviteTokenAction, RegenerateInviteTokenOutput};
pub use leave::{LeaveTeamAction, LeaveTeamInput};
pub use remove::{RemoveFromTeamAction, RemoveFromTeamInput};
pub use revoke::{RevokeInvitationAction, RevokeInvitationInput};
pub use set_info::{SetTeamInfoAction, SetTeamInfoInput};

use crate::policy::Decision;
use crate::snapshot::TeamSnapshot;
use crate::team::{Subscription, TeamMembershipRepository, TeamRepository};
use crate::RosterError;

/// Load the team and roster into a snapshot for policy evaluation.
///
/// Pending invitations start empty; actions that need them (revocation)
/// fill them in afterwards.
pub(crate) async fn load_snapshot<T, M>(
    team_repo: &T,
    membership_repo: &M,
    team_id: u64,
    actor_id: u64,
    subscription: Subscription,
) -> Result<TeamSnapshot, RosterError>
where
    T: TeamRepository,
    M: TeamMembershipRepository,
{
    let team = team_repo
        .find_by_id(team_id)
        .await?
        .ok_or(RosterError::TeamNotFound)?;
    let members = membership_repo.find_by_team(team_id).await?;

    Ok(TeamSnapshot {
        actor_id,
        team,
        members,
        pending_invitations: Vec::new(),
        subscription,
    })
}

/// Turn a policy decision into an action result.
///
/// `seat_purchase_confirmed` is the flag callers set after the external
/// confirmation dialog has been accepted.
pub(crate) fn enforce(
    decision: Decision,
    seat_purchase_confirmed: bool,
) -> Result<(), RosterError> {
    match decision {
        Decision::Allow => Ok(()),
        Decision::RequireConfirmation(_) if seat_purchase_confirmed => Ok(()),
        Decision::RequireConfirmation(_) => Err(RosterError::PaymentConfirmationRequired),
        Decision::Deny(reason) => Err(RosterError::Denied(reason)),
    }
}
