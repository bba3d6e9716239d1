//! Immutable workspace snapshots.
//!
//! The policy functions never reach into application state; the caller
//! assembles a [`TeamSnapshot`] from whatever store it owns and passes it
//! in. Each evaluation sees one consistent snapshot, so concurrent
//! evaluations cannot observe half-applied state.

use crate::config::SeatPolicyConfig;
use crate::policy::{should_offer_upgrade, Role, SeatState, SeatUsage};
use crate::team::{Subscription, Team, TeamInvitation, TeamMember};

/// A read-only view of one team as seen by one acting user.
#[derive(Debug, Clone)]
pub struct TeamSnapshot {
    /// The authenticated user on whose behalf intents are evaluated.
    pub actor_id: u64,
    pub team: Team,
    pub members: Vec<TeamMember>,
    pub pending_invitations: Vec<TeamInvitation>,
    pub subscription: Subscription,
}

impl TeamSnapshot {
    /// The actor's role, if they are on the roster.
    pub fn actor_role(&self) -> Option<Role> {
        self.member_role(self.actor_id)
    }

    /// Look up a member's role by user id.
    pub fn member_role(&self, user_id: u64) -> Option<Role> {
        self.member(user_id).map(|m| m.role)
    }

    /// Look up a member by user id.
    pub fn member(&self, user_id: u64) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.user_id == user_id)
    }

    /// Look up a pending invitation by id.
    pub fn invitation(&self, invitation_id: u64) -> Option<&TeamInvitation> {
        self.pending_invitations
            .iter()
            .find(|i| i.id == invitation_id)
    }

    /// Count of billable (Admin + Editor) members.
    pub fn billable_members(&self) -> u32 {
        self.members.iter().filter(|m| m.role.is_billable()).count() as u32
    }

    /// Count of Admin members.
    pub fn admin_count(&self) -> u32 {
        self.members
            .iter()
            .filter(|m| m.role == Role::Admin)
            .count() as u32
    }

    /// Purchased versus occupied seats.
    pub fn seat_usage(&self) -> SeatUsage {
        SeatUsage::new(self.subscription.seats, self.billable_members())
    }

    /// Whether another billable member still fits.
    pub fn seat_state(&self, config: &SeatPolicyConfig) -> SeatState {
        SeatState::derive(self.subscription.plan, self.seat_usage(), config)
    }

    /// Whether the upgrade banner should be shown for this team.
    pub fn should_offer_upgrade(&self, config: &SeatPolicyConfig) -> bool {
        should_offer_upgrade(self.subscription.plan, self.seat_usage(), config)
    }
}
