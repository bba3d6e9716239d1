//! The role-invitation rules.
//!
//! Every function here is total over its enum inputs and free of side
//! effects; callers re-evaluate against a fresh snapshot whenever state
//! changes.

use super::role::{Role, RoleSet};
use super::seats::SeatState;
use crate::team::Plan;

/// Roles an actor may assign to an invitee.
///
/// When the editor-seat cap is reached or exceeded, only `Viewer` can be
/// handed out, regardless of the actor's own role. Otherwise an Admin may
/// grant any role, an Editor may grant `Viewer` only, and a Viewer may
/// grant nothing.
pub fn invitable_roles(actor_role: Role, seats: SeatState) -> RoleSet {
    if seats.is_at_limit() {
        return RoleSet::of(&[Role::Viewer]);
    }

    match actor_role {
        Role::Admin => RoleSet::of(&[Role::Admin, Role::Editor, Role::Viewer]),
        Role::Editor => RoleSet::of(&[Role::Viewer]),
        Role::Viewer => RoleSet::EMPTY,
    }
}

/// The role an invite form should preselect.
///
/// The team's configured default, when the actor may actually grant it;
/// `Viewer` otherwise.
pub fn default_invite_role(invitable: RoleSet, team_default: Role) -> Role {
    if invitable.contains(team_default) {
        team_default
    } else {
        Role::Viewer
    }
}

/// A change that may consume a purchased seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatChange {
    /// Inviting a new member at the given role.
    NewInvite { role: Role },
    /// Changing an existing member's role; `from` is their current role.
    Promotion { from: Role },
}

/// Whether a change needs the seat-purchase confirmation dialog first.
///
/// Only Pro teams with zero unused seats are affected: a new invite at a
/// billable role, or a promotion of a current Viewer (converting a
/// non-billable member into a billable one), consumes a seat the team has
/// not paid for yet.
pub fn requires_payment_confirmation(plan: Plan, unused_seats: u32, change: SeatChange) -> bool {
    if plan != Plan::Pro || unused_seats != 0 {
        return false;
    }

    match change {
        SeatChange::NewInvite { role } => role.is_billable(),
        SeatChange::Promotion { from } => from == Role::Viewer,
    }
}

/// A proposed role assignment for an existing member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignRoleRequest {
    pub actor_id: u64,
    pub actor_role: Role,
    pub target_id: u64,
    pub target_role: Role,
    pub proposed_role: Role,
}

/// Whether the actor may apply this role assignment.
///
/// Requires the Admin role, a target other than the actor themselves
/// (self-management goes through the leave path), and that the proposal
/// does not newly promote a Viewer into a billable role while the seat
/// cap is exhausted.
pub fn can_assign_role(req: &AssignRoleRequest, seats: SeatState) -> bool {
    if req.actor_role != Role::Admin {
        return false;
    }

    if req.actor_id == req.target_id {
        return false;
    }

    let promotes_to_billable = req.target_role == Role::Viewer && req.proposed_role.is_billable();
    !(promotes_to_billable && seats.is_at_limit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invitable_roles_within_limit() {
        let seats = SeatState::WithinLimit;

        let admin = invitable_roles(Role::Admin, seats);
        assert!(admin.contains(Role::Admin));
        assert!(admin.contains(Role::Editor));
        assert!(admin.contains(Role::Viewer));

        let editor = invitable_roles(Role::Editor, seats);
        assert_eq!(editor, RoleSet::of(&[Role::Viewer]));

        let viewer = invitable_roles(Role::Viewer, seats);
        assert!(viewer.is_empty());
    }

    #[test]
    fn test_invitable_roles_at_limit_collapse() {
        // every actor role collapses to {Viewer} once seats run out
        for actor in Role::ALL {
            let set = invitable_roles(actor, SeatState::AtLimit);
            assert_eq!(set, RoleSet::of(&[Role::Viewer]), "actor {actor:?}");
        }
    }

    #[test]
    fn test_invitable_roles_pure() {
        let a = invitable_roles(Role::Admin, SeatState::WithinLimit);
        let b = invitable_roles(Role::Admin, SeatState::WithinLimit);
        assert_eq!(a, b);
    }

    #[test]
    fn test_default_invite_role_uses_team_default() {
        let invitable = invitable_roles(Role::Admin, SeatState::WithinLimit);
        assert_eq!(default_invite_role(invitable, Role::Editor), Role::Editor);
    }

    #[test]
    fn test_default_invite_role_falls_back_to_viewer() {
        // editor cannot grant editor, so the team default is out of reach
        let invitable = invitable_roles(Role::Editor, SeatState::WithinLimit);
        assert_eq!(default_invite_role(invitable, Role::Editor), Role::Viewer);

        // empty set also falls back
        assert_eq!(default_invite_role(RoleSet::EMPTY, Role::Admin), Role::Viewer);
    }

    #[test]
    fn test_confirmation_new_invite() {
        // Pro, 0 unused, billable role -> confirm
        assert!(requires_payment_confirmation(
            Plan::Pro,
            0,
            SeatChange::NewInvite { role: Role::Editor }
        ));

        // viewer invite never consumes a seat
        assert!(!requires_payment_confirmation(
            Plan::Pro,
            0,
            SeatChange::NewInvite { role: Role::Viewer }
        ));

        // unused seats left -> no confirmation
        assert!(!requires_payment_confirmation(
            Plan::Pro,
            2,
            SeatChange::NewInvite { role: Role::Editor }
        ));

        // free plans never hit the payment dialog
        assert!(!requires_payment_confirmation(
            Plan::Free,
            0,
            SeatChange::NewInvite { role: Role::Editor }
        ));
    }

    #[test]
    fn test_confirmation_promotion() {
        // promoting a viewer on a full Pro team consumes a new seat
        assert!(requires_payment_confirmation(
            Plan::Pro,
            0,
            SeatChange::Promotion { from: Role::Viewer }
        ));

        // editor -> admin keeps occupying the same seat
        assert!(!requires_payment_confirmation(
            Plan::Pro,
            0,
            SeatChange::Promotion { from: Role::Editor }
        ));
    }

    #[test]
    fn test_can_assign_role_requires_admin() {
        let req = AssignRoleRequest {
            actor_id: 1,
            actor_role: Role::Editor,
            target_id: 2,
            target_role: Role::Viewer,
            proposed_role: Role::Viewer,
        };
        assert!(!can_assign_role(&req, SeatState::WithinLimit));
    }

    #[test]
    fn test_can_assign_role_rejects_self() {
        let req = AssignRoleRequest {
            actor_id: 1,
            actor_role: Role::Admin,
            target_id: 1,
            target_role: Role::Admin,
            proposed_role: Role::Viewer,
        };
        assert!(!can_assign_role(&req, SeatState::WithinLimit));
    }

    #[test]
    fn test_can_assign_role_blocks_promotion_at_limit() {
        let req = AssignRoleRequest {
            actor_id: 1,
            actor_role: Role::Admin,
            target_id: 2,
            target_role: Role::Viewer,
            proposed_role: Role::Editor,
        };
        assert!(can_assign_role(&req, SeatState::WithinLimit));
        assert!(!can_assign_role(&req, SeatState::AtLimit));
    }

    #[test]
    fn test_can_assign_role_demotion_allowed_at_limit() {
        // demoting an editor frees a seat; no cap check applies
        let req = AssignRoleRequest {
            actor_id: 1,
            actor_role: Role::Admin,
            target_id: 2,
            target_role: Role::Editor,
            proposed_role: Role::Viewer,
        };
        assert!(can_assign_role(&req, SeatState::AtLimit));
    }
}
