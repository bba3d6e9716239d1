//! Typed mutation intents and their evaluation.
//!
//! The surrounding application expresses every roster mutation as a
//! [`TeamIntent`] and asks [`evaluate`] for a [`Decision`] before
//! dispatching. Evaluation is pure: it reads the snapshot, produces a
//! decision, and leaves all side effects to the caller.

use std::fmt;

use super::role::Role;
use super::rules::{
    can_assign_role, invitable_roles, requires_payment_confirmation, AssignRoleRequest, SeatChange,
};
use crate::config::RosterConfig;
use crate::snapshot::TeamSnapshot;

/// A mutation the caller wants to dispatch against the team.
#[derive(Debug, Clone, PartialEq)]
pub enum TeamIntent {
    /// Update the team profile; `None` fields are left unchanged.
    SetTeamInfo {
        name: Option<String>,
        description: Option<String>,
        avatar_url: Option<String>,
        default_invite_role: Option<Role>,
    },
    /// Invite a new member by email at the given role.
    InviteToTeam { email: String, role: Role },
    /// Change an existing member's role.
    ChangeRole { member_id: u64, role: Role },
    /// Remove another member from the team.
    RemoveFromTeam { member_id: u64 },
    /// Remove the acting user's own membership.
    LeaveTeam,
    /// Delete a pending invitation.
    RevokeInvitation { invitation_id: u64 },
    /// Replace the team's shareable invite-link token.
    RegenerateInviteToken,
}

/// What the caller must obtain before dispatching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The change consumes a seat the team has not paid for; show the
    /// seat-purchase dialog first.
    SeatPurchase,
}

/// Why an intent was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The acting user is not on the team roster.
    NotAMember,
    /// The actor's role does not permit this change.
    InsufficientRole,
    /// The actor targeted their own membership; self-management uses the
    /// leave path.
    CannotTargetSelf,
    /// The editor-seat cap is exhausted.
    SeatLimitReached,
    /// The actor may not grant the requested role.
    RoleNotInvitable,
    /// The targeted member or invitation does not exist.
    TargetNotFound,
    /// The actor is the team's only Admin and cannot leave.
    LastAdmin,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAMember => write!(f, "not a team member"),
            Self::InsufficientRole => write!(f, "insufficient role"),
            Self::CannotTargetSelf => write!(f, "cannot target own membership"),
            Self::SeatLimitReached => write!(f, "editor seat limit reached"),
            Self::RoleNotInvitable => write!(f, "role cannot be granted by this actor"),
            Self::TargetNotFound => write!(f, "target not found"),
            Self::LastAdmin => write!(f, "the last admin cannot leave the team"),
        }
    }
}

/// Result of evaluating an intent against a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Dispatch immediately.
    Allow,
    /// Prompt first, then dispatch with the confirmation flag set.
    RequireConfirmation(Confirmation),
    /// Reject without side effects.
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Evaluate an intent against an immutable workspace snapshot.
///
/// Deterministic and side-effect free; concurrent evaluations are
/// independent. Actions re-evaluate right before mutating so a stale form
/// cannot smuggle a rejected change through.
pub fn evaluate(snapshot: &TeamSnapshot, intent: &TeamIntent, config: &RosterConfig) -> Decision {
    let Some(actor_role) = snapshot.actor_role() else {
        return Decision::Deny(DenyReason::NotAMember);
    };

    let seats = snapshot.seat_state(&config.seats);
    let plan = snapshot.subscription.plan;
    let unused = snapshot.seat_usage().unused();

    match intent {
        TeamIntent::SetTeamInfo { .. } | TeamIntent::RegenerateInviteToken => {
            if actor_role != Role::Admin {
                return Decision::Deny(DenyReason::InsufficientRole);
            }
            Decision::Allow
        }

        TeamIntent::InviteToTeam { role, .. } => {
            // the seat-limited invitable set widens to {Viewer} for display,
            // but a Viewer actor still may not dispatch an invite
            if actor_role == Role::Viewer {
                return Decision::Deny(DenyReason::InsufficientRole);
            }
            if !invitable_roles(actor_role, seats).contains(*role) {
                return Decision::Deny(DenyReason::RoleNotInvitable);
            }
            if requires_payment_confirmation(plan, unused, SeatChange::NewInvite { role: *role }) {
                return Decision::RequireConfirmation(Confirmation::SeatPurchase);
            }
            Decision::Allow
        }

        TeamIntent::ChangeRole { member_id, role } => {
            let Some(target_role) = snapshot.member_role(*member_id) else {
                if actor_role != Role::Admin {
                    return Decision::Deny(DenyReason::InsufficientRole);
                }
                return Decision::Deny(DenyReason::TargetNotFound);
            };

            let req = AssignRoleRequest {
                actor_id: snapshot.actor_id,
                actor_role,
                target_id: *member_id,
                target_role,
                proposed_role: *role,
            };

            if !can_assign_role(&req, seats) {
                let reason = if actor_role != Role::Admin {
                    DenyReason::InsufficientRole
                } else if *member_id == snapshot.actor_id {
                    DenyReason::CannotTargetSelf
                } else {
                    DenyReason::SeatLimitReached
                };
                return Decision::Deny(reason);
            }

            if target_role == Role::Viewer
                && role.is_billable()
                && requires_payment_confirmation(
                    plan,
                    unused,
                    SeatChange::Promotion { from: target_role },
                )
            {
                return Decision::RequireConfirmation(Confirmation::SeatPurchase);
            }
            Decision::Allow
        }

        TeamIntent::RemoveFromTeam { member_id } => {
            if actor_role != Role::Admin {
                return Decision::Deny(DenyReason::InsufficientRole);
            }
            if *member_id == snapshot.actor_id {
                return Decision::Deny(DenyReason::CannotTargetSelf);
            }
            if snapshot.member(*member_id).is_none() {
                return Decision::Deny(DenyReason::TargetNotFound);
            }
            Decision::Allow
        }

        TeamIntent::LeaveTeam => {
            if actor_role == Role::Admin && snapshot.admin_count() <= 1 {
                return Decision::Deny(DenyReason::LastAdmin);
            }
            Decision::Allow
        }

        TeamIntent::RevokeInvitation { invitation_id } => {
            if actor_role != Role::Admin {
                return Decision::Deny(DenyReason::InsufficientRole);
            }
            if snapshot.invitation(*invitation_id).is_none() {
                return Decision::Deny(DenyReason::TargetNotFound);
            }
            Decision::Allow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::testing::snapshot_with;
    use crate::team::Plan;

    #[test]
    fn test_non_member_denied() {
        let snapshot = snapshot_with(Plan::Free, 0, &[(2, Role::Admin)], 99);
        let decision = evaluate(
            &snapshot,
            &TeamIntent::LeaveTeam,
            &RosterConfig::default(),
        );
        assert_eq!(decision, Decision::Deny(DenyReason::NotAMember));
    }

    #[test]
    fn test_invite_allowed_for_admin() {
        let snapshot = snapshot_with(Plan::Free, 0, &[(1, Role::Admin)], 1);
        let intent = TeamIntent::InviteToTeam {
            email: "new@example.com".to_owned(),
            role: Role::Editor,
        };
        assert_eq!(
            evaluate(&snapshot, &intent, &RosterConfig::default()),
            Decision::Allow
        );
    }

    #[test]
    fn test_invite_denied_for_viewer_actor() {
        let snapshot = snapshot_with(
            Plan::Free,
            0,
            &[(1, Role::Viewer), (2, Role::Admin)],
            1,
        );
        let intent = TeamIntent::InviteToTeam {
            email: "new@example.com".to_owned(),
            role: Role::Viewer,
        };
        assert_eq!(
            evaluate(&snapshot, &intent, &RosterConfig::default()),
            Decision::Deny(DenyReason::InsufficientRole)
        );
    }

    #[test]
    fn test_invite_editor_denied_at_free_cap() {
        // five billable members on a free team: cap reached
        let mut members: Vec<(u64, Role)> = (1..=5).map(|id| (id, Role::Editor)).collect();
        members[0].1 = Role::Admin;
        let snapshot = snapshot_with(Plan::Free, 0, &members, 1);

        let intent = TeamIntent::InviteToTeam {
            email: "new@example.com".to_owned(),
            role: Role::Editor,
        };
        assert_eq!(
            evaluate(&snapshot, &intent, &RosterConfig::default()),
            Decision::Deny(DenyReason::RoleNotInvitable)
        );

        // viewers still fit
        let intent = TeamIntent::InviteToTeam {
            email: "new@example.com".to_owned(),
            role: Role::Viewer,
        };
        assert_eq!(
            evaluate(&snapshot, &intent, &RosterConfig::default()),
            Decision::Allow
        );
    }

    #[test]
    fn test_invite_editor_on_full_pro_team_needs_confirmation() {
        // Pro team, 5 purchased seats, 5 billable members, 0 unused
        let mut members: Vec<(u64, Role)> = (1..=5).map(|id| (id, Role::Editor)).collect();
        members[0].1 = Role::Admin;
        let snapshot = snapshot_with(Plan::Pro, 5, &members, 1);

        let intent = TeamIntent::InviteToTeam {
            email: "new@example.com".to_owned(),
            role: Role::Editor,
        };
        assert_eq!(
            evaluate(&snapshot, &intent, &RosterConfig::default()),
            Decision::RequireConfirmation(Confirmation::SeatPurchase)
        );
    }

    #[test]
    fn test_change_role_self_denied() {
        let snapshot = snapshot_with(
            Plan::Pro,
            5,
            &[(1, Role::Admin), (2, Role::Editor)],
            1,
        );
        let intent = TeamIntent::ChangeRole {
            member_id: 1,
            role: Role::Viewer,
        };
        assert_eq!(
            evaluate(&snapshot, &intent, &RosterConfig::default()),
            Decision::Deny(DenyReason::CannotTargetSelf)
        );
    }

    #[test]
    fn test_change_role_promotion_on_full_pro_team_needs_confirmation() {
        // 2 seats, 2 billable, target is a viewer
        let snapshot = snapshot_with(
            Plan::Pro,
            2,
            &[(1, Role::Admin), (2, Role::Editor), (3, Role::Viewer)],
            1,
        );
        let intent = TeamIntent::ChangeRole {
            member_id: 3,
            role: Role::Editor,
        };
        assert_eq!(
            evaluate(&snapshot, &intent, &RosterConfig::default()),
            Decision::RequireConfirmation(Confirmation::SeatPurchase)
        );
    }

    #[test]
    fn test_change_role_demotion_allowed_without_confirmation() {
        let snapshot = snapshot_with(
            Plan::Pro,
            2,
            &[(1, Role::Admin), (2, Role::Editor)],
            1,
        );
        let intent = TeamIntent::ChangeRole {
            member_id: 2,
            role: Role::Viewer,
        };
        assert_eq!(
            evaluate(&snapshot, &intent, &RosterConfig::default()),
            Decision::Allow
        );
    }

    #[test]
    fn test_remove_requires_admin_and_other() {
        let snapshot = snapshot_with(
            Plan::Free,
            0,
            &[(1, Role::Admin), (2, Role::Editor)],
            2,
        );
        let intent = TeamIntent::RemoveFromTeam { member_id: 1 };
        assert_eq!(
            evaluate(&snapshot, &intent, &RosterConfig::default()),
            Decision::Deny(DenyReason::InsufficientRole)
        );

        let snapshot = snapshot_with(
            Plan::Free,
            0,
            &[(1, Role::Admin), (2, Role::Editor)],
            1,
        );
        assert_eq!(
            evaluate(
                &snapshot,
                &TeamIntent::RemoveFromTeam { member_id: 2 },
                &RosterConfig::default()
            ),
            Decision::Allow
        );
        assert_eq!(
            evaluate(
                &snapshot,
                &TeamIntent::RemoveFromTeam { member_id: 1 },
                &RosterConfig::default()
            ),
            Decision::Deny(DenyReason::CannotTargetSelf)
        );
    }

    #[test]
    fn test_last_admin_cannot_leave() {
        let snapshot = snapshot_with(
            Plan::Free,
            0,
            &[(1, Role::Admin), (2, Role::Editor)],
            1,
        );
        assert_eq!(
            evaluate(&snapshot, &TeamIntent::LeaveTeam, &RosterConfig::default()),
            Decision::Deny(DenyReason::LastAdmin)
        );

        // a second admin unblocks leaving
        let snapshot = snapshot_with(
            Plan::Free,
            0,
            &[(1, Role::Admin), (2, Role::Admin)],
            1,
        );
        assert_eq!(
            evaluate(&snapshot, &TeamIntent::LeaveTeam, &RosterConfig::default()),
            Decision::Allow
        );
    }

    #[test]
    fn test_set_info_requires_admin() {
        let snapshot = snapshot_with(
            Plan::Free,
            0,
            &[(1, Role::Admin), (2, Role::Editor)],
            2,
        );
        let intent = TeamIntent::SetTeamInfo {
            name: Some("New Name".to_owned()),
            description: None,
            avatar_url: None,
            default_invite_role: None,
        };
        assert_eq!(
            evaluate(&snapshot, &intent, &RosterConfig::default()),
            Decision::Deny(DenyReason::InsufficientRole)
        );
    }

    #[test]
    fn test_revoke_unknown_invitation() {
        let snapshot = snapshot_with(Plan::Free, 0, &[(1, Role::Admin)], 1);
        let intent = TeamIntent::RevokeInvitation { invitation_id: 42 };
        assert_eq!(
            evaluate(&snapshot, &intent, &RosterConfig::default()),
            Decision::Deny(DenyReason::TargetNotFound)
        );
    }
}
