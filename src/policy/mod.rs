//! The invitation and role policy.
//!
//! Pure functions over an immutable workspace snapshot: no side effects, no
//! suspension, total over their enum inputs. The caller owns all state and
//! dispatches the resulting decisions.

mod intent;
mod role;
mod rules;
mod seats;

pub use intent::{evaluate, Confirmation, Decision, DenyReason, TeamIntent};
pub use role::{Role, RoleSet};
pub use rules::{
    can_assign_role, default_invite_role, invitable_roles, requires_payment_confirmation,
    AssignRoleRequest, SeatChange,
};
pub use seats::{should_offer_upgrade, SeatState, SeatUsage};
