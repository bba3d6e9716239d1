//! Team roster, invitation, and seat-limit policy for collaborative
//! workspaces.
//!
//! The policy core is a set of pure functions over an immutable
//! [`TeamSnapshot`]: which roles an actor may hand out, which default role an
//! invite form should preselect, and which changes need a seat-purchase
//! confirmation before they are dispatched. Mutations are expressed as typed
//! [`TeamIntent`](policy::TeamIntent) values and executed by the actions in
//! [`team::actions`], which talk to storage through repository traits.
//!
//! Enable the `mocks` feature for in-memory repositories, and the `tracing`
//! feature to instrument action entry points.

pub mod config;
pub mod crypto;
pub mod events;
pub mod policy;
pub mod snapshot;
pub mod team;
pub mod validators;

mod secret;

pub use config::{InvitationConfig, RosterConfig, SeatPolicyConfig};
pub use events::register_event_listeners;
pub use policy::{Decision, DenyReason, Role, RoleSet, SeatState, TeamIntent};
pub use secret::SecretString;
pub use snapshot::TeamSnapshot;
pub use validators::ValidationError;

use std::fmt;

/// Errors returned by roster actions and repositories.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterError {
    TeamNotFound,
    MemberNotFound,
    InvitationNotFound,
    AlreadyMember,
    TokenInvalid,
    TokenExpired,
    InvitationAlreadyAccepted,
    EmailMismatch,
    /// The policy rejected the change; the reason says why.
    Denied(DenyReason),
    /// The change consumes a seat and the caller has not confirmed the
    /// purchase yet. Prompt, then retry with the confirmation flag set.
    PaymentConfirmationRequired,
    SeatLimitReached,
    Validation(ValidationError),
    Internal(String),
}

impl std::error::Error for RosterError {}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::TeamNotFound => write!(f, "Team not found"),
            RosterError::MemberNotFound => write!(f, "Member not found"),
            RosterError::InvitationNotFound => write!(f, "Invitation not found"),
            RosterError::AlreadyMember => write!(f, "User is already a team member"),
            RosterError::TokenInvalid => write!(f, "Invalid invitation token"),
            RosterError::TokenExpired => write!(f, "Invitation token has expired"),
            RosterError::InvitationAlreadyAccepted => {
                write!(f, "Invitation has already been accepted")
            }
            RosterError::EmailMismatch => write!(f, "Invitation was issued for another email"),
            RosterError::Denied(reason) => write!(f, "Denied by policy: {reason}"),
            RosterError::PaymentConfirmationRequired => {
                write!(f, "Seat purchase confirmation required")
            }
            RosterError::SeatLimitReached => write!(f, "Editor seat limit reached"),
            RosterError::Validation(e) => write!(f, "{e}"),
            RosterError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl From<ValidationError> for RosterError {
    fn from(e: ValidationError) -> Self {
        RosterError::Validation(e)
    }
}
