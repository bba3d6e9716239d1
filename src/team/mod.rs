mod repository;
mod types;

pub mod actions;

pub use repository::{
    CreateInvitation, CreateMembership, CreateTeam, TeamInvitationRepository,
    TeamMembershipRepository, TeamRepository, UpdateTeamInfo,
};
pub use types::{
    BillingInterval, Plan, Subscription, SubscriptionOrigin, Team, TeamInvitation, TeamMember,
};

#[cfg(feature = "mocks")]
mod mocks;

#[cfg(feature = "mocks")]
pub use mocks::{MockTeamInvitationRepository, MockTeamMembershipRepository, MockTeamRepository};
