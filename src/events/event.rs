use chrono::{DateTime, Utc};

use crate::policy::Role;

/// Roster events emitted by team actions.
///
/// Events are always fired from actions. If no listeners are registered,
/// they are silently ignored (no-op). Register listeners via
/// [`register_event_listeners`](crate::register_event_listeners) to handle
/// events.
#[derive(Debug, Clone)]
pub enum TeamEvent {
    // team profile
    TeamInfoUpdated {
        team_id: u64,
        at: DateTime<Utc>,
    },

    // invitations
    MemberInvited {
        team_id: u64,
        invitation_id: u64,
        email: String,
        role: Role,
        at: DateTime<Utc>,
    },
    InvitationAccepted {
        team_id: u64,
        user_id: u64,
        at: DateTime<Utc>,
    },
    InvitationRevoked {
        team_id: u64,
        invitation_id: u64,
        at: DateTime<Utc>,
    },

    // membership
    RoleChanged {
        team_id: u64,
        user_id: u64,
        role: Role,
        at: DateTime<Utc>,
    },
    MemberRemoved {
        team_id: u64,
        user_id: u64,
        at: DateTime<Utc>,
    },
    MemberLeft {
        team_id: u64,
        user_id: u64,
        at: DateTime<Utc>,
    },
}

impl TeamEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TeamInfoUpdated { .. } => "team.info_updated",
            Self::MemberInvited { .. } => "team.member_invited",
            Self::InvitationAccepted { .. } => "team.invitation_accepted",
            Self::InvitationRevoked { .. } => "team.invitation_revoked",
            Self::RoleChanged { .. } => "team.role_changed",
            Self::MemberRemoved { .. } => "team.member_removed",
            Self::MemberLeft { .. } => "team.member_left",
        }
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::TeamInfoUpdated { at, .. }
            | Self::MemberInvited { at, .. }
            | Self::InvitationAccepted { at, .. }
            | Self::InvitationRevoked { at, .. }
            | Self::RoleChanged { at, .. }
            | Self::MemberRemoved { at, .. }
            | Self::MemberLeft { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let now = Utc::now();

        assert_eq!(
            TeamEvent::TeamInfoUpdated {
                team_id: 1,
                at: now
            }
            .name(),
            "team.info_updated"
        );

        assert_eq!(
            TeamEvent::MemberInvited {
                team_id: 1,
                invitation_id: 1,
                email: "test@example.com".to_owned(),
                role: Role::Editor,
                at: now
            }
            .name(),
            "team.member_invited"
        );

        assert_eq!(
            TeamEvent::RoleChanged {
                team_id: 1,
                user_id: 2,
                role: Role::Admin,
                at: now
            }
            .name(),
            "team.role_changed"
        );

        assert_eq!(
            TeamEvent::MemberLeft {
                team_id: 1,
                user_id: 2,
                at: now
            }
            .name(),
            "team.member_left"
        );
    }

    #[test]
    fn test_event_timestamp() {
        let now = Utc::now();
        let event = TeamEvent::MemberRemoved {
            team_id: 1,
            user_id: 2,
            at: now,
        };
        assert_eq!(event.timestamp(), now);
    }
}
