//! Core types for team management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::policy::Role;

/// A team is an organizational unit that groups users together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier.
    pub id: u64,
    /// Human-readable team name.
    pub name: String,
    /// Optional description shown on the team profile.
    pub description: Option<String>,
    /// Optional avatar image reference.
    pub avatar_url: Option<String>,
    /// User ID of the team creator.
    pub created_by: u64,
    /// Role preselected when inviting a new member.
    pub default_invite_role: Role,
    /// SHA-256 hash of the shareable invite-link token, if one is active.
    #[serde(skip_serializing)]
    pub invite_token_hash: Option<String>,
    /// When the team was created.
    pub created_at: DateTime<Utc>,
    /// When the team was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Links a user to a team with exactly one role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    /// Unique identifier.
    pub id: u64,
    /// The team this membership belongs to.
    pub team_id: u64,
    /// The user who is a member.
    pub user_id: u64,
    /// Display name of the member.
    pub username: String,
    /// The member's current role.
    pub role: Role,
    /// When the user joined the team.
    pub created_at: DateTime<Utc>,
    /// When the membership was last updated.
    pub updated_at: DateTime<Utc>,
}

/// An invitation for a user to join a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamInvitation {
    /// Unique identifier.
    pub id: u64,
    /// The team being invited to.
    pub team_id: u64,
    /// Email of the invitee.
    pub email: String,
    /// Role to assign when accepted.
    pub role: Role,
    /// SHA-256 hash of the invitation token.
    #[serde(skip_serializing)]
    pub token_hash: String,
    /// User ID of who sent the invitation.
    pub invited_by: u64,
    /// When the invitation expires.
    pub expires_at: DateTime<Utc>,
    /// When the invitation was accepted (if accepted).
    pub accepted_at: Option<DateTime<Utc>>,
    /// When the invitation was created.
    pub created_at: DateTime<Utc>,
}

impl TeamInvitation {
    /// Check if the invitation has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }

    /// Check if the invitation has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted_at.is_some()
    }
}

/// Subscription plan tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
}

impl Plan {
    pub fn is_pro(&self) -> bool {
        matches!(self, Self::Pro)
    }
}

/// How often a paid subscription bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Monthly,
    Yearly,
}

/// Where the subscription came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionOrigin {
    /// Regular self-serve checkout.
    Direct,
    /// Granted through a promotion.
    Promotional,
    /// Part of a pilot program.
    Pilot,
}

/// The team's subscription as reported by the billing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub plan: Plan,
    pub interval: BillingInterval,
    /// Purchased seat count. Zero on Free plans.
    pub seats: u32,
    pub origin: SubscriptionOrigin,
}

impl Subscription {
    /// A free-plan subscription with no purchased seats.
    pub fn free() -> Self {
        Self {
            plan: Plan::Free,
            interval: BillingInterval::Monthly,
            seats: 0,
            origin: SubscriptionOrigin::Direct,
        }
    }

    /// A Pro subscription with the given seat count.
    pub fn pro(seats: u32, interval: BillingInterval) -> Self {
        Self {
            plan: Plan::Pro,
            interval,
            seats,
            origin: SubscriptionOrigin::Direct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_invitation_is_expired() {
        let expired = TeamInvitation {
            id: 1,
            team_id: 1,
            email: "test@example.com".to_owned(),
            role: Role::Viewer,
            token_hash: "hash".to_owned(),
            invited_by: 1,
            expires_at: Utc::now() - Duration::hours(1),
            accepted_at: None,
            created_at: Utc::now(),
        };

        assert!(expired.is_expired());
        assert!(!expired.is_accepted());

        let valid = TeamInvitation {
            expires_at: Utc::now() + Duration::hours(1),
            ..expired
        };

        assert!(!valid.is_expired());
    }

    #[test]
    fn test_subscription_constructors() {
        let free = Subscription::free();
        assert_eq!(free.plan, Plan::Free);
        assert_eq!(free.seats, 0);

        let pro = Subscription::pro(5, BillingInterval::Yearly);
        assert!(pro.plan.is_pro());
        assert_eq!(pro.seats, 5);
        assert_eq!(pro.interval, BillingInterval::Yearly);
    }

    #[test]
    fn test_plan_serde_names() {
        assert_eq!(serde_json::to_string(&Plan::Free).unwrap(), "\"free\"");
        assert_eq!(serde_json::to_string(&Plan::Pro).unwrap(), "\"pro\"");
    }
}
