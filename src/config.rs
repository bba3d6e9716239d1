//! Configuration types for the roster library.
//!
//! # Example
//!
//! ```rust
//! use roster::{RosterConfig, InvitationConfig, SeatPolicyConfig};
//!
//! // Use defaults
//! let config = RosterConfig::default();
//!
//! // Or customize
//! let config = RosterConfig {
//!     invitation: InvitationConfig {
//!         expiry_days: 14,
//!         ..Default::default()
//!     },
//!     seats: SeatPolicyConfig {
//!         free_editor_cap: 3,
//!         ..Default::default()
//!     },
//! };
//! ```

/// Main configuration struct for the roster library.
///
/// Use `RosterConfig::default()` for production defaults.
#[derive(Debug, Clone, Default)]
pub struct RosterConfig {
    /// Invitation token settings.
    pub invitation: InvitationConfig,

    /// Seat-limit policy settings.
    pub seats: SeatPolicyConfig,
}

impl RosterConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration suitable for development/testing.
    ///
    /// Uses long invitation expiry and a relaxed free-plan cap so local
    /// fixtures do not trip the seat limit.
    pub fn development() -> Self {
        Self {
            invitation: InvitationConfig {
                expiry_days: 30,
                token_length: 32,
            },
            seats: SeatPolicyConfig {
                free_editor_cap: 25,
                pro_soft_editor_cap: 100,
            },
        }
    }
}

/// Configuration for team invitations.
#[derive(Debug, Clone)]
pub struct InvitationConfig {
    /// Number of days until an invitation expires.
    ///
    /// Default: 7
    pub expiry_days: i64,

    /// Length of generated invitation tokens (in characters).
    ///
    /// Default is 32 alphanumeric characters (~190 bits of entropy).
    pub token_length: usize,
}

impl Default for InvitationConfig {
    fn default() -> Self {
        Self {
            expiry_days: 7,
            token_length: 32,
        }
    }
}

/// Configuration for the editor-seat policy.
///
/// A "seat" is a billing slot permitting one Admin or Editor member;
/// Viewers are free. Free-plan teams have a fixed cap on billable members,
/// while Pro teams buy seats and only get a soft cap for upgrade messaging.
#[derive(Debug, Clone)]
pub struct SeatPolicyConfig {
    /// Maximum billable members on the Free plan.
    ///
    /// Default: 5
    pub free_editor_cap: u32,

    /// Billable-member count past which a Pro team is nudged toward a
    /// larger plan. Purely informational; nothing is blocked.
    ///
    /// Default: 10
    pub pro_soft_editor_cap: u32,
}

impl Default for SeatPolicyConfig {
    fn default() -> Self {
        Self {
            free_editor_cap: 5,
            pro_soft_editor_cap: 10,
        }
    }
}
