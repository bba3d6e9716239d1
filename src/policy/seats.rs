//! Seat accounting.
//!
//! A seat is a purchased billing slot permitting one billable (Admin or
//! Editor) member. Free-plan teams get a fixed cap instead of purchased
//! seats; Pro teams can always buy another seat, so for them the hard
//! limit never engages and full-seat changes route through the
//! payment-confirmation gate instead.

use crate::config::SeatPolicyConfig;
use crate::team::Plan;

/// Purchased versus occupied seats for a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatUsage {
    /// Seats purchased on the current subscription. Zero on Free plans.
    pub purchased: u32,
    /// Current count of billable (Admin + Editor) members.
    pub billable: u32,
}

impl SeatUsage {
    pub fn new(purchased: u32, billable: u32) -> Self {
        Self {
            purchased,
            billable,
        }
    }

    /// Seats purchased but not yet occupied.
    ///
    /// Clamped at zero: a team that ends up over-subscribed (e.g. after a
    /// plan downgrade) reports zero unused seats, which keeps the
    /// confirmation and upgrade gates engaged instead of feeding negative
    /// numbers into them.
    pub fn unused(&self) -> u32 {
        self.purchased.saturating_sub(self.billable)
    }

    /// True when every purchased seat is occupied (or exceeded).
    pub fn is_full(&self) -> bool {
        self.unused() == 0
    }
}

/// Whether the team has room for another billable member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatState {
    /// Another billable member can be added without restriction.
    WithinLimit,
    /// The editor-seat cap is reached or exceeded; only Viewers may be
    /// added.
    AtLimit,
}

impl SeatState {
    /// Derive the seat state from a plan and its usage.
    ///
    /// Free teams hit the hard cap at `free_editor_cap` billable members.
    /// Pro teams never do: their full-seats case is handled by
    /// [`requires_payment_confirmation`](super::requires_payment_confirmation)
    /// so an Admin can still invite an Editor and buy the seat in the same
    /// motion.
    pub fn derive(plan: Plan, usage: SeatUsage, config: &SeatPolicyConfig) -> Self {
        match plan {
            Plan::Free if usage.billable >= config.free_editor_cap => Self::AtLimit,
            _ => Self::WithinLimit,
        }
    }

    pub fn is_at_limit(&self) -> bool {
        matches!(self, Self::AtLimit)
    }
}

/// Whether upgrade messaging should be shown for this team.
///
/// True when a Free team is at or over its editor cap, or a Pro team's
/// billable count exceeds the soft cap. The caller resolves the actual
/// checkout URL; this only gates the banner.
pub fn should_offer_upgrade(plan: Plan, usage: SeatUsage, config: &SeatPolicyConfig) -> bool {
    match plan {
        Plan::Free => usage.billable >= config.free_editor_cap,
        Plan::Pro => usage.billable > config.pro_soft_editor_cap,
    }
}
