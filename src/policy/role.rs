//! Member roles and compact role sets.

use serde::{Deserialize, Serialize};

/// Role assigned to a team member.
///
/// Ordered by privilege: `Admin > Editor > Viewer`. `Admin` and `Editor`
/// are billable (each consumes a purchased seat); `Viewer` is read-only
/// and free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Editor,
    Admin,
}

impl Role {
    /// All roles in descending privilege order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Editor, Role::Viewer];

    /// Convert to string for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }

    /// Parse from a storage string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "editor" => Some(Self::Editor),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    /// Whether this role consumes a purchased seat.
    pub fn is_billable(&self) -> bool {
        matches!(self, Self::Admin | Self::Editor)
    }
}

/// A compact set of roles.
///
/// Stored as a bitmask; iteration yields roles in descending privilege
/// order, which is also the order an invite form should display them.
///
/// # Example
///
/// ```rust
/// use roster::{Role, RoleSet};
///
/// let set = RoleSet::of(&[Role::Editor, Role::Viewer]);
/// assert!(set.contains(Role::Viewer));
/// assert!(!set.contains(Role::Admin));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Create an empty role set.
    pub fn new() -> Self {
        Self::EMPTY
    }

    /// Create a set from a slice of roles.
    pub fn of(roles: &[Role]) -> Self {
        roles.iter().copied().collect()
    }

    fn bit(role: Role) -> u8 {
        1 << role as u8
    }

    /// Add a role to the set.
    pub fn insert(&mut self, role: Role) {
        self.0 |= Self::bit(role);
    }

    /// Check whether the set contains a role.
    pub fn contains(&self, role: Role) -> bool {
        self.0 & Self::bit(role) != 0
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of roles in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate over contained roles in descending privilege order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|r| self.contains(*r))
    }

    /// Serialize to a JSON array of role names.
    ///
    /// Format: `["admin", "viewer"]`
    pub fn to_json(&self) -> String {
        let names: Vec<&str> = self.iter().map(|r| r.as_str()).collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_owned())
    }

    /// Deserialize from a JSON array of role names.
    ///
    /// Returns None if parsing fails or any name is unrecognized.
    pub fn from_json(json: &str) -> Option<Self> {
        let names: Vec<String> = serde_json::from_str(json).ok()?;
        let mut set = Self::new();
        for name in names {
            set.insert(Role::from_str(&name)?);
        }
        Some(set)
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = Self::new();
        for role in iter {
            set.insert(role);
        }
        set
    }
}
