//! Membership roles and their capability tiers.
//!
//! Roles are a closed enumeration so illegal values are unrepresentable;
//! wire names are the SCREAMING_SNAKE_CASE strings the directory and
//! transport layers already use. A role is an attribute of a membership,
//! never of an identity globally.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use atrium_core::Rejection;

/// Role held by a membership within one space.
///
/// Capability is not a single linear scale: OWNER ⊇ ADMIN for space
/// management, while CONTRIBUTOR and LISTENER are content tiers below
/// ADMIN. Operations must consult the explicit predicates rather than
/// compare variants by order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Owner,
    Admin,
    Contributor,
    Listener,
}

/// Coarse capability grouping used by the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapabilityTier {
    /// Space management: settings, membership, archival.
    Manage,
    /// Content authorship: topics and replies.
    Contribute,
    /// Read-only standing.
    View,
}

impl Role {
    pub fn tier(&self) -> CapabilityTier {
        match self {
            Role::Owner | Role::Admin => CapabilityTier::Manage,
            Role::Contributor => CapabilityTier::Contribute,
            Role::Listener => CapabilityTier::View,
        }
    }

    /// May update space settings, archive, and manage members.
    pub fn can_manage_space(&self) -> bool {
        matches!(self, Role::Owner | Role::Admin)
    }

    /// May author topics and replies.
    pub fn can_contribute(&self) -> bool {
        matches!(self, Role::Owner | Role::Admin | Role::Contributor)
    }

    pub fn is_owner(&self) -> bool {
        matches!(self, Role::Owner)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "OWNER",
            Role::Admin => "ADMIN",
            Role::Contributor => "CONTRIBUTOR",
            Role::Listener => "LISTENER",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OWNER" => Ok(Role::Owner),
            "ADMIN" => Ok(Role::Admin),
            "CONTRIBUTOR" => Ok(Role::Contributor),
            "LISTENER" => Ok(Role::Listener),
            other => Err(Rejection::validation(format!("unknown role: {other}"))),
        }
    }
}
