//! The Space entity and its lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atrium_core::{Description, DomainResult, IdentityId, Rejection, SpaceId, SpaceName};

/// Who may hold a membership in a space.
///
/// INTERNAL spaces admit only internal identities; EXTERNAL spaces admit
/// outside parties but must keep at least one internal member at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpaceKind {
    Internal,
    External,
}

/// Space lifecycle state. ACTIVE → ARCHIVED is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpaceStatus {
    Active,
    Archived,
}

/// Optional operational metadata carried by a space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceMetadata {
    pub deadline: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub integration_id: Option<String>,
}

/// Top-level collaboration container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    pub name: SpaceName,
    pub description: Option<Description>,
    pub kind: SpaceKind,
    pub status: SpaceStatus,
    pub owner_id: IdentityId,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
    pub metadata: SpaceMetadata,
}

impl Space {
    pub fn new(
        id: SpaceId,
        name: SpaceName,
        description: Option<Description>,
        kind: SpaceKind,
        owner_id: IdentityId,
        metadata: SpaceMetadata,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            kind,
            status: SpaceStatus::Active,
            owner_id,
            created_at,
            archived_at: None,
            metadata,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SpaceStatus::Active
    }

    /// Gate for every mutating operation except archival itself.
    pub fn ensure_active(&self) -> DomainResult<()> {
        if !self.is_active() {
            return Err(Rejection::invalid_state("space is not active"));
        }
        Ok(())
    }

    /// One-way ACTIVE → ARCHIVED transition, stamping `archived_at`.
    pub fn archive(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status == SpaceStatus::Archived {
            return Err(Rejection::invalid_state("space is already archived"));
        }
        self.status = SpaceStatus::Archived;
        self.archived_at = Some(now);
        Ok(())
    }

    /// Status change requested through a space update. Archiving routes
    /// through [`Space::archive`]; re-asserting ACTIVE is a no-op. The
    /// active gate upstream makes un-archive unreachable.
    pub fn set_status(&mut self, status: SpaceStatus, now: DateTime<Utc>) -> DomainResult<()> {
        match status {
            SpaceStatus::Archived => self.archive(now),
            SpaceStatus::Active => Ok(()),
        }
    }
}
