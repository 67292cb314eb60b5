//! Discussion topics and their status stamping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atrium_core::{Description, IdentityId, SpaceId, TopicId, TopicTitle};

/// Topic status. Freely interchangeable; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopicStatus {
    Open,
    Resolved,
    Closed,
}

impl TopicStatus {
    /// RESOLVED and CLOSED carry a `closed_at` stamp; OPEN clears it.
    pub fn is_settled(&self) -> bool {
        matches!(self, TopicStatus::Resolved | TopicStatus::Closed)
    }
}

/// A discussion thread owned by exactly one space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub space_id: SpaceId,
    pub author_id: IdentityId,
    pub title: TopicTitle,
    pub description: Option<Description>,
    pub status: TopicStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// Field-wise patch applied by an authorized topic update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPatch {
    pub title: Option<TopicTitle>,
    pub description: Option<Description>,
    pub status: Option<TopicStatus>,
}

impl Topic {
    pub fn new(
        id: TopicId,
        space_id: SpaceId,
        author_id: IdentityId,
        title: TopicTitle,
        description: Option<Description>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            space_id,
            author_id,
            title,
            description,
            status: TopicStatus::Open,
            created_at,
            updated_at: created_at,
            closed_at: None,
        }
    }

    /// Apply a patch. Entering RESOLVED or CLOSED stamps `closed_at`; any
    /// other status clears it. `updated_at` is refreshed unconditionally.
    pub fn apply(&mut self, patch: TopicPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(status) = patch.status {
            self.status = status;
            self.closed_at = if status.is_settled() { Some(now) } else { None };
        }
        self.updated_at = now;
    }
}
