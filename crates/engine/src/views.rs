//! Success payloads returned by the operation entry points.

use chrono::{DateTime, Utc};
use serde::Serialize;

use atrium_auth::Role;
use atrium_core::{
    Description, EmailAddress, IdentityId, ReplyContent, ReplyId, SpaceId, SpaceName, TopicId,
    TopicTitle,
};
use atrium_spaces::{Identity, SpaceKind, SpaceMetadata, SpaceStatus, TopicStatus};

/// Minimal identity projection embedded in other views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentitySummary {
    pub id: IdentityId,
    pub name: String,
    pub email: EmailAddress,
}

impl From<&Identity> for IdentitySummary {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            name: identity.display_name.clone(),
            email: identity.email.clone(),
        }
    }
}

/// One row of a space's member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberView {
    pub id: IdentityId,
    pub name: String,
    pub email: EmailAddress,
    pub role: Role,
}

/// Payload returned by space creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpaceCreated {
    pub id: SpaceId,
    pub name: SpaceName,
    pub kind: SpaceKind,
    pub status: SpaceStatus,
    pub member_count: usize,
    pub created_at: DateTime<Utc>,
}

/// One row of the requester's space listing; also returned by updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpaceSummary {
    pub id: SpaceId,
    pub name: SpaceName,
    pub description: Option<Description>,
    pub kind: SpaceKind,
    pub status: SpaceStatus,
    pub member_count: usize,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
    pub owner: IdentitySummary,
    pub current_user_role: Role,
}

/// Full space view including the member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpaceView {
    pub id: SpaceId,
    pub name: SpaceName,
    pub description: Option<Description>,
    pub kind: SpaceKind,
    pub status: SpaceStatus,
    pub metadata: SpaceMetadata,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
    pub owner: IdentitySummary,
    pub current_user_role: Role,
    pub member_count: usize,
    pub members: Vec<MemberView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MembersAdded {
    pub space_id: SpaceId,
    pub added_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MembersRemoved {
    pub space_id: SpaceId,
    pub removed_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemberRoleUpdated {
    pub space_id: SpaceId,
    pub member_id: IdentityId,
    pub role: Role,
}

/// Topic projection with author and reply count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicView {
    pub id: TopicId,
    pub space_id: SpaceId,
    pub title: TopicTitle,
    pub description: Option<Description>,
    pub status: TopicStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub author: IdentitySummary,
    pub reply_count: usize,
}

/// Reply projection with author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyView {
    pub id: ReplyId,
    pub topic_id: TopicId,
    pub content: ReplyContent,
    pub is_voice: bool,
    pub created_at: DateTime<Utc>,
    pub author: IdentitySummary,
}
