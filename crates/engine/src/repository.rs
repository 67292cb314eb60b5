//! The persistence port consumed by every operation.
//!
//! The engine never talks to storage directly; it is handed an
//! implementation of [`SpaceRepository`] and performs all reads and writes
//! through it. Implementations return plain data with no authorization
//! embedded, and own whatever transactional scope they need: space
//! creation plus its initial memberships must commit atomically, and
//! member mutations must read-then-write within one synchronization scope
//! so concurrent writers cannot slip between check and commit.

use std::sync::Arc;

use thiserror::Error;

use atrium_auth::Role;
use atrium_core::{EmailAddress, IdentityId, Rejection, ReplyId, SpaceId, TopicId};
use atrium_spaces::{Identity, MemberSpec, Membership, Reply, Space, Topic};

/// Storage-level failure. Deliberately opaque: the engine surfaces it as an
/// `Unexpected` rejection with no business-rule detail attached.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<RepositoryError> for Rejection {
    fn from(error: RepositoryError) -> Self {
        tracing::error!(error = %error, "repository operation failed");
        Rejection::unexpected("persistence failure")
    }
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Abstract persistence boundary for spaces, memberships, topics, replies,
/// and the identity directory view the engine needs.
///
/// `delete_topic` removes the topic **and all of its replies**; the
/// cascade is part of this contract, not an implicit storage behavior.
pub trait SpaceRepository: Send + Sync {
    // ── identities ──────────────────────────────────────────────────────

    fn find_identity(&self, id: IdentityId) -> RepoResult<Option<Identity>>;

    fn find_identities(&self, ids: &[IdentityId]) -> RepoResult<Vec<Identity>>;

    fn find_identities_by_emails(&self, emails: &[EmailAddress]) -> RepoResult<Vec<Identity>>;

    // ── spaces & memberships ────────────────────────────────────────────

    /// The space plus the requester's role in it, if any. `None` role means
    /// the space exists but the requester holds no membership; callers
    /// collapse both absences into NotFound.
    fn find_space_with_requester_role(
        &self,
        space_id: SpaceId,
        requester: IdentityId,
    ) -> RepoResult<Option<(Space, Option<Role>)>>;

    /// Every space the identity belongs to, with its role there.
    fn list_spaces_for(&self, identity: IdentityId) -> RepoResult<Vec<(Space, Role)>>;

    fn list_memberships(&self, space_id: SpaceId) -> RepoResult<Vec<Membership>>;

    /// Atomic: persists the space and all initial memberships, provisioning
    /// identities for emails the directory does not know yet.
    fn create_space_with_members(
        &self,
        space: &Space,
        members: &[MemberSpec],
    ) -> RepoResult<Vec<Membership>>;

    /// Adds the given members, provisioning unknown emails. Returns the
    /// number of memberships created.
    fn add_members(&self, space_id: SpaceId, members: &[MemberSpec]) -> RepoResult<usize>;

    /// Removes the given memberships. Returns the number removed.
    fn remove_members(&self, space_id: SpaceId, targets: &[IdentityId]) -> RepoResult<usize>;

    fn update_membership_role(
        &self,
        space_id: SpaceId,
        member: IdentityId,
        role: Role,
    ) -> RepoResult<()>;

    /// Persists a mutated space snapshot (settings, status, stamps).
    fn update_space(&self, space: &Space) -> RepoResult<()>;

    // ── topics ──────────────────────────────────────────────────────────

    fn create_topic(&self, topic: &Topic) -> RepoResult<()>;

    /// Scoped lookup: the topic must belong to the given space.
    fn find_topic(&self, space_id: SpaceId, topic_id: TopicId) -> RepoResult<Option<Topic>>;

    fn list_topics(&self, space_id: SpaceId) -> RepoResult<Vec<Topic>>;

    fn update_topic(&self, topic: &Topic) -> RepoResult<()>;

    /// Deletes the topic and every reply under it.
    fn delete_topic(&self, topic_id: TopicId) -> RepoResult<()>;

    fn count_replies(&self, topic_id: TopicId) -> RepoResult<usize>;

    // ── replies ─────────────────────────────────────────────────────────

    fn create_reply(&self, reply: &Reply) -> RepoResult<()>;

    /// Scoped lookup: the reply must belong to the given topic.
    fn find_reply(&self, topic_id: TopicId, reply_id: ReplyId) -> RepoResult<Option<Reply>>;

    fn list_replies(&self, topic_id: TopicId) -> RepoResult<Vec<Reply>>;

    fn update_reply(&self, reply: &Reply) -> RepoResult<()>;

    fn delete_reply(&self, reply_id: ReplyId) -> RepoResult<()>;
}

impl<R> SpaceRepository for Arc<R>
where
    R: SpaceRepository + ?Sized,
{
    fn find_identity(&self, id: IdentityId) -> RepoResult<Option<Identity>> {
        (**self).find_identity(id)
    }

    fn find_identities(&self, ids: &[IdentityId]) -> RepoResult<Vec<Identity>> {
        (**self).find_identities(ids)
    }

    fn find_identities_by_emails(&self, emails: &[EmailAddress]) -> RepoResult<Vec<Identity>> {
        (**self).find_identities_by_emails(emails)
    }

    fn find_space_with_requester_role(
        &self,
        space_id: SpaceId,
        requester: IdentityId,
    ) -> RepoResult<Option<(Space, Option<Role>)>> {
        (**self).find_space_with_requester_role(space_id, requester)
    }

    fn list_spaces_for(&self, identity: IdentityId) -> RepoResult<Vec<(Space, Role)>> {
        (**self).list_spaces_for(identity)
    }

    fn list_memberships(&self, space_id: SpaceId) -> RepoResult<Vec<Membership>> {
        (**self).list_memberships(space_id)
    }

    fn create_space_with_members(
        &self,
        space: &Space,
        members: &[MemberSpec],
    ) -> RepoResult<Vec<Membership>> {
        (**self).create_space_with_members(space, members)
    }

    fn add_members(&self, space_id: SpaceId, members: &[MemberSpec]) -> RepoResult<usize> {
        (**self).add_members(space_id, members)
    }

    fn remove_members(&self, space_id: SpaceId, targets: &[IdentityId]) -> RepoResult<usize> {
        (**self).remove_members(space_id, targets)
    }

    fn update_membership_role(
        &self,
        space_id: SpaceId,
        member: IdentityId,
        role: Role,
    ) -> RepoResult<()> {
        (**self).update_membership_role(space_id, member, role)
    }

    fn update_space(&self, space: &Space) -> RepoResult<()> {
        (**self).update_space(space)
    }

    fn create_topic(&self, topic: &Topic) -> RepoResult<()> {
        (**self).create_topic(topic)
    }

    fn find_topic(&self, space_id: SpaceId, topic_id: TopicId) -> RepoResult<Option<Topic>> {
        (**self).find_topic(space_id, topic_id)
    }

    fn list_topics(&self, space_id: SpaceId) -> RepoResult<Vec<Topic>> {
        (**self).list_topics(space_id)
    }

    fn update_topic(&self, topic: &Topic) -> RepoResult<()> {
        (**self).update_topic(topic)
    }

    fn delete_topic(&self, topic_id: TopicId) -> RepoResult<()> {
        (**self).delete_topic(topic_id)
    }

    fn count_replies(&self, topic_id: TopicId) -> RepoResult<usize> {
        (**self).count_replies(topic_id)
    }

    fn create_reply(&self, reply: &Reply) -> RepoResult<()> {
        (**self).create_reply(reply)
    }

    fn find_reply(&self, topic_id: TopicId, reply_id: ReplyId) -> RepoResult<Option<Reply>> {
        (**self).find_reply(topic_id, reply_id)
    }

    fn list_replies(&self, topic_id: TopicId) -> RepoResult<Vec<Reply>> {
        (**self).list_replies(topic_id)
    }

    fn update_reply(&self, reply: &Reply) -> RepoResult<()> {
        (**self).update_reply(reply)
    }

    fn delete_reply(&self, reply_id: ReplyId) -> RepoResult<()> {
        (**self).delete_reply(reply_id)
    }
}
