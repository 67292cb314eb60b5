//! In-memory repository.
//!
//! Intended for tests/dev. Every call takes the single lock once, so each
//! repository operation is atomic with respect to the others, which is the
//! same scope a transactional backend must provide.

use std::collections::HashMap;
use std::sync::RwLock;

use atrium_auth::Role;
use atrium_core::{EmailAddress, IdentityId, ReplyId, SpaceId, TopicId};
use atrium_engine::repository::{RepoResult, RepositoryError, SpaceRepository};
use atrium_spaces::{Identity, MemberSpec, Membership, Reply, Space, Topic};

#[derive(Debug, Default)]
struct State {
    identities: HashMap<IdentityId, Identity>,
    spaces: HashMap<SpaceId, Space>,
    memberships: Vec<Membership>,
    topics: HashMap<TopicId, Topic>,
    replies: HashMap<ReplyId, Reply>,
}

impl State {
    fn identity_by_email(&self, email: &EmailAddress) -> Option<&Identity> {
        self.identities.values().find(|i| &i.email == email)
    }

    /// Resolve an email to an identity id, provisioning a new external
    /// identity on first contact.
    fn resolve_or_provision(&mut self, email: &EmailAddress) -> IdentityId {
        if let Some(identity) = self.identity_by_email(email) {
            return identity.id;
        }
        let identity = Identity::provisioned(email.clone());
        let id = identity.id;
        self.identities.insert(id, identity);
        id
    }
}

/// In-memory implementation of [`SpaceRepository`].
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<State>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a directory identity (test setup).
    pub fn insert_identity(&self, identity: Identity) {
        let mut state = self.state.write().expect("lock poisoned");
        state.identities.insert(identity.id, identity);
    }

    fn read<T>(&self, f: impl FnOnce(&State) -> T) -> RepoResult<T> {
        let state = self
            .state
            .read()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))?;
        Ok(f(&state))
    }

    fn write<T>(&self, f: impl FnOnce(&mut State) -> RepoResult<T>) -> RepoResult<T> {
        let mut state = self
            .state
            .write()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))?;
        f(&mut state)
    }
}

impl SpaceRepository for InMemoryRepository {
    fn find_identity(&self, id: IdentityId) -> RepoResult<Option<Identity>> {
        self.read(|state| state.identities.get(&id).cloned())
    }

    fn find_identities(&self, ids: &[IdentityId]) -> RepoResult<Vec<Identity>> {
        self.read(|state| {
            ids.iter()
                .filter_map(|id| state.identities.get(id).cloned())
                .collect()
        })
    }

    fn find_identities_by_emails(&self, emails: &[EmailAddress]) -> RepoResult<Vec<Identity>> {
        self.read(|state| {
            emails
                .iter()
                .filter_map(|email| state.identity_by_email(email).cloned())
                .collect()
        })
    }

    fn find_space_with_requester_role(
        &self,
        space_id: SpaceId,
        requester: IdentityId,
    ) -> RepoResult<Option<(Space, Option<Role>)>> {
        self.read(|state| {
            let space = state.spaces.get(&space_id)?.clone();
            let role = state
                .memberships
                .iter()
                .find(|m| m.space_id == space_id && m.identity_id == requester)
                .map(|m| m.role);
            Some((space, role))
        })
    }

    fn list_spaces_for(&self, identity: IdentityId) -> RepoResult<Vec<(Space, Role)>> {
        self.read(|state| {
            state
                .memberships
                .iter()
                .filter(|m| m.identity_id == identity)
                .filter_map(|m| {
                    state
                        .spaces
                        .get(&m.space_id)
                        .map(|space| (space.clone(), m.role))
                })
                .collect()
        })
    }

    fn list_memberships(&self, space_id: SpaceId) -> RepoResult<Vec<Membership>> {
        self.read(|state| {
            state
                .memberships
                .iter()
                .filter(|m| m.space_id == space_id)
                .cloned()
                .collect()
        })
    }

    fn create_space_with_members(
        &self,
        space: &Space,
        members: &[MemberSpec],
    ) -> RepoResult<Vec<Membership>> {
        self.write(|state| {
            if state.spaces.contains_key(&space.id) {
                return Err(RepositoryError::Storage(format!(
                    "space {} already exists",
                    space.id
                )));
            }
            state.spaces.insert(space.id, space.clone());

            let mut created = Vec::with_capacity(members.len());
            for member in members {
                let identity_id = state.resolve_or_provision(&member.email);
                let membership = Membership {
                    space_id: space.id,
                    identity_id,
                    role: member.role,
                };
                state.memberships.push(membership.clone());
                created.push(membership);
            }
            Ok(created)
        })
    }

    fn add_members(&self, space_id: SpaceId, members: &[MemberSpec]) -> RepoResult<usize> {
        self.write(|state| {
            if !state.spaces.contains_key(&space_id) {
                return Err(RepositoryError::Storage(format!(
                    "space {space_id} not found"
                )));
            }
            let mut added = 0;
            for member in members {
                let identity_id = state.resolve_or_provision(&member.email);
                let exists = state
                    .memberships
                    .iter()
                    .any(|m| m.space_id == space_id && m.identity_id == identity_id);
                if exists {
                    continue;
                }
                state.memberships.push(Membership {
                    space_id,
                    identity_id,
                    role: member.role,
                });
                added += 1;
            }
            Ok(added)
        })
    }

    fn remove_members(&self, space_id: SpaceId, targets: &[IdentityId]) -> RepoResult<usize> {
        self.write(|state| {
            let before = state.memberships.len();
            state
                .memberships
                .retain(|m| !(m.space_id == space_id && targets.contains(&m.identity_id)));
            Ok(before - state.memberships.len())
        })
    }

    fn update_membership_role(
        &self,
        space_id: SpaceId,
        member: IdentityId,
        role: Role,
    ) -> RepoResult<()> {
        self.write(|state| {
            let membership = state
                .memberships
                .iter_mut()
                .find(|m| m.space_id == space_id && m.identity_id == member)
                .ok_or_else(|| RepositoryError::Storage("membership not found".to_string()))?;
            membership.role = role;
            Ok(())
        })
    }

    fn update_space(&self, space: &Space) -> RepoResult<()> {
        self.write(|state| {
            if !state.spaces.contains_key(&space.id) {
                return Err(RepositoryError::Storage(format!(
                    "space {} not found",
                    space.id
                )));
            }
            state.spaces.insert(space.id, space.clone());
            Ok(())
        })
    }

    fn create_topic(&self, topic: &Topic) -> RepoResult<()> {
        self.write(|state| {
            state.topics.insert(topic.id, topic.clone());
            Ok(())
        })
    }

    fn find_topic(&self, space_id: SpaceId, topic_id: TopicId) -> RepoResult<Option<Topic>> {
        self.read(|state| {
            state
                .topics
                .get(&topic_id)
                .filter(|t| t.space_id == space_id)
                .cloned()
        })
    }

    fn list_topics(&self, space_id: SpaceId) -> RepoResult<Vec<Topic>> {
        self.read(|state| {
            state
                .topics
                .values()
                .filter(|t| t.space_id == space_id)
                .cloned()
                .collect()
        })
    }

    fn update_topic(&self, topic: &Topic) -> RepoResult<()> {
        self.write(|state| {
            if !state.topics.contains_key(&topic.id) {
                return Err(RepositoryError::Storage(format!(
                    "topic {} not found",
                    topic.id
                )));
            }
            state.topics.insert(topic.id, topic.clone());
            Ok(())
        })
    }

    fn delete_topic(&self, topic_id: TopicId) -> RepoResult<()> {
        self.write(|state| {
            state.topics.remove(&topic_id);
            // The cascade is part of the repository contract.
            state.replies.retain(|_, r| r.topic_id != topic_id);
            Ok(())
        })
    }

    fn count_replies(&self, topic_id: TopicId) -> RepoResult<usize> {
        self.read(|state| {
            state
                .replies
                .values()
                .filter(|r| r.topic_id == topic_id)
                .count()
        })
    }

    fn create_reply(&self, reply: &Reply) -> RepoResult<()> {
        self.write(|state| {
            state.replies.insert(reply.id, reply.clone());
            Ok(())
        })
    }

    fn find_reply(&self, topic_id: TopicId, reply_id: ReplyId) -> RepoResult<Option<Reply>> {
        self.read(|state| {
            state
                .replies
                .get(&reply_id)
                .filter(|r| r.topic_id == topic_id)
                .cloned()
        })
    }

    fn list_replies(&self, topic_id: TopicId) -> RepoResult<Vec<Reply>> {
        self.read(|state| {
            state
                .replies
                .values()
                .filter(|r| r.topic_id == topic_id)
                .cloned()
                .collect()
        })
    }

    fn update_reply(&self, reply: &Reply) -> RepoResult<()> {
        self.write(|state| {
            if !state.replies.contains_key(&reply.id) {
                return Err(RepositoryError::Storage(format!(
                    "reply {} not found",
                    reply.id
                )));
            }
            state.replies.insert(reply.id, reply.clone());
            Ok(())
        })
    }

    fn delete_reply(&self, reply_id: ReplyId) -> RepoResult<()> {
        self.write(|state| {
            state.replies.remove(&reply_id);
            Ok(())
        })
    }
}
