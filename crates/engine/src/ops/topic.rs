//! Topic operations: create, list, read, update, delete.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use atrium_core::{Description, DomainResult, IdentityId, Rejection, SpaceId, TopicId, TopicTitle};
use atrium_spaces::{Topic, TopicPatch, TopicStatus};

use crate::authorize::{SpaceAction, authorize, authorize_author_or_manager};
use crate::ops::{identity_summary, load_space};
use crate::repository::SpaceRepository;
use crate::views::TopicView;

fn topic_view<R: SpaceRepository>(repo: &R, topic: Topic) -> DomainResult<TopicView> {
    let author = identity_summary(repo, topic.author_id)?;
    let reply_count = repo.count_replies(topic.id)?;
    Ok(TopicView {
        id: topic.id,
        space_id: topic.space_id,
        title: topic.title,
        description: topic.description,
        status: topic.status,
        created_at: topic.created_at,
        updated_at: topic.updated_at,
        closed_at: topic.closed_at,
        author,
        reply_count,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTopic {
    pub requester: IdentityId,
    pub space_id: SpaceId,
    pub title: String,
    pub description: Option<String>,
    pub now: DateTime<Utc>,
}

/// Open a new topic in an active space. Listeners cannot author topics.
pub fn create_topic<R: SpaceRepository>(repo: &R, input: CreateTopic) -> DomainResult<TopicView> {
    let (space, role) = load_space(repo, input.space_id, input.requester)?;
    space.ensure_active()?;
    authorize(SpaceAction::CreateTopic, Some(role))?;

    let title = TopicTitle::new(input.title)?;
    let description = input.description.map(Description::new).transpose()?;

    let topic = Topic::new(
        TopicId::new(),
        space.id,
        input.requester,
        title,
        description,
        input.now,
    );
    repo.create_topic(&topic)?;
    tracing::info!(space = %space.id, topic = %topic.id, "topic created");
    topic_view(repo, topic)
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ListTopics {
    pub requester: IdentityId,
    pub space_id: SpaceId,
}

/// All topics in the space, newest first. Any member may read.
pub fn list_topics<R: SpaceRepository>(
    repo: &R,
    input: ListTopics,
) -> DomainResult<Vec<TopicView>> {
    let (space, role) = load_space(repo, input.space_id, input.requester)?;
    authorize(SpaceAction::View, Some(role))?;

    let mut topics = repo.list_topics(space.id)?;
    topics.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    topics.into_iter().map(|t| topic_view(repo, t)).collect()
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GetTopic {
    pub requester: IdentityId,
    pub space_id: SpaceId,
    pub topic_id: TopicId,
}

pub fn get_topic<R: SpaceRepository>(repo: &R, input: GetTopic) -> DomainResult<TopicView> {
    let (space, role) = load_space(repo, input.space_id, input.requester)?;
    authorize(SpaceAction::View, Some(role))?;

    let Some(topic) = repo.find_topic(space.id, input.topic_id)? else {
        return Err(Rejection::not_found());
    };
    topic_view(repo, topic)
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTopic {
    pub requester: IdentityId,
    pub space_id: SpaceId,
    pub topic_id: TopicId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TopicStatus>,
    pub now: DateTime<Utc>,
}

/// Update a topic's title, description, and/or status. Allowed for the
/// author and for space managers; the archived-space gate comes first,
/// regardless of authorship.
pub fn update_topic<R: SpaceRepository>(repo: &R, input: UpdateTopic) -> DomainResult<TopicView> {
    let (space, role) = load_space(repo, input.space_id, input.requester)?;
    space.ensure_active()?;

    let Some(mut topic) = repo.find_topic(space.id, input.topic_id)? else {
        return Err(Rejection::not_found());
    };
    authorize_author_or_manager(
        role,
        topic.author_id,
        input.requester,
        "only the topic author, space OWNER, or ADMIN can update this topic",
    )?;

    let patch = TopicPatch {
        title: input.title.map(TopicTitle::new).transpose()?,
        description: input.description.map(Description::new).transpose()?,
        status: input.status,
    };
    topic.apply(patch, input.now);
    repo.update_topic(&topic)?;
    tracing::info!(topic = %topic.id, status = ?topic.status, "topic updated");
    topic_view(repo, topic)
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DeleteTopic {
    pub requester: IdentityId,
    pub space_id: SpaceId,
    pub topic_id: TopicId,
}

/// Delete a topic and, by repository contract, every reply under it.
pub fn delete_topic<R: SpaceRepository>(repo: &R, input: DeleteTopic) -> DomainResult<()> {
    let (space, role) = load_space(repo, input.space_id, input.requester)?;
    space.ensure_active()?;

    let Some(topic) = repo.find_topic(space.id, input.topic_id)? else {
        return Err(Rejection::not_found());
    };
    authorize_author_or_manager(
        role,
        topic.author_id,
        input.requester,
        "only the topic author, space OWNER, or ADMIN can delete this topic",
    )?;

    repo.delete_topic(topic.id)?;
    tracing::info!(topic = %topic.id, "topic deleted");
    Ok(())
}
