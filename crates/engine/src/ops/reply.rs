//! Reply operations: create, list, read, update, delete.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use atrium_core::{DomainResult, IdentityId, Rejection, ReplyContent, ReplyId, SpaceId, TopicId};
use atrium_spaces::Reply;

use crate::authorize::{SpaceAction, authorize, authorize_author_or_manager};
use crate::ops::{identity_summary, load_space};
use crate::repository::SpaceRepository;
use crate::views::ReplyView;

fn reply_view<R: SpaceRepository>(repo: &R, reply: Reply) -> DomainResult<ReplyView> {
    let author = identity_summary(repo, reply.author_id)?;
    Ok(ReplyView {
        id: reply.id,
        topic_id: reply.topic_id,
        content: reply.content,
        is_voice: reply.is_voice,
        created_at: reply.created_at,
        author,
    })
}

/// The topic must exist under the given space; otherwise NotFound,
/// indistinguishable from a space the requester cannot see into.
fn require_topic<R: SpaceRepository>(
    repo: &R,
    space_id: SpaceId,
    topic_id: TopicId,
) -> DomainResult<TopicId> {
    match repo.find_topic(space_id, topic_id)? {
        Some(topic) => Ok(topic.id),
        None => Err(Rejection::not_found()),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReply {
    pub requester: IdentityId,
    pub space_id: SpaceId,
    pub topic_id: TopicId,
    pub content: String,
    #[serde(default)]
    pub is_voice: bool,
    pub now: DateTime<Utc>,
}

/// Post a reply to a topic in an active space.
pub fn create_reply<R: SpaceRepository>(repo: &R, input: CreateReply) -> DomainResult<ReplyView> {
    let (space, role) = load_space(repo, input.space_id, input.requester)?;
    space.ensure_active()?;
    let topic_id = require_topic(repo, space.id, input.topic_id)?;
    authorize(SpaceAction::CreateReply, Some(role))?;

    let content = ReplyContent::new(input.content)?;
    let reply = Reply::new(
        ReplyId::new(),
        topic_id,
        input.requester,
        content,
        input.is_voice,
        input.now,
    );
    repo.create_reply(&reply)?;
    tracing::info!(topic = %topic_id, reply = %reply.id, voice = reply.is_voice, "reply created");
    reply_view(repo, reply)
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ListReplies {
    pub requester: IdentityId,
    pub space_id: SpaceId,
    pub topic_id: TopicId,
}

/// All replies in a topic, oldest first. Any member may read.
pub fn list_replies<R: SpaceRepository>(
    repo: &R,
    input: ListReplies,
) -> DomainResult<Vec<ReplyView>> {
    let (space, role) = load_space(repo, input.space_id, input.requester)?;
    authorize(SpaceAction::View, Some(role))?;
    let topic_id = require_topic(repo, space.id, input.topic_id)?;

    let mut replies = repo.list_replies(topic_id)?;
    replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    replies.into_iter().map(|r| reply_view(repo, r)).collect()
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GetReply {
    pub requester: IdentityId,
    pub space_id: SpaceId,
    pub topic_id: TopicId,
    pub reply_id: ReplyId,
}

pub fn get_reply<R: SpaceRepository>(repo: &R, input: GetReply) -> DomainResult<ReplyView> {
    let (space, role) = load_space(repo, input.space_id, input.requester)?;
    authorize(SpaceAction::View, Some(role))?;
    let topic_id = require_topic(repo, space.id, input.topic_id)?;

    let Some(reply) = repo.find_reply(topic_id, input.reply_id)? else {
        return Err(Rejection::not_found());
    };
    reply_view(repo, reply)
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReply {
    pub requester: IdentityId,
    pub space_id: SpaceId,
    pub topic_id: TopicId,
    pub reply_id: ReplyId,
    pub content: String,
}

/// Edit a reply's content. The voice-immutability check runs before the
/// authorship check and applies to every role.
pub fn update_reply<R: SpaceRepository>(repo: &R, input: UpdateReply) -> DomainResult<ReplyView> {
    let (space, role) = load_space(repo, input.space_id, input.requester)?;
    space.ensure_active()?;
    let topic_id = require_topic(repo, space.id, input.topic_id)?;

    let Some(mut reply) = repo.find_reply(topic_id, input.reply_id)? else {
        return Err(Rejection::not_found());
    };

    let content = ReplyContent::new(input.content)?;
    reply.set_content(content)?;
    authorize_author_or_manager(
        role,
        reply.author_id,
        input.requester,
        "only the reply author, space OWNER, or ADMIN can update this reply",
    )?;

    repo.update_reply(&reply)?;
    tracing::info!(reply = %reply.id, "reply updated");
    reply_view(repo, reply)
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DeleteReply {
    pub requester: IdentityId,
    pub space_id: SpaceId,
    pub topic_id: TopicId,
    pub reply_id: ReplyId,
}

/// Delete a reply. Voice replies may be deleted even though their content
/// cannot be edited.
pub fn delete_reply<R: SpaceRepository>(repo: &R, input: DeleteReply) -> DomainResult<()> {
    let (space, role) = load_space(repo, input.space_id, input.requester)?;
    space.ensure_active()?;
    let topic_id = require_topic(repo, space.id, input.topic_id)?;

    let Some(reply) = repo.find_reply(topic_id, input.reply_id)? else {
        return Err(Rejection::not_found());
    };
    authorize_author_or_manager(
        role,
        reply.author_id,
        input.requester,
        "only the reply author, space OWNER, or ADMIN can delete this reply",
    )?;

    repo.delete_reply(reply.id)?;
    tracing::info!(reply = %reply.id, "reply deleted");
    Ok(())
}
