//! Operation entry points.
//!
//! One function per operation kind. Every entry point follows the same
//! sequencing: resolve existence (space, then nested resource) and the
//! requester's membership, with both absences collapsing into NotFound;
//! then the lifecycle gate, then authorization, then commit through the
//! repository. Nothing is written before every check has passed.

mod member;
mod reply;
mod space;
mod topic;

pub use member::{AddMembers, RemoveMembers, UpdateMemberRole, add_members, remove_members,
    update_member_role};
pub use reply::{CreateReply, DeleteReply, GetReply, ListReplies, UpdateReply, create_reply,
    delete_reply, get_reply, list_replies, update_reply};
pub use space::{ArchiveSpace, CreateSpace, GetSpace, ListSpaces, NewMember, UpdateSpace,
    archive_space, create_space, get_space, list_spaces, update_space};
pub use topic::{CreateTopic, DeleteTopic, GetTopic, ListTopics, UpdateTopic, create_topic,
    delete_topic, get_topic, list_topics, update_topic};

use atrium_auth::Role;
use atrium_core::{DomainResult, IdentityId, Rejection, SpaceId};
use atrium_spaces::{Membership, Space};

use crate::repository::SpaceRepository;
use crate::views::{IdentitySummary, MemberView, SpaceSummary};

/// Load a space together with the requester's role, collapsing "no such
/// space" and "not a member" into the same NotFound rejection.
pub(crate) fn load_space<R: SpaceRepository>(
    repo: &R,
    space_id: SpaceId,
    requester: IdentityId,
) -> DomainResult<(Space, Role)> {
    let Some((space, role)) = repo.find_space_with_requester_role(space_id, requester)? else {
        return Err(Rejection::not_found());
    };
    let Some(role) = role else {
        return Err(Rejection::not_found());
    };
    Ok((space, role))
}

/// Resolve an identity that the data model guarantees to exist. A miss
/// means broken referential integrity, not a user error.
pub(crate) fn identity_summary<R: SpaceRepository>(
    repo: &R,
    id: IdentityId,
) -> DomainResult<IdentitySummary> {
    match repo.find_identity(id)? {
        Some(identity) => Ok(IdentitySummary::from(&identity)),
        None => {
            tracing::error!(identity = %id, "membership references a missing identity");
            Err(Rejection::unexpected("persistence failure"))
        }
    }
}

/// Expand memberships into member rows with directory details.
pub(crate) fn member_views<R: SpaceRepository>(
    repo: &R,
    memberships: &[Membership],
) -> DomainResult<Vec<MemberView>> {
    let ids: Vec<IdentityId> = memberships.iter().map(|m| m.identity_id).collect();
    let identities = repo.find_identities(&ids)?;

    let mut views = Vec::with_capacity(memberships.len());
    for membership in memberships {
        let Some(identity) = identities.iter().find(|i| i.id == membership.identity_id) else {
            tracing::error!(identity = %membership.identity_id, "membership references a missing identity");
            return Err(Rejection::unexpected("persistence failure"));
        };
        views.push(MemberView {
            id: identity.id,
            name: identity.display_name.clone(),
            email: identity.email.clone(),
            role: membership.role,
        });
    }
    Ok(views)
}

pub(crate) fn space_summary<R: SpaceRepository>(
    repo: &R,
    space: &Space,
    current_user_role: Role,
) -> DomainResult<SpaceSummary> {
    let member_count = repo.list_memberships(space.id)?.len();
    let owner = identity_summary(repo, space.owner_id)?;
    Ok(SpaceSummary {
        id: space.id,
        name: space.name.clone(),
        description: space.description.clone(),
        kind: space.kind,
        status: space.status,
        member_count,
        created_at: space.created_at,
        archived_at: space.archived_at,
        owner,
        current_user_role,
    })
}
