//! Space operations: create, list, read, update, archive.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use atrium_auth::Role;
use atrium_core::{Description, DomainResult, EmailAddress, IdentityId, Rejection, SpaceId,
    SpaceName};
use atrium_spaces::{MemberSpec, Space, SpaceKind, SpaceMetadata, SpaceStatus,
    validate_for_creation};

use crate::authorize::{SpaceAction, authorize};
use crate::ops::{identity_summary, load_space, member_views, space_summary};
use crate::repository::SpaceRepository;
use crate::views::{SpaceCreated, SpaceSummary, SpaceView};

/// A requested member, as supplied by the caller (email not yet resolved).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewMember {
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSpace {
    pub requester: IdentityId,
    pub name: String,
    pub description: Option<String>,
    pub kind: SpaceKind,
    pub members: Vec<NewMember>,
    #[serde(default)]
    pub metadata: SpaceMetadata,
    pub now: DateTime<Utc>,
}

/// Create a space with its initial member set in one atomic step.
///
/// The creator must be a known internal identity and ends up as the
/// single OWNER, whether or not they listed themselves.
pub fn create_space<R: SpaceRepository>(repo: &R, input: CreateSpace) -> DomainResult<SpaceCreated> {
    let owner = match repo.find_identity(input.requester)? {
        Some(identity) if identity.is_internal => identity,
        _ => return Err(Rejection::not_found()),
    };

    let name = SpaceName::new(input.name)?;
    let description = input.description.map(Description::new).transpose()?;
    let candidates = member_specs(&input.members)?;

    let mut emails: Vec<EmailAddress> = candidates.iter().map(|m| m.email.clone()).collect();
    emails.push(owner.email.clone());
    let resolved = repo.find_identities_by_emails(&emails)?;

    let final_members = validate_for_creation(&owner, input.kind, &candidates, &resolved)?;

    let space = Space::new(
        SpaceId::new(),
        name,
        description,
        input.kind,
        owner.id,
        input.metadata,
        input.now,
    );
    let memberships = repo.create_space_with_members(&space, &final_members)?;

    tracing::info!(space = %space.id, kind = ?space.kind, members = memberships.len(), "space created");

    Ok(SpaceCreated {
        id: space.id,
        name: space.name,
        kind: space.kind,
        status: space.status,
        member_count: memberships.len(),
        created_at: space.created_at,
    })
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ListSpaces {
    pub requester: IdentityId,
}

/// Every space the requester belongs to, newest first.
pub fn list_spaces<R: SpaceRepository>(
    repo: &R,
    input: ListSpaces,
) -> DomainResult<Vec<SpaceSummary>> {
    let rows = repo.list_spaces_for(input.requester)?;

    let mut summaries = Vec::with_capacity(rows.len());
    for (space, role) in rows {
        summaries.push(space_summary(repo, &space, role)?);
    }
    summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(summaries)
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GetSpace {
    pub requester: IdentityId,
    pub space_id: SpaceId,
}

/// Full space view with the member list. Any member may read, including
/// in archived spaces.
pub fn get_space<R: SpaceRepository>(repo: &R, input: GetSpace) -> DomainResult<SpaceView> {
    let (space, role) = load_space(repo, input.space_id, input.requester)?;
    let role = authorize(SpaceAction::View, Some(role))?;

    let memberships = repo.list_memberships(space.id)?;
    let members = member_views(repo, &memberships)?;
    let owner = identity_summary(repo, space.owner_id)?;

    Ok(SpaceView {
        id: space.id,
        name: space.name,
        description: space.description,
        kind: space.kind,
        status: space.status,
        metadata: space.metadata,
        created_at: space.created_at,
        archived_at: space.archived_at,
        owner,
        current_user_role: role,
        member_count: members.len(),
        members,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSpace {
    pub requester: IdentityId,
    pub space_id: SpaceId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<SpaceStatus>,
    pub metadata: Option<SpaceMetadata>,
    pub now: DateTime<Utc>,
}

/// Update space settings and/or status. Requesting ARCHIVED here routes
/// through the same one-way transition as [`archive_space`].
pub fn update_space<R: SpaceRepository>(repo: &R, input: UpdateSpace) -> DomainResult<SpaceSummary> {
    let (mut space, role) = load_space(repo, input.space_id, input.requester)?;
    space.ensure_active()?;
    let role = authorize(SpaceAction::UpdateSpace, Some(role))?;

    if let Some(name) = input.name {
        space.name = SpaceName::new(name)?;
    }
    if let Some(description) = input.description {
        space.description = Some(Description::new(description)?);
    }
    if let Some(metadata) = input.metadata {
        space.metadata = metadata;
    }
    if let Some(status) = input.status {
        space.set_status(status, input.now)?;
    }

    repo.update_space(&space)?;
    tracing::info!(space = %space.id, status = ?space.status, "space updated");
    space_summary(repo, &space, role)
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ArchiveSpace {
    pub requester: IdentityId,
    pub space_id: SpaceId,
    pub now: DateTime<Utc>,
}

/// One-way ACTIVE → ARCHIVED transition. The already-archived case
/// short-circuits before the role check, like every other lifecycle gate.
pub fn archive_space<R: SpaceRepository>(
    repo: &R,
    input: ArchiveSpace,
) -> DomainResult<SpaceSummary> {
    let (mut space, role) = load_space(repo, input.space_id, input.requester)?;
    if !space.is_active() {
        return Err(Rejection::invalid_state("space is already archived"));
    }
    let role = authorize(SpaceAction::ArchiveSpace, Some(role))?;

    space.archive(input.now)?;
    repo.update_space(&space)?;
    tracing::info!(space = %space.id, "space archived");
    space_summary(repo, &space, role)
}

pub(crate) fn member_specs(members: &[NewMember]) -> DomainResult<Vec<MemberSpec>> {
    members
        .iter()
        .map(|member| {
            Ok(MemberSpec {
                email: EmailAddress::new(member.email.as_str())?,
                role: member.role,
            })
        })
        .collect()
}
