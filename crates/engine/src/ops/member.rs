//! Membership operations: add, remove, change role.

use serde::Deserialize;

use atrium_auth::Role;
use atrium_core::{DomainResult, IdentityId, Rejection, SpaceId};
use atrium_spaces::{MembershipViolation, validate_for_addition, validate_for_removal};

use crate::authorize::{SpaceAction, authorize};
use crate::ops::load_space;
use crate::ops::space::{NewMember, member_specs};
use crate::repository::SpaceRepository;
use crate::views::{MemberRoleUpdated, MembersAdded, MembersRemoved};

#[derive(Debug, Clone, Deserialize)]
pub struct AddMembers {
    pub requester: IdentityId,
    pub space_id: SpaceId,
    pub members: Vec<NewMember>,
}

/// Add members to an active space. Candidates who already belong are
/// skipped; the call succeeds with `added_count` reflecting actual
/// insertions (possibly zero).
pub fn add_members<R: SpaceRepository>(repo: &R, input: AddMembers) -> DomainResult<MembersAdded> {
    let (space, role) = load_space(repo, input.space_id, input.requester)?;
    space.ensure_active()?;
    authorize(SpaceAction::AddMembers, Some(role))?;

    let candidates = member_specs(&input.members)?;
    let current = repo.list_memberships(space.id)?;
    let emails: Vec<_> = candidates.iter().map(|m| m.email.clone()).collect();
    let resolved = repo.find_identities_by_emails(&emails)?;

    let to_add = validate_for_addition(space.kind, &current, &candidates, &resolved)?;
    if to_add.is_empty() {
        return Ok(MembersAdded {
            space_id: space.id,
            added_count: 0,
        });
    }

    let added_count = repo.add_members(space.id, &to_add)?;
    tracing::info!(space = %space.id, added = added_count, "members added");
    Ok(MembersAdded {
        space_id: space.id,
        added_count,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoveMembers {
    pub requester: IdentityId,
    pub space_id: SpaceId,
    pub member_ids: Vec<IdentityId>,
}

/// Remove members from an active space. The OWNER and the requester
/// themselves are never valid targets.
pub fn remove_members<R: SpaceRepository>(
    repo: &R,
    input: RemoveMembers,
) -> DomainResult<MembersRemoved> {
    let (space, role) = load_space(repo, input.space_id, input.requester)?;
    space.ensure_active()?;
    authorize(SpaceAction::RemoveMembers, Some(role))?;

    let current = repo.list_memberships(space.id)?;
    validate_for_removal(input.requester, &current, &input.member_ids)?;

    let removed_count = repo.remove_members(space.id, &input.member_ids)?;
    tracing::info!(space = %space.id, removed = removed_count, "members removed");
    Ok(MembersRemoved {
        space_id: space.id,
        removed_count,
    })
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UpdateMemberRole {
    pub requester: IdentityId,
    pub space_id: SpaceId,
    pub member_id: IdentityId,
    pub role: Role,
}

/// Change a member's role. OWNER-only, never on oneself, and ownership
/// transfer is not exposed through this operation.
pub fn update_member_role<R: SpaceRepository>(
    repo: &R,
    input: UpdateMemberRole,
) -> DomainResult<MemberRoleUpdated> {
    let (space, role) = load_space(repo, input.space_id, input.requester)?;
    space.ensure_active()?;
    authorize(SpaceAction::ChangeMemberRole, Some(role))?;

    if input.role.is_owner() {
        return Err(Rejection::forbidden(
            "cannot assign the OWNER role when changing member roles",
        ));
    }
    if input.member_id == input.requester {
        return Err(Rejection::forbidden("cannot change your own role"));
    }

    let current = repo.list_memberships(space.id)?;
    if !current.iter().any(|m| m.identity_id == input.member_id) {
        return Err(MembershipViolation::UnknownMember.into());
    }

    repo.update_membership_role(space.id, input.member_id, input.role)?;
    tracing::info!(space = %space.id, member = %input.member_id, role = %input.role, "member role updated");
    Ok(MemberRoleUpdated {
        space_id: space.id,
        member_id: input.member_id,
        role: input.role,
    })
}
