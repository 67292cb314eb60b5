//! Memberships and the structural rules that guard them.
//!
//! Every mutation of a space's member set passes through one of the
//! `validate_for_*` checks **before** commit. The checks are pure: they
//! operate on the candidate set plus whatever identities the caller has
//! already resolved through the repository, and return either the
//! normalized set to persist or the violated rule.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use atrium_auth::Role;
use atrium_core::{EmailAddress, IdentityId, Rejection, RejectionKind, SpaceId};

use crate::identity::Identity;
use crate::space::SpaceKind;

/// The (identity, role) pairing granting standing within one space.
/// Unique per (space, identity); owned by the space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub space_id: SpaceId,
    pub identity_id: IdentityId,
    pub role: Role,
}

/// A requested member, addressed by email before identity resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSpec {
    pub email: EmailAddress,
    pub role: Role,
}

/// A structural membership rule that a proposed mutation would break.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MembershipViolation {
    #[error("the space creator must hold the OWNER role")]
    OwnerRoleConflict,

    #[error("exactly one OWNER is required, found {0}")]
    OwnerCountInvalid(usize),

    #[error("user {0} is external and cannot join an internal space")]
    ExternalInInternalSpace(EmailAddress),

    #[error("external spaces must include at least one internal member")]
    MissingInternalMember,

    #[error("cannot assign the OWNER role when adding members")]
    CannotGrantOwnerHere,

    #[error("user {0} not found, cannot add to an internal space")]
    UnknownIdentityInInternalSpace(EmailAddress),

    #[error("cannot remove the OWNER from the space")]
    CannotRemoveOwner,

    #[error("cannot remove yourself from the space")]
    CannotRemoveSelf,

    #[error("one or more members are not part of this space")]
    UnknownMember,
}

impl From<MembershipViolation> for Rejection {
    fn from(violation: MembershipViolation) -> Self {
        use MembershipViolation::*;
        let kind = match &violation {
            OwnerRoleConflict | OwnerCountInvalid(_) | ExternalInInternalSpace(_)
            | MissingInternalMember => RejectionKind::InvariantViolation,
            CannotGrantOwnerHere | CannotRemoveOwner | CannotRemoveSelf => RejectionKind::Forbidden,
            UnknownIdentityInInternalSpace(_) | UnknownMember => RejectionKind::Conflict,
        };
        Rejection::new(kind, violation.to_string())
    }
}

fn resolved_by_email<'a>(
    resolved: &'a [Identity],
) -> impl Fn(&EmailAddress) -> Option<&'a Identity> {
    move |email| resolved.iter().find(|identity| &identity.email == email)
}

/// Validate the member set for a space about to be created.
///
/// Returns the final member list: the candidates plus the owner, appended
/// if absent. `resolved` holds the identities known to the directory for
/// the candidate emails (and the owner). Unknown emails are provisioned as
/// external later; for INTERNAL spaces only *already external* identities
/// are rejected here; the asymmetry for unknowns is inherited behavior.
pub fn validate_for_creation(
    owner: &Identity,
    kind: SpaceKind,
    candidates: &[MemberSpec],
    resolved: &[Identity],
) -> Result<Vec<MemberSpec>, MembershipViolation> {
    let mut final_members: Vec<MemberSpec> = candidates.to_vec();

    match final_members.iter().find(|m| m.email == owner.email) {
        Some(spec) if spec.role != Role::Owner => return Err(MembershipViolation::OwnerRoleConflict),
        Some(_) => {}
        None => final_members.push(MemberSpec {
            email: owner.email.clone(),
            role: Role::Owner,
        }),
    }

    let owner_count = final_members.iter().filter(|m| m.role.is_owner()).count();
    if owner_count != 1 {
        return Err(MembershipViolation::OwnerCountInvalid(owner_count));
    }

    let lookup = resolved_by_email(resolved);
    match kind {
        SpaceKind::Internal => {
            for member in &final_members {
                if let Some(identity) = lookup(&member.email) {
                    if !identity.is_internal {
                        return Err(MembershipViolation::ExternalInInternalSpace(
                            member.email.clone(),
                        ));
                    }
                }
            }
        }
        SpaceKind::External => {
            let has_internal = final_members
                .iter()
                .filter_map(|member| lookup(&member.email))
                .any(|identity| identity.is_internal);
            if !has_internal {
                return Err(MembershipViolation::MissingInternalMember);
            }
        }
    }

    Ok(final_members)
}

/// Validate candidates for addition to an existing space.
///
/// Candidates who already hold a membership are skipped, not rejected:
/// re-adding a member is a no-op. Returns the deduplicated list actually
/// to be added (possibly empty). Ownership transfer is not exposed here.
pub fn validate_for_addition(
    kind: SpaceKind,
    current: &[Membership],
    candidates: &[MemberSpec],
    resolved: &[Identity],
) -> Result<Vec<MemberSpec>, MembershipViolation> {
    let lookup = resolved_by_email(resolved);
    let mut to_add: Vec<MemberSpec> = Vec::new();

    for candidate in candidates {
        if candidate.role.is_owner() {
            return Err(MembershipViolation::CannotGrantOwnerHere);
        }

        match lookup(&candidate.email) {
            Some(identity) => {
                let already_member = current.iter().any(|m| m.identity_id == identity.id);
                if already_member {
                    continue;
                }
                if kind == SpaceKind::Internal && !identity.is_internal {
                    return Err(MembershipViolation::ExternalInInternalSpace(
                        candidate.email.clone(),
                    ));
                }
            }
            None => {
                if kind == SpaceKind::Internal {
                    return Err(MembershipViolation::UnknownIdentityInInternalSpace(
                        candidate.email.clone(),
                    ));
                }
            }
        }

        if !to_add.iter().any(|m: &MemberSpec| m.email == candidate.email) {
            to_add.push(candidate.clone());
        }
    }

    Ok(to_add)
}

/// Validate removal targets against the current member set.
pub fn validate_for_removal(
    requester: IdentityId,
    current: &[Membership],
    targets: &[IdentityId],
) -> Result<(), MembershipViolation> {
    for target in targets {
        let Some(membership) = current.iter().find(|m| &m.identity_id == target) else {
            return Err(MembershipViolation::UnknownMember);
        };
        if membership.role.is_owner() {
            return Err(MembershipViolation::CannotRemoveOwner);
        }
        if *target == requester {
            return Err(MembershipViolation::CannotRemoveSelf);
        }
    }
    Ok(())
}
