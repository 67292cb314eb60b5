//! The role decision table.
//!
//! Tiers are not totally ordered for every operation (role-change is
//! OWNER-only even though ADMIN manages members otherwise), so each action
//! names its rule explicitly instead of comparing tiers.

use serde::Serialize;

use atrium_auth::Role;
use atrium_core::{DomainResult, IdentityId, Rejection};

/// Operation kinds whose authorization depends only on the requester's
/// role. Topic/reply modification additionally admits the original author
/// and is checked through [`authorize_author_or_manager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceAction {
    /// Read the space, its members, topics, or replies.
    View,
    UpdateSpace,
    ArchiveSpace,
    AddMembers,
    RemoveMembers,
    ChangeMemberRole,
    CreateTopic,
    CreateReply,
}

impl SpaceAction {
    /// The table row: does `role` satisfy this action?
    pub fn allowed_for(&self, role: Role) -> bool {
        match self {
            SpaceAction::View => true,
            SpaceAction::UpdateSpace
            | SpaceAction::ArchiveSpace
            | SpaceAction::AddMembers
            | SpaceAction::RemoveMembers => role.can_manage_space(),
            SpaceAction::ChangeMemberRole => role.is_owner(),
            SpaceAction::CreateTopic | SpaceAction::CreateReply => role.can_contribute(),
        }
    }

    fn denial_message(&self) -> &'static str {
        match self {
            SpaceAction::View => "membership required",
            SpaceAction::UpdateSpace | SpaceAction::ArchiveSpace => {
                "only OWNER or ADMIN can manage this space"
            }
            SpaceAction::AddMembers => "only OWNER or ADMIN can add members",
            SpaceAction::RemoveMembers => "only OWNER or ADMIN can remove members",
            SpaceAction::ChangeMemberRole => "only the OWNER can change member roles",
            SpaceAction::CreateTopic => "only OWNER, ADMIN, or CONTRIBUTOR can create topics",
            SpaceAction::CreateReply => "only OWNER, ADMIN, or CONTRIBUTOR can reply to topics",
        }
    }
}

/// Authorize a role-gated action.
///
/// `None` means the requester holds no membership in the space; that is
/// reported as NotFound, indistinguishable from an absent space, so
/// non-members never learn what exists.
pub fn authorize(action: SpaceAction, role: Option<Role>) -> DomainResult<Role> {
    let Some(role) = role else {
        return Err(Rejection::not_found());
    };
    if !action.allowed_for(role) {
        tracing::debug!(action = ?action, role = %role, "authorization denied");
        return Err(Rejection::forbidden(action.denial_message()));
    }
    Ok(role)
}

/// Authorize modification of an authored resource: space managers may
/// always act; everyone else only on their own content.
pub fn authorize_author_or_manager(
    role: Role,
    author_id: IdentityId,
    requester: IdentityId,
    denial: &str,
) -> DomainResult<()> {
    if role.can_manage_space() || author_id == requester {
        return Ok(());
    }
    tracing::debug!(role = %role, "authorization denied for authored resource");
    Err(Rejection::forbidden(denial.to_string()))
}
