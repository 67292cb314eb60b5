//! `atrium-spaces` — the collaboration domain model.
//!
//! Spaces, memberships, topics, and replies, plus the structural rules
//! that every membership mutation must satisfy before commit. Everything
//! here is pure state and decision logic; persistence and authorization
//! sequencing live in `atrium-engine`.

pub mod identity;
pub mod membership;
pub mod reply;
pub mod space;
pub mod topic;

pub use identity::Identity;
pub use membership::{
    MemberSpec, Membership, MembershipViolation, validate_for_addition, validate_for_creation,
    validate_for_removal,
};
pub use reply::Reply;
pub use space::{Space, SpaceKind, SpaceMetadata, SpaceStatus};
pub use topic::{Topic, TopicPatch, TopicStatus};
