//! `atrium-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod value;

pub use error::{DomainResult, Rejection, RejectionKind};
pub use id::{IdentityId, ReplyId, SpaceId, TopicId};
pub use value::{Description, EmailAddress, ReplyContent, SpaceName, TopicTitle};
