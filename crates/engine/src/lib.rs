//! `atrium-engine` — authorization and invariant enforcement for spaces.
//!
//! The engine is a library, not a network endpoint. Each operation entry
//! point takes a [`repository::SpaceRepository`] implementation plus an
//! input struct and returns either a success view or a typed
//! [`atrium_core::Rejection`]; nothing else crosses the boundary. The
//! engine holds no shared mutable state and is safe to invoke
//! concurrently; atomicity of multi-row writes is the repository's
//! responsibility.

pub mod authorize;
pub mod ops;
pub mod repository;
pub mod views;

pub use authorize::{SpaceAction, authorize, authorize_author_or_manager};
pub use repository::{RepoResult, RepositoryError, SpaceRepository};
