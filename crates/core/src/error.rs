//! Rejection model shared across the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the domain and engine layers.
pub type DomainResult<T> = Result<T, Rejection>;

/// Machine-checkable rejection category.
///
/// Callers map these to transport status codes (NotFound→404, Forbidden→403,
/// InvalidState/InvariantViolation/Conflict/Validation→400, Unexpected→500).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// The resource is absent, or the requester is not a member of the
    /// enclosing space. Merged on purpose: non-members must not learn
    /// whether a resource exists.
    NotFound,

    /// The requester's role is insufficient, or a self-action restriction
    /// applies (self-removal, self-role-change, voice-reply edits).
    Forbidden,

    /// The resource is in a state that forbids the operation
    /// (archived space, repeated archive).
    InvalidState,

    /// A structural membership invariant would be broken
    /// (owner count, internal/external mix).
    InvariantViolation,

    /// The request references identities or members the space does not
    /// recognize where that is disallowed.
    Conflict,

    /// A value failed domain validation (length limits, email shape).
    Validation,

    /// Persistence or transport failure. Carries no business-rule detail.
    Unexpected,
}

/// The only error that crosses an operation boundary.
///
/// Domain rule failures are recovered at each entry point and returned as a
/// typed `Rejection`; nothing is thrown past the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct Rejection {
    pub kind: RejectionKind,
    pub message: String,
}

impl Rejection {
    pub fn new(kind: RejectionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(
            RejectionKind::NotFound,
            "resource not found or you are not a member",
        )
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(RejectionKind::Forbidden, message)
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(RejectionKind::InvalidState, message)
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::new(RejectionKind::InvariantViolation, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(RejectionKind::Conflict, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(RejectionKind::Validation, message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(RejectionKind::Unexpected, message)
    }
}
