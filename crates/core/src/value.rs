//! Validated domain values.
//!
//! Shape/typing of inbound payloads is an external concern; value rules
//! (length limits, email shape) live here so they hold on every path into
//! the engine, not just the HTTP one.

use serde::{Deserialize, Serialize};

use crate::error::{DomainResult, Rejection};

const NAME_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 500;
const REPLY_CONTENT_MAX: usize = 2000;

/// Space display name: trimmed, 1..=100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceName(String);

impl SpaceName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Rejection::validation("space name cannot be empty"));
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(Rejection::validation(format!(
                "space name cannot exceed {NAME_MAX} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SpaceName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Topic title: trimmed, 1..=100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicTitle(String);

impl TopicTitle {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Rejection::validation("topic title cannot be empty"));
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(Rejection::validation(format!(
                "topic title cannot exceed {NAME_MAX} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for TopicTitle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text description attached to spaces and topics. At most 500
/// characters; empty is allowed (descriptions are optional upstream).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.chars().count() > DESCRIPTION_MAX {
            return Err(Rejection::validation(format!(
                "description cannot exceed {DESCRIPTION_MAX} characters"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reply body: 1..=2000 characters. For voice replies this holds the
/// transcript/asset reference and is immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplyContent(String);

impl ReplyContent {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(Rejection::validation("reply content cannot be empty"));
        }
        if value.chars().count() > REPLY_CONTENT_MAX {
            return Err(Rejection::validation(format!(
                "reply content cannot exceed {REPLY_CONTENT_MAX} characters"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Directory email address, normalized to trimmed lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let normalized = value.trim().to_lowercase();
        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(Rejection::validation("invalid email format"));
        };
        if local.is_empty() || domain.is_empty() {
            return Err(Rejection::validation("invalid email format"));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before `@`, used as the default display name when the
    /// directory provisions a previously unknown identity.
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }
}

impl core::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
