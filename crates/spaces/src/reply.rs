//! Replies, including the voice-reply immutability rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atrium_core::{DomainResult, IdentityId, Rejection, ReplyContent, ReplyId, TopicId};

/// A message owned by a topic.
///
/// A voice reply's content is frozen at creation; the row may still be
/// deleted by authorized actors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: ReplyId,
    pub topic_id: TopicId,
    pub author_id: IdentityId,
    pub content: ReplyContent,
    pub is_voice: bool,
    pub created_at: DateTime<Utc>,
}

impl Reply {
    pub fn new(
        id: ReplyId,
        topic_id: TopicId,
        author_id: IdentityId,
        content: ReplyContent,
        is_voice: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            topic_id,
            author_id,
            content,
            is_voice,
            created_at,
        }
    }

    /// Content edits are rejected for voice replies regardless of role.
    pub fn set_content(&mut self, content: ReplyContent) -> DomainResult<()> {
        if self.is_voice {
            return Err(Rejection::forbidden(
                "voice replies cannot be edited; delete and re-record instead",
            ));
        }
        self.content = content;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::RejectionKind;

    fn reply(is_voice: bool) -> Reply {
        Reply::new(
            ReplyId::new(),
            TopicId::new(),
            IdentityId::new(),
            ReplyContent::new("original").unwrap(),
            is_voice,
            Utc::now(),
        )
    }

    #[test]
    fn text_reply_content_is_editable() {
        let mut reply = reply(false);
        reply
            .set_content(ReplyContent::new("edited").unwrap())
            .unwrap();
        assert_eq!(reply.content.as_str(), "edited");
    }

    #[test]
    fn voice_reply_content_is_frozen() {
        let mut reply = reply(true);
        let err = reply
            .set_content(ReplyContent::new("edited").unwrap())
            .unwrap_err();
        assert_eq!(err.kind, RejectionKind::Forbidden);
        assert_eq!(reply.content.as_str(), "original");
    }
}
