//! Comment record and comment-input validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::post::PostId;
use super::profile::UserId;

/// Stable comment identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(Uuid);

impl CommentId {
    /// Wrap a store-assigned identifier.
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// Comment left by an authenticated visitor. Never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub user_id: UserId,
    pub post_id: PostId,
}

/// Validation error for comment input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentDraftError {
    #[error("comment content must not be empty")]
    EmptyContent,
}

/// Validated comment body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft(String);

impl CommentDraft {
    /// Trim and validate raw comment content.
    pub fn new(content: &str) -> Result<Self, CommentDraftError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(CommentDraftError::EmptyContent);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated content.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<CommentDraft> for String {
    fn from(value: CommentDraft) -> Self {
        value.0
    }
}
