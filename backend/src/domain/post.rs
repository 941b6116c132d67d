//! Blog post aggregate and authoring-input validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::slug::{Slug, SlugError};

/// Stable post identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    /// Wrap a store-assigned identifier.
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Published or draft blog post.
///
/// ## Invariants
/// - `title` and `content` are non-empty once trimmed.
/// - `slug` satisfies the [`Slug`] character rules and is unique per post
///   (enforced by the store's unique index, not re-checked here).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub slug: Slug,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validation errors for authoring input, surfaced to handlers as a silent
/// form re-render rather than an error page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("content must not be empty")]
    EmptyContent,
    /// Neither the override nor the title reduced to a usable slug.
    #[error("derived slug is unusable: {0}")]
    UnusableSlug(#[from] SlugError),
}

/// Validated authoring input shared by the create and update paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    content: String,
    slug: Slug,
    published: bool,
}

impl PostDraft {
    /// Validate raw form fields into a draft.
    ///
    /// Title and content must be non-empty after trimming. The slug is
    /// derived from the trimmed override when one is supplied, otherwise from
    /// the title; a derivation that reduces to nothing fails validation.
    pub fn from_form(
        title: &str,
        content: &str,
        slug_override: &str,
        published: bool,
    ) -> Result<Self, DraftError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        let content = content.trim();
        if content.is_empty() {
            return Err(DraftError::EmptyContent);
        }

        let override_trimmed = slug_override.trim();
        let source = if override_trimmed.is_empty() {
            title
        } else {
            override_trimmed
        };
        let slug = Slug::derive(source)?;

        Ok(Self {
            title: title.to_owned(),
            content: content.to_owned(),
            slug,
            published,
        })
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn published(&self) -> bool {
        self.published
    }
}
