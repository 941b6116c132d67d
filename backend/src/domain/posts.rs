//! Post authoring workflow: create and update, owning slug assignment.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use super::ports::{NewPost, PageCache, PostChanges, PostRepository, StoreError};
use super::post::{DraftError, PostDraft};
use super::profile::UserId;
use super::slug::Slug;

/// Raw authoring fields as submitted by the create/edit forms.
#[derive(Debug, Clone, Copy)]
pub struct PostInput<'a> {
    pub title: &'a str,
    pub content: &'a str,
    /// Optional explicit slug override; blank means "derive from title".
    pub slug: &'a str,
    pub published: bool,
}

/// Typed outcome for the authoring operations.
///
/// The user-facing behaviour for everything except `NotAuthenticated` is a
/// silent form re-render, but the variants stay distinguishable so tests can
/// tell a deliberate no-op from a crash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostAuthoringError {
    /// Submission arrived without an authenticated identity.
    #[error("authentication required")]
    NotAuthenticated,
    /// Title, content, or the derived slug failed validation.
    #[error(transparent)]
    Validation(#[from] DraftError),
    /// The store rejected the write.
    #[error(transparent)]
    Persistence(#[from] StoreError),
    /// Update matched no row for the submitted slug.
    #[error("no post stored under the submitted slug")]
    MissingPost,
}

/// Validates and persists create/update operations for posts.
pub struct PostAuthoringService {
    posts: Arc<dyn PostRepository>,
    cache: Arc<dyn PageCache>,
}

impl PostAuthoringService {
    pub fn new(posts: Arc<dyn PostRepository>, cache: Arc<dyn PageCache>) -> Self {
        Self { posts, cache }
    }

    /// Create a new post and return the slug it was stored under.
    ///
    /// Identity is re-checked here, independent of the page-load admin gate,
    /// because the action can be invoked directly.
    pub async fn create_post(
        &self,
        identity: Option<&UserId>,
        input: PostInput<'_>,
    ) -> Result<Slug, PostAuthoringError> {
        let author = identity.ok_or(PostAuthoringError::NotAuthenticated)?;
        let draft = PostDraft::from_form(input.title, input.content, input.slug, input.published)?;

        let post = self
            .posts
            .insert(NewPost {
                title: draft.title().to_owned(),
                content: draft.content().to_owned(),
                slug: draft.slug().clone(),
                published: draft.published(),
                author: author.clone(),
            })
            .await
            .map_err(|error| {
                warn!(%error, slug = %draft.slug(), "post insert failed");
                error
            })?;

        info!(slug = %post.slug, published = post.published, "post created");
        self.invalidate_views(None, &post.slug).await;
        Ok(post.slug)
    }

    /// Overwrite the post currently stored under `existing_slug` and return
    /// the (possibly changed) slug it now lives under.
    pub async fn update_post(
        &self,
        identity: Option<&UserId>,
        existing_slug: &str,
        input: PostInput<'_>,
    ) -> Result<Slug, PostAuthoringError> {
        if identity.is_none() {
            return Err(PostAuthoringError::NotAuthenticated);
        }
        let draft = PostDraft::from_form(input.title, input.content, input.slug, input.published)?;
        let new_slug = draft.slug().clone();

        let matched = self
            .posts
            .update_by_slug(
                existing_slug,
                PostChanges {
                    title: draft.title().to_owned(),
                    content: draft.content().to_owned(),
                    slug: new_slug.clone(),
                    published: draft.published(),
                    updated_at: Utc::now(),
                },
            )
            .await
            .map_err(|error| {
                warn!(%error, slug = existing_slug, "post update failed");
                error
            })?;
        if !matched {
            warn!(slug = existing_slug, "post update matched no row");
            return Err(PostAuthoringError::MissingPost);
        }

        info!(from = existing_slug, to = %new_slug, "post updated");
        self.invalidate_views(Some(existing_slug), &new_slug).await;
        Ok(new_slug)
    }

    /// Drop stale renderings: the listing, the new detail path, and the old
    /// detail path when an update moved the post.
    async fn invalidate_views(&self, old_slug: Option<&str>, new_slug: &Slug) {
        self.cache.invalidate("/blog").await;
        self.cache.invalidate(&format!("/blog/{new_slug}")).await;
        if let Some(old) = old_slug {
            if old != new_slug.as_str() {
                self.cache.invalidate(&format!("/blog/{old}")).await;
            }
        }
    }
}
