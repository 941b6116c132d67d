//! Comment authoring workflow, scoped to an existing post and an
//! authenticated identity.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use super::comment::{Comment, CommentDraft, CommentDraftError};
use super::ports::{CommentRepository, NewComment, PageCache, PostRepository, StoreError};
use super::profile::UserId;

/// Typed outcome for comment creation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentError {
    /// Submission arrived without an authenticated identity.
    #[error("authentication required")]
    NotAuthenticated,
    /// The target slug resolves to no post.
    #[error("no post stored under the submitted slug")]
    UnknownPost,
    /// Comment content failed validation.
    #[error(transparent)]
    Validation(#[from] CommentDraftError),
    /// The store rejected the lookup or the write.
    #[error(transparent)]
    Persistence(#[from] StoreError),
}

/// Validates and persists comment creation.
pub struct CommentService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    cache: Arc<dyn PageCache>,
}

impl CommentService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        cache: Arc<dyn PageCache>,
    ) -> Self {
        Self {
            posts,
            comments,
            cache,
        }
    }

    /// Attach a comment to the post stored under `post_slug`.
    ///
    /// The target post is resolved first so an unknown slug redirects to the
    /// listing before any validation happens. Store failures are logged and
    /// become a silent no-op at the HTTP layer.
    pub async fn create_comment(
        &self,
        identity: Option<&UserId>,
        post_slug: &str,
        content: &str,
    ) -> Result<Comment, CommentError> {
        let author = identity.ok_or(CommentError::NotAuthenticated)?;

        let post = self
            .posts
            .find_by_slug(post_slug)
            .await?
            .ok_or(CommentError::UnknownPost)?;

        let draft = CommentDraft::new(content)?;

        let comment = self
            .comments
            .insert(NewComment {
                content: draft.into(),
                user_id: author.clone(),
                post_id: post.id,
            })
            .await
            .map_err(|err| {
                error!(error = %err, slug = %post.slug, "comment insert failed");
                err
            })?;

        info!(slug = %post.slug, author = %author, "comment created");
        self.cache.invalidate(&format!("/blog/{}", post.slug)).await;
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{NewPost, PostFilter};
    use crate::domain::slug::Slug;
    use crate::outbound::memory::MemoryStore;
    use crate::outbound::render_cache::RenderCache;
    use rstest::{fixture, rstest};

    struct Harness {
        store: Arc<MemoryStore>,
        cache: Arc<RenderCache>,
        service: CommentService,
    }

    #[fixture]
    fn harness() -> Harness {
        let store = Arc::new(MemoryStore::default());
        let cache = Arc::new(RenderCache::default());
        let service = CommentService::new(store.clone(), store.clone(), cache.clone());
        Harness {
            store,
            cache,
            service,
        }
    }

    fn commenter() -> UserId {
        UserId::new("user-commenter").expect("valid id")
    }

    async fn seed_post(store: &MemoryStore, slug: &str) {
        store
            .seed_post(NewPost {
                title: "Existing".into(),
                content: "Body".into(),
                slug: Slug::parse(slug).expect("valid slug"),
                published: true,
                author: UserId::new("user-admin").expect("valid id"),
            })
            .await;
    }

    #[rstest]
    #[tokio::test]
    async fn comment_lands_on_the_target_post(harness: Harness) {
        seed_post(&harness.store, "existing-slug").await;

        let comment = harness
            .service
            .create_comment(Some(&commenter()), "existing-slug", " nice post ")
            .await
            .expect("comment succeeds");
        assert_eq!(comment.content, "nice post");
        assert_eq!(comment.user_id, commenter());
    }

    #[rstest]
    #[tokio::test]
    async fn comments_append_in_creation_order(harness: Harness) {
        seed_post(&harness.store, "existing-slug").await;
        for body in ["first", "second", "third"] {
            harness
                .service
                .create_comment(Some(&commenter()), "existing-slug", body)
                .await
                .expect("comment succeeds");
        }

        let post = harness
            .store
            .find_by_slug("existing-slug")
            .await
            .expect("lookup succeeds")
            .expect("post present");
        let stored = harness
            .store
            .list_for_post(post.id)
            .await
            .expect("list succeeds");
        let contents: Vec<&str> = stored.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, ["first", "second", "third"]);
        assert!(stored.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[rstest]
    #[tokio::test]
    async fn anonymous_callers_must_sign_in(harness: Harness) {
        seed_post(&harness.store, "existing-slug").await;
        let result = harness
            .service
            .create_comment(None, "existing-slug", "hello")
            .await;
        assert_eq!(result, Err(CommentError::NotAuthenticated));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_post_redirects_to_listing(harness: Harness) {
        let result = harness
            .service
            .create_comment(Some(&commenter()), "ghost", "hello")
            .await;
        assert_eq!(result, Err(CommentError::UnknownPost));
    }

    #[rstest]
    #[tokio::test]
    async fn blank_content_is_a_silent_no_op(harness: Harness) {
        seed_post(&harness.store, "existing-slug").await;
        let result = harness
            .service
            .create_comment(Some(&commenter()), "existing-slug", "   ")
            .await;
        assert_eq!(
            result,
            Err(CommentError::Validation(CommentDraftError::EmptyContent))
        );
        let posts = harness
            .store
            .list(PostFilter::All)
            .await
            .expect("list succeeds");
        let post = posts.first().expect("post seeded");
        assert!(harness
            .store
            .list_for_post(post.id)
            .await
            .expect("list succeeds")
            .is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn success_invalidates_the_detail_rendering(harness: Harness) {
        seed_post(&harness.store, "existing-slug").await;
        harness
            .cache
            .put("/blog/existing-slug", "<cached detail>")
            .await;

        harness
            .service
            .create_comment(Some(&commenter()), "existing-slug", "hello")
            .await
            .expect("comment succeeds");
        assert!(harness.cache.get("/blog/existing-slug").await.is_none());
    }
}
