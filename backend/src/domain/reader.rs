//! Read-only queries over posts, comments, and comment authors.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use super::ports::{CommentRepository, PostFilter, PostRepository, ProfileStore, StoreError};
use super::post::{Post, PostId};
use super::profile::{Role, UserId};

/// Display name used when a comment author has no profile or username.
const ANONYMOUS: &str = "Anonymous";

/// Comment joined with its author's display name, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Read-only content queries parameterised by the viewer's role.
pub struct ContentReader {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    profiles: Arc<dyn ProfileStore>,
}

impl ContentReader {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            posts,
            comments,
            profiles,
        }
    }

    /// List posts newest-first. Admin viewers see drafts; everyone else sees
    /// only published posts.
    pub async fn list_posts(&self, viewer: Option<Role>) -> Result<Vec<Post>, StoreError> {
        let filter = match viewer {
            Some(Role::Admin) => PostFilter::All,
            Some(Role::Commenter) | None => PostFilter::PublishedOnly,
        };
        self.posts.list(filter).await
    }

    /// Fetch one post by its slug.
    pub async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        self.posts.find_by_slug(slug).await
    }

    /// A post's comments in ascending creation order, with author usernames
    /// resolved through one batched profile lookup.
    pub async fn comments_for_post(&self, post: PostId) -> Result<Vec<CommentView>, StoreError> {
        let comments = self.comments.list_for_post(post).await?;

        let mut author_ids: Vec<UserId> = Vec::new();
        for comment in &comments {
            if !author_ids.contains(&comment.user_id) {
                author_ids.push(comment.user_id.clone());
            }
        }

        let usernames: HashMap<UserId, String> = if author_ids.is_empty() {
            HashMap::new()
        } else {
            match self.profiles.profiles_by_ids(&author_ids).await {
                Ok(profiles) => profiles
                    .into_iter()
                    .filter_map(|profile| profile.username.map(|name| (profile.id, name)))
                    .collect(),
                Err(error) => {
                    // Comments still render; authors fall back to Anonymous.
                    warn!(%error, "comment author lookup failed");
                    HashMap::new()
                }
            }
        };

        Ok(comments
            .into_iter()
            .map(|comment| CommentView {
                author: usernames
                    .get(&comment.user_id)
                    .cloned()
                    .unwrap_or_else(|| ANONYMOUS.to_owned()),
                content: comment.content,
                created_at: comment.created_at,
            })
            .collect())
    }
}
