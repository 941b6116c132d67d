//! In-memory adapters for local development and tests.
//!
//! `MemoryStore` implements the post, comment, and profile ports over plain
//! mutex-guarded maps, assigning ids and monotonically increasing timestamps
//! the way the hosted store would. `MemoryIdentityGateway` maps access tokens
//! to identities. Neither adapter is intended for production use.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::comment::{Comment, CommentId};
use crate::domain::ports::{
    AuthGatewayError, CommentRepository, IdentityGateway, NewComment, NewPost, PostChanges,
    PostFilter, PostRepository, ProfileStore, StoreError,
};
use crate::domain::post::{Post, PostId};
use crate::domain::profile::{Profile, UserId};

/// Recover the data behind a poisoned lock; a panicking holder must not
/// wedge the whole store.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mutex-guarded stand-in for the hosted relational store.
#[derive(Default)]
pub struct MemoryStore {
    posts: Mutex<Vec<Post>>,
    comments: Mutex<Vec<Comment>>,
    profiles: Mutex<HashMap<UserId, Profile>>,
    ticks: Mutex<i64>,
}

impl MemoryStore {
    /// Register a profile, as the external signup flow would.
    pub fn seed_profile(&self, profile: Profile) {
        let mut profiles = lock(&self.profiles);
        profiles.insert(profile.id.clone(), profile);
    }

    /// Insert a post row directly, bypassing the authoring workflow.
    pub async fn seed_post(&self, post: NewPost) -> Post {
        PostRepository::insert(self, post)
            .await
            .unwrap_or_else(|error| panic!("memory store insert cannot fail: {error}"))
    }

    /// Insert a comment row directly, bypassing the comment workflow.
    pub async fn seed_comment(&self, comment: NewComment) -> Comment {
        CommentRepository::insert(self, comment)
            .await
            .unwrap_or_else(|error| panic!("memory store insert cannot fail: {error}"))
    }

    /// Store-assigned creation timestamps must strictly increase so ordering
    /// queries behave like the hosted store's `created_at` ordering.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let mut ticks = lock(&self.ticks);
        *ticks += 1;
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().map_or_else(
            Utc::now,
            |base| base + Duration::seconds(*ticks),
        )
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
        let created_at = self.next_timestamp();
        let mut posts = lock(&self.posts);
        if posts.iter().any(|stored| stored.slug == post.slug) {
            return Err(StoreError::conflict(format!(
                "duplicate slug {}",
                post.slug
            )));
        }
        let stored = Post {
            id: PostId::new(Uuid::new_v4()),
            title: post.title,
            content: post.content,
            slug: post.slug,
            published: post.published,
            created_at,
            updated_at: created_at,
        };
        posts.push(stored.clone());
        Ok(stored)
    }

    async fn update_by_slug(&self, slug: &str, changes: PostChanges) -> Result<bool, StoreError> {
        let mut posts = lock(&self.posts);
        let Some(post) = posts.iter_mut().find(|post| post.slug.as_str() == slug) else {
            return Ok(false);
        };
        post.title = changes.title;
        post.content = changes.content;
        post.slug = changes.slug;
        post.published = changes.published;
        post.updated_at = changes.updated_at;
        Ok(true)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        let posts = lock(&self.posts);
        Ok(posts.iter().find(|post| post.slug.as_str() == slug).cloned())
    }

    async fn list(&self, filter: PostFilter) -> Result<Vec<Post>, StoreError> {
        let posts = lock(&self.posts);
        let mut selected: Vec<Post> = posts
            .iter()
            .filter(|post| match filter {
                PostFilter::All => true,
                PostFilter::PublishedOnly => post.published,
            })
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(selected)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn insert(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let created_at = self.next_timestamp();
        let stored = Comment {
            id: CommentId::new(Uuid::new_v4()),
            content: comment.content,
            created_at,
            user_id: comment.user_id,
            post_id: comment.post_id,
        };
        let mut comments = lock(&self.comments);
        comments.push(stored.clone());
        Ok(stored)
    }

    async fn list_for_post(&self, post: PostId) -> Result<Vec<Comment>, StoreError> {
        let comments = lock(&self.comments);
        let mut selected: Vec<Comment> = comments
            .iter()
            .filter(|comment| comment.post_id == post)
            .cloned()
            .collect();
        selected.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(selected)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn profile(&self, id: &UserId) -> Result<Option<Profile>, StoreError> {
        let profiles = lock(&self.profiles);
        Ok(profiles.get(id).cloned())
    }

    async fn profiles_by_ids(&self, ids: &[UserId]) -> Result<Vec<Profile>, StoreError> {
        let profiles = lock(&self.profiles);
        Ok(ids.iter().filter_map(|id| profiles.get(id).cloned()).collect())
    }
}

/// Token-to-identity map standing in for the hosted identity service.
#[derive(Default)]
pub struct MemoryIdentityGateway {
    sessions: Mutex<HashMap<String, UserId>>,
}

impl MemoryIdentityGateway {
    /// Associate an access token with an identity, as the external login
    /// flow would.
    pub fn issue(&self, access_token: impl Into<String>, user: UserId) {
        let mut sessions = lock(&self.sessions);
        sessions.insert(access_token.into(), user);
    }
}

#[async_trait]
impl IdentityGateway for MemoryIdentityGateway {
    async fn current_identity(
        &self,
        access_token: &str,
    ) -> Result<Option<UserId>, AuthGatewayError> {
        let sessions = lock(&self.sessions);
        Ok(sessions.get(access_token).cloned())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthGatewayError> {
        let mut sessions = lock(&self.sessions);
        sessions.remove(access_token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slug::Slug;
    use rstest::rstest;

    fn new_post(slug: &str) -> NewPost {
        NewPost {
            title: "Title".into(),
            content: "Body".into(),
            slug: Slug::parse(slug).expect("valid slug"),
            published: true,
            author: UserId::new("user-admin").expect("valid id"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_slugs_are_rejected_like_a_unique_index() {
        let store = MemoryStore::default();
        store.seed_post(new_post("taken")).await;
        let result = PostRepository::insert(&store, new_post("taken")).await;
        assert!(matches!(result, Err(StoreError::Conflict { .. })));
    }

    #[rstest]
    #[tokio::test]
    async fn timestamps_strictly_increase() {
        let store = MemoryStore::default();
        let first = store.seed_post(new_post("first")).await;
        let second = store.seed_post(new_post("second")).await;
        assert!(second.created_at > first.created_at);
    }

    #[rstest]
    #[tokio::test]
    async fn poisoned_locks_still_serve_the_stored_data() {
        let store = MemoryStore::default();
        store.seed_post(new_post("kept")).await;

        let poisoning = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.posts.lock().expect("lock not yet poisoned");
            panic!("poison the posts lock");
        }));
        assert!(poisoning.is_err());

        let posts = store.list(PostFilter::All).await.expect("list succeeds");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug.as_str(), "kept");
    }

    #[rstest]
    #[tokio::test]
    async fn gateway_resolves_and_revokes_tokens() {
        let gateway = MemoryIdentityGateway::default();
        let user = UserId::new("user-1").expect("valid id");
        gateway.issue("token-1", user.clone());

        assert_eq!(
            gateway.current_identity("token-1").await.expect("lookup"),
            Some(user)
        );
        gateway.sign_out("token-1").await.expect("sign out");
        assert_eq!(
            gateway.current_identity("token-1").await.expect("lookup"),
            None
        );
    }
}
