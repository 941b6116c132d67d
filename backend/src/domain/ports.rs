//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with the hosted
//! auth/database service and the in-process render cache. Each trait exposes
//! strongly typed errors so adapters map their failures into predictable
//! variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::comment::Comment;
use super::post::{Post, PostId};
use super::profile::{Profile, UserId};
use super::slug::Slug;

/// Errors surfaced by the relational-store adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached at all.
    #[error("store connection failed: {message}")]
    Connection { message: String },
    /// A query or mutation failed during execution.
    #[error("store query failed: {message}")]
    Query { message: String },
    /// The store rejected a write that violated a unique constraint,
    /// typically the unique index on `posts.slug`.
    #[error("store rejected a conflicting write: {message}")]
    Conflict { message: String },
}

impl StoreError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-constraint violations.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

/// Errors surfaced by the identity-gateway adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthGatewayError {
    /// The gateway could not be reached.
    #[error("identity gateway unreachable: {message}")]
    Unreachable { message: String },
    /// The gateway answered but refused the operation.
    #[error("identity gateway rejected the request: {message}")]
    Rejected { message: String },
}

impl AuthGatewayError {
    /// Helper for transport-level failures.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    /// Helper for refused operations.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Authentication port backed by the hosted identity service.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Resolve the identity behind an access token, or `None` when the token
    /// is absent from the gateway's view (expired, revoked, unknown).
    async fn current_identity(&self, access_token: &str)
        -> Result<Option<UserId>, AuthGatewayError>;

    /// Invalidate the gateway-side session for an access token.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthGatewayError>;
}

/// Read-only port over the externally owned profiles table.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile for one identity.
    async fn profile(&self, id: &UserId) -> Result<Option<Profile>, StoreError>;

    /// Batched lookup for comment-author resolution. Identities without a
    /// profile are simply absent from the result.
    async fn profiles_by_ids(&self, ids: &[UserId]) -> Result<Vec<Profile>, StoreError>;
}

/// Insert payload for a new post row; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub slug: Slug,
    pub published: bool,
    pub author: UserId,
}

/// Column overwrite set for the update-by-slug path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
    pub slug: Slug,
    pub published: bool,
    pub updated_at: DateTime<Utc>,
}

/// Visibility filter for post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    /// Every post, drafts included (admin viewers).
    All,
    /// Only `published = true` posts.
    PublishedOnly,
}

/// Persistence port for the posts table.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post row and return it as stored.
    async fn insert(&self, post: NewPost) -> Result<Post, StoreError>;

    /// Overwrite the post currently stored under `slug`. Returns `false`
    /// when no row matched the filter.
    async fn update_by_slug(&self, slug: &str, changes: PostChanges) -> Result<bool, StoreError>;

    /// Fetch one post by its slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError>;

    /// List posts matching `filter`, ordered by creation time descending.
    async fn list(&self, filter: PostFilter) -> Result<Vec<Post>, StoreError>;
}

/// Insert payload for a new comment row; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub content: String,
    pub user_id: UserId,
    pub post_id: PostId,
}

/// Persistence port for the comments table.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a new comment row and return it as stored.
    async fn insert(&self, comment: NewComment) -> Result<Comment, StoreError>;

    /// List a post's comments ordered by creation time ascending.
    async fn list_for_post(&self, post: PostId) -> Result<Vec<Comment>, StoreError>;
}

/// Cache port over rendered pages, keyed by request path.
///
/// Infallible by design: a cache that cannot answer behaves as empty, and a
/// cache that cannot store simply drops the entry. Rendering never depends
/// on cache health.
#[async_trait]
pub trait PageCache: Send + Sync {
    /// Fetch a cached rendering for `path`.
    async fn get(&self, path: &str) -> Option<String>;

    /// Store a rendering for `path`.
    async fn put(&self, path: &str, html: &str);

    /// Drop any cached rendering for `path`.
    async fn invalidate(&self, path: &str);
}
