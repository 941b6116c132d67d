//! Adapter for the hosted auth/database service.
//!
//! The service exposes its tables over a REST row interface (equality
//! filters, ordering, batched `in` filters, insert, update-by-filter) and its
//! identity endpoints under `auth/v1/`. Every data operation here is a
//! single-row read or write; consistency is entirely the service's concern.

mod rows;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::domain::comment::Comment;
use crate::domain::ports::{
    AuthGatewayError, CommentRepository, IdentityGateway, NewComment, NewPost, PostChanges,
    PostFilter, PostRepository, ProfileStore, StoreError,
};
use crate::domain::post::{Post, PostId};
use crate::domain::profile::{Profile, UserId};

use self::rows::{
    AuthUser, CommentRow, NewCommentRow, NewPostRow, PostChangesRow, PostRow, ProfileRow,
    COMMENT_COLUMNS, POST_COLUMNS, PROFILE_COLUMNS,
};

/// Environment variable naming the hosted service's base URL.
pub const STORE_URL_VAR: &str = "STORE_URL";
/// Environment variable holding the service-role API key.
pub const STORE_SERVICE_KEY_VAR: &str = "STORE_SERVICE_KEY";

/// Connection settings for the hosted service.
#[derive(Debug, Clone)]
pub struct HostedConfig {
    pub base_url: Url,
    pub service_key: String,
}

impl HostedConfig {
    /// Read the connection settings from the environment. Returns `None`
    /// when no store is configured, letting callers fall back to the
    /// in-memory adapters for local development.
    pub fn from_env() -> Option<Self> {
        let raw_url = std::env::var(STORE_URL_VAR).ok()?;
        let service_key = std::env::var(STORE_SERVICE_KEY_VAR).unwrap_or_default();

        match normalise_base(&raw_url) {
            Ok(base_url) => Some(Self {
                base_url,
                service_key,
            }),
            Err(error) => {
                warn!(%error, url = %raw_url, "ignoring malformed store URL");
                None
            }
        }
    }
}

/// Parse a base URL and force a trailing slash so `Url::join` appends
/// instead of replacing the final path segment.
fn normalise_base(raw: &str) -> Result<Url, url::ParseError> {
    let trimmed = raw.trim_end_matches('/');
    Url::parse(&format!("{trimmed}/"))
}

/// Render a batched `in` filter value for an identifier list.
fn in_filter(ids: &[UserId]) -> String {
    let joined = ids
        .iter()
        .map(|id| format!("\"{}\"", id.as_str()))
        .collect::<Vec<_>>()
        .join(",");
    format!("in.({joined})")
}

/// Client for the hosted service, implementing the store-facing ports.
pub struct HostedStore {
    http: Client,
    base: Url,
    service_key: String,
}

impl HostedStore {
    pub fn new(config: HostedConfig) -> Self {
        Self {
            http: Client::new(),
            base: config.base_url,
            service_key: config.service_key,
        }
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        self.base
            .join(&format!("rest/v1/{table}"))
            .map_err(|error| StoreError::query(format!("invalid {table} URL: {error}")))
    }

    fn auth_url(&self, endpoint: &str) -> Result<Url, AuthGatewayError> {
        self.base
            .join(&format!("auth/v1/{endpoint}"))
            .map_err(|error| AuthGatewayError::rejected(format!("invalid auth URL: {error}")))
    }

    fn transport_error(error: &reqwest::Error) -> StoreError {
        if error.is_connect() || error.is_timeout() {
            StoreError::connection(error.to_string())
        } else {
            StoreError::query(error.to_string())
        }
    }

    /// Map non-success statuses into store errors; a 409 marks a
    /// unique-constraint violation (the slug index).
    fn check_status(context: &str, response: &Response) -> Result<(), StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::CONFLICT {
            return Err(StoreError::conflict(format!("{context} returned {status}")));
        }
        Err(StoreError::query(format!("{context} returned {status}")))
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        context: &str,
        url: Url,
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .http
            .get(url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(|error| Self::transport_error(&error))?;
        Self::check_status(context, &response)?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|error| StoreError::query(format!("{context} returned bad payload: {error}")))
    }

    /// Issue a write (`POST` insert or `PATCH` update-by-filter) and return
    /// the affected rows.
    async fn write_rows<T: DeserializeOwned, B: Serialize>(
        &self,
        context: &str,
        builder: reqwest::RequestBuilder,
        body: &B,
    ) -> Result<Vec<T>, StoreError> {
        let response = builder
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(|error| Self::transport_error(&error))?;
        Self::check_status(context, &response)?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|error| StoreError::query(format!("{context} returned bad payload: {error}")))
    }
}

#[async_trait]
impl PostRepository for HostedStore {
    async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
        let url = self.table_url("posts")?;
        let row = NewPostRow {
            title: &post.title,
            content: &post.content,
            slug: post.slug.as_str(),
            published: post.published,
            user_id: post.author.as_str(),
        };
        let rows: Vec<PostRow> = self
            .write_rows("posts insert", self.http.post(url), &row)
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::query("posts insert returned no row"))?
            .try_into()
    }

    async fn update_by_slug(&self, slug: &str, changes: PostChanges) -> Result<bool, StoreError> {
        let mut url = self.table_url("posts")?;
        url.query_pairs_mut().append_pair("slug", &format!("eq.{slug}"));
        let row = PostChangesRow {
            title: &changes.title,
            content: &changes.content,
            slug: changes.slug.as_str(),
            published: changes.published,
            updated_at: changes.updated_at,
        };
        let rows: Vec<PostRow> = self
            .write_rows("posts update", self.http.patch(url), &row)
            .await?;
        Ok(!rows.is_empty())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        let mut url = self.table_url("posts")?;
        url.query_pairs_mut()
            .append_pair("select", POST_COLUMNS)
            .append_pair("slug", &format!("eq.{slug}"))
            .append_pair("limit", "1");
        let rows: Vec<PostRow> = self.fetch_rows("posts select", url).await?;
        rows.into_iter().next().map(Post::try_from).transpose()
    }

    async fn list(&self, filter: PostFilter) -> Result<Vec<Post>, StoreError> {
        let mut url = self.table_url("posts")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("select", POST_COLUMNS)
                .append_pair("order", "created_at.desc");
            if matches!(filter, PostFilter::PublishedOnly) {
                pairs.append_pair("published", "eq.true");
            }
        }
        let rows: Vec<PostRow> = self.fetch_rows("posts select", url).await?;
        rows.into_iter().map(Post::try_from).collect()
    }
}

#[async_trait]
impl CommentRepository for HostedStore {
    async fn insert(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let url = self.table_url("comments")?;
        let row = NewCommentRow {
            content: &comment.content,
            user_id: comment.user_id.as_str(),
            post_id: *comment.post_id.as_uuid(),
        };
        let rows: Vec<CommentRow> = self
            .write_rows("comments insert", self.http.post(url), &row)
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::query("comments insert returned no row"))?
            .try_into()
    }

    async fn list_for_post(&self, post: PostId) -> Result<Vec<Comment>, StoreError> {
        let mut url = self.table_url("comments")?;
        url.query_pairs_mut()
            .append_pair("select", COMMENT_COLUMNS)
            .append_pair("post_id", &format!("eq.{}", post.as_uuid()))
            .append_pair("order", "created_at.asc");
        let rows: Vec<CommentRow> = self.fetch_rows("comments select", url).await?;
        rows.into_iter().map(Comment::try_from).collect()
    }
}

#[async_trait]
impl ProfileStore for HostedStore {
    async fn profile(&self, id: &UserId) -> Result<Option<Profile>, StoreError> {
        let mut url = self.table_url("profiles")?;
        url.query_pairs_mut()
            .append_pair("select", PROFILE_COLUMNS)
            .append_pair("id", &format!("eq.{id}"))
            .append_pair("limit", "1");
        let rows: Vec<ProfileRow> = self.fetch_rows("profiles select", url).await?;
        rows.into_iter().next().map(Profile::try_from).transpose()
    }

    async fn profiles_by_ids(&self, ids: &[UserId]) -> Result<Vec<Profile>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut url = self.table_url("profiles")?;
        url.query_pairs_mut()
            .append_pair("select", PROFILE_COLUMNS)
            .append_pair("id", &in_filter(ids));
        let rows: Vec<ProfileRow> = self.fetch_rows("profiles select", url).await?;
        rows.into_iter().map(Profile::try_from).collect()
    }
}

#[async_trait]
impl IdentityGateway for HostedStore {
    async fn current_identity(
        &self,
        access_token: &str,
    ) -> Result<Option<UserId>, AuthGatewayError> {
        let url = self.auth_url("user")?;
        let response = self
            .http
            .get(url)
            .header("apikey", &self.service_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|error| AuthGatewayError::unreachable(error.to_string()))?;

        // Expired or revoked tokens are an anonymous caller, not a failure.
        if response.status() == StatusCode::UNAUTHORIZED
            || response.status() == StatusCode::FORBIDDEN
        {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AuthGatewayError::rejected(format!(
                "user lookup returned {}",
                response.status()
            )));
        }

        let user: AuthUser = response
            .json()
            .await
            .map_err(|error| AuthGatewayError::rejected(format!("bad user payload: {error}")))?;
        match UserId::new(user.id) {
            Ok(id) => Ok(Some(id)),
            Err(error) => {
                warn!(%error, "identity service returned a malformed user id");
                Ok(None)
            }
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthGatewayError> {
        let url = self.auth_url("logout")?;
        let response = self
            .http
            .post(url)
            .header("apikey", &self.service_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|error| AuthGatewayError::unreachable(error.to_string()))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(AuthGatewayError::rejected(format!(
                "logout returned {}",
                response.status()
            )))
        }
    }
}
