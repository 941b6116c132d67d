//! Row payloads exchanged with the hosted store's REST row interface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::comment::{Comment, CommentId};
use crate::domain::ports::StoreError;
use crate::domain::post::{Post, PostId};
use crate::domain::profile::{Profile, Role, UserId};
use crate::domain::slug::Slug;

/// Column list requested for post reads.
pub(super) const POST_COLUMNS: &str = "id,title,content,slug,published,created_at,updated_at";
/// Column list requested for comment reads.
pub(super) const COMMENT_COLUMNS: &str = "id,content,created_at,user_id,post_id";
/// Column list requested for profile reads.
pub(super) const PROFILE_COLUMNS: &str = "id,email,username,role";

#[derive(Debug, Deserialize)]
pub(super) struct PostRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = StoreError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let slug = Slug::parse(row.slug)
            .map_err(|error| StoreError::query(format!("stored slug is malformed: {error}")))?;
        Ok(Self {
            id: PostId::new(row.id),
            title: row.title,
            content: row.content,
            slug,
            published: row.published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct NewPostRow<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub slug: &'a str,
    pub published: bool,
    pub user_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct PostChangesRow<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub slug: &'a str,
    pub published: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CommentRow {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    pub post_id: Uuid,
}

impl TryFrom<CommentRow> for Comment {
    type Error = StoreError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id)
            .map_err(|error| StoreError::query(format!("stored user id is malformed: {error}")))?;
        Ok(Self {
            id: CommentId::new(row.id),
            content: row.content,
            created_at: row.created_at,
            user_id,
            post_id: PostId::new(row.post_id),
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct NewCommentRow<'a> {
    pub content: &'a str,
    pub user_id: &'a str,
    pub post_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProfileRow {
    pub id: String,
    pub email: Option<String>,
    pub username: Option<String>,
    pub role: Role,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = StoreError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let id = UserId::new(row.id)
            .map_err(|error| StoreError::query(format!("stored profile id is malformed: {error}")))?;
        Ok(Self {
            id,
            email: row.email,
            username: row.username,
            role: row.role,
        })
    }
}

/// Payload returned by the identity service's user endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct AuthUser {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn post_row_maps_into_the_domain_post() {
        let row: PostRow = serde_json::from_value(serde_json::json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "title": "My Title",
            "content": "Body text",
            "slug": "my-title",
            "published": false,
            "created_at": "2024-05-01T12:00:00Z",
            "updated_at": "2024-05-02T08:30:00Z",
        }))
        .expect("valid row");

        let post = Post::try_from(row).expect("row maps");
        assert_eq!(post.slug.as_str(), "my-title");
        assert!(!post.published);
        assert!(post.updated_at > post.created_at);
    }

    #[rstest]
    fn malformed_stored_slug_is_a_query_error() {
        let row: PostRow = serde_json::from_value(serde_json::json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "title": "t",
            "content": "c",
            "slug": "Bad Slug",
            "published": true,
            "created_at": "2024-05-01T12:00:00Z",
            "updated_at": "2024-05-01T12:00:00Z",
        }))
        .expect("valid row");
        assert!(matches!(Post::try_from(row), Err(StoreError::Query { .. })));
    }

    #[rstest]
    fn profile_row_carries_the_wire_role() {
        let row: ProfileRow = serde_json::from_value(serde_json::json!({
            "id": "user-1",
            "email": null,
            "username": "ada",
            "role": "commenter",
        }))
        .expect("valid row");
        let profile = Profile::try_from(row).expect("row maps");
        assert_eq!(profile.role, Role::Commenter);
        assert_eq!(profile.username.as_deref(), Some("ada"));
    }
}
