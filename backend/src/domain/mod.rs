//! Domain entities, ports, and authoring workflows.
//!
//! Purpose: hold everything with actual invariants — slug derivation, the
//! admin gate, and the post/comment authoring workflows — behind ports so the
//! hosted auth/database service stays an opaque collaborator. Handlers map the
//! typed outcomes defined here onto redirects and silent form re-renders.

pub mod authz;
pub mod comment;
pub mod comments;
pub mod ports;
pub mod post;
pub mod posts;
pub mod profile;
pub mod reader;
pub mod slug;

pub use self::authz::{AdminGuard, AdminRedirect};
pub use self::comment::{Comment, CommentDraft, CommentDraftError, CommentId};
pub use self::comments::{CommentError, CommentService};
pub use self::post::{DraftError, Post, PostDraft, PostId};
pub use self::posts::{PostAuthoringError, PostAuthoringService, PostInput};
pub use self::profile::{IdentityError, Profile, Role, UserId};
pub use self::reader::{CommentView, ContentReader};
pub use self::slug::{derive_slug, is_valid_slug, Slug, SlugError};
