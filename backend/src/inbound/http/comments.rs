//! Form submission handler for the comment workflow.

use actix_web::{error, post, web, HttpResponse, Result};
use tracing::debug;

use crate::domain::{is_valid_slug, CommentError};

use super::forms::CommentForm;
use super::pages::render_post_detail;
use super::session::{current_identity, SessionContext};
use super::state::HttpState;
use super::viewer::resolve_viewer;
use super::{found, html, see_other};

#[post("/blog/{slug}/comments")]
pub async fn submit_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse> {
    let slug = path.into_inner();
    if !is_valid_slug(&slug) {
        return Ok(see_other("/blog"));
    }
    let identity = current_identity(&session, state.identity.as_ref()).await;
    match state
        .comments
        .create_comment(identity.as_ref(), &slug, &form.content)
        .await
    {
        Ok(_) => Ok(see_other(&format!("/blog/{slug}#comments"))),
        Err(CommentError::NotAuthenticated) => Ok(see_other("/auth/login")),
        Err(CommentError::UnknownPost) => Ok(see_other("/blog")),
        Err(error) => {
            // Validation and store failures are a silent no-op: show the
            // post again, unchanged.
            debug!(%error, slug = %slug, "comment was a no-op; re-rendering the post");
            let viewer = resolve_viewer(&session, &state).await;
            match render_post_detail(&state, &viewer, &slug)
                .await
                .map_err(error::ErrorInternalServerError)?
            {
                Some(page) => Ok(html(page)),
                None => Ok(found("/blog")),
            }
        }
    }
}
