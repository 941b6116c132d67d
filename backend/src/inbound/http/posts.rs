//! Form submission handlers for the post authoring workflow.
//!
//! Validation and persistence failures deliberately re-render the form with
//! the submitted values and no redirect; only a successful write navigates
//! away. Authentication is re-checked by the workflow itself because these
//! actions can be invoked directly, bypassing the page-load admin gate.

use actix_web::{post, web, HttpResponse, Result};
use tracing::debug;

use crate::domain::{is_valid_slug, PostAuthoringError};

use super::forms::PostForm;
use super::render::{self, FormValues};
use super::session::{current_identity, SessionContext};
use super::state::HttpState;
use super::viewer::resolve_viewer;
use super::{html, see_other};

fn submitted_values(form: &PostForm) -> FormValues {
    FormValues {
        title: form.title.clone(),
        content: form.content.clone(),
        slug: form.slug.clone(),
        published: form.published_flag(),
    }
}

#[post("/blog/create")]
pub async fn submit_create(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<PostForm>,
) -> Result<HttpResponse> {
    let identity = current_identity(&session, state.identity.as_ref()).await;
    match state
        .authoring
        .create_post(identity.as_ref(), form.input())
        .await
    {
        Ok(slug) => Ok(see_other(&format!("/blog/{slug}"))),
        Err(PostAuthoringError::NotAuthenticated) => Ok(see_other("/auth/login")),
        Err(error) => {
            debug!(%error, "post create was a no-op; re-rendering the form");
            let viewer = resolve_viewer(&session, &state).await;
            Ok(html(render::post_form_page(
                &viewer,
                "/blog/create",
                &submitted_values(&form),
            )))
        }
    }
}

#[post("/blog/{slug}/edit")]
pub async fn submit_update(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: web::Form<PostForm>,
) -> Result<HttpResponse> {
    let existing_slug = path.into_inner();
    if !is_valid_slug(&existing_slug) {
        return Ok(see_other("/blog"));
    }
    let identity = current_identity(&session, state.identity.as_ref()).await;
    match state
        .authoring
        .update_post(identity.as_ref(), &existing_slug, form.input())
        .await
    {
        Ok(slug) => Ok(see_other(&format!("/blog/{slug}"))),
        Err(PostAuthoringError::NotAuthenticated) => Ok(see_other("/auth/login")),
        Err(error) => {
            debug!(%error, slug = %existing_slug, "post update was a no-op; re-rendering the form");
            let viewer = resolve_viewer(&session, &state).await;
            Ok(html(render::post_form_page(
                &viewer,
                &format!("/blog/{existing_slug}/edit"),
                &submitted_values(&form),
            )))
        }
    }
}
