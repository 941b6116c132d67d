//! GET page routes: landing, listing, detail, and the admin form pages.

use actix_web::{error, get, web, HttpResponse, Result};

use crate::domain::ports::StoreError;
use crate::domain::{is_valid_slug, AdminRedirect};

use super::render::{self, FormValues};
use super::session::{current_identity, SessionContext};
use super::state::HttpState;
use super::viewer::{resolve_viewer, Viewer};
use super::{found, html};

fn store_failure(error: StoreError) -> actix_web::Error {
    error::ErrorInternalServerError(error)
}

fn admin_redirect(redirect: AdminRedirect) -> HttpResponse {
    match redirect {
        AdminRedirect::Login => found("/auth/login"),
        AdminRedirect::Listing => found("/blog"),
    }
}

/// Render the detail document for `slug`, or `None` when no post is stored
/// under it. Shared by the GET route and the comment handler's re-render.
pub(super) async fn render_post_detail(
    state: &HttpState,
    viewer: &Viewer,
    slug: &str,
) -> Result<Option<String>, StoreError> {
    let Some(post) = state.reader.post_by_slug(slug).await? else {
        return Ok(None);
    };
    let comments = state.reader.comments_for_post(post.id).await?;
    Ok(Some(render::post_page(viewer, &post, &comments)))
}

#[get("/")]
pub async fn index(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    let viewer = resolve_viewer(&session, &state).await;
    html(render::landing_page(&viewer))
}

#[get("/blog")]
pub async fn blog_index(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> Result<HttpResponse> {
    let viewer = resolve_viewer(&session, &state).await;

    // Only anonymous renderings are cacheable: signed-in pages vary by
    // viewer (drafts, admin links, comment forms).
    if !viewer.signed_in() {
        if let Some(cached) = state.cache.get("/blog").await {
            return Ok(html(cached));
        }
    }

    let posts = state
        .reader
        .list_posts(viewer.role())
        .await
        .map_err(store_failure)?;
    let page = render::listing_page(&viewer, &posts);

    if !viewer.signed_in() {
        state.cache.put("/blog", &page).await;
    }
    Ok(html(page))
}

#[get("/blog/create")]
pub async fn create_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> Result<HttpResponse> {
    let identity = current_identity(&session, state.identity.as_ref()).await;
    match state.guard.require_admin(identity.as_ref()).await {
        Ok(profile) => {
            let viewer = Viewer {
                identity,
                profile: Some(profile),
            };
            Ok(html(render::post_form_page(
                &viewer,
                "/blog/create",
                &FormValues::default(),
            )))
        }
        Err(redirect) => Ok(admin_redirect(redirect)),
    }
}

#[get("/blog/{slug}")]
pub async fn post_detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let slug = path.into_inner();
    if !is_valid_slug(&slug) {
        return Ok(found("/blog"));
    }
    let viewer = resolve_viewer(&session, &state).await;
    let cache_path = format!("/blog/{slug}");

    if !viewer.signed_in() {
        if let Some(cached) = state.cache.get(&cache_path).await {
            return Ok(html(cached));
        }
    }

    let Some(page) = render_post_detail(&state, &viewer, &slug)
        .await
        .map_err(store_failure)?
    else {
        return Ok(found("/blog"));
    };

    if !viewer.signed_in() {
        state.cache.put(&cache_path, &page).await;
    }
    Ok(html(page))
}

#[get("/blog/{slug}/edit")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let slug = path.into_inner();
    if !is_valid_slug(&slug) {
        return Ok(found("/blog"));
    }
    let identity = current_identity(&session, state.identity.as_ref()).await;
    let profile = match state.guard.require_admin(identity.as_ref()).await {
        Ok(profile) => profile,
        Err(redirect) => return Ok(admin_redirect(redirect)),
    };

    let Some(post) = state
        .reader
        .post_by_slug(&slug)
        .await
        .map_err(store_failure)?
    else {
        return Ok(found("/blog"));
    };

    let viewer = Viewer {
        identity,
        profile: Some(profile),
    };
    Ok(html(render::post_form_page(
        &viewer,
        &format!("/blog/{slug}/edit"),
        &FormValues::from(&post),
    )))
}
