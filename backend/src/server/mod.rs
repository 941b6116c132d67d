//! HTTP server assembly: session middleware and route registration.

pub mod config;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Key, SameSite};
use actix_web::web;

use crate::inbound::http::{auth, comments, pages, posts};

/// Cookie session middleware shared by the server and the handler tests.
pub fn session_middleware(
    key: Key,
    cookie_secure: bool,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build()
}

/// Register every page and form route on an app.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::index)
        .service(pages::blog_index)
        .service(pages::create_form)
        .service(posts::submit_create)
        .service(posts::submit_update)
        .service(comments::submit_comment)
        .service(pages::edit_form)
        .service(pages::post_detail)
        .service(auth::sign_out);
}
