//! HTTP inbound adapter: page routes, form handlers, session plumbing.

pub mod auth;
pub mod comments;
pub mod forms;
pub mod pages;
pub mod posts;
pub mod render;
pub mod session;
pub mod state;
pub mod viewer;

use actix_web::http::header;
use actix_web::HttpResponse;

/// `302 Found` redirect used when a page-load guard bounces the caller.
pub(crate) fn found(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// `303 See Other` redirect used after form submissions.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Wrap a rendered document in an HTML response.
pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}
