//! Sign-out handler.
//!
//! Signing out clears the cookie session first and treats the gateway call
//! as best effort: the cookie is the local source of truth, so a gateway
//! outage must not leave the caller stuck signed in.

use actix_web::{post, web, HttpRequest, HttpResponse};
use tracing::warn;

use crate::server::config::origin_from_host;

use super::session::SessionContext;
use super::state::HttpState;
use super::see_other;

#[post("/auth/sign-out")]
pub async fn sign_out(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
) -> HttpResponse {
    if let Some(token) = session.access_token() {
        if let Err(error) = state.identity.sign_out(&token).await {
            warn!(%error, "gateway sign-out failed; clearing the session anyway");
        }
    }
    session.clear();

    let origin = origin_from_host(req.connection_info().host());
    let base = state.site.base_url(Some(&origin));
    see_other(&format!("{base}/blog"))
}
