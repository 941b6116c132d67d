//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie session carries only the access token issued by the hosted
//! auth flow. Identity is always resolved by validating that token against
//! the identity gateway, mirroring how the original deployment asked the
//! auth service for the current user on every request.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::ports::IdentityGateway;
use crate::domain::UserId;

pub(crate) const ACCESS_TOKEN_KEY: &str = "access_token";

/// Newtype wrapper exposing higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Fetch the hosted-auth access token from the session, if present.
    /// Unreadable cookies count as signed out rather than failing the page.
    pub fn access_token(&self) -> Option<String> {
        match self.0.get::<String>(ACCESS_TOKEN_KEY) {
            Ok(token) => token,
            Err(error) => {
                warn!(%error, "failed to read session cookie");
                None
            }
        }
    }

    /// Drop the whole session, signing the caller out locally.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// Resolve the caller's identity by validating the session token against the
/// identity gateway. Absent, expired, or unverifiable tokens resolve to
/// `None` — an anonymous caller, never an error page.
pub async fn current_identity(
    session: &SessionContext,
    gateway: &dyn IdentityGateway,
) -> Option<UserId> {
    let token = session.access_token()?;
    match gateway.current_identity(&token).await {
        Ok(identity) => identity,
        Err(error) => {
            warn!(%error, "identity gateway lookup failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::memory::MemoryIdentityGateway;
    use actix_session::storage::CookieSessionStore;
    use actix_session::SessionMiddleware;
    use actix_web::cookie::Key;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};
    use rstest::rstest;

    #[actix_web::test]
    async fn round_trips_the_access_token() {
        let app = test::init_service(
            App::new()
                .wrap(SessionMiddleware::builder(
                    CookieSessionStore::default(),
                    Key::generate(),
                )
                .cookie_secure(false)
                .build())
                .route(
                    "/set",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(ACCESS_TOKEN_KEY, "token-1")
                            .expect("insert token");
                        HttpResponse::Ok().finish()
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        match session.access_token() {
                            Some(token) => HttpResponse::Ok().body(token),
                            None => HttpResponse::NoContent().finish(),
                        }
                    }),
                ),
        )
        .await;

        let response = test::call_service(&app, test::TestRequest::get().uri("/set").to_request())
            .await;
        let cookie = response
            .response()
            .cookies()
            .next()
            .expect("session cookie set")
            .into_owned();

        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = test::read_body(response).await;
        assert_eq!(body, "token-1");
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_tokens_resolve_to_anonymous() {
        let gateway = MemoryIdentityGateway::default();
        let resolved = gateway
            .current_identity("never-issued")
            .await
            .expect("gateway lookup");
        assert!(resolved.is_none());
    }
}
