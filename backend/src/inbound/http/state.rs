//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CommentRepository, IdentityGateway, PageCache, PostRepository, ProfileStore,
};
use crate::domain::{AdminGuard, CommentService, ContentReader, PostAuthoringService};
use crate::server::config::SiteConfig;

/// Parameter object bundling the port implementations behind the handlers.
#[derive(Clone)]
pub struct StatePorts {
    pub identity: Arc<dyn IdentityGateway>,
    pub profiles: Arc<dyn ProfileStore>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub cache: Arc<dyn PageCache>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identity: Arc<dyn IdentityGateway>,
    pub profiles: Arc<dyn ProfileStore>,
    pub guard: Arc<AdminGuard>,
    pub authoring: Arc<PostAuthoringService>,
    pub comments: Arc<CommentService>,
    pub reader: Arc<ContentReader>,
    pub cache: Arc<dyn PageCache>,
    pub site: SiteConfig,
}

impl HttpState {
    /// Wire the domain services over one set of ports.
    pub fn new(ports: StatePorts, site: SiteConfig) -> Self {
        let StatePorts {
            identity,
            profiles,
            posts,
            comments,
            cache,
        } = ports;

        Self {
            identity,
            profiles: profiles.clone(),
            guard: Arc::new(AdminGuard::new(profiles.clone())),
            authoring: Arc::new(PostAuthoringService::new(posts.clone(), cache.clone())),
            comments: Arc::new(CommentService::new(
                posts.clone(),
                comments.clone(),
                cache.clone(),
            )),
            reader: Arc::new(ContentReader::new(posts, comments, profiles)),
            cache,
            site,
        }
    }
}
