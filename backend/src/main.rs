//! Backend entry-point: wires the page routes over the configured adapters.

use std::env;
use std::sync::Arc;

use actix_web::cookie::Key;
use actix_web::{web, App, HttpServer};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use site_backend::inbound::http::state::{HttpState, StatePorts};
use site_backend::outbound::hosted::{HostedConfig, HostedStore};
use site_backend::outbound::memory::{MemoryIdentityGateway, MemoryStore};
use site_backend::outbound::render_cache::RenderCache;
use site_backend::server::{self, config::SiteConfig};
use site_backend::Trace;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let ports = match HostedConfig::from_env() {
        Some(config) => {
            info!(url = %config.base_url, "using the hosted store");
            let store = Arc::new(HostedStore::new(config));
            StatePorts {
                identity: store.clone(),
                profiles: store.clone(),
                posts: store.clone(),
                comments: store,
                cache: Arc::new(RenderCache::default()),
            }
        }
        None => {
            warn!("no store configured; using in-memory adapters (dev only)");
            let store = Arc::new(MemoryStore::default());
            StatePorts {
                identity: Arc::new(MemoryIdentityGateway::default()),
                profiles: store.clone(),
                posts: store.clone(),
                comments: store,
                cache: Arc::new(RenderCache::default()),
            }
        }
    };

    let state = HttpState::new(ports, SiteConfig::from_env());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Trace)
            .wrap(server::session_middleware(key.clone(), cookie_secure))
            .configure(server::routes)
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}
