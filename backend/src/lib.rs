//! Personal site backend library modules.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Request tracing middleware attaching a per-request trace id.
pub use middleware::trace::Trace;
