//! Driven adapters implementing the domain ports.

pub mod hosted;
pub mod memory;
pub mod render_cache;
