//! In-process cache of rendered pages, keyed by request path.
//!
//! A tiny stand-in for the framework-level render cache the original
//! deployment platform provides. Entries are whole HTML documents; the
//! authoring workflows invalidate the listing and detail paths they touch.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::PageCache;

/// Rendered-page cache over a `RwLock`ed map.
#[derive(Default)]
pub struct RenderCache {
    pages: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl PageCache for RenderCache {
    async fn get(&self, path: &str) -> Option<String> {
        let pages = self.pages.read().ok()?;
        pages.get(path).cloned()
    }

    async fn put(&self, path: &str, html: &str) {
        if let Ok(mut pages) = self.pages.write() {
            pages.insert(path.to_owned(), html.to_owned());
        }
    }

    async fn invalidate(&self, path: &str) {
        if let Ok(mut pages) = self.pages.write() {
            pages.remove(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn stores_and_invalidates_by_path() {
        let cache = RenderCache::default();
        assert!(cache.get("/blog").await.is_none());

        cache.put("/blog", "<listing>").await;
        assert_eq!(cache.get("/blog").await.as_deref(), Some("<listing>"));

        cache.invalidate("/blog").await;
        assert!(cache.get("/blog").await.is_none());
    }
}
