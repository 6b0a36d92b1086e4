//! Hot-swappable matcher handle.
//!
//! Readers take a cheap snapshot with [`SharedMatcher::load`]; a reload
//! builds a complete new [`RouteMatcher`] and swaps it in atomically.
//! A loaded snapshot keeps answering with the old route set until dropped.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::routing::matcher::RouteMatcher;

#[derive(Debug)]
pub struct SharedMatcher {
    inner: ArcSwap<RouteMatcher>,
}

impl SharedMatcher {
    pub fn new(matcher: RouteMatcher) -> Self {
        Self {
            inner: ArcSwap::from_pointee(matcher),
        }
    }

    /// Current matcher snapshot.
    pub fn load(&self) -> Arc<RouteMatcher> {
        self.inner.load_full()
    }

    /// Replace the current matcher.
    pub fn store(&self, matcher: RouteMatcher) {
        let routes = matcher.len();
        self.inner.store(Arc::new(matcher));
        tracing::info!(routes, "Route matcher swapped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{RouteMatcherOptions, RouteSource};

    fn matcher(id: &str) -> RouteMatcher {
        RouteMatcher::new(
            vec![RouteSource::new(id).with_url("/")],
            RouteMatcherOptions::new("https://x.test"),
        )
        .unwrap()
    }

    #[test]
    fn test_store_replaces_snapshot() {
        let shared = SharedMatcher::new(matcher("old"));
        let before = shared.load();

        shared.store(matcher("new"));
        let after = shared.load();

        assert!(before.contains("old"));
        assert!(after.contains("new"));
        assert!(!after.contains("old"));
    }
}
