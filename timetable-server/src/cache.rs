//! Caching layer for route-search results.
//!
//! Route summaries change rarely and each one costs an upstream page
//! fetch, so successful lookups are kept for a while keyed by
//! (origin, destination).

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::scrape::RouteSummary;

/// Cache key: (origin name, destination name).
pub type RouteKey = (String, String);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
        }
    }
}

/// Cache for route summaries.
#[derive(Clone)]
pub struct RouteCache {
    routes: MokaCache<RouteKey, Arc<RouteSummary>>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { routes }
    }

    pub async fn get(&self, key: &RouteKey) -> Option<Arc<RouteSummary>> {
        self.routes.get(key).await
    }

    pub async fn insert(&self, key: RouteKey, summary: Arc<RouteSummary>) {
        self.routes.insert(key, summary).await;
    }
}
