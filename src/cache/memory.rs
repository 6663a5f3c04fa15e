use crate::cache::{CacheStats, RouteCache};
use crate::models::EnhancedRoute;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-memory circuit cache backed by moka with TTL and bounded capacity
pub struct MemoryCacheService {
    routes: Cache<String, Arc<Vec<EnhancedRoute>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryCacheService {
    pub fn new(route_ttl_seconds: u64, max_capacity: u64) -> Self {
        let routes = Cache::builder()
            .time_to_live(Duration::from_secs(route_ttl_seconds))
            .max_capacity(max_capacity)
            .build();

        MemoryCacheService {
            routes,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl RouteCache for MemoryCacheService {
    async fn get_cached_routes(&self, key: &str) -> Option<Vec<EnhancedRoute>> {
        match self.routes.get(key).await {
            Some(cached) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Circuit cache hit: {}", key);
                Some((*cached).clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Circuit cache miss: {}", key);
                None
            }
        }
    }

    async fn cache_routes(&self, key: &str, routes: &[EnhancedRoute]) {
        if routes.is_empty() {
            tracing::debug!("Not caching empty circuit set: {}", key);
            return;
        }
        self.routes
            .insert(key.to_string(), Arc::new(routes.to_vec()))
            .await;
        tracing::debug!("Cached {} circuits: {}", routes.len(), key);
    }

    async fn get_stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let hit_rate = if hits + misses > 0 {
            (hits as f64 / (hits + misses) as f64) * 100.0
        } else {
            0.0
        };

        self.routes.run_pending_tasks().await;

        CacheStats {
            hits,
            misses,
            hit_rate,
            entries: self.routes.entry_count(),
        }
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
