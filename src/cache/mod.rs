pub mod memory;

use crate::models::{ActivityType, Coordinates, EnhancedRoute};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub use memory::MemoryCacheService;

/// Storage for generated circuit sets, keyed by `circuit_route_cache_key`
#[async_trait]
pub trait RouteCache: Send + Sync {
    async fn get_cached_routes(&self, key: &str) -> Option<Vec<EnhancedRoute>>;

    async fn cache_routes(&self, key: &str, routes: &[EnhancedRoute]);

    async fn get_stats(&self) -> CacheStats;

    async fn health_check(&self) -> bool;

    fn backend_name(&self) -> &'static str;
}

/// Generate a cache key for circuit routes.
/// Key includes: coordinates (3 decimal precision), distance (0.5km buckets), activity
pub fn circuit_route_cache_key(
    start: &Coordinates,
    distance_km: f64,
    activity: ActivityType,
) -> String {
    let mut hasher = DefaultHasher::new();

    // Round coordinates to 3 decimal places (~100m precision)
    let lat = (start.lat * 1000.0).round() as i64;
    let lng = (start.lng * 1000.0).round() as i64;

    // Round distance to 0.5km buckets
    let distance_bucket = (distance_km * 2.0).round() as i64;

    lat.hash(&mut hasher);
    lng.hash(&mut hasher);
    distance_bucket.hash(&mut hasher);
    activity.hash(&mut hasher);

    format!("route:circuit:{:x}", hasher.finish())
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub entries: u64,
}
