use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Report designer mode and cache state
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut status = json!({
        "status": "ok",
        "checks": {}
    });

    status["checks"]["designer"] = if state.route_generator.has_designer() {
        json!("ai")
    } else {
        json!("fallback_only")
    };

    match state.cache {
        Some(ref cache) => {
            if cache.health_check().await {
                let stats = cache.get_stats().await;
                status["checks"]["cache"] = json!({
                    "backend": cache.backend_name(),
                    "entries": stats.entries,
                    "hits": stats.hits,
                    "misses": stats.misses,
                    "hit_rate": stats.hit_rate,
                });
            } else {
                status["checks"]["cache"] = json!({"error": "cache unavailable"});
                status["status"] = json!("degraded");
            }
        }
        None => {
            status["checks"]["cache"] = json!("disabled");
        }
    }

    Json(status)
}
