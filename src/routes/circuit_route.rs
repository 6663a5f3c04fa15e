use crate::cache;
use crate::error::{AppError, Result};
use crate::models::route::{CircuitRouteRequest, RouteResponse};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /routes/circuit
/// Generate circuits that start and end at the requested point
pub async fn create_circuit_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CircuitRouteRequest>,
) -> Result<Json<RouteResponse>> {
    request.validate().map_err(AppError::InvalidRequest)?;

    tracing::info!(
        lat = request.start_point.lat,
        lng = request.start_point.lng,
        distance_km = request.distance_km,
        activity = %request.activity_type,
        "Circuit route request: ({:.4}, {:.4}), {:.1}km, activity={}",
        request.start_point.lat, request.start_point.lng,
        request.distance_km, request.activity_type
    );

    let cache_key = cache::circuit_route_cache_key(
        &request.start_point,
        request.distance_km,
        request.activity_type,
    );

    // Check cache first
    if let Some(ref cache) = state.cache {
        if let Some(cached_routes) = cache.get_cached_routes(&cache_key).await {
            tracing::info!(
                "Cache hit for circuit route: {} routes returned",
                cached_routes.len()
            );
            return Ok(Json(RouteResponse {
                routes: cached_routes,
            }));
        }
    }

    let routes = state
        .route_generator
        .generate_circuit_routes(
            request.start_point,
            request.distance_km,
            request.activity_type,
        )
        .await?;

    if routes.is_empty() {
        return Err(AppError::NoRoutesGenerated(format!(
            "No circuit near ({:.4}, {:.4}) met the quality thresholds for {:.1}km",
            request.start_point.lat, request.start_point.lng, request.distance_km
        )));
    }

    if let Some(ref cache) = state.cache {
        cache.cache_routes(&cache_key, &routes).await;
    }

    Ok(Json(RouteResponse { routes }))
}
