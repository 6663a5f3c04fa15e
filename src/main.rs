use axum::Router;
use runcircuit::cache::{MemoryCacheService, RouteCache};
use runcircuit::config::Config;
use runcircuit::constants::DEFAULT_MEMORY_CACHE_MAX_ENTRIES;
use runcircuit::services::circuit_designer::{CircuitDesigner, OpenAiCircuitDesigner};
use runcircuit::services::directions::GoogleDirectionsClient;
use runcircuit::services::elevation::GoogleElevationClient;
use runcircuit::services::google::GoogleMapsConfig;
use runcircuit::services::places::GooglePlacesClient;
use runcircuit::services::route_generator::RouteGenerator;
use runcircuit::AppState;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "runcircuit=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting RunCircuit API server");
    tracing::info!("Configuration loaded successfully");

    let google = match config.google_maps_base_url {
        Some(ref base_url) => {
            GoogleMapsConfig::with_base_url(config.google_maps_api_key.clone(), base_url.clone())
        }
        None => GoogleMapsConfig::new(config.google_maps_api_key.clone()),
    };

    let designer: Option<Arc<dyn CircuitDesigner>> = match config.openai_api_key {
        Some(ref api_key) => {
            let designer = match config.openai_base_url {
                Some(ref base_url) => OpenAiCircuitDesigner::with_base_url(
                    api_key.clone(),
                    config.openai_model.clone(),
                    base_url.clone(),
                ),
                None => OpenAiCircuitDesigner::new(api_key.clone(), config.openai_model.clone()),
            };
            tracing::info!("AI circuit designer enabled (model: {})", designer.model());
            Some(Arc::new(designer) as Arc<dyn CircuitDesigner>)
        }
        None => {
            tracing::warn!("OPENAI_API_KEY not configured. Using geometric circuits only.");
            None
        }
    };

    let route_generator = RouteGenerator::new(
        Arc::new(GooglePlacesClient::new(google.clone())),
        designer,
        Arc::new(GoogleDirectionsClient::new(google.clone())),
        Arc::new(GoogleElevationClient::new(google)),
        config.route_generator.clone(),
    );

    let cache: Arc<dyn RouteCache> = Arc::new(MemoryCacheService::new(
        config.route_cache_ttl,
        DEFAULT_MEMORY_CACHE_MAX_ENTRIES,
    ));
    tracing::info!(
        "Using in-memory circuit cache (TTL {}s)",
        config.route_cache_ttl
    );

    let state = Arc::new(AppState {
        route_generator,
        cache: Some(cache),
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", runcircuit::routes::create_router(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        );

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
