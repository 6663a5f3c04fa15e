use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub google_maps_api_key: String,
    /// Base URL override for all Google Maps web services (tests, proxies)
    pub google_maps_base_url: Option<String>,
    /// Without a key the designer is skipped and fallback patterns are used
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub route_cache_ttl: u64,
    pub route_generator: RouteGeneratorConfig,
}

#[derive(Debug, Clone)]
pub struct RouteGeneratorConfig {
    /// Places search radius relative to target distance
    /// For a 5km route with fraction 0.4, searches within 2km
    pub feature_radius_fraction: f64,

    /// Maximum nearby features passed to the designer
    pub max_features: usize,

    /// Number of loop candidates requested from the designer
    pub ai_candidate_count: usize,

    /// Waypoint spacing relative to target distance, stated in the prompt
    pub waypoint_spacing_fraction: f64,

    /// Fallback pattern radius relative to target distance
    pub fallback_radius_fraction: f64,

    /// Maximum relative distance error (exclusive)
    pub max_distance_error: f64,

    /// Maximum backtrack ratio (exclusive)
    pub max_backtrack_ratio: f64,

    /// Minimum loop quality (exclusive)
    pub min_loop_quality: f64,

    /// Elevation samples taken along each route
    pub elevation_samples: usize,

    /// Size of the final route set
    pub max_results: usize,
}

impl Default for RouteGeneratorConfig {
    fn default() -> Self {
        Self {
            feature_radius_fraction: DEFAULT_FEATURE_RADIUS_FRACTION,
            max_features: DEFAULT_MAX_FEATURES,
            ai_candidate_count: DEFAULT_AI_CANDIDATE_COUNT,
            waypoint_spacing_fraction: DEFAULT_WAYPOINT_SPACING_FRACTION,
            fallback_radius_fraction: DEFAULT_FALLBACK_RADIUS_FRACTION,
            max_distance_error: DEFAULT_MAX_DISTANCE_ERROR,
            max_backtrack_ratio: DEFAULT_MAX_BACKTRACK_RATIO,
            min_loop_quality: DEFAULT_MIN_LOOP_QUALITY,
            elevation_samples: DEFAULT_ELEVATION_SAMPLES,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Read `key` from the environment, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> Result<T, String>
where
    T: std::str::FromStr + ToString,
{
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| format!("Invalid {}", key))
}

impl RouteGeneratorConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let config = Self {
            feature_radius_fraction: env_or(
                "ROUTE_FEATURE_RADIUS_FRACTION",
                defaults.feature_radius_fraction,
            )?,
            max_features: env_or("ROUTE_MAX_FEATURES", defaults.max_features)?,
            ai_candidate_count: env_or("ROUTE_AI_CANDIDATE_COUNT", defaults.ai_candidate_count)?,
            waypoint_spacing_fraction: env_or(
                "ROUTE_WAYPOINT_SPACING_FRACTION",
                defaults.waypoint_spacing_fraction,
            )?,
            fallback_radius_fraction: env_or(
                "ROUTE_FALLBACK_RADIUS_FRACTION",
                defaults.fallback_radius_fraction,
            )?,
            max_distance_error: env_or("ROUTE_MAX_DISTANCE_ERROR", defaults.max_distance_error)?,
            max_backtrack_ratio: env_or(
                "ROUTE_MAX_BACKTRACK_RATIO",
                defaults.max_backtrack_ratio,
            )?,
            min_loop_quality: env_or("ROUTE_MIN_LOOP_QUALITY", defaults.min_loop_quality)?,
            elevation_samples: env_or("ROUTE_ELEVATION_SAMPLES", defaults.elevation_samples)?,
            max_results: env_or("ROUTE_MAX_RESULTS", defaults.max_results)?,
        };

        if config.elevation_samples < 2 {
            return Err("ROUTE_ELEVATION_SAMPLES must be at least 2".to_string());
        }
        if config.max_results == 0 {
            return Err("ROUTE_MAX_RESULTS must be positive".to_string());
        }

        Ok(config)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY")
                .map_err(|_| "GOOGLE_MAPS_API_KEY must be set")?,
            google_maps_base_url: env::var("GOOGLE_MAPS_BASE_URL").ok(),
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_base_url: env::var("OPENAI_BASE_URL").ok(),
            route_cache_ttl: env_or("ROUTE_CACHE_TTL", DEFAULT_ROUTE_CACHE_TTL_SECONDS)?,
            route_generator: RouteGeneratorConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
