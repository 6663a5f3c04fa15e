//! Stable application-wide constants.
//!
//! Values here are structural invariants, algorithm coefficients, and default
//! fallbacks for env-var-based configuration. They should rarely change.
//! For tuning knobs that benefit from runtime experimentation,
//! see [`RouteGeneratorConfig`](crate::config::RouteGeneratorConfig) instead.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Cache defaults ---

/// Default route cache TTL: 1 hour. Overridden by `ROUTE_CACHE_TTL`.
pub const DEFAULT_ROUTE_CACHE_TTL_SECONDS: u64 = 3_600;
/// Maximum entries for the in-memory route cache.
pub const DEFAULT_MEMORY_CACHE_MAX_ENTRIES: u64 = 1_000;

// --- Geodesy ---

/// Mean Earth radius used by every spherical formula in the crate.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// --- Request limits ---

/// Shortest circuit the API accepts.
pub const MIN_TARGET_DISTANCE_KM: f64 = 0.5;
/// Longest circuit the API accepts.
pub const MAX_TARGET_DISTANCE_KM: f64 = 50.0;

// --- Feature discovery ---

/// Search radius as a fraction of the target distance (5 km -> 2 km radius).
pub const DEFAULT_FEATURE_RADIUS_FRACTION: f64 = 0.4;
/// Maximum nearby features forwarded to the designer prompt.
pub const DEFAULT_MAX_FEATURES: usize = 20;

// --- Circuit design ---

/// Number of loop candidates requested from the designer.
pub const DEFAULT_AI_CANDIDATE_COUNT: usize = 10;
/// Spacing between consecutive AI waypoints as a fraction of target distance.
pub const DEFAULT_WAYPOINT_SPACING_FRACTION: f64 = 0.18;
/// Closure distance (meters) the designer is asked to respect.
pub const DESIGNER_CLOSURE_TOLERANCE_M: f64 = 200.0;
/// Minimum waypoints per designed circuit; shorter designer entries are discarded.
pub const MIN_CIRCUIT_WAYPOINTS: usize = 4;
/// Maximum waypoints per designed circuit.
pub const MAX_CIRCUIT_WAYPOINTS: usize = 6;
/// Projection radius of the fallback patterns as a fraction of target distance.
pub const DEFAULT_FALLBACK_RADIUS_FRACTION: f64 = 0.15;

// --- Quality scoring ---

/// Closing distance (km) at which loop quality reaches zero.
pub const LOOP_QUALITY_ZERO_AT_KM: f64 = 0.5;
/// Grid cell size (degrees) used to discretize a path for backtrack detection.
pub const BACKTRACK_GRID_CELL_DEG: f64 = 3e-4;
/// Width of one bearing sector for angular spread.
pub const ANGULAR_SECTOR_DEG: f64 = 30.0;
/// Path points closer than this to the start are ignored for angular spread.
pub const ANGULAR_SPREAD_MIN_RADIUS_KM: f64 = 0.01;
/// Maximum elevation samples per route.
pub const DEFAULT_ELEVATION_SAMPLES: usize = 50;

// --- Difficulty thresholds ---

/// Elevation gain (m) above which a route is hard.
pub const HARD_ELEVATION_GAIN_M: f64 = 150.0;
/// Backtrack ratio above which a route is hard.
pub const HARD_BACKTRACK_RATIO: f64 = 0.3;
/// Elevation gain (m) above which a route is moderate.
pub const MODERATE_ELEVATION_GAIN_M: f64 = 75.0;
/// Backtrack ratio above which a route is moderate.
pub const MODERATE_BACKTRACK_RATIO: f64 = 0.2;

// --- Filtering and selection ---

/// Relative distance error a candidate must stay strictly below.
pub const DEFAULT_MAX_DISTANCE_ERROR: f64 = 0.40;
/// Backtrack ratio a candidate must stay strictly below.
pub const DEFAULT_MAX_BACKTRACK_RATIO: f64 = 0.50;
/// Loop quality a candidate must strictly exceed.
pub const DEFAULT_MIN_LOOP_QUALITY: f64 = 0.5;
/// Size of the final route set.
pub const DEFAULT_MAX_RESULTS: usize = 5;
/// Per-difficulty quotas for the final set: easy, moderate, hard.
pub const DIFFICULTY_QUOTAS: [usize; 3] = [2, 2, 1];
