mod fallback;
pub mod geometry;
pub mod quality;
pub mod selection;

use crate::config::RouteGeneratorConfig;
use crate::error::{AppError, Result};
use crate::models::{
    ActivityType, CandidateRoute, CircuitQuality, Coordinates, ElevationStats, EnhancedRoute,
    FeatureCategory, NearbyFeature,
};
use crate::services::circuit_designer::{CircuitDesigner, DesignBrief};
use crate::services::directions::DirectionsProvider;
use crate::services::elevation::ElevationProvider;
use crate::services::places::PlacesProvider;
use crate::services::polyline;
use std::sync::Arc;

pub use fallback::generate_fallback_circuits;
use geometry::sample_evenly;
use quality::{classify_difficulty, elevation_stats};
use selection::{difficulty_breakdown, select_balanced, AcceptanceCriteria};

/// Turns a start point and a target distance into a balanced set of
/// street-following loops. Holds no per-request state, so one instance
/// serves every request.
pub struct RouteGenerator {
    places: Arc<dyn PlacesProvider>,
    designer: Option<Arc<dyn CircuitDesigner>>,
    directions: Arc<dyn DirectionsProvider>,
    elevation: Arc<dyn ElevationProvider>,
    config: RouteGeneratorConfig,
}

impl RouteGenerator {
    pub fn new(
        places: Arc<dyn PlacesProvider>,
        designer: Option<Arc<dyn CircuitDesigner>>,
        directions: Arc<dyn DirectionsProvider>,
        elevation: Arc<dyn ElevationProvider>,
        config: RouteGeneratorConfig,
    ) -> Self {
        RouteGenerator {
            places,
            designer,
            directions,
            elevation,
            config,
        }
    }

    /// Whether an AI designer is configured; without one every request
    /// uses the geometric patterns
    pub fn has_designer(&self) -> bool {
        self.designer.is_some()
    }

    /// Query every feature category around the start. A failing category is
    /// logged and skipped.
    async fn discover_features(
        &self,
        start: &Coordinates,
        target_distance_km: f64,
    ) -> Vec<NearbyFeature> {
        let radius_m = target_distance_km * self.config.feature_radius_fraction * 1000.0;
        let mut features = Vec::new();

        for category in FeatureCategory::all() {
            match self.places.nearby(start, radius_m, category).await {
                Ok(found) => {
                    tracing::debug!(
                        category = %category,
                        count = found.len(),
                        "Found {} {} features",
                        found.len(), category
                    );
                    features.extend(found);
                }
                Err(e) => {
                    tracing::warn!(
                        category = %category,
                        error = %e,
                        "Feature search failed for {}, continuing without",
                        category
                    );
                }
            }
        }

        features.truncate(self.config.max_features);

        tracing::info!(
            features = features.len(),
            radius_m = %format!("{:.0}", radius_m),
            "Feature discovery: {} features within {:.0}m",
            features.len(), radius_m
        );

        features
    }

    /// Ask the designer for candidates, dropping to the geometric patterns
    /// when it is missing or fails
    async fn design_candidates(
        &self,
        start: &Coordinates,
        target_distance_km: f64,
        features: &[NearbyFeature],
        activity: ActivityType,
    ) -> Vec<CandidateRoute> {
        let Some(designer) = &self.designer else {
            tracing::info!("No circuit designer configured, using geometric patterns");
            return self.fallback_candidates(start, target_distance_km);
        };

        let brief = DesignBrief {
            start,
            target_distance_km,
            features,
            activity,
            candidate_count: self.config.ai_candidate_count,
            waypoint_spacing_km: target_distance_km * self.config.waypoint_spacing_fraction,
        };

        match designer.design(brief).await {
            Ok(candidates) => {
                tracing::info!(
                    candidates = candidates.len(),
                    "Circuit designer proposed {} candidates",
                    candidates.len()
                );
                candidates
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Circuit designer failed, falling back to geometric patterns"
                );
                self.fallback_candidates(start, target_distance_km)
            }
        }
    }

    fn fallback_candidates(
        &self,
        start: &Coordinates,
        target_distance_km: f64,
    ) -> Vec<CandidateRoute> {
        generate_fallback_circuits(start, target_distance_km, self.config.fallback_radius_fraction)
    }

    /// Sampled elevation statistics for a decoded path. Provider failures
    /// degrade to zeros.
    async fn measure_elevation(&self, candidate_id: &str, path: &[Coordinates]) -> ElevationStats {
        let samples = sample_evenly(path, self.config.elevation_samples);
        if samples.len() < 2 {
            return ElevationStats::default();
        }

        match self.elevation.elevations(&samples).await {
            Ok(elevations) => elevation_stats(&samples, &elevations),
            Err(e) => {
                tracing::warn!(
                    route_id = %candidate_id,
                    error = %e,
                    "Elevation lookup failed for {}, using zero elevation",
                    candidate_id
                );
                ElevationStats::default()
            }
        }
    }

    /// Route one candidate on streets and score it. `None` when directions
    /// cannot be obtained.
    async fn execute_candidate(
        &self,
        start: &Coordinates,
        candidate: CandidateRoute,
    ) -> Option<EnhancedRoute> {
        let directions = match self
            .directions
            .walking_circuit(start, &candidate.waypoints)
            .await
        {
            Ok(directions) => directions,
            Err(e) => {
                tracing::warn!(
                    route_id = %candidate.id,
                    error = %e,
                    "Skipping candidate {}: {}",
                    candidate.id, e
                );
                return None;
            }
        };

        let path = polyline::decode(&directions.polyline);
        let quality = CircuitQuality::compute(start, &path);
        let elevation = self.measure_elevation(&candidate.id, &path).await;
        let difficulty = classify_difficulty(elevation.gain_m, quality.backtrack_ratio);

        tracing::debug!(
            route_id = %candidate.id,
            distance_km = directions.distance_km,
            loop_quality = %format!("{:.2}", quality.loop_quality),
            backtrack_ratio = %format!("{:.2}", quality.backtrack_ratio),
            angular_spread = quality.angular_spread,
            elevation_gain_m = %format!("{:.0}", elevation.gain_m),
            difficulty = %difficulty,
            "Scored {}: {:.1}km, {}",
            candidate.id, directions.distance_km, difficulty
        );

        Some(EnhancedRoute::assemble(
            candidate, directions, quality, elevation, difficulty,
        ))
    }

    /// Generate up to `max_results` circuits starting and ending at `start`.
    /// An empty list means no candidate survived; only an unusable target
    /// distance is an error.
    pub async fn generate_circuit_routes(
        &self,
        start: Coordinates,
        target_distance_km: f64,
        activity: ActivityType,
    ) -> Result<Vec<EnhancedRoute>> {
        if !target_distance_km.is_finite() || target_distance_km <= 0.0 {
            return Err(AppError::InvalidRequest(format!(
                "Target distance must be a positive number of km, got {}",
                target_distance_km
            )));
        }

        tracing::info!(
            lat = start.lat,
            lng = start.lng,
            target_km = target_distance_km,
            activity = %activity,
            "Generating circuit routes from {:?}, target: {}km",
            start, target_distance_km
        );

        // Step 1: Nearby features to anchor the designer's waypoints
        let features = self.discover_features(&start, target_distance_km).await;

        // Step 2: Candidate loops, AI-designed or geometric
        let candidates = self
            .design_candidates(&start, target_distance_km, &features, activity)
            .await;
        let candidate_count = candidates.len();

        // Step 3: Street routing and scoring, one candidate at a time
        let mut scored = Vec::with_capacity(candidate_count);
        for candidate in candidates {
            if let Some(route) = self.execute_candidate(&start, candidate).await {
                scored.push(route);
            }
        }
        let executed = scored.len();

        // Step 4: Drop routes that miss the target or do not loop
        let criteria = AcceptanceCriteria {
            target_distance_km,
            max_distance_error: self.config.max_distance_error,
            max_backtrack_ratio: self.config.max_backtrack_ratio,
            min_loop_quality: self.config.min_loop_quality,
        };
        let accepted: Vec<EnhancedRoute> =
            scored.into_iter().filter(|r| criteria.accepts(r)).collect();

        // Step 5: Balanced selection across difficulties
        let accepted_count = accepted.len();
        let routes = select_balanced(accepted, self.config.max_results);
        let [easy, moderate, hard] = difficulty_breakdown(&routes);

        tracing::info!(
            candidates = candidate_count,
            executed = executed,
            accepted = accepted_count,
            selected = routes.len(),
            easy = easy,
            moderate = moderate,
            hard = hard,
            "Circuit generation: {} candidates -> {} routed -> {} accepted -> {} selected ({}/{}/{})",
            candidate_count, executed, accepted_count, routes.len(), easy, moderate, hard
        );

        Ok(routes)
    }
}
