use super::geometry::project_ring;
use crate::models::route::timestamp_id;
use crate::models::{CandidateRoute, Coordinates};

/// A fixed circuit shape: waypoint bearings (degrees) in travel order
struct FallbackPattern {
    key: &'static str,
    name: &'static str,
    circuit_type: &'static str,
    bearings_deg: &'static [f64],
}

/// Shapes used when the designer is unavailable. Every waypoint sits at the
/// same radius, so ovals come from clustering bearings around one axis.
const FALLBACK_PATTERNS: [FallbackPattern; 5] = [
    FallbackPattern {
        key: "square",
        name: "Square Circuit",
        circuit_type: "square",
        bearings_deg: &[0.0, 90.0, 180.0, 270.0],
    },
    FallbackPattern {
        key: "pentagon",
        name: "Pentagon Circuit",
        circuit_type: "pentagon",
        bearings_deg: &[0.0, 72.0, 144.0, 216.0, 288.0],
    },
    FallbackPattern {
        key: "hexagon",
        name: "Hexagon Circuit",
        circuit_type: "hexagon",
        bearings_deg: &[0.0, 60.0, 120.0, 180.0, 240.0, 300.0],
    },
    FallbackPattern {
        key: "oval_ns",
        name: "North-South Oval",
        circuit_type: "oval",
        bearings_deg: &[330.0, 0.0, 30.0, 150.0, 180.0, 210.0],
    },
    FallbackPattern {
        key: "oval_ew",
        name: "East-West Oval",
        circuit_type: "oval",
        bearings_deg: &[60.0, 90.0, 120.0, 240.0, 270.0, 300.0],
    },
];

/// Deterministic circuit candidates around `start`, no external calls.
/// Waypoints sit `radius_fraction * target_distance_km` from the start.
pub fn generate_fallback_circuits(
    start: &Coordinates,
    target_distance_km: f64,
    radius_fraction: f64,
) -> Vec<CandidateRoute> {
    let radius_km = target_distance_km * radius_fraction;

    tracing::info!(
        radius_km = %format!("{:.2}", radius_km),
        patterns = FALLBACK_PATTERNS.len(),
        "Generating {} fallback circuits at {:.2}km radius",
        FALLBACK_PATTERNS.len(), radius_km
    );

    FALLBACK_PATTERNS
        .iter()
        .map(|pattern| CandidateRoute {
            id: timestamp_id("fallback", pattern.key),
            name: pattern.name.to_string(),
            waypoints: project_ring(start, radius_km, pattern.bearings_deg),
            reasoning: format!(
                "Geometric {} pattern generated without AI assistance",
                pattern.circuit_type
            ),
            estimated_distance_km: target_distance_km,
            circuit_type: pattern.circuit_type.to_string(),
        })
        .collect()
}
