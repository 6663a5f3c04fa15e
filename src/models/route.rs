use crate::constants::{MAX_TARGET_DISTANCE_KM, MIN_TARGET_DISTANCE_KM};
use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    #[default]
    Run,
    Walk,
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityType::Run => write!(f, "run"),
            ActivityType::Walk => write!(f, "walk"),
        }
    }
}

/// `<prefix>_<unix millis>_<suffix>`, unique enough within one request
pub fn timestamp_id(prefix: &str, suffix: &str) -> String {
    let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!("{}_{}_{}", prefix, millis, suffix)
}

/// A loop proposal, not yet routed on streets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRoute {
    pub id: String,
    pub name: String,
    pub waypoints: Vec<Coordinates>,
    pub reasoning: String,
    pub estimated_distance_km: f64,
    pub circuit_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TurnInstruction {
    pub instruction: String,
    pub lat: f64,
    pub lng: f64,
    /// Cumulative distance from the start of the route (km)
    pub distance_km: f64,
}

/// Street-following result for one candidate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectionsRoute {
    /// Total distance, rounded to one decimal (km)
    pub distance_km: f64,
    pub duration_minutes: u32,
    /// Google encoded polyline
    pub polyline: String,
    pub instructions: Vec<String>,
    pub turn_instructions: Vec<TurnInstruction>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub fn rank(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Moderate => 1,
            Difficulty::Hard => 2,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Moderate => write!(f, "moderate"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// Shape metrics computed from the routed path
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CircuitQuality {
    /// 1.0 when the path closes exactly at the start, 0.0 at 500m or more
    pub loop_quality: f64,
    /// Fraction of grid segments traversed in both directions
    pub backtrack_ratio: f64,
    /// Degrees covered by 30-degree bearing sectors around the start
    pub angular_spread: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ElevationStats {
    pub gain_m: f64,
    pub loss_m: f64,
    pub max_gradient_percent: f64,
    pub max_gradient_degrees: f64,
}

/// Route returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedRoute {
    pub id: String,
    pub name: String,
    /// km
    pub distance: f64,
    /// minutes
    pub duration: u32,
    pub polyline: String,
    pub waypoints: Vec<Coordinates>,
    pub difficulty: Difficulty,
    pub elevation_gain: f64,
    pub elevation_loss: f64,
    pub max_gradient_percent: f64,
    pub max_gradient_degrees: f64,
    pub instructions: Vec<String>,
    pub turn_instructions: Vec<TurnInstruction>,
    pub circuit_quality: CircuitQuality,
    pub ai_reasoning: String,
    pub circuit_type: String,
}

impl EnhancedRoute {
    pub fn assemble(
        candidate: CandidateRoute,
        directions: DirectionsRoute,
        quality: CircuitQuality,
        elevation: ElevationStats,
        difficulty: Difficulty,
    ) -> Self {
        EnhancedRoute {
            id: candidate.id,
            name: candidate.name,
            distance: directions.distance_km,
            duration: directions.duration_minutes,
            polyline: directions.polyline,
            waypoints: candidate.waypoints,
            difficulty,
            elevation_gain: elevation.gain_m,
            elevation_loss: elevation.loss_m,
            max_gradient_percent: elevation.max_gradient_percent,
            max_gradient_degrees: elevation.max_gradient_degrees,
            instructions: directions.instructions,
            turn_instructions: directions.turn_instructions,
            circuit_quality: quality,
            ai_reasoning: candidate.reasoning,
            circuit_type: candidate.circuit_type,
        }
    }
}

// Request/Response types for API endpoints

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitRouteRequest {
    pub start_point: Coordinates,
    pub distance_km: f64,
    #[serde(default)]
    pub activity_type: ActivityType,
}

impl CircuitRouteRequest {
    pub fn validate(&self) -> Result<(), String> {
        Coordinates::new(self.start_point.lat, self.start_point.lng)?;
        if !(MIN_TARGET_DISTANCE_KM..=MAX_TARGET_DISTANCE_KM).contains(&self.distance_km) {
            return Err(format!(
                "distanceKm must be between {} and {}",
                MIN_TARGET_DISTANCE_KM, MAX_TARGET_DISTANCE_KM
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub routes: Vec<EnhancedRoute>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(lat: f64, lng: f64, distance_km: f64) -> CircuitRouteRequest {
        CircuitRouteRequest {
            start_point: Coordinates { lat, lng },
            distance_km,
            activity_type: ActivityType::Run,
        }
    }

    #[test]
    fn test_circuit_request_validation() {
        assert!(request(51.5074, -0.1278, 5.0).validate().is_ok());
        assert!(request(51.5074, -0.1278, 0.1).validate().is_err()); // Too short
        assert!(request(51.5074, -0.1278, 100.0).validate().is_err()); // Too long
        assert!(request(95.0, -0.1278, 5.0).validate().is_err());
        assert!(request(51.5074, -0.1278, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let req: CircuitRouteRequest = serde_json::from_str(
            r#"{"startPoint":{"lat":51.5,"lng":-0.12},"distanceKm":5.0,"activityType":"walk"}"#,
        )
        .unwrap();
        assert_eq!(req.activity_type, ActivityType::Walk);

        let req: CircuitRouteRequest =
            serde_json::from_str(r#"{"startPoint":{"lat":51.5,"lng":-0.12},"distanceKm":5.0}"#)
                .unwrap();
        assert_eq!(req.activity_type, ActivityType::Run);
    }

    #[test]
    fn test_difficulty_ordering() {
        assert!(Difficulty::Easy < Difficulty::Moderate);
        assert!(Difficulty::Moderate < Difficulty::Hard);
        assert_eq!(Difficulty::Hard.rank(), 2);
        assert_eq!(Difficulty::Moderate.to_string(), "moderate");
    }

    #[test]
    fn test_enhanced_route_json_shape() {
        let route = EnhancedRoute::assemble(
            CandidateRoute {
                id: "ai_route_1_0".to_string(),
                name: "River Loop".to_string(),
                waypoints: vec![Coordinates { lat: 51.5, lng: -0.12 }],
                reasoning: "Follows the river".to_string(),
                estimated_distance_km: 5.0,
                circuit_type: "clockwise-loop".to_string(),
            },
            DirectionsRoute {
                distance_km: 5.2,
                duration_minutes: 62,
                polyline: "abc".to_string(),
                instructions: vec!["Head north".to_string()],
                turn_instructions: vec![],
            },
            CircuitQuality {
                loop_quality: 1.0,
                backtrack_ratio: 0.1,
                angular_spread: 270.0,
            },
            ElevationStats::default(),
            Difficulty::Easy,
        );

        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["difficulty"], "easy");
        assert_eq!(json["distance"], 5.2);
        assert_eq!(json["aiReasoning"], "Follows the river");
        assert_eq!(json["circuitQuality"]["loopQuality"], 1.0);
        assert!(json["turnInstructions"].is_array());
        assert!(json["elevationGain"].is_number());
    }

    #[test]
    fn test_timestamp_id_format() {
        let id = timestamp_id("ai_route", "3");
        let parts: Vec<&str> = id.rsplitn(2, '_').collect();
        assert_eq!(parts[0], "3");
        assert!(parts[1].starts_with("ai_route_"));
        assert!(parts[1]["ai_route_".len()..].parse::<i128>().is_ok());
    }

    #[test]
    fn test_activity_type_names_match_wire_format() {
        for activity in [ActivityType::Run, ActivityType::Walk] {
            let json = serde_json::to_string(&activity).unwrap();
            assert_eq!(json, format!("\"{}\"", activity));
        }
        assert!(serde_json::from_str::<ActivityType>(r#""running""#).is_err());
        assert!(serde_json::from_str::<ActivityType>(r#""swim""#).is_err());
    }
}
