use crate::error::{AppError, Result};
use crate::models::{Coordinates, DirectionsRoute, TurnInstruction};
use crate::services::google::{check_status, read_json, GoogleMapsConfig};
use async_trait::async_trait;
use serde::Deserialize;

/// Google allows at most 25 intermediate waypoints per request
const MAX_WAYPOINTS: usize = 25;

/// Street-following round trips on foot
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Route `start -> waypoints... -> start`
    async fn walking_circuit(
        &self,
        start: &Coordinates,
        waypoints: &[Coordinates],
    ) -> Result<DirectionsRoute>;
}

/// Google Directions API
#[derive(Clone)]
pub struct GoogleDirectionsClient {
    config: GoogleMapsConfig,
}

impl GoogleDirectionsClient {
    pub fn new(config: GoogleMapsConfig) -> Self {
        GoogleDirectionsClient { config }
    }
}

#[async_trait]
impl DirectionsProvider for GoogleDirectionsClient {
    async fn walking_circuit(
        &self,
        start: &Coordinates,
        waypoints: &[Coordinates],
    ) -> Result<DirectionsRoute> {
        if waypoints.is_empty() {
            return Err(AppError::InvalidRequest(
                "At least 1 waypoint required".to_string(),
            ));
        }
        if waypoints.len() > MAX_WAYPOINTS {
            return Err(AppError::InvalidRequest(format!(
                "Maximum {} waypoints allowed",
                MAX_WAYPOINTS
            )));
        }

        tracing::debug!(
            waypoints = waypoints.len(),
            "Directions request: circuit through {} waypoints",
            waypoints.len()
        );

        let response = self
            .config
            .client
            .get(self.config.endpoint("directions"))
            .query(&circuit_query(start, waypoints))
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::Directions(format!("Request failed: {}", e)))?;

        let body: DirectionsApiResponse =
            read_json(response).await.map_err(AppError::Directions)?;
        let route = body.into_route()?;

        tracing::debug!(
            distance_km = route.distance_km,
            duration_min = route.duration_minutes,
            steps = route.turn_instructions.len(),
            "Directions response: {:.1}km, {}min, {} steps",
            route.distance_km, route.duration_minutes, route.turn_instructions.len()
        );

        Ok(route)
    }
}

/// Query parameters for a walking round trip: origin and destination are
/// both `start`, waypoints are `lat,lng` pairs joined by `|`
pub fn circuit_query(
    start: &Coordinates,
    waypoints: &[Coordinates],
) -> Vec<(&'static str, String)> {
    let origin = format!("{},{}", start.lat, start.lng);
    let waypoints = waypoints
        .iter()
        .map(|c| format!("{},{}", c.lat, c.lng))
        .collect::<Vec<_>>()
        .join("|");

    vec![
        ("origin", origin.clone()),
        ("destination", origin),
        ("waypoints", waypoints),
        ("mode", "walking".to_string()),
    ]
}

// Google Directions API response types

#[derive(Debug, Deserialize)]
struct DirectionsApiResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<ApiRoute>,
}

#[derive(Debug, Deserialize)]
struct ApiRoute {
    overview_polyline: ApiPolyline,
    legs: Vec<ApiLeg>,
}

#[derive(Debug, Deserialize)]
struct ApiPolyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct ApiLeg {
    distance: ApiValue,
    duration: ApiValue,
    #[serde(default)]
    steps: Vec<ApiStep>,
}

#[derive(Debug, Deserialize)]
struct ApiStep {
    html_instructions: String,
    distance: ApiValue,
    start_location: ApiLatLng,
}

#[derive(Debug, Deserialize)]
struct ApiValue {
    value: f64, // meters or seconds
}

#[derive(Debug, Deserialize)]
struct ApiLatLng {
    lat: f64,
    lng: f64,
}

impl DirectionsApiResponse {
    fn into_route(self) -> Result<DirectionsRoute> {
        check_status(&self.status, self.error_message.as_deref(), false)
            .map_err(AppError::Directions)?;

        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Directions("No routes found".to_string()))?;

        let total_meters: f64 = route.legs.iter().map(|leg| leg.distance.value).sum();
        let total_seconds: f64 = route.legs.iter().map(|leg| leg.duration.value).sum();

        let mut instructions = Vec::new();
        let mut turn_instructions = Vec::new();
        let mut cumulative_meters = 0.0;

        for step in route.legs.iter().flat_map(|leg| leg.steps.iter()) {
            let text = strip_html(&step.html_instructions);
            turn_instructions.push(TurnInstruction {
                instruction: text.clone(),
                lat: step.start_location.lat,
                lng: step.start_location.lng,
                distance_km: cumulative_meters / 1000.0,
            });
            instructions.push(text);
            cumulative_meters += step.distance.value;
        }

        Ok(DirectionsRoute {
            distance_km: (total_meters / 100.0).round() / 10.0,
            duration_minutes: (total_seconds / 60.0).round() as u32,
            polyline: route.overview_polyline.points,
            instructions,
            turn_instructions,
        })
    }
}

/// Drop markup from a step instruction, keeping word boundaries where block
/// tags separated text
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut tag = String::new();

    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                if tag.starts_with("div") || tag.starts_with("/div") || tag.starts_with("br") {
                    text.push(' ');
                }
            }
            _ if in_tag => tag.push(c),
            _ => text.push(c),
        }
    }

    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
