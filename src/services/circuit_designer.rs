use crate::constants::{
    DESIGNER_CLOSURE_TOLERANCE_M, MAX_CIRCUIT_WAYPOINTS, MIN_CIRCUIT_WAYPOINTS,
};
use crate::error::{AppError, Result};
use crate::models::route::timestamp_id;
use crate::models::{ActivityType, CandidateRoute, Coordinates, NearbyFeature};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Sampling temperature; high enough that repeated requests differ
const DESIGNER_TEMPERATURE: f64 = 0.8;

/// Everything the designer needs to propose circuits
#[derive(Debug, Clone, Copy)]
pub struct DesignBrief<'a> {
    pub start: &'a Coordinates,
    pub target_distance_km: f64,
    pub features: &'a [NearbyFeature],
    pub activity: ActivityType,
    pub candidate_count: usize,
    pub waypoint_spacing_km: f64,
}

/// Proposes loop candidates for a start point
#[async_trait]
pub trait CircuitDesigner: Send + Sync {
    async fn design(&self, brief: DesignBrief<'_>) -> Result<Vec<CandidateRoute>>;
}

/// Chat-completions backed designer
#[derive(Clone)]
pub struct OpenAiCircuitDesigner {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiCircuitDesigner {
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, model, OPENAI_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        OpenAiCircuitDesigner {
            client: Client::new(),
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Chat-completions body asking for a JSON object reply
    fn request_body(&self, system_prompt: &str, user_prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt},
            ],
            "response_format": {"type": "json_object"},
            "temperature": DESIGNER_TEMPERATURE,
        })
    }
}

#[async_trait]
impl CircuitDesigner for OpenAiCircuitDesigner {
    async fn design(&self, brief: DesignBrief<'_>) -> Result<Vec<CandidateRoute>> {
        let (system_prompt, user_prompt) = build_prompts(&brief);

        tracing::debug!(
            model = %self.model,
            features = brief.features.len(),
            candidates = brief.candidate_count,
            "Circuit designer request: {} candidates, {} features",
            brief.candidate_count, brief.features.len()
        );

        let body = self.request_body(&system_prompt, &user_prompt);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::CircuitDesigner(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::CircuitDesigner(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AppError::CircuitDesigner(format!("Failed to parse response: {}", e))
        })?;

        let content = completion_content(completion)?;
        parse_candidates(&content, brief.target_distance_km)
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Text of the first choice; a missing choice or null content is an error
fn completion_content(completion: ChatCompletionResponse) -> Result<String> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| AppError::CircuitDesigner("Empty completion".to_string()))
}

/// System and user prompts for one design request
pub fn build_prompts(brief: &DesignBrief<'_>) -> (String, String) {
    let system_prompt = format!(
        "You are an expert {activity} route designer. You design circuit routes that \
         start and finish at the same point, follow real streets and paths, and avoid \
         retracing the same street in both directions. Respond with strict JSON only.",
        activity = match brief.activity {
            ActivityType::Run => "running",
            ActivityType::Walk => "walking",
        }
    );

    let features = if brief.features.is_empty() {
        "No notable features were found nearby; rely on the street grid.".to_string()
    } else {
        brief
            .features
            .iter()
            .map(|f| {
                format!(
                    "- {} ({}) at {:.6},{:.6}",
                    f.name, f.category, f.coordinates.lat, f.coordinates.lng
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let user_prompt = format!(
        "Design exactly {count} different circuit routes of about {distance:.1} km starting at \
         {lat:.6},{lng:.6}.\n\
         \n\
         Nearby features you may route past:\n\
         {features}\n\
         \n\
         Requirements:\n\
         - Vary the pattern across routes: clockwise loops, counter-clockwise loops, \
         figure-8s, ovals and polygons.\n\
         - Vary the size: some compact, some wider, all near the target distance.\n\
         - Each route has {min_wp} to {max_wp} waypoints, in travel order, forming a \
         closed circuit that returns within {closure:.0} m of the start.\n\
         - Space consecutive waypoints roughly {spacing:.2} km apart in a straight line; \
         street routing adds distance on top of that.\n\
         \n\
         Return a JSON object of the form:\n\
         {{\"routes\": [{{\"name\": string, \"waypoints\": [{{\"lat\": number, \"lng\": number}}], \
         \"reasoning\": string, \"estimatedDistance\": number, \"circuitType\": string}}]}}",
        count = brief.candidate_count,
        distance = brief.target_distance_km,
        lat = brief.start.lat,
        lng = brief.start.lng,
        features = features,
        min_wp = MIN_CIRCUIT_WAYPOINTS,
        max_wp = MAX_CIRCUIT_WAYPOINTS,
        closure = DESIGNER_CLOSURE_TOLERANCE_M,
        spacing = brief.waypoint_spacing_km,
    );

    (system_prompt, user_prompt)
}

#[derive(Debug, Deserialize)]
struct DesignedRoute {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    waypoints: Vec<DesignedWaypoint>,
    #[serde(default)]
    reasoning: Option<String>,
    #[serde(default, rename = "estimatedDistance", alias = "estimated_distance")]
    estimated_distance: Option<f64>,
    #[serde(default, rename = "circuitType", alias = "circuit_type")]
    circuit_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DesignedWaypoint {
    lat: f64,
    #[serde(alias = "lon", alias = "longitude")]
    lng: f64,
}

/// Parse the model output into candidates. Accepts `{"routes": [...]}` or a
/// bare array. Waypoints are truncated to the circuit maximum; entries with
/// fewer than the circuit minimum of valid waypoints are dropped.
pub fn parse_candidates(content: &str, target_distance_km: f64) -> Result<Vec<CandidateRoute>> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| AppError::CircuitDesigner(format!("Malformed JSON: {}", e)))?;

    let routes_value = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => map
            .remove("routes")
            .ok_or_else(|| AppError::CircuitDesigner("Missing 'routes' field".to_string()))?,
        _ => {
            return Err(AppError::CircuitDesigner(
                "Expected an object or array".to_string(),
            ))
        }
    };

    let designed: Vec<DesignedRoute> = serde_json::from_value(routes_value)
        .map_err(|e| AppError::CircuitDesigner(format!("Unexpected route shape: {}", e)))?;

    let candidates: Vec<CandidateRoute> = designed
        .into_iter()
        .enumerate()
        .filter_map(|(index, route)| {
            let waypoints: Vec<Coordinates> = route
                .waypoints
                .iter()
                .filter_map(|wp| Coordinates::new(wp.lat, wp.lng).ok())
                .take(MAX_CIRCUIT_WAYPOINTS)
                .collect();

            if waypoints.len() < MIN_CIRCUIT_WAYPOINTS {
                tracing::debug!(
                    index = index,
                    waypoints = waypoints.len(),
                    "Dropping designed route {}: only {} usable waypoints",
                    index, waypoints.len()
                );
                return None;
            }

            Some(CandidateRoute {
                id: timestamp_id("ai_route", &index.to_string()),
                name: route
                    .name
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| format!("AI Route {}", index + 1)),
                waypoints,
                reasoning: route
                    .reasoning
                    .unwrap_or_else(|| "AI-designed circuit route".to_string()),
                estimated_distance_km: route
                    .estimated_distance
                    .filter(|d| d.is_finite() && *d > 0.0)
                    .unwrap_or(target_distance_km),
                circuit_type: route.circuit_type.unwrap_or_else(|| "loop".to_string()),
            })
        })
        .collect();

    if candidates.is_empty() {
        return Err(AppError::CircuitDesigner(
            "No usable routes in designer output".to_string(),
        ));
    }

    Ok(candidates)
}
