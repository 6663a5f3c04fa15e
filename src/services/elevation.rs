use crate::error::{AppError, Result};
use crate::models::Coordinates;
use crate::services::google::{check_status, read_json, GoogleMapsConfig};
use async_trait::async_trait;
use serde::Deserialize;

/// Terrain height lookup
#[async_trait]
pub trait ElevationProvider: Send + Sync {
    /// Elevation in meters for each point, in input order
    async fn elevations(&self, points: &[Coordinates]) -> Result<Vec<f64>>;
}

/// Google Elevation API
#[derive(Clone)]
pub struct GoogleElevationClient {
    config: GoogleMapsConfig,
}

impl GoogleElevationClient {
    pub fn new(config: GoogleMapsConfig) -> Self {
        GoogleElevationClient { config }
    }
}

#[async_trait]
impl ElevationProvider for GoogleElevationClient {
    async fn elevations(&self, points: &[Coordinates]) -> Result<Vec<f64>> {
        if points.is_empty() {
            return Ok(Vec::new());
        }

        let locations = points
            .iter()
            .map(|c| format!("{:.6},{:.6}", c.lat, c.lng))
            .collect::<Vec<_>>()
            .join("|");

        let response = self
            .config
            .client
            .get(self.config.endpoint("elevation"))
            .query(&[
                ("locations", locations.as_str()),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Elevation(format!("Request failed: {}", e)))?;

        let body: ElevationApiResponse = read_json(response).await.map_err(AppError::Elevation)?;
        body.into_elevations(points.len())
    }
}

#[derive(Debug, Deserialize)]
struct ElevationApiResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<ElevationResult>,
}

#[derive(Debug, Deserialize)]
struct ElevationResult {
    elevation: f64,
}

impl ElevationApiResponse {
    fn into_elevations(self, expected: usize) -> Result<Vec<f64>> {
        check_status(&self.status, self.error_message.as_deref(), false)
            .map_err(AppError::Elevation)?;

        if self.results.len() != expected {
            return Err(AppError::Elevation(format!(
                "Expected {} samples, got {}",
                expected,
                self.results.len()
            )));
        }

        Ok(self.results.into_iter().map(|r| r.elevation).collect())
    }
}
