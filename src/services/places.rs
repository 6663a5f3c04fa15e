use crate::error::{AppError, Result};
use crate::models::{Coordinates, FeatureCategory, NearbyFeature};
use crate::services::google::{check_status, read_json, GoogleMapsConfig};
use async_trait::async_trait;
use serde::Deserialize;

/// Category search around a point
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn nearby(
        &self,
        location: &Coordinates,
        radius_meters: f64,
        category: FeatureCategory,
    ) -> Result<Vec<NearbyFeature>>;
}

/// Google Places Nearby Search
#[derive(Clone)]
pub struct GooglePlacesClient {
    config: GoogleMapsConfig,
}

impl GooglePlacesClient {
    pub fn new(config: GoogleMapsConfig) -> Self {
        GooglePlacesClient { config }
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn nearby(
        &self,
        location: &Coordinates,
        radius_meters: f64,
        category: FeatureCategory,
    ) -> Result<Vec<NearbyFeature>> {
        let url = self.config.endpoint("place/nearbysearch");
        let location_str = format!("{},{}", location.lat, location.lng);
        let radius_str = format!("{:.0}", radius_meters);

        tracing::debug!(
            category = %category,
            radius_m = %radius_str,
            "Places request: {} within {}m",
            category, radius_str
        );

        let response = self
            .config
            .client
            .get(&url)
            .query(&[
                ("location", location_str.as_str()),
                ("radius", radius_str.as_str()),
                ("type", category.places_type()),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Places(format!("Request failed: {}", e)))?;

        let body: PlacesApiResponse = read_json(response).await.map_err(AppError::Places)?;
        body.into_features(category)
    }
}

// Google Places API response types

#[derive(Debug, Deserialize)]
struct PlacesApiResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: String,
    geometry: PlaceGeometry,
}

#[derive(Debug, Deserialize)]
struct PlaceGeometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl PlacesApiResponse {
    fn into_features(self, category: FeatureCategory) -> Result<Vec<NearbyFeature>> {
        check_status(&self.status, self.error_message.as_deref(), true)
            .map_err(AppError::Places)?;

        Ok(self
            .results
            .into_iter()
            .filter_map(|place| {
                let coordinates =
                    Coordinates::new(place.geometry.location.lat, place.geometry.location.lng)
                        .ok()?;
                Some(NearbyFeature::new(place.name, coordinates, category))
            })
            .collect())
    }
}
