//! Shared plumbing for the Google Maps web services (Places, Directions,
//! Elevation). All three return HTTP 200 with a `status` field, so transport
//! success says nothing about the result.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

pub const GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Connection settings shared by every Google Maps client
#[derive(Clone)]
pub struct GoogleMapsConfig {
    pub client: Client,
    pub api_key: String,
    pub base_url: String,
}

impl GoogleMapsConfig {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, GOOGLE_MAPS_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        GoogleMapsConfig {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `{base_url}/{service}/json`
    pub fn endpoint(&self, service: &str) -> String {
        format!("{}/{}/json", self.base_url, service)
    }
}

/// Read a JSON body, turning HTTP-level failures into a message
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(format!("HTTP {}: {}", status, error_text));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Map a Google `status` field to a result. `ZERO_RESULTS` is only
/// acceptable where the caller says so.
pub fn check_status(
    status: &str,
    error_message: Option<&str>,
    allow_zero_results: bool,
) -> Result<(), String> {
    match status {
        "OK" => Ok(()),
        "ZERO_RESULTS" if allow_zero_results => Ok(()),
        other => Err(match error_message {
            Some(msg) => format!("status {}: {}", other, msg),
            None => format!("status {}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = GoogleMapsConfig::with_base_url(
            "key".to_string(),
            "http://localhost:4000/maps/api/".to_string(),
        );
        assert_eq!(
            config.endpoint("directions"),
            "http://localhost:4000/maps/api/directions/json"
        );
    }

    #[test]
    fn test_check_status() {
        assert!(check_status("OK", None, false).is_ok());
        assert!(check_status("ZERO_RESULTS", None, true).is_ok());
        assert!(check_status("ZERO_RESULTS", None, false).is_err());
        assert_eq!(
            check_status("REQUEST_DENIED", Some("bad key"), true).unwrap_err(),
            "status REQUEST_DENIED: bad key"
        );
    }
}
