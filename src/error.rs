use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Places API error: {0}")]
    Places(String),

    #[error("Directions API error: {0}")]
    Directions(String),

    #[error("Elevation API error: {0}")]
    Elevation(String),

    #[error("Circuit designer error: {0}")]
    CircuitDesigner(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No routes generated: {0}")]
    NoRoutesGenerated(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Places(ref e) => {
                tracing::error!("Places API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Places service error")
            }
            AppError::Directions(ref e) => {
                tracing::error!("Directions API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Routing service error")
            }
            AppError::Elevation(ref e) => {
                tracing::error!("Elevation API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Elevation service error")
            }
            AppError::CircuitDesigner(ref e) => {
                tracing::error!("Circuit designer error: {}", e);
                (StatusCode::BAD_GATEWAY, "Route design service error")
            }
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.as_str()),
            AppError::NoRoutesGenerated(ref e) => {
                tracing::info!("No routes generated: {}", e);
                (StatusCode::NOT_FOUND, e.as_str())
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
