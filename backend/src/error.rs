//! Error handling for the AgriVerse crop-prediction service
//!
//! Every failure is converted into `{"error": "<message>"}` at the handler
//! boundary; nothing escapes to the transport layer.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::external::weather::WeatherError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Client input errors
    #[error("Provide either temperature+humidity+rainfall OR lat+lon")]
    MissingInput,

    #[error("Bad input: {0}")]
    BadInput(String),

    #[error("Bad input: {}", .0.body_text())]
    Body(#[from] BytesRejection),

    #[error("Input values out of valid range")]
    OutOfRange(#[from] shared::RangeViolation),

    // External service errors
    #[error("Weather service error: {0}")]
    WeatherService(#[from] WeatherError),
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingInput | AppError::BadInput(_) => StatusCode::BAD_REQUEST,
            // 413 for an oversized body, 400 for a broken stream
            AppError::Body(rejection) => rejection.status(),
            AppError::OutOfRange(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::WeatherService(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::OutOfRange(violation) => {
                tracing::warn!(%violation, "Rejected out-of-range reading");
            }
            AppError::WeatherService(_) => tracing::error!("Error: {:?}", self),
            _ => tracing::warn!("Error: {}", self),
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::MissingInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::BadInput("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        let violation = shared::RangeViolation {
            field: "humidity",
            value: 120.0,
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(
            AppError::from(violation).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::from(WeatherError::Malformed("empty".into())).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AppError::MissingInput.to_string(),
            "Provide either temperature+humidity+rainfall OR lat+lon"
        );
        assert_eq!(
            AppError::BadInput("field 'temperature' is not a number: 'abc'".into()).to_string(),
            "Bad input: field 'temperature' is not a number: 'abc'"
        );
        let violation = shared::RangeViolation {
            field: "temperature",
            value: 99.0,
            min: -50.0,
            max: 60.0,
        };
        assert_eq!(
            AppError::from(violation).to_string(),
            "Input values out of valid range"
        );
        assert!(AppError::from(WeatherError::Malformed("x".into()))
            .to_string()
            .starts_with("Weather service error: "));
    }
}
