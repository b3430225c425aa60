//! HTTP handler for crop prediction

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};

use crate::error::AppResult;
use crate::models::{PredictionInput, PredictionResult};
use crate::AppState;

/// Recommend a crop from a weather triple or from coordinates
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<PredictionResult>> {
    let body = body?;
    let reading = match PredictionInput::from_body(&body)? {
        PredictionInput::RawWeather(reading) => reading,
        PredictionInput::Coordinates(coordinates) => state.weather.fetch(coordinates).await?,
    };

    shared::validate_weather_reading(&reading)?;

    Ok(Json(state.predictor.predict(reading)))
}
