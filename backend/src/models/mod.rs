//! Request models for the crop-prediction API
//!
//! Re-exports models from the shared crate and adds the parsed form of a
//! `/predict` request body.

pub use shared::models::*;
pub use shared::types::Coordinates;

use std::collections::HashMap;

use serde_json::value::RawValue;

use crate::error::AppError;

const WEATHER_KEYS: [&str; 3] = ["temperature", "humidity", "rainfall"];
const COORDINATE_KEYS: [&str; 2] = ["lat", "lon"];

/// Top-level fields of a request body, values kept as unparsed JSON text
pub type RawFields<'a> = HashMap<String, &'a RawValue>;

/// The two input shapes accepted by `/predict`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PredictionInput {
    /// Caller supplied the weather directly
    RawWeather(WeatherReading),
    /// Caller supplied a location; weather is fetched from the provider
    Coordinates(Coordinates),
}

impl PredictionInput {
    /// Parse a raw request body.
    ///
    /// Anything that is not a JSON object is treated as an empty object.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        let fields: RawFields<'_> = serde_json::from_slice(body).unwrap_or_default();
        Self::from_fields(&fields)
    }

    /// Resolve the input shape. The weather triple wins when both are present.
    pub fn from_fields(fields: &RawFields<'_>) -> Result<Self, AppError> {
        let has_all = |keys: &[&str]| keys.iter().all(|key| fields.contains_key(*key));

        if has_all(&WEATHER_KEYS[..]) {
            Ok(PredictionInput::RawWeather(WeatherReading {
                temperature: numeric_field(fields, "temperature")?,
                humidity: numeric_field(fields, "humidity")?,
                rainfall: numeric_field(fields, "rainfall")?,
            }))
        } else if has_all(&COORDINATE_KEYS[..]) {
            Ok(PredictionInput::Coordinates(Coordinates {
                latitude: numeric_field(fields, "lat")?,
                longitude: numeric_field(fields, "lon")?,
            }))
        } else {
            Err(AppError::MissingInput)
        }
    }
}

/// Read a field given either as a JSON number or a numeric string.
///
/// Numbers are parsed from their literal text, so a magnitude beyond f64
/// becomes ±inf and is left for the range check to reject.
fn numeric_field(fields: &RawFields<'_>, key: &str) -> Result<f64, AppError> {
    let raw = fields
        .get(key)
        .ok_or_else(|| AppError::BadInput(format!("missing field '{}'", key)))?
        .get();

    if raw.starts_with('"') {
        let text: String = serde_json::from_str(raw)
            .map_err(|e| AppError::BadInput(format!("field '{}': {}", key, e)))?;
        return text.trim().parse::<f64>().map_err(|_| {
            AppError::BadInput(format!("field '{}' is not a number: '{}'", key, text))
        });
    }

    if raw.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
        return raw.parse::<f64>().map_err(|_| {
            AppError::BadInput(format!("field '{}' is not a number: {}", key, raw))
        });
    }

    Err(AppError::BadInput(format!(
        "field '{}' must be a number, got {}",
        key, raw
    )))
}
