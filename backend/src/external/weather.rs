//! Weather API client for fetching current conditions
//!
//! Integrates with the Open-Meteo forecast API. One request per call, bounded
//! by the configured timeout, no retries.

use std::time::Duration;

use chrono::NaiveDateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shared::{Coordinates, WeatherReading};
use thiserror::Error;

/// Hourly variables requested from the provider
const HOURLY_VARIABLES: &str = "temperature_2m,relative_humidity_2m,precipitation";

/// Longest provider error body kept in an error message
const MAX_ERROR_BODY: usize = 200;

/// Failure to obtain a reading from the provider
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

/// Open-Meteo forecast response
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: HourlySeries,
}

/// Hourly series; the provider emits `null` for hours it has no value for
#[derive(Debug, Deserialize)]
struct HourlySeries {
    #[serde(default)]
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    relative_humidity_2m: Vec<Option<f64>>,
    precipitation: Vec<Option<f64>>,
}

impl WeatherClient {
    /// Create a new WeatherClient for the provider at `base_url`
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the latest hourly reading for the given coordinates
    pub async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherReading, WeatherError> {
        let url = format!("{}/v1/forecast", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("hourly", HOURLY_VARIABLES.to_string()),
                ("forecast_days", "1".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(%status, lat = coordinates.latitude, lon = coordinates.longitude, "Weather provider responded");

        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            truncate_on_char_boundary(&mut body, MAX_ERROR_BODY);
            return Err(WeatherError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let data: ForecastResponse = serde_json::from_slice(&bytes)
            .map_err(|e| WeatherError::Malformed(e.to_string()))?;

        data.hourly.latest()
    }
}

impl HourlySeries {
    /// Take the last sample of each series as the current reading
    fn latest(&self) -> Result<WeatherReading, WeatherError> {
        let reading = WeatherReading {
            temperature: last_value(&self.temperature_2m, "temperature_2m")?,
            humidity: last_value(&self.relative_humidity_2m, "relative_humidity_2m")?,
            rainfall: last_value(&self.precipitation, "precipitation")?,
        };

        match self.time.last().map(|t| NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M")) {
            Some(Ok(observed_at)) => tracing::debug!(%observed_at, "Using latest hourly sample"),
            Some(Err(_)) => tracing::debug!(time = ?self.time.last(), "Unrecognised sample timestamp"),
            None => tracing::debug!("Provider omitted sample timestamps"),
        }

        Ok(reading)
    }
}

fn last_value(series: &[Option<f64>], name: &str) -> Result<f64, WeatherError> {
    match series.last() {
        Some(Some(value)) => Ok(*value),
        Some(None) => Err(WeatherError::Malformed(format!(
            "latest {} sample is null",
            name
        ))),
        None => Err(WeatherError::Malformed(format!(
            "hourly {} series is empty",
            name
        ))),
    }
}

fn truncate_on_char_boundary(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(json: &str) -> HourlySeries {
        serde_json::from_str::<ForecastResponse>(json).unwrap().hourly
    }

    #[test]
    fn test_latest_takes_last_sample() {
        let hourly = series(
            r#"{"hourly": {
                "time": ["2024-06-01T00:00", "2024-06-01T01:00"],
                "temperature_2m": [18.5, 19.25],
                "relative_humidity_2m": [80, 77],
                "precipitation": [0.0, 1.2]
            }}"#,
        );
        let reading = hourly.latest().unwrap();
        assert_eq!(reading, WeatherReading::new(19.25, 77.0, 1.2));
    }

    #[test]
    fn test_empty_series_is_malformed() {
        let hourly = series(
            r#"{"hourly": {
                "time": [],
                "temperature_2m": [],
                "relative_humidity_2m": [],
                "precipitation": []
            }}"#,
        );
        let err = hourly.latest().unwrap_err();
        assert!(matches!(err, WeatherError::Malformed(ref msg) if msg.contains("temperature_2m")));
    }

    #[test]
    fn test_trailing_null_is_malformed() {
        let hourly = series(
            r#"{"hourly": {
                "time": ["2024-06-01T00:00"],
                "temperature_2m": [21.0],
                "relative_humidity_2m": [null],
                "precipitation": [0.0]
            }}"#,
        );
        let err = hourly.latest().unwrap_err();
        assert!(matches!(err, WeatherError::Malformed(ref msg) if msg.contains("relative_humidity_2m")));
    }

    #[test]
    fn test_missing_time_is_tolerated() {
        let hourly = series(
            r#"{"hourly": {
                "temperature_2m": [21.0],
                "relative_humidity_2m": [55],
                "precipitation": [0.4]
            }}"#,
        );
        assert_eq!(hourly.latest().unwrap(), WeatherReading::new(21.0, 55.0, 0.4));
    }

    #[test]
    fn test_missing_series_fails_to_decode() {
        let result = serde_json::from_str::<ForecastResponse>(
            r#"{"hourly": {"temperature_2m": [21.0]}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let mut text = "ééé".to_string();
        truncate_on_char_boundary(&mut text, 3);
        assert_eq!(text, "é");

        let mut short = "ok".to_string();
        truncate_on_char_boundary(&mut short, 10);
        assert_eq!(short, "ok");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = WeatherClient::new("http://localhost:1/".into(), Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url, "http://localhost:1");
    }
}
