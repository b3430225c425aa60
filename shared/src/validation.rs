//! Validation utilities for weather readings
//!
//! Bounds are inclusive. A non-finite value (NaN, ±inf) is never within range.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::models::WeatherReading;

/// Accepted air temperature in °C
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = -50.0..=60.0;

/// Accepted relative humidity in %
pub const HUMIDITY_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// Accepted rainfall in mm
pub const RAINFALL_RANGE: RangeInclusive<f64> = 0.0..=500.0;

/// A reading that parsed as numbers but falls outside the accepted bounds
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field} value {value} is outside [{min}, {max}]")]
pub struct RangeViolation {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

fn check(field: &'static str, value: f64, range: &RangeInclusive<f64>) -> Result<(), RangeViolation> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(RangeViolation {
        field,
        value,
        min: *range.start(),
        max: *range.end(),
    })
}

/// Validate a reading before it reaches the classifier.
///
/// Reports the first offending field in (temperature, humidity, rainfall) order.
pub fn validate_weather_reading(reading: &WeatherReading) -> Result<(), RangeViolation> {
    check("temperature", reading.temperature, &TEMPERATURE_RANGE)?;
    check("humidity", reading.humidity, &HUMIDITY_RANGE)?;
    check("rainfall", reading.rainfall, &RAINFALL_RANGE)?;
    Ok(())
}
