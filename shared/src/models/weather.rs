//! Weather data models

use serde::{Deserialize, Serialize};

/// The (temperature, humidity, rainfall) triple consumed by the predictor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeatherReading {
    /// Air temperature in °C
    pub temperature: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// Precipitation in mm
    pub rainfall: f64,
}

impl WeatherReading {
    pub fn new(temperature: f64, humidity: f64, rainfall: f64) -> Self {
        Self {
            temperature,
            humidity,
            rainfall,
        }
    }

    /// Feature vector in the order the classifier was trained on
    pub fn features(&self) -> [f64; 3] {
        [self.temperature, self.humidity, self.rainfall]
    }
}
