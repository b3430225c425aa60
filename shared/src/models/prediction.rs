//! Prediction result model

use serde::{Deserialize, Serialize};

use super::WeatherReading;

/// Outcome of a successful prediction request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub recommended_crop: String,
    /// Echo of the reading the model was invoked with
    pub inputs: WeatherReading,
}
