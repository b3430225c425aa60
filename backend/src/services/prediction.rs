//! Crop prediction service

use std::sync::Arc;

use shared::{PredictionResult, WeatherReading};

use crate::ml::CropModel;

/// Wraps the shared, read-only classifier.
///
/// Performs no range checks; callers validate the reading first.
#[derive(Clone)]
pub struct CropPredictor {
    model: Arc<dyn CropModel>,
}

impl CropPredictor {
    pub fn new(model: Arc<dyn CropModel>) -> Self {
        Self { model }
    }

    /// Recommend a crop for the reading and echo the reading back unchanged
    pub fn predict(&self, reading: WeatherReading) -> PredictionResult {
        let recommended_crop = self.model.predict(reading.features());
        tracing::debug!(
            temperature = reading.temperature,
            humidity = reading.humidity,
            rainfall = reading.rainfall,
            crop = %recommended_crop,
            "Prediction complete"
        );

        PredictionResult {
            recommended_crop,
            inputs: reading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Mutex;

    /// Records the features it was called with
    struct RecordingModel {
        calls: Mutex<Vec<[f64; 3]>>,
        classes: Vec<String>,
    }

    impl CropModel for RecordingModel {
        fn predict(&self, features: [f64; 3]) -> String {
            self.calls.lock().unwrap().push(features);
            "lentil".to_string()
        }

        fn classes(&self) -> &[String] {
            &self.classes
        }

        fn estimators(&self) -> usize {
            1
        }
    }

    #[test]
    fn test_features_passed_in_training_order() {
        let model = Arc::new(RecordingModel {
            calls: Mutex::new(Vec::new()),
            classes: vec!["lentil".into()],
        });
        let predictor = CropPredictor::new(model.clone());

        let result = predictor.predict(WeatherReading::new(12.5, 40.0, 3.0));

        assert_eq!(result.recommended_crop, "lentil");
        assert_eq!(*model.calls.lock().unwrap(), vec![[12.5, 40.0, 3.0]]);
    }

    #[test]
    fn test_serialized_shape() {
        let model = Arc::new(RecordingModel {
            calls: Mutex::new(Vec::new()),
            classes: vec!["lentil".into()],
        });
        let result = CropPredictor::new(model).predict(WeatherReading::new(25.0, 60.0, 100.0));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "recommended_crop": "lentil",
                "inputs": {"temperature": 25.0, "humidity": 60.0, "rainfall": 100.0}
            })
        );
    }

    proptest! {
        #[test]
        fn prop_inputs_echoed_exactly(
            t in -50.0f64..=60.0,
            h in 0.0f64..=100.0,
            r in 0.0f64..=500.0
        ) {
            let model = Arc::new(RecordingModel {
                calls: Mutex::new(Vec::new()),
                classes: vec!["lentil".into()],
            });
            let reading = WeatherReading::new(t, h, r);
            let result = CropPredictor::new(model).predict(reading);
            prop_assert_eq!(result.inputs.temperature.to_bits(), t.to_bits());
            prop_assert_eq!(result.inputs.humidity.to_bits(), h.to_bits());
            prop_assert_eq!(result.inputs.rainfall.to_bits(), r.to_bits());
        }
    }
}
