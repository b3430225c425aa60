//! Business logic services for the crop-prediction API

pub mod prediction;

pub use prediction::CropPredictor;
