//! HTTP handlers for the crop-prediction API

mod health;
mod predict;

pub use health::{health_check, root, HealthResponse};
pub use predict::predict;
