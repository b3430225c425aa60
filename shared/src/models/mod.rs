//! Domain models for the crop-prediction service

mod prediction;
mod weather;

pub use prediction::*;
pub use weather::*;
