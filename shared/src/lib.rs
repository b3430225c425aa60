//! Shared types for the AgriVerse crop-prediction service
//!
//! Request-scoped domain types and the validity ranges applied to them,
//! kept free of any HTTP or runtime dependency.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
