//! AgriVerse crop-prediction API
//!
//! Recommends a crop from direct weather readings, or from coordinates whose
//! current weather is fetched from the Open-Meteo forecast API.

use std::{path::Path, sync::Arc};

use axum::{body::Body, http::Request, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod ml;
pub mod models;
pub mod routes;
pub mod services;

pub use config::Config;

use crate::external::WeatherClient;
use crate::ml::ModelSummary;
use crate::services::CropPredictor;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub predictor: CropPredictor,
    pub weather: WeatherClient,
    pub model: Arc<ModelSummary>,
}

impl AppState {
    /// Load the model artifact and build the weather client.
    ///
    /// Runs once, before the listener accepts traffic.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let loaded = ml::load_model(Path::new(&config.model.path), config.model.sha256.as_deref())?;
        tracing::info!(
            path = %config.model.path,
            classes = ?loaded.summary.classes,
            trees = loaded.summary.trees,
            sha256 = %loaded.summary.sha256,
            "Model loaded"
        );

        let weather = WeatherClient::new(config.weather.base_url.clone(), config.weather.timeout())?;

        Ok(Self {
            predictor: CropPredictor::new(Arc::new(loaded.model)),
            weather,
            model: Arc::new(loaded.summary),
            config: Arc::new(config),
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    routes::api_routes()
        .layer(trace)
        .layer(cors)
        .with_state(state)
}
