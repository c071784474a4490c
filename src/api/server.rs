//! Axum server setup and configuration

use crate::api::routes;
use crate::{Config, GambaDeck};
use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deck: Arc<GambaDeck>,
    /// One browser at a time: predictions run one after another
    pub predict_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let deck = GambaDeck::from_config(&config);
        Self {
            deck: Arc::new(deck),
            predict_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// Create the Axum application with all routes
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/models", get(routes::extras::list_models))
        .route("/predict", post(routes::predict::predict))
        .route(
            "/settings/api-key",
            get(routes::settings::api_key_status).post(routes::settings::save_api_key),
        )
        .route("/disclaimer/accept", post(routes::extras::accept_disclaimer))
        .route("/credits/wysi", get(routes::extras::wysi));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
