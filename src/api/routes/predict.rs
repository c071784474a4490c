//! Prediction endpoint

use super::ErrorResponse;
use crate::api::server::AppState;
use crate::config::MODEL_OPTIONS;
use crate::pipeline::PredictionView;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Market page to scrape
    pub url: String,
    /// One of the listed model ids; the configured default when absent
    pub model: Option<String>,
}

/// Run the pipeline for one market.
///
/// Pipeline failures still answer 200: the message is carried in `bet_on`,
/// the same place a prediction would be shown.
pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictionView>, (StatusCode, Json<ErrorResponse>)> {
    if let Some(model) = req.model.as_deref() {
        if !MODEL_OPTIONS.iter().any(|m| m.id == model) {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Unknown model: {}", model),
                }),
            ));
        }
    }

    let _guard = state.predict_lock.lock().await;
    info!("Prediction requested for {}", req.url);

    let view = state.deck.run(req.url.trim(), req.model.as_deref()).await;
    Ok(Json(view))
}
