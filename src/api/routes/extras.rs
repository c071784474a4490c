//! Model list and the sound-only actions

use crate::api::server::AppState;
use crate::config::MODEL_OPTIONS;
use crate::sounds::SoundCue;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ModelEntry {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelEntry>,
    pub default: String,
}

#[derive(Debug, Serialize)]
pub struct SoundResponse {
    pub sound: SoundCue,
}

pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: MODEL_OPTIONS
            .iter()
            .map(|m| ModelEntry { id: m.id, label: m.label })
            .collect(),
        default: state.deck.default_model().to_string(),
    })
}

/// "Not financial advice" disclaimer acknowledged
pub async fn accept_disclaimer() -> Json<SoundResponse> {
    Json(SoundResponse { sound: SoundCue::Rizz })
}

pub async fn wysi() -> Json<SoundResponse> {
    Json(SoundResponse { sound: SoundCue::Wysi })
}
