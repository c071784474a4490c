//! API key settings endpoints

use crate::api::server::AppState;
use crate::sounds::SoundCue;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::error;

pub const SAVED_STATUS: &str = "**API key saved and encrypted!**";

#[derive(Debug, Deserialize)]
pub struct SaveKeyRequest {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct SaveKeyResponse {
    /// Markdown status line
    pub status: String,
    pub sound: SoundCue,
}

#[derive(Debug, Serialize)]
pub struct KeyStatusResponse {
    pub configured: bool,
}

/// Encrypt and store the API key
pub async fn save_api_key(State(state): State<AppState>, Json(req): Json<SaveKeyRequest>) -> Json<SaveKeyResponse> {
    let status = match state.deck.key_store().save(req.api_key.trim()) {
        Ok(()) => SAVED_STATUS.to_string(),
        Err(e) => {
            error!("Failed to save API key: {}", e);
            format!("Error saving API key: {}", e)
        }
    };

    Json(SaveKeyResponse {
        status,
        sound: SoundCue::Goblin,
    })
}

/// Whether a usable key is stored. The key itself is never returned.
pub async fn api_key_status(State(state): State<AppState>) -> Json<KeyStatusResponse> {
    Json(KeyStatusResponse {
        configured: state.deck.key_store().has_secret(),
    })
}
