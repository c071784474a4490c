//! API route handlers

pub mod extras;
pub mod predict;
pub mod settings;

use serde::Serialize;

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
