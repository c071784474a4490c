//! Error types for the scrape → estimate pipeline
//!
//! Each stage has its own error enum. Nothing here is fatal: the pipeline
//! turns every variant into the text shown in the output field via
//! `user_message()`.

use thiserror::Error;

/// Failures while scraping a market page
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Browser/transport failure on every attempt
    #[error("Could not reach website after {attempts} attempts: {last_error}")]
    Unreachable { attempts: u32, last_error: String },

    /// Anything else; never retried
    #[error("{0}")]
    ParseFailure(String),
}

impl ScrapeError {
    pub fn user_message(&self) -> String {
        format!("Error: {}", self)
    }
}

/// What was wrong with the JSON the model returned
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Not JSON, or missing the expected fields
    #[error("{0}")]
    Malformed(String),

    /// `probabilities` is not a non-empty object of numbers
    #[error("no valid probabilities returned")]
    NoProbabilities,
}

/// Failures while asking the model for probabilities
#[derive(Debug, Error)]
pub enum EstimateError {
    /// Non-success status from the completion endpoint
    #[error("{0} - {1}")]
    Http(u16, String),

    /// Response content held no `{...}` block; carries the raw content
    #[error("Could not find JSON in LLM response. Raw: {0}")]
    NoJson(String),

    #[error("Could not parse LLM response: {0}")]
    InvalidPayload(#[from] PayloadError),

    /// Request never produced a response
    #[error("Request to completion endpoint failed: {0}")]
    Transport(String),
}

impl EstimateError {
    pub fn from_network_error(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            EstimateError::Transport("request timed out".to_string())
        } else if err.is_connect() {
            EstimateError::Transport("connection failed".to_string())
        } else {
            EstimateError::Transport(err.to_string())
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            EstimateError::InvalidPayload(PayloadError::NoProbabilities) => {
                "No valid probabilities returned.".to_string()
            }
            other => format!("Error: {}", other),
        }
    }
}

/// Failures while persisting the API key
#[derive(Debug, Error)]
pub enum KeyStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encryption failed: {0}")]
    Crypto(String),
}
