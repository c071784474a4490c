//! Web API for Gamba Deck
//!
//! JSON endpoints a front end uses to run predictions, store the API key and
//! pick up sound cues.

pub mod routes;
pub mod server;

pub use server::{create_app, AppState};
