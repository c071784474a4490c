//! Gamba Deck Library
//!
//! Paste a prediction-market URL, get told what to bet on.
//!
//! 1. **Scrape**: a headless browser reads the market question and the
//!    priced outcomes off the page.
//! 2. **Estimate**: an LLM behind an OpenRouter-style chat-completion API
//!    guesses a probability for each outcome.
//! 3. **Select**: the most likely outcome wins, with a warning when the top
//!    two are within 10 points.
//!
//! The API key is kept AES-256-GCM encrypted on disk by [`KeyStore`].
//! Not financial advice.

pub mod api;
pub mod chart;
pub mod config;
pub mod error;
pub mod estimator;
pub mod key_store;
pub mod pipeline;
pub mod retry;
pub mod scraper;
pub mod selector;
pub mod sounds;
pub mod types;

pub use config::{Config, ModelOption, DEFAULT_MODEL, MODEL_OPTIONS};
pub use error::{EstimateError, KeyStoreError, PayloadError, ScrapeError};
pub use estimator::ProbabilityEstimator;
pub use key_store::KeyStore;
pub use pipeline::{GambaDeck, PipelineError, PredictionOutcome, PredictionView};
pub use scraper::{ChromeDriver, MarketScraper, PageDriver, PageSession};
pub use selector::select;
pub use sounds::SoundCue;
pub use types::{Market, Prediction, ProbabilityMap, Selection};
