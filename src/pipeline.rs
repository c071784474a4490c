//! Scrape → estimate → select
//!
//! `predict` returns typed results for callers that want them; `run` is the
//! display boundary and always produces something to show.

use crate::chart::{pie_slices, PieSlice};
use crate::config::Config;
use crate::error::{EstimateError, PayloadError, ScrapeError};
use crate::estimator::{build_prompt, ProbabilityEstimator};
use crate::key_store::KeyStore;
use crate::scraper::{ChromeDriver, MarketScraper, PageDriver};
use crate::selector::select;
use crate::sounds::SoundCue;
use crate::types::{Market, Prediction};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

pub const INSUFFICIENT_DATA: &str = "Not enough volume/data to make a prediction.";

pub const NO_CREDENTIAL: &str = "Error: No API key configured. Save your OpenRouter API key in Settings first.";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error(transparent)]
    Estimate(#[from] EstimateError),

    #[error("no API key configured")]
    NoCredential,
}

impl PipelineError {
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Scrape(e) => e.user_message(),
            PipelineError::Estimate(e) => e.user_message(),
            PipelineError::NoCredential => NO_CREDENTIAL.to_string(),
        }
    }
}

/// Result of a successful pipeline run
#[derive(Debug, Clone)]
pub enum PredictionOutcome {
    Predicted(Prediction),
    /// The page listed no priced outcomes; the model was not asked
    InsufficientData(Market),
}

/// What the output fields show after pressing "Predict!"
#[derive(Debug, Clone, Serialize)]
pub struct PredictionView {
    pub question: String,
    pub bet_on: String,
    pub percent_success: String,
    pub all_probabilities: String,
    pub chart: Vec<PieSlice>,
    pub sound: SoundCue,
}

impl PredictionView {
    fn message(question: &str, text: String) -> Self {
        Self {
            question: question.to_string(),
            bet_on: text,
            percent_success: String::new(),
            all_probabilities: String::new(),
            chart: Vec::new(),
            sound: SoundCue::Gamblecore,
        }
    }
}

impl From<&Prediction> for PredictionView {
    fn from(p: &Prediction) -> Self {
        Self {
            question: p.market.question.clone(),
            bet_on: p.selection.best_outcome.clone(),
            percent_success: p.selection.percent_text(),
            all_probabilities: p.selection.all_text.clone(),
            chart: pie_slices(&p.probabilities),
            sound: SoundCue::Gamblecore,
        }
    }
}

/// The whole app minus the UI
pub struct GambaDeck<D: PageDriver = ChromeDriver> {
    scraper: MarketScraper<D>,
    estimator: ProbabilityEstimator,
    key_store: KeyStore,
    default_model: String,
}

impl GambaDeck<ChromeDriver> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            MarketScraper::chrome(config.scraper.clone()),
            ProbabilityEstimator::new(config.api_url.clone()),
            KeyStore::new(config.key_store.clone()),
            config.default_model.clone(),
        )
    }
}

impl<D: PageDriver> GambaDeck<D> {
    pub fn new(
        scraper: MarketScraper<D>,
        estimator: ProbabilityEstimator,
        key_store: KeyStore,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            scraper,
            estimator,
            key_store,
            default_model: default_model.into(),
        }
    }

    pub fn key_store(&self) -> &KeyStore {
        &self.key_store
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Scrape `url`, ask `model` (or the default) and pick the favorite
    pub async fn predict(&self, url: &str, model: Option<&str>) -> Result<PredictionOutcome, PipelineError> {
        let model = model.filter(|m| !m.trim().is_empty()).unwrap_or(self.default_model.as_str());

        let credential = self.key_store.load();
        if credential.is_empty() {
            return Err(PipelineError::NoCredential);
        }

        let market = self.scraper.scrape(url).await?;
        if market.is_insufficient() {
            info!("[Pipeline] No priced outcomes on {}, skipping estimate", url);
            return Ok(PredictionOutcome::InsufficientData(market));
        }

        let prompt = build_prompt(&market.question, &market.outcomes);
        let probabilities = self.estimator.estimate_with_prompt(&prompt, model, &credential).await?;

        let selection = select(&probabilities).ok_or(EstimateError::InvalidPayload(PayloadError::NoProbabilities))?;

        info!(
            "[Pipeline] {} → {} ({}){}",
            market.question,
            selection.best_outcome,
            selection.percent_text(),
            if selection.is_ambiguous { " [too close]" } else { "" }
        );

        Ok(PredictionOutcome::Predicted(Prediction {
            market,
            prompt,
            probabilities,
            selection,
        }))
    }

    /// [`predict`](Self::predict) with every failure turned into display text
    pub async fn run(&self, url: &str, model: Option<&str>) -> PredictionView {
        match self.predict(url, model).await {
            Ok(PredictionOutcome::Predicted(prediction)) => PredictionView::from(&prediction),
            Ok(PredictionOutcome::InsufficientData(market)) => {
                PredictionView::message(&market.question, INSUFFICIENT_DATA.to_string())
            }
            Err(e) => {
                warn!("[Pipeline] Prediction for {} failed: {}", url, e);
                PredictionView::message(url, e.user_message())
            }
        }
    }
}
