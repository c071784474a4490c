//! Market page scraper
//!
//! Loads a market page in a headless browser and reads the question and the
//! outcome labels out of the rendered text. The browser sits behind
//! [`PageDriver`] so the page logic can run against canned pages in tests.

mod chrome;
mod extract;
#[cfg(test)]
pub(crate) mod fake;

pub use chrome::{ChromeDriver, ChromeSession};
pub use extract::{extract_outcomes, has_percent, question_or_url, strip_percent, OUTCOME_MARKER};

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::retry::{with_retry, Retryable};
use crate::types::Market;
use async_trait::async_trait;
use reqwest::Url;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Failure inside a single page load attempt
#[derive(Debug, Error)]
pub enum PageError {
    /// Browser or transport problem; worth another attempt
    #[error("{0}")]
    Browser(String),

    /// Page content could not be interpreted; retrying will not help
    #[error("{0}")]
    Parse(String),
}

impl Retryable for PageError {
    fn is_retryable(&self) -> bool {
        matches!(self, PageError::Browser(_))
    }
}

/// Opens pages
#[async_trait]
pub trait PageDriver: Send + Sync {
    type Session: PageSession;

    /// Navigate to `url` in a fresh browser session
    async fn open(&self, url: &str) -> Result<Self::Session, PageError>;
}

/// A loaded page. Must be closed by the caller.
#[async_trait]
pub trait PageSession: Send + Sync {
    /// Text of the first `h1`, if any
    async fn heading_text(&self) -> Result<Option<String>, PageError>;

    /// Click the "View more" paragraph if the page has one
    async fn expand_view_more(&self) -> Result<bool, PageError>;

    /// Text of every `p` element in document order
    async fn paragraph_texts(&self) -> Result<Vec<String>, PageError>;

    async fn close(self) -> Result<(), PageError>;
}

/// Scrapes question and outcomes from market pages
pub struct MarketScraper<D: PageDriver = ChromeDriver> {
    driver: D,
    config: ScraperConfig,
}

impl MarketScraper<ChromeDriver> {
    /// Scraper backed by headless Chrome
    pub fn chrome(config: ScraperConfig) -> Self {
        let driver = ChromeDriver::new(config.chrome_path.clone());
        Self::new(driver, config)
    }
}

impl<D: PageDriver> MarketScraper<D> {
    pub fn new(driver: D, config: ScraperConfig) -> Self {
        Self { driver, config }
    }

    /// Load `url` and read its market.
    ///
    /// A page without priced outcomes is not an error: the returned market
    /// has an empty outcome list.
    pub async fn scrape(&self, url: &str) -> Result<Market, ScrapeError> {
        let url = url.trim();
        validate_url(url)?;

        let result = with_retry(&self.config.retry, "page load", |attempt| self.load_once(url, attempt)).await;

        match result {
            Ok(market) => {
                info!(
                    "[Scraper] \"{}\" has {} outcomes: {:?}",
                    market.question,
                    market.outcomes.len(),
                    market.outcomes
                );
                Ok(market)
            }
            Err(PageError::Browser(last_error)) => Err(ScrapeError::Unreachable {
                attempts: self.config.retry.max_attempts.max(1),
                last_error,
            }),
            Err(PageError::Parse(reason)) => Err(ScrapeError::ParseFailure(reason)),
        }
    }

    async fn load_once(&self, url: &str, attempt: u32) -> Result<Market, PageError> {
        debug!("[Scraper] Loading {} (attempt {})", url, attempt);

        let session = self.driver.open(url).await?;
        let result = self.read_market(&session, url).await;

        if let Err(e) = session.close().await {
            warn!("[Scraper] Failed to close browser session: {}", e);
        }

        result
    }

    async fn read_market(&self, session: &D::Session, url: &str) -> Result<Market, PageError> {
        sleep(self.config.settle_delay).await;

        let question = question_or_url(session.heading_text().await?, url);

        if session.expand_view_more().await? {
            debug!("[Scraper] Expanded \"View more\"");
            sleep(self.config.expand_delay).await;
        }

        let paragraphs = session.paragraph_texts().await?;
        let outcomes = extract_outcomes(&paragraphs);

        Ok(Market { question, outcomes })
    }
}

fn validate_url(url: &str) -> Result<(), ScrapeError> {
    let parsed = Url::parse(url).map_err(|e| ScrapeError::ParseFailure(format!("invalid URL {:?}: {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ScrapeError::ParseFailure(format!(
            "unsupported URL scheme '{}', expected http or https",
            other
        ))),
    }
}
