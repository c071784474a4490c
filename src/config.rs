//! Configuration management for Gamba Deck

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// App configuration loaded from environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Chat-completion endpoint used for probability estimates
    pub api_url: String,

    /// Model used when the caller does not pick one
    pub default_model: String,

    /// Headless browser settings
    pub scraper: ScraperConfig,

    /// Where the encryption key and encrypted API key live
    pub key_store: KeyStoreConfig,

    /// Bind address for the web server
    pub server_addr: String,
}

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Wait after navigation before reading the page (default: 5s)
    pub settle_delay: Duration,
    /// Wait after clicking "View more" (default: 1s)
    pub expand_delay: Duration,
    /// Page load retry policy
    pub retry: RetryConfig,
    /// Chrome/Chromium executable, auto-detected when unset
    pub chrome_path: Option<PathBuf>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(5),
            expand_delay: Duration::from_secs(1),
            retry: RetryConfig::default(),
            chrome_path: None,
        }
    }
}

/// Fixed-delay retry policy for page loads
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay between attempts
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            delay: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeyStoreConfig {
    /// Directory holding both files
    pub dir: PathBuf,
    /// Symmetric key file name
    pub key_file: String,
    /// Encrypted secret file name
    pub secret_file: String,
}

impl Default for KeyStoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            key_file: ".gamba_deck_key".to_string(),
            secret_file: ".gamba_deck_settings".to_string(),
        }
    }
}

impl KeyStoreConfig {
    /// Default file names inside `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }

    pub fn key_path(&self) -> PathBuf {
        self.dir.join(&self.key_file)
    }

    pub fn secret_path(&self) -> PathBuf {
        self.dir.join(&self.secret_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: OpenRouterApi::CHAT_COMPLETIONS_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            scraper: ScraperConfig::default(),
            key_store: KeyStoreConfig::default(),
            server_addr: "127.0.0.1:7860".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let api_url = env::var("OPENROUTER_API_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.api_url);

        let default_model = env::var("GAMBA_DECK_MODEL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.default_model);

        let key_dir = env::var("GAMBA_DECK_HOME")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.key_store.dir);

        let settle_delay = env_millis("SCRAPE_SETTLE_MS")?.unwrap_or(defaults.scraper.settle_delay);
        let expand_delay = env_millis("SCRAPE_EXPAND_MS")?.unwrap_or(defaults.scraper.expand_delay);
        let retry_delay = env_millis("SCRAPE_RETRY_DELAY_MS")?.unwrap_or(defaults.scraper.retry.delay);

        let max_attempts = match env::var("SCRAPE_MAX_ATTEMPTS") {
            Ok(v) => v
                .parse::<u32>()
                .with_context(|| format!("SCRAPE_MAX_ATTEMPTS must be a positive integer, got {:?}", v))?,
            Err(_) => defaults.scraper.retry.max_attempts,
        };
        if max_attempts == 0 {
            anyhow::bail!("SCRAPE_MAX_ATTEMPTS must be at least 1");
        }

        let chrome_path = env::var("CHROME_PATH").ok().filter(|s| !s.is_empty()).map(PathBuf::from);

        let server_addr = env::var("SERVER_ADDR")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.server_addr);

        Ok(Self {
            api_url,
            default_model,
            scraper: ScraperConfig {
                settle_delay,
                expand_delay,
                retry: RetryConfig {
                    max_attempts,
                    delay: retry_delay,
                },
                chrome_path,
            },
            key_store: KeyStoreConfig::in_dir(key_dir),
            server_addr,
        })
    }
}

fn env_millis(name: &str) -> Result<Option<Duration>> {
    match env::var(name) {
        Ok(v) => {
            let ms: u64 = v
                .parse()
                .with_context(|| format!("{} must be a number of milliseconds, got {:?}", name, v))?;
            Ok(Some(Duration::from_millis(ms)))
        }
        Err(_) => Ok(None),
    }
}

/// OpenRouter API configuration
pub struct OpenRouterApi;

impl OpenRouterApi {
    pub const CHAT_COMPLETIONS_URL: &'static str = "https://openrouter.ai/api/v1/chat/completions";
}

pub const DEFAULT_MODEL: &str = "anthropic/claude-sonnet-4:online";

/// A selectable model: (id sent to the API, label shown to users)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOption {
    pub id: &'static str,
    pub label: &'static str,
}

pub const MODEL_OPTIONS: &[ModelOption] = &[
    ModelOption {
        id: "anthropic/claude-sonnet-4:online",
        label: "Anthropic Claude Sonnet 4 (default)",
    },
    ModelOption {
        id: "google/gemini-2.5-flash-preview-05-20",
        label: "Google Gemini 2.5 Flash Preview 05-20",
    },
    ModelOption {
        id: "openai/gpt-4o-mini",
        label: "OpenAI GPT-4o Mini",
    },
    ModelOption {
        id: "google/gemini-2.5-pro-preview",
        label: "Google Gemini 2.5 Pro Preview",
    },
];
