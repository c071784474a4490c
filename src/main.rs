//! Gamba Deck CLI
//!
//! Ask an LLM which outcome of a prediction market to bet on.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use gamba_deck::chart::{pie_slices, render_bars};
use gamba_deck::pipeline::INSUFFICIENT_DATA;
use gamba_deck::{Config, GambaDeck, KeyStore, PredictionOutcome, MODEL_OPTIONS};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "gamba-deck")]
#[command(about = "Ask an LLM which prediction market outcome to bet on (not financial advice)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a market page and predict the winning outcome
    Predict {
        /// Full URL of the market page
        url: String,

        /// Model id (see `models`)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Encrypt and store the OpenRouter API key
    SetKey {
        /// The API key
        api_key: String,
    },

    /// Show whether an API key is stored
    KeyStatus,

    /// List the available models
    Models,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    // Load configuration
    let config = Config::from_env()?;

    match cli.command {
        Commands::Predict { url, model } => predict(&config, &url, model.as_deref()).await?,
        Commands::SetKey { api_key } => set_key(&config, &api_key)?,
        Commands::KeyStatus => key_status(&config),
        Commands::Models => list_models(&config),
    }

    Ok(())
}

async fn predict(config: &Config, url: &str, model: Option<&str>) -> Result<()> {
    if let Some(m) = model {
        if !MODEL_OPTIONS.iter().any(|o| o.id == m) {
            anyhow::bail!("Unknown model '{}'. Run `gamba-deck models` to see the options.", m);
        }
    }

    println!("\n{}", "=".repeat(70));
    println!("  GAMBA DECK");
    println!("  Model: {}", model.unwrap_or(config.default_model.as_str()));
    println!("{}\n", "=".repeat(70));

    let deck = GambaDeck::from_config(config);

    println!("Scraping {} ...\n", url);

    match deck.predict(url, model).await {
        Ok(PredictionOutcome::Predicted(prediction)) => {
            let selection = &prediction.selection;
            println!("\"{}\"\n", prediction.market.question);

            let bet_on = if selection.is_ambiguous {
                selection.best_outcome.yellow().bold()
            } else {
                selection.best_outcome.green().bold()
            };
            println!("  What to bet on:         {}", bet_on);
            println!("  Percentage of success:  {}", selection.percent_text().bold());
            println!("  All probabilities:      {}", selection.all_text);

            let slices = pie_slices(&prediction.probabilities);
            if !slices.is_empty() {
                println!("\n{}", render_bars(&slices, 40));
            }
        }
        Ok(PredictionOutcome::InsufficientData(market)) => {
            println!("\"{}\"\n", market.question);
            println!("  {}", INSUFFICIENT_DATA.yellow());
        }
        Err(e) => {
            println!("  {}", e.user_message().red());
        }
    }

    println!();
    Ok(())
}

fn set_key(config: &Config, api_key: &str) -> Result<()> {
    let store = KeyStore::new(config.key_store.clone());
    store.save(api_key.trim())?;
    println!("API key saved and encrypted in {}", config.key_store.dir.display());
    Ok(())
}

fn key_status(config: &Config) {
    let store = KeyStore::new(config.key_store.clone());
    if store.has_secret() {
        println!("API key: {}", "configured".green());
    } else {
        println!("API key: {} (run `gamba-deck set-key <KEY>`)", "not configured".red());
    }
}

fn list_models(config: &Config) {
    println!("Available models:");
    for option in MODEL_OPTIONS {
        let marker = if option.id == config.default_model { "*" } else { " " };
        println!("  {} {:<40} {}", marker, option.id, option.label);
    }
}
