//! Probability estimator backed by an OpenRouter-style chat-completion API
//!
//! One request per estimate, no retry. The model answers in free text, so
//! the JSON object is cut out of the reply before parsing.

use crate::error::{EstimateError, PayloadError};
use crate::types::ProbabilityMap;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Key the model is asked to put its answer under
pub const PROBABILITIES_KEY: &str = "probabilities";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for the completion endpoint
#[derive(Clone)]
pub struct ProbabilityEstimator {
    client: Client,
    api_url: String,
}

impl ProbabilityEstimator {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
        }
    }

    /// Ask `model` for a probability per outcome
    pub async fn estimate(
        &self,
        question: &str,
        outcomes: &[String],
        model: &str,
        credential: &str,
    ) -> Result<ProbabilityMap, EstimateError> {
        let prompt = build_prompt(question, outcomes);
        self.estimate_with_prompt(&prompt, model, credential).await
    }

    /// Same as [`estimate`](Self::estimate) with a prompt the caller already built
    pub async fn estimate_with_prompt(
        &self,
        prompt: &str,
        model: &str,
        credential: &str,
    ) -> Result<ProbabilityMap, EstimateError> {
        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        info!("[Estimator] Requesting probabilities from {}", model);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(credential)
            .json(&request)
            .send()
            .await
            .map_err(|e| EstimateError::from_network_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| EstimateError::from_network_error(&e))?;

        if !status.is_success() {
            warn!("[Estimator] {} returned {}", self.api_url, status);
            return Err(EstimateError::Http(status.as_u16(), body));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| PayloadError::Malformed(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| PayloadError::Malformed("response has no choices[0].message.content".to_string()))?;

        debug!("[Estimator] Raw model content: {}", content);

        parse_content(&content)
    }
}

/// Prompt asking for percentages that sum to 100, as JSON
pub fn build_prompt(question: &str, outcomes: &[String]) -> String {
    format!(
        "\nYou are an expert probabilistic reasoner.\n\
         Given the following question and possible outcomes, estimate the probability of each outcome (as a percentage, summing to 100%).\n\
         \n\
         Question: {}\n\
         Possible outcomes (comma separated): {}\n\
         \n\
         Return your answer as a JSON object with one key: '{}' (a dict of outcome: probability).\n",
        question,
        outcomes.join(", "),
        PROBABILITIES_KEY
    )
}

fn json_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"))
}

/// Pull the probability map out of free-text model output.
///
/// Takes everything from the first `{` to the last `}`.
pub fn parse_content(content: &str) -> Result<ProbabilityMap, EstimateError> {
    let json_str = match json_block_regex().find(content) {
        Some(m) => m.as_str(),
        None => return Err(EstimateError::NoJson(content.to_string())),
    };

    let value: Value = serde_json::from_str(json_str).map_err(|e| PayloadError::Malformed(e.to_string()))?;

    let probabilities = value
        .get(PROBABILITIES_KEY)
        .ok_or_else(|| PayloadError::Malformed(format!("missing '{}' key", PROBABILITIES_KEY)))?;

    let object = match probabilities.as_object() {
        Some(obj) if !obj.is_empty() => obj,
        _ => return Err(PayloadError::NoProbabilities.into()),
    };

    let mut map = ProbabilityMap::new();
    for (label, raw) in object {
        let value = as_percent(raw)
            .ok_or_else(|| PayloadError::Malformed(format!("probability for '{}' is not a number: {}", label, raw)))?;
        map.insert(label.clone(), value);
    }

    Ok(map)
}

/// Finite numbers, or strings like "70" / "70%"
fn as_percent(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}
