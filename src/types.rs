//! Core data types for Gamba Deck

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A scraped prediction market
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Market {
    pub question: String,
    /// Unique labels in the order they appear on the page
    pub outcomes: Vec<String>,
}

impl Market {
    /// True when the page had no usable outcomes; the estimator should not be called
    pub fn is_insufficient(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Outcome label → percentage, in the order the model listed them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbabilityMap {
    entries: Vec<(String, f64)>,
}

impl ProbabilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; overwriting keeps its first position
    pub fn insert(&mut self, label: impl Into<String>, value: f64) {
        let label = label.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries.iter().find(|(l, _)| l == label).map(|(_, v)| *v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), *v))
    }
}

impl<L: Into<String>> FromIterator<(L, f64)> for ProbabilityMap {
    fn from_iter<I: IntoIterator<Item = (L, f64)>>(iter: I) -> Self {
        let mut map = ProbabilityMap::new();
        for (label, value) in iter {
            map.insert(label, value);
        }
        map
    }
}

impl Serialize for ProbabilityMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Best outcome chosen from a probability map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    /// Winning label, with the near-tie warning appended when ambiguous
    pub best_outcome: String,
    pub best_percent: f64,
    /// "label: value%" for every outcome, comma-joined
    pub all_text: String,
    pub is_ambiguous: bool,
}

impl Selection {
    pub fn percent_text(&self) -> String {
        format_percent(self.best_percent)
    }
}

/// `70.0` → `"70%"`, `12.5` → `"12.5%"`
pub fn format_percent(value: f64) -> String {
    format!("{}%", value)
}

/// Everything one pipeline run produced
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub market: Market,
    pub prompt: String,
    pub probabilities: ProbabilityMap,
    pub selection: Selection,
}
