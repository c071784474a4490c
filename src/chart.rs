//! Pie chart data for a probability map
//!
//! Slices are normalized by the total so a model that returns numbers not
//! summing to 100 still draws a full circle. Angles start at 90° (12 o'clock)
//! and run counter-clockwise.

use crate::types::ProbabilityMap;
use serde::Serialize;

pub const START_ANGLE: f64 = 90.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    /// Value as returned by the model
    pub value: f64,
    /// Share of the whole pie, 0.0–1.0
    pub fraction: f64,
    pub start_degrees: f64,
    pub sweep_degrees: f64,
}

impl PieSlice {
    /// Share as a one-decimal percentage label, e.g. "33.3%"
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

/// One slice per outcome, in map order. Empty when nothing is positive.
pub fn pie_slices(probs: &ProbabilityMap) -> Vec<PieSlice> {
    let total: f64 = probs.iter().map(|(_, v)| v.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = START_ANGLE;
    probs
        .iter()
        .map(|(label, value)| {
            let fraction = value.max(0.0) / total;
            let sweep = fraction * 360.0;
            let slice = PieSlice {
                label: label.to_string(),
                value,
                fraction,
                start_degrees: start,
                sweep_degrees: sweep,
            };
            start = (start + sweep) % 360.0;
            slice
        })
        .collect()
}

/// Horizontal bar rendering for terminals
pub fn render_bars(slices: &[PieSlice], width: usize) -> String {
    let label_width = slices.iter().map(|s| s.label.chars().count()).max().unwrap_or(0);

    slices
        .iter()
        .map(|s| {
            let filled = (s.fraction * width as f64).round() as usize;
            format!(
                "{:<label_width$}  {}{} {:>6}",
                s.label,
                "█".repeat(filled),
                "░".repeat(width.saturating_sub(filled)),
                s.percent_label(),
                label_width = label_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
