//! Decision selector
//!
//! Picks the outcome to bet on from the model's probability map and flags
//! near-ties.

use crate::types::{format_percent, ProbabilityMap, Selection};

/// Top-two gap (percentage points) below which a pick is a coin flip
pub const AMBIGUITY_GAP: f64 = 10.0;

pub const EVEN_WARNING: &str = " Warning: The probabilities are too even. No clear favorite.";

/// Select the most likely outcome.
///
/// Equal maxima go to the label the model listed first. Returns `None` for an
/// empty map.
pub fn select(probs: &ProbabilityMap) -> Option<Selection> {
    let mut best: Option<(&str, f64)> = None;
    for (label, value) in probs.iter() {
        match best {
            Some((_, top)) if value <= top => {}
            _ => best = Some((label, value)),
        }
    }
    let (label, best_percent) = best?;

    let is_ambiguous = match top_two_gap(probs) {
        Some(gap) => gap < AMBIGUITY_GAP,
        None => false,
    };

    let best_outcome = if is_ambiguous {
        format!("{}{}", label, EVEN_WARNING)
    } else {
        label.to_string()
    };

    Some(Selection {
        best_outcome,
        best_percent,
        all_text: all_text(probs),
        is_ambiguous,
    })
}

/// Highest value minus second highest; `None` with fewer than two outcomes
fn top_two_gap(probs: &ProbabilityMap) -> Option<f64> {
    let mut values: Vec<f64> = probs.iter().map(|(_, v)| v).collect();
    if values.len() < 2 {
        return None;
    }
    values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    Some(values[0] - values[1])
}

/// "Yes: 70%, No: 30%"
pub fn all_text(probs: &ProbabilityMap) -> String {
    probs
        .iter()
        .map(|(label, value)| format!("{}: {}", label, format_percent(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, f64)]) -> ProbabilityMap {
        entries.iter().map(|(l, v)| (*l, *v)).collect()
    }

    #[test]
    fn test_clear_favorite() {
        let sel = select(&map(&[("Yes", 70.0), ("No", 30.0)])).unwrap();
        assert_eq!(sel.best_outcome, "Yes");
        assert_eq!(sel.best_percent, 70.0);
        assert_eq!(sel.percent_text(), "70%");
        assert_eq!(sel.all_text, "Yes: 70%, No: 30%");
        assert!(!sel.is_ambiguous);
    }

    #[test]
    fn test_near_tie_is_ambiguous() {
        let sel = select(&map(&[("Trump", 45.0), ("Harris", 48.5), ("Other", 6.5)])).unwrap();
        assert!(sel.is_ambiguous);
        assert_eq!(
            sel.best_outcome,
            "Harris Warning: The probabilities are too even. No clear favorite."
        );
        assert_eq!(sel.best_percent, 48.5);
    }

    #[test]
    fn test_gap_of_exactly_ten_is_not_ambiguous() {
        let sel = select(&map(&[("A", 55.0), ("B", 45.0)])).unwrap();
        assert!(!sel.is_ambiguous);
    }

    #[test]
    fn test_tie_goes_to_first_listed() {
        let sel = select(&map(&[("B", 50.0), ("A", 50.0)])).unwrap();
        assert!(sel.best_outcome.starts_with("B "));
        assert!(sel.is_ambiguous);
    }

    #[test]
    fn test_single_outcome_never_ambiguous() {
        let sel = select(&map(&[("Only", 100.0)])).unwrap();
        assert_eq!(sel.best_outcome, "Only");
        assert!(!sel.is_ambiguous);
    }

    #[test]
    fn test_empty_map() {
        assert!(select(&ProbabilityMap::new()).is_none());
    }

    #[test]
    fn test_best_is_always_an_input_label() {
        let probs = map(&[("x", 1.0), ("y", 99.0), ("z", 0.0)]);
        let sel = select(&probs).unwrap();
        assert!(probs.get(&sel.best_outcome).is_some());
    }
}
