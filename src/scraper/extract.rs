//! Outcome extraction from paragraph text
//!
//! Market pages list each outcome next to its current price ("Yes 62%",
//! "Other <1%"). Everything after the "OUTCOME" table header is order-book
//! noise and is ignored.

use regex::Regex;
use std::sync::OnceLock;

/// Paragraph text that ends the outcome list
pub const OUTCOME_MARKER: &str = "OUTCOME";

fn percent_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,3}(?:\.\d+)?%|<\s*1%)").expect("valid regex"))
}

/// True for text carrying a price such as "62%", "0.5%" or "<1%"
pub fn has_percent(text: &str) -> bool {
    percent_regex().is_match(text)
}

/// Label left over once the percentage tokens are removed
pub fn strip_percent(text: &str) -> String {
    let stripped = percent_regex().replace_all(text, "");
    stripped
        .trim_matches(|c: char| c == '<' || c == '>' || c.is_whitespace())
        .to_string()
}

fn is_marker(text: &str) -> bool {
    text.to_uppercase().starts_with(OUTCOME_MARKER)
}

/// Collect unique outcome labels, in page order, from paragraph texts
pub fn extract_outcomes<I, S>(paragraphs: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut outcomes: Vec<String> = Vec::new();

    for paragraph in paragraphs {
        let text = paragraph.as_ref().trim();
        if is_marker(text) {
            break;
        }
        if !has_percent(text) {
            continue;
        }
        let label = strip_percent(text);
        if !label.is_empty() && !outcomes.contains(&label) {
            outcomes.push(label);
        }
    }

    outcomes
}

/// First heading text, or the URL itself when the page has none
pub fn question_or_url(heading: Option<String>, url: &str) -> String {
    heading
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_labels_in_page_order() {
        let page = vec![
            "Polymarket",
            "$12,345,678 Vol.",
            "Gavin Newsom 31%",
            "J.D. Vance 28.5%",
            "Marco Rubio <1%",
            "OUTCOME",
            "Donald Trump Jr. 4%",
        ];
        assert_eq!(
            extract_outcomes(page),
            vec!["Gavin Newsom", "J.D. Vance", "Marco Rubio"]
        );
    }

    #[test]
    fn test_marker_is_case_insensitive_and_permanent() {
        let page = vec!["Yes 60%", "Outcome chance", "No 40%", "Maybe 5%"];
        assert_eq!(extract_outcomes(page), vec!["Yes"]);
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let page = vec!["Yes 60%", "No 40%", "Yes 61%", "  No   39% "];
        assert_eq!(extract_outcomes(page), vec!["Yes", "No"]);
    }

    #[test]
    fn test_percent_only_nodes_are_skipped() {
        let page = vec!["62%", "<1%", "< 1%", "Yes 62%"];
        assert_eq!(extract_outcomes(page), vec!["Yes"]);
    }

    #[test]
    fn test_no_percent_nodes_yields_empty() {
        let page = vec!["Will it rain tomorrow?", "Rules", "OUTCOME", "Yes 50%"];
        assert!(extract_outcomes(page).is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let page = vec!["A 10%", "B 20%", "C 70%"];
        assert_eq!(extract_outcomes(page.clone()), extract_outcomes(page));
    }

    #[test]
    fn test_strip_percent_trims_angle_brackets() {
        assert_eq!(strip_percent("> Other <1%"), "Other");
        assert_eq!(strip_percent("Bitcoin above 100k 99.9%"), "Bitcoin above 100k");
    }

    #[test]
    fn test_question_fallback() {
        assert_eq!(question_or_url(Some("  Who wins?  ".into()), "https://x"), "Who wins?");
        assert_eq!(question_or_url(Some("   ".into()), "https://x"), "https://x");
        assert_eq!(question_or_url(None, "https://x"), "https://x");
    }
}
