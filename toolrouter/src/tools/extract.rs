//! Rule-based argument extraction from the raw query.
//!
//! Used by [`HeuristicLlm`](crate::llm::HeuristicLlm) to route and fill tool arguments without a
//! model. Patterns are tried in order, case-insensitively; the first match wins.

use std::sync::OnceLock;

use regex::Regex;

/// Location returned when no pattern captures anything.
pub const DEFAULT_LOCATION: &str = "San Francisco";

const MATH_PATTERNS: &[&str] = &[
    r"(?i)what is (\d+(?:\s*[-+*/%]\s*\d+)+)",
    r"(?i)calculate (\d+(?:\s*[-+*/%]\s*\d+)+)",
    r"(\d+(?:\s*[-+*/%]\s*\d+)+)",
    r"(\d+)\s*(\*\*|[-+*/%])\s*(\d+)",
];

const LOCATION_PATTERNS: &[&str] = &[
    r"(?i)weather (?:in|for|at) (\w+(?:\s+\w+)*)",
    r"(?i)weather (?:like|today) (?:in|for|at) (\w+(?:\s+\w+)*)",
    r"(?i)(\w+(?:\s+\w+)*) weather",
    r"(?i)temperature (?:in|for|at) (\w+(?:\s+\w+)*)",
];

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().filter_map(|p| Regex::new(p).ok()).collect()
}

fn math_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| compile(MATH_PATTERNS))
}

fn location_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| compile(LOCATION_PATTERNS))
}

fn location_keywords() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(?:weather|like|today|temperature)\b").ok())
        .as_ref()
}

/// First arithmetic expression in `query`, trimmed; empty when there is none.
pub fn extract_math_expression(query: &str) -> String {
    math_patterns()
        .iter()
        .find_map(|re| re.captures(query))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Location named in a weather query, or [`DEFAULT_LOCATION`].
pub fn extract_location_from_query(query: &str) -> String {
    for re in location_patterns() {
        let Some(found) = re.captures(query).and_then(|c| c.get(1)) else {
            continue;
        };
        let location = match location_keywords() {
            Some(kw) => kw.replace_all(found.as_str(), "").trim().to_string(),
            None => found.as_str().trim().to_string(),
        };
        if !location.is_empty() {
            return location;
        }
    }
    DEFAULT_LOCATION.to_string()
}
