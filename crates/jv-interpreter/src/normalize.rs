//! Query normalization.
//!
//! Only case folding. Matching downstream is substring containment, not
//! word-boundary aware, so "overall" contains "all".

/// Lower-case `raw` for containment checks.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
}

/// Check if the text contains any of the given patterns.
pub fn matches_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}
