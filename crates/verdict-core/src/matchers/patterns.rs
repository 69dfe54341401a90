//! Shared lexical helpers for matchers.
//!
//! The fuzzy matcher extracts integer substrings and falls back to a
//! character-bigram similarity. Both live here so the extraction rules
//! stay in one place.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    /// Runs of digits, scanned left to right. Unsigned on purpose: in
    /// range notation like "51-200" the dash is a separator, not a sign.
    pub static ref INTEGER_PATTERN: Regex = Regex::new(r"\d+").unwrap();
}

/// Extract all integer substrings from text, in scan order.
///
/// Runs too long for i64 are skipped rather than truncated.
pub fn extract_integers(text: &str) -> Vec<i64> {
    INTEGER_PATTERN
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Character-bigram Jaccard similarity between two lower-cased strings.
///
/// Strings shorter than two characters have no bigrams; two such strings
/// compare 1.0 when equal and 0.0 otherwise.
pub fn bigram_similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    let bigrams_a = bigrams(&a);
    let bigrams_b = bigrams(&b);

    if bigrams_a.is_empty() || bigrams_b.is_empty() {
        return if a == b { 1.0 } else { 0.0 };
    }

    let intersection = bigrams_a.intersection(&bigrams_b).count();
    let union = bigrams_a.union(&bigrams_b).count();

    intersection as f64 / union as f64
}

fn bigrams(text: &str) -> HashSet<(char, char)> {
    let chars: Vec<char> = text.chars().collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}
