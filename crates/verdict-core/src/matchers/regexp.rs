//! Regex matcher: case-insensitive pattern search, binary verdict.

use regex::RegexBuilder;

use super::Verdict;
use crate::baseline::FieldExpectation;
use crate::types::FieldValue;

pub fn evaluate(expectation: &FieldExpectation, actual: &FieldValue) -> Verdict {
    let pattern = match expectation.regex_pattern.as_deref() {
        Some(pattern) => pattern,
        // Normally rejected at baseline load.
        None => return Verdict::fail("no regex pattern configured"),
    };

    let regex = match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(regex) => regex,
        Err(e) => return Verdict::fail(format!("invalid regex pattern: {}", e)),
    };

    let haystack = actual.as_text();
    if regex.is_match(&haystack) {
        Verdict::pass()
    } else {
        Verdict::fail(format!("pattern '{}' not found in '{}'", pattern, haystack))
    }
}
