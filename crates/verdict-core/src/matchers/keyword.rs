//! Keyword matcher: case-insensitive substring hits with partial credit.

use super::Verdict;
use crate::baseline::FieldExpectation;
use crate::types::FieldValue;

pub fn evaluate(expectation: &FieldExpectation, actual: &FieldValue) -> Verdict {
    if expectation.keywords.is_empty() {
        // Normally rejected at baseline load; kept as a guard for
        // expectations built outside the parser.
        return Verdict::fail("no keywords configured");
    }

    let haystack = actual.as_text().to_lowercase();

    let (matched, missing): (Vec<&String>, Vec<&String>) = expectation
        .keywords
        .iter()
        .partition(|kw| haystack.contains(&kw.to_lowercase()));

    let confidence = matched.len() as f64 / expectation.keywords.len() as f64;
    let is_match = !matched.is_empty();

    let message = if missing.is_empty() {
        None
    } else {
        Some(format!(
            "matched {}/{} keywords, missing: {}",
            matched.len(),
            expectation.keywords.len(),
            missing
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    };

    Verdict {
        is_match,
        confidence,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_keywords_full_confidence() {
        let expectation = FieldExpectation::keyword("industry", ["video", "streaming"]);
        let verdict = evaluate(
            &expectation,
            &FieldValue::Text("Video streaming platform".to_string()),
        );
        assert!(verdict.is_match);
        assert_eq!(verdict.confidence, 1.0);
        assert!(verdict.message.is_none());
    }

    #[test]
    fn test_partial_keywords_partial_credit() {
        // Scenario D: one of two keywords present.
        let expectation = FieldExpectation::keyword("industry", ["video", "streaming"]);
        let verdict = evaluate(
            &expectation,
            &FieldValue::Text("Video Technology".to_string()),
        );
        assert!(verdict.is_match);
        assert_eq!(verdict.confidence, 0.5);
        assert!(verdict.message.unwrap().contains("streaming"));
    }

    #[test]
    fn test_no_keywords_matched() {
        let expectation = FieldExpectation::keyword("industry", ["video", "streaming"]);
        let verdict = evaluate(&expectation, &FieldValue::Text("Banking".to_string()));
        assert!(!verdict.is_match);
        assert_eq!(verdict.confidence, 0.0);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let expectation = FieldExpectation::keyword("industry", ["VIDEO"]);
        let verdict = evaluate(&expectation, &FieldValue::Text("video tech".to_string()));
        assert!(verdict.is_match);
        assert_eq!(verdict.confidence, 1.0);
    }

    #[test]
    fn test_empty_keyword_list_is_config_error_verdict() {
        let mut expectation = FieldExpectation::keyword("industry", ["video"]);
        expectation.keywords.clear();
        let verdict = evaluate(&expectation, &FieldValue::Text("video".to_string()));
        assert!(!verdict.is_match);
        assert_eq!(verdict.confidence, 0.0);
        assert_eq!(verdict.message.unwrap(), "no keywords configured");
    }

    #[test]
    fn test_keywords_searched_in_list_values() {
        let expectation = FieldExpectation::keyword("products", ["player"]);
        let actual = FieldValue::Items(vec!["Video Player".to_string(), "CDN".to_string()]);
        assert!(evaluate(&expectation, &actual).is_match);
    }
}
