//! Matcher engine: one pure function per strategy plus a dispatcher.
//!
//! Every strategy is computed in-memory with no I/O and no shared state,
//! so field evaluations are independent: evaluating field A never reads
//! the result of field B, and evaluations may run in any order or in
//! parallel without synchronization.

mod custom;
mod exact;
mod fuzzy;
mod keyword;
pub mod patterns;
mod regexp;

use crate::baseline::FieldExpectation;
use crate::types::{FieldMatchResult, FieldValue, MatchStrategy};

/// Intermediate verdict produced by a strategy function.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Verdict {
    pub is_match: bool,
    pub confidence: f64,
    pub message: Option<String>,
}

impl Verdict {
    fn pass() -> Self {
        Self {
            is_match: true,
            confidence: 1.0,
            message: None,
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            is_match: false,
            confidence: 0.0,
            message: Some(message.into()),
        }
    }
}

/// Judge one field's actual value against its expectation.
///
/// Universal handling before strategy dispatch: an absent or
/// whitespace-only value fails a required field outright, while an
/// optional field passes with zero confidence. The zero confidence is
/// deliberate: an absent optional field is never penalized as a failure,
/// but it also contributes nothing positive to the optional score, so
/// completeness is still rewarded by the aggregator.
pub fn match_field(
    expectation: &FieldExpectation,
    actual: Option<&FieldValue>,
) -> FieldMatchResult {
    let present = actual.filter(|value| !value.is_blank());

    let verdict = match present {
        None => {
            if expectation.required {
                Verdict::fail("required field missing")
            } else {
                Verdict {
                    is_match: true,
                    confidence: 0.0,
                    message: None,
                }
            }
        }
        Some(value) => match expectation.strategy {
            MatchStrategy::Exact => exact::evaluate(expectation, value),
            MatchStrategy::Keyword => keyword::evaluate(expectation, value),
            MatchStrategy::Fuzzy => fuzzy::evaluate(expectation, value),
            MatchStrategy::Regex => regexp::evaluate(expectation, value),
            MatchStrategy::Custom => custom::evaluate(expectation, value),
        },
    };

    FieldMatchResult {
        field_name: expectation.field_name.clone(),
        is_match: verdict.is_match,
        confidence: verdict.confidence,
        expected: expectation.expected.clone(),
        actual: actual.cloned(),
        error_message: verdict.message,
        strategy: expectation.strategy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_field_fails() {
        // Scenario E.
        let expectation = FieldExpectation::exact("founded", 2013).required();
        let result = match_field(&expectation, None);
        assert!(!result.is_match);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.error_message.unwrap(), "required field missing");
    }

    #[test]
    fn test_missing_optional_field_passes_with_zero_confidence() {
        let expectation = FieldExpectation::exact("industry", "video");
        let result = match_field(&expectation, None);
        assert!(result.is_match);
        assert_eq!(result.confidence, 0.0);
        assert!(result.error_message.is_none());
    }

    #[test]
    fn test_whitespace_only_value_counts_as_missing() {
        let expectation = FieldExpectation::exact("founded", 2013).required();
        let blank = FieldValue::Text("   ".to_string());
        let result = match_field(&expectation, Some(&blank));
        assert!(!result.is_match);
        assert_eq!(result.error_message.unwrap(), "required field missing");
        // The blank value is still echoed for diagnostics.
        assert_eq!(result.actual, Some(blank));
    }

    #[test]
    fn test_exact_scenario() {
        // Scenario A: founded=2013, actual 2013.
        let expectation = FieldExpectation::exact("founded", 2013).required();
        let result = match_field(&expectation, Some(&FieldValue::Integer(2013)));
        assert!(result.is_match);
        assert_eq!(result.confidence, 1.0);
        assert!(result.error_message.is_none());
        assert_eq!(result.strategy, MatchStrategy::Exact);
    }

    #[test]
    fn test_result_carries_expected_and_actual() {
        let expectation = FieldExpectation::exact("founded", 2013);
        let result = match_field(&expectation, Some(&FieldValue::Integer(2014)));
        assert_eq!(result.expected, Some(FieldValue::Integer(2013)));
        assert_eq!(result.actual, Some(FieldValue::Integer(2014)));
        assert_eq!(result.field_name, "founded");
    }

    #[test]
    fn test_dispatch_reaches_every_strategy() {
        let value = FieldValue::Text("Video streaming, 51-200 employees".to_string());

        let keyword = FieldExpectation::keyword("f", ["video"]);
        assert!(match_field(&keyword, Some(&value)).is_match);

        let fuzzy = FieldExpectation::fuzzy("f", "100-150 employees");
        assert!(match_field(&fuzzy, Some(&value)).is_match);

        let regex = FieldExpectation::regex("f", r"\d+-\d+");
        assert!(match_field(&regex, Some(&value)).is_match);

        let custom = FieldExpectation::custom(
            "f",
            crate::types::CustomValidator::new(|_, _| Ok(true.into())),
        );
        assert!(match_field(&custom, Some(&value)).is_match);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let expectation = FieldExpectation::fuzzy("size", "51-200 employees");
        let value = FieldValue::Text("100-250 employees".to_string());
        let first = match_field(&expectation, Some(&value));
        let second = match_field(&expectation, Some(&value));
        assert_eq!(first, second);
    }
}
