//! Fuzzy matcher: approximate numeric ranges embedded in free text.
//!
//! "200-500 employees" and "51-200 employees" should be comparable even
//! though no substring matches. Both sides are scanned for integers; the
//! `[min, max]` envelope of each side becomes its range, and the expected
//! range is widened by a tolerance fraction before checking for overlap.
//! When either side carries no numbers at all, the matcher falls back to
//! character-bigram similarity.

use super::patterns::{bigram_similarity, extract_integers};
use super::Verdict;
use crate::baseline::FieldExpectation;
use crate::types::FieldValue;

/// Similarity threshold tolerance for the string fallback.
const DEFAULT_STRING_TOLERANCE: f64 = 0.2;

/// Range expansion tolerance for numeric comparison.
const DEFAULT_RANGE_TOLERANCE: f64 = 0.3;

pub fn evaluate(expectation: &FieldExpectation, actual: &FieldValue) -> Verdict {
    let expected = match &expectation.expected {
        Some(expected) => expected,
        None => return Verdict::fail("no expected value configured"),
    };

    let actual_text = actual.as_text();
    let expected_text = expected.as_text();

    let actual_numbers = extract_integers(&actual_text);
    let expected_numbers = extract_integers(&expected_text);

    if actual_numbers.is_empty() || expected_numbers.is_empty() {
        return string_similarity(expectation, &actual_text, &expected_text);
    }

    range_overlap(expectation, &actual_numbers, &expected_numbers)
}

/// Fallback: bigram similarity between the two lower-cased strings.
fn string_similarity(expectation: &FieldExpectation, actual: &str, expected: &str) -> Verdict {
    let tolerance = expectation
        .fuzzy_tolerance
        .unwrap_or(DEFAULT_STRING_TOLERANCE);
    let threshold = 1.0 - tolerance;

    let similarity = bigram_similarity(actual, expected);

    if similarity >= threshold {
        let message = if similarity < 1.0 {
            Some(format!("similarity {:.2} (threshold {:.2})", similarity, threshold))
        } else {
            None
        };
        Verdict {
            is_match: true,
            confidence: similarity,
            message,
        }
    } else {
        Verdict {
            is_match: false,
            confidence: similarity,
            message: Some(format!(
                "similarity {:.2} below threshold {:.2}",
                similarity, threshold
            )),
        }
    }
}

/// Numeric path: overlap of `[min, max]` envelopes after widening the
/// expected range by `(max - min) * tolerance` on both ends.
fn range_overlap(expectation: &FieldExpectation, actual: &[i64], expected: &[i64]) -> Verdict {
    let tolerance = expectation
        .fuzzy_tolerance
        .unwrap_or(DEFAULT_RANGE_TOLERANCE);

    let (actual_min, actual_max) = envelope(actual);
    let (expected_min, expected_max) = envelope(expected);

    let tolerance_amount = (expected_max - expected_min) * tolerance;
    let low = expected_min - tolerance_amount;
    let high = expected_max + tolerance_amount;

    if actual_max < low || actual_min > high {
        return Verdict {
            is_match: false,
            confidence: 0.0,
            message: Some(format!(
                "range {}..{} does not overlap expected {}..{} (tolerance {})",
                actual_min, actual_max, expected_min, expected_max, tolerance
            )),
        };
    }

    // Full containment of either raw envelope in the other counts as a
    // complete match, including degenerate single-number ranges. The
    // tolerance only decides whether ranges overlap at all.
    let contained = (actual_min >= expected_min && actual_max <= expected_max)
        || (expected_min >= actual_min && expected_max <= actual_max);
    if contained {
        return Verdict::pass();
    }

    let overlap = (actual_max.min(high) - actual_min.max(low)).max(0.0);
    let longest = (actual_max - actual_min).max(expected_max - expected_min);
    let confidence = if longest <= 0.0 {
        1.0
    } else {
        (overlap / longest).min(1.0)
    };

    Verdict {
        is_match: true,
        confidence,
        message: Some(format!(
            "partial overlap of {}..{} with expected {}..{}",
            actual_min, actual_max, expected_min, expected_max
        )),
    }
}

fn envelope(numbers: &[i64]) -> (f64, f64) {
    let min = numbers.iter().copied().min().unwrap_or(0) as f64;
    let max = numbers.iter().copied().max().unwrap_or(0) as f64;
    (min, max)
}
