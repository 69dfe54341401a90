//! Exact matcher: equality after numeric coercion.
//!
//! Numeric fields compare as numbers, so `2013` and `"2013"` are equal.
//! Everything else compares by trimmed string form; lists compare
//! element-wise. Confidence is binary.

use super::Verdict;
use crate::baseline::FieldExpectation;
use crate::types::FieldValue;

pub fn evaluate(expectation: &FieldExpectation, actual: &FieldValue) -> Verdict {
    let expected = match &expectation.expected {
        Some(expected) => expected,
        None => return Verdict::fail("no expected value configured"),
    };

    if values_equal(expected, actual) {
        Verdict::pass()
    } else {
        Verdict::fail(format!(
            "expected '{}', got '{}'",
            expected.as_text(),
            actual.as_text()
        ))
    }
}

fn values_equal(expected: &FieldValue, actual: &FieldValue) -> bool {
    // Numeric coercion first: identical string representations of
    // numbers are treated equal. Unequal numbers still fall through to
    // the string comparison; only NaN text (which is never equal to
    // itself numerically) reaches it with equal string forms.
    if let (Some(e), Some(a)) = (expected.as_number(), actual.as_number()) {
        if e == a {
            return true;
        }
    }

    match (expected, actual) {
        (FieldValue::Items(e), FieldValue::Items(a)) => {
            e.len() == a.len()
                && e.iter()
                    .zip(a.iter())
                    .all(|(x, y)| x.trim() == y.trim())
        }
        _ => expected.as_text().trim() == actual.as_text().trim(),
    }
}
