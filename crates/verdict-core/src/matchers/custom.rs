//! Custom matcher: invokes an injected validator function.
//!
//! A faulty validator must never abort the evaluation run: both `Err`
//! returns and panics are contained here and converted into a failed
//! verdict for this one field.

use std::panic::{catch_unwind, AssertUnwindSafe};

use super::Verdict;
use crate::baseline::FieldExpectation;
use crate::types::FieldValue;

pub fn evaluate(expectation: &FieldExpectation, actual: &FieldValue) -> Verdict {
    let validator = match &expectation.validator {
        Some(validator) => validator,
        // Normally rejected at baseline load.
        None => return Verdict::fail("no validator configured"),
    };

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        validator.call(actual, expectation.expected.as_ref())
    }));

    match outcome {
        Ok(Ok(verdict)) => {
            let message = if verdict.passed {
                verdict.message
            } else {
                verdict
                    .message
                    .or_else(|| Some("custom validator rejected value".to_string()))
            };
            Verdict {
                is_match: verdict.passed,
                confidence: if verdict.passed { 1.0 } else { 0.0 },
                message,
            }
        }
        Ok(Err(error)) => Verdict::fail(format!("validator error: {}", error)),
        Err(panic) => Verdict::fail(format!("validator error: {}", panic_message(&panic))),
    }
}

fn panic_message(panic: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "validator panicked".to_string()
    }
}
