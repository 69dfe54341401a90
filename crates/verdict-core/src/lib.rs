//! # verdict-core
//!
//! Deterministic baseline-driven output validation engine.
//!
//! Given a flat candidate record produced by some generative process and a
//! declarative baseline of expected field values, this crate answers, per
//! field: does the produced value match, with what confidence, and why not
//! when it fails. Field verdicts then aggregate into required/optional/
//! overall scores for the run.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same baseline and record always produce the same
//!    verdicts and scores
//! 2. **Pure**: All matching is in-memory; no I/O during evaluation
//! 3. **Explainable**: Every failed field carries a diagnostic message
//! 4. **Parallel-safe**: Field evaluations are independent and share no
//!    mutable state
//!
//! ## Example
//!
//! ```rust,ignore
//! use verdict_core::{evaluate_record, FieldValue, TestBaseline};
//! use std::collections::BTreeMap;
//!
//! let baseline = TestBaseline::from_yaml_file("acme_profile.yaml")?;
//! let mut record = BTreeMap::new();
//! record.insert("founded".to_string(), FieldValue::Integer(2013));
//!
//! let (field_results, scores) = evaluate_record(&baseline, &record);
//! println!("overall: {:.0}%", scores.overall_score * 100.0);
//! ```

pub mod aggregator;
pub mod baseline;
pub mod matchers;
pub mod types;

// Re-export main types at crate root
pub use aggregator::{score, ScoreSummary, OPTIONAL_WEIGHT, REQUIRED_WEIGHT};
pub use baseline::{
    BaselineError, FieldExpectation, TestBaseline, ValidatorRegistry,
};
pub use matchers::match_field;
pub use types::{
    CustomValidator, FieldMatchResult, FieldValue, MatchStrategy, ValidatorVerdict,
};

use std::collections::BTreeMap;

/// Evaluate a candidate record against a baseline.
///
/// This is the main entry point for the engine: every expectation in
/// `required_fields` then `optional_fields` runs through the matcher, and
/// the verdicts aggregate into the three run scores. The baseline is
/// assumed structurally valid (it came through the loader); the record is
/// whatever the producer returned.
///
/// # Returns
///
/// The per-field verdicts keyed by field name, and the score summary.
pub fn evaluate_record(
    baseline: &TestBaseline,
    record: &BTreeMap<String, FieldValue>,
) -> (BTreeMap<String, FieldMatchResult>, ScoreSummary) {
    let mut field_results = BTreeMap::new();

    for expectation in baseline.expectations() {
        let actual = record.get(&expectation.field_name);
        let result = match_field(expectation, actual);
        field_results.insert(expectation.field_name.clone(), result);
    }

    let summary = score(baseline, &field_results);
    (field_results, summary)
}
