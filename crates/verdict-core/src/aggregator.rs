//! Aggregator: turns per-field verdicts into per-run scores.
//!
//! The weighting is strict, non-configurable policy:
//! `overall = 0.7 * required + 0.3 * optional`. Required correctness
//! dominates; optional fields reward completeness. These constants are
//! scoring machinery, not a tuning toy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::baseline::TestBaseline;
use crate::types::FieldMatchResult;

/// Weight of the required-fields score in the overall score.
pub const REQUIRED_WEIGHT: f64 = 0.7;

/// Weight of the optional-fields score in the overall score.
pub const OPTIONAL_WEIGHT: f64 = 0.3;

/// The three scores computed for one producer against one baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Mean confidence over required fields; 1.0 when none exist.
    pub required_fields_score: f64,

    /// Mean confidence over all optional fields. Absent fields count in
    /// the denominator at zero confidence, so the score rewards
    /// completeness, not merely correctness of whatever was supplied.
    pub optional_fields_score: f64,

    /// Weighted combination, always in [0, 1].
    pub overall_score: f64,
}

impl ScoreSummary {
    /// A zero score, used for failed producers.
    pub fn zero() -> Self {
        Self {
            required_fields_score: 0.0,
            optional_fields_score: 0.0,
            overall_score: 0.0,
        }
    }
}

/// Compute the score summary for one candidate record's field results.
pub fn score(
    baseline: &TestBaseline,
    field_results: &BTreeMap<String, FieldMatchResult>,
) -> ScoreSummary {
    let required_fields_score = if baseline.required_fields.is_empty() {
        // Vacuously satisfied.
        1.0
    } else {
        mean_confidence(baseline.required_fields.iter().map(|e| e.field_name.as_str()), field_results)
    };

    let optional_fields_score = if baseline.optional_fields.is_empty() {
        0.0
    } else {
        mean_confidence(baseline.optional_fields.iter().map(|e| e.field_name.as_str()), field_results)
    };

    let overall_score = (required_fields_score * REQUIRED_WEIGHT
        + optional_fields_score * OPTIONAL_WEIGHT)
        .clamp(0.0, 1.0);

    ScoreSummary {
        required_fields_score,
        optional_fields_score,
        overall_score,
    }
}

fn mean_confidence<'a>(
    field_names: impl Iterator<Item = &'a str>,
    field_results: &BTreeMap<String, FieldMatchResult>,
) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for name in field_names {
        total += field_results.get(name).map_or(0.0, |r| r.confidence);
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
