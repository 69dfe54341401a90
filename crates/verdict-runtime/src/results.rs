//! Result types assembled by the test runner.
//!
//! The runner exclusively constructs and returns these; nothing mutates
//! them afterwards.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use verdict_core::{FieldMatchResult, ScoreSummary, TestBaseline};

use crate::producers::CandidateRecord;

/// Aggregate outcome for one producer against one baseline.
#[derive(Debug, Clone, Serialize)]
pub struct ModelTestResult {
    /// Producer name, as configured.
    pub producer_name: String,

    /// Producer kind label (e.g. "llm", "fixture").
    pub producer_kind: String,

    /// Whether the producer returned a usable record with no fatal error.
    /// Independent of score: a producer can succeed technically and still
    /// score zero.
    pub success: bool,

    /// Wall-clock time for this producer's invocation and matching.
    #[serde(with = "duration_secs")]
    pub execution_time: Duration,

    /// Per-field verdicts, keyed by field name.
    pub field_results: BTreeMap<String, FieldMatchResult>,

    /// Mean confidence over required fields; 1.0 when none exist.
    pub required_fields_score: f64,

    /// Mean confidence over optional fields, absent ones counting at zero.
    pub optional_fields_score: f64,

    /// Weighted combination, always in [0, 1].
    pub overall_score: f64,

    /// The record the producer returned, as-is.
    pub raw_output: CandidateRecord,

    /// Failure diagnostic, set iff `success` is false.
    pub error_message: Option<String>,
}

impl ModelTestResult {
    /// Build a result for a producer that returned a usable record.
    pub fn scored(
        producer_name: impl Into<String>,
        producer_kind: impl Into<String>,
        execution_time: Duration,
        field_results: BTreeMap<String, FieldMatchResult>,
        scores: ScoreSummary,
        raw_output: CandidateRecord,
    ) -> Self {
        Self {
            producer_name: producer_name.into(),
            producer_kind: producer_kind.into(),
            success: true,
            execution_time,
            field_results,
            required_fields_score: scores.required_fields_score,
            optional_fields_score: scores.optional_fields_score,
            overall_score: scores.overall_score,
            raw_output,
            error_message: None,
        }
    }

    /// Build a result for a producer that failed, timed out, or returned
    /// an unusable record. All scores are zero and field results empty.
    pub fn failed(
        producer_name: impl Into<String>,
        producer_kind: impl Into<String>,
        execution_time: Duration,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            producer_name: producer_name.into(),
            producer_kind: producer_kind.into(),
            success: false,
            execution_time,
            field_results: BTreeMap::new(),
            required_fields_score: 0.0,
            optional_fields_score: 0.0,
            overall_score: 0.0,
            raw_output: CandidateRecord::new(),
            error_message: Some(error_message.into()),
        }
    }
}

/// Cross-producer summary for one baseline run.
#[derive(Debug, Clone, Serialize)]
pub struct TestExecutionResult {
    /// Name of the baseline that was run.
    pub test_name: String,

    /// The baseline itself, for consumers that render expectations.
    pub baseline: TestBaseline,

    /// Per-producer results, in configured producer order.
    pub model_results: Vec<ModelTestResult>,

    /// Wall-clock time for the whole run.
    #[serde(with = "duration_secs")]
    pub execution_time: Duration,

    /// Name of the producer with the highest overall score; ties go to
    /// the earliest in the configured order. None when no producers ran.
    pub best_producer: Option<String>,

    /// Arithmetic mean of overall scores across all results, failed
    /// producers included at zero. 0.0 when no producers ran.
    pub average_score: f64,

    /// When the run completed.
    pub evaluated_at: DateTime<Utc>,
}

/// Serialize a `Duration` as fractional seconds.
mod duration_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_result_shape() {
        let result = ModelTestResult::failed(
            "gpt-x",
            "llm",
            Duration::from_millis(120),
            "producer timed out",
        );
        assert!(!result.success);
        assert_eq!(result.overall_score, 0.0);
        assert!(result.field_results.is_empty());
        assert!(result.raw_output.is_empty());
        assert_eq!(result.error_message.as_deref(), Some("producer timed out"));
    }

    #[test]
    fn test_scored_result_has_no_error() {
        let result = ModelTestResult::scored(
            "gpt-x",
            "fixture",
            Duration::from_millis(5),
            BTreeMap::new(),
            ScoreSummary {
                required_fields_score: 1.0,
                optional_fields_score: 0.5,
                overall_score: 0.85,
            },
            CandidateRecord::new(),
        );
        assert!(result.success);
        assert_eq!(result.overall_score, 0.85);
        assert!(result.error_message.is_none());
    }

    #[test]
    fn test_duration_serializes_as_seconds() {
        let result = ModelTestResult::failed("p", "fixture", Duration::from_millis(1500), "e");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["execution_time"], serde_json::json!(1.5));
    }
}
