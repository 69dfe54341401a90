//! Core value and verdict types shared across the engine.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A single field value, as produced by a producer or expected by a baseline.
///
/// Records are flat: a producer returns a mapping of field name to
/// `FieldValue`. Variant order matters for untagged deserialization:
/// integers must be tried before free-form text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    /// Whole number (e.g. a founding year).
    Integer(i64),
    /// Floating point number.
    Number(f64),
    /// Free-form text.
    Text(String),
    /// Ordered list of strings (e.g. product names).
    Items(Vec<String>),
}

impl FieldValue {
    /// Render the value as a plain string for lexical matching.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Items(items) => items.join(", "),
        }
    }

    /// Interpret the value as a number, if it has a natural numeric form.
    ///
    /// Text is trimmed and parsed, so `"2013"` and `2013` coerce to the
    /// same number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(n) => Some(*n as f64),
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
            FieldValue::Items(_) => None,
        }
    }

    /// Whether the value carries no usable content (empty or
    /// whitespace-only text, or an empty list).
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Items(items) => items.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

/// How a field's actual value is judged against its expectation.
///
/// This is a closed set: anything else is rejected at baseline load time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Equality after numeric coercion.
    Exact,
    /// Case-insensitive substring hits with partial credit.
    Keyword,
    /// Numeric range overlap, falling back to bigram similarity.
    Fuzzy,
    /// Case-insensitive regex search.
    Regex,
    /// Injected validator function.
    Custom,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchStrategy::Exact => "exact",
            MatchStrategy::Keyword => "keyword",
            MatchStrategy::Fuzzy => "fuzzy",
            MatchStrategy::Regex => "regex",
            MatchStrategy::Custom => "custom",
        };
        // pad() honors width/alignment flags, so the name can be used
        // in fixed-width table columns.
        f.pad(name)
    }
}

/// Verdict returned by a custom validator.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorVerdict {
    /// Whether the value was accepted.
    pub passed: bool,

    /// Optional diagnostic message.
    pub message: Option<String>,
}

impl ValidatorVerdict {
    /// Accept the value.
    pub fn pass() -> Self {
        Self {
            passed: true,
            message: None,
        }
    }

    /// Reject the value with a diagnostic message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: Some(message.into()),
        }
    }
}

impl From<bool> for ValidatorVerdict {
    fn from(passed: bool) -> Self {
        Self {
            passed,
            message: None,
        }
    }
}

/// Signature of an injected custom validator.
///
/// Receives the actual value and the expectation's reference value (if
/// any). A validator signals rejection through its verdict and internal
/// failure through `Err`; both are contained at the call site and never
/// abort the surrounding evaluation.
pub type ValidatorFn =
    dyn Fn(&FieldValue, Option<&FieldValue>) -> Result<ValidatorVerdict, String> + Send + Sync;

/// A first-class custom validator stored on a `FieldExpectation`.
#[derive(Clone)]
pub struct CustomValidator(Arc<ValidatorFn>);

impl CustomValidator {
    /// Wrap a closure as a custom validator.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&FieldValue, Option<&FieldValue>) -> Result<ValidatorVerdict, String>
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the validator.
    pub fn call(
        &self,
        actual: &FieldValue,
        expected: Option<&FieldValue>,
    ) -> Result<ValidatorVerdict, String> {
        (self.0)(actual, expected)
    }
}

impl fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomValidator")
    }
}

/// The verdict for one field on one candidate record.
///
/// Created once per (field, record) pair and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldMatchResult {
    /// Name of the field this verdict is about.
    pub field_name: String,

    /// Whether the actual value satisfied the expectation.
    pub is_match: bool,

    /// Match quality in [0.0, 1.0]; not just a boolean pass/fail.
    pub confidence: f64,

    /// The baseline's reference value, if the strategy uses one.
    pub expected: Option<FieldValue>,

    /// The value the producer actually returned.
    pub actual: Option<FieldValue>,

    /// Diagnostic, present iff the field failed or confidence was reduced.
    pub error_message: Option<String>,

    /// The strategy that produced this verdict.
    pub strategy: MatchStrategy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_untagged_parsing() {
        let v: FieldValue = serde_json::from_str("2013").unwrap();
        assert_eq!(v, FieldValue::Integer(2013));

        let v: FieldValue = serde_json::from_str("\"hello\"").unwrap();
        assert_eq!(v, FieldValue::Text("hello".to_string()));

        let v: FieldValue = serde_json::from_str("[\"a\", \"b\"]").unwrap();
        assert_eq!(v, FieldValue::Items(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(FieldValue::Integer(2013).as_number(), Some(2013.0));
        assert_eq!(FieldValue::Text(" 2013 ".to_string()).as_number(), Some(2013.0));
        assert_eq!(FieldValue::Text("abc".to_string()).as_number(), None);
    }

    #[test]
    fn test_blank_detection() {
        assert!(FieldValue::Text("   ".to_string()).is_blank());
        assert!(FieldValue::Items(vec![]).is_blank());
        assert!(!FieldValue::Integer(0).is_blank());
        assert!(!FieldValue::Text("x".to_string()).is_blank());
    }

    #[test]
    fn test_strategy_serde_names() {
        let s: MatchStrategy = serde_json::from_str("\"fuzzy\"").unwrap();
        assert_eq!(s, MatchStrategy::Fuzzy);
        assert_eq!(serde_json::to_string(&MatchStrategy::Exact).unwrap(), "\"exact\"");
    }

    #[test]
    fn test_strategy_display_honors_width() {
        assert_eq!(format!("{:<8}", MatchStrategy::Exact), "exact   ");
        assert_eq!(format!("{}", MatchStrategy::Keyword), "keyword");
    }

    #[test]
    fn test_validator_verdict_from_bool() {
        let verdict: ValidatorVerdict = true.into();
        assert!(verdict.passed);
        assert!(verdict.message.is_none());
    }
}
