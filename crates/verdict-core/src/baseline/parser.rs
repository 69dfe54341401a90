//! Baseline parsing from YAML/JSON.

use std::fs;
use std::path::Path;

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::schema::validate_baseline_schema;
use super::validators::ValidatorRegistry;
use crate::types::{CustomValidator, FieldValue, MatchStrategy};

/// Errors that can occur when loading a baseline.
///
/// All of these are configuration-class problems: they indicate a bug in
/// the baseline definition and are raised at load time, never silently
/// downgraded to a zero score.
#[derive(Error, Debug)]
pub enum BaselineError {
    #[error("Failed to read baseline file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Baseline schema validation failed: {0}")]
    SchemaError(String),

    #[error("Baseline validation failed: {0}")]
    ValidationError(String),

    #[error("Field '{field}' uses the {strategy} strategy but has no {needs}")]
    IncompleteExpectation {
        field: String,
        strategy: MatchStrategy,
        needs: &'static str,
    },

    #[error("Field '{field}' has an invalid regex pattern: {error}")]
    InvalidRegex { field: String, error: String },

    #[error("Field '{field}' has fuzzy_tolerance {value} outside [0, 1]")]
    InvalidTolerance { field: String, value: f64 },

    #[error("Field '{field}' names unknown validator '{name}' (available: {available:?})")]
    UnknownValidator {
        field: String,
        name: String,
        available: Vec<String>,
    },
}

/// One field's validation rule: the expected value and how to judge it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldExpectation {
    /// Field identifier, unique within a baseline.
    pub field_name: String,

    /// Reference value; absent for pure keyword/regex/custom rules.
    #[serde(default)]
    pub expected: Option<FieldValue>,

    /// How the actual value is judged.
    pub strategy: MatchStrategy,

    /// Whether a missing value is fatal to the field. Set from list
    /// membership (required_fields vs optional_fields) during load.
    #[serde(default)]
    pub required: bool,

    /// Tolerance fraction in [0, 1] for the fuzzy strategy.
    #[serde(default)]
    pub fuzzy_tolerance: Option<f64>,

    /// Keywords for the keyword strategy, in order.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Pattern for the regex strategy.
    #[serde(default)]
    pub regex_pattern: Option<String>,

    /// Name of a registered validator, resolved at load time.
    #[serde(default)]
    pub validator_name: Option<String>,

    /// The resolved validator function for the custom strategy.
    #[serde(skip)]
    pub validator: Option<CustomValidator>,
}

impl FieldExpectation {
    /// An exact-match expectation.
    pub fn exact(field_name: impl Into<String>, expected: impl Into<FieldValue>) -> Self {
        Self {
            field_name: field_name.into(),
            expected: Some(expected.into()),
            strategy: MatchStrategy::Exact,
            required: false,
            fuzzy_tolerance: None,
            keywords: Vec::new(),
            regex_pattern: None,
            validator_name: None,
            validator: None,
        }
    }

    /// A keyword expectation with partial credit per matched keyword.
    pub fn keyword<I, S>(field_name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_name: field_name.into(),
            expected: None,
            strategy: MatchStrategy::Keyword,
            required: false,
            fuzzy_tolerance: None,
            keywords: keywords.into_iter().map(Into::into).collect(),
            regex_pattern: None,
            validator_name: None,
            validator: None,
        }
    }

    /// A fuzzy expectation for approximate numeric ranges or similar text.
    pub fn fuzzy(field_name: impl Into<String>, expected: impl Into<FieldValue>) -> Self {
        Self {
            field_name: field_name.into(),
            expected: Some(expected.into()),
            strategy: MatchStrategy::Fuzzy,
            required: false,
            fuzzy_tolerance: None,
            keywords: Vec::new(),
            regex_pattern: None,
            validator_name: None,
            validator: None,
        }
    }

    /// A regex expectation, searched case-insensitively.
    pub fn regex(field_name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            expected: None,
            strategy: MatchStrategy::Regex,
            required: false,
            fuzzy_tolerance: None,
            keywords: Vec::new(),
            regex_pattern: Some(pattern.into()),
            validator_name: None,
            validator: None,
        }
    }

    /// A custom expectation backed by an injected validator.
    pub fn custom(field_name: impl Into<String>, validator: CustomValidator) -> Self {
        Self {
            field_name: field_name.into(),
            expected: None,
            strategy: MatchStrategy::Custom,
            required: false,
            fuzzy_tolerance: None,
            keywords: Vec::new(),
            regex_pattern: None,
            validator_name: None,
            validator: Some(validator),
        }
    }

    /// Mark the expectation as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the reference value.
    pub fn with_expected(mut self, expected: impl Into<FieldValue>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Set the fuzzy tolerance fraction.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.fuzzy_tolerance = Some(tolerance);
        self
    }

    /// Check that exactly the fields relevant to the strategy are usable.
    ///
    /// Irrelevant fields are ignored, never an error; missing relevant
    /// ones fail fast here rather than at match time.
    fn validate(&self) -> Result<(), BaselineError> {
        if let Some(tolerance) = self.fuzzy_tolerance {
            if !(0.0..=1.0).contains(&tolerance) {
                return Err(BaselineError::InvalidTolerance {
                    field: self.field_name.clone(),
                    value: tolerance,
                });
            }
        }

        match self.strategy {
            MatchStrategy::Exact | MatchStrategy::Fuzzy => {
                if self.expected.is_none() {
                    return Err(BaselineError::IncompleteExpectation {
                        field: self.field_name.clone(),
                        strategy: self.strategy,
                        needs: "expected value",
                    });
                }
            }
            MatchStrategy::Keyword => {
                if self.keywords.is_empty() {
                    return Err(BaselineError::IncompleteExpectation {
                        field: self.field_name.clone(),
                        strategy: self.strategy,
                        needs: "keywords",
                    });
                }
            }
            MatchStrategy::Regex => {
                let pattern = self.regex_pattern.as_deref().ok_or_else(|| {
                    BaselineError::IncompleteExpectation {
                        field: self.field_name.clone(),
                        strategy: self.strategy,
                        needs: "regex_pattern",
                    }
                })?;

                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| BaselineError::InvalidRegex {
                        field: self.field_name.clone(),
                        error: e.to_string(),
                    })?;
            }
            MatchStrategy::Custom => {
                if self.validator.is_none() {
                    return Err(BaselineError::IncompleteExpectation {
                        field: self.field_name.clone(),
                        strategy: self.strategy,
                        needs: "validator",
                    });
                }
            }
        }

        Ok(())
    }
}

/// A named set of expectations for one subject.
///
/// Immutable at evaluation time: the engine only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestBaseline {
    /// Unique name of this baseline.
    pub test_name: String,

    /// Identifier of the subject being validated.
    pub subject: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,

    /// Expectations where `required = true`, in order.
    #[serde(default)]
    pub required_fields: Vec<FieldExpectation>,

    /// Expectations where `required = false`, in order.
    #[serde(default)]
    pub optional_fields: Vec<FieldExpectation>,
}

impl TestBaseline {
    /// Build a baseline programmatically. Expectations sort themselves into
    /// the required/optional lists by their `required` flag.
    pub fn new(
        test_name: impl Into<String>,
        subject: impl Into<String>,
        expectations: Vec<FieldExpectation>,
    ) -> Result<Self, BaselineError> {
        let (required_fields, optional_fields) =
            expectations.into_iter().partition(|e| e.required);

        let baseline = Self {
            test_name: test_name.into(),
            subject: subject.into(),
            description: None,
            required_fields,
            optional_fields,
        };
        baseline.validate()?;
        Ok(baseline)
    }

    /// Parse a baseline from YAML with no custom validators available.
    pub fn from_yaml(yaml: &str) -> Result<Self, BaselineError> {
        Self::from_yaml_with_validators(yaml, &ValidatorRegistry::new())
    }

    /// Parse a baseline from YAML, resolving `validator_name` entries
    /// against the given registry.
    pub fn from_yaml_with_validators(
        yaml: &str,
        registry: &ValidatorRegistry,
    ) -> Result<Self, BaselineError> {
        let value: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(value, registry)
    }

    /// Parse a baseline from JSON with no custom validators available.
    pub fn from_json(json: &str) -> Result<Self, BaselineError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value, &ValidatorRegistry::new())
    }

    /// Parse a baseline from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, BaselineError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a baseline from a YAML file with validators.
    pub fn from_yaml_file_with_validators(
        path: impl AsRef<Path>,
        registry: &ValidatorRegistry,
    ) -> Result<Self, BaselineError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_with_validators(&contents, registry)
    }

    fn from_value(
        value: serde_json::Value,
        registry: &ValidatorRegistry,
    ) -> Result<Self, BaselineError> {
        validate_baseline_schema(&value)
            .map_err(|errors| BaselineError::SchemaError(errors.join("; ")))?;

        let mut baseline: TestBaseline = serde_json::from_value(value)?;
        baseline.resolve_validators(registry)?;
        baseline.normalize();
        baseline.validate()?;

        tracing::debug!(
            test_name = %baseline.test_name,
            required = baseline.required_fields.len(),
            optional = baseline.optional_fields.len(),
            "loaded baseline"
        );
        Ok(baseline)
    }

    /// Resolve named validators into functions.
    fn resolve_validators(&mut self, registry: &ValidatorRegistry) -> Result<(), BaselineError> {
        for expectation in self
            .required_fields
            .iter_mut()
            .chain(self.optional_fields.iter_mut())
        {
            if let Some(name) = &expectation.validator_name {
                let validator = registry.get(name).ok_or_else(|| {
                    BaselineError::UnknownValidator {
                        field: expectation.field_name.clone(),
                        name: name.clone(),
                        available: registry
                            .available_names()
                            .iter()
                            .map(|s| s.to_string())
                            .collect(),
                    }
                })?;
                expectation.validator = Some(validator.clone());
            }
        }
        Ok(())
    }

    /// The `required` flag follows list membership, whatever the document said.
    fn normalize(&mut self) {
        for expectation in self.required_fields.iter_mut() {
            expectation.required = true;
        }
        for expectation in self.optional_fields.iter_mut() {
            expectation.required = false;
        }
    }

    /// Validate the baseline structure.
    fn validate(&self) -> Result<(), BaselineError> {
        if self.test_name.is_empty() {
            return Err(BaselineError::ValidationError(
                "test_name must not be empty".to_string(),
            ));
        }
        if self.subject.is_empty() {
            return Err(BaselineError::ValidationError(
                "subject must not be empty".to_string(),
            ));
        }

        self.validate_unique_field_names()?;

        for expectation in self.expectations() {
            expectation.validate()?;
        }

        Ok(())
    }

    /// Ensure field names are unique across required and optional fields.
    fn validate_unique_field_names(&self) -> Result<(), BaselineError> {
        let mut seen = std::collections::HashSet::new();

        for expectation in self.expectations() {
            if !seen.insert(&expectation.field_name) {
                return Err(BaselineError::ValidationError(format!(
                    "Duplicate field name: {}",
                    expectation.field_name
                )));
            }
        }

        Ok(())
    }

    /// All expectations, required first, in authored order.
    pub fn expectations(&self) -> impl Iterator<Item = &FieldExpectation> {
        self.required_fields.iter().chain(self.optional_fields.iter())
    }

    /// Total number of expectations.
    pub fn field_count(&self) -> usize {
        self.required_fields.len() + self.optional_fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValidatorVerdict;

    const VALID_BASELINE: &str = r#"
test_name: "acme_profile"
subject: "Acme Corp"
description: "Company fact extraction baseline"
required_fields:
  - field_name: founded
    strategy: exact
    expected: 2013
  - field_name: company_size
    strategy: fuzzy
    expected: "51-200 employees"
    fuzzy_tolerance: 0.3
optional_fields:
  - field_name: industry
    strategy: keyword
    keywords: ["video", "streaming"]
"#;

    #[test]
    fn test_parse_valid_baseline() {
        let baseline = TestBaseline::from_yaml(VALID_BASELINE).unwrap();
        assert_eq!(baseline.test_name, "acme_profile");
        assert_eq!(baseline.subject, "Acme Corp");
        assert_eq!(baseline.required_fields.len(), 2);
        assert_eq!(baseline.optional_fields.len(), 1);
        assert_eq!(baseline.field_count(), 3);
    }

    #[test]
    fn test_required_flag_follows_list_membership() {
        let baseline = TestBaseline::from_yaml(VALID_BASELINE).unwrap();
        assert!(baseline.required_fields.iter().all(|e| e.required));
        assert!(baseline.optional_fields.iter().all(|e| !e.required));
    }

    #[test]
    fn test_duplicate_field_names_rejected() {
        let yaml = r#"
test_name: "t"
subject: "s"
required_fields:
  - field_name: founded
    strategy: exact
    expected: 2013
optional_fields:
  - field_name: founded
    strategy: exact
    expected: 2014
"#;
        let result = TestBaseline::from_yaml(yaml);
        assert!(matches!(result, Err(BaselineError::ValidationError(_))));
    }

    #[test]
    fn test_keyword_without_keywords_rejected() {
        let yaml = r#"
test_name: "t"
subject: "s"
required_fields:
  - field_name: industry
    strategy: keyword
"#;
        let result = TestBaseline::from_yaml(yaml);
        assert!(matches!(
            result,
            Err(BaselineError::IncompleteExpectation { needs: "keywords", .. })
        ));
    }

    #[test]
    fn test_regex_without_pattern_rejected() {
        let yaml = r#"
test_name: "t"
subject: "s"
required_fields:
  - field_name: website
    strategy: regex
"#;
        let result = TestBaseline::from_yaml(yaml);
        assert!(matches!(
            result,
            Err(BaselineError::IncompleteExpectation { needs: "regex_pattern", .. })
        ));
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let yaml = r#"
test_name: "t"
subject: "s"
required_fields:
  - field_name: website
    strategy: regex
    regex_pattern: "(unclosed"
"#;
        let result = TestBaseline::from_yaml(yaml);
        assert!(matches!(result, Err(BaselineError::InvalidRegex { .. })));
    }

    #[test]
    fn test_unknown_strategy_rejected_at_load() {
        let yaml = r#"
test_name: "t"
subject: "s"
required_fields:
  - field_name: founded
    strategy: semantic
"#;
        let result = TestBaseline::from_yaml(yaml);
        assert!(matches!(result, Err(BaselineError::SchemaError(_))));
    }

    #[test]
    fn test_tolerance_out_of_range_rejected() {
        // Schema catches this first for parsed documents; the programmatic
        // path exercises the expectation-level check.
        let expectation =
            FieldExpectation::fuzzy("size", "51-200").with_tolerance(1.5).required();
        let result = TestBaseline::new("t", "s", vec![expectation]);
        assert!(matches!(result, Err(BaselineError::InvalidTolerance { .. })));
    }

    #[test]
    fn test_custom_without_validator_rejected() {
        let yaml = r#"
test_name: "t"
subject: "s"
required_fields:
  - field_name: website
    strategy: custom
"#;
        let result = TestBaseline::from_yaml(yaml);
        assert!(matches!(
            result,
            Err(BaselineError::IncompleteExpectation { needs: "validator", .. })
        ));
    }

    #[test]
    fn test_validator_name_resolved_from_registry() {
        let mut registry = ValidatorRegistry::new();
        registry.register(
            "https_url",
            CustomValidator::new(|actual, _| {
                Ok(actual.as_text().starts_with("https://").into())
            }),
        );

        let yaml = r#"
test_name: "t"
subject: "s"
required_fields:
  - field_name: website
    strategy: custom
    validator_name: https_url
"#;
        let baseline = TestBaseline::from_yaml_with_validators(yaml, &registry).unwrap();
        assert!(baseline.required_fields[0].validator.is_some());
    }

    #[test]
    fn test_from_yaml_file_with_validators() {
        let mut registry = ValidatorRegistry::new();
        registry.register(
            "https_url",
            CustomValidator::new(|actual, _| {
                Ok(actual.as_text().starts_with("https://").into())
            }),
        );

        let dir = std::env::temp_dir().join("verdict-parser-file-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("site.yaml");
        fs::write(
            &path,
            r#"
test_name: "t"
subject: "s"
required_fields:
  - field_name: website
    strategy: custom
    validator_name: https_url
"#,
        )
        .unwrap();

        let baseline = TestBaseline::from_yaml_file_with_validators(&path, &registry).unwrap();
        assert!(baseline.required_fields[0].validator.is_some());
    }

    #[test]
    fn test_unknown_validator_name_rejected() {
        let yaml = r#"
test_name: "t"
subject: "s"
required_fields:
  - field_name: website
    strategy: custom
    validator_name: nonexistent
"#;
        let result = TestBaseline::from_yaml(yaml);
        assert!(matches!(result, Err(BaselineError::UnknownValidator { .. })));
    }

    #[test]
    fn test_programmatic_construction_partitions_fields() {
        let baseline = TestBaseline::new(
            "t",
            "s",
            vec![
                FieldExpectation::exact("founded", 2013).required(),
                FieldExpectation::keyword("industry", ["video"]),
                FieldExpectation::custom(
                    "website",
                    CustomValidator::new(|_, _| Ok(ValidatorVerdict::pass())),
                ),
            ],
        )
        .unwrap();

        assert_eq!(baseline.required_fields.len(), 1);
        assert_eq!(baseline.optional_fields.len(), 2);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "test_name": "t",
            "subject": "s",
            "required_fields": [
                { "field_name": "founded", "strategy": "exact", "expected": 2013 }
            ]
        }"#;
        let baseline = TestBaseline::from_json(json).unwrap();
        assert_eq!(baseline.required_fields[0].expected, Some(FieldValue::Integer(2013)));
    }
}
