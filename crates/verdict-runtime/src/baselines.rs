//! Baseline sources: where the runner gets baselines from.
//!
//! The registry is an injected dependency, not a process-wide singleton,
//! so tests can hand the runner a fixed in-memory source.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use verdict_core::{BaselineError, TestBaseline, ValidatorRegistry};

/// Errors from baseline sources.
#[derive(Error, Debug)]
pub enum BaselineSourceError {
    #[error("baseline not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Invalid(#[from] BaselineError),
}

/// A registry returning baselines by name.
#[async_trait]
pub trait BaselineSource: Send + Sync {
    /// Look up a baseline by its test name.
    ///
    /// Implementations must return structurally valid baselines (unique
    /// field names, coherent expectations); the engine assumes the
    /// invariant rather than re-validating on every run.
    async fn get_baseline(&self, name: &str) -> Result<TestBaseline, BaselineSourceError>;
}

/// In-memory baseline source, keyed by test name.
#[derive(Default)]
pub struct StaticBaselineSource {
    baselines: HashMap<String, TestBaseline>,
}

impl StaticBaselineSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a baseline, keyed by its `test_name`.
    pub fn insert(&mut self, baseline: TestBaseline) {
        self.baselines.insert(baseline.test_name.clone(), baseline);
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, baseline: TestBaseline) -> Self {
        self.insert(baseline);
        self
    }
}

#[async_trait]
impl BaselineSource for StaticBaselineSource {
    async fn get_baseline(&self, name: &str) -> Result<TestBaseline, BaselineSourceError> {
        self.baselines
            .get(name)
            .cloned()
            .ok_or_else(|| BaselineSourceError::NotFound(name.to_string()))
    }
}

/// Baseline source reading `<name>.yaml` files from a directory.
pub struct DirBaselineSource {
    dir: PathBuf,
    validators: ValidatorRegistry,
}

impl DirBaselineSource {
    /// Create a source over a directory of baseline YAML files.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            validators: ValidatorRegistry::new(),
        }
    }

    /// Attach a validator registry used to resolve `validator_name`
    /// entries during load.
    pub fn with_validators(mut self, validators: ValidatorRegistry) -> Self {
        self.validators = validators;
        self
    }
}

#[async_trait]
impl BaselineSource for DirBaselineSource {
    async fn get_baseline(&self, name: &str) -> Result<TestBaseline, BaselineSourceError> {
        // Names map to file stems; path separators are not names.
        if name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(BaselineSourceError::NotFound(name.to_string()));
        }

        let path = self.dir.join(format!("{}.yaml", name));
        let yaml = match tokio::fs::read_to_string(&path).await {
            Ok(yaml) => yaml,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(BaselineSourceError::NotFound(name.to_string()));
            }
            Err(err) => return Err(BaselineError::from(err).into()),
        };

        let baseline = TestBaseline::from_yaml_with_validators(&yaml, &self.validators)?;
        Ok(baseline)
    }
}
