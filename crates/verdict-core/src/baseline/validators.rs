//! Registry of named custom validators.
//!
//! Baselines are authored as data (YAML/JSON) but the custom strategy needs
//! an injected function. The registry bridges the two: validators are
//! registered under a name at startup, and a baseline's `validator_name`
//! is resolved against the registry while the baseline loads.
//!
//! ## Usage
//!
//! ```ignore
//! let mut registry = ValidatorRegistry::new();
//! registry.register("https_url", CustomValidator::new(|actual, _| {
//!     Ok(actual.as_text().starts_with("https://").into())
//! }));
//!
//! let baseline = TestBaseline::from_yaml_with_validators(yaml, &registry)?;
//! ```

use std::collections::BTreeMap;

use crate::types::CustomValidator;

/// Registry mapping validator names to custom validator functions.
///
/// BTreeMap keeps `available_names` deterministic for error messages.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: BTreeMap<String, CustomValidator>,
}

impl ValidatorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a validator under a name.
    ///
    /// If a validator with the same name already exists, it is replaced.
    pub fn register(&mut self, name: impl Into<String>, validator: CustomValidator) {
        self.validators.insert(name.into(), validator);
    }

    /// Look up a validator by name.
    pub fn get(&self, name: &str) -> Option<&CustomValidator> {
        self.validators.get(name)
    }

    /// Check if a validator name is registered.
    pub fn has_validator(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// List registered validator names.
    pub fn available_names(&self) -> Vec<&str> {
        self.validators.keys().map(|s| s.as_str()).collect()
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.available_names())
            .finish()
    }
}
