//! Runner configuration.

use std::time::Duration;

use thiserror::Error;

/// Errors from configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid duration '{value}': {error}")]
    InvalidDuration { value: String, error: String },

    #[error("max_concurrency must be at least 1")]
    ZeroConcurrency,
}

/// Configuration for the test runner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// How long a producer may take before its result is recorded as a
    /// timeout failure. The timeout is per producer: it ends that
    /// producer's evaluation, never the whole run.
    pub producer_timeout: Duration,

    /// Upper bound on concurrently running producer invocations.
    pub max_concurrency: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            producer_timeout: Duration::from_secs(30),
            max_concurrency: 4,
        }
    }
}

impl RunnerConfig {
    /// Set the per-producer timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.producer_timeout = timeout;
        self
    }

    /// Set the per-producer timeout from a human-readable string
    /// (e.g. "30s", "2m").
    pub fn with_timeout_str(mut self, value: &str) -> Result<Self, ConfigError> {
        self.producer_timeout =
            humantime::parse_duration(value).map_err(|e| ConfigError::InvalidDuration {
                value: value.to_string(),
                error: e.to_string(),
            })?;
        Ok(self)
    }

    /// Set the producer concurrency bound.
    pub fn with_concurrency(mut self, max_concurrency: usize) -> Result<Self, ConfigError> {
        if max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        self.max_concurrency = max_concurrency;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunnerConfig::default();
        assert_eq!(config.producer_timeout, Duration::from_secs(30));
        assert_eq!(config.max_concurrency, 4);
    }

    #[test]
    fn test_timeout_from_string() {
        let config = RunnerConfig::default().with_timeout_str("2m 30s").unwrap();
        assert_eq!(config.producer_timeout, Duration::from_secs(150));
    }

    #[test]
    fn test_invalid_timeout_string() {
        let result = RunnerConfig::default().with_timeout_str("soon");
        assert!(matches!(result, Err(ConfigError::InvalidDuration { .. })));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result = RunnerConfig::default().with_concurrency(0);
        assert!(matches!(result, Err(ConfigError::ZeroConcurrency)));
    }
}
