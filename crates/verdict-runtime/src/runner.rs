//! Multi-producer test runner.
//!
//! Executes one baseline against N independently configured producers and
//! produces a ranked comparison. The runner implements:
//! - Order-preserving bounded fan-out over producers
//! - Per-producer timeout converted into a failed result
//! - Deterministic fan-in: matching and aggregation from verdict-core
//! - Best-producer ranking with first-occurrence tie-breaking
//!
//! A producer failure is terminal for that run; retries, if desired,
//! belong inside the producer.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use thiserror::Error;

use verdict_core::{evaluate_record, TestBaseline};

use crate::baselines::{BaselineSource, BaselineSourceError};
use crate::config::RunnerConfig;
use crate::producers::Producer;
use crate::results::{ModelTestResult, TestExecutionResult};

/// Errors from the test runner.
///
/// Only configuration-class problems surface here: the caller's baseline
/// is unknown or broken. Producer and field-level failures are represented
/// as data in the returned `TestExecutionResult`, never as errors.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("baseline source not configured")]
    NotConfigured,

    #[error(transparent)]
    Baseline(#[from] BaselineSourceError),
}

/// The test runner compares producers against a baseline.
pub struct TestRunner {
    /// Where baselines come from (injected, not a global).
    baselines: Arc<dyn BaselineSource>,

    /// Timeout and concurrency settings.
    config: RunnerConfig,
}

impl TestRunner {
    /// Create a runner over a baseline source with the given config.
    pub fn new(baselines: Arc<dyn BaselineSource>, config: RunnerConfig) -> Self {
        Self { baselines, config }
    }

    /// Execute one baseline against the configured producers.
    ///
    /// # Execution Flow
    /// 1. Resolve the baseline by name (the only fallible step)
    /// 2. Fan-out: invoke producers through a bounded, order-preserving
    ///    stream, each under its own timeout
    /// 3. Per producer: run every expectation through the matcher and
    ///    aggregate scores; failures synthesize a zero-score result
    /// 4. Fan-in: compute best producer and average score
    pub async fn run(
        &self,
        test_name: &str,
        producers: &[Arc<dyn Producer>],
    ) -> Result<TestExecutionResult, RunnerError> {
        let started = Instant::now();
        let baseline = self.baselines.get_baseline(test_name).await?;

        tracing::info!(
            test_name,
            subject = %baseline.subject,
            producers = producers.len(),
            "starting baseline run"
        );

        let model_results: Vec<ModelTestResult> = stream::iter(producers.iter().cloned())
            .map(|producer| self.run_producer(&baseline, producer))
            .buffered(self.config.max_concurrency.max(1))
            .collect()
            .await;

        let best_producer = best_producer(&model_results);
        let average_score = if model_results.is_empty() {
            0.0
        } else {
            model_results.iter().map(|r| r.overall_score).sum::<f64>()
                / model_results.len() as f64
        };

        tracing::info!(
            test_name,
            best = best_producer.as_deref().unwrap_or("-"),
            average_score,
            "baseline run complete"
        );

        Ok(TestExecutionResult {
            test_name: test_name.to_string(),
            baseline,
            model_results,
            execution_time: started.elapsed(),
            best_producer,
            average_score,
            evaluated_at: Utc::now(),
        })
    }

    /// Invoke a single producer and score its record.
    ///
    /// Every failure path ends in a synthesized failed result for this
    /// producer only; nothing here can abort the surrounding run.
    async fn run_producer(
        &self,
        baseline: &TestBaseline,
        producer: Arc<dyn Producer>,
    ) -> ModelTestResult {
        let name = producer.name().to_string();
        let kind = producer.kind().to_string();
        let started = Instant::now();

        tracing::debug!(producer = %name, subject = %baseline.subject, "invoking producer");

        let outcome = tokio::time::timeout(
            self.config.producer_timeout,
            producer.produce(&baseline.subject),
        )
        .await;

        match outcome {
            Err(_) => {
                tracing::warn!(
                    producer = %name,
                    timeout = ?self.config.producer_timeout,
                    "producer timed out"
                );
                ModelTestResult::failed(
                    name,
                    kind,
                    started.elapsed(),
                    format!(
                        "producer timed out after {}",
                        humantime::format_duration(self.config.producer_timeout)
                    ),
                )
            }
            Ok(Err(e)) => {
                tracing::warn!(producer = %name, error = %e, "producer failed");
                ModelTestResult::failed(name, kind, started.elapsed(), e.to_string())
            }
            Ok(Ok(record)) if record.is_empty() => {
                tracing::warn!(producer = %name, "producer returned an empty record");
                ModelTestResult::failed(
                    name,
                    kind,
                    started.elapsed(),
                    "producer returned an empty record",
                )
            }
            Ok(Ok(record)) => {
                let (field_results, scores) = evaluate_record(baseline, &record);
                tracing::debug!(
                    producer = %name,
                    overall = scores.overall_score,
                    "producer scored"
                );
                ModelTestResult::scored(
                    name,
                    kind,
                    started.elapsed(),
                    field_results,
                    scores,
                    record,
                )
            }
        }
    }
}

/// Arg-max over overall score; ties go to the earliest producer in the
/// configured order.
fn best_producer(results: &[ModelTestResult]) -> Option<String> {
    let mut best: Option<&ModelTestResult> = None;
    for result in results {
        if best.map_or(true, |b| result.overall_score > b.overall_score) {
            best = Some(result);
        }
    }
    best.map(|r| r.producer_name.clone())
}

/// Builder for [`TestRunner`].
pub struct TestRunnerBuilder {
    baselines: Option<Arc<dyn BaselineSource>>,
    config: RunnerConfig,
}

impl TestRunnerBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            baselines: None,
            config: RunnerConfig::default(),
        }
    }

    /// Set the baseline source.
    pub fn baselines(mut self, baselines: Arc<dyn BaselineSource>) -> Self {
        self.baselines = Some(baselines);
        self
    }

    /// Set the configuration.
    pub fn config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the runner.
    pub fn build(self) -> Result<TestRunner, RunnerError> {
        let baselines = self.baselines.ok_or(RunnerError::NotConfigured)?;
        Ok(TestRunner::new(baselines, self.config))
    }
}

impl Default for TestRunnerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
