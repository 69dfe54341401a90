//! Producer abstractions for verdict-runtime.
//!
//! A producer is whatever generates a candidate record for a subject: an
//! LLM extraction pipeline, a scraper, a static fixture. The runner is
//! agnostic to what happens inside; it only sees the returned record or
//! the failure.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use verdict_core::FieldValue;

mod fixture;

pub use fixture::{FileProducer, FixtureProducer};

/// A flat candidate record: field name to value.
pub type CandidateRecord = BTreeMap<String, FieldValue>;

/// Errors from producers.
///
/// These are recovered locally by the runner: a failing producer becomes a
/// failed `ModelTestResult`, never an aborted run.
#[derive(Error, Debug)]
pub enum ProducerError {
    #[error("producer invocation failed: {0}")]
    Invocation(String),

    #[error("failed to read record: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse record: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An external component that generates a candidate record to be
/// validated against a baseline.
///
/// # Isolation Contract
/// Producers are invoked independently: no shared mutable state, no
/// access to other producers' records, and a failure or timeout in one
/// never affects the others.
#[async_trait]
pub trait Producer: Send + Sync {
    /// Stable name, used in results and for best-producer ranking.
    fn name(&self) -> &str;

    /// Kind label for reporting (e.g. "llm", "fixture").
    fn kind(&self) -> &str {
        "producer"
    }

    /// Produce a candidate record for the given subject.
    async fn produce(&self, subject: &str) -> Result<CandidateRecord, ProducerError>;
}
