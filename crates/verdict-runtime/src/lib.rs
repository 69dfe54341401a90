//! # verdict-runtime
//!
//! Multi-producer test runner for verdict.
//!
//! `verdict-core` judges one record against one baseline; this crate runs
//! the comparison across N producers (competing models, pipelines, or
//! captured outputs) and ranks them.
//!
//! ## Important
//!
//! The engine itself stays pure and synchronous. Only producer invocation
//! is async: each producer can be an expensive, rate-limited external
//! call, so invocations run through a bounded concurrent fan-out with a
//! per-producer timeout. Matching is CPU-only and runs inline.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use verdict_runtime::{
//!     FixtureProducer, Producer, RunnerConfig, StaticBaselineSource, TestRunnerBuilder,
//! };
//!
//! let source = StaticBaselineSource::new().with(baseline);
//! let runner = TestRunnerBuilder::new()
//!     .baselines(Arc::new(source))
//!     .config(RunnerConfig::default())
//!     .build()?;
//!
//! let producers: Vec<Arc<dyn Producer>> = vec![
//!     Arc::new(FixtureProducer::new("model-a", record_a)),
//!     Arc::new(FixtureProducer::new("model-b", record_b)),
//! ];
//! let result = runner.run("acme_profile", &producers).await?;
//! println!("best: {:?}", result.best_producer);
//! ```

pub mod baselines;
pub mod config;
pub mod producers;
pub mod results;
pub mod runner;

// Re-export main types at crate root
pub use baselines::{BaselineSource, BaselineSourceError, DirBaselineSource, StaticBaselineSource};
pub use config::{ConfigError, RunnerConfig};
pub use producers::{CandidateRecord, FileProducer, FixtureProducer, Producer, ProducerError};
pub use results::{ModelTestResult, TestExecutionResult};
pub use runner::{RunnerError, TestRunner, TestRunnerBuilder};
