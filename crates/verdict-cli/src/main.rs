//! verdict — compare producer outputs against a declarative baseline.
//!
//! ```text
//! verdict run --baseline acme.yaml --record gpt=gpt.json --record claude=claude.json
//! verdict validate --baseline acme.yaml
//! ```

mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use verdict_core::TestBaseline;
use verdict_runtime::{
    FileProducer, Producer, RunnerConfig, StaticBaselineSource, TestRunnerBuilder,
};

#[derive(Parser)]
#[command(name = "verdict", version, about = "Baseline-driven output validation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a baseline against one or more captured producer records.
    Run {
        /// Baseline YAML file.
        #[arg(long)]
        baseline: PathBuf,

        /// Producer record as NAME=FILE, where FILE is a flat JSON object.
        /// Repeatable; order determines ranking tie-breaks.
        #[arg(long = "record", value_name = "NAME=FILE")]
        records: Vec<String>,

        /// Emit the full result as JSON instead of a table.
        #[arg(long)]
        json: bool,

        /// Per-producer timeout (e.g. "30s", "2m").
        #[arg(long, default_value = "30s")]
        timeout: String,

        /// Upper bound on concurrent producer invocations.
        #[arg(long, default_value_t = 4)]
        concurrency: usize,
    },

    /// Check that a baseline file is well-formed without running it.
    Validate {
        /// Baseline YAML file.
        #[arg(long)]
        baseline: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            baseline,
            records,
            json,
            timeout,
            concurrency,
        } => run(baseline, records, json, &timeout, concurrency).await,
        Command::Validate { baseline } => validate(baseline),
    }
}

async fn run(
    baseline_path: PathBuf,
    records: Vec<String>,
    json: bool,
    timeout: &str,
    concurrency: usize,
) -> Result<()> {
    if records.is_empty() {
        bail!("at least one --record NAME=FILE is required");
    }

    let baseline = TestBaseline::from_yaml_file(&baseline_path)
        .with_context(|| format!("loading baseline {}", baseline_path.display()))?;
    let test_name = baseline.test_name.clone();

    let producers: Vec<Arc<dyn Producer>> = records
        .iter()
        .map(|spec| parse_record_spec(spec))
        .collect::<Result<_>>()?;
    tracing::debug!(test_name = %test_name, producers = producers.len(), "configured run");

    let config = RunnerConfig::default()
        .with_timeout_str(timeout)?
        .with_concurrency(concurrency)?;

    let source = StaticBaselineSource::new().with(baseline);
    let runner = TestRunnerBuilder::new()
        .baselines(Arc::new(source))
        .config(config)
        .build()?;

    let result = runner.run(&test_name, &producers).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render::render_text(&result));
    }

    Ok(())
}

fn validate(baseline_path: PathBuf) -> Result<()> {
    let baseline = TestBaseline::from_yaml_file(&baseline_path)
        .with_context(|| format!("loading baseline {}", baseline_path.display()))?;

    println!(
        "{}: ok ({} required, {} optional fields)",
        baseline.test_name,
        baseline.required_fields.len(),
        baseline.optional_fields.len()
    );
    Ok(())
}

/// Parse a NAME=FILE producer spec into a file producer.
fn parse_record_spec(spec: &str) -> Result<Arc<dyn Producer>> {
    let (name, path) = spec
        .split_once('=')
        .with_context(|| format!("record spec '{}' is not NAME=FILE", spec))?;
    if name.is_empty() {
        bail!("record spec '{}' has an empty name", spec);
    }
    Ok(Arc::new(FileProducer::new(name, path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_spec() {
        let producer = parse_record_spec("gpt=out/gpt.json").unwrap();
        assert_eq!(producer.name(), "gpt");
    }

    #[test]
    fn test_parse_record_spec_rejects_bad_shapes() {
        assert!(parse_record_spec("no-equals").is_err());
        assert!(parse_record_spec("=file.json").is_err());
    }
}
