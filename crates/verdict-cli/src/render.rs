//! Text rendering of run results.
//!
//! The engine defines no output format; this is the CLI's own view of the
//! data model, with pass/warn/fail thresholds applied per producer.

use verdict_runtime::{ModelTestResult, TestExecutionResult};

/// Overall score at or above this renders as PASS.
pub const PASS_THRESHOLD: f64 = 0.8;

/// Overall score at or above this (but below PASS) renders as WARN.
pub const WARN_THRESHOLD: f64 = 0.5;

fn status(score: f64) -> &'static str {
    if score >= PASS_THRESHOLD {
        "PASS"
    } else if score >= WARN_THRESHOLD {
        "WARN"
    } else {
        "FAIL"
    }
}

fn percent(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

/// Render the full comparison as text.
pub fn render_text(result: &TestExecutionResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Baseline: {} (subject: {})\n",
        result.test_name, result.baseline.subject
    ));
    if let Some(description) = &result.baseline.description {
        out.push_str(&format!("  {}\n", description));
    }
    out.push('\n');

    for model in &result.model_results {
        render_model(&mut out, model);
        out.push('\n');
    }

    out.push_str(&format!(
        "Best producer:  {}\n",
        result.best_producer.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!("Average score:  {}\n", percent(result.average_score)));
    out.push_str(&format!(
        "Total time:     {:.2}s\n",
        result.execution_time.as_secs_f64()
    ));

    out
}

fn render_model(out: &mut String, model: &ModelTestResult) {
    out.push_str(&format!(
        "{} [{}] — {} ({}) in {:.2}s\n",
        model.producer_name,
        model.producer_kind,
        status(model.overall_score),
        percent(model.overall_score),
        model.execution_time.as_secs_f64()
    ));

    if !model.success {
        out.push_str(&format!(
            "  error: {}\n",
            model.error_message.as_deref().unwrap_or("unknown failure")
        ));
        return;
    }

    out.push_str(&format!(
        "  required: {}  optional: {}\n",
        percent(model.required_fields_score),
        percent(model.optional_fields_score)
    ));

    for field in model.field_results.values() {
        let mark = if field.is_match { "ok" } else { "MISS" };
        out.push_str(&format!(
            "  {:<6} {:<20} {:<8} conf {:.2}",
            mark, field.field_name, field.strategy, field.confidence
        ));
        if let Some(message) = &field.error_message {
            out.push_str(&format!("  ({})", message));
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_thresholds() {
        assert_eq!(status(1.0), "PASS");
        assert_eq!(status(0.8), "PASS");
        assert_eq!(status(0.79), "WARN");
        assert_eq!(status(0.5), "WARN");
        assert_eq!(status(0.49), "FAIL");
        assert_eq!(status(0.0), "FAIL");
    }

    #[test]
    fn test_percent_formatting() {
        assert_eq!(percent(0.856), "86%");
        assert_eq!(percent(0.0), "0%");
        assert_eq!(percent(1.0), "100%");
    }
}
