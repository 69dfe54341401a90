//! Fixture producers: fixed records for tests and offline comparison.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{CandidateRecord, Producer, ProducerError};

/// A producer that always returns the same record.
///
/// This is the test double the engine's determinism guarantees are stated
/// against: running the same baseline against the same fixture twice must
/// yield identical results.
pub struct FixtureProducer {
    name: String,
    record: CandidateRecord,
}

impl FixtureProducer {
    /// Create a fixture producer with a fixed record.
    pub fn new(name: impl Into<String>, record: CandidateRecord) -> Self {
        Self {
            name: name.into(),
            record,
        }
    }
}

#[async_trait]
impl Producer for FixtureProducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        "fixture"
    }

    async fn produce(&self, _subject: &str) -> Result<CandidateRecord, ProducerError> {
        Ok(self.record.clone())
    }
}

/// A producer that reads a JSON record from a file on each invocation.
///
/// Used by the CLI to compare previously captured model outputs.
pub struct FileProducer {
    name: String,
    path: PathBuf,
}

impl FileProducer {
    /// Create a file producer for a JSON record file.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[async_trait]
impl Producer for FileProducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        "file"
    }

    async fn produce(&self, _subject: &str) -> Result<CandidateRecord, ProducerError> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let record: CandidateRecord = serde_json::from_str(&contents)?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdict_core::FieldValue;

    fn sample_record() -> CandidateRecord {
        let mut record = CandidateRecord::new();
        record.insert("founded".to_string(), FieldValue::Integer(2013));
        record.insert(
            "industry".to_string(),
            FieldValue::Text("Video streaming".to_string()),
        );
        record
    }

    #[tokio::test]
    async fn test_fixture_returns_same_record_every_time() {
        let producer = FixtureProducer::new("gpt-x", sample_record());
        assert_eq!(producer.kind(), "fixture");

        let first = producer.produce("Acme Corp").await.unwrap();
        let second = producer.produce("Acme Corp").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[tokio::test]
    async fn test_file_producer_parses_json_record() {
        let dir = std::env::temp_dir().join("verdict-fixture-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("record.json");
        std::fs::write(&path, r#"{"founded": 2013, "industry": "Video streaming"}"#).unwrap();

        let producer = FileProducer::new("capture-1", &path);
        let record = producer.produce("Acme Corp").await.unwrap();
        assert_eq!(record["founded"], FieldValue::Integer(2013));
    }

    #[tokio::test]
    async fn test_file_producer_missing_file_errors() {
        let producer = FileProducer::new("gone", "/nonexistent/record.json");
        let result = producer.produce("Acme Corp").await;
        assert!(matches!(result, Err(ProducerError::Io(_))));
    }
}
