use std::path::PathBuf;

use telemetry_model::{Result, SourceFormat, merge_ordered};

use super::ports::{RecordSink, RecordSource};
use crate::config::PathsConfig;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeSummary {
    pub output: PathBuf,
    pub records: usize,
}

/// The main application service that orchestrates the merge pipeline.
/// It is generic over the RecordSource and RecordSink traits, allowing for
/// dependency injection.
pub struct MergeService<S: RecordSource, K: RecordSink> {
    source: S,
    sink: K,
    paths: PathsConfig,
}

impl<S: RecordSource, K: RecordSink> MergeService<S, K> {
    /// Creates a new service with concrete implementations of the ports.
    pub fn new(source: S, sink: K, paths: PathsConfig) -> Self {
        Self {
            source,
            sink,
            paths,
        }
    }

    /// Executes the entire pipeline: read, convert, merge, write.
    ///
    /// Any failure aborts the remaining stages; the sink is only reached
    /// once every record has converted.
    pub fn run(&self) -> Result<MergeSummary> {
        tracing::info!("Starting Stage 1: Reading inputs");
        let batch_a = self.source.read(&self.paths.input_a, SourceFormat::A)?;
        tracing::info!(records = batch_a.len(), path = ?self.paths.input_a, "Read format A input");
        let batch_b = self.source.read(&self.paths.input_b, SourceFormat::B)?;
        tracing::info!(records = batch_b.len(), path = ?self.paths.input_b, "Read format B input");

        tracing::info!("Starting Stage 2: Converting to unified records");
        let unified_a = batch_a.to_unified()?;
        let unified_b = batch_b.to_unified()?;

        tracing::info!("Starting Stage 3: Merging by timestamp");
        let merged = merge_ordered(unified_a, unified_b);
        tracing::debug!(records = merged.len(), "Merged collection ready");

        tracing::info!("Starting Stage 4: Writing output");
        self.sink.write(&self.paths.output, &merged)?;
        tracing::info!(path = ?self.paths.output, "Output written");

        Ok(MergeSummary {
            output: self.paths.output.clone(),
            records: merged.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::Path;

    use telemetry_model::{Error, SourceBatch, UnifiedRecord};

    struct MemorySource(HashMap<PathBuf, &'static str>);

    impl RecordSource for MemorySource {
        fn read(&self, path: &Path, format: SourceFormat) -> Result<SourceBatch> {
            let text = self.0.get(path).ok_or_else(|| Error::ArtifactNotFound {
                path: path.to_path_buf(),
                source: std::io::ErrorKind::NotFound.into(),
            })?;
            let batch = match format {
                SourceFormat::A => SourceBatch::A(serde_json::from_str(text).unwrap()),
                SourceFormat::B => SourceBatch::B(serde_json::from_str(text).unwrap()),
            };
            Ok(batch)
        }
    }

    #[derive(Default)]
    struct MemorySink(RefCell<Option<Vec<UnifiedRecord>>>);

    impl RecordSink for &MemorySink {
        fn write(&self, _path: &Path, records: &[UnifiedRecord]) -> Result<()> {
            *self.0.borrow_mut() = Some(records.to_vec());
            Ok(())
        }
    }

    fn paths() -> PathsConfig {
        PathsConfig {
            input_a: "a.json".into(),
            input_b: "b.json".into(),
            output: "out.json".into(),
        }
    }

    fn source(a: &'static str, b: &'static str) -> MemorySource {
        MemorySource(HashMap::from([
            (PathBuf::from("a.json"), a),
            (PathBuf::from("b.json"), b),
        ]))
    }

    #[test]
    fn merges_both_sources() {
        let sink = MemorySink::default();
        let service = MergeService::new(
            source(
                r#"[{"timestamp":"2024-01-01T00:00:10Z","temp":20,"hum":50}]"#,
                r#"[{"time":1704067205000,"temperature_c":19,"humidity_percent":55}]"#,
            ),
            &sink,
            paths(),
        );

        let summary = service.run().unwrap();
        assert_eq!(summary.records, 2);
        assert_eq!(summary.output, PathBuf::from("out.json"));

        let written = sink.0.borrow().clone().unwrap();
        let times: Vec<_> = written.iter().map(|r| r.timestamp).collect();
        assert_eq!(times, vec![1_704_067_205_000, 1_704_067_210_000]);
    }

    #[test]
    fn bad_record_never_reaches_sink() {
        let sink = MemorySink::default();
        let service = MergeService::new(
            source(
                r#"[{"timestamp":"2024-01-01T00:00:10Z","hum":50}]"#,
                r#"[]"#,
            ),
            &sink,
            paths(),
        );

        let err = service.run().unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "temp", .. }));
        assert!(sink.0.borrow().is_none());
    }

    #[test]
    fn missing_input_b_aborts() {
        let sink = MemorySink::default();
        let service = MergeService::new(
            MemorySource(HashMap::from([(PathBuf::from("a.json"), "[]")])),
            &sink,
            paths(),
        );

        let err = service.run().unwrap_err();
        assert!(matches!(err, Error::ArtifactNotFound { ref path, .. } if path == Path::new("b.json")));
        assert!(sink.0.borrow().is_none());
    }
}
