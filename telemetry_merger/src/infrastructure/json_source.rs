use std::{fs::File, io::BufReader, path::Path};

use telemetry_model::{Error, Result, SourceBatch, SourceFormat};

use crate::application::ports::RecordSource;

/// An adapter that implements the `RecordSource` port for JSON files whose
/// root is an array of records.
///
/// The file handle lives only for the duration of `read`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFileSource;

impl RecordSource for JsonFileSource {
    fn read(&self, path: &Path, format: SourceFormat) -> Result<SourceBatch> {
        tracing::debug!("Reading {} records from {:?}", format, path);

        let file = File::open(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => Error::ArtifactNotFound {
                path: path.to_path_buf(),
                source,
            },
            _ => Error::Other(
                anyhow::Error::new(source).context(format!("failed to open {}", path.display())),
            ),
        })?;
        let reader = BufReader::new(file);

        let parsed = match format {
            SourceFormat::A => serde_json::from_reader(reader).map(SourceBatch::A),
            SourceFormat::B => serde_json::from_reader(reader).map(SourceBatch::B),
        };

        parsed.map_err(|source| {
            if source.is_io() {
                Error::Other(
                    anyhow::Error::new(source).context(format!("failed to read {}", path.display())),
                )
            } else {
                Error::MalformedStructuredText {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_input(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_format_b_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(
            &dir,
            "data-2.json",
            r#"[
                {"time": 1, "temperature_c": 2, "humidity_percent": 3},
                {"time": 4, "temperature_c": 5, "humidity_percent": 6}
            ]"#,
        );

        let batch = JsonFileSource.read(&path, SourceFormat::B).unwrap();
        assert_eq!(batch.format(), SourceFormat::B);
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = JsonFileSource.read(&path, SourceFormat::A).unwrap_err();
        assert!(matches!(err, Error::ArtifactNotFound { .. }));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "data-1.json", r#"[{"timestamp": "#);

        let err = JsonFileSource.read(&path, SourceFormat::A).unwrap_err();
        assert!(matches!(err, Error::MalformedStructuredText { .. }));
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let object_root = write_input(&dir, "object.json", r#"{"time": 1}"#);
        let wrong_type = write_input(
            &dir,
            "typed.json",
            r#"[{"time": "soon", "temperature_c": 1, "humidity_percent": 1}]"#,
        );

        for path in [object_root, wrong_type] {
            let err = JsonFileSource.read(&path, SourceFormat::B).unwrap_err();
            assert!(matches!(err, Error::MalformedStructuredText { .. }), "{err:?}");
        }
    }

    #[test]
    fn absent_fields_parse_for_the_adapter_to_reject() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "data-1.json", r#"[{"timestamp": "2024-01-01T00:00:00Z"}]"#);

        let batch = JsonFileSource.read(&path, SourceFormat::A).unwrap();
        assert!(matches!(
            batch.to_unified(),
            Err(Error::MissingField { field: "temp", .. })
        ));
    }
}
