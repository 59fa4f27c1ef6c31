use std::path::Path;

use telemetry_model::{Result, SourceBatch, SourceFormat, UnifiedRecord};

/// A contract for loading one input artifact in a known encoding.
/// The artifact must be fully read and released before returning.
pub trait RecordSource {
    fn read(&self, path: &Path, format: SourceFormat) -> Result<SourceBatch>;
}

/// A contract for persisting the merged collection.
/// Nothing may be left at `path` unless the whole collection was written.
pub trait RecordSink {
    fn write(&self, path: &Path, records: &[UnifiedRecord]) -> Result<()>;
}
