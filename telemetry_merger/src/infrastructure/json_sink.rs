use anyhow::Context;
use std::fs::Permissions;
use std::io::Write;
use std::path::Path;

use telemetry_model::{Result, UnifiedRecord};

use crate::application::ports::RecordSink;

/// An adapter that implements the `RecordSink` port.
///
/// The collection is serialized with two-space indentation into a temporary
/// file beside the target, which is then renamed over it. A failure at any
/// point leaves the target untouched. The result keeps the permissions of the
/// file it replaces, or gets `0644` when there was none.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFileSink;

impl RecordSink for JsonFileSink {
    fn write(&self, path: &Path, records: &[UnifiedRecord]) -> Result<()> {
        let mut contents = serde_json::to_vec_pretty(records)
            .context("failed to serialize unified records")?;
        contents.push(b'\n');

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to stage output in {}", dir.display()))?;
        staged
            .write_all(&contents)
            .and_then(|()| staged.as_file().sync_all())
            .with_context(|| format!("failed to write {}", path.display()))?;
        if let Some(permissions) = target_permissions(path) {
            staged
                .as_file()
                .set_permissions(permissions)
                .with_context(|| format!("failed to set permissions on {}", path.display()))?;
        }
        staged
            .persist(path)
            .with_context(|| format!("failed to write {}", path.display()))?;

        tracing::debug!(bytes = contents.len(), "Wrote {:?}", path);
        Ok(())
    }
}

fn target_permissions(path: &Path) -> Option<Permissions> {
    match std::fs::metadata(path) {
        Ok(existing) => Some(existing.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

// Elsewhere the staged file keeps its defaults.
#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}
