//! The single line reported to the invoker at the end of a run.

use std::fmt;

use telemetry_model::{Error, ErrorCategory, Result};

use super::service::MergeSummary;

/// Terminal status of a run, rendered as one human-readable line.
pub struct StatusLine<'a>(pub &'a Result<MergeSummary>);

impl fmt::Display for StatusLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Ok(summary) => write!(
                f,
                "✅ Conversion complete! Unified data written to {}",
                summary.output.display()
            ),
            Err(err) => write_failure(f, err),
        }
    }
}

fn write_failure(f: &mut fmt::Formatter<'_>, err: &Error) -> fmt::Result {
    match err.category() {
        ErrorCategory::ArtifactNotFound => write!(f, "❌ Error: File not found - {err}"),
        ErrorCategory::MalformedStructuredText => write!(f, "❌ Error: Invalid JSON format - {err}"),
        ErrorCategory::Other => write!(f, "❌ Error: {err:#}"),
    }
}
