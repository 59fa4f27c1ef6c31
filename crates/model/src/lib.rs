pub mod error;
pub mod merge;
pub mod record;
pub mod samples;
pub mod source;
pub mod timestamp;

pub use error::{Error, ErrorCategory, Result};
pub use merge::merge_ordered;
pub use record::{EpochMillis, SourceFormat, UnifiedRecord};
pub use source::{FormatARecord, FormatBRecord, SourceBatch, SourceRecord, convert_all};

/// File name conventionally used for format A input.
pub const FORMAT_A_FILE: &str = "data-1.json";
/// File name conventionally used for format B input.
pub const FORMAT_B_FILE: &str = "data-2.json";
/// File name conventionally used for the merged output.
pub const RESULT_FILE: &str = "data-result.json";

/// Writes `count` generated readings into `out_dir` as a format A / format B pair.
///
/// Existing files are overwritten. Returns the two paths written.
pub fn write_sample_files(
    out_dir: &std::path::Path,
    count: usize,
    seed: Option<u64>,
) -> anyhow::Result<(std::path::PathBuf, std::path::PathBuf)> {
    let generator = match seed {
        Some(seed) => samples::SampleGenerator::seeded(seed),
        None => samples::SampleGenerator::new(),
    };
    let (format_a, format_b) = samples::partition(generator.take(count));

    let path_a = out_dir.join(FORMAT_A_FILE);
    let path_b = out_dir.join(FORMAT_B_FILE);
    write_pretty(&path_a, &format_a)?;
    write_pretty(&path_b, &format_b)?;

    Ok((path_a, path_b))
}

fn write_pretty<T: serde::Serialize>(path: &std::path::Path, value: &T) -> anyhow::Result<()> {
    use anyhow::Context;
    use std::io::Write;

    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
