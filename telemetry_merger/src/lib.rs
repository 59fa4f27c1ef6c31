pub mod application;
pub mod config;
pub mod infrastructure;

use application::service::{MergeService, MergeSummary};
use config::Config;
use infrastructure::{json_sink::JsonFileSink, json_source::JsonFileSource};

/// Runs the merge pipeline against JSON files on disk.
pub fn run(config: &Config) -> telemetry_model::Result<MergeSummary> {
    let service = MergeService::new(JsonFileSource, JsonFileSink, config.paths.clone());
    service.run()
}
