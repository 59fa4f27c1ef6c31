use anyhow::Result;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use telemetry_merger::application::{service::MergeSummary, status::StatusLine};
use telemetry_merger::config::get_config;

fn setup_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.parse()?)
        .from_env_lossy();

    // stdout carries only the status line.
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    Ok(())
}

fn run() -> telemetry_model::Result<MergeSummary> {
    let config = get_config()?;
    setup_tracing(&config.logging.level)?;
    tracing::info!("Configuration loaded successfully");
    tracing::debug!(?config, "Full application configuration");

    telemetry_merger::run(&config)
}

fn main() {
    let outcome = run();

    if let Err(e) = &outcome {
        tracing::error!("Application finished with an error: {:?}", e);
    }
    println!("{}", StatusLine(&outcome));

    if outcome.is_err() {
        std::process::exit(1);
    }
}
