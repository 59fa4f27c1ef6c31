use clap::Parser;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    let out_dir = &config.out_dir;
    std::fs::create_dir_all(out_dir)?;
    let (path_a, path_b) = telemetry_model::write_sample_files(out_dir, config.count, config.seed)?;
    println!("wrote {} and {}", path_a.display(), path_b.display());
    Ok(())
}

/// Writes a format A / format B pair of sample telemetry files.
#[derive(Clone, Debug, Parser)]
#[command()]
struct Config {
    #[arg()]
    out_dir: Box<std::path::Path>,
    /// Total readings across both files.
    #[arg(short, long, default_value_t = 20)]
    count: usize,
    #[arg(short, long)]
    seed: Option<u64>,
}
