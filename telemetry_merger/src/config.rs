use project_root::get_project_root;

use clap::{Parser, error::ErrorKind};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use std::path::PathBuf;

/// A single, unified struct holding all application settings.
/// Built from defaults, the TOML file, `TELEMETRY_*` variables and CLI flags.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub logging: LoggingConfig,
    pub paths: PathsConfig,
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

/// Where the two source artifacts are read from and the result is written to.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct PathsConfig {
    pub input_a: PathBuf,
    pub input_b: PathBuf,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            paths: PathsConfig {
                input_a: telemetry_model::FORMAT_A_FILE.into(),
                input_b: telemetry_model::FORMAT_B_FILE.into(),
                output: telemetry_model::RESULT_FILE.into(),
            },
        }
    }
}

const CONFIG_FILE: &str = "config/settings.toml";
const ENV_PREFIX: &str = "TELEMETRY_";

/// Merges format A and format B telemetry into one time-ordered JSON file.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Settings file; defaults to `config/settings.toml` under the project root.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Format A input (ISO-8601 `timestamp`, `temp`, `hum`).
    #[arg(long)]
    pub input_a: Option<PathBuf>,

    /// Format B input (epoch-millisecond `time`, `temperature_c`, `humidity_percent`).
    #[arg(long)]
    pub input_b: Option<PathBuf>,

    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    fn figment(&self) -> Figment {
        let config_path = match &self.config {
            Some(path) => path.clone(),
            None => get_project_root().unwrap_or_default().join(CONFIG_FILE),
        };

        let mut figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(path) = &self.input_a {
            figment = figment.merge(("paths.input_a", path));
        }
        if let Some(path) = &self.input_b {
            figment = figment.merge(("paths.input_b", path));
        }
        if let Some(path) = &self.output {
            figment = figment.merge(("paths.output", path));
        }
        if let Some(level) = &self.log_level {
            figment = figment.merge(("logging.level", level));
        }

        figment
    }

    /// Resolves the layered configuration for these arguments.
    pub fn load(&self) -> anyhow::Result<Config> {
        let config = self.figment().extract()?;
        Ok(config)
    }
}

/// Parses arguments without exiting, except for `--help` and `--version`.
///
/// Usage errors are condensed to one line so they fit the status line.
pub fn parse_cli<I, T>(args: I) -> anyhow::Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let rendered = err.to_string();
            let summary = rendered.lines().next().unwrap_or_default();
            anyhow::bail!(
                "invalid arguments: {}",
                summary.trim_start_matches("error: ")
            )
        }
    }
}

/// Loads configuration from the TOML file and merges it with CLI arguments.
pub fn get_config() -> anyhow::Result<Config> {
    parse_cli(std::env::args_os())?.load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn cli_with_file(jail: &Jail) -> Cli {
        Cli {
            config: Some(jail.directory().join("settings.toml")),
            ..Cli::default()
        }
    }

    #[test]
    fn defaults_without_file() {
        Jail::expect_with(|jail| {
            let config = cli_with_file(jail).load().expect("config");
            assert_eq!(config, Config::default());
            assert_eq!(config.paths.input_a, PathBuf::from("data-1.json"));
            assert_eq!(config.paths.output, PathBuf::from("data-result.json"));
            Ok(())
        });
    }

    #[test]
    fn file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "settings.toml",
                r#"
                [logging]
                level = "debug"

                [paths]
                output = "merged.json"
                "#,
            )?;

            let config = cli_with_file(jail).load().expect("config");
            assert_eq!(config.logging.level, "debug");
            assert_eq!(config.paths.output, PathBuf::from("merged.json"));
            assert_eq!(config.paths.input_b, PathBuf::from("data-2.json"));
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file_and_cli_overrides_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "settings.toml",
                r#"
                [paths]
                input_a = "from-file.json"
                input_b = "from-file-b.json"
                "#,
            )?;
            jail.set_env("TELEMETRY_PATHS__INPUT_A", "from-env.json");
            jail.set_env("TELEMETRY_PATHS__INPUT_B", "from-env-b.json");

            let cli = Cli {
                input_b: Some("from-cli-b.json".into()),
                ..cli_with_file(jail)
            };
            let config = cli.load().expect("config");
            assert_eq!(config.paths.input_a, PathBuf::from("from-env.json"));
            assert_eq!(config.paths.input_b, PathBuf::from("from-cli-b.json"));
            Ok(())
        });
    }

    #[test]
    fn unknown_flag_is_a_one_line_error() {
        let err = parse_cli(["telemetry-merger", "--bogus"]).unwrap_err();
        let message = err.to_string();

        assert!(message.starts_with("invalid arguments: "), "{message}");
        assert!(message.contains("--bogus"), "{message}");
        assert!(!message.contains('\n'), "{message}");
    }

    #[test]
    fn missing_flag_value_is_an_error() {
        assert!(parse_cli(["telemetry-merger", "--output"]).is_err());
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from([
            "telemetry-merger",
            "--input-a",
            "a.json",
            "--output",
            "out.json",
            "--log-level",
            "warn",
        ]);
        assert_eq!(cli.input_a, Some(PathBuf::from("a.json")));
        assert_eq!(cli.input_b, None);
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        assert_eq!(cli.log_level.as_deref(), Some("warn"));
    }
}
