//! chatnav - navigate your own messages in long LLM chat conversations.
//!
//! Main entry point for the chatnav CLI.

use std::path::PathBuf;

use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use chatnav_config::{Config, ConfigLoader, ConfigValidator};
use tracing::warn;

mod cli;
mod cmd_attach;
mod cmd_config;
mod cmd_demo;
mod interactive;
mod runner;

use cli::{Cli, Commands};

/// Get chatnav home directory (~/.chatnav).
pub(crate) fn chatnav_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".chatnav")
}

/// Console goes to stderr so it never interleaves with the interactive list.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = chatnav_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("chatnav")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Load the configuration and refuse to run with one the validator rejects.
pub(crate) fn load_config(path: Option<&PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = ConfigLoader::load_or_default(path.map(|p| p.as_path()))?;
    check_config(config)
}

fn check_config(config: Config) -> Result<Config, Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(&config)?;
    for warning in &result.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if result.is_valid() {
        return Ok(config);
    }

    let errors: Vec<String> = result
        .errors
        .iter()
        .map(|e| format!("{}: {}", e.path, e.message))
        .collect();
    Err(format!("invalid configuration: {}", errors.join("; ")).into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();
    let config_path = cli.config.as_ref();

    match cli.command {
        None => cmd_attach::run(config_path, None, None).await,
        Some(Commands::Attach {
            endpoint,
            url_contains,
        }) => cmd_attach::run(config_path, endpoint, url_contains).await,
        Some(Commands::Demo) => cmd_demo::run(config_path).await,
        Some(Commands::Sites) => cmd_config::sites(config_path),
        Some(Commands::Check { url }) => cmd_config::check(config_path, &url),
        Some(Commands::Validate) => cmd_config::validate(config_path),
    }
}
