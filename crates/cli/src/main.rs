//! Security oracle operator CLI.
//!
//! Hosts a `SecurityOracle` for offline operation:
//! - Replay scripted calls against an oracle bootstrapped from config or a saved state file
//! - Resolve individual scores with their fallback source
//! - Compute function selectors

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

mod cmd;
mod config;
mod script;

use config::{Config, LoggingConfig};

#[derive(Debug, Parser)]
#[command(name = "secoracle")]
#[command(version, about = "Security oracle operator CLI", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "oracle.toml", global = true)]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate the configuration and print a summary.
    CheckConfig,
    /// Replay a JSON call script against the oracle.
    Replay(cmd::replay::ReplayArgs),
    /// Resolve the score of a target (and optional selector).
    Score(cmd::score::ScoreArgs),
    /// Print the 4-byte selector of a function signature.
    Selector(cmd::selector::SelectorArgs),
}

impl Command {
    fn requires_config(&self) -> bool {
        !matches!(self, Command::Selector(_))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.command.requires_config() {
        Some(Config::from_file(&cli.config).context("Failed to load configuration")?)
    } else {
        None
    };

    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    init_logging(cli.debug, &logging)?;

    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    match (cli.command, config) {
        (Command::Selector(args), _) => cmd::selector::run(args)?,
        (Command::CheckConfig, Some(config)) => cmd::check::run(&config)?,
        (Command::Replay(args), Some(config)) => cmd::replay::run(&config, args)?,
        (Command::Score(args), Some(config)) => cmd::score::run(&config, args)?,
        (command, None) => anyhow::bail!("{:?} requires a configuration file", command),
    }

    Ok(())
}

/// Initialize tracing subscriber for logging. Logs go to stderr; stdout carries results.
fn init_logging(debug: bool, logging: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = if debug {
        EnvFilter::new("secoracle=debug,secoracle_engine=debug,secoracle_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "secoracle={level},secoracle_engine={level}",
                level = logging.level
            ))
        })
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    match logging.format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        _ => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}
