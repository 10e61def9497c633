//! # T212 CLI
//!
//! Command-line access to the 212 brokerage API.
//!
//! Credentials come from the environment (`T212_API_KEY_ID`,
//! `T212_API_KEY_SECRET`), a `.env` file, or the `rest` section of a
//! configuration file. Results are printed to stdout; logs go to stderr.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod commands;
mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use t212_core::config::{ConfigLoader, Validatable};
use t212_core::types::Environment;
use t212_gateway::api::T212Api;
use t212_telemetry::logging::{LogFormat, init_logging};
use t212_telemetry::masking::SensitiveDataMasker;
use tracing::info;

use commands::Commands;
use config::{CliConfig, ENV_PREFIX};

/// t212 - query and trade a 212 brokerage account
#[derive(Parser, Debug)]
#[command(name = "t212")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file path (YAML, TOML or JSON)
    #[arg(short, long, global = true, env = "T212_CONFIG")]
    config: Option<PathBuf>,

    /// Dotenv file loaded before reading the environment
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,

    /// Use the demo (paper trading) endpoint
    #[arg(long, global = true)]
    demo: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn log_level(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        }
    }

    fn apply_overrides(&self, config: &mut CliConfig) {
        if self.demo {
            config.rest.environment = Environment::Demo;
        }
        if let Some(level) = self.log_level() {
            config.logging = std::mem::take(&mut config.logging).with_level(level);
        }
        if self.json_logs {
            config.logging = std::mem::take(&mut config.logging).with_format(LogFormat::Json);
        }
    }
}

fn load_env_file(path: &Path) -> Result<()> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e).with_context(|| format!("failed to load {}", path.display())),
    }
}

fn load_config(cli: &Cli) -> Result<CliConfig> {
    let loader = ConfigLoader::new()
        .with_env_prefix(ENV_PREFIX)
        .with_validation(false);
    let mut config = match &cli.config {
        Some(path) => loader
            .load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => loader.finish(CliConfig::default())?,
    };
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_env_file(&cli.env_file)?;
    let config = load_config(&cli)?;
    let _guards = init_logging(&config.logging)?;

    let masker = SensitiveDataMasker::new();
    info!(
        key_id = %masker.mask_value(&config.rest.api_key_id),
        base_url = %config.rest.resolved_base_url(),
        "Connecting"
    );

    let api = T212Api::connect(config.rest)?;
    let output = commands::execute(&api, cli.command).await?;
    println!("{output}");

    Ok(())
}
