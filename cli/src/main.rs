//! vaultgov: validate governance configuration and dry-run timelock scripts.

mod script;
mod simulation;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use vaultgov_governance::{GovernanceConfig, GovernanceEvent, ProtocolGovernance};
use vaultgov_utils::{format_commit_wait, format_duration, init_logging, LogFormat};

use crate::script::Script;
use crate::simulation::Simulation;

#[derive(Parser)]
#[command(name = "vaultgov", about = "Delayed governance toolkit")]
struct Cli {
    /// Path to the governance TOML configuration file.
    #[arg(long, default_value = "vaultgov.toml", env = "VAULTGOV_CONFIG")]
    config: PathBuf,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Defaults to the config file's `log_level`.
    #[arg(long, env = "VAULTGOV_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json". Defaults to the config file's `log_format`.
    #[arg(long, env = "VAULTGOV_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Inspect the configuration.
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Replay a simulation script and print events and final state as JSON.
    Simulate {
        /// Path to the TOML simulation script.
        script: PathBuf,
    },
}

#[derive(clap::Subcommand)]
enum ConfigAction {
    /// Load and validate the configuration.
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = GovernanceConfig::from_toml_file(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;

    let format: LogFormat = cli
        .log_format
        .as_deref()
        .unwrap_or(&config.log_format)
        .parse()
        .map_err(anyhow::Error::msg)?;
    init_logging(
        format,
        cli.log_level.as_deref().unwrap_or(&config.log_level),
    );
    tracing::info!("Loaded config from {}", cli.config.display());

    match cli.command {
        Command::Config {
            action: ConfigAction::Check,
        } => {
            let protocol = ProtocolGovernance::from_config(&config)?;
            let delay = protocol.governance_delay();
            println!("governance delay: {} ({delay}s)", format_duration(delay));
            println!("committable after: {}", format_commit_wait(delay));
            for admin in protocol.admins() {
                println!("admin: {admin}");
            }
        }
        Command::Simulate { script } => {
            let script = Script::from_toml_file(&script)?;
            let mut sim = Simulation::new(&config, &script)?;
            sim.subscribe_all(|| {
                Box::new(|event: &GovernanceEvent| match serde_json::to_string(event) {
                    Ok(line) => println!("{line}"),
                    Err(e) => tracing::warn!("failed to serialize event: {e}"),
                })
            });

            let report = sim.run(&script)?;
            tracing::info!(
                applied = report.applied,
                expected_rejections = report.expected_rejections,
                "simulation finished"
            );
            println!("{}", serde_json::to_string_pretty(&sim.summary())?);
        }
    }

    Ok(())
}
