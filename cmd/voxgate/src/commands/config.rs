//! Configuration management commands.

use std::process::ExitCode;

use clap::{Args, Subcommand};
use serde::Serialize;
use voxgate_cli::Config;

use super::{get_config, output, print_success};
use crate::Cli;

/// Manage CLI configuration.
///
/// Settings are stored in ~/.voxgate/config.yaml unless --config is given.
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Show current configuration
    Show,
    /// Set a configuration value (threshold, data_dir)
    Set {
        /// Configuration key
        key: String,
        /// New value (empty string resets data_dir)
        value: String,
    },
}

#[derive(Serialize)]
struct ConfigReport<'a> {
    config_file: String,
    effective_data_dir: String,
    registry: String,
    #[serde(flatten)]
    config: &'a Config,
}

impl ConfigCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<ExitCode> {
        let mut cfg = get_config(cli)?;
        match &self.command {
            ConfigSubcommand::Show => {
                output(cli).write(&ConfigReport {
                    config_file: cfg.path().display().to_string(),
                    effective_data_dir: cfg.data_dir().display().to_string(),
                    registry: cfg.registry_path().display().to_string(),
                    config: &cfg,
                })?;
            }
            ConfigSubcommand::Set { key, value } => {
                cfg.set(key, value)?;
                cfg.save()?;
                print_success(&format!("Set {} = {}", key, value));
            }
        }
        Ok(ExitCode::SUCCESS)
    }
}
