//! Utility functions for CLI commands.

use voxgate_cli::config::validate_threshold;
use voxgate_cli::{load_config, Config, Output, OutputFormat};
use voxgate_voiceprint::{Matcher, MfccModel};

use crate::Cli;

/// Gets the global configuration.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    load_config(cli.config.as_deref())
}

/// Builds the voiceprint model from configuration.
pub fn build_model(cfg: &Config) -> MfccModel {
    MfccModel::new(cfg.mfcc.clone().unwrap_or_default())
}

/// Builds a matcher, applying an optional threshold override.
pub fn build_matcher(cfg: &Config, threshold: Option<f64>) -> anyhow::Result<Matcher> {
    if let Some(t) = threshold {
        validate_threshold(t)?;
    }
    Ok(Matcher::with_model(build_model(cfg), cfg.match_config(threshold)))
}

/// Output writer honoring the global --json and -o flags.
pub fn output(cli: &Cli) -> Output {
    Output::new(OutputFormat::from_json_flag(cli.json), cli.output.clone())
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", msg);
}

/// Prints error message.
pub fn print_error(msg: &str) {
    eprintln!("\x1b[31m✗\x1b[0m {}", msg);
}
