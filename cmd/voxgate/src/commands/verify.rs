//! Verification command.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use voxgate_cli::Registry;

use super::{build_matcher, get_config, output, print_error, print_success};
use crate::Cli;

/// Verify an audio file against a user's enrollment.
///
/// Exits with status 1 when the voice does not match.
#[derive(Args)]
pub struct VerifyCommand {
    /// Enrolled username
    pub username: String,

    /// Audio file (WAV)
    pub file: PathBuf,

    /// Maximum distance accepted as a match (default from config)
    #[arg(short = 't', long)]
    pub threshold: Option<f64>,

    /// Seed for feedback phrase selection
    #[arg(long)]
    pub seed: Option<u64>,
}

impl VerifyCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<ExitCode> {
        let cfg = get_config(cli)?;
        let matcher = build_matcher(&cfg, self.threshold)?;
        let registry = Registry::load(cfg.registry_path())?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let verification =
            voxgate_cli::verify(&registry, &self.username, &self.file, &matcher, &mut rng);
        if verification.matched {
            print_success(&verification.message);
        } else {
            print_error(&verification.message);
        }
        output(cli).write(&verification)?;

        Ok(ExitCode::from(verification.exit_status()))
    }
}
