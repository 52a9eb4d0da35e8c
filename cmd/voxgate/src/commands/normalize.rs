//! Canonical re-encoding command.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use voxgate_audio::wav;

use super::print_success;
use crate::Cli;

/// Re-encode an audio file as 16-bit PCM mono WAV at its native rate.
#[derive(Args)]
pub struct NormalizeCommand {
    /// Input audio file (WAV)
    pub input: PathBuf,

    /// Output WAV file
    pub output: PathBuf,
}

impl NormalizeCommand {
    pub fn run(&self, _cli: &Cli) -> anyhow::Result<ExitCode> {
        let signal = wav::normalize(&self.input, &self.output)
            .with_context(|| format!("failed to normalize {}", self.input.display()))?;

        print_success(&format!(
            "Wrote {} ({} Hz, {:.2}s)",
            self.output.display(),
            signal.sample_rate(),
            signal.duration().as_secs_f64()
        ));
        Ok(ExitCode::SUCCESS)
    }
}
