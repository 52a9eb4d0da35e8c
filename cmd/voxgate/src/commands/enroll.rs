//! Enrollment command.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use serde::Serialize;
use voxgate_cli::Registry;

use super::{build_model, get_config, output, print_success};
use crate::Cli;

/// Enroll a user from an audio file.
///
/// The audio is re-encoded into the data directory and checked for a usable
/// voiceprint before the registry is updated. Enrolling an existing user
/// replaces their recording.
#[derive(Args)]
pub struct EnrollCommand {
    /// Username to enroll
    pub username: String,

    /// Audio file (WAV)
    pub file: PathBuf,
}

#[derive(Serialize)]
struct EnrollReport {
    username: String,
    voice_file: String,
    sample_rate: u32,
    duration_secs: f64,
    replaced: bool,
}

impl EnrollCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<ExitCode> {
        let cfg = get_config(cli)?;
        let model = build_model(&cfg);
        let mut registry = Registry::load(cfg.registry_path())?;

        let enrolled = voxgate_cli::enroll(
            &mut registry,
            &cfg.data_dir(),
            &self.username,
            &self.file,
            &model,
        )?;

        print_success(&format!("Enrolled '{}'", self.username));
        output(cli).write(&EnrollReport {
            username: enrolled.enrollment.username,
            voice_file: enrolled.enrollment.voice_file.display().to_string(),
            sample_rate: enrolled.sample_rate,
            duration_secs: enrolled.duration.as_secs_f64(),
            replaced: enrolled.previous.is_some(),
        })?;
        Ok(ExitCode::SUCCESS)
    }
}
