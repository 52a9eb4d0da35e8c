//! Voiceprint extraction command.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use voxgate_voiceprint::{load_signal, VoiceprintModel};

use super::{build_model, get_config, output};
use crate::Cli;

/// Print the averaged MFCC voiceprint of an audio file.
#[derive(Args)]
pub struct FeaturesCommand {
    /// Audio file (WAV)
    pub file: PathBuf,
}

#[derive(Serialize)]
struct FeaturesReport {
    file: String,
    sample_rate: u32,
    duration_secs: f64,
    features: Vec<f32>,
}

impl FeaturesCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<ExitCode> {
        let cfg = get_config(cli)?;
        let model = build_model(&cfg);

        let signal = load_signal(&self.file)
            .with_context(|| format!("failed to load {}", self.file.display()))?;
        let features = model
            .extract(&signal)
            .with_context(|| format!("failed to extract features from {}", self.file.display()))?;

        output(cli).write(&FeaturesReport {
            file: self.file.display().to_string(),
            sample_rate: signal.sample_rate(),
            duration_secs: signal.duration().as_secs_f64(),
            features: features.as_slice().to_vec(),
        })?;
        Ok(ExitCode::SUCCESS)
    }
}
