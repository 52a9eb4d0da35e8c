//! Pairwise comparison command.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use serde::Serialize;
use voxgate_voiceprint::Verdict;

use super::{build_matcher, get_config, output};
use crate::Cli;

/// Compare an enrolled recording against a probe recording.
#[derive(Args)]
pub struct MatchCommand {
    /// Enrolled audio file (WAV)
    pub enrolled: PathBuf,

    /// Probe audio file (WAV)
    pub probe: PathBuf,

    /// Maximum distance accepted as a match (default from config)
    #[arg(short = 't', long)]
    pub threshold: Option<f64>,
}

#[derive(Serialize)]
struct MatchReport {
    enrolled: String,
    probe: String,
    threshold: f64,
    matched: bool,
    #[serde(flatten)]
    verdict: Verdict,
}

impl MatchCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<ExitCode> {
        let cfg = get_config(cli)?;
        let matcher = build_matcher(&cfg, self.threshold)?;

        let verdict = matcher.evaluate(&self.enrolled, &self.probe);
        output(cli).write(&MatchReport {
            enrolled: self.enrolled.display().to_string(),
            probe: self.probe.display().to_string(),
            threshold: matcher.config().threshold,
            matched: verdict.is_match(),
            verdict,
        })?;
        Ok(ExitCode::SUCCESS)
    }
}
