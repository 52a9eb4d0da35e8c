//! voxgate - voice enrollment and verification with MFCC voiceprints.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{
    ConfigCommand, EnrollCommand, FeaturesCommand, MatchCommand, NormalizeCommand, VerifyCommand,
};

/// voxgate - voice enrollment and verification.
///
/// Enrolls a user from a WAV recording and later verifies new recordings
/// against it by comparing averaged MFCC voiceprints.
///
/// Configuration is stored in ~/.voxgate/config.yaml
#[derive(Parser)]
#[command(name = "voxgate")]
#[command(about = "Voice enrollment and verification with MFCC voiceprints")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.voxgate/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage CLI configuration
    Config(ConfigCommand),
    /// Print the voiceprint of an audio file
    Features(FeaturesCommand),
    /// Compare two audio files
    Match(MatchCommand),
    /// Re-encode an audio file to canonical 16-bit mono WAV
    Normalize(NormalizeCommand),
    /// Enroll a user from an audio file
    Enroll(EnrollCommand),
    /// Verify an audio file against a user's enrollment
    Verify(VerifyCommand),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Config(cmd) => cmd.run(&cli),
        Commands::Features(cmd) => cmd.run(&cli),
        Commands::Match(cmd) => cmd.run(&cli),
        Commands::Normalize(cmd) => cmd.run(&cli),
        Commands::Enroll(cmd) => cmd.run(&cli),
        Commands::Verify(cmd) => cmd.run(&cli),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            commands::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
