use std::path::PathBuf;

use thiserror::Error;
use voxgate_audio::mfcc::MfccError;
use voxgate_audio::wav::WavError;

/// Errors returned by voiceprint operations.
///
/// None of these escape the [`Matcher`](crate::Matcher) boolean API; they
/// surface through [`Verdict::Indeterminate`](crate::Verdict) and the
/// `try_*` extraction functions for diagnostics.
#[derive(Debug, Error)]
pub enum VoiceprintError {
    #[error("audio file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("read audio: {0}")]
    Io(#[from] std::io::Error),

    #[error("decode audio: {0}")]
    Audio(#[from] WavError),

    #[error("feature config: {0}")]
    Mfcc(#[from] MfccError),

    #[error("audio too short: no analysis frames from {samples} samples")]
    AudioTooShort { samples: usize },

    #[error("feature vector contains non-finite values")]
    NonFinite,

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}
