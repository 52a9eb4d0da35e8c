//! Verification: canonical probe re-encode, match, feedback phrase.

use std::path::Path;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};
use voxgate_audio::wav;
use voxgate_voiceprint::{Matcher, Verdict, VoiceprintModel};

use crate::phrases::{pick_phrase, Outcome};
use crate::registry::Registry;

/// Suffix appended to a failure phrase when the user is not enrolled.
pub const UNKNOWN_USER_SUFFIX: &str = " (Username not found)";

/// Prefix of the message shown when a sample cannot be analyzed.
pub const PROCESSING_ERROR_PREFIX: &str = "Error processing audio: Try again!";

/// Result of a verification attempt.
#[derive(Debug, Clone, Serialize)]
pub struct Verification {
    pub username: String,
    pub matched: bool,
    pub message: String,
    /// Absent when the user is not enrolled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
}

impl Verification {
    /// Process exit status: 0 on a match, 1 otherwise.
    pub fn exit_status(&self) -> u8 {
        if self.matched { 0 } else { 1 }
    }
}

/// Verifies the audio file at `probe` against `username`'s enrollment.
///
/// The probe is re-encoded to the same canonical WAV the enrollment was
/// stored as before it is compared, so enrolling and verifying with the same
/// upload yields distance 0.
pub fn verify<M, R>(
    registry: &Registry,
    username: &str,
    probe: &Path,
    matcher: &Matcher<M>,
    rng: &mut R,
) -> Verification
where
    M: VoiceprintModel,
    R: Rng + ?Sized,
{
    let Some(enrollment) = registry.get(username) else {
        debug!(username, "verification for unknown user");
        let phrase = pick_phrase(Outcome::Failure, rng);
        return Verification {
            username: username.to_string(),
            matched: false,
            message: format!("{phrase}{UNKNOWN_USER_SUFFIX}"),
            verdict: None,
        };
    };

    let verdict = match canonical_probe(probe) {
        Ok(dir) => matcher.evaluate(&enrollment.voice_file, dir.path().join(PROBE_FILE)),
        Err(reason) => {
            warn!(path = %probe.display(), error = %reason, "probe re-encode failed");
            Verdict::Indeterminate {
                reason: format!("probe sample {}: {reason:#}", probe.display()),
            }
        }
    };

    let message = match &verdict {
        Verdict::Match { .. } => pick_phrase(Outcome::Success, rng).to_string(),
        Verdict::NoMatch { .. } => pick_phrase(Outcome::Failure, rng).to_string(),
        Verdict::Indeterminate { reason } => format!("{PROCESSING_ERROR_PREFIX} ({reason})"),
    };
    debug!(username, verdict = %verdict, "verified");

    Verification {
        username: username.to_string(),
        matched: verdict.is_match(),
        message,
        verdict: Some(verdict),
    }
}

const PROBE_FILE: &str = "probe.wav";

/// Re-encodes `probe` into a temporary directory removed on drop.
fn canonical_probe(probe: &Path) -> anyhow::Result<tempfile::TempDir> {
    let dir = tempfile::Builder::new().prefix("voxgate-probe-").tempdir()?;
    wav::normalize(probe, dir.path().join(PROBE_FILE))?;
    Ok(dir)
}
