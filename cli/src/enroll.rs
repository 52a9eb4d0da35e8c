//! Enrollment: canonical re-encode, voiceprint check, registry upsert.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use tracing::{debug, info};
use voxgate_audio::wav;
use voxgate_voiceprint::{try_extract_with, VoiceprintModel};

use crate::registry::{validate_username, Enrollment, Registry};

/// Result of a successful enrollment.
#[derive(Debug, Clone)]
pub struct Enrolled {
    pub enrollment: Enrollment,
    pub sample_rate: u32,
    pub duration: Duration,
    /// The record that was overwritten, if the user was already enrolled.
    pub previous: Option<Enrollment>,
}

/// Path of the canonical enrollment audio for `username`.
pub fn voice_file(data_dir: &Path, username: &str) -> PathBuf {
    data_dir.join(format!("{username}.wav"))
}

/// Enrolls `username` from the audio file at `input`.
///
/// The audio is re-encoded into `data_dir`, checked for a usable voiceprint
/// with `model`, then recorded in `registry`. On failure the registry and any
/// previous enrollment audio are left untouched.
pub fn enroll<M: VoiceprintModel + ?Sized>(
    registry: &mut Registry,
    data_dir: &Path,
    username: &str,
    input: &Path,
    model: &M,
) -> anyhow::Result<Enrolled> {
    validate_username(username)?;
    fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;

    let target = voice_file(data_dir, username);
    let partial = data_dir.join(format!("{username}.wav.partial"));
    let backup = data_dir.join(format!("{username}.wav.bak"));

    let (sample_rate, duration) = match stage(input, &partial, model) {
        Ok(v) => v,
        Err(e) => {
            let _ = fs::remove_file(&partial);
            return Err(e);
        }
    };

    // The previous audio is parked in `backup` until the registry write lands.
    let had_previous = target.exists();
    if had_previous {
        if let Err(e) = fs::rename(&target, &backup) {
            let _ = fs::remove_file(&partial);
            return Err(e).with_context(|| format!("failed to back up {}", target.display()));
        }
    }
    let restore = || {
        if had_previous {
            let _ = fs::rename(&backup, &target);
        } else {
            let _ = fs::remove_file(&target);
        }
    };

    if let Err(e) = fs::rename(&partial, &target) {
        let _ = fs::remove_file(&partial);
        restore();
        return Err(e).with_context(|| format!("failed to store {}", target.display()));
    }
    debug!(path = %target.display(), "stored enrollment audio");

    let enrollment = Enrollment {
        username: username.to_string(),
        voice_file: target.clone(),
    };
    let previous = match registry.upsert(enrollment.clone()) {
        Ok(previous) => previous,
        Err(e) => {
            restore();
            return Err(e).context("failed to update enrollment registry");
        }
    };
    if had_previous {
        let _ = fs::remove_file(&backup);
    }
    info!(username, replaced = previous.is_some(), "enrolled");

    Ok(Enrolled {
        enrollment,
        sample_rate,
        duration,
        previous,
    })
}

fn stage<M: VoiceprintModel + ?Sized>(
    input: &Path,
    partial: &Path,
    model: &M,
) -> anyhow::Result<(u32, Duration)> {
    let signal = wav::normalize(input, partial)
        .with_context(|| format!("failed to re-encode {}", input.display()))?;
    try_extract_with(model, partial)
        .with_context(|| format!("no usable voiceprint in {}", input.display()))?;
    Ok((signal.sample_rate(), signal.duration()))
}
