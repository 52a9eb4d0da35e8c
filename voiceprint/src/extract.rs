//! File-path adapters over [`VoiceprintModel`].
//!
//! Decoding is a thin layer: the file is read into memory, decoded as WAV
//! at its native rate, and handed to the model as a [`Signal`].

use std::io::{Cursor, ErrorKind};
use std::path::Path;

use tracing::warn;
use voxgate_audio::{wav, Signal};

use crate::model::VoiceprintModel;
use crate::model_mfcc::MfccModel;
use crate::{FeatureVector, VoiceprintError};

/// Reads the whole file, mapping a missing file to [`VoiceprintError::NotFound`].
pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>, VoiceprintError> {
    std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => VoiceprintError::NotFound {
            path: path.to_path_buf(),
        },
        _ => VoiceprintError::Io(e),
    })
}

/// Decodes WAV bytes into a mono signal.
pub(crate) fn decode_bytes(bytes: Vec<u8>) -> Result<Signal, VoiceprintError> {
    Ok(wav::decode(Cursor::new(bytes))?)
}

/// Loads and decodes the audio file at `path`.
pub fn load_signal(path: impl AsRef<Path>) -> Result<Signal, VoiceprintError> {
    let path = path.as_ref();
    decode_bytes(read_file(path)?)
}

/// Extracts a voiceprint from the file at `path` with `model`.
pub fn try_extract_with<M: VoiceprintModel + ?Sized>(
    model: &M,
    path: impl AsRef<Path>,
) -> Result<FeatureVector, VoiceprintError> {
    let signal = load_signal(path)?;
    model.extract(&signal)
}

/// Extracts the default 13-coefficient voiceprint, exposing the failure reason.
pub fn try_extract_features(path: impl AsRef<Path>) -> Result<FeatureVector, VoiceprintError> {
    try_extract_with(&MfccModel::default(), path)
}

/// Extracts the default 13-coefficient voiceprint.
///
/// Returns `None` for a missing, unreadable, empty or undecodable file.
/// The reason is logged at warn level.
pub fn extract_features(path: impl AsRef<Path>) -> Option<FeatureVector> {
    let path = path.as_ref();
    match try_extract_features(path) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "feature extraction failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FEATURE_DIM;
    use hound::{SampleFormat, WavSpec, WavWriter};

    fn write_tone(path: &Path, freq: f32, sample_rate: u32, n: usize) {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut w = WavWriter::create(path, spec).unwrap();
        for i in 0..n {
            let t = i as f32 / sample_rate as f32;
            let s = (0.4 * (2.0 * std::f32::consts::PI * freq * t).sin() * 32767.0) as i16;
            w.write_sample(s).unwrap();
        }
        w.finalize().unwrap();
    }

    #[test]
    fn extracts_from_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_tone(&path, 440.0, 16000, 16000);

        let v = extract_features(&path).unwrap();
        assert_eq!(v.dimension(), FEATURE_DIM);
    }

    #[test]
    fn missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.wav");
        assert!(extract_features(&path).is_none());
        assert!(matches!(
            try_extract_features(&path),
            Err(VoiceprintError::NotFound { .. })
        ));
    }

    #[test]
    fn zero_byte_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.wav");
        std::fs::write(&path, b"").unwrap();
        assert!(extract_features(&path).is_none());
        assert!(matches!(
            try_extract_features(&path),
            Err(VoiceprintError::Audio(_))
        ));
    }

    #[test]
    fn directory_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(extract_features(dir.path()).is_none());
    }

    #[test]
    fn file_matches_in_memory_signal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_tone(&path, 330.0, 22050, 11025);

        let model = MfccModel::default();
        let signal = load_signal(&path).unwrap();
        assert_eq!(signal.sample_rate(), 22050);
        assert_eq!(
            try_extract_with(&model, &path).unwrap(),
            model.extract(&signal).unwrap()
        );
    }
}
