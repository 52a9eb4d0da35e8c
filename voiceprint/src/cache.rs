//! Enrollment voiceprint cache.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::debug;

use crate::extract::{decode_bytes, read_file};
use crate::model::VoiceprintModel;
use crate::{FeatureVector, VoiceprintError};

/// Caches voiceprints of enrollment files keyed by path.
///
/// Every lookup re-reads the file and compares its length and content
/// fingerprint with the cached entry, so a rewritten file is always
/// re-extracted. Only decoding and MFCC analysis are skipped on a hit.
///
/// Entries must come from a single model; the owning
/// [`Matcher`](crate::Matcher) guarantees that.
#[derive(Default)]
pub struct FeatureCache {
    entries: RwLock<HashMap<PathBuf, Entry>>,
}

struct Entry {
    len: usize,
    fingerprint: u64,
    features: FeatureVector,
}

impl FeatureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached voiceprint for `path` if the file is unchanged,
    /// otherwise extracts it with `model` and stores the result.
    pub fn get_or_extract<M: VoiceprintModel + ?Sized>(
        &self,
        model: &M,
        path: &Path,
    ) -> Result<FeatureVector, VoiceprintError> {
        let bytes = match read_file(path) {
            Ok(b) => b,
            Err(e) => {
                self.invalidate(path);
                return Err(e);
            }
        };
        let len = bytes.len();
        let fingerprint = fingerprint(&bytes);

        if let Some(entry) = self.entries.read().get(path) {
            if entry.len == len && entry.fingerprint == fingerprint {
                debug!(path = %path.display(), "voiceprint cache hit");
                return Ok(entry.features.clone());
            }
        }

        let features = match decode_bytes(bytes).and_then(|signal| model.extract(&signal)) {
            Ok(f) => f,
            Err(e) => {
                self.invalidate(path);
                return Err(e);
            }
        };

        self.entries.write().insert(
            path.to_path_buf(),
            Entry {
                len,
                fingerprint,
                features: features.clone(),
            },
        );
        Ok(features)
    }

    /// Drops the entry for `path`. Returns whether one was present.
    pub fn invalidate(&self, path: &Path) -> bool {
        self.entries.write().remove(path).is_some()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

fn fingerprint(bytes: &[u8]) -> u64 {
    let mut h = DefaultHasher::new();
    bytes.hash(&mut h);
    h.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MfccModel;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use voxgate_audio::{wav, Signal};

    /// Counts how many times the wrapped model actually runs.
    struct CountingModel {
        inner: MfccModel,
        calls: AtomicUsize,
    }

    impl VoiceprintModel for CountingModel {
        fn extract(&self, signal: &Signal) -> Result<FeatureVector, VoiceprintError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.extract(signal)
        }

        fn dimension(&self) -> usize {
            self.inner.dimension()
        }
    }

    fn counting() -> CountingModel {
        CountingModel {
            inner: MfccModel::default(),
            calls: AtomicUsize::new(0),
        }
    }

    fn tone(freq: f32) -> Signal {
        let samples = (0..8000)
            .map(|i| 0.3 * (2.0 * std::f32::consts::PI * freq * i as f32 / 16000.0).sin())
            .collect();
        Signal::new(samples, 16000)
    }

    #[test]
    fn hit_skips_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alice.wav");
        wav::write(&path, &tone(200.0)).unwrap();

        let model = counting();
        let cache = FeatureCache::new();
        let a = cache.get_or_extract(&model, &path).unwrap();
        let b = cache.get_or_extract(&model, &path).unwrap();

        assert_eq!(a, b);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn rewritten_file_is_reextracted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alice.wav");
        wav::write(&path, &tone(200.0)).unwrap();

        let model = counting();
        let cache = FeatureCache::new();
        let before = cache.get_or_extract(&model, &path).unwrap();

        // Same length, different content.
        wav::write(&path, &tone(1800.0)).unwrap();
        let after = cache.get_or_extract(&model, &path).unwrap();

        assert_ne!(before, after);
        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn invalidate_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bob.wav");
        wav::write(&path, &tone(500.0)).unwrap();

        let model = MfccModel::default();
        let cache = FeatureCache::new();
        cache.get_or_extract(&model, &path).unwrap();
        assert!(cache.invalidate(&path));
        assert!(!cache.invalidate(&path));
        assert!(cache.is_empty());

        cache.get_or_extract(&model, &path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            cache.get_or_extract(&model, &path),
            Err(VoiceprintError::NotFound { .. })
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn clear() {
        let dir = tempfile::tempdir().unwrap();
        let model = MfccModel::default();
        let cache = FeatureCache::new();
        for name in ["a.wav", "b.wav"] {
            let path = dir.path().join(name);
            wav::write(&path, &tone(440.0)).unwrap();
            cache.get_or_extract(&model, &path).unwrap();
        }
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }
}
