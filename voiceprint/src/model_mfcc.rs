//! [`VoiceprintModel`] implementation using averaged MFCCs.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;
use voxgate_audio::mfcc::{self, Config as MfccConfig, Extractor};
use voxgate_audio::Signal;

use crate::model::VoiceprintModel;
use crate::{FeatureVector, VoiceprintError};

/// Sample rates whose extractors are kept. Each holds a full mel bank, so
/// further rates are built per call instead of cached.
const MAX_CACHED_RATES: usize = 8;

/// [`VoiceprintModel`] that averages per-frame MFCCs over the whole signal.
///
/// # Pipeline
///
/// 1. Signal at its native rate -> [`Extractor::extract`] -> `[T][n_mfcc]`
/// 2. Arithmetic mean of each coefficient over all `T` frames
///
/// # Thread Safety
///
/// Extractors are built lazily per sample rate and shared behind an
/// [`Arc`]; they are read-only, so concurrent `extract` calls never
/// share mutable buffers. At most eight rates are cached.
pub struct MfccModel {
    cfg: MfccConfig,
    extractors: RwLock<HashMap<u32, Arc<Extractor>>>,
}

impl MfccModel {
    /// Creates a model with the given MFCC configuration.
    pub fn new(cfg: MfccConfig) -> Self {
        Self {
            cfg,
            extractors: RwLock::new(HashMap::new()),
        }
    }

    fn extractor(&self, sample_rate: u32) -> Result<Arc<Extractor>, VoiceprintError> {
        if let Some(ex) = self.extractors.read().get(&sample_rate) {
            return Ok(Arc::clone(ex));
        }
        let ex = Arc::new(Extractor::new(self.cfg.clone(), sample_rate)?);
        let mut map = self.extractors.write();
        if map.len() >= MAX_CACHED_RATES && !map.contains_key(&sample_rate) {
            debug!(sample_rate, "extractor cache full, not caching rate");
            return Ok(ex);
        }
        Ok(Arc::clone(map.entry(sample_rate).or_insert(ex)))
    }
}

impl Default for MfccModel {
    fn default() -> Self {
        Self::new(MfccConfig::default())
    }
}

impl VoiceprintModel for MfccModel {
    fn extract(&self, signal: &Signal) -> Result<FeatureVector, VoiceprintError> {
        if signal.is_empty() {
            return Err(VoiceprintError::AudioTooShort { samples: 0 });
        }
        let extractor = self.extractor(signal.sample_rate())?;

        let frames = extractor.extract(signal.samples());
        let averaged = mfcc::mean(&frames).ok_or(VoiceprintError::AudioTooShort {
            samples: signal.len(),
        })?;

        debug!(
            sample_rate = signal.sample_rate(),
            samples = signal.len(),
            frames = frames.len(),
            "extracted mfcc voiceprint"
        );

        FeatureVector::new(averaged)
    }

    fn dimension(&self) -> usize {
        self.cfg.n_mfcc
    }
}
