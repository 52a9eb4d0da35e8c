use voxgate_audio::Signal;

use crate::{FeatureVector, VoiceprintError};

/// Extracts a fixed-length voiceprint from decoded audio.
///
/// The input is mono PCM at any sample rate; implementations analyze it
/// at its native rate. The output dimensionality is returned by
/// [`VoiceprintModel::dimension`] and is the same for every signal.
///
/// # Thread Safety
///
/// Implementations must be safe for concurrent use.
pub trait VoiceprintModel: Send + Sync {
    /// Computes a voiceprint from a decoded signal.
    fn extract(&self, signal: &Signal) -> Result<FeatureVector, VoiceprintError>;

    /// Returns the dimensionality of the vectors (e.g., 13).
    fn dimension(&self) -> usize;
}

impl<M: VoiceprintModel + ?Sized> VoiceprintModel for &M {
    fn extract(&self, signal: &Signal) -> Result<FeatureVector, VoiceprintError> {
        (**self).extract(signal)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }
}
