use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use voxgate_audio::Signal;

use crate::cache::FeatureCache;
use crate::extract::try_extract_with;
use crate::model::VoiceprintModel;
use crate::model_mfcc::MfccModel;
use crate::{FeatureVector, Verdict, VoiceprintError};

/// Default maximum distance for two voiceprints to match.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Configuration for [`Matcher`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Maximum Euclidean distance still considered the same speaker (default: 0.4).
    pub threshold: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl MatchConfig {
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Applies the threshold to a distance.
    ///
    /// A match needs `distance < threshold`. A distance of exactly zero
    /// matches for every non-negative threshold, including zero.
    pub fn decide(&self, distance: f64) -> Verdict {
        let hit = distance < self.threshold || (distance == 0.0 && self.threshold >= 0.0);
        if hit {
            Verdict::Match { distance }
        } else {
            Verdict::NoMatch { distance }
        }
    }
}

/// Compares an enrollment sample against a probe sample.
///
/// Extraction failures never escape: they become
/// [`Verdict::Indeterminate`], which reads as `false` through
/// [`Matcher::matches`].
pub struct Matcher<M = MfccModel> {
    model: M,
    cfg: MatchConfig,
    cache: Option<FeatureCache>,
}

impl Matcher<MfccModel> {
    /// Creates a matcher over the default 13-coefficient MFCC model.
    pub fn new(cfg: MatchConfig) -> Self {
        Self::with_model(MfccModel::default(), cfg)
    }
}

impl Default for Matcher<MfccModel> {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

impl<M: VoiceprintModel> Matcher<M> {
    /// Creates a matcher over a custom model.
    pub fn with_model(model: M, cfg: MatchConfig) -> Self {
        Self {
            model,
            cfg,
            cache: None,
        }
    }

    /// Enables the enrollment voiceprint cache.
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(FeatureCache::new());
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn cache(&self) -> Option<&FeatureCache> {
        self.cache.as_ref()
    }

    /// Drops any cached voiceprint for an enrollment file. Call after
    /// re-enrolling a user.
    pub fn invalidate(&self, enrolled: impl AsRef<Path>) {
        if let Some(cache) = &self.cache {
            cache.invalidate(enrolled.as_ref());
        }
    }

    /// Compares two audio files and reports why the decision was made.
    pub fn evaluate(&self, enrolled: impl AsRef<Path>, probe: impl AsRef<Path>) -> Verdict {
        let enrolled = enrolled.as_ref();
        let probe = probe.as_ref();

        let reference = match &self.cache {
            Some(cache) => cache.get_or_extract(&self.model, enrolled),
            None => try_extract_with(&self.model, enrolled),
        };
        let candidate = try_extract_with(&self.model, probe);

        match (reference, candidate) {
            (Ok(a), Ok(b)) => self.compare(&a, &b),
            (Err(e), _) => indeterminate("enrolled", enrolled, e),
            (_, Err(e)) => indeterminate("probe", probe, e),
        }
    }

    /// Compares two audio files. False when they differ or when either
    /// cannot be analyzed.
    pub fn matches(&self, enrolled: impl AsRef<Path>, probe: impl AsRef<Path>) -> bool {
        self.evaluate(enrolled, probe).is_match()
    }

    /// Compares two decoded signals.
    pub fn compare_signals(&self, enrolled: &Signal, probe: &Signal) -> Verdict {
        match (self.model.extract(enrolled), self.model.extract(probe)) {
            (Ok(a), Ok(b)) => self.compare(&a, &b),
            (Err(e), _) | (_, Err(e)) => Verdict::Indeterminate {
                reason: e.to_string(),
            },
        }
    }

    /// Compares two voiceprints.
    pub fn compare(&self, enrolled: &FeatureVector, probe: &FeatureVector) -> Verdict {
        match enrolled.distance(probe) {
            Ok(distance) => {
                let verdict = self.cfg.decide(distance);
                debug!(
                    distance,
                    threshold = self.cfg.threshold,
                    matched = verdict.is_match(),
                    "compared voiceprints"
                );
                verdict
            }
            Err(e) => Verdict::Indeterminate {
                reason: e.to_string(),
            },
        }
    }
}

fn indeterminate(side: &str, path: &Path, err: VoiceprintError) -> Verdict {
    warn!(side, path = %path.display(), error = %err, "voiceprint unavailable");
    Verdict::Indeterminate {
        reason: format!("{side} sample {}: {err}", path.display()),
    }
}

/// Returns whether `probe` is the same speaker as `enrolled` within `threshold`.
///
/// Missing or undecodable files yield `false`; this function never panics
/// on bad input.
pub fn match_voice(enrolled: impl AsRef<Path>, probe: impl AsRef<Path>, threshold: f64) -> bool {
    Matcher::new(MatchConfig::with_threshold(threshold)).matches(enrolled, probe)
}
