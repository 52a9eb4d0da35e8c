//! Speaker verification by comparing averaged MFCC voiceprints.
//!
//! # Architecture
//!
//! The pipeline processes one enrollment sample and one probe sample:
//!
//! 1. Decode: WAV file -> mono [`Signal`](voxgate_audio::Signal) at its native rate
//! 2. [`VoiceprintModel::extract`]: signal -> 13-dim [`FeatureVector`] (mean MFCC)
//! 3. [`Matcher::compare`]: Euclidean distance -> [`Verdict`]
//!
//! # Verdicts
//!
//! ```text
//! Match         distance <  threshold (or distance == 0)
//! NoMatch       distance >= threshold
//! Indeterminate a sample could not be read, decoded or analyzed
//! ```
//!
//! Callers that only need a boolean use [`match_voice`] or
//! [`Matcher::matches`]; `Indeterminate` reads as `false` there.
//!
//! # Example
//!
//! ```no_run
//! use voxgate_voiceprint::{match_voice, MatchConfig, Matcher};
//!
//! let ok = match_voice("uploads/alice.wav", "uploads/login.wav", 0.4);
//!
//! let matcher = Matcher::new(MatchConfig::default()).with_cache();
//! let verdict = matcher.evaluate("uploads/alice.wav", "uploads/login.wav");
//! println!("{ok} {verdict}");
//! ```

mod cache;
mod error;
mod extract;
mod matcher;
mod model;
mod model_mfcc;
mod voiceprint;

pub use cache::FeatureCache;
pub use error::VoiceprintError;
pub use extract::{extract_features, load_signal, try_extract_features, try_extract_with};
pub use matcher::{match_voice, MatchConfig, Matcher, DEFAULT_THRESHOLD};
pub use model::VoiceprintModel;
pub use model_mfcc::MfccModel;
pub use voiceprint::{euclidean_distance, FeatureVector, Verdict, FEATURE_DIM};
pub use voxgate_audio::mfcc::Config as MfccConfig;
