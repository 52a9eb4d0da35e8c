//! Audio front-end for voiceprint matching.
//!
//! This crate provides:
//!
//! - [`Signal`]: decoded mono PCM at its native sample rate
//! - [`wav`]: WAV decoding and canonical 16-bit re-encoding
//! - [`mfcc`]: mel-frequency cepstral coefficient extraction
//!
//! # Example
//!
//! ```rust
//! use voxgate_audio::mfcc::{self, Config, Extractor};
//! use voxgate_audio::Signal;
//!
//! // 1 second of a 440 Hz tone at 16 kHz
//! let samples: Vec<f32> = (0..16000)
//!     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 16000.0).sin() * 0.5)
//!     .collect();
//! let signal = Signal::new(samples, 16000);
//!
//! let extractor = Extractor::new(Config::default(), signal.sample_rate()).unwrap();
//! let frames = extractor.extract(signal.samples());
//! let averaged = mfcc::mean(&frames).unwrap();
//! assert_eq!(averaged.len(), 13);
//! ```

pub mod mfcc;
mod signal;
pub mod wav;

pub use signal::Signal;
