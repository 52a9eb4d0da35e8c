//! Mel-frequency cepstral coefficient extraction from PCM audio.
//!
//! Output is a `[T, n_mfcc]` f32 matrix, one row per analysis frame.
//!
//! Default parameters follow the librosa convention, so that distances
//! between averaged coefficients keep the same scale:
//! - Centered frames (zero padded by `n_fft / 2` on both sides)
//! - FFTSize: 2048
//! - HopSize: 512
//! - Window: periodic Hann
//! - NumMels: 128, Slaney scale and normalization, 0 Hz to Nyquist
//! - Power to dB with an 80 dB dynamic range floor
//! - Orthonormal DCT-II, 13 coefficients
//!
//! The sample rate is not part of [`Config`]: an [`Extractor`] is built
//! for the native rate of the signal it analyzes.

mod dct;
mod fft;
mod mel;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use mel::MelScale;

/// Floor applied to mel power before taking the log.
const AMIN: f64 = 1e-10;

/// Errors returned when an MFCC configuration cannot be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MfccError {
    #[error("mfcc: n_fft must be a power of two, got {0}")]
    FftSize(usize),

    #[error("mfcc: hop_length must be positive")]
    HopLength,

    #[error("mfcc: n_mfcc must be in 1..={n_mels}, got {n_mfcc}")]
    CoefficientCount { n_mfcc: usize, n_mels: usize },

    #[error("mfcc: sample rate must be positive")]
    SampleRate,

    #[error("mfcc: invalid band {fmin} Hz .. {fmax} Hz at {sample_rate} Hz")]
    Band { fmin: f64, fmax: f64, sample_rate: u32 },
}

/// Configuration for MFCC extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub n_fft: usize,
    pub hop_length: usize,
    pub n_mels: usize,
    pub n_mfcc: usize,
    pub fmin: f64,
    /// Upper band edge in Hz. `None` means Nyquist.
    pub fmax: Option<f64>,
    /// Dynamic range kept below the loudest mel value, in dB. `None` keeps everything.
    pub top_db: Option<f64>,
    /// Pad the signal so frame `t` is centered at sample `t * hop_length`.
    pub center: bool,
    pub mel_scale: MelScale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            n_fft: 2048,
            hop_length: 512,
            n_mels: 128,
            n_mfcc: 13,
            fmin: 0.0,
            fmax: None,
            top_db: Some(80.0),
            center: true,
            mel_scale: MelScale::Slaney,
        }
    }
}

impl Config {
    /// Checks that the configuration can analyze audio at `sample_rate`.
    pub fn validate(&self, sample_rate: u32) -> Result<(), MfccError> {
        if self.n_fft == 0 || !self.n_fft.is_power_of_two() {
            return Err(MfccError::FftSize(self.n_fft));
        }
        if self.hop_length == 0 {
            return Err(MfccError::HopLength);
        }
        if self.n_mfcc == 0 || self.n_mfcc > self.n_mels {
            return Err(MfccError::CoefficientCount {
                n_mfcc: self.n_mfcc,
                n_mels: self.n_mels,
            });
        }
        if sample_rate == 0 {
            return Err(MfccError::SampleRate);
        }
        let nyquist = sample_rate as f64 / 2.0;
        let fmax = self.fmax.unwrap_or(nyquist);
        if !(self.fmin >= 0.0 && self.fmin < fmax && fmax <= nyquist) {
            return Err(MfccError::Band {
                fmin: self.fmin,
                fmax,
                sample_rate,
            });
        }
        Ok(())
    }
}

/// MFCC extractor bound to one sample rate.
///
/// Holds only precomputed tables; `extract` allocates its own scratch
/// buffers, so a single extractor can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct Extractor {
    cfg: Config,
    window: Vec<f64>,
    mel_bank: Vec<Vec<f64>>,
    dct: dct::Dct,
    fft: fft::Fft,
}

impl Extractor {
    /// Creates an extractor for audio sampled at `sample_rate` Hz.
    pub fn new(cfg: Config, sample_rate: u32) -> Result<Self, MfccError> {
        cfg.validate(sample_rate)?;
        let fmax = cfg.fmax.unwrap_or(sample_rate as f64 / 2.0);
        let window = mel::hann_window(cfg.n_fft);
        let mel_bank = mel::mel_filter_bank(
            cfg.n_mels,
            cfg.n_fft,
            sample_rate,
            cfg.fmin,
            fmax,
            cfg.mel_scale,
        );
        let dct = dct::Dct::new(cfg.n_mels, cfg.n_mfcc);
        let fft = fft::Fft::new(cfg.n_fft);
        Ok(Self {
            cfg,
            window,
            mel_bank,
            dct,
            fft,
        })
    }

    /// Number of frames produced for a signal of `len` samples.
    pub fn num_frames(&self, len: usize) -> usize {
        let cfg = &self.cfg;
        if len == 0 {
            0
        } else if cfg.center {
            1 + len / cfg.hop_length
        } else if len < cfg.n_fft {
            0
        } else {
            1 + (len - cfg.n_fft) / cfg.hop_length
        }
    }

    /// Computes the log-power mel spectrogram in dB, `[T][n_mels]`.
    pub fn mel_spectrogram_db(&self, pcm: &[f32]) -> Vec<Vec<f64>> {
        let cfg = &self.cfg;
        let num_frames = self.num_frames(pcm.len());
        let nfft = cfg.n_fft;
        let half_fft = nfft / 2 + 1;
        let pad = if cfg.center { nfft / 2 } else { 0 };

        let mut spec = Vec::with_capacity(num_frames);
        let mut real = vec![0.0f64; nfft];
        let mut imag = vec![0.0f64; nfft];
        let mut power = vec![0.0f64; half_fft];
        let mut peak = f64::NEG_INFINITY;

        for t in 0..num_frames {
            // Frame start in padded coordinates; samples outside the signal are zero.
            let start = t * cfg.hop_length;
            for i in 0..nfft {
                let s = (start + i)
                    .checked_sub(pad)
                    .and_then(|idx| pcm.get(idx))
                    .map_or(0.0, |&v| v as f64);
                real[i] = s * self.window[i];
                imag[i] = 0.0;
            }

            self.fft.process(&mut real, &mut imag);

            for k in 0..half_fft {
                power[k] = real[k] * real[k] + imag[k] * imag[k];
            }

            let mut mel = vec![0.0f64; cfg.n_mels];
            for (m, filter) in self.mel_bank.iter().enumerate() {
                let sum: f64 = filter.iter().zip(&power).map(|(w, p)| w * p).sum();
                let db = 10.0 * sum.max(AMIN).log10();
                peak = peak.max(db);
                mel[m] = db;
            }
            spec.push(mel);
        }

        if let Some(top_db) = cfg.top_db {
            let floor = peak - top_db;
            for frame in spec.iter_mut() {
                for v in frame.iter_mut() {
                    *v = v.max(floor);
                }
            }
        }

        spec
    }

    /// Extracts MFCCs from normalized f32 PCM samples (range [-1, 1]).
    ///
    /// Returns `[T][n_mfcc]`; empty when the signal is too short for a frame.
    pub fn extract(&self, pcm: &[f32]) -> Vec<Vec<f32>> {
        let spec = self.mel_spectrogram_db(pcm);
        let mut coeffs = vec![0.0f64; self.cfg.n_mfcc];
        spec.iter()
            .map(|frame| {
                self.dct.apply(frame, &mut coeffs);
                coeffs.iter().map(|&c| c as f32).collect()
            })
            .collect()
    }
}

/// Averages `[T][D]` features over time into one `D`-vector.
///
/// Returns `None` for an empty matrix or ragged rows.
pub fn mean(features: &[Vec<f32>]) -> Option<Vec<f32>> {
    let first = features.first()?;
    let dim = first.len();
    let mut sum = vec![0.0f64; dim];
    for row in features {
        if row.len() != dim {
            return None;
        }
        for (acc, &v) in sum.iter_mut().zip(row) {
            *acc += v as f64;
        }
    }
    let t = features.len() as f64;
    Some(sum.into_iter().map(|s| (s / t) as f32).collect())
}
