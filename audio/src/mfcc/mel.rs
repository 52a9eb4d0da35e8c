//! Mel-scale utilities, analysis window and filterbank generation.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

// Slaney scale: linear up to 1 kHz, logarithmic above.
const SLANEY_F_SP: f64 = 200.0 / 3.0;
const SLANEY_MIN_LOG_HZ: f64 = 1000.0;
const SLANEY_MIN_LOG_MEL: f64 = SLANEY_MIN_LOG_HZ / SLANEY_F_SP;

fn slaney_log_step() -> f64 {
    6.4f64.ln() / 27.0
}

/// Hz to mel mapping used to place the filterbank centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MelScale {
    /// Auditory Toolbox scale (Slaney 1998).
    #[default]
    Slaney,
    /// `2595 * log10(1 + hz / 700)`.
    Htk,
}

impl MelScale {
    /// Converts frequency in Hz to mel.
    pub fn hz_to_mel(self, hz: f64) -> f64 {
        match self {
            Self::Htk => 2595.0 * (1.0 + hz / 700.0).log10(),
            Self::Slaney => {
                if hz >= SLANEY_MIN_LOG_HZ {
                    SLANEY_MIN_LOG_MEL + (hz / SLANEY_MIN_LOG_HZ).ln() / slaney_log_step()
                } else {
                    hz / SLANEY_F_SP
                }
            }
        }
    }

    /// Converts mel back to Hz.
    pub fn mel_to_hz(self, mel: f64) -> f64 {
        match self {
            Self::Htk => 700.0 * (10.0_f64.powf(mel / 2595.0) - 1.0),
            Self::Slaney => {
                if mel >= SLANEY_MIN_LOG_MEL {
                    SLANEY_MIN_LOG_HZ * (slaney_log_step() * (mel - SLANEY_MIN_LOG_MEL)).exp()
                } else {
                    SLANEY_F_SP * mel
                }
            }
        }
    }
}

/// Periodic Hann window of length `n`.
pub fn hann_window(n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![1.0; n];
    }
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / n as f64).cos())
        .collect()
}

/// Creates the area-normalized triangular mel filterbank.
///
/// Returns `[num_mels][half_fft]` where `half_fft = fft_size / 2 + 1`.
/// Filters are placed at `num_mels + 2` points equally spaced on `scale`
/// between `low_freq` and `high_freq`, and each filter is scaled by
/// `2 / (upper_hz - lower_hz)` so every band carries the same energy.
pub fn mel_filter_bank(
    num_mels: usize,
    fft_size: usize,
    sample_rate: u32,
    low_freq: f64,
    high_freq: f64,
    scale: MelScale,
) -> Vec<Vec<f64>> {
    let half_fft = fft_size / 2 + 1;
    let bin_hz = sample_rate as f64 / fft_size as f64;

    let low_mel = scale.hz_to_mel(low_freq);
    let high_mel = scale.hz_to_mel(high_freq);
    let step = (high_mel - low_mel) / (num_mels + 1) as f64;
    let edges: Vec<f64> = (0..num_mels + 2)
        .map(|i| scale.mel_to_hz(low_mel + i as f64 * step))
        .collect();

    let mut bank = Vec::with_capacity(num_mels);
    for m in 0..num_mels {
        let (lower, center, upper) = (edges[m], edges[m + 1], edges[m + 2]);
        let rise = center - lower;
        let fall = upper - center;
        let norm = if upper > lower { 2.0 / (upper - lower) } else { 0.0 };

        let filter = (0..half_fft)
            .map(|k| {
                let hz = k as f64 * bin_hz;
                let up = if rise > 0.0 { (hz - lower) / rise } else { 0.0 };
                let down = if fall > 0.0 { (upper - hz) / fall } else { 0.0 };
                up.min(down).max(0.0) * norm
            })
            .collect();
        bank.push(filter);
    }
    bank
}
