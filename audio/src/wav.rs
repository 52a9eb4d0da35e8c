//! WAV decode and canonical re-encode via `hound`.
//!
//! Decoding keeps the file's native sample rate and reduces any channel
//! layout to mono. Encoding always writes 16-bit PCM mono, which is the
//! canonical container uploads are normalized to before comparison.

use std::io::Read;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use thiserror::Error;

use crate::Signal;

/// Errors returned by WAV decode/encode.
#[derive(Debug, Error)]
pub enum WavError {
    #[error("wav: {0}")]
    Hound(#[from] hound::Error),

    #[error("wav: no samples")]
    Empty,

    #[error("wav: unsupported format: {bits}-bit {format}, {channels} channel(s) at {sample_rate} Hz")]
    Unsupported {
        format: &'static str,
        bits: u16,
        channels: u16,
        sample_rate: u32,
    },
}

const PCM16_SCALE: f64 = 32768.0;

/// Decodes a WAV file into a mono signal at its native sample rate.
pub fn read(path: impl AsRef<Path>) -> Result<Signal, WavError> {
    let reader = WavReader::open(path)?;
    decode_reader(reader)
}

/// Decodes WAV bytes from any reader.
pub fn decode<R: Read>(reader: R) -> Result<Signal, WavError> {
    let reader = WavReader::new(reader)?;
    decode_reader(reader)
}

fn decode_reader<R: Read>(mut wav: WavReader<R>) -> Result<Signal, WavError> {
    let spec = wav.spec();
    let unsupported = || WavError::Unsupported {
        format: match spec.sample_format {
            SampleFormat::Int => "int",
            SampleFormat::Float => "float",
        },
        bits: spec.bits_per_sample,
        channels: spec.channels,
        sample_rate: spec.sample_rate,
    };
    if spec.channels == 0 || spec.sample_rate == 0 {
        return Err(unsupported());
    }

    let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => wav.samples::<f32>().collect::<Result<_, _>>()?,
        (SampleFormat::Int, bits @ 8..=32) => {
            let scale = 1.0 / (1u64 << (bits - 1)) as f64;
            wav.samples::<i32>()
                .map(|s| s.map(|v| (v as f64 * scale) as f32))
                .collect::<Result<_, _>>()?
        }
        _ => return Err(unsupported()),
    };

    let signal = Signal::from_interleaved(&interleaved, spec.channels, spec.sample_rate);
    if signal.is_empty() {
        return Err(WavError::Empty);
    }
    Ok(signal)
}

/// Writes `signal` as 16-bit PCM mono WAV at the signal's sample rate.
///
/// Quantization is the exact inverse of 16-bit decoding, so canonical input
/// is rewritten sample for sample. Out-of-range samples saturate.
pub fn write(path: impl AsRef<Path>, signal: &Signal) -> Result<(), WavError> {
    if signal.is_empty() {
        return Err(WavError::Empty);
    }
    let spec = WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for &s in signal.samples() {
        let v = (s as f64 * PCM16_SCALE)
            .round()
            .clamp(i16::MIN as f64, i16::MAX as f64) as i16;
        writer.write_sample(v)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Decodes `input` and rewrites it to `output` in the canonical format.
///
/// Returns the decoded signal so callers can reuse it without a second decode.
pub fn normalize(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Signal, WavError> {
    let signal = read(input)?;
    write(output, &signal)?;
    Ok(signal)
}
