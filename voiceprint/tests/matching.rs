//! End-to-end matching over WAV files written to a temp dir.

use std::f32::consts::PI;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;
use voxgate_voiceprint::{
    extract_features, match_voice, try_extract_features, MatchConfig, Matcher, Verdict,
    DEFAULT_THRESHOLD, FEATURE_DIM,
};

const RATE: u32 = 16000;

fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut w = WavWriter::create(path, spec).unwrap();
    for &s in samples {
        w.write_sample((s.clamp(-1.0, 1.0) * 32767.0) as i16).unwrap();
    }
    w.finalize().unwrap();
}

/// A crude voiced "phrase": harmonics of `f0` shaped by three formant
/// peaks, under a syllable-like amplitude envelope.
fn speaker(f0: f32, formants: [f32; 3], secs: f32) -> Vec<f32> {
    let n = (RATE as f32 * secs) as usize;
    let harmonics: Vec<(f32, f32)> = (1..)
        .map(|h| h as f32 * f0)
        .take_while(|&f| f < RATE as f32 / 2.0 - 200.0)
        .map(|f| {
            let gain: f32 = formants
                .iter()
                .map(|&c| 1.0 / (1.0 + ((f - c) / 120.0).powi(2)))
                .sum();
            (f, gain)
        })
        .collect();
    let norm: f32 = harmonics.iter().map(|(_, g)| g).sum();

    (0..n)
        .map(|i| {
            let t = i as f32 / RATE as f32;
            let envelope = (PI * 3.0 * t).sin().abs();
            let voiced: f32 = harmonics
                .iter()
                .map(|&(f, g)| g * (2.0 * PI * f * t).sin())
                .sum();
            0.6 * envelope * voiced / norm
        })
        .collect()
}

fn alice() -> Vec<f32> {
    speaker(110.0, [730.0, 1090.0, 2440.0], 2.0)
}

fn bob() -> Vec<f32> {
    speaker(220.0, [300.0, 2300.0, 3000.0], 2.0)
}

fn white_noise(secs: f32, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..(RATE as f32 * secs) as usize)
        .map(|_| rng.gen_range(-0.5f32..0.5))
        .collect()
}

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn wav(&self, name: &str, samples: &[f32]) -> PathBuf {
        let path = self.dir.path().join(name);
        write_wav(&path, samples, RATE);
        path
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

#[test]
fn extraction_is_deterministic() {
    let fx = Fixture::new();
    let path = fx.wav("alice.wav", &alice());

    let a = extract_features(&path).unwrap();
    let b = extract_features(&path).unwrap();
    assert_eq!(a.dimension(), FEATURE_DIM);
    assert_eq!(a.as_slice(), b.as_slice());
}

#[test]
fn identical_file_matches_at_distance_zero() {
    let fx = Fixture::new();
    let path = fx.wav("alice.wav", &alice());

    let verdict = Matcher::new(MatchConfig::default()).evaluate(&path, &path);
    assert_eq!(verdict, Verdict::Match { distance: 0.0 });

    for threshold in [0.0, 0.4, 1.0, 1e6] {
        assert!(match_voice(&path, &path, threshold), "threshold {threshold}");
    }
}

#[test]
fn different_speakers_do_not_match() {
    let fx = Fixture::new();
    let a = fx.wav("alice.wav", &alice());
    let b = fx.wav("bob.wav", &bob());

    let verdict = Matcher::new(MatchConfig::default()).evaluate(&a, &b);
    match verdict {
        Verdict::NoMatch { distance } => assert!(distance >= DEFAULT_THRESHOLD),
        other => panic!("expected no match, got {other:?}"),
    }
    assert!(!match_voice(&a, &b, DEFAULT_THRESHOLD));
}

#[test]
fn matching_is_symmetric() {
    let fx = Fixture::new();
    let a = fx.wav("alice.wav", &alice());
    let b = fx.wav("bob.wav", &bob());
    let matcher = Matcher::new(MatchConfig::default());

    let ab = matcher.evaluate(&a, &b);
    let ba = matcher.evaluate(&b, &a);
    assert_eq!(ab.distance(), ba.distance());

    for threshold in [0.1, 0.4, 5.0, 50.0, 500.0] {
        assert_eq!(
            match_voice(&a, &b, threshold),
            match_voice(&b, &a, threshold)
        );
    }
}

#[test]
fn threshold_is_monotonic() {
    let fx = Fixture::new();
    let a = fx.wav("alice.wav", &alice());
    let b = fx.wav("bob.wav", &bob());
    let distance = Matcher::new(MatchConfig::default())
        .evaluate(&a, &b)
        .distance()
        .unwrap();

    let mut matched = false;
    for threshold in [0.0, 0.4, distance / 2.0, distance, distance * 1.01, distance * 10.0] {
        let now = match_voice(&a, &b, threshold);
        assert!(!(matched && !now), "verdict flipped back at threshold {threshold}");
        matched |= now;
    }
    assert!(matched, "a large enough threshold must match");
}

#[test]
fn silence_enrollment_rejects_noise() {
    let fx = Fixture::new();
    let silence = fx.wav("silence.wav", &vec![0.0; RATE as usize * 2]);
    let noise = fx.wav("noise.wav", &white_noise(2.0, 7));

    assert!(try_extract_features(&silence).is_ok());
    assert!(try_extract_features(&noise).is_ok());

    let verdict = Matcher::new(MatchConfig::default()).evaluate(&silence, &noise);
    assert!(matches!(verdict, Verdict::NoMatch { .. }), "got {verdict:?}");
}

#[test]
fn zero_byte_probe_is_rejected() {
    let fx = Fixture::new();
    let enrolled = fx.wav("alice.wav", &alice());
    let probe = fx.path("probe.wav");
    std::fs::write(&probe, b"").unwrap();

    assert!(extract_features(&probe).is_none());
    assert!(matches!(
        Matcher::new(MatchConfig::default()).evaluate(&enrolled, &probe),
        Verdict::Indeterminate { .. }
    ));
    assert!(!match_voice(&enrolled, &probe, DEFAULT_THRESHOLD));
}

#[test]
fn missing_paths_return_false() {
    let fx = Fixture::new();
    let enrolled = fx.wav("alice.wav", &alice());
    let missing = fx.path("missing.wav");

    assert!(!match_voice(&enrolled, &missing, 1e9));
    assert!(!match_voice(&missing, &enrolled, 1e9));
    assert!(!match_voice(&missing, &missing, 1e9));
}

#[test]
fn cached_enrollment_follows_reenrollment() {
    let fx = Fixture::new();
    let enrolled = fx.wav("user.wav", &alice());
    let probe = fx.wav("probe.wav", &alice());
    let matcher = Matcher::new(MatchConfig::default()).with_cache();

    assert!(matcher.matches(&enrolled, &probe));
    assert!(matcher.matches(&enrolled, &probe));
    assert_eq!(matcher.cache().unwrap().len(), 1);

    // Re-enroll the same path with a different voice.
    write_wav(&enrolled, &bob(), RATE);
    assert!(!matcher.matches(&enrolled, &probe));

    matcher.invalidate(&enrolled);
    assert!(matcher.cache().unwrap().is_empty());
}

#[test]
fn native_sample_rate_is_kept() {
    let fx = Fixture::new();
    let path = fx.path("alice_44k.wav");
    let samples: Vec<f32> = (0..44100)
        .map(|i| 0.3 * (2.0 * PI * 440.0 * i as f32 / 44100.0).sin())
        .collect();
    write_wav(&path, &samples, 44100);

    let signal = voxgate_voiceprint::load_signal(&path).unwrap();
    assert_eq!(signal.sample_rate(), 44100);
    assert_eq!(extract_features(&path).unwrap().dimension(), FEATURE_DIM);
}
