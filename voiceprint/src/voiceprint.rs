use std::fmt;

use serde::{Deserialize, Serialize};

use crate::VoiceprintError;

/// Number of cepstral coefficients in a voiceprint.
pub const FEATURE_DIM: usize = 13;

/// Time-averaged MFCCs of one audio signal.
///
/// Vectors are only comparable when produced with the same extraction
/// parameters. A vector always holds finite values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    /// Wraps coefficients. Fails on an empty vector or non-finite values.
    pub fn new(values: Vec<f32>) -> Result<Self, VoiceprintError> {
        if values.is_empty() {
            return Err(VoiceprintError::DimensionMismatch {
                expected: FEATURE_DIM,
                got: 0,
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(VoiceprintError::NonFinite);
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &FeatureVector) -> Result<f64, VoiceprintError> {
        euclidean_distance(&self.0, &other.0)
    }
}

impl TryFrom<Vec<f32>> for FeatureVector {
    type Error = VoiceprintError;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<FeatureVector> for Vec<f32> {
    fn from(v: FeatureVector) -> Self {
        v.0
    }
}

/// Computes the L2 distance between two vectors.
///
/// Uses f64 intermediate precision. Vectors of different length are an
/// error rather than being truncated.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> Result<f64, VoiceprintError> {
    if a.len() != b.len() {
        return Err(VoiceprintError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum();
    Ok(sum.sqrt())
}

/// Outcome of one enrollment-to-probe comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Same speaker within the threshold.
    Match { distance: f64 },
    /// Both samples were analyzed and are too far apart.
    NoMatch { distance: f64 },
    /// At least one sample could not be analyzed.
    Indeterminate { reason: String },
}

impl Verdict {
    /// The boolean callers gate access on. Only [`Verdict::Match`] is true.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }

    /// Distance used for the decision, when both samples were analyzed.
    pub fn distance(&self) -> Option<f64> {
        match self {
            Self::Match { distance } | Self::NoMatch { distance } => Some(*distance),
            Self::Indeterminate { .. } => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match { distance } => write!(f, "match (distance {distance:.4})"),
            Self::NoMatch { distance } => write!(f, "no match (distance {distance:.4})"),
            Self::Indeterminate { reason } => write!(f, "indeterminate: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_basic() {
        let d = euclidean_distance(&[0.0, 3.0], &[4.0, 0.0]).unwrap();
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn euclidean_identical_is_zero() {
        let v = [1.5f32, -2.25, 1e6];
        assert_eq!(euclidean_distance(&v, &v).unwrap(), 0.0);
    }

    #[test]
    fn euclidean_dimension_mismatch() {
        let err = euclidean_distance(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            VoiceprintError::DimensionMismatch {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn feature_vector_rejects_bad_values() {
        assert!(FeatureVector::new(vec![]).is_err());
        assert!(matches!(
            FeatureVector::new(vec![1.0, f32::NAN]),
            Err(VoiceprintError::NonFinite)
        ));
        assert!(FeatureVector::new(vec![f32::INFINITY]).is_err());
    }

    #[test]
    fn feature_vector_json() {
        let v = FeatureVector::new(vec![1.0, -2.5]).unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[1.0,-2.5]");
        let back: FeatureVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
        assert!(serde_json::from_str::<FeatureVector>("[]").is_err());
    }

    #[test]
    fn verdict_accessors() {
        let m = Verdict::Match { distance: 0.1 };
        let n = Verdict::NoMatch { distance: 3.0 };
        let i = Verdict::Indeterminate {
            reason: "missing".into(),
        };
        assert!(m.is_match());
        assert!(!n.is_match());
        assert!(!i.is_match());
        assert_eq!(n.distance(), Some(3.0));
        assert_eq!(i.distance(), None);
    }

    #[test]
    fn verdict_display() {
        assert_eq!(Verdict::Match { distance: 0.0 }.to_string(), "match (distance 0.0000)");
        assert_eq!(
            Verdict::Indeterminate {
                reason: "bad header".into()
            }
            .to_string(),
            "indeterminate: bad header"
        );
    }

    #[test]
    fn verdict_serializes_tagged() {
        let json = serde_json::to_value(Verdict::NoMatch { distance: 1.5 }).unwrap();
        assert_eq!(json["verdict"], "no_match");
        assert_eq!(json["distance"], 1.5);
    }
}
