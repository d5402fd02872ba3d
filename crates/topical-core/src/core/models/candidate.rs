use super::features::FeatureVector;
use serde::{Deserialize, Serialize};

/// Predicted properties attached to a candidate by the scoring engine.
///
/// Irritation and QC fail probability lie in `[0, 1]`, stability in `[15, 365]` days.
/// Permeability is a 0-100 score without an upper clamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Predictions {
    pub permeability: f64,
    pub irritation: f64,
    pub stability: f64,
    pub qc_fail_prob: f64,
}

/// A candidate formulation together with its predicted properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate {
    pub features: FeatureVector,
    pub predictions: Predictions,
}

impl ScoredCandidate {
    pub fn new(features: FeatureVector, predictions: Predictions) -> Self {
        Self {
            features,
            predictions,
        }
    }
}
