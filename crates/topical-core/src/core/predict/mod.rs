//! # Predict Module
//!
//! The seam between the proposal pipeline and whatever produces property predictions.
//!
//! The pipeline never depends on how a model was trained or persisted. It only needs a
//! [`PropertyModel`] per predicted property, each able to produce a point prediction and,
//! for classifiers, a probability over the fixed 8-field [`FeatureVector`] schema. The four
//! models are bundled into a [`PredictiveModelSet`] and injected by the caller.
//!
//! [`surrogate`] provides an analytic model set derived from the response surfaces used to
//! synthesize the demo's experiment data, so the pipeline can run without trained artifacts.

pub mod surrogate;

use crate::core::models::features::{FeatureName, FeatureVector};
use std::fmt;
use thiserror::Error;

/// A predicted formulation property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Permeability,
    Irritation,
    Stability,
    QcFail,
}

impl Target {
    pub const ALL: [Target; 4] = [
        Target::Permeability,
        Target::Irritation,
        Target::Stability,
        Target::QcFail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Permeability => "permeability",
            Target::Irritation => "irritation",
            Target::Stability => "stability",
            Target::QcFail => "qc_fail",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Model does not support {0} prediction")]
    Unsupported(&'static str),
    #[error("Feature '{0}' is not a finite number")]
    NonFiniteFeature(FeatureName),
    #[error("Model produced a non-finite value: {0}")]
    NonFiniteOutput(f64),
    #[error("Predicted probability {0} lies outside [0, 1]")]
    ProbabilityOutOfRange(f64),
    #[error("Model failure: {0}")]
    Model(String),
}

/// A predictive model for one property over the 8-field feature schema.
pub trait PropertyModel {
    /// Point prediction (regression value or predicted class).
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError>;

    /// Probability of the positive class. Regressors do not provide one.
    fn predict_probability(&self, _features: &FeatureVector) -> Result<f64, PredictionError> {
        Err(PredictionError::Unsupported("probability"))
    }
}

/// The four property models the scoring engine consults for every candidate.
pub struct PredictiveModelSet {
    permeability: Box<dyn PropertyModel>,
    irritation: Box<dyn PropertyModel>,
    stability: Box<dyn PropertyModel>,
    qc_fail: Box<dyn PropertyModel>,
}

impl PredictiveModelSet {
    pub fn new(
        permeability: Box<dyn PropertyModel>,
        irritation: Box<dyn PropertyModel>,
        stability: Box<dyn PropertyModel>,
        qc_fail: Box<dyn PropertyModel>,
    ) -> Self {
        Self {
            permeability,
            irritation,
            stability,
            qc_fail,
        }
    }

    pub fn model(&self, target: Target) -> &dyn PropertyModel {
        match target {
            Target::Permeability => self.permeability.as_ref(),
            Target::Irritation => self.irritation.as_ref(),
            Target::Stability => self.stability.as_ref(),
            Target::QcFail => self.qc_fail.as_ref(),
        }
    }

    /// Evaluates the capability the pipeline uses for `target`: the probability for the
    /// QC fail classifier, the point prediction for everything else.
    pub fn evaluate(
        &self,
        target: Target,
        features: &FeatureVector,
    ) -> Result<f64, PredictionError> {
        let model = self.model(target);
        match target {
            Target::QcFail => model.predict_probability(features),
            _ => model.predict(features),
        }
    }
}

impl fmt::Debug for PredictiveModelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictiveModelSet").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl PropertyModel for Constant {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, PredictionError> {
            Ok(self.0)
        }
    }

    struct Classifier;

    impl PropertyModel for Classifier {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, PredictionError> {
            Ok(1.0)
        }

        fn predict_probability(&self, _features: &FeatureVector) -> Result<f64, PredictionError> {
            Ok(0.25)
        }
    }

    fn features() -> FeatureVector {
        FeatureVector::from_array([1.0; 8])
    }

    #[test]
    fn evaluate_uses_probability_for_qc_fail_only() {
        let models = PredictiveModelSet::new(
            Box::new(Constant(55.0)),
            Box::new(Constant(0.4)),
            Box::new(Constant(180.0)),
            Box::new(Classifier),
        );

        assert_eq!(models.evaluate(Target::Permeability, &features()), Ok(55.0));
        assert_eq!(models.evaluate(Target::Irritation, &features()), Ok(0.4));
        assert_eq!(models.evaluate(Target::Stability, &features()), Ok(180.0));
        assert_eq!(models.evaluate(Target::QcFail, &features()), Ok(0.25));
    }

    #[test]
    fn regressor_has_no_probability_capability() {
        let model = Constant(1.0);
        assert_eq!(
            model.predict_probability(&features()),
            Err(PredictionError::Unsupported("probability"))
        );
    }
}
