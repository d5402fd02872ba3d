use super::{PredictionError, PredictiveModelSet, PropertyModel};
use crate::core::models::features::{FeatureName, FeatureVector};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// How a single feature enters a latent response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformKind {
    /// `(x - center) / divisor`
    Linear,
    /// `|x - center| / divisor`
    AbsDeviation,
    /// `max(ln(x) - center, 0) / divisor`
    LogExcess,
}

fn default_divisor() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Term {
    pub feature: FeatureName,
    pub weight: f64,
    pub kind: TransformKind,
    #[serde(default)]
    pub center: f64,
    #[serde(default = "default_divisor")]
    pub divisor: f64,
}

impl Term {
    fn new(feature: FeatureName, weight: f64, kind: TransformKind, center: f64, divisor: f64) -> Self {
        Self {
            feature,
            weight,
            kind,
            center,
            divisor,
        }
    }

    fn contribution(&self, features: &FeatureVector) -> f64 {
        let x = features.get(self.feature);
        let transformed = match self.kind {
            TransformKind::Linear => x - self.center,
            TransformKind::AbsDeviation => (x - self.center).abs(),
            TransformKind::LogExcess => (x.ln() - self.center).max(0.0),
        };
        self.weight * transformed / self.divisor
    }
}

/// A logistic response surface: `scale * sigmoid(intercept + sum(terms))`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogisticResponse {
    pub scale: f64,
    #[serde(default)]
    pub intercept: f64,
    pub terms: Vec<Term>,
}

impl LogisticResponse {
    fn latent(&self, features: &FeatureVector) -> f64 {
        self.intercept
            + self
                .terms
                .iter()
                .map(|term| term.contribution(features))
                .sum::<f64>()
    }

    fn validate(&self, name: &str) -> Result<(), ModelLoadError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ModelLoadError::Invalid(format!(
                "{}: scale must be a positive finite number, got {}",
                name, self.scale
            )));
        }
        if !self.intercept.is_finite() {
            return Err(ModelLoadError::Invalid(format!(
                "{}: intercept must be finite",
                name
            )));
        }
        for term in &self.terms {
            if !term.weight.is_finite() || !term.center.is_finite() {
                return Err(ModelLoadError::Invalid(format!(
                    "{}: term on '{}' has a non-finite weight or center",
                    name, term.feature
                )));
            }
            if !term.divisor.is_finite() || term.divisor == 0.0 {
                return Err(ModelLoadError::Invalid(format!(
                    "{}: term on '{}' has divisor {}",
                    name, term.feature, term.divisor
                )));
            }
        }
        Ok(())
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn check_inputs(features: &FeatureVector) -> Result<(), PredictionError> {
    match features.first_non_finite() {
        Some(name) => Err(PredictionError::NonFiniteFeature(name)),
        None => Ok(()),
    }
}

impl PropertyModel for LogisticResponse {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        check_inputs(features)?;
        Ok(self.scale * sigmoid(self.latent(features)))
    }
}

/// Parameters of the QC failure probability, driven by irritation and stability deficit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct QcFailParams {
    pub irritation_weight: f64,
    pub stability_deficit_weight: f64,
    pub stability_horizon_days: f64,
    pub ceiling: f64,
}

/// QC failure classifier built on top of the irritation and stability surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct QcFailModel {
    params: QcFailParams,
    irritation: LogisticResponse,
    stability: LogisticResponse,
}

impl QcFailModel {
    const DECISION_THRESHOLD: f64 = 0.5;
}

impl PropertyModel for QcFailModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let p = self.predict_probability(features)?;
        Ok(if p >= Self::DECISION_THRESHOLD { 1.0 } else { 0.0 })
    }

    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let irritation = self.irritation.predict(features)?.clamp(0.0, 1.0);
        let stability_fraction =
            (self.stability.predict(features)? / self.params.stability_horizon_days).clamp(0.0, 1.0);
        let p = self.params.irritation_weight * irritation
            + self.params.stability_deficit_weight * (1.0 - stability_fraction);
        Ok(p.clamp(0.0, self.params.ceiling))
    }
}

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid model parameters: {0}")]
    Invalid(String),
}

/// Coefficients of the full surrogate model set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct SurrogateParams {
    pub permeability: LogisticResponse,
    pub irritation: LogisticResponse,
    pub stability: LogisticResponse,
    pub qc_fail: QcFailParams,
}

impl SurrogateParams {
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ModelLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let params: Self = toml::from_str(&content).map_err(|e| ModelLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ModelLoadError> {
        self.permeability.validate("permeability")?;
        self.irritation.validate("irritation")?;
        self.stability.validate("stability")?;

        let qc = &self.qc_fail;
        if !qc.irritation_weight.is_finite() || !qc.stability_deficit_weight.is_finite() {
            return Err(ModelLoadError::Invalid(
                "qc-fail: weights must be finite".to_string(),
            ));
        }
        if !qc.stability_horizon_days.is_finite() || qc.stability_horizon_days <= 0.0 {
            return Err(ModelLoadError::Invalid(format!(
                "qc-fail: stability-horizon-days must be positive, got {}",
                qc.stability_horizon_days
            )));
        }
        if !(0.0..=1.0).contains(&qc.ceiling) {
            return Err(ModelLoadError::Invalid(format!(
                "qc-fail: ceiling must lie in [0, 1], got {}",
                qc.ceiling
            )));
        }
        Ok(())
    }

    pub fn into_model_set(self) -> PredictiveModelSet {
        let qc_fail = QcFailModel {
            params: self.qc_fail,
            irritation: self.irritation.clone(),
            stability: self.stability.clone(),
        };
        PredictiveModelSet::new(
            Box::new(self.permeability),
            Box::new(self.irritation),
            Box::new(self.stability),
            Box::new(qc_fail),
        )
    }
}

impl Default for SurrogateParams {
    fn default() -> Self {
        use FeatureName::*;
        use TransformKind::*;

        Self {
            permeability: LogisticResponse {
                scale: 100.0,
                intercept: 0.0,
                terms: vec![
                    Term::new(SolventRatio, 1.2, Linear, 0.0, 1.0),
                    Term::new(SurfactantPct, 0.7, Linear, 0.0, 3.0),
                    Term::new(Viscosity, -0.6, LogExcess, 2.8, 1.0),
                    Term::new(ApiLoad, 0.2, Linear, 0.0, 5.0),
                    Term::new(Ph, -0.15, AbsDeviation, 6.0, 1.0),
                ],
            },
            irritation: LogisticResponse {
                scale: 1.0,
                intercept: 0.0,
                terms: vec![
                    Term::new(SurfactantPct, 1.0, Linear, 0.0, 3.0),
                    Term::new(ApiLoad, 0.5, Linear, 0.0, 5.0),
                    Term::new(Ph, 0.35, AbsDeviation, 6.0, 1.0),
                    Term::new(ProcessTemp, 0.1, Linear, 25.0, 20.0),
                ],
            },
            stability: LogisticResponse {
                scale: 365.0,
                intercept: 1.4,
                terms: vec![
                    Term::new(SolventRatio, -0.7, Linear, 0.0, 1.0),
                    Term::new(Ph, -0.25, AbsDeviation, 6.2, 1.0),
                    Term::new(ProcessTemp, -0.35, AbsDeviation, 27.0, 18.0),
                    Term::new(ApiLoad, -0.15, Linear, 0.0, 5.0),
                    Term::new(PolymerPct, 0.10, Linear, 0.0, 8.0),
                ],
            },
            qc_fail: QcFailParams {
                irritation_weight: 0.15,
                stability_deficit_weight: 0.25,
                stability_horizon_days: 365.0,
                ceiling: 0.9,
            },
        }
    }
}

/// The surrogate model set with its built-in coefficients.
pub fn default_model_set() -> PredictiveModelSet {
    SurrogateParams::default().into_model_set()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::predict::Target;
    use std::fs;
    use tempfile::tempdir;

    fn neutral_features() -> FeatureVector {
        FeatureVector {
            api_load: 0.0,
            solvent_ratio: 0.0,
            polymer_pct: 0.0,
            surfactant_pct: 0.0,
            ph: 6.0,
            viscosity: 10.0,
            process_temp: 25.0,
            mix_time: 10.0,
        }
    }

    #[test]
    fn neutral_formulation_sits_at_sigmoid_midpoint() {
        let models = default_model_set();
        let fv = neutral_features();

        let perm = models.evaluate(Target::Permeability, &fv).unwrap();
        let irr = models.evaluate(Target::Irritation, &fv).unwrap();
        assert!((perm - 50.0).abs() < 1e-9);
        assert!((irr - 0.5).abs() < 1e-9);
    }

    #[test]
    fn higher_solvent_raises_permeability_and_lowers_stability() {
        let models = default_model_set();
        let dry = neutral_features();
        let wet = FeatureVector {
            solvent_ratio: 0.9,
            ..dry
        };

        let perm_dry = models.evaluate(Target::Permeability, &dry).unwrap();
        let perm_wet = models.evaluate(Target::Permeability, &wet).unwrap();
        let stab_dry = models.evaluate(Target::Stability, &dry).unwrap();
        let stab_wet = models.evaluate(Target::Stability, &wet).unwrap();

        assert!(perm_wet > perm_dry);
        assert!(stab_wet < stab_dry);
    }

    #[test]
    fn viscosity_only_penalizes_permeability_above_threshold() {
        let models = default_model_set();
        let low = FeatureVector {
            viscosity: 5.0,
            ..neutral_features()
        };
        let lower = FeatureVector {
            viscosity: 2.0,
            ..neutral_features()
        };
        let high = FeatureVector {
            viscosity: 60.0,
            ..neutral_features()
        };

        let p_low = models.evaluate(Target::Permeability, &low).unwrap();
        let p_lower = models.evaluate(Target::Permeability, &lower).unwrap();
        let p_high = models.evaluate(Target::Permeability, &high).unwrap();

        assert_eq!(p_low, p_lower);
        assert!(p_high < p_low);
    }

    #[test]
    fn qc_fail_probability_respects_ceiling_and_classifies() {
        let mut params = SurrogateParams::default();
        params.qc_fail.irritation_weight = 5.0;
        params.qc_fail.ceiling = 0.6;
        let models = params.into_model_set();
        let fv = neutral_features();

        let p = models.evaluate(Target::QcFail, &fv).unwrap();
        assert_eq!(p, 0.6);
        assert_eq!(models.model(Target::QcFail).predict(&fv), Ok(1.0));
    }

    #[test]
    fn non_finite_feature_is_rejected() {
        let models = default_model_set();
        let fv = FeatureVector {
            ph: f64::INFINITY,
            ..neutral_features()
        };
        assert_eq!(
            models.evaluate(Target::Stability, &fv),
            Err(PredictionError::NonFiniteFeature(FeatureName::Ph))
        );
    }

    #[test]
    fn load_reads_coefficients_from_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("models.toml");
        fs::write(
            &path,
            r#"
            [permeability]
            scale = 100.0
            terms = [
                { feature = "solvent_ratio", weight = 2.0, kind = "linear" },
            ]

            [irritation]
            scale = 1.0
            terms = [
                { feature = "ph", weight = 0.5, kind = "abs-deviation", center = 6.0 },
            ]

            [stability]
            scale = 365.0
            intercept = 1.0
            terms = []

            [qc-fail]
            irritation-weight = 0.2
            stability-deficit-weight = 0.3
            stability-horizon-days = 365.0
            ceiling = 0.9
            "#,
        )
        .unwrap();

        let params = SurrogateParams::load(&path).unwrap();
        assert_eq!(params.permeability.terms.len(), 1);
        assert_eq!(params.permeability.terms[0].divisor, 1.0);
        assert_eq!(params.irritation.terms[0].kind, TransformKind::AbsDeviation);
        assert_eq!(params.stability.intercept, 1.0);
        assert_eq!(params.qc_fail.irritation_weight, 0.2);
    }

    #[test]
    fn load_rejects_zero_divisor() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("models.toml");
        fs::write(
            &path,
            r#"
            [permeability]
            scale = 100.0
            terms = [{ feature = "ph", weight = 1.0, kind = "linear", divisor = 0.0 }]
            [irritation]
            scale = 1.0
            terms = []
            [stability]
            scale = 365.0
            terms = []
            [qc-fail]
            irritation-weight = 0.15
            stability-deficit-weight = 0.25
            stability-horizon-days = 365.0
            ceiling = 0.9
            "#,
        )
        .unwrap();

        assert!(matches!(
            SurrogateParams::load(&path),
            Err(ModelLoadError::Invalid(_))
        ));
    }

    #[test]
    fn load_reports_missing_file_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        match SurrogateParams::load(&path) {
            Err(ModelLoadError::Io { path: p, .. }) => assert!(p.ends_with("missing.toml")),
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
