use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Names of the eight formulation and process parameters every model consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureName {
    ApiLoad,
    SolventRatio,
    PolymerPct,
    SurfactantPct,
    Ph,
    Viscosity,
    ProcessTemp,
    MixTime,
}

impl FeatureName {
    /// All features in schema order.
    pub const ALL: [FeatureName; 8] = [
        FeatureName::ApiLoad,
        FeatureName::SolventRatio,
        FeatureName::PolymerPct,
        FeatureName::SurfactantPct,
        FeatureName::Ph,
        FeatureName::Viscosity,
        FeatureName::ProcessTemp,
        FeatureName::MixTime,
    ];

    /// Position of the feature in [`FeatureName::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureName::ApiLoad => "api_load",
            FeatureName::SolventRatio => "solvent_ratio",
            FeatureName::PolymerPct => "polymer_pct",
            FeatureName::SurfactantPct => "surfactant_pct",
            FeatureName::Ph => "ph",
            FeatureName::Viscosity => "viscosity",
            FeatureName::ProcessTemp => "process_temp",
            FeatureName::MixTime => "mix_time",
        }
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown feature name '{0}'")]
pub struct UnknownFeature(pub String);

impl FromStr for FeatureName {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

/// A single candidate formulation described by its eight input parameters.
///
/// Feature vectors are plain `Copy` values; every pipeline stage that annotates a vector
/// carries its own copy, so the original is never modified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub api_load: f64,
    pub solvent_ratio: f64,
    pub polymer_pct: f64,
    pub surfactant_pct: f64,
    pub ph: f64,
    pub viscosity: f64,
    pub process_temp: f64,
    pub mix_time: f64,
}

impl FeatureVector {
    /// Builds a vector from values given in [`FeatureName::ALL`] order.
    pub fn from_array(values: [f64; 8]) -> Self {
        let [
            api_load,
            solvent_ratio,
            polymer_pct,
            surfactant_pct,
            ph,
            viscosity,
            process_temp,
            mix_time,
        ] = values;
        Self {
            api_load,
            solvent_ratio,
            polymer_pct,
            surfactant_pct,
            ph,
            viscosity,
            process_temp,
            mix_time,
        }
    }

    pub fn to_array(&self) -> [f64; 8] {
        [
            self.api_load,
            self.solvent_ratio,
            self.polymer_pct,
            self.surfactant_pct,
            self.ph,
            self.viscosity,
            self.process_temp,
            self.mix_time,
        ]
    }

    pub fn get(&self, name: FeatureName) -> f64 {
        match name {
            FeatureName::ApiLoad => self.api_load,
            FeatureName::SolventRatio => self.solvent_ratio,
            FeatureName::PolymerPct => self.polymer_pct,
            FeatureName::SurfactantPct => self.surfactant_pct,
            FeatureName::Ph => self.ph,
            FeatureName::Viscosity => self.viscosity,
            FeatureName::ProcessTemp => self.process_temp,
            FeatureName::MixTime => self.mix_time,
        }
    }

    /// Returns the first feature holding a NaN or infinite value, if any.
    pub fn first_non_finite(&self) -> Option<FeatureName> {
        FeatureName::ALL
            .into_iter()
            .find(|&name| !self.get(name).is_finite())
    }
}

/// An ordered pool of candidate formulations produced by one sampling call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidatePool {
    candidates: Vec<FeatureVector>,
}

impl CandidatePool {
    pub fn new(candidates: Vec<FeatureVector>) -> Self {
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureVector> {
        self.candidates.iter()
    }

    pub fn as_slice(&self) -> &[FeatureVector] {
        &self.candidates
    }

    pub fn into_inner(self) -> Vec<FeatureVector> {
        self.candidates
    }
}

impl From<Vec<FeatureVector>> for CandidatePool {
    fn from(candidates: Vec<FeatureVector>) -> Self {
        Self::new(candidates)
    }
}

impl<'a> IntoIterator for &'a CandidatePool {
    type Item = &'a FeatureVector;
    type IntoIter = std::slice::Iter<'a, FeatureVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}
