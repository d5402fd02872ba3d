use serde::{Deserialize, Serialize};

/// Observed outcome of one historical formulation experiment.
///
/// Deserialized by column name, so the feature and permeability columns of a full
/// formulation table are simply ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    pub exp_id: String,
    pub stability_days: f64,
    pub irritation_risk: f64,
    /// `1` when the run produced an out-of-spec QC event, `0` otherwise.
    pub qc_fail: u8,
}

/// A free-text development observation attached to an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevNote {
    pub exp_id: String,
    pub observation: String,
}

/// One entry of an evidence pack: an experiment, its merged observations, and the
/// priority it was ranked by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceItem {
    pub exp_id: String,
    pub stability_days: f64,
    pub irritation_risk: f64,
    pub qc_fail: u8,
    pub observation: String,
    pub priority: f64,
    /// Pointer back to the source data row, e.g. `Data row exp_id=EXP-00042`.
    pub trace: String,
}

impl EvidenceItem {
    pub fn trace_for(exp_id: &str) -> String {
        format!("Data row exp_id={}", exp_id)
    }
}
