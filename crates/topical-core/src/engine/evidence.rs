use super::utils::ordering::sort_by_score_desc;
use crate::core::models::evidence::{DevNote, EvidenceItem, ExperimentRecord};
use std::collections::HashMap;
use tracing::{debug, instrument};

pub const DEFAULT_EVIDENCE_TOP_N: usize = 12;

/// Observation text of an experiment without any development note.
pub const NO_NOTES: &str = "No notes.";

const W_IRRITATION: f64 = 0.35;
const W_INSTABILITY: f64 = 0.35;
const W_QC_FAIL: f64 = 0.30;

/// Review priority of an experiment: irritation, shortfall from a full year of
/// stability, and QC failures all raise it.
pub fn priority(record: &ExperimentRecord) -> f64 {
    W_IRRITATION * record.irritation_risk
        + W_INSTABILITY * (1.0 - record.stability_days / 365.0)
        + W_QC_FAIL * f64::from(record.qc_fail)
}

/// Joins the notes of each experiment with single spaces, in note order.
fn merge_notes(notes: &[DevNote]) -> HashMap<&str, String> {
    let mut merged: HashMap<&str, String> = HashMap::new();
    for note in notes {
        merged
            .entry(note.exp_id.as_str())
            .and_modify(|text| {
                text.push(' ');
                text.push_str(&note.observation);
            })
            .or_insert_with(|| note.observation.clone());
    }
    merged
}

/// Builds an evidence pack of the `top_n` highest-priority experiments.
///
/// Every record keeps its own row; notes are attached by `exp_id` and records without
/// notes read [`NO_NOTES`]. Notes for unknown experiments are dropped. Equal priorities
/// keep the record order.
#[instrument(skip_all, name = "evidence_pack", fields(records = records.len(), notes = notes.len()))]
pub fn build_evidence_pack(
    records: &[ExperimentRecord],
    notes: &[DevNote],
    top_n: usize,
) -> Vec<EvidenceItem> {
    let merged = merge_notes(notes);

    let mut items: Vec<EvidenceItem> = records
        .iter()
        .map(|record| EvidenceItem {
            exp_id: record.exp_id.clone(),
            stability_days: record.stability_days,
            irritation_risk: record.irritation_risk,
            qc_fail: record.qc_fail,
            observation: merged
                .get(record.exp_id.as_str())
                .cloned()
                .unwrap_or_else(|| NO_NOTES.to_string()),
            priority: priority(record),
            trace: EvidenceItem::trace_for(&record.exp_id),
        })
        .collect();

    sort_by_score_desc(&mut items, |item| item.priority);
    items.truncate(top_n);

    debug!(
        annotated = merged.len(),
        selected = items.len(),
        "Evidence pack assembled."
    );
    items
}
