use crate::core::models::evidence::{DevNote, EvidenceItem, ExperimentRecord};
use crate::engine::evidence::{NO_NOTES, build_evidence_pack};
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

/// Assembles the evidence pack of the `top_n` highest-priority experiments.
///
/// Reported as a single "Prioritizing" phase whose finish event carries the pack size,
/// followed by a message counting the selected experiments that have no notes.
#[instrument(skip_all, name = "evidence_workflow")]
pub fn assemble(
    records: &[ExperimentRecord],
    notes: &[DevNote],
    top_n: usize,
    reporter: &ProgressReporter,
) -> Vec<EvidenceItem> {
    info!(
        records = records.len(),
        notes = notes.len(),
        top_n,
        "Starting evidence workflow."
    );

    reporter.report(Progress::PhaseStart {
        name: "Prioritizing",
    });
    let pack = build_evidence_pack(records, notes, top_n);
    reporter.report(Progress::PhaseFinish { items: pack.len() });

    let unannotated = pack
        .iter()
        .filter(|item| item.observation == NO_NOTES)
        .count();
    if unannotated > 0 {
        reporter.report(Progress::Message(format!(
            "{} of {} selected experiments have no notes",
            unannotated,
            pack.len()
        )));
    }

    info!(
        selected = pack.len(),
        unannotated, "Evidence workflow complete."
    );
    pack
}
