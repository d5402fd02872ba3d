use super::config::Constraints;
use crate::core::models::candidate::{Predictions, ScoredCandidate};
use tracing::debug;

/// Keeps the candidates that satisfy every bound in `constraints`, in their original order.
///
/// `None` means no filtering. Removing every candidate is a valid outcome and yields an
/// empty table.
pub fn filter(
    scored: &[ScoredCandidate],
    constraints: Option<&Constraints>,
) -> Vec<ScoredCandidate> {
    let Some(constraints) = constraints else {
        return scored.to_vec();
    };

    let kept: Vec<ScoredCandidate> = scored
        .iter()
        .filter(|candidate| satisfies(&candidate.predictions, constraints))
        .copied()
        .collect();

    debug!(
        before = scored.len(),
        after = kept.len(),
        "Constraint filter applied."
    );
    kept
}

/// Whether a candidate's predictions satisfy all bounds (conjunction).
pub fn satisfies(predictions: &Predictions, constraints: &Constraints) -> bool {
    constraints
        .max_irritation()
        .is_none_or(|max| predictions.irritation <= max)
        && constraints
            .min_stability()
            .is_none_or(|min| predictions.stability >= min)
        && constraints
            .max_fail_probability()
            .is_none_or(|max| predictions.qc_fail_prob <= max)
}
