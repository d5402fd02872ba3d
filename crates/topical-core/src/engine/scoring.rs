use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use crate::core::models::candidate::{Predictions, ScoredCandidate};
use crate::core::models::features::{CandidatePool, FeatureVector};
use crate::core::predict::{PredictionError, PredictiveModelSet, Target};
use tracing::{debug, instrument};

pub const IRRITATION_RANGE: (f64, f64) = (0.0, 1.0);
pub const STABILITY_RANGE_DAYS: (f64, f64) = (15.0, 365.0);

/// Scores every candidate in `pool`, preserving pool order.
///
/// See [`score_with_progress`].
pub fn score(
    pool: &CandidatePool,
    models: &PredictiveModelSet,
) -> Result<Vec<ScoredCandidate>, EngineError> {
    score_with_progress(pool, models, &ProgressReporter::new())
}

/// Scores every candidate in `pool`, reporting one task step per candidate.
///
/// Irritation is clamped to [`IRRITATION_RANGE`] and stability to
/// [`STABILITY_RANGE_DAYS`]; permeability passes through unclamped. The first candidate
/// for which any model fails, returns a non-finite value, or returns a probability outside
/// `[0, 1]` aborts the whole call: no partial table is returned.
#[instrument(level = "debug", skip_all, fields(pool_size = pool.len()))]
pub fn score_with_progress(
    pool: &CandidatePool,
    models: &PredictiveModelSet,
    reporter: &ProgressReporter,
) -> Result<Vec<ScoredCandidate>, EngineError> {
    reporter.report(Progress::TaskStart {
        total_steps: pool.len() as u64,
    });

    let mut scored = Vec::with_capacity(pool.len());
    for (index, features) in pool.iter().enumerate() {
        scored.push(score_candidate(index, features, models)?);
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    debug!(count = scored.len(), "Candidate pool scored.");
    Ok(scored)
}

fn score_candidate(
    index: usize,
    features: &FeatureVector,
    models: &PredictiveModelSet,
) -> Result<ScoredCandidate, EngineError> {
    let evaluate = |target: Target| -> Result<f64, EngineError> {
        models
            .evaluate(target, features)
            .and_then(|value| {
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(PredictionError::NonFiniteOutput(value))
                }
            })
            .map_err(|source| EngineError::ModelEvaluation {
                index,
                target,
                source,
            })
    };

    let permeability = evaluate(Target::Permeability)?;
    let irritation = evaluate(Target::Irritation)?.clamp(IRRITATION_RANGE.0, IRRITATION_RANGE.1);
    let stability =
        evaluate(Target::Stability)?.clamp(STABILITY_RANGE_DAYS.0, STABILITY_RANGE_DAYS.1);
    let qc_fail_prob = evaluate(Target::QcFail)?;
    if !(0.0..=1.0).contains(&qc_fail_prob) {
        return Err(EngineError::ModelEvaluation {
            index,
            target: Target::QcFail,
            source: PredictionError::ProbabilityOutOfRange(qc_fail_prob),
        });
    }

    Ok(ScoredCandidate::new(
        *features,
        Predictions {
            permeability,
            irritation,
            stability,
            qc_fail_prob,
        },
    ))
}
