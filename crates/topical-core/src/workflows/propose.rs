use crate::core::models::candidate::ScoredCandidate;
use crate::core::models::features::CandidatePool;
use crate::core::models::proposal::Proposal;
use crate::core::predict::PredictiveModelSet;
use crate::engine::cache::{PoolKey, ScoredPoolCache};
use crate::engine::config::{Constraints, ProposalConfig, ProposalConfigBuilder};
use crate::engine::error::EngineError;
use crate::engine::filter::filter;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::ranking::rank;
use crate::engine::sampler::CandidateSampler;
use crate::engine::scoring::score_with_progress;
use tracing::{info, instrument};

/// Runs the full proposal pipeline for `config`.
///
/// The pool is sampled, scored, filtered, and ranked inside this call; each stage is
/// reported as a phase whose finish event carries the size of the stage's output table.
/// A scoring failure aborts the run and no proposals are returned.
#[instrument(skip_all, name = "proposal_workflow")]
pub fn run(
    config: &ProposalConfig,
    models: &PredictiveModelSet,
    reporter: &ProgressReporter,
) -> Result<Vec<Proposal>, EngineError> {
    info!(
        pool_size = config.pool_size,
        seed = config.seed,
        top_n = config.top_n,
        "Starting proposal workflow."
    );
    let sampler = CandidateSampler::new(config.sampler.clone())?;

    let pool = reporter.phase(
        "Sampling",
        || Ok::<_, EngineError>(sampler.generate(config.pool_size, config.seed)),
        CandidatePool::len,
    )?;
    let scored = reporter.phase(
        "Scoring",
        || score_with_progress(&pool, models, reporter),
        Vec::len,
    )?;

    filter_and_rank(&scored, config.constraints.as_ref(), config.top_n, reporter)
}

/// Like [`run`], but takes the scored pool from `cache`, sampling and scoring it only on a
/// miss. The cache must have been filled with the same sampler configuration and models.
#[instrument(skip_all, name = "proposal_workflow")]
pub fn run_cached(
    config: &ProposalConfig,
    models: &PredictiveModelSet,
    cache: &mut ScoredPoolCache,
    reporter: &ProgressReporter,
) -> Result<Vec<Proposal>, EngineError> {
    let key = PoolKey {
        pool_size: config.pool_size,
        seed: config.seed,
    };
    info!(
        pool_size = key.pool_size,
        seed = key.seed,
        top_n = config.top_n,
        cached = cache.contains(key),
        "Starting proposal workflow."
    );
    let sampler = CandidateSampler::new(config.sampler.clone())?;

    reporter.report(Progress::PhaseStart { name: "Scoring" });
    let scored = cache.get_or_score(key, &sampler, models, reporter)?;
    reporter.report(Progress::PhaseFinish {
        items: scored.len(),
    });

    filter_and_rank(scored, config.constraints.as_ref(), config.top_n, reporter)
}

/// Generates the top `n` proposals from a freshly sampled pool of `pool_size` candidates.
///
/// Uses the default sampling distributions and reports no progress. Identical arguments
/// always yield identical proposals.
pub fn generate_proposals(
    pool_size: usize,
    seed: u64,
    constraints: Option<&Constraints>,
    n: usize,
    models: &PredictiveModelSet,
) -> Result<Vec<Proposal>, EngineError> {
    let config = ProposalConfigBuilder::new()
        .pool_size(pool_size)
        .seed(seed)
        .top_n(n)
        .constraints(constraints.copied())
        .build()?;
    run(&config, models, &ProgressReporter::new())
}

/// Scores, filters, and ranks an externally supplied candidate pool.
#[instrument(skip_all, name = "pool_proposal_workflow", fields(pool_size = pool.len()))]
pub fn propose_from_pool(
    pool: &CandidatePool,
    constraints: Option<&Constraints>,
    n: usize,
    models: &PredictiveModelSet,
    reporter: &ProgressReporter,
) -> Result<Vec<Proposal>, EngineError> {
    let scored = reporter.phase(
        "Scoring",
        || score_with_progress(pool, models, reporter),
        Vec::len,
    )?;
    filter_and_rank(&scored, constraints, n, reporter)
}

fn filter_and_rank(
    scored: &[ScoredCandidate],
    constraints: Option<&Constraints>,
    n: usize,
    reporter: &ProgressReporter,
) -> Result<Vec<Proposal>, EngineError> {
    let filtered = reporter.phase(
        "Filtering",
        || Ok::<_, EngineError>(filter(scored, constraints)),
        Vec::len,
    )?;
    if constraints.is_some() {
        reporter.report(Progress::Message(format!(
            "{} of {} candidates satisfy the constraints",
            filtered.len(),
            scored.len()
        )));
    }
    let proposals = reporter.phase(
        "Ranking",
        || Ok::<_, EngineError>(rank(&filtered, n)),
        Vec::len,
    )?;

    info!(
        scored = scored.len(),
        feasible = filtered.len(),
        proposals = proposals.len(),
        "Proposal workflow complete."
    );
    Ok(proposals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::predict::surrogate::default_model_set;
    use std::sync::{Arc, Mutex};

    fn recording_reporter() -> (ProgressReporter<'static>, Arc<Mutex<Vec<Progress>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));
        (reporter, events)
    }

    fn phase_log(events: &[Progress]) -> Vec<String> {
        events
            .iter()
            .filter_map(|event| match event {
                Progress::PhaseStart { name } => Some(format!("start {}", name)),
                Progress::PhaseFinish { items } => Some(format!("finish {}", items)),
                _ => None,
            })
            .collect()
    }

    fn config(constraints: Option<Constraints>) -> ProposalConfig {
        ProposalConfigBuilder::new()
            .pool_size(200)
            .seed(7)
            .top_n(12)
            .constraints(constraints)
            .build()
            .unwrap()
    }

    #[test]
    fn run_reports_every_stage_with_table_sizes() {
        let (reporter, events) = recording_reporter();
        let proposals = run(&config(None), &default_model_set(), &reporter).unwrap();

        assert_eq!(proposals.len(), 12);
        let events = events.lock().unwrap();
        assert_eq!(
            phase_log(&events),
            vec![
                "start Sampling",
                "finish 200",
                "start Scoring",
                "finish 200",
                "start Filtering",
                "finish 200",
                "start Ranking",
                "finish 12",
            ]
        );
        let increments = events
            .iter()
            .filter(|e| matches!(e, Progress::TaskIncrement))
            .count();
        assert_eq!(increments, 200);
        assert!(!events.iter().any(|e| matches!(e, Progress::Message(_))));
    }

    #[test]
    fn constrained_run_reports_how_many_candidates_survive() {
        let constraints = Constraints::builder().max_irritation(0.3).build().unwrap();
        let (reporter, events) = recording_reporter();
        run(&config(Some(constraints)), &default_model_set(), &reporter).unwrap();

        let events = events.lock().unwrap();
        let finishes: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                Progress::PhaseFinish { items } => Some(*items),
                _ => None,
            })
            .collect();
        let feasible = finishes[2];
        let messages: Vec<&String> = events
            .iter()
            .filter_map(|e| match e {
                Progress::Message(msg) => Some(msg),
                _ => None,
            })
            .collect();
        assert_eq!(
            messages,
            vec![&format!("{} of 200 candidates satisfy the constraints", feasible)]
        );
    }

    #[test]
    fn generate_proposals_is_deterministic() {
        let models = default_model_set();
        let constraints = Constraints::builder()
            .max_irritation(0.65)
            .min_stability(120.0)
            .max_fail_probability(0.4)
            .build()
            .unwrap();

        let a = generate_proposals(600, 7, Some(&constraints), 12, &models).unwrap();
        let b = generate_proposals(600, 7, Some(&constraints), 12, &models).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn proposals_respect_constraints_and_are_ordered() {
        let constraints = Constraints::builder()
            .max_irritation(0.65)
            .min_stability(120.0)
            .max_fail_probability(0.4)
            .build()
            .unwrap();
        let proposals =
            generate_proposals(600, 7, Some(&constraints), 12, &default_model_set()).unwrap();

        assert_eq!(proposals.len(), 12);
        for (index, proposal) in proposals.iter().enumerate() {
            let p = &proposal.candidate.predictions;
            assert!(p.irritation <= 0.65);
            assert!(p.stability >= 120.0);
            assert!(p.qc_fail_prob <= 0.4);
            assert_eq!(proposal.id.rank(), index + 1);
        }
        assert!(proposals.windows(2).all(|w| w[0].utility >= w[1].utility));
    }

    #[test]
    fn unsatisfiable_constraints_yield_no_proposals() {
        let constraints = Constraints::builder().min_stability(366.0).build().unwrap();
        let proposals =
            generate_proposals(100, 3, Some(&constraints), 12, &default_model_set()).unwrap();
        assert!(proposals.is_empty());
    }

    #[test]
    fn cached_run_matches_uncached_run_and_reuses_the_pool() {
        let models = default_model_set();
        let mut cache = ScoredPoolCache::new();
        let loose = config(None);
        let strict = config(Some(
            Constraints::builder().max_irritation(0.3).build().unwrap(),
        ));

        let expected = run(&loose, &models, &ProgressReporter::new()).unwrap();
        let first = run_cached(&loose, &models, &mut cache, &ProgressReporter::new()).unwrap();
        assert_eq!(first, expected);

        let (reporter, events) = recording_reporter();
        let strict_cached = run_cached(&strict, &models, &mut cache, &reporter).unwrap();
        assert_eq!(
            strict_cached,
            run(&strict, &models, &ProgressReporter::new()).unwrap()
        );
        assert_eq!(cache.len(), 1);
        assert!(
            !events
                .lock()
                .unwrap()
                .iter()
                .any(|e| matches!(e, Progress::TaskIncrement))
        );
    }

    #[test]
    fn supplied_pool_matches_sampled_pipeline() {
        let models = default_model_set();
        let pool = CandidateSampler::default().generate(150, 11);

        let from_pool =
            propose_from_pool(&pool, None, 5, &models, &ProgressReporter::new()).unwrap();
        let generated = generate_proposals(150, 11, None, 5, &models).unwrap();
        assert_eq!(from_pool, generated);
    }

    #[test]
    fn empty_pool_yields_no_proposals() {
        let result = generate_proposals(0, 1, None, 5, &default_model_set()).unwrap();
        assert!(result.is_empty());
    }
}
