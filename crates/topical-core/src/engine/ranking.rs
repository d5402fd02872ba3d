use super::policy::PolicyWeights;
use super::utils::ordering::sort_by_score_desc;
use crate::core::models::candidate::{Predictions, ScoredCandidate};
use crate::core::models::ids::ProposalId;
use crate::core::models::proposal::Proposal;
use tracing::{debug, instrument};

/// Fixed weights of the proposal utility. They coincide with the balanced policy.
pub const UTILITY_WEIGHTS: PolicyWeights = PolicyWeights::BALANCED;

pub fn utility(predictions: &Predictions) -> f64 {
    UTILITY_WEIGHTS.score(predictions)
}

/// Ranks filtered candidates by utility and returns the top `n` as proposals.
///
/// The sort is stable, so candidates with equal utility keep their filtered order.
/// Proposal ids `PROP-001`, `PROP-002`, ... are assigned only after the final ordering.
/// Asking for more proposals than there are candidates returns all of them.
#[instrument(level = "debug", skip(filtered), fields(available = filtered.len()))]
pub fn rank(filtered: &[ScoredCandidate], n: usize) -> Vec<Proposal> {
    let mut scored: Vec<(ScoredCandidate, f64)> = filtered
        .iter()
        .map(|candidate| (*candidate, utility(&candidate.predictions)))
        .collect();
    sort_by_score_desc(&mut scored, |(_, u)| *u);
    scored.truncate(n);

    let proposals: Vec<Proposal> = scored
        .into_iter()
        .enumerate()
        .map(|(index, (candidate, utility))| Proposal {
            id: ProposalId::from_index(index),
            candidate,
            utility,
        })
        .collect();

    debug!(count = proposals.len(), "Utility ranking complete.");
    proposals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::features::FeatureVector;

    fn candidate(tag: f64, perm: f64, stab: f64, irr: f64, fail: f64) -> ScoredCandidate {
        ScoredCandidate::new(
            FeatureVector {
                api_load: tag,
                ..FeatureVector::from_array([0.0; 8])
            },
            Predictions {
                permeability: perm,
                irritation: irr,
                stability: stab,
                qc_fail_prob: fail,
            },
        )
    }

    fn tags(proposals: &[Proposal]) -> Vec<f64> {
        proposals
            .iter()
            .map(|p| p.candidate.features.api_load)
            .collect()
    }

    fn five_candidates() -> Vec<ScoredCandidate> {
        vec![
            candidate(1.0, 80.0, 300.0, 0.1, 0.05),
            candidate(2.0, 60.0, 200.0, 0.3, 0.1),
            candidate(3.0, 40.0, 100.0, 0.5, 0.2),
            candidate(4.0, 90.0, 350.0, 0.05, 0.02),
            candidate(5.0, 10.0, 20.0, 0.9, 0.8),
        ]
    }

    #[test]
    fn ranks_known_candidates_by_utility() {
        let proposals = rank(&five_candidates(), 5);
        assert_eq!(tags(&proposals), vec![4.0, 1.0, 2.0, 3.0, 5.0]);
        let ids: Vec<String> = proposals.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(
            ids,
            vec!["PROP-001", "PROP-002", "PROP-003", "PROP-004", "PROP-005"]
        );
    }

    #[test]
    fn utility_is_attached_and_non_increasing() {
        let proposals = rank(&five_candidates(), 5);
        for p in &proposals {
            assert_eq!(p.utility, utility(&p.candidate.predictions));
        }
        assert!(proposals.windows(2).all(|w| w[0].utility >= w[1].utility));
    }

    #[test]
    fn top_n_truncates() {
        let proposals = rank(&five_candidates(), 2);
        assert_eq!(tags(&proposals), vec![4.0, 1.0]);
    }

    #[test]
    fn requesting_more_than_available_returns_all() {
        let three = &five_candidates()[..3];
        let proposals = rank(three, 10);
        assert_eq!(proposals.len(), 3);
        let ids: Vec<String> = proposals.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, vec!["PROP-001", "PROP-002", "PROP-003"]);
    }

    #[test]
    fn equal_utilities_keep_filtered_order() {
        let tied = vec![
            candidate(1.0, 50.0, 100.0, 0.2, 0.1),
            candidate(2.0, 90.0, 300.0, 0.0, 0.0),
            candidate(3.0, 50.0, 100.0, 0.2, 0.1),
            candidate(4.0, 50.0, 100.0, 0.2, 0.1),
        ];
        assert_eq!(tags(&rank(&tied, 4)), vec![2.0, 1.0, 3.0, 4.0]);
    }

    #[test]
    fn empty_input_and_zero_n_yield_empty_proposals() {
        assert!(rank(&[], 10).is_empty());
        assert!(rank(&five_candidates(), 0).is_empty());
    }
}
