use crate::core::models::ids::ProposalId;
use crate::core::models::proposal::{PolicyRankedProposal, Proposal};
use crate::engine::error::EngineError;
use crate::engine::policy::{Policy, apply_policy};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Re-ranks `proposals` under the policy named `policy_name`.
///
/// Unknown names are rejected with a configuration error rather than falling back to the
/// balanced policy.
#[instrument(skip(proposals), fields(count = proposals.len()))]
pub fn rank_by_policy(
    proposals: &[Proposal],
    policy_name: &str,
) -> Result<Vec<PolicyRankedProposal>, EngineError> {
    let policy: Policy = policy_name.parse()?;
    let ranked = apply_policy(proposals, policy);
    info!(policy = %policy, "Proposals re-ranked.");
    Ok(ranked)
}

/// Where one proposal lands under each of two policies (1-based ranks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankShift {
    pub id: ProposalId,
    pub rank_a: usize,
    pub rank_b: usize,
}

impl RankShift {
    /// Positive when the proposal moves up under policy B.
    pub fn shift(&self) -> i64 {
        self.rank_a as i64 - self.rank_b as i64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolicyComparison {
    pub policy_a: Policy,
    pub policy_b: Policy,
    pub ranking_a: Vec<PolicyRankedProposal>,
    pub ranking_b: Vec<PolicyRankedProposal>,
    /// One entry per proposal, in policy A order.
    pub shifts: Vec<RankShift>,
}

impl PolicyComparison {
    /// Whether both policies produce the same ordering.
    pub fn is_unchanged(&self) -> bool {
        self.shifts.iter().all(|s| s.shift() == 0)
    }
}

/// Ranks the same proposal set under two policies and records how each proposal moves.
#[instrument(skip(proposals), fields(count = proposals.len()))]
pub fn compare_policies(proposals: &[Proposal], a: Policy, b: Policy) -> PolicyComparison {
    let ranking_a = apply_policy(proposals, a);
    let ranking_b = apply_policy(proposals, b);

    let positions_b: HashMap<ProposalId, usize> = ranking_b
        .iter()
        .enumerate()
        .map(|(index, ranked)| (ranked.id(), index + 1))
        .collect();

    let shifts: Vec<RankShift> = ranking_a
        .iter()
        .enumerate()
        .filter_map(|(index, ranked)| {
            positions_b.get(&ranked.id()).map(|&rank_b| RankShift {
                id: ranked.id(),
                rank_a: index + 1,
                rank_b,
            })
        })
        .collect();

    let moved = shifts.iter().filter(|s| s.shift() != 0).count();
    info!(policy_a = %a, policy_b = %b, moved, "Policy comparison complete.");

    PolicyComparison {
        policy_a: a,
        policy_b: b,
        ranking_a,
        ranking_b,
        shifts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::candidate::{Predictions, ScoredCandidate};
    use crate::core::models::features::FeatureVector;
    use crate::engine::config::ConfigError;
    use crate::engine::ranking::rank;

    fn scored(perm: f64, stab: f64, irr: f64, fail: f64) -> ScoredCandidate {
        ScoredCandidate::new(
            FeatureVector::from_array([1.0, 0.5, 4.0, 1.0, 6.0, 15.0, 25.0, 10.0]),
            Predictions {
                permeability: perm,
                irritation: irr,
                stability: stab,
                qc_fail_prob: fail,
            },
        )
    }

    fn proposals() -> Vec<Proposal> {
        rank(
            &[
                scored(95.0, 60.0, 0.20, 0.15),
                scored(40.0, 360.0, 0.10, 0.05),
                scored(70.0, 200.0, 0.30, 0.10),
            ],
            3,
        )
    }

    #[test]
    fn rank_by_policy_accepts_known_names() {
        let input = proposals();
        let ranked = rank_by_policy(&input, "low_risk").unwrap();
        assert_eq!(ranked, apply_policy(&input, Policy::LowRisk));
    }

    #[test]
    fn rank_by_policy_rejects_unknown_names() {
        let result = rank_by_policy(&proposals(), "aggressive");
        assert_eq!(
            result,
            Err(EngineError::Config(ConfigError::UnknownPolicy(
                "aggressive".to_string()
            )))
        );
    }

    #[test]
    fn balanced_policy_reproduces_utility_order() {
        let input = proposals();
        let ranked = rank_by_policy(&input, "balanced").unwrap();
        let ids: Vec<ProposalId> = ranked.iter().map(|r| r.id()).collect();
        let original: Vec<ProposalId> = input.iter().map(|p| p.id).collect();
        assert_eq!(ids, original);
    }

    #[test]
    fn comparison_records_rank_shift_per_proposal() {
        let input = proposals();
        let comparison = compare_policies(&input, Policy::SpeedToClinic, Policy::LowRisk);

        assert_eq!(comparison.shifts.len(), input.len());
        for shift in &comparison.shifts {
            let pos_a = comparison
                .ranking_a
                .iter()
                .position(|r| r.id() == shift.id)
                .unwrap();
            let pos_b = comparison
                .ranking_b
                .iter()
                .position(|r| r.id() == shift.id)
                .unwrap();
            assert_eq!(shift.rank_a, pos_a + 1);
            assert_eq!(shift.rank_b, pos_b + 1);
        }
        assert!(!comparison.is_unchanged());
        assert_eq!(comparison.shifts.iter().map(RankShift::shift).sum::<i64>(), 0);
    }

    #[test]
    fn comparing_a_policy_with_itself_moves_nothing() {
        let comparison = compare_policies(&proposals(), Policy::Balanced, Policy::Balanced);
        assert!(comparison.is_unchanged());
        assert_eq!(comparison.ranking_a, comparison.ranking_b);
    }

    #[test]
    fn empty_proposal_set_compares_to_empty() {
        let comparison = compare_policies(&[], Policy::Balanced, Policy::LowRisk);
        assert!(comparison.ranking_a.is_empty());
        assert!(comparison.shifts.is_empty());
        assert!(comparison.is_unchanged());
    }
}
