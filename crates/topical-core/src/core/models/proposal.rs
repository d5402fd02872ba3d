use super::candidate::ScoredCandidate;
use super::ids::ProposalId;
use serde::{Deserialize, Serialize};

/// A scored candidate that survived filtering and utility ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proposal {
    pub id: ProposalId,
    pub candidate: ScoredCandidate,
    pub utility: f64,
}

/// A proposal re-scored under a decision policy.
///
/// The proposal, including its identifier, is carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyRankedProposal {
    pub proposal: Proposal,
    pub policy_score: f64,
}

impl PolicyRankedProposal {
    pub fn id(&self) -> ProposalId {
        self.proposal.id
    }
}

/// A flat, field-name keyed row describing one proposal.
///
/// This is the shape consumed by report renderers and tabular exporters. `policy_score`
/// is only present for rows that went through a policy ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub proposal_id: ProposalId,
    pub api_load: f64,
    pub solvent_ratio: f64,
    pub polymer_pct: f64,
    pub surfactant_pct: f64,
    pub ph: f64,
    pub viscosity: f64,
    pub process_temp: f64,
    pub mix_time: f64,
    pub pred_permeability: f64,
    pub pred_irritation: f64,
    pub pred_stability: f64,
    pub pred_qc_fail_prob: f64,
    pub utility: f64,
    pub policy_score: Option<f64>,
}

impl From<&Proposal> for ProposalRecord {
    fn from(p: &Proposal) -> Self {
        let fv = &p.candidate.features;
        let pred = &p.candidate.predictions;
        Self {
            proposal_id: p.id,
            api_load: fv.api_load,
            solvent_ratio: fv.solvent_ratio,
            polymer_pct: fv.polymer_pct,
            surfactant_pct: fv.surfactant_pct,
            ph: fv.ph,
            viscosity: fv.viscosity,
            process_temp: fv.process_temp,
            mix_time: fv.mix_time,
            pred_permeability: pred.permeability,
            pred_irritation: pred.irritation,
            pred_stability: pred.stability,
            pred_qc_fail_prob: pred.qc_fail_prob,
            utility: p.utility,
            policy_score: None,
        }
    }
}

impl From<&PolicyRankedProposal> for ProposalRecord {
    fn from(p: &PolicyRankedProposal) -> Self {
        Self {
            policy_score: Some(p.policy_score),
            ..ProposalRecord::from(&p.proposal)
        }
    }
}
