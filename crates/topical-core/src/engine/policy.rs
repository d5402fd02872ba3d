use super::config::ConfigError;
use super::utils::ordering::sort_by_score_desc;
use crate::core::models::candidate::Predictions;
use crate::core::models::proposal::{PolicyRankedProposal, Proposal};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Permeability predictions are normalized by this score ceiling.
pub const PERMEABILITY_SCALE: f64 = 100.0;
/// Stability predictions are normalized by one year.
pub const STABILITY_SCALE_DAYS: f64 = 365.0;

/// Trade-off weights applied to normalized predictions.
///
/// `score = permeability*(perm/100) + stability*(stab/365)
///        - irritation*irr - fail_probability*fail`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyWeights {
    pub permeability: f64,
    pub stability: f64,
    pub irritation: f64,
    pub fail_probability: f64,
}

impl PolicyWeights {
    pub const BALANCED: PolicyWeights = PolicyWeights {
        permeability: 0.45,
        stability: 0.35,
        irritation: 0.15,
        fail_probability: 0.20,
    };
    pub const SPEED_TO_CLINIC: PolicyWeights = PolicyWeights {
        permeability: 0.60,
        stability: 0.20,
        irritation: 0.10,
        fail_probability: 0.25,
    };
    pub const LOW_RISK: PolicyWeights = PolicyWeights {
        permeability: 0.30,
        stability: 0.55,
        irritation: 0.15,
        fail_probability: 0.30,
    };

    pub fn score(&self, p: &Predictions) -> f64 {
        self.permeability * (p.permeability / PERMEABILITY_SCALE)
            + self.stability * (p.stability / STABILITY_SCALE_DAYS)
            - self.irritation * p.irritation
            - self.fail_probability * p.qc_fail_prob
    }
}

/// A named decision policy with a fixed weight profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Policy {
    #[default]
    Balanced,
    SpeedToClinic,
    LowRisk,
}

impl Policy {
    pub const ALL: [Policy; 3] = [Policy::Balanced, Policy::SpeedToClinic, Policy::LowRisk];

    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Balanced => "balanced",
            Policy::SpeedToClinic => "speed_to_clinic",
            Policy::LowRisk => "low_risk",
        }
    }

    pub fn weights(&self) -> PolicyWeights {
        match self {
            Policy::Balanced => PolicyWeights::BALANCED,
            Policy::SpeedToClinic => PolicyWeights::SPEED_TO_CLINIC,
            Policy::LowRisk => PolicyWeights::LOW_RISK,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = ConfigError;

    /// Parses a policy name. Unrecognized names are an error, never a silent fallback.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Policy::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownPolicy(s.to_string()))
    }
}

/// Re-scores `proposals` under `policy` and returns them in descending policy score order.
///
/// The input slice is left untouched and every proposal keeps its identifier; equal
/// scores keep their input order.
#[instrument(level = "debug", skip(proposals), fields(count = proposals.len()))]
pub fn apply_policy(proposals: &[Proposal], policy: Policy) -> Vec<PolicyRankedProposal> {
    let weights = policy.weights();
    let mut ranked: Vec<PolicyRankedProposal> = proposals
        .iter()
        .map(|proposal| PolicyRankedProposal {
            proposal: *proposal,
            policy_score: weights.score(&proposal.candidate.predictions),
        })
        .collect();
    sort_by_score_desc(&mut ranked, |r| r.policy_score);

    if let Some(top) = ranked.first() {
        debug!(top = %top.id(), score = top.policy_score, "Policy ranking complete.");
    }
    ranked
}
