use std::fmt::Write;
use topical::core::models::evidence::EvidenceItem;
use topical::core::models::proposal::PolicyRankedProposal;
use topical::engine::policy::Policy;
use topical::workflows::rank::PolicyComparison;

pub fn proposal_table(ranked: &[PolicyRankedProposal]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<5} {:<9} {:>8} {:>8} {:>10} {:>8} {:>8} {:>8}",
        "rank", "id", "perm", "irr", "stab_days", "qc_fail", "utility", "score"
    );
    for (index, entry) in ranked.iter().enumerate() {
        let p = &entry.proposal.candidate.predictions;
        let _ = writeln!(
            out,
            "{:<5} {:<9} {:>8.1} {:>8.2} {:>10.0} {:>8.2} {:>8.4} {:>8.4}",
            index + 1,
            entry.id(),
            p.permeability,
            p.irritation,
            p.stability,
            p.qc_fail_prob,
            entry.proposal.utility,
            entry.policy_score
        );
    }
    out
}

/// Both policy orderings side by side, followed by each listed proposal's rank shift.
pub fn comparison_table(comparison: &PolicyComparison, top: usize) -> String {
    let mut out = String::new();
    let a = comparison.policy_a.as_str();
    let b = comparison.policy_b.as_str();
    let _ = writeln!(out, "{:<5} {:<26} {:<26}", "rank", a, b);

    let rows = comparison
        .ranking_a
        .len()
        .max(comparison.ranking_b.len())
        .min(top);
    for index in 0..rows {
        let cell = |ranking: &[PolicyRankedProposal]| {
            ranking
                .get(index)
                .map(|r| format!("{} ({:.4})", r.id(), r.policy_score))
                .unwrap_or_default()
        };
        let _ = writeln!(
            out,
            "{:<5} {:<26} {:<26}",
            index + 1,
            cell(comparison.ranking_a.as_slice()),
            cell(comparison.ranking_b.as_slice())
        );
    }

    let moved: Vec<_> = comparison
        .shifts
        .iter()
        .filter(|s| s.shift() != 0 && (s.rank_a <= top || s.rank_b <= top))
        .collect();
    if moved.is_empty() {
        let _ = writeln!(out, "\nNo rank changes between {} and {}.", a, b);
    } else {
        let _ = writeln!(out, "\nRank shifts ({} -> {}):", a, b);
        for shift in moved {
            let _ = writeln!(
                out,
                "  {}: {} -> {} ({:+})",
                shift.id,
                shift.rank_a,
                shift.rank_b,
                shift.shift()
            );
        }
    }
    out
}

pub fn evidence_table(pack: &[EvidenceItem]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4} {:<12} {:>9} {:>10} {:>7} {:>8}  {}",
        "#", "exp_id", "stab_days", "irritation", "qc_fail", "priority", "observation"
    );
    for (index, item) in pack.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4} {:<12} {:>9.0} {:>10.2} {:>7} {:>8.4}  {}",
            index + 1,
            item.exp_id,
            item.stability_days,
            item.irritation_risk,
            item.qc_fail,
            item.priority,
            item.observation
        );
    }
    out
}

pub fn policy_table() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:>7} {:>7} {:>7} {:>7}",
        "policy", "w_perm", "w_stab", "w_irr", "w_fail"
    );
    for policy in Policy::ALL {
        let w = policy.weights();
        let _ = writeln!(
            out,
            "{:<16} {:>7.2} {:>7.2} {:>7.2} {:>7.2}",
            policy.as_str(),
            w.permeability,
            w.stability,
            w.irritation,
            w.fail_probability
        );
    }
    out
}
