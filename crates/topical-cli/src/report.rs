use chrono::NaiveDate;
use std::fmt::Write;
use topical::core::models::evidence::EvidenceItem;
use topical::core::models::proposal::PolicyRankedProposal;
use topical::engine::policy::Policy;

pub const DEFAULT_TOP_K: usize = 5;

/// Renders the Markdown recommendation summary for the first `top_k` ranked proposals.
pub fn render_recommendations(
    ranked: &[PolicyRankedProposal],
    policy: Policy,
    date: NaiveDate,
    top_k: usize,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Formulation Recommendations ({})", policy);
    let _ = writeln!(out, "Date: {}\n", date.format("%Y-%m-%d"));
    let _ = writeln!(out, "## Recommended next experiments (decision-support)");

    for entry in ranked.iter().take(top_k) {
        let id = entry.id();
        let p = &entry.proposal.candidate.predictions;
        let _ = writeln!(out, "### {}", id);
        let _ = writeln!(
            out,
            "- Pred permeability: **{:.1}** (0–100)",
            p.permeability
        );
        let _ = writeln!(out, "- Pred irritation: **{:.2}** (0–1)", p.irritation);
        let _ = writeln!(out, "- Pred stability: **{:.0} days**", p.stability);
        let _ = writeln!(out, "- Pred QC fail prob: **{:.2}**", p.qc_fail_prob);
        let _ = writeln!(out, "- Trace: derived from row `{}` in proposal set\n", id);
    }

    let _ = writeln!(out, "## Governance Notes");
    let _ = writeln!(
        out,
        "- Advisory only; final selection remains with the R&D team."
    );
    let _ = write!(
        out,
        "- During POC, validate outputs against wet-lab results in shadow-mode."
    );
    out
}

pub const EVIDENCE_PACK_TITLE: &str = "Development Readiness Evidence Pack";

/// Renders the Markdown narrative of an evidence pack, one numbered section per item.
pub fn render_evidence_pack(pack: &[EvidenceItem], title: &str, date: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", title);
    let _ = writeln!(out, "Date: {}\n", date.format("%Y-%m-%d"));
    let _ = writeln!(out, "## Summary");
    let _ = writeln!(
        out,
        "This pack summarizes high-priority development signals and links each statement \
         to an underlying experiment record.\n"
    );

    for (index, item) in pack.iter().enumerate() {
        let _ = writeln!(out, "### {}. {}", index + 1, item.exp_id);
        let _ = writeln!(out, "- Stability days: **{:.0}**", item.stability_days);
        let _ = writeln!(out, "- Irritation risk: **{:.2}**", item.irritation_risk);
        let _ = writeln!(out, "- QC fail: **{}**", item.qc_fail);
        let _ = writeln!(out, "- Observation: {}", item.observation);
        let _ = writeln!(out, "- Trace: `{}`\n", item.trace);
    }

    let _ = writeln!(out, "## Governance Notes");
    let _ = writeln!(
        out,
        "- Decision-support output only; scientific judgment remains with the R&D team."
    );
    let _ = write!(
        out,
        "- No regulatory submission artifacts are generated; this supports readiness and \
         cross-functional handoff quality."
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use topical::core::models::candidate::{Predictions, ScoredCandidate};
    use topical::core::models::features::FeatureVector;
    use topical::core::models::ids::ProposalId;
    use topical::core::models::proposal::Proposal;
    use topical::engine::policy::apply_policy;

    fn proposal(rank: usize, perm: f64, stab: f64) -> Proposal {
        Proposal {
            id: ProposalId::from_rank(rank).unwrap(),
            candidate: ScoredCandidate::new(
                FeatureVector::from_array([1.0; 8]),
                Predictions {
                    permeability: perm,
                    irritation: 0.234,
                    stability: stab,
                    qc_fail_prob: 0.0561,
                },
            ),
            utility: 0.0,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn renders_header_sections_and_governance_notes() {
        let ranked = apply_policy(&[proposal(1, 71.26, 201.4)], Policy::LowRisk);
        let md = render_recommendations(&ranked, Policy::LowRisk, date(), DEFAULT_TOP_K);

        let expected = "\
# Formulation Recommendations (low_risk)
Date: 2024-03-09

## Recommended next experiments (decision-support)
### PROP-001
- Pred permeability: **71.3** (0–100)
- Pred irritation: **0.23** (0–1)
- Pred stability: **201 days**
- Pred QC fail prob: **0.06**
- Trace: derived from row `PROP-001` in proposal set

## Governance Notes
- Advisory only; final selection remains with the R&D team.
- During POC, validate outputs against wet-lab results in shadow-mode.";
        assert_eq!(md, expected);
    }

    #[test]
    fn only_top_k_proposals_are_listed_in_policy_order() {
        let proposals: Vec<Proposal> = (1..=7)
            .map(|rank| proposal(rank, 10.0 * rank as f64, 100.0))
            .collect();
        let ranked = apply_policy(&proposals, Policy::SpeedToClinic);
        let md = render_recommendations(&ranked, Policy::SpeedToClinic, date(), 3);

        assert_eq!(md.matches("### PROP-").count(), 3);
        let first = md.find("### PROP-007").unwrap();
        let second = md.find("### PROP-006").unwrap();
        assert!(first < second);
        assert!(!md.contains("PROP-001"));
    }

    #[test]
    fn empty_ranking_still_renders_governance_notes() {
        let md = render_recommendations(&[], Policy::Balanced, date(), DEFAULT_TOP_K);
        assert!(md.starts_with("# Formulation Recommendations (balanced)"));
        assert!(!md.contains("###"));
        assert!(md.contains("## Governance Notes"));
    }

    fn evidence_item(id: &str, observation: &str) -> EvidenceItem {
        EvidenceItem {
            exp_id: id.to_string(),
            stability_days: 88.4,
            irritation_risk: 0.716,
            qc_fail: 1,
            observation: observation.to_string(),
            priority: 0.81,
            trace: EvidenceItem::trace_for(id),
        }
    }

    #[test]
    fn renders_numbered_evidence_sections_with_traces() {
        let pack = vec![
            evidence_item("EXP-00012", "QC observation: out-of-spec event recorded in run."),
            evidence_item("EXP-00340", "No notes."),
        ];
        let md = render_evidence_pack(&pack, EVIDENCE_PACK_TITLE, date());

        let expected = "\
# Development Readiness Evidence Pack
Date: 2024-03-09

## Summary
This pack summarizes high-priority development signals and links each statement to an underlying experiment record.

### 1. EXP-00012
- Stability days: **88**
- Irritation risk: **0.72**
- QC fail: **1**
- Observation: QC observation: out-of-spec event recorded in run.
- Trace: `Data row exp_id=EXP-00012`

### 2. EXP-00340
- Stability days: **88**
- Irritation risk: **0.72**
- QC fail: **1**
- Observation: No notes.
- Trace: `Data row exp_id=EXP-00340`

## Governance Notes
- Decision-support output only; scientific judgment remains with the R&D team.
- No regulatory submission artifacts are generated; this supports readiness and cross-functional handoff quality.";
        assert_eq!(md, expected);
    }

    #[test]
    fn evidence_pack_title_can_be_replaced() {
        let md = render_evidence_pack(&[], "Handoff Review", date());
        assert!(md.starts_with("# Handoff Review\nDate: 2024-03-09"));
        assert!(!md.contains("###"));
    }
}
