//! # Workflows Module
//!
//! End-to-end entry points that chain the engine stages into the results a decision
//! maker looks at.
//!
//! ## Architecture
//!
//! - **Proposal Workflow** ([`propose`]) - sampling, scoring, constraint filtering, and
//!   utility ranking of a seeded candidate pool into a `PROP-NNN` proposal set, either from
//!   a validated [`ProposalConfig`](crate::engine::config::ProposalConfig), a caller-owned
//!   scored pool cache, or an externally supplied candidate pool.
//! - **Policy Workflow** ([`rank`]) - re-ranking of a proposal set under a named decision
//!   policy, and side-by-side comparison of two policies with per-proposal rank shifts.
//! - **Evidence Workflow** ([`evidence`]) - prioritization of historical experiment records,
//!   with their development notes merged in, into a traceable evidence pack.
//!
//! Every workflow call owns its intermediate tables. Nothing is shared between calls
//! except what the caller passes in explicitly.

pub mod evidence;
pub mod propose;
pub mod rank;
