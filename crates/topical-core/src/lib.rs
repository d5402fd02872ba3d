//! # Topical Core Library
//!
//! Candidate generation, model scoring, constraint filtering, and policy ranking
//! for topical formulation R&D decision support.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture so that each stage of the proposal
//! pipeline can be tested on its own and composed freely by callers.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`FeatureVector`, `ScoredCandidate`,
//!   `Proposal`), the injected predictive model interface together with an analytic
//!   surrogate model set, and tabular I/O.
//!
//! - **[`engine`]: The Logic Core.** The individual pipeline stages: seeded candidate
//!   sampling, model scoring with clamping, constraint filtering, utility ranking, and
//!   policy re-ranking, evidence pack prioritization, plus configuration, error types, progress reporting, and an explicit
//!   scored-pool cache.
//!
//! - **[`workflows`]: The Public API.** End-to-end entry points that chain the engine stages
//!   into a proposal set (`generate_proposals`) and re-rank or compare that set under named
//!   decision policies (`rank_by_policy`, `compare_policies`). Historical experiment records
//!   are turned into a prioritized, traceable evidence pack (`evidence::assemble`).

pub mod core;
pub mod engine;
pub mod workflows;
