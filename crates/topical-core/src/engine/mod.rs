//! # Engine Module
//!
//! The stages of the formulation proposal pipeline and the machinery around them.
//!
//! ## Overview
//!
//! A proposal run flows through five stages, each producing a fresh, independently owned
//! table from the previous one:
//!
//! 1. **Sampling** ([`sampler`]) - seeded draw of a candidate pool from per-feature distributions
//! 2. **Scoring** ([`scoring`]) - property prediction through the injected model set, with clamping
//! 3. **Filtering** ([`filter`]) - conjunctive, order-preserving constraint thresholds
//! 4. **Ranking** ([`ranking`]) - fixed-weight utility, stable top-N, positional proposal ids
//! 5. **Policy re-ranking** ([`policy`]) - re-scoring of a proposal set under a named policy
//!
//! ## Supporting Modules
//!
//! - **Configuration** ([`config`]) - Validated constraints and run parameters
//! - **Error Handling** ([`error`]) - Configuration and model evaluation failures
//! - **Progress Monitoring** ([`progress`]) - Stage-level progress callbacks
//! - **Caching** ([`cache`]) - Explicit, caller-owned cache of scored pools
//!
//! ## Evidence Packs
//!
//! [`evidence`] works on historical experiment records instead of sampled candidates: it
//! merges development notes into each record and keeps the highest-priority ones for review.

pub mod cache;
pub mod config;
pub mod error;
pub mod evidence;
pub mod filter;
pub mod policy;
pub mod progress;
pub mod ranking;
pub mod sampler;
pub mod scoring;
pub(crate) mod utils;
