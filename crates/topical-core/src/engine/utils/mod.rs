//! # Engine Utilities
//!
//! Helpers shared by the ranking stages and the evidence pack.

pub mod ordering;
