//! # I/O Module
//!
//! Delimited-text import of candidate pools and export of ranked proposal rows, plus
//! import of experiment records and development notes and export of evidence packs.
//!
//! Rows are written through [`ProposalRecord`](crate::core::models::proposal::ProposalRecord),
//! so the column names match the record's field names.

pub mod table;
