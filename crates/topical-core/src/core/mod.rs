//! # Core Module
//!
//! Fundamental building blocks for the formulation proposal pipeline.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Feature vectors, candidate pools, scored candidates, proposals
//! - **Predictive Models** ([`predict`]) - The injected property model interface and the
//!   analytic surrogate model set
//! - **File I/O** ([`io`]) - Delimited import of candidate pools and export of ranked rows
//!
//! Everything in this layer is stateless: values are created, copied, and annotated, but
//! never mutated behind the caller's back.

pub mod io;
pub mod models;
pub mod predict;
