//! # Models Module
//!
//! Data structures carried through the proposal pipeline.
//!
//! - **Features** ([`features`]) - The 8-field formulation feature vector and candidate pools
//! - **Candidates** ([`candidate`]) - Feature vectors annotated with predicted properties
//! - **Proposals** ([`proposal`]) - Ranked candidates with positional identifiers and the
//!   flat row records used for rendering and export
//! - **Identifiers** ([`ids`]) - Positional proposal identifiers
//! - **Evidence** ([`evidence`]) - Historical experiment records, development notes, and
//!   the prioritized evidence pack entries built from them

pub mod candidate;
pub mod evidence;
pub mod features;
pub mod ids;
pub mod proposal;
