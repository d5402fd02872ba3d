use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const PREFIX: &str = "PROP-";

/// Positional identifier of a proposal within one ranking call's output.
///
/// The identifier encodes the 1-based rank at which the proposal left the utility ranker
/// and renders as `PROP-{rank:03}`. It is not derived from the proposal's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProposalId(usize);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid proposal id '{0}'. Expected 'PROP-<rank>' with a positive rank.")]
pub struct InvalidProposalId(pub String);

impl ProposalId {
    /// Creates the identifier for a 1-based output rank.
    ///
    /// Returns `None` for rank zero.
    pub fn from_rank(rank: usize) -> Option<Self> {
        (rank > 0).then_some(Self(rank))
    }

    /// Creates the identifier for the proposal at 0-based output position `index`.
    pub fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    pub fn rank(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", PREFIX, self.0)
    }
}

impl FromStr for ProposalId {
    type Err = InvalidProposalId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(PREFIX)
            .and_then(|digits| digits.parse::<usize>().ok())
            .and_then(ProposalId::from_rank)
            .ok_or_else(|| InvalidProposalId(s.to_string()))
    }
}

impl Serialize for ProposalId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProposalId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
