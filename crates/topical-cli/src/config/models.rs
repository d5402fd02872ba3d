use std::path::PathBuf;
use topical::engine::config::ProposalConfig;
use topical::engine::policy::Policy;
use topical::engine::sampler::SamplerConfig;

/// Fully merged settings of one proposal run.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub proposal: ProposalConfig,
    pub policy: Policy,
    pub models_path: Option<PathBuf>,
    pub report_top_k: usize,
}

/// Settings of an evidence pack run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvidenceConfig {
    pub top_n: usize,
}

/// Settings of a standalone sampling run.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    pub pool_size: usize,
    pub seed: u64,
    pub sampler: SamplerConfig,
}
