use crate::report::DEFAULT_TOP_K;
use topical::engine::evidence::DEFAULT_EVIDENCE_TOP_N;
use topical::engine::policy::Policy;
use topical::engine::sampler::DEFAULT_POOL_SIZE;

pub struct DefaultsConfig {
    pub pool_size: usize,
    pub seed: u64,
    pub top_n: usize,
    pub policy: Policy,
    pub max_irritation: f64,
    pub min_stability: f64,
    pub max_fail_prob: f64,
    pub report_top_k: usize,
    pub evidence_top_n: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            seed: 7,
            top_n: 12,
            policy: Policy::Balanced,
            max_irritation: 0.65,
            min_stability: 120.0,
            max_fail_prob: 0.40,
            report_top_k: DEFAULT_TOP_K,
            evidence_top_n: DEFAULT_EVIDENCE_TOP_N,
        }
    }
}
