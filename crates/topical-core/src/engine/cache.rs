use super::error::EngineError;
use super::progress::ProgressReporter;
use super::sampler::CandidateSampler;
use super::scoring::score_with_progress;
use crate::core::models::candidate::ScoredCandidate;
use crate::core::predict::PredictiveModelSet;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolKey {
    pub pool_size: usize,
    pub seed: u64,
}

/// Scored candidate pools keyed by `(pool_size, seed)`.
///
/// A cache is only meaningful for one sampler configuration and one model set: sampling
/// and scoring are deterministic in `(pool_size, seed)` for those, so the scored table can
/// be reused across filter and ranking changes. The owner decides when entries go stale
/// and drops them with [`invalidate`](Self::invalidate) or [`clear`](Self::clear).
#[derive(Debug, Default, Clone)]
pub struct ScoredPoolCache {
    data: HashMap<PoolKey, Vec<ScoredCandidate>>,
}

impl ScoredPoolCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: PoolKey, scored: Vec<ScoredCandidate>) {
        self.data.insert(key, scored);
    }

    pub fn get(&self, key: PoolKey) -> Option<&[ScoredCandidate]> {
        self.data.get(&key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: PoolKey) -> bool {
        self.data.contains_key(&key)
    }

    /// Returns the cached table for `key`, sampling and scoring it first on a miss.
    ///
    /// A scoring failure leaves the cache unchanged.
    pub fn get_or_score(
        &mut self,
        key: PoolKey,
        sampler: &CandidateSampler,
        models: &PredictiveModelSet,
        reporter: &ProgressReporter,
    ) -> Result<&[ScoredCandidate], EngineError> {
        match self.data.entry(key) {
            Entry::Occupied(entry) => {
                debug!(?key, "Scored pool cache hit.");
                Ok(entry.into_mut().as_slice())
            }
            Entry::Vacant(entry) => {
                debug!(?key, "Scored pool cache miss.");
                let pool = sampler.generate(key.pool_size, key.seed);
                let scored = score_with_progress(&pool, models, reporter)?;
                Ok(entry.insert(scored).as_slice())
            }
        }
    }

    /// Drops one entry, returning whether it was present.
    pub fn invalidate(&mut self, key: PoolKey) -> bool {
        self.data.remove(&key).is_some()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
