use super::config::ConfigError;
use crate::core::predict::{PredictionError, Target};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Model evaluation failed for candidate {index} ({target}): {source}")]
    ModelEvaluation {
        index: usize,
        target: Target,
        #[source]
        source: PredictionError,
    },
}
