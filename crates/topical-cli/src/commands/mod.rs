pub mod compare;
pub mod evidence;
pub mod policies;
pub mod propose;
pub mod sample;

use crate::error::Result;
use std::path::Path;
use topical::core::predict::PredictiveModelSet;
use topical::core::predict::surrogate::{SurrogateParams, default_model_set};
use tracing::info;

/// Loads the surrogate coefficients at `path`, or the built-in set when none is given.
pub(crate) fn load_models(path: Option<&Path>) -> Result<PredictiveModelSet> {
    match path {
        Some(path) => {
            info!("Loading surrogate model coefficients from {:?}", path);
            Ok(SurrogateParams::load(path)?.into_model_set())
        }
        None => {
            info!("Using built-in surrogate model coefficients.");
            Ok(default_model_set())
        }
    }
}
