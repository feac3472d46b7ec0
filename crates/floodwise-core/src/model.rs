//! Model traits.
//!
//! The trained model is opaque to the rest of the workspace: something that
//! turns one ordered feature vector into a scalar. Where it comes from (a file,
//! a cache, a test double) is the loader's business.

use std::sync::Arc;

use floodwise_types::error::PredictionError;
use floodwise_types::schema::FeatureVector;

/// A trained flood model.
pub trait FloodModel: Send + Sync {
    /// Short identifier of the model family, used in logs.
    fn kind(&self) -> &str;

    /// Score one feature vector. The raw output is interpreted as a flood
    /// probability by the adapter.
    ///
    /// Failures are reported as [`PredictionError::Inference`].
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError>;
}

/// Source of a ready-to-use model.
///
/// Load failures (missing artifact, incompatible format) are reported as
/// [`PredictionError::ModelUnavailable`].
pub trait ModelLoader: Send + Sync {
    fn load(&self) -> Result<Arc<dyn FloodModel>, PredictionError>;
}

impl<L: ModelLoader + ?Sized> ModelLoader for Arc<L> {
    fn load(&self) -> Result<Arc<dyn FloodModel>, PredictionError> {
        (**self).load()
    }
}
